//! Opaque binary values.
use crate::error::{Result, VrMismatchSnafu};
use crate::header::VR;
use snafu::ensure;
use std::fmt;
use std::io::{self, Write};

/// Number of bytes shown before the textual form is truncated.
const MAX_DISPLAY_BYTES: usize = 16;

/// A value of one of the binary VRs (OB, OD, OF, OL, OV, OW, UN),
/// or the undecoded bytes of a sequence (SQ).
///
/// The payload is kept as given, without interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryValue {
    vr: VR,
    data: Vec<u8>,
}

impl BinaryValue {
    /// Whether the given VR can hold a binary value.
    pub fn admits(vr: VR) -> bool {
        vr.is_binary() || vr == VR::SQ
    }

    /// Create a binary value.
    pub fn new(vr: VR, data: impl Into<Vec<u8>>) -> Result<Self> {
        ensure!(
            BinaryValue::admits(vr),
            VrMismatchSnafu {
                vr,
                expected: "binary"
            }
        );
        Ok(BinaryValue {
            vr,
            data: data.into(),
        })
    }

    /// Create a binary value from an optional payload,
    /// where an absent payload is the same as an empty one.
    pub fn from_option(vr: VR, data: Option<Vec<u8>>) -> Result<Self> {
        BinaryValue::new(vr, data.unwrap_or_default())
    }

    /// The value representation.
    pub fn vr(&self) -> VR {
        self.vr
    }

    /// The payload, without padding.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Length of the payload in bytes, without padding.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Encode the value: the payload, plus one null byte if its length is odd.
    pub fn emit(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() + 1);
        out.extend_from_slice(&self.data);
        if out.len() % 2 == 1 {
            out.push(0x00);
        }
        out
    }

    /// Write the encoded value, as in [`emit`](BinaryValue::emit),
    /// returning the number of bytes written.
    pub fn write_to<W: Write>(&self, mut to: W) -> io::Result<usize> {
        to.write_all(&self.data)?;
        if self.data.len() % 2 == 1 {
            to.write_all(&[0x00])?;
            return Ok(self.data.len() + 1);
        }
        Ok(self.data.len())
    }
}

impl fmt::Display for BinaryValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("[")?;
        for (i, byte) in self.data.iter().take(MAX_DISPLAY_BYTES).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        if self.data.len() > MAX_DISPLAY_BYTES {
            write!(f, " ... ({} bytes)", self.data.len())?;
        }
        f.write_str("]")
    }
}
