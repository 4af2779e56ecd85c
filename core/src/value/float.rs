//! Binary floating point values.
use crate::error::{Result, VrMismatchSnafu};
use crate::header::VR;
use crate::value::C;
use byteordered::ByteOrdered;
use itertools::Itertools;
use snafu::ensure;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{self, Write};
use tracing::debug;

/// A value of one of the binary floating point VRs (FL, FD).
///
/// All numbers are held as `f64`, including those of FL,
/// which are narrowed to `f32` on encoding.
/// Narrowing may lose precision and is not an error.
///
/// # Equality
///
/// Unlike IEEE 754 comparison,
/// two NaN numbers are considered equal,
/// so that value equality is reflexive.
/// Positive and negative zero remain equal.
#[derive(Debug, Clone)]
pub struct FloatValue {
    vr: VR,
    values: C<f64>,
}

impl FloatValue {
    /// Create a floating point value.
    /// Any number is admitted, including NaN and the infinities.
    pub fn new<I>(vr: VR, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        ensure!(
            matches!(vr, VR::FL | VR::FD),
            VrMismatchSnafu {
                vr,
                expected: "floating point"
            }
        );
        let values: C<f64> = values.into_iter().collect();
        if vr == VR::FL {
            for &v in &values {
                if v.is_finite() && f64::from(v as f32) != v {
                    debug!(value = v, "FL value is not exactly representable in single precision");
                }
            }
        }
        Ok(FloatValue { vr, values })
    }

    /// The value representation.
    pub fn vr(&self) -> VR {
        self.vr
    }

    /// The numbers, in order, as given.
    pub fn floats(&self) -> &[f64] {
        &self.values
    }

    /// The number of floating point numbers.
    pub fn multiplicity(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no numbers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Encode the numbers as little endian IEEE 754,
    /// in single precision for FL and double precision for FD.
    pub fn emit(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.values.len() * 8);
        // writing into a `Vec` cannot fail
        let _ = self.write_to(&mut out);
        out
    }

    /// Write the encoded value, as in [`emit`](FloatValue::emit),
    /// returning the number of bytes written.
    pub fn write_to<W: Write>(&self, to: W) -> io::Result<usize> {
        let mut to = ByteOrdered::le(to);
        for &v in &self.values {
            if self.vr == VR::FL {
                to.write_f32(v as f32)?;
            } else {
                to.write_f64(v)?;
            }
        }
        Ok(self.values.len() * self.vr.value_width().unwrap_or(0))
    }
}

fn same_number(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

impl PartialEq for FloatValue {
    fn eq(&self, other: &Self) -> bool {
        self.vr == other.vr
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(a, b)| same_number(*a, *b))
    }
}

impl Eq for FloatValue {}

impl Hash for FloatValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vr.hash(state);
        self.values.len().hash(state);
        for v in &self.values {
            // keep consistent with equality: one NaN, one zero
            let bits = if v.is_nan() {
                f64::NAN.to_bits()
            } else if *v == 0. {
                0
            } else {
                v.to_bits()
            };
            bits.hash(state);
        }
    }
}

struct FloatDisplay(f64);

impl fmt::Display for FloatDisplay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            f.write_str("NaN")
        } else if v == f64::INFINITY {
            f.write_str("+Inf")
        } else if v == f64::NEG_INFINITY {
            f.write_str("-Inf")
        } else {
            write!(f, "{}", v)
        }
    }
}

impl fmt::Display for FloatValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            self.values.iter().map(|v| FloatDisplay(*v)).format("\\")
        )
    }
}
