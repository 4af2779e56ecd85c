//! Binary integer values, including attribute tags.
use crate::error::{RangeExceededSnafu, Result, VrMismatchSnafu};
use crate::header::{Tag, VR};
use crate::value::C;
use byteordered::ByteOrdered;
use itertools::Itertools;
use snafu::ensure;
use std::fmt;
use std::io::{self, Write};

/// A value of one of the binary integer VRs (SS, US, SL, UL, SV, UV)
/// or of an attribute tag list (AT).
///
/// All numbers are held as `i64`.
/// AT numbers hold the group in the high 16 bits
/// and the element in the low 16 bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntegerValue {
    vr: VR,
    values: C<i64>,
}

/// The inclusive range of numbers representable in the given VR,
/// or `None` if the VR does not hold integers.
pub fn integer_range(vr: VR) -> Option<(i64, i64)> {
    match vr {
        VR::SS => Some((i16::MIN.into(), i16::MAX.into())),
        VR::US => Some((0, u16::MAX.into())),
        VR::SL => Some((i32::MIN.into(), i32::MAX.into())),
        VR::UL | VR::AT => Some((0, u32::MAX.into())),
        VR::SV => Some((i64::MIN, i64::MAX)),
        // only the non-negative half of u64 fits
        VR::UV => Some((0, i64::MAX)),
        _ => None,
    }
}

impl IntegerValue {
    /// Create an integer value,
    /// checking that every number fits the VR.
    ///
    /// ```
    /// # use dicom_values::{VR, value::IntegerValue};
    /// let value = IntegerValue::new(VR::SS, [256]).unwrap();
    /// assert_eq!(value.emit(), [0x00, 0x01]);
    /// assert!(IntegerValue::new(VR::US, [-1]).is_err());
    /// ```
    pub fn new<I>(vr: VR, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        let (min, max) = match integer_range(vr) {
            Some(range) => range,
            None => {
                return VrMismatchSnafu {
                    vr,
                    expected: "integer",
                }
                .fail()
            }
        };
        let values: C<i64> = values.into_iter().collect();
        for &value in &values {
            ensure!(
                (min..=max).contains(&value),
                RangeExceededSnafu {
                    vr,
                    value,
                    min,
                    max
                }
            );
        }
        Ok(IntegerValue { vr, values })
    }

    /// Create an AT value from a list of tags.
    pub fn from_tags<I>(tags: I) -> Self
    where
        I: IntoIterator<Item = Tag>,
    {
        IntegerValue {
            vr: VR::AT,
            values: tags.into_iter().map(|t| i64::from(u32::from(t))).collect(),
        }
    }

    /// The value representation.
    pub fn vr(&self) -> VR {
        self.vr
    }

    /// The numbers, in order.
    pub fn ints(&self) -> &[i64] {
        &self.values
    }

    /// The number of integers.
    pub fn multiplicity(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no integers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The numbers of an AT value as tags,
    /// or `None` if this is not an AT value.
    pub fn tags(&self) -> Option<C<Tag>> {
        if self.vr != VR::AT {
            return None;
        }
        Some(self.values.iter().map(|&v| Tag::from(v as u32)).collect())
    }

    /// Encode the numbers in little endian,
    /// with the width of the VR.
    pub fn emit(&self) -> Vec<u8> {
        let width = self.vr.value_width().unwrap_or(0);
        let mut out = Vec::with_capacity(self.values.len() * width);
        // writing into a `Vec` cannot fail
        let _ = self.write_to(&mut out);
        out
    }

    /// Write the encoded value, as in [`emit`](IntegerValue::emit),
    /// returning the number of bytes written.
    pub fn write_to<W: Write>(&self, to: W) -> io::Result<usize> {
        let mut to = ByteOrdered::le(to);
        for &v in &self.values {
            match self.vr {
                VR::SS => to.write_i16(v as i16)?,
                VR::US => to.write_u16(v as u16)?,
                VR::SL => to.write_i32(v as i32)?,
                VR::UL => to.write_u32(v as u32)?,
                VR::AT => {
                    let tag = Tag::from(v as u32);
                    to.write_u16(tag.group())?;
                    to.write_u16(tag.element())?;
                }
                VR::SV => to.write_i64(v)?,
                VR::UV => to.write_u64(v as u64)?,
                _ => {}
            }
        }
        Ok(self.values.len() * self.vr.value_width().unwrap_or(0))
    }
}

impl fmt::Display for IntegerValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.values.iter().format("\\"))
    }
}
