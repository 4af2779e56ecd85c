//! Character string values and their conversion into temporal values.
use crate::error::{
    EmptyValueSnafu, LengthExceededSnafu, MultiValuedTemporalSnafu, Result, VrMismatchSnafu,
};
use crate::header::VR;
use crate::value::age::Age;
use crate::value::deserialize::{parse_age, parse_date, parse_datetime, parse_time};
use crate::value::partial::{DicomDate, DicomDateTime, DicomTime};
use crate::value::C;
use itertools::Itertools;
use snafu::ensure;
use std::fmt;
use std::io::{self, Write};

/// A value of one of the character string VRs
/// (AE, AS, CS, DA, DS, DT, IS, LO, LT, PN, SH, ST, TM, UC, UI, UR, UT).
///
/// Each string is one value of a possibly multi-valued element.
/// When encoded, the strings are joined with a backslash.
/// For PN, a single string may itself hold backslashes,
/// which separate the name groups of one person name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharacterValue {
    vr: VR,
    values: C<String>,
}

impl CharacterValue {
    /// Create a character value after checking
    /// that `vr` is a string VR
    /// and that no string is longer than the VR admits.
    ///
    /// ```
    /// # use dicom_values::{VR, value::CharacterValue};
    /// let value = CharacterValue::new(VR::CS, ["ORIGINAL", "PRIMARY"]).unwrap();
    /// assert_eq!(value.emit(), b"ORIGINAL\\PRIMARY");
    /// assert!(CharacterValue::new(VR::CS, ["SEVENTEEN_LETTERS"]).is_err());
    /// ```
    pub fn new<I, S>(vr: VR, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ensure!(
            vr.is_string(),
            VrMismatchSnafu {
                vr,
                expected: "character"
            }
        );
        let values: C<String> = values.into_iter().map(Into::into).collect();
        let max = vr.max_chars();
        if max > 0 {
            for value in &values {
                if vr.allows_backslash_in_value() {
                    for name in value.split('\\') {
                        check_length(vr, name, max)?;
                    }
                } else {
                    check_length(vr, value, max)?;
                }
            }
        }
        Ok(CharacterValue { vr, values })
    }

    /// Create a character value holding a single string.
    pub fn single(vr: VR, value: impl Into<String>) -> Result<Self> {
        CharacterValue::new(vr, [value.into()])
    }

    /// The value representation.
    pub fn vr(&self) -> VR {
        self.vr
    }

    /// The individual strings, in order.
    pub fn strings(&self) -> &[String] {
        &self.values
    }

    /// The number of strings.
    pub fn multiplicity(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no strings.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Encode the value.
    ///
    /// Strings are joined with a backslash.
    /// A UI value of odd length receives one trailing null byte;
    /// other VRs are not padded here,
    /// since space padding belongs to the element encoder.
    pub fn emit(&self) -> Vec<u8> {
        let mut out = self.values.iter().join("\\").into_bytes();
        if self.vr == VR::UI && out.len() % 2 == 1 {
            out.push(self.vr.padding());
        }
        out
    }

    /// Write the encoded value, as in [`emit`](CharacterValue::emit),
    /// returning the number of bytes written.
    pub fn write_to<W: Write>(&self, mut to: W) -> io::Result<usize> {
        let bytes = self.emit();
        to.write_all(&bytes)?;
        Ok(bytes.len())
    }

    /// Interpret this DA value as a date.
    pub fn as_date(&self) -> Result<DicomDate> {
        Ok(parse_date(self.single_temporal(VR::DA)?)?)
    }

    /// Interpret this TM value as a time.
    pub fn as_time(&self) -> Result<DicomTime> {
        Ok(parse_time(self.single_temporal(VR::TM)?)?)
    }

    /// Interpret this DT value as a date-time.
    pub fn as_datetime(&self) -> Result<DicomDateTime> {
        Ok(parse_datetime(self.single_temporal(VR::DT)?)?)
    }

    /// Interpret this AS value as an age.
    pub fn as_age(&self) -> Result<Age> {
        Ok(parse_age(self.single_temporal(VR::AS)?)?)
    }

    /// Retrieve the only string of a value of the given temporal VR.
    fn single_temporal(&self, expected: VR) -> Result<&str> {
        ensure!(
            self.vr == expected,
            VrMismatchSnafu {
                vr: self.vr,
                expected: expected.as_str(),
            }
        );
        match self.values.as_slice() {
            [] => EmptyValueSnafu { vr: self.vr }.fail(),
            [value] => Ok(value.as_str()),
            values => MultiValuedTemporalSnafu {
                vr: self.vr,
                count: values.len(),
            }
            .fail(),
        }
    }
}

/// Check a single string against the VR's limit.
/// The length is counted in characters, not UTF-8 bytes,
/// so a name in a multi-byte character set
/// is admitted up to the same number of characters as an ASCII one.
fn check_length(vr: VR, value: &str, max: usize) -> Result<()> {
    let length = value.chars().count();
    ensure!(
        length <= max,
        LengthExceededSnafu {
            vr,
            value,
            length,
            max,
        }
    );
    Ok(())
}

impl fmt::Display for CharacterValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.values.iter().format("\\"))
    }
}
