//! This module contains the value representation (VR) type,
//! along with its static table of per-VR properties,
//! and the DICOM attribute tag type.
//!
//! The property table follows DICOM Part 5, section 6.2.

use crate::error::{InvalidVrSnafu, Result};
use std::fmt;
use std::str::{from_utf8, FromStr};

/// An enum type for a DICOM value representation.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Ord, PartialOrd)]
pub enum VR {
    /// Application Entity
    AE,
    /// Age String
    AS,
    /// Attribute Tag
    AT,
    /// Code String
    CS,
    /// Date
    DA,
    /// Decimal String
    DS,
    /// Date Time
    DT,
    /// Floating Point Double
    FD,
    /// Floating Point Single
    FL,
    /// Integer String
    IS,
    /// Long String
    LO,
    /// Long Text
    LT,
    /// Other Byte
    OB,
    /// Other Double
    OD,
    /// Other Float
    OF,
    /// Other Long
    OL,
    /// Other Very Long
    OV,
    /// Other Word
    OW,
    /// Person Name
    PN,
    /// Short String
    SH,
    /// Signed Long
    SL,
    /// Sequence of Items
    SQ,
    /// Signed Short
    SS,
    /// Short Text
    ST,
    /// Signed Very Long
    SV,
    /// Time
    TM,
    /// Unlimited Characters
    UC,
    /// Unique Identifier (UID)
    UI,
    /// Unsigned Long
    UL,
    /// Unknown
    UN,
    /// Universal Resource Identifier or Universal Resource Locator (URI/URL)
    UR,
    /// Unsigned Short
    US,
    /// Unlimited Text
    UT,
    /// Unsigned Very Long
    UV,
}

/// The broad kind of data held by elements of a value representation.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum VrCategory {
    /// Character string data (AE, AS, CS, DA, DS, DT, IS, LO, LT,
    /// PN, SH, ST, TM, UC, UI, UR, UT).
    String,
    /// Opaque binary data (OB, OD, OF, OL, OV, OW, UN).
    Binary,
    /// Binary integers (SS, US, SL, UL, SV, UV and AT).
    Integer,
    /// Binary floating point numbers (FL, FD).
    Float,
    /// A sequence of items (SQ).
    Sequence,
}

/// Static properties of a value representation.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct VrProperties {
    /// The two-character code.
    pub display: &'static str,
    /// Maximum number of characters in a single value,
    /// `0` meaning unlimited or not applicable.
    pub max_chars: usize,
    /// Byte used to pad odd-length values to even length.
    pub padding: u8,
    /// Whether explicit VR encodings use a 32-bit value length field.
    pub explicit_length_32: bool,
    /// The kind of data held.
    pub category: VrCategory,
    /// Whether a backslash may appear inside a single value.
    pub allows_backslash_in_value: bool,
}

const SPACE: u8 = b' ';
const NULL: u8 = 0x00;

const fn props(
    display: &'static str,
    max_chars: usize,
    padding: u8,
    explicit_length_32: bool,
    category: VrCategory,
) -> VrProperties {
    VrProperties {
        display,
        max_chars,
        padding,
        explicit_length_32,
        category,
        allows_backslash_in_value: false,
    }
}

/// Property table, indexed by the VR discriminant.
static PROPERTIES: [VrProperties; 34] = {
    use VrCategory::*;
    [
        props("AE", 16, SPACE, false, String),
        props("AS", 4, SPACE, false, String),
        props("AT", 0, SPACE, false, Integer),
        props("CS", 16, SPACE, false, String),
        props("DA", 8, SPACE, false, String),
        props("DS", 16, SPACE, false, String),
        props("DT", 26, SPACE, false, String),
        props("FD", 0, SPACE, false, Float),
        props("FL", 0, SPACE, false, Float),
        props("IS", 12, SPACE, false, String),
        props("LO", 64, SPACE, false, String),
        props("LT", 10240, SPACE, false, String),
        props("OB", 0, NULL, true, Binary),
        props("OD", 0, NULL, true, Binary),
        props("OF", 0, NULL, true, Binary),
        props("OL", 0, NULL, true, Binary),
        props("OV", 0, NULL, true, Binary),
        props("OW", 0, NULL, true, Binary),
        // limit applies to each backslash-delimited name
        VrProperties {
            allows_backslash_in_value: true,
            ..props("PN", 64, SPACE, false, String)
        },
        props("SH", 16, SPACE, false, String),
        props("SL", 0, SPACE, false, Integer),
        props("SQ", 0, SPACE, true, Sequence),
        props("SS", 0, SPACE, false, Integer),
        props("ST", 1024, SPACE, false, String),
        props("SV", 0, SPACE, false, Integer),
        props("TM", 14, SPACE, false, String),
        props("UC", 0, SPACE, true, String),
        props("UI", 64, NULL, false, String),
        props("UL", 0, SPACE, false, Integer),
        props("UN", 0, NULL, true, Binary),
        props("UR", 0, SPACE, true, String),
        props("US", 0, SPACE, false, Integer),
        props("UT", 0, SPACE, true, String),
        props("UV", 0, SPACE, false, Integer),
    ]
};

impl VR {
    /// All value representations, in table order.
    pub const ALL: [VR; 34] = {
        use VR::*;
        [
            AE, AS, AT, CS, DA, DS, DT, FD, FL, IS, LO, LT, OB, OD, OF, OL, OV, OW, PN, SH, SL,
            SQ, SS, ST, SV, TM, UC, UI, UL, UN, UR, US, UT, UV,
        ]
    };

    /// Parse a value representation from its two-character code.
    ///
    /// The code must be in upper case
    /// and no surrounding whitespace is tolerated.
    ///
    /// ```
    /// # use dicom_values::VR;
    /// assert_eq!(VR::parse("PN").unwrap(), VR::PN);
    /// assert!(VR::parse("pn").is_err());
    /// assert!(VR::parse("XX").is_err());
    /// ```
    pub fn parse(code: &str) -> Result<Self> {
        VR::ALL
            .iter()
            .copied()
            .find(|vr| vr.as_str() == code)
            .ok_or_else(|| InvalidVrSnafu { code }.build())
    }

    /// Check whether the given string is a valid two-character VR code.
    pub fn is_valid(code: &str) -> bool {
        VR::parse(code).is_ok()
    }

    /// Obtain the value representation corresponding to the given two bytes.
    /// Each byte should represent an alphabetic character in upper case.
    pub fn from_binary(chars: [u8; 2]) -> Option<Self> {
        from_utf8(chars.as_ref())
            .ok()
            .and_then(|s| VR::parse(s).ok())
    }

    /// Retrieve the static properties of this VR.
    #[inline]
    pub fn properties(self) -> &'static VrProperties {
        &PROPERTIES[self as usize]
    }

    /// Retrieve the two-character code of this VR.
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.properties().display
    }

    /// Retrieve a copy of this VR's byte representation.
    /// The function returns two alphabetic characters in upper case.
    pub fn to_bytes(self) -> [u8; 2] {
        let bytes = self.as_str().as_bytes();
        [bytes[0], bytes[1]]
    }

    /// The byte used to pad an odd-length value of this VR:
    /// null for UI and for the binary VRs, space otherwise.
    #[inline]
    pub fn padding(self) -> u8 {
        self.properties().padding
    }

    /// The maximum number of characters in a single value of this VR.
    ///
    /// A result of `0` means that the length is unlimited
    /// (UC, UR, UT) or that the limit does not apply
    /// because the VR is not a character string.
    /// For PN, the limit applies to each name
    /// delimited by a backslash.
    #[inline]
    pub fn max_chars(self) -> usize {
        self.properties().max_chars
    }

    /// Whether explicit VR transfer syntaxes
    /// encode the value length of this VR in a 32-bit field
    /// (with two reserved bytes after the VR code).
    #[inline]
    pub fn explicit_length_32(self) -> bool {
        self.properties().explicit_length_32
    }

    /// The category of data held by this VR.
    #[inline]
    pub fn category(self) -> VrCategory {
        self.properties().category
    }

    /// Whether a backslash is admitted inside a single value.
    /// Only true for PN.
    #[inline]
    pub fn allows_backslash_in_value(self) -> bool {
        self.properties().allows_backslash_in_value
    }

    /// Whether this VR holds character strings.
    #[inline]
    pub fn is_string(self) -> bool {
        self.category() == VrCategory::String
    }

    /// Whether this VR holds opaque binary data.
    /// SQ is not considered binary.
    #[inline]
    pub fn is_binary(self) -> bool {
        self.category() == VrCategory::Binary
    }

    /// Whether this VR holds binary numbers, integer or floating point.
    /// AT is not numeric, even though its values are held as integers.
    #[inline]
    pub fn is_numeric(self) -> bool {
        self != VR::AT && matches!(self.category(), VrCategory::Integer | VrCategory::Float)
    }

    /// The size in bytes of each encoded number of this VR,
    /// or `None` if the VR is not numeric.
    pub fn value_width(self) -> Option<usize> {
        use VR::*;
        match self {
            SS | US => Some(2),
            SL | UL | AT | FL => Some(4),
            SV | UV | FD => Some(8),
            _ => None,
        }
    }
}

/// Obtain the value representation corresponding to the given string.
/// The string should hold exactly two UTF-8 encoded alphabetic characters
/// in upper case, otherwise no match is made.
impl FromStr for VR {
    type Err = crate::error::Error;

    fn from_str(string: &str) -> Result<Self> {
        VR::parse(string)
    }
}

impl fmt::Display for VR {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Idiomatic alias for a tag's group number.
pub type GroupNumber = u16;
/// Idiomatic alias for a tag's element number.
pub type ElementNumber = u16;

/// The data type for DICOM data element tags.
///
/// Values of VR AT are tags.
/// `Tag` converts to and from the logical `u32` form,
/// where the group number takes the high 16 bits.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy)]
pub struct Tag(pub GroupNumber, pub ElementNumber);

impl Tag {
    /// Getter for the tag's group value.
    #[inline]
    pub fn group(self) -> GroupNumber {
        self.0
    }

    /// Getter for the tag's element value.
    #[inline]
    pub fn element(self) -> ElementNumber {
        self.1
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({:#06X?}, {:#06X?})", self.0, self.1)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:04X},{:04X})", self.0, self.1)
    }
}

impl PartialEq<(u16, u16)> for Tag {
    fn eq(&self, other: &(u16, u16)) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}

impl From<(u16, u16)> for Tag {
    #[inline]
    fn from(value: (u16, u16)) -> Tag {
        Tag(value.0, value.1)
    }
}

impl From<u32> for Tag {
    #[inline]
    fn from(value: u32) -> Tag {
        Tag((value >> 16) as u16, (value & 0xFFFF) as u16)
    }
}

impl From<Tag> for u32 {
    #[inline]
    fn from(tag: Tag) -> u32 {
        (u32::from(tag.0) << 16) | u32::from(tag.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn vr_round_trips_through_its_code() {
        for vr in VR::ALL {
            assert_eq!(VR::parse(vr.as_str()).unwrap(), vr);
            assert_eq!(vr.to_string(), vr.as_str());
            assert_eq!(VR::from_binary(vr.to_bytes()), Some(vr));
        }
    }

    #[test]
    fn table_is_indexed_by_discriminant() {
        for (i, vr) in VR::ALL.iter().enumerate() {
            assert_eq!(*vr as usize, i);
            assert_eq!(PROPERTIES[i].display, format!("{:?}", vr));
        }
    }

    #[test]
    fn invalid_codes_are_rejected() {
        for code in ["", "P", "PNX", "pn", " PN", "PN ", "XX", "ZZ"] {
            assert!(
                matches!(VR::parse(code), Err(Error::InvalidVr { .. })),
                "{:?} should not parse",
                code
            );
            assert!(!VR::is_valid(code));
        }
        assert_eq!(VR::from_binary([0xFF, 0x00]), None);
        assert!("UN".parse::<VR>().is_ok());
    }

    #[test]
    fn padding_bytes() {
        for vr in [VR::UI, VR::OB, VR::OD, VR::OF, VR::OL, VR::OV, VR::OW, VR::UN] {
            assert_eq!(vr.padding(), 0x00, "{}", vr);
        }
        for vr in [VR::AE, VR::CS, VR::DA, VR::PN, VR::LO, VR::UT, VR::UR] {
            assert_eq!(vr.padding(), b' ', "{}", vr);
        }
    }

    #[test]
    fn max_chars() {
        assert_eq!(VR::AE.max_chars(), 16);
        assert_eq!(VR::AS.max_chars(), 4);
        assert_eq!(VR::DT.max_chars(), 26);
        assert_eq!(VR::IS.max_chars(), 12);
        assert_eq!(VR::LT.max_chars(), 10240);
        assert_eq!(VR::PN.max_chars(), 64);
        assert_eq!(VR::ST.max_chars(), 1024);
        assert_eq!(VR::TM.max_chars(), 14);
        assert_eq!(VR::UI.max_chars(), 64);
        assert_eq!(VR::UC.max_chars(), 0);
        assert_eq!(VR::UR.max_chars(), 0);
        assert_eq!(VR::UT.max_chars(), 0);
    }

    #[test]
    fn explicit_length_32() {
        let long: Vec<VR> = VR::ALL
            .iter()
            .copied()
            .filter(|vr| vr.explicit_length_32())
            .collect();
        assert_eq!(
            long,
            vec![
                VR::OB,
                VR::OD,
                VR::OF,
                VR::OL,
                VR::OV,
                VR::OW,
                VR::SQ,
                VR::UC,
                VR::UN,
                VR::UR,
                VR::UT
            ]
        );
    }

    #[test]
    fn categories() {
        assert_eq!(VR::ALL.iter().filter(|vr| vr.is_string()).count(), 17);
        assert_eq!(VR::ALL.iter().filter(|vr| vr.is_binary()).count(), 7);
        assert!(!VR::AT.is_numeric());
        assert_eq!(VR::AT.category(), VrCategory::Integer);
        assert!(VR::FD.is_numeric());
        let numeric: Vec<VR> = VR::ALL.iter().copied().filter(|vr| vr.is_numeric()).collect();
        assert_eq!(
            numeric,
            vec![VR::FD, VR::FL, VR::SL, VR::SS, VR::SV, VR::UL, VR::US, VR::UV]
        );
        assert!(!VR::SQ.is_binary());
        assert_eq!(VR::SQ.category(), VrCategory::Sequence);
        assert!(VR::PN.allows_backslash_in_value());
        assert_eq!(
            VR::ALL
                .iter()
                .filter(|vr| vr.allows_backslash_in_value())
                .count(),
            1
        );
        assert_eq!(VR::SV.value_width(), Some(8));
        assert_eq!(VR::LO.value_width(), None);
    }

    #[test]
    fn tag_from_u16_pair() {
        let t = Tag::from((0x0010u16, 0x0020u16));
        assert_eq!(0x0010u16, t.group());
        assert_eq!(0x0020u16, t.element());
    }

    #[test]
    fn tag_u32_conversion() {
        let t = Tag::from(0x0008_0018_u32);
        assert_eq!(t, Tag(0x0008, 0x0018));
        assert_eq!(u32::from(t), 0x0008_0018);
        assert_eq!(t.to_string(), "(0008,0018)");
    }
}
