//! This module includes the value types of DICOM data elements,
//! along with the temporal types which some character values convert into.
//!
//! A value is one of four variants,
//! each admitting a fixed set of value representations:
//!
//! - [`CharacterValue`] for the character string VRs;
//! - [`BinaryValue`] for opaque binary data;
//! - [`IntegerValue`] for binary integers and attribute tags;
//! - [`FloatValue`] for binary floating point numbers.
//!
//! [`Value`] is the closed sum of all four.
//! Values are validated on construction and immutable afterwards.

use crate::header::VR;
use smallvec::SmallVec;
use std::fmt;
use std::io::{self, Write};

pub mod age;
pub mod binary;
pub mod character;
pub mod deserialize;
pub mod float;
pub mod integer;
pub mod partial;
pub mod serialize;

pub use self::age::{Age, AgeUnit};
pub use self::binary::BinaryValue;
pub use self::character::CharacterValue;
pub use self::float::FloatValue;
pub use self::integer::IntegerValue;
pub use self::partial::{AsTemporalRange, DicomDate, DicomDateTime, DicomTime, PrecisionLevel};

/// An aggregation of one or more elements in a value.
pub type C<T> = SmallVec<[T; 2]>;

/// A DICOM value of any variant.
///
/// Two values are equal only if they are of the same variant,
/// with the same VR and the same contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Character strings
    Character(CharacterValue),
    /// Opaque bytes
    Binary(BinaryValue),
    /// Binary integers
    Integer(IntegerValue),
    /// Binary floating point numbers
    Float(FloatValue),
}

impl Value {
    /// The value representation of this value.
    pub fn vr(&self) -> VR {
        match self {
            Value::Character(v) => v.vr(),
            Value::Binary(v) => v.vr(),
            Value::Integer(v) => v.vr(),
            Value::Float(v) => v.vr(),
        }
    }

    /// Encode this value,
    /// without the tag, VR or length of a data element.
    pub fn emit(&self) -> Vec<u8> {
        match self {
            Value::Character(v) => v.emit(),
            Value::Binary(v) => v.emit(),
            Value::Integer(v) => v.emit(),
            Value::Float(v) => v.emit(),
        }
    }

    /// Write the encoded value, returning the number of bytes written.
    pub fn write_to<W: Write>(&self, to: W) -> io::Result<usize> {
        match self {
            Value::Character(v) => v.write_to(to),
            Value::Binary(v) => v.write_to(to),
            Value::Integer(v) => v.write_to(to),
            Value::Float(v) => v.write_to(to),
        }
    }

    /// Get the character value, if this is one.
    pub fn character(&self) -> Option<&CharacterValue> {
        match self {
            Value::Character(v) => Some(v),
            _ => None,
        }
    }

    /// Get the binary value, if this is one.
    pub fn binary(&self) -> Option<&BinaryValue> {
        match self {
            Value::Binary(v) => Some(v),
            _ => None,
        }
    }

    /// Get the integer value, if this is one.
    pub fn integer(&self) -> Option<&IntegerValue> {
        match self {
            Value::Integer(v) => Some(v),
            _ => None,
        }
    }

    /// Get the floating point value, if this is one.
    pub fn float(&self) -> Option<&FloatValue> {
        match self {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Character(v) => fmt::Display::fmt(v, f),
            Value::Binary(v) => fmt::Display::fmt(v, f),
            Value::Integer(v) => fmt::Display::fmt(v, f),
            Value::Float(v) => fmt::Display::fmt(v, f),
        }
    }
}

impl From<CharacterValue> for Value {
    fn from(value: CharacterValue) -> Self {
        Value::Character(value)
    }
}

impl From<BinaryValue> for Value {
    fn from(value: BinaryValue) -> Self {
        Value::Binary(value)
    }
}

impl From<IntegerValue> for Value {
    fn from(value: IntegerValue) -> Self {
        Value::Integer(value)
    }
}

impl From<FloatValue> for Value {
    fn from(value: FloatValue) -> Self {
        Value::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_dispatch() {
        let value: Value = IntegerValue::new(VR::US, [1, 2]).unwrap().into();
        assert_eq!(value.vr(), VR::US);
        assert_eq!(value.emit(), vec![1, 0, 2, 0]);
        assert_eq!(value.to_string(), "1\\2");
        assert!(value.integer().is_some());
        assert!(value.character().is_none());

        let value: Value = CharacterValue::single(VR::UI, "1.2.3").unwrap().into();
        let mut out = Vec::new();
        assert_eq!(value.write_to(&mut out).unwrap(), 6);
        assert_eq!(out, b"1.2.3\0");
        assert_eq!(value.to_string(), "1.2.3");
    }

    #[test]
    fn variants_are_never_equal() {
        let binary: Value = BinaryValue::new(VR::OB, Vec::new()).unwrap().into();
        let chars: Value = CharacterValue::new(VR::LO, Vec::<String>::new())
            .unwrap()
            .into();
        let floats: Value = FloatValue::new(VR::FD, []).unwrap().into();
        assert_ne!(binary, chars);
        assert_ne!(chars, floats);
        assert_eq!(binary.binary().map(|b| b.len()), Some(0));
        assert_eq!(floats.float().map(|f| f.multiplicity()), Some(0));
    }
}
