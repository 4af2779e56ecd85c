//! Prelude module.
//!
//! You may import all symbols within for convenient usage of this library.
//!
//! # Example
//!
//! ```
//! use dicom_values::prelude::*;
//!
//! let date = DicomValue::from(CharacterValue::single(VR::DA, "20231015").unwrap());
//! assert_eq!(date.character().unwrap().as_date().unwrap().to_string(), "2023-10-15");
//! ```

pub use crate::value::{
    Age, AgeUnit, AsTemporalRange as _, BinaryValue, CharacterValue, DicomDate, DicomDateTime,
    DicomTime, FloatValue, IntegerValue, PrecisionLevel,
};
pub use crate::{dicom_value, DicomValue, Tag, VR};
