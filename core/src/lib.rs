#![crate_type = "lib"]
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_import_braces
)]

//! This is a library of typed DICOM values,
//! containing the value representations,
//! the validated value types bound to them,
//! and the partial-precision temporal types of DICOM.
//!
//! The current structure of this crate is as follows:
//!
//! - [`header`] comprises the value representation type
//!   with its table of per-VR properties,
//!   and the DICOM attribute tag type.
//! - [`value`] holds definitions for values of DICOM elements:
//!   character strings, opaque bytes, integers and floating point numbers,
//!   as well as dates, times, date-times and ages.
//! - [`error`] contains crate-level error and result types.
//!
//! [`error`]: ./error/index.html
//! [`header`]: ./header/index.html
//! [`value`]: ./value/index.html

pub mod error;
pub mod header;
pub mod prelude;
pub mod value;

pub use error::{Error, ErrorKind, Result};
pub use header::{Tag, VR};
pub use value::Value as DicomValue;

// re-export crates that are part of the public API
pub use chrono;
pub use smallvec;

/// Construct a DICOM value of the given variant and VR.
///
/// The first argument names the variant:
/// `Str` for character strings, `Bytes` for binary data,
/// `Int` for integers and `Float` for floating point numbers.
/// Evaluates to a `Result<DicomValue>`.
///
/// ```
/// # use dicom_values::{dicom_value, VR};
/// let value = dicom_value!(Str, CS, ["ORIGINAL", "PRIMARY"]).unwrap();
/// assert_eq!(value.vr(), VR::CS);
/// let value = dicom_value!(Int, US, [512, 512]).unwrap();
/// assert_eq!(value.emit(), [0x00, 0x02, 0x00, 0x02]);
/// ```
#[macro_export]
macro_rules! dicom_value {
    (Str, $vr: ident, [ $($elem: expr),* $(,)? ]) => {
        {
            let values: ::std::vec::Vec<::std::string::String> =
                ::std::vec![$(::std::string::String::from($elem),)*];
            $crate::value::CharacterValue::new($crate::VR::$vr, values).map($crate::DicomValue::from)
        }
    };
    (Bytes, $vr: ident, [ $($elem: expr),* $(,)? ]) => {
        {
            let data: ::std::vec::Vec<u8> = ::std::vec![$($elem,)*];
            $crate::value::BinaryValue::new($crate::VR::$vr, data).map($crate::DicomValue::from)
        }
    };
    (Int, $vr: ident, [ $($elem: expr),* $(,)? ]) => {
        $crate::value::IntegerValue::new($crate::VR::$vr, [$(::std::primitive::i64::from($elem),)*])
            .map($crate::DicomValue::from)
    };
    (Float, $vr: ident, [ $($elem: expr),* $(,)? ]) => {
        $crate::value::FloatValue::new($crate::VR::$vr, [$(::std::primitive::f64::from($elem),)*])
            .map($crate::DicomValue::from)
    };
    ($typ: ident, $vr: ident, $elem: expr) => {
        $crate::dicom_value!($typ, $vr, [$elem])
    };
}
