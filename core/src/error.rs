//! Crate-level error types.
//!
//! Temporal parsing failures have their own error type
//! in [`value::partial`](crate::value::partial),
//! which is wrapped here when it surfaces through a value operation.
use crate::header::VR;
use crate::value::partial;
use snafu::{Backtrace, Snafu};

/// The main data type for errors in the library.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The text is not one of the known two-character VR codes.
    #[snafu(display("Invalid value representation `{}`", code))]
    InvalidVr {
        /// the text given
        code: String,
        /// backtrace at the error site
        backtrace: Backtrace,
    },
    /// A value was constructed with a VR outside of the variant's admitted set.
    #[snafu(display("VR {} is not valid for {} values", vr, expected))]
    VrMismatch {
        /// the VR given
        vr: VR,
        /// what the operation admits
        expected: &'static str,
        /// backtrace at the error site
        backtrace: Backtrace,
    },
    /// A string value is longer than its VR admits.
    #[snafu(display(
        "Value `{}` of length {} exceeds maximum length {} for VR {}",
        value,
        length,
        max,
        vr
    ))]
    LengthExceeded {
        /// VR of the value
        vr: VR,
        /// the offending string
        value: String,
        /// its length in characters
        length: usize,
        /// the maximum length of the VR
        max: usize,
        /// backtrace at the error site
        backtrace: Backtrace,
    },
    /// An integer does not fit the range of its VR.
    #[snafu(display("Value {} out of range [{}, {}] for VR {}", value, min, max, vr))]
    RangeExceeded {
        /// VR of the value
        vr: VR,
        /// the offending number
        value: i64,
        /// lowest admitted number
        min: i64,
        /// highest admitted number
        max: i64,
        /// backtrace at the error site
        backtrace: Backtrace,
    },
    /// A temporal conversion was requested on a value with no entries.
    #[snafu(display("No value to convert for VR {}", vr))]
    EmptyValue {
        /// VR of the value
        vr: VR,
        /// backtrace at the error site
        backtrace: Backtrace,
    },
    /// A temporal conversion was requested on a value with more than one entry.
    #[snafu(display(
        "Cannot convert multi-valued {} element ({} values) to a single temporal value",
        vr,
        count
    ))]
    MultiValuedTemporal {
        /// VR of the value
        vr: VR,
        /// number of entries present
        count: usize,
        /// backtrace at the error site
        backtrace: Backtrace,
    },
    /// The text of a temporal value could not be parsed.
    #[snafu(context(false), display("Could not parse temporal value"))]
    Temporal {
        /// the parsing error
        #[snafu(backtrace)]
        source: partial::Error,
    },
}

/// Type alias for a result from this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The coarse class of an error,
/// for callers which dispatch on the failure without inspecting its fields.
///
/// Temporal parsing errors are flattened into their own kinds,
/// so that a caller does not need to match on the wrapped source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown VR code.
    InvalidVr,
    /// Value variant or VR not suitable for the operation.
    VrMismatch,
    /// Character value longer than its VR admits.
    LengthExceeded,
    /// Integer or temporal component out of range.
    RangeExceeded,
    /// Temporal text does not follow its grammar.
    InvalidFormat,
    /// Day does not exist in the given month.
    InvalidDayForMonth,
    /// Timezone offset out of range.
    InvalidTimezone,
    /// Temporal text is empty or only whitespace.
    EmptyInput,
    /// Temporal conversion of a value with no entries.
    EmptyValue,
    /// Temporal conversion of a value with several entries.
    MultiValuedTemporal,
}

impl Error {
    /// Obtain the coarse class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidVr { .. } => ErrorKind::InvalidVr,
            Error::VrMismatch { .. } => ErrorKind::VrMismatch,
            Error::LengthExceeded { .. } => ErrorKind::LengthExceeded,
            Error::RangeExceeded { .. } => ErrorKind::RangeExceeded,
            Error::EmptyValue { .. } => ErrorKind::EmptyValue,
            Error::MultiValuedTemporal { .. } => ErrorKind::MultiValuedTemporal,
            Error::Temporal { source } => source.kind(),
        }
    }

    /// The VR involved in the error, if any.
    pub fn vr(&self) -> Option<VR> {
        match self {
            Error::InvalidVr { .. } => None,
            Error::VrMismatch { vr, .. }
            | Error::LengthExceeded { vr, .. }
            | Error::RangeExceeded { vr, .. }
            | Error::EmptyValue { vr, .. }
            | Error::MultiValuedTemporal { vr, .. } => Some(*vr),
            Error::Temporal { source } => Some(source.vr()),
        }
    }
}
