//! Parsing of temporal values from their DICOM textual form.
//!
//! Each parser trims surrounding whitespace,
//! then follows the grammar of its value representation strictly.
use crate::header::VR;
use crate::value::age::{Age, AgeUnit};
use crate::value::partial::{
    date_from_fields, offset_from_fields, time_from_fields, DicomDate, DicomDateTime, DicomTime,
    EmptyInputSnafu, InvalidFormatSnafu, Result,
};
use chrono::NaiveTime;
use snafu::{ensure, OptionExt};
use std::ops::{Add, Mul};
use tracing::{debug, trace};

/// Date, time and offset components as read from text,
/// before validation.
type DateFields = (u16, Option<u8>, Option<u8>);
type TimeFields = (u8, Option<u8>, Option<u8>, Option<(u32, usize)>);

/** Decode a single DICOM Date (DA) into a `DicomDate` value.
 * Accepts `YYYY`, `YYYYMM`, `YYYYMMDD`,
 * as well as the legacy ACR-NEMA form `YYYY.MM.DD`.
 */
pub fn parse_date(text: &str) -> Result<DicomDate> {
    let vr = VR::DA;
    let input = trim_input(vr, text)?;
    let buf = input.as_bytes();

    if buf.len() == 10 && buf[4] == b'.' && buf[7] == b'.' {
        let year = read_number(&buf[0..4]).context(InvalidFormatSnafu { vr, input })?;
        let month = read_number(&buf[5..7]).context(InvalidFormatSnafu { vr, input })?;
        let day = read_number(&buf[8..10]).context(InvalidFormatSnafu { vr, input })?;
        let (date, precision) = date_from_fields(vr, input, year, Some(month), Some(day))?;
        debug!(input, "accepted legacy dotted date");
        return Ok(DicomDate::from_parts(date, precision, true));
    }

    let (year, month, day) = read_date_fields(vr, input, buf)?;
    let (date, precision) = date_from_fields(vr, input, year, month, day)?;
    Ok(DicomDate::from_parts(date, precision, false))
}

/** Decode a single DICOM Time (TM) into a `DicomTime` value.
 * Accepts `HH`, `HHMM`, `HHMMSS`
 * and `HHMMSS.F` up to `HHMMSS.FFFFFF`.
 */
pub fn parse_time(text: &str) -> Result<DicomTime> {
    let vr = VR::TM;
    let input = trim_input(vr, text)?;
    let (hour, minute, second, fraction) = read_time_fields(vr, input, input)?;
    let (time, precision) = time_from_fields(vr, input, hour, minute, second, fraction)?;
    Ok(DicomTime::from_parts(time, precision))
}

/** Decode a single DICOM DateTime (DT) into a `DicomDateTime` value.
 * Follows `YYYY[MM[DD[HH[MM[SS[.F{1,6}]]]]]][&ZZXX]`,
 * where `&ZZXX` is an optional timezone offset such as `+0100` or `-0500`.
 * Without an offset, the value is anchored to UTC.
 */
pub fn parse_datetime(text: &str) -> Result<DicomDateTime> {
    let vr = VR::DT;
    let input = trim_input(vr, text)?;
    let buf = input.as_bytes();

    let (body, offset) = match buf.len().checked_sub(5) {
        Some(i) if matches!(buf[i], b'+' | b'-') => (&input[..i], Some(&buf[i..])),
        _ => (input, None),
    };

    ensure!(body.is_ascii(), InvalidFormatSnafu { vr, input });
    let main_len = body.find('.').unwrap_or(body.len());
    let (date_buf, time_text) = match main_len {
        4 | 6 | 8 => {
            ensure!(main_len == body.len(), InvalidFormatSnafu { vr, input });
            (body.as_bytes(), None)
        }
        10 | 12 | 14 => (&body.as_bytes()[..8], Some(&body[8..])),
        _ => return InvalidFormatSnafu { vr, input }.fail(),
    };

    let (year, month, day) = read_date_fields(vr, input, date_buf)?;
    let (date, date_precision) = date_from_fields(vr, input, year, month, day)?;

    let (time, precision) = match time_text {
        Some(time_text) => {
            let (hour, minute, second, fraction) = read_time_fields(vr, input, time_text)?;
            time_from_fields(vr, input, hour, minute, second, fraction)?
        }
        None => (NaiveTime::default(), date_precision),
    };

    let offset = match offset {
        Some(tz) => {
            let negative = tz[0] == b'-';
            let hours = read_number(&tz[1..3]).context(InvalidFormatSnafu { vr, input })?;
            let minutes = read_number(&tz[3..5]).context(InvalidFormatSnafu { vr, input })?;
            Some((
                offset_from_fields(vr, input, negative, hours, minutes)?,
                negative,
            ))
        }
        None => None,
    };

    DicomDateTime::from_parts(vr, input, date, time, precision, offset)
}

/** Decode a single DICOM Age String (AS) into an `Age` value.
 * The text must be exactly three digits followed by one of `D`, `W`, `M` or `Y`.
 */
pub fn parse_age(text: &str) -> Result<Age> {
    let vr = VR::AS;
    let input = trim_input(vr, text)?;
    let buf = input.as_bytes();
    ensure!(buf.len() == 4, InvalidFormatSnafu { vr, input });
    let value: u16 = read_number(&buf[0..3]).context(InvalidFormatSnafu { vr, input })?;
    let unit = AgeUnit::from_code(char::from(buf[3])).context(InvalidFormatSnafu { vr, input })?;
    Age::checked(input, value, unit)
}

/// Strip surrounding whitespace, failing if nothing remains.
fn trim_input(vr: VR, text: &str) -> Result<&str> {
    let input = text.trim();
    ensure!(!input.is_empty(), EmptyInputSnafu { vr, input: text });
    if input.len() != text.len() {
        trace!(%vr, text, "trimmed surrounding whitespace");
    }
    Ok(input)
}

fn read_date_fields(vr: VR, input: &str, buf: &[u8]) -> Result<DateFields> {
    ensure!(
        matches!(buf.len(), 4 | 6 | 8),
        InvalidFormatSnafu { vr, input }
    );
    let year = read_number(&buf[0..4]).context(InvalidFormatSnafu { vr, input })?;
    let month = match buf.get(4..6) {
        Some(m) => Some(read_number(m).context(InvalidFormatSnafu { vr, input })?),
        None => None,
    };
    let day = match buf.get(6..8) {
        Some(d) => Some(read_number(d).context(InvalidFormatSnafu { vr, input })?),
        None => None,
    };
    Ok((year, month, day))
}

/// Read `HH[MM[SS[.F{1,6}]]]` from `text`,
/// reporting errors against the whole `input`.
fn read_time_fields(vr: VR, input: &str, text: &str) -> Result<TimeFields> {
    let (main, fraction) = match text.split_once('.') {
        Some((main, fraction)) => (main.as_bytes(), Some(fraction.as_bytes())),
        None => (text.as_bytes(), None),
    };
    ensure!(
        matches!(main.len(), 2 | 4 | 6),
        InvalidFormatSnafu { vr, input }
    );
    let hour = read_number(&main[0..2]).context(InvalidFormatSnafu { vr, input })?;
    let minute = match main.get(2..4) {
        Some(m) => Some(read_number(m).context(InvalidFormatSnafu { vr, input })?),
        None => None,
    };
    let second = match main.get(4..6) {
        Some(s) => Some(read_number(s).context(InvalidFormatSnafu { vr, input })?),
        None => None,
    };
    let fraction = match fraction {
        Some(f) => {
            ensure!(
                main.len() == 6 && (1..=6).contains(&f.len()),
                InvalidFormatSnafu { vr, input }
            );
            let value = read_number(f).context(InvalidFormatSnafu { vr, input })?;
            Some((value, f.len()))
        }
        None => None,
    };
    Ok((hour, minute, second, fraction))
}

/// A trait for a number for which the value 10 is defined.
pub trait Ten {
    /// Retrieve the value ten.
    fn ten() -> Self;
}

macro_rules! impl_integral_ten {
    ($t:ty) => {
        impl Ten for $t {
            fn ten() -> Self {
                10
            }
        }
    };
}

impl_integral_ten!(u8);
impl_integral_ten!(u16);
impl_integral_ten!(u32);

/// Retrieve an integer in text form.
///
/// All bytes in the text must be within the range b'0' and b'9'.
/// The text must also not be empty nor have more than 9 characters.
/// Returns `None` otherwise.
pub fn read_number<T>(text: &[u8]) -> Option<T>
where
    T: Ten,
    T: From<u8>,
    T: Add<T, Output = T>,
    T: Mul<T, Output = T>,
{
    if text.is_empty() || text.len() > 9 || !text.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(read_number_unchecked(text))
}

#[inline]
fn read_number_unchecked<T>(buf: &[u8]) -> T
where
    T: Ten,
    T: From<u8>,
    T: Add<T, Output = T>,
    T: Mul<T, Output = T>,
{
    debug_assert!(!buf.is_empty());
    debug_assert!(buf.len() < 10);
    buf[1..].iter().fold((buf[0] - b'0').into(), |acc, v| {
        acc * T::ten() + (*v - b'0').into()
    })
}
