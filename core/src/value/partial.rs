//! Handling of partial precision of Date, Time and DateTime values.
//!
//! DICOM temporal values may omit their trailing components.
//! The types in this module remember which components were given
//! through a [`PrecisionLevel`],
//! so that re-encoding them reproduces exactly the same text.

use crate::header::VR;
use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Timelike, Utc,
};
use snafu::{ensure, Backtrace, OptionExt, Snafu};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// An error raised while parsing or building a temporal value.
///
/// Every variant records the VR and the offending text,
/// after trimming of surrounding whitespace.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The text is empty or only whitespace.
    #[snafu(display("Empty {} value", vr))]
    EmptyInput {
        /// VR of the value
        vr: VR,
        /// the text as given
        input: String,
        /// backtrace at the error site
        backtrace: Backtrace,
    },
    /// The text does not follow the grammar of its VR.
    #[snafu(display("Invalid {} format: `{}`", vr, input))]
    InvalidFormat {
        /// VR of the value
        vr: VR,
        /// the offending text
        input: String,
        /// backtrace at the error site
        backtrace: Backtrace,
    },
    /// A component is outside of its admitted range.
    #[snafu(display(
        "{:?} of {} value `{}` has invalid value {}, must be in {:?}",
        component,
        vr,
        input,
        value,
        range
    ))]
    ComponentRange {
        /// VR of the value
        vr: VR,
        /// the offending text
        input: String,
        /// the component out of range
        component: DateComponent,
        /// the value read
        value: u32,
        /// the admitted range
        range: RangeInclusive<u32>,
        /// backtrace at the error site
        backtrace: Backtrace,
    },
    /// The day does not exist in the given month and year.
    #[snafu(display(
        "Invalid {} value `{}`: day {} does not exist in {:04}-{:02}",
        vr,
        input,
        day,
        year,
        month
    ))]
    InvalidDayForMonth {
        /// VR of the value
        vr: VR,
        /// the offending text
        input: String,
        /// year
        year: u16,
        /// month
        month: u8,
        /// day of the month
        day: u8,
        /// backtrace at the error site
        backtrace: Backtrace,
    },
    /// The timezone offset has out of range hours or minutes.
    #[snafu(display(
        "Invalid timezone offset in {} value `{}`: {:02} hours {:02} minutes",
        vr,
        input,
        hours,
        minutes
    ))]
    InvalidTimezone {
        /// VR of the value
        vr: VR,
        /// the offending text
        input: String,
        /// offset hours as written
        hours: u32,
        /// offset minutes as written
        minutes: u32,
        /// backtrace at the error site
        backtrace: Backtrace,
    },
}

/// Type alias for a result of a temporal operation.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// The value representation of the value being parsed.
    pub fn vr(&self) -> VR {
        match self {
            Error::EmptyInput { vr, .. }
            | Error::InvalidFormat { vr, .. }
            | Error::ComponentRange { vr, .. }
            | Error::InvalidDayForMonth { vr, .. }
            | Error::InvalidTimezone { vr, .. } => *vr,
        }
    }

    /// The offending input text.
    pub fn input(&self) -> &str {
        match self {
            Error::EmptyInput { input, .. }
            | Error::InvalidFormat { input, .. }
            | Error::ComponentRange { input, .. }
            | Error::InvalidDayForMonth { input, .. }
            | Error::InvalidTimezone { input, .. } => input,
        }
    }

    /// Obtain the coarse class of this error.
    pub fn kind(&self) -> crate::error::ErrorKind {
        use crate::error::ErrorKind;
        match self {
            Error::EmptyInput { .. } => ErrorKind::EmptyInput,
            Error::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            Error::ComponentRange { .. } => ErrorKind::RangeExceeded,
            Error::InvalidDayForMonth { .. } => ErrorKind::InvalidDayForMonth,
            Error::InvalidTimezone { .. } => ErrorKind::InvalidTimezone,
        }
    }
}

/**
 * Represents components of Date, Time, DateTime and Age values.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateComponent {
    /// Year
    Year,
    /// Month
    Month,
    /// Day of the month
    Day,
    /// Hour of the day
    Hour,
    /// Minute
    Minute,
    /// Second, leap seconds excluded
    Second,
    /// Fraction of a second, in microseconds
    Fraction,
    /// Hours of a timezone offset
    OffsetHour,
    /// Minutes of a timezone offset
    OffsetMinute,
    /// Numeric part of an age string
    AgeValue,
}

impl DateComponent {
    /// The admitted range of values for this component.
    pub fn range(self) -> RangeInclusive<u32> {
        match self {
            DateComponent::Year => 0..=9_999,
            DateComponent::Month => 1..=12,
            DateComponent::Day => 1..=31,
            DateComponent::Hour => 0..=23,
            DateComponent::Minute => 0..=59,
            DateComponent::Second => 0..=59,
            DateComponent::Fraction => 0..=999_999,
            DateComponent::OffsetHour => 0..=14,
            DateComponent::OffsetMinute => 0..=59,
            DateComponent::AgeValue => 0..=999,
        }
    }
}

/**
 * Throws a detailed `ComponentRange` error if a temporal component is out of range.
 */
pub(crate) fn check_component(
    vr: VR,
    input: &str,
    component: DateComponent,
    value: u32,
) -> Result<()> {
    let range = component.range();
    ensure!(
        range.contains(&value),
        ComponentRangeSnafu {
            vr,
            input,
            component,
            value,
            range,
        }
    );
    Ok(())
}

/// The depth of components present in a temporal value.
///
/// Levels are totally ordered from the coarsest (`Year`)
/// to the finest (`Full`).
/// `MS1` through `MS6` record how many digits
/// of a fraction of a second were written.
/// `Full` is assigned to values built from a complete `chrono` value,
/// and is encoded with six fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrecisionLevel {
    /// `YYYY`
    Year,
    /// `YYYYMM`
    Month,
    /// `YYYYMMDD`
    Day,
    /// `HH`
    Hours,
    /// `HHMM`
    Minutes,
    /// `HHMMSS`
    Seconds,
    /// `HHMMSS.F`
    MS1,
    /// `HHMMSS.FF`
    MS2,
    /// `HHMMSS.FFF`
    MS3,
    /// `HHMMSS.FFFF`
    MS4,
    /// `HHMMSS.FFFFF`
    MS5,
    /// `HHMMSS.FFFFFF`
    MS6,
    /// Built from a complete time, encoded as `HHMMSS.FFFFFF`
    Full,
}

impl PrecisionLevel {
    /// A descriptive name of the precision level.
    pub fn name(self) -> &'static str {
        match self {
            PrecisionLevel::Year => "Year",
            PrecisionLevel::Month => "Month",
            PrecisionLevel::Day => "Day",
            PrecisionLevel::Hours => "Hour",
            PrecisionLevel::Minutes => "Minute",
            PrecisionLevel::Seconds => "Second",
            PrecisionLevel::MS1 => "Decisecond",
            PrecisionLevel::MS2 => "Centisecond",
            PrecisionLevel::MS3 => "Millisecond",
            PrecisionLevel::MS4 => "MS4",
            PrecisionLevel::MS5 => "MS5",
            PrecisionLevel::MS6 => "Microsecond",
            PrecisionLevel::Full => "Full",
        }
    }

    /// The number of fractional second digits encoded at this level,
    /// `0` if the level does not reach into fractions of a second.
    pub fn fraction_digits(self) -> usize {
        match self {
            PrecisionLevel::MS1 => 1,
            PrecisionLevel::MS2 => 2,
            PrecisionLevel::MS3 => 3,
            PrecisionLevel::MS4 => 4,
            PrecisionLevel::MS5 => 5,
            PrecisionLevel::MS6 | PrecisionLevel::Full => 6,
            _ => 0,
        }
    }

    /// The precision level for the given number of fractional digits.
    pub fn from_fraction_digits(digits: usize) -> Option<Self> {
        match digits {
            1 => Some(PrecisionLevel::MS1),
            2 => Some(PrecisionLevel::MS2),
            3 => Some(PrecisionLevel::MS3),
            4 => Some(PrecisionLevel::MS4),
            5 => Some(PrecisionLevel::MS5),
            6 => Some(PrecisionLevel::MS6),
            _ => None,
        }
    }

    /// Whether this level only covers date components.
    pub fn is_date_only(self) -> bool {
        self <= PrecisionLevel::Day
    }
}

impl fmt::Display for PrecisionLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of microseconds covered by one unit of the last fraction digit.
fn fraction_step(digits: usize) -> u32 {
    10u32.pow(6 - digits.min(6) as u32)
}

/// Render microseconds with the given number of fraction digits.
fn fraction_text(micro: u32, digits: usize) -> String {
    format!("{:0width$}", micro / fraction_step(digits), width = digits)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        _ => 31,
    }
}

/// Validate date components and build the date they denote,
/// with absent components defaulting to the first month or day.
pub(crate) fn date_from_fields(
    vr: VR,
    input: &str,
    year: u16,
    month: Option<u8>,
    day: Option<u8>,
) -> Result<(NaiveDate, PrecisionLevel)> {
    check_component(vr, input, DateComponent::Year, year.into())?;
    if let Some(month) = month {
        check_component(vr, input, DateComponent::Month, month.into())?;
    }
    if let Some(day) = day {
        check_component(vr, input, DateComponent::Day, day.into())?;
    }
    let (precision, m, d) = match (month, day) {
        (None, _) => (PrecisionLevel::Year, 1, 1),
        (Some(m), None) => (PrecisionLevel::Month, m, 1),
        (Some(m), Some(d)) => (PrecisionLevel::Day, m, d),
    };
    let date = NaiveDate::from_ymd_opt(year.into(), m.into(), d.into()).context(
        InvalidDayForMonthSnafu {
            vr,
            input,
            year,
            month: m,
            day: d,
        },
    )?;
    Ok((date, precision))
}

/// Validate time components and build the time they denote.
/// The fraction is given as written, along with its number of digits.
pub(crate) fn time_from_fields(
    vr: VR,
    input: &str,
    hour: u8,
    minute: Option<u8>,
    second: Option<u8>,
    fraction: Option<(u32, usize)>,
) -> Result<(NaiveTime, PrecisionLevel)> {
    check_component(vr, input, DateComponent::Hour, hour.into())?;
    if let Some(minute) = minute {
        check_component(vr, input, DateComponent::Minute, minute.into())?;
    }
    if let Some(second) = second {
        check_component(vr, input, DateComponent::Second, second.into())?;
    }
    let (precision, m, s, micro) = match (minute, second, fraction) {
        (None, _, _) => (PrecisionLevel::Hours, 0, 0, 0),
        (Some(m), None, _) => (PrecisionLevel::Minutes, m, 0, 0),
        (Some(m), Some(s), None) => (PrecisionLevel::Seconds, m, s, 0),
        (Some(m), Some(s), Some((value, digits))) => {
            let precision = PrecisionLevel::from_fraction_digits(digits)
                .context(InvalidFormatSnafu { vr, input })?;
            let micro = value.saturating_mul(fraction_step(digits));
            check_component(vr, input, DateComponent::Fraction, micro)?;
            (precision, m, s, micro)
        }
    };
    let time = NaiveTime::from_hms_micro_opt(hour.into(), m.into(), s.into(), micro)
        .context(InvalidFormatSnafu { vr, input })?;
    Ok((time, precision))
}

/// Validate a timezone offset.
/// `negative` holds the sign as written.
pub(crate) fn offset_from_fields(
    vr: VR,
    input: &str,
    negative: bool,
    hours: u32,
    minutes: u32,
) -> Result<FixedOffset> {
    ensure!(
        DateComponent::OffsetHour.range().contains(&hours)
            && DateComponent::OffsetMinute.range().contains(&minutes),
        InvalidTimezoneSnafu {
            vr,
            input,
            hours,
            minutes,
        }
    );
    let seconds = (hours * 3600 + minutes * 60) as i32;
    let seconds = if negative { -seconds } else { seconds };
    FixedOffset::east_opt(seconds).context(InvalidTimezoneSnafu {
        vr,
        input,
        hours,
        minutes,
    })
}

/**
 * Bounds of the span of instants covered by a partial precision value.
 * A DA of month precision covers the whole month,
 * and a TM of minute precision covers sixty seconds.
 * Fractions of a second go no further than microseconds.
 */
pub trait AsTemporalRange<T>
where
    T: PartialEq,
{
    /**
     * The earliest instant covered,
     * with missing components at their lowest admitted value.
     */
    fn earliest(&self) -> T;

    /**
     * The latest instant covered.
     */
    fn latest(&self) -> T;

    /**
     * Both bounds, earliest first.
     */
    fn to_range(&self) -> (T, T) {
        (self.earliest(), self.latest())
    }

    /**
     * Whether the value denotes a single instant.
     */
    fn is_precise(&self) -> bool {
        self.earliest() == self.latest()
    }
}

/// A DICOM date (DA) with partial precision.
///
/// Absent components are filled with the first month or day
/// in the underlying calendar date,
/// but they are not reproduced when encoding.
///
/// ```
/// # use dicom_values::value::DicomDate;
/// let date: DicomDate = "202310".parse().unwrap();
/// assert_eq!(date.dcm(), "202310");
/// assert_eq!(date.to_string(), "2023-10");
/// assert_eq!(date.day(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DicomDate {
    date: NaiveDate,
    precision: PrecisionLevel,
    legacy_dotted: bool,
}

impl DicomDate {
    pub(crate) fn from_parts(date: NaiveDate, precision: PrecisionLevel, legacy_dotted: bool) -> Self {
        DicomDate {
            date,
            precision,
            legacy_dotted,
        }
    }

    /**
     * Constructs a new `DicomDate` with a Year precision
     * (YYYY)
     */
    pub fn from_y(year: u16) -> Result<DicomDate> {
        let input = format!("{:04}", year);
        let (date, precision) = date_from_fields(VR::DA, &input, year, None, None)?;
        Ok(DicomDate::from_parts(date, precision, false))
    }

    /**
     * Constructs a new `DicomDate` with a Year and Month precision
     * (YYYYMM)
     */
    pub fn from_ym(year: u16, month: u8) -> Result<DicomDate> {
        let input = format!("{:04}{:02}", year, month);
        let (date, precision) = date_from_fields(VR::DA, &input, year, Some(month), None)?;
        Ok(DicomDate::from_parts(date, precision, false))
    }

    /**
     * Constructs a new `DicomDate` with a Year, Month and Day precision
     * (YYYYMMDD)
     */
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<DicomDate> {
        let input = format!("{:04}{:02}{:02}", year, month, day);
        let (date, precision) = date_from_fields(VR::DA, &input, year, Some(month), Some(day))?;
        Ok(DicomDate::from_parts(date, precision, false))
    }

    /// Constructs a new `DicomDate` with Day precision from a calendar date.
    /// Fails if the year is outside of 0..=9999.
    pub fn from_naive(date: NaiveDate) -> Result<DicomDate> {
        let input = date.to_string();
        let year = u32::try_from(date.year()).unwrap_or(u32::MAX);
        check_component(VR::DA, &input, DateComponent::Year, year)?;
        Ok(DicomDate::from_parts(date, PrecisionLevel::Day, false))
    }

    /// The year.
    pub fn year(&self) -> u16 {
        self.date.year() as u16
    }

    /// The month, `1` if absent.
    pub fn month(&self) -> u8 {
        self.date.month() as u8
    }

    /// The day of the month, `1` if absent.
    pub fn day(&self) -> u8 {
        self.date.day() as u8
    }

    /// The precision of this date: `Year`, `Month` or `Day`.
    pub fn precision(&self) -> PrecisionLevel {
        self.precision
    }

    /// Whether the date was written in the legacy `YYYY.MM.DD` form.
    pub fn is_legacy_dotted(&self) -> bool {
        self.legacy_dotted
    }

    /// The calendar date, with absent components filled in.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The instant at midnight UTC of this date.
    pub fn to_utc_midnight(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.date.and_time(NaiveTime::default()))
    }

    /// Encode this date in its DICOM textual form,
    /// reproducing exactly the components given.
    pub fn dcm(&self) -> String {
        if self.legacy_dotted {
            return format!(
                "{:04}.{:02}.{:02}",
                self.year(),
                self.month(),
                self.day()
            );
        }
        match self.precision {
            PrecisionLevel::Year => format!("{:04}", self.year()),
            PrecisionLevel::Month => format!("{:04}{:02}", self.year(), self.month()),
            _ => format!("{:04}{:02}{:02}", self.year(), self.month(), self.day()),
        }
    }
}

impl AsTemporalRange<NaiveDate> for DicomDate {
    fn earliest(&self) -> NaiveDate {
        self.date
    }

    fn latest(&self) -> NaiveDate {
        let (y, m, d) = match self.precision {
            PrecisionLevel::Year => (self.date.year(), 12, 31),
            PrecisionLevel::Month => {
                let y = self.date.year();
                let m = self.date.month();
                (y, m, days_in_month(y, m))
            }
            _ => return self.date,
        };
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or(self.date)
    }
}

impl fmt::Display for DicomDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.precision {
            PrecisionLevel::Year => write!(f, "{:04}", self.year()),
            PrecisionLevel::Month => write!(f, "{:04}-{:02}", self.year(), self.month()),
            _ => write!(
                f,
                "{:04}-{:02}-{:02}",
                self.year(),
                self.month(),
                self.day()
            ),
        }
    }
}

impl FromStr for DicomDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::value::deserialize::parse_date(s)
    }
}

/// A DICOM time (TM) with partial precision.
///
/// ```
/// # use dicom_values::value::{DicomTime, PrecisionLevel};
/// let time: DicomTime = "143025.120".parse().unwrap();
/// assert_eq!(time.precision(), PrecisionLevel::MS3);
/// assert_eq!(time.microsecond(), 120_000);
/// assert_eq!(time.dcm(), "143025.120");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DicomTime {
    time: NaiveTime,
    precision: PrecisionLevel,
}

impl DicomTime {
    pub(crate) fn from_parts(time: NaiveTime, precision: PrecisionLevel) -> Self {
        DicomTime { time, precision }
    }

    /**
     * Constructs a new `DicomTime` with an Hour precision
     * (HH)
     */
    pub fn from_h(hour: u8) -> Result<DicomTime> {
        let input = format!("{:02}", hour);
        let (time, precision) = time_from_fields(VR::TM, &input, hour, None, None, None)?;
        Ok(DicomTime::from_parts(time, precision))
    }

    /**
     * Constructs a new `DicomTime` with an Hour and Minute precision
     * (HHMM)
     */
    pub fn from_hm(hour: u8, minute: u8) -> Result<DicomTime> {
        let input = format!("{:02}{:02}", hour, minute);
        let (time, precision) = time_from_fields(VR::TM, &input, hour, Some(minute), None, None)?;
        Ok(DicomTime::from_parts(time, precision))
    }

    /**
     * Constructs a new `DicomTime` with an Hour, Minute and Second precision
     * (HHMMSS)
     */
    pub fn from_hms(hour: u8, minute: u8, second: u8) -> Result<DicomTime> {
        let input = format!("{:02}{:02}{:02}", hour, minute, second);
        let (time, precision) =
            time_from_fields(VR::TM, &input, hour, Some(minute), Some(second), None)?;
        Ok(DicomTime::from_parts(time, precision))
    }

    /**
     * Constructs a new `DicomTime` with a fraction of a second
     * written with the given number of digits (1 to 6)
     * (HHMMSS.F to HHMMSS.FFFFFF)
     */
    pub fn from_hms_fraction(
        hour: u8,
        minute: u8,
        second: u8,
        fraction: u32,
        digits: usize,
    ) -> Result<DicomTime> {
        ensure!(
            PrecisionLevel::from_fraction_digits(digits).is_some(),
            InvalidFormatSnafu {
                vr: VR::TM,
                input: format!("{:02}{:02}{:02}.{}", hour, minute, second, fraction),
            }
        );
        let input = format!(
            "{:02}{:02}{:02}.{:0width$}",
            hour,
            minute,
            second,
            fraction,
            width = digits
        );
        let (time, precision) = time_from_fields(
            VR::TM,
            &input,
            hour,
            Some(minute),
            Some(second),
            Some((fraction, digits)),
        )?;
        Ok(DicomTime::from_parts(time, precision))
    }

    /**
     * Constructs a new `DicomTime` with microsecond precision
     * (HHMMSS.FFFFFF)
     */
    pub fn from_hms_micro(hour: u8, minute: u8, second: u8, micro: u32) -> Result<DicomTime> {
        DicomTime::from_hms_fraction(hour, minute, second, micro, 6)
    }

    /// Constructs a new `DicomTime` with `Full` precision from a time of day.
    /// Sub-microsecond parts are truncated.
    pub fn from_naive(time: NaiveTime) -> DicomTime {
        DicomTime::from_parts(truncate_to_micro(time), PrecisionLevel::Full)
    }

    /// The hour.
    pub fn hour(&self) -> u8 {
        self.time.hour() as u8
    }

    /// The minute, `0` if absent.
    pub fn minute(&self) -> u8 {
        self.time.minute() as u8
    }

    /// The second, `0` if absent.
    pub fn second(&self) -> u8 {
        self.time.second() as u8
    }

    /// The fraction of a second in microseconds,
    /// regardless of how many digits were written.
    pub fn microsecond(&self) -> u32 {
        self.time.nanosecond() / 1_000
    }

    /// The precision of this time: from `Hours` up to `MS6`, or `Full`.
    pub fn precision(&self) -> PrecisionLevel {
        self.precision
    }

    /// The time of day, with absent components set to zero.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Encode this time in its DICOM textual form,
    /// reproducing exactly the components given.
    pub fn dcm(&self) -> String {
        let mut out = format!("{:02}", self.hour());
        if self.precision >= PrecisionLevel::Minutes {
            out.push_str(&format!("{:02}", self.minute()));
        }
        if self.precision >= PrecisionLevel::Seconds {
            out.push_str(&format!("{:02}", self.second()));
        }
        let digits = self.precision.fraction_digits();
        if digits > 0 {
            out.push('.');
            out.push_str(&fraction_text(self.microsecond(), digits));
        }
        out
    }
}

fn truncate_to_micro(time: NaiveTime) -> NaiveTime {
    let micro = (time.nanosecond() / 1_000).min(999_999);
    NaiveTime::from_hms_micro_opt(time.hour(), time.minute(), time.second(), micro)
        .unwrap_or(time)
}

fn time_bounds(time: NaiveTime, precision: PrecisionLevel) -> (NaiveTime, NaiveTime) {
    let (h, m, s, micro) = (time.hour(), time.minute(), time.second(), time.nanosecond() / 1_000);
    let (m_hi, s_hi, micro_hi) = match precision {
        PrecisionLevel::Hours => (59, 59, 999_999),
        PrecisionLevel::Minutes => (m, 59, 999_999),
        PrecisionLevel::Seconds => (m, s, 999_999),
        p => {
            let step = fraction_step(p.fraction_digits());
            (m, s, micro - micro % step + step - 1)
        }
    };
    let latest = NaiveTime::from_hms_micro_opt(h, m_hi, s_hi, micro_hi).unwrap_or(time);
    (time, latest)
}

impl AsTemporalRange<NaiveTime> for DicomTime {
    fn earliest(&self) -> NaiveTime {
        self.time
    }

    fn latest(&self) -> NaiveTime {
        time_bounds(self.time, self.precision).1
    }
}

impl fmt::Display for DicomTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}", self.hour())?;
        if self.precision >= PrecisionLevel::Minutes {
            write!(f, ":{:02}", self.minute())?;
        }
        if self.precision >= PrecisionLevel::Seconds {
            write!(f, ":{:02}", self.second())?;
        }
        let digits = self.precision.fraction_digits();
        if digits > 0 {
            write!(f, ".{}", fraction_text(self.microsecond(), digits))?;
        }
        Ok(())
    }
}

impl FromStr for DicomTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::value::deserialize::parse_time(s)
    }
}

/// A DICOM date-time (DT) with partial precision and optional timezone offset.
///
/// When no offset was written, the value is anchored to UTC
/// and [`has_offset`](DicomDateTime::has_offset) is false.
/// An explicit `+0000` or `-0000` offset is remembered as written.
///
/// ```
/// # use dicom_values::value::DicomDateTime;
/// let dt: DicomDateTime = "20231015143025+1000".parse().unwrap();
/// assert!(dt.has_offset());
/// assert_eq!(dt.to_string(), "2023-10-15 14:30:25 +1000");
/// assert_eq!(dt.dcm(), "20231015143025+1000");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DicomDateTime {
    datetime: DateTime<FixedOffset>,
    precision: PrecisionLevel,
    no_offset: bool,
    negative_zero_offset: bool,
}

impl DicomDateTime {
    /// Combine validated parts into a date-time.
    /// `offset` holds the offset and whether it was written with a minus sign.
    pub(crate) fn from_parts(
        vr: VR,
        input: &str,
        date: NaiveDate,
        time: NaiveTime,
        precision: PrecisionLevel,
        offset: Option<(FixedOffset, bool)>,
    ) -> Result<Self> {
        let (fixed, negative) = match offset {
            Some((fixed, negative)) => (fixed, negative),
            None => (utc_offset(), false),
        };
        let datetime = fixed
            .from_local_datetime(&date.and_time(time))
            .single()
            .context(InvalidFormatSnafu { vr, input })?;
        Ok(DicomDateTime {
            datetime,
            precision,
            no_offset: offset.is_none(),
            negative_zero_offset: negative && fixed.local_minus_utc() == 0,
        })
    }

    /// Constructs a date-time covering only the given date,
    /// with the date's precision and no timezone offset.
    pub fn from_date(date: DicomDate) -> DicomDateTime {
        DicomDateTime {
            datetime: date.to_utc_midnight().with_timezone(&utc_offset()),
            precision: date.precision(),
            no_offset: true,
            negative_zero_offset: false,
        }
    }

    /// Constructs a date-time from a complete date and a time.
    ///
    /// Fails if the date does not have day precision,
    /// since the time components cannot follow a partial date.
    pub fn from_date_and_time(
        date: DicomDate,
        time: DicomTime,
        offset: Option<FixedOffset>,
    ) -> Result<DicomDateTime> {
        let input = format!(
            "{}{}{}",
            date.dcm(),
            time.dcm(),
            offset.map(|o| offset_text(o, false)).unwrap_or_default()
        );
        ensure!(
            date.precision() == PrecisionLevel::Day && !date.is_legacy_dotted(),
            InvalidFormatSnafu {
                vr: VR::DT,
                input: &input,
            }
        );
        DicomDateTime::from_parts(
            VR::DT,
            &input,
            date.date(),
            time.time(),
            time.precision(),
            offset.map(|o| (o, false)),
        )
    }

    /// Constructs a date-time with `Full` precision
    /// from a complete date-time with offset.
    /// Sub-microsecond parts are truncated.
    pub fn from_datetime(datetime: DateTime<FixedOffset>) -> DicomDateTime {
        let naive = datetime.naive_local();
        let naive = naive.date().and_time(truncate_to_micro(naive.time()));
        let datetime = datetime
            .offset()
            .from_local_datetime(&naive)
            .single()
            .unwrap_or(datetime);
        DicomDateTime {
            datetime,
            precision: PrecisionLevel::Full,
            no_offset: false,
            negative_zero_offset: false,
        }
    }

    /// The precision of this date-time.
    pub fn precision(&self) -> PrecisionLevel {
        self.precision
    }

    /// Whether a timezone offset was written.
    pub fn has_offset(&self) -> bool {
        !self.no_offset
    }

    /// The timezone offset, UTC if none was written.
    pub fn offset(&self) -> FixedOffset {
        *self.datetime.offset()
    }

    /// The date part, at no more than day precision.
    pub fn date(&self) -> DicomDate {
        DicomDate::from_parts(
            self.datetime.date_naive(),
            self.precision.min(PrecisionLevel::Day),
            false,
        )
    }

    /// The time part, if any time components were given.
    pub fn time(&self) -> Option<DicomTime> {
        if self.precision.is_date_only() {
            None
        } else {
            Some(DicomTime::from_parts(self.datetime.time(), self.precision))
        }
    }

    /// The instant denoted, with absent components filled in
    /// and the offset as written (UTC if none).
    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.datetime
    }

    /// The instant denoted, in UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        self.datetime.with_timezone(&Utc)
    }

    /// Encode this date-time in its DICOM textual form,
    /// reproducing exactly the components and offset given.
    pub fn dcm(&self) -> String {
        let date = self.date();
        let mut out = date.dcm();
        if let Some(time) = self.time() {
            out.push_str(&time.dcm());
        }
        if !self.no_offset {
            out.push_str(&offset_text(self.offset(), self.negative_zero_offset));
        }
        out
    }
}

// `DateTime` equality only compares instants,
// so the local reading and offset are compared separately
impl PartialEq for DicomDateTime {
    fn eq(&self, other: &Self) -> bool {
        self.datetime.naive_local() == other.datetime.naive_local()
            && self.offset() == other.offset()
            && self.precision == other.precision
            && self.no_offset == other.no_offset
            && self.negative_zero_offset == other.negative_zero_offset
    }
}

impl Eq for DicomDateTime {}

impl Hash for DicomDateTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.datetime.naive_local().hash(state);
        self.offset().local_minus_utc().hash(state);
        self.precision.hash(state);
        self.no_offset.hash(state);
        self.negative_zero_offset.hash(state);
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

fn offset_text(offset: FixedOffset, negative_zero: bool) -> String {
    let seconds = offset.local_minus_utc();
    let sign = if seconds < 0 || negative_zero { '-' } else { '+' };
    let seconds = seconds.unsigned_abs();
    format!("{}{:02}{:02}", sign, seconds / 3600, (seconds % 3600) / 60)
}

impl AsTemporalRange<DateTime<FixedOffset>> for DicomDateTime {
    fn earliest(&self) -> DateTime<FixedOffset> {
        self.datetime
    }

    fn latest(&self) -> DateTime<FixedOffset> {
        let date = self.date().latest();
        let time = match self.time() {
            Some(time) => time.latest(),
            None => NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap_or_default(),
        };
        self.offset()
            .from_local_datetime(&date.and_time(time))
            .single()
            .unwrap_or(self.datetime)
    }
}

impl fmt::Display for DicomDateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.date())?;
        if let Some(time) = self.time() {
            write!(f, " {}", time)?;
        }
        if self.no_offset {
            f.write_str(" UTC")
        } else {
            write!(
                f,
                " {}",
                offset_text(self.offset(), self.negative_zero_offset)
            )
        }
    }
}

impl FromStr for DicomDateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::value::deserialize::parse_datetime(s)
    }
}
