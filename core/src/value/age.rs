//! Age strings (AS).
use crate::header::VR;
use crate::value::partial::{check_component, DateComponent, Error, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const SECONDS_PER_DAY: u64 = 86_400;

/// The unit of an age string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeUnit {
    /// `D`
    Days,
    /// `W`
    Weeks,
    /// `M`
    Months,
    /// `Y`
    Years,
}

impl AgeUnit {
    /// The single character code of this unit.
    pub fn code(self) -> char {
        match self {
            AgeUnit::Days => 'D',
            AgeUnit::Weeks => 'W',
            AgeUnit::Months => 'M',
            AgeUnit::Years => 'Y',
        }
    }

    /// The unit name in plural form, such as `"weeks"`.
    pub fn long_name(self) -> &'static str {
        match self {
            AgeUnit::Days => "days",
            AgeUnit::Weeks => "weeks",
            AgeUnit::Months => "months",
            AgeUnit::Years => "years",
        }
    }

    /// Obtain the unit from its code. Only upper case codes are recognized.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'D' => Some(AgeUnit::Days),
            'W' => Some(AgeUnit::Weeks),
            'M' => Some(AgeUnit::Months),
            'Y' => Some(AgeUnit::Years),
            _ => None,
        }
    }

    /// Length of the unit in seconds.
    /// A month is 30.4375 days and a year is 365.25 days.
    pub fn seconds(self) -> u64 {
        match self {
            AgeUnit::Days => SECONDS_PER_DAY,
            AgeUnit::Weeks => 7 * SECONDS_PER_DAY,
            AgeUnit::Months => 2_629_800,
            AgeUnit::Years => 31_557_600,
        }
    }
}

impl fmt::Display for AgeUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A DICOM age, such as `042Y` for 42 years.
///
/// ```
/// # use dicom_values::value::{Age, AgeUnit};
/// let age: Age = "042Y".parse().unwrap();
/// assert_eq!(age.unit(), AgeUnit::Years);
/// assert_eq!(age.to_string(), "42 years");
/// assert_eq!(age.duration().as_secs(), 42 * 31_557_600);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Age {
    value: u16,
    unit: AgeUnit,
}

impl Age {
    /// Create a new age, which must be at most 999 units.
    pub fn new(value: u16, unit: AgeUnit) -> Result<Age> {
        let input = format!("{:03}{}", value, unit.code());
        Age::checked(&input, value, unit)
    }

    pub(crate) fn checked(input: &str, value: u16, unit: AgeUnit) -> Result<Age> {
        check_component(VR::AS, input, DateComponent::AgeValue, value.into())?;
        Ok(Age { value, unit })
    }

    /// The number of units.
    pub fn value(&self) -> u16 {
        self.value
    }

    /// The unit of this age.
    pub fn unit(&self) -> AgeUnit {
        self.unit
    }

    /// The absolute duration of this age.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.value) * self.unit.seconds())
    }

    /// Encode this age in its DICOM textual form.
    pub fn dcm(&self) -> String {
        format!("{:03}{}", self.value, self.unit.code())
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = self.unit.long_name();
        if self.value == 1 {
            write!(f, "1 {}", name.trim_end_matches('s'))
        } else {
            write!(f, "{} {}", self.value, name)
        }
    }
}

impl FromStr for Age {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::value::deserialize::parse_age(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn age_bounds() {
        assert!(Age::new(0, AgeUnit::Days).is_ok());
        assert!(Age::new(999, AgeUnit::Years).is_ok());
        assert!(matches!(
            Age::new(1000, AgeUnit::Years),
            Err(Error::ComponentRange {
                component: DateComponent::AgeValue,
                value: 1000,
                ..
            })
        ));
    }

    #[rstest]
    #[case(7, AgeUnit::Days, "7 days")]
    #[case(1, AgeUnit::Days, "1 day")]
    #[case(1, AgeUnit::Weeks, "1 week")]
    #[case(42, AgeUnit::Years, "42 years")]
    #[case(0, AgeUnit::Months, "0 months")]
    fn age_display(#[case] value: u16, #[case] unit: AgeUnit, #[case] expected: &str) {
        assert_eq!(Age::new(value, unit).unwrap().to_string(), expected);
    }

    #[rstest]
    #[case("000D", 0)]
    #[case("001D", 86_400)]
    #[case("002W", 2 * 7 * 86_400)]
    #[case("001M", 2_629_800)]
    #[case("042Y", 42 * 31_557_600)]
    fn age_duration(#[case] text: &str, #[case] seconds: u64) {
        let age: Age = text.parse().unwrap();
        assert_eq!(age.duration(), Duration::from_secs(seconds));
        assert_eq!(age.dcm(), text);
    }

    #[test]
    fn unit_codes() {
        for unit in [AgeUnit::Days, AgeUnit::Weeks, AgeUnit::Months, AgeUnit::Years] {
            assert_eq!(AgeUnit::from_code(unit.code()), Some(unit));
        }
        assert_eq!(AgeUnit::from_code('d'), None);
        assert_eq!(AgeUnit::Weeks.long_name(), "weeks");
    }
}
