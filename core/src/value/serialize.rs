//! Encoding of temporal values into their DICOM textual form.
//!
//! Each function writes the text and returns the number of bytes written.
//! No padding is applied.
use crate::value::{Age, DicomDate, DicomDateTime, DicomTime};
use std::io::{Result as IoResult, Write};

fn encode_text<W>(mut to: W, text: &str) -> IoResult<usize>
where
    W: Write,
{
    to.write_all(text.as_bytes())?;
    Ok(text.len())
}

/** Encode a single date in accordance to the DICOM Date (DA)
 * value representation.
 */
pub fn encode_date<W>(to: W, date: &DicomDate) -> IoResult<usize>
where
    W: Write,
{
    // YYYY(MM(DD)?)? or YYYY.MM.DD
    encode_text(to, &date.dcm())
}

/** Encode a single time value in accordance to the DICOM Time (TM)
 * value representation.
 */
pub fn encode_time<W>(to: W, time: &DicomTime) -> IoResult<usize>
where
    W: Write,
{
    // HH(MM(SS(.F{1,6})?)?)?
    encode_text(to, &time.dcm())
}

/** Encode a single date-time value in accordance to the DICOM DateTime (DT)
 * value representation.
 */
pub fn encode_datetime<W>(to: W, dt: &DicomDateTime) -> IoResult<usize>
where
    W: Write,
{
    encode_text(to, &dt.dcm())
}

/** Encode a single age in accordance to the DICOM Age String (AS)
 * value representation.
 */
pub fn encode_age<W>(to: W, age: &Age) -> IoResult<usize>
where
    W: Write,
{
    encode_text(to, &age.dcm())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::value::AgeUnit;
    use chrono::FixedOffset;

    #[test]
    fn test_encode_date() {
        let mut data = vec![];
        let len = encode_date(&mut data, &DicomDate::from_ym(1985, 12).unwrap()).unwrap();
        assert_eq!(&data, &*b"198512");
        assert_eq!(len, 6);
    }

    #[test]
    fn test_encode_time() {
        let mut data = vec![];
        encode_time(
            &mut data,
            &DicomTime::from_hms_micro(23, 59, 48, 123456).unwrap(),
        )
        .unwrap();
        assert_eq!(&data, &*b"235948.123456");

        let mut data = vec![];
        encode_time(&mut data, &DicomTime::from_hms(12, 0, 30).unwrap()).unwrap();
        assert_eq!(&data, &*b"120030");

        let mut data = vec![];
        encode_time(&mut data, &DicomTime::from_h(9).unwrap()).unwrap();
        assert_eq!(&data, &*b"09");
    }

    #[test]
    fn test_encode_datetime() {
        let mut data = vec![];
        let dt = DicomDateTime::from_date_and_time(
            DicomDate::from_ymd(1985, 12, 31).unwrap(),
            DicomTime::from_hms_micro(23, 59, 48, 123_456).unwrap(),
            FixedOffset::east_opt(3600),
        )
        .unwrap();
        let len = encode_datetime(&mut data, &dt).unwrap();
        assert_eq!(&data, &*b"19851231235948.123456+0100");
        assert_eq!(len, 26);

        let mut data = vec![];
        let dt = DicomDateTime::from_date(DicomDate::from_y(2018).unwrap());
        encode_datetime(&mut data, &dt).unwrap();
        assert_eq!(&data, &*b"2018");
    }

    #[test]
    fn test_encode_age() {
        let mut data = vec![];
        encode_age(&mut data, &Age::new(7, AgeUnit::Weeks).unwrap()).unwrap();
        assert_eq!(&data, &*b"007W");
    }
}
