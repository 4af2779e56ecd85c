//! Behavior of the public API over whole classes of inputs,
//! plus the reference encodings of common values.
use dicom_values::chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Utc};
use dicom_values::value::deserialize::{parse_age, parse_date, parse_datetime, parse_time};
use dicom_values::value::{
    Age, AgeUnit, BinaryValue, CharacterValue, DicomDate, DicomDateTime, DicomTime, FloatValue,
    IntegerValue, PrecisionLevel,
};
use dicom_values::value::integer::integer_range;
use dicom_values::{DicomValue, ErrorKind, VR};
use rstest::rstest;

#[test]
fn every_vr_round_trips_through_its_code() {
    for vr in VR::ALL {
        assert_eq!(VR::parse(&vr.to_string()).unwrap(), vr);
        assert_eq!(vr.as_str().parse::<VR>().unwrap(), vr);
        assert_eq!(VR::from_binary(vr.to_bytes()), Some(vr));
    }
    assert_eq!(VR::parse("ZZ").unwrap_err().kind(), ErrorKind::InvalidVr);
}

#[rstest]
#[case("2023")]
#[case("202310")]
#[case("20231015")]
#[case("2023.10.15")]
#[case("00010101")]
fn date_text_round_trips(#[case] text: &str) {
    assert_eq!(parse_date(text).unwrap().dcm(), text);
}

#[rstest]
#[case("14")]
#[case("1430")]
#[case("143025")]
#[case("143025.1")]
#[case("143025.123")]
#[case("143025.123456")]
#[case("000000.000000")]
#[case("235959")]
fn time_text_round_trips(#[case] text: &str) {
    assert_eq!(parse_time(text).unwrap().dcm(), text);
}

#[rstest]
#[case("2023")]
#[case("20231015")]
#[case("2023101514")]
#[case("20231015143025")]
#[case("20231015143025.5")]
#[case("20231015143025+0000")]
#[case("20231015143025-0000")]
#[case("20231015143025.123456-0500")]
#[case("202310+0100")]
fn datetime_text_round_trips(#[case] text: &str) {
    assert_eq!(parse_datetime(text).unwrap().dcm(), text);
}

#[rstest]
#[case("000D")]
#[case("012W")]
#[case("006M")]
#[case("999Y")]
fn age_text_round_trips(#[case] text: &str) {
    assert_eq!(parse_age(text).unwrap().dcm(), text);
}

#[rstest]
#[case("", ErrorKind::EmptyInput)]
#[case("   ", ErrorKind::EmptyInput)]
#[case("2023101", ErrorKind::InvalidFormat)]
#[case("20231301", ErrorKind::RangeExceeded)]
#[case("20230229", ErrorKind::InvalidDayForMonth)]
fn rejected_dates(#[case] text: &str, #[case] kind: ErrorKind) {
    assert_eq!(parse_date(text).unwrap_err().kind(), kind);
}

#[test]
fn emission_is_deterministic() {
    let values: Vec<DicomValue> = vec![
        CharacterValue::new(VR::CS, ["A", "B"]).unwrap().into(),
        BinaryValue::new(VR::OW, vec![1, 2, 3]).unwrap().into(),
        IntegerValue::new(VR::SL, [-7, 7]).unwrap().into(),
        FloatValue::new(VR::FD, [f64::NAN]).unwrap().into(),
    ];
    for value in &values {
        assert_eq!(value.emit(), value.clone().emit());
        let mut out = Vec::new();
        let written = value.write_to(&mut out).unwrap();
        assert_eq!(written, out.len());
        assert_eq!(out, value.emit());
    }
}

#[test]
fn equality_is_an_equivalence() {
    let a = FloatValue::new(VR::FD, [f64::NAN, 1.]).unwrap();
    let b = FloatValue::new(VR::FD, [f64::NAN, 1.]).unwrap();
    let c = b.clone();
    assert_eq!(a, a);
    assert_eq!(a, b);
    assert_eq!(b, a);
    assert_eq!(b, c);
    assert_eq!(a, c);

    let absent = BinaryValue::from_option(VR::OB, None).unwrap();
    let empty = BinaryValue::new(VR::OB, Vec::new()).unwrap();
    assert_eq!(absent, empty);
    assert_eq!(empty, absent);
    assert_ne!(empty, BinaryValue::new(VR::OW, Vec::new()).unwrap());
}

#[test]
fn strings_of_maximum_length_are_accepted() {
    for vr in VR::ALL.into_iter().filter(|vr| vr.is_string()) {
        let max = vr.max_chars();
        if max == 0 {
            continue;
        }
        let longest = "1".repeat(max);
        assert!(CharacterValue::single(vr, longest).is_ok(), "{}", vr);
        let too_long = "1".repeat(max + 1);
        let err = CharacterValue::single(vr, too_long).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthExceeded, "{}", vr);
    }
}

#[test]
fn integers_at_range_endpoints() {
    for vr in VR::ALL {
        let Some((min, max)) = integer_range(vr) else {
            continue;
        };
        assert!(IntegerValue::new(vr, [min, max]).is_ok(), "{}", vr);
        if let Some(below) = min.checked_sub(1) {
            assert!(IntegerValue::new(vr, [below]).is_err(), "{}", vr);
        }
        if let Some(above) = max.checked_add(1) {
            assert!(IntegerValue::new(vr, [above]).is_err(), "{}", vr);
        }
    }
}

#[rstest]
#[case("1.2.3", b"1.2.3\0" as &[u8])]
#[case("1.2", b"1.2")]
#[case("1.2.840.10008.1.2.1", b"1.2.840.10008.1.2.1\0")]
fn uid_padding(#[case] uid: &str, #[case] expected: &[u8]) {
    let value = CharacterValue::single(VR::UI, uid).unwrap();
    assert_eq!(value.emit(), expected);
}

#[test]
fn binary_values_pad_to_even_length() {
    for vr in VR::ALL.into_iter().filter(|vr| vr.is_binary()) {
        let value = BinaryValue::new(vr, vec![0xAA; 5]).unwrap();
        let out = value.emit();
        assert_eq!(out.len(), 6, "{}", vr);
        assert_eq!(out[5], 0x00);

        let value = BinaryValue::new(vr, vec![0xAA; 4]).unwrap();
        assert_eq!(value.emit(), vec![0xAA; 4]);
    }
}

#[test]
fn person_name_keeps_backslash() {
    let value = CharacterValue::single(VR::PN, "Doe^John\\Jr").unwrap();
    assert_eq!(value.multiplicity(), 1);
    assert_eq!(value.emit(), b"Doe^John\\Jr");
}

#[test]
fn full_date() {
    let date = parse_date("20231015").unwrap();
    assert_eq!(date.date(), NaiveDate::from_ymd_opt(2023, 10, 15).unwrap());
    assert_eq!(date.precision(), PrecisionLevel::Day);
    assert_eq!(date.dcm(), "20231015");
    assert_eq!(date.to_string(), "2023-10-15");
}

#[test]
fn month_date_keeps_its_precision() {
    let date = parse_date("202310").unwrap();
    assert_eq!(date.date(), NaiveDate::from_ymd_opt(2023, 10, 1).unwrap());
    assert_eq!(date.precision(), PrecisionLevel::Month);
    assert_eq!(date.dcm(), "202310");
}

#[test]
fn legacy_dotted_date() {
    let date = parse_date("2023.10.15").unwrap();
    assert_eq!(
        (date.year(), date.month(), date.day()),
        (2023, 10, 15)
    );
    assert_eq!(date.precision(), PrecisionLevel::Day);
    assert!(date.is_legacy_dotted());
    assert_eq!(date.dcm(), "2023.10.15");
    assert_eq!(date, "2023.10.15".parse::<DicomDate>().unwrap());
}

#[test]
fn time_with_microseconds() {
    let time = parse_time("143025.123456").unwrap();
    assert_eq!(
        time.time(),
        NaiveTime::from_hms_micro_opt(14, 30, 25, 123_456).unwrap()
    );
    assert_eq!(time.precision(), PrecisionLevel::MS6);
    assert_eq!(time.dcm(), "143025.123456");
    assert_eq!(time, DicomTime::from_hms_micro(14, 30, 25, 123_456).unwrap());
}

#[test]
fn datetime_without_offset_is_anchored_to_utc() {
    let dt = parse_datetime("20231015143025").unwrap();
    assert!(!dt.has_offset());
    assert_eq!(dt.offset().local_minus_utc(), 0);
    let utc = dt.to_utc();
    assert_eq!((utc.year(), utc.month(), utc.day()), (2023, 10, 15));
    assert_eq!((utc.hour(), utc.minute(), utc.second()), (14, 30, 25));
    assert_eq!(dt.dcm(), "20231015143025");
}

#[test]
fn datetime_with_zero_offset() {
    let dt = parse_datetime("20231015143025+0000").unwrap();
    assert!(dt.has_offset());
    assert_eq!(dt.to_utc(), parse_datetime("20231015143025").unwrap().to_utc());
    assert_eq!(dt.to_utc().timezone(), Utc);
    assert_eq!(dt.dcm(), "20231015143025+0000");
    // same instant, but the offset was written in only one of them
    assert_ne!(dt, parse_datetime("20231015143025").unwrap());
    assert_eq!(
        DicomDateTime::from_datetime(dt.instant()).to_utc(),
        dt.to_utc()
    );
}

#[test]
fn age_in_years() {
    let age = parse_age("042Y").unwrap();
    assert_eq!(age, Age::new(42, AgeUnit::Years).unwrap());
    let expected = 42. * 365.25 * 86_400.;
    assert_eq!(age.duration().as_secs_f64(), expected);
}

#[rstest]
#[case(IntegerValue::new(VR::SS, [256]).unwrap().into(), &[0x00, 0x01])]
#[case(IntegerValue::new(VR::AT, [0x0008_0018]).unwrap().into(), &[0x08, 0x00, 0x18, 0x00])]
#[case(FloatValue::new(VR::FL, [1.0]).unwrap().into(), &[0x00, 0x00, 0x80, 0x3F])]
#[case(BinaryValue::new(VR::OB, vec![0x01, 0x02, 0x03]).unwrap().into(), &[0x01, 0x02, 0x03, 0x00])]
#[case(CharacterValue::single(VR::UI, "1.2.3").unwrap().into(), b"1.2.3\0")]
#[case(
    CharacterValue::new(VR::CS, ["ORIGINAL", "PRIMARY", "AXIAL"]).unwrap().into(),
    b"ORIGINAL\\PRIMARY\\AXIAL"
)]
fn reference_encodings(#[case] value: DicomValue, #[case] expected: &[u8]) {
    assert_eq!(value.emit(), expected);
}

#[test]
fn temporal_bridge() {
    let value = CharacterValue::single(VR::DT, "20231015143025+0000").unwrap();
    assert_eq!(value.as_datetime().unwrap().dcm(), "20231015143025+0000");

    let value = CharacterValue::new(VR::DA, ["20231015", "20231016"]).unwrap();
    assert_eq!(
        value.as_date().unwrap_err().kind(),
        ErrorKind::MultiValuedTemporal
    );
    let value = CharacterValue::new(VR::TM, Vec::<String>::new()).unwrap();
    assert_eq!(value.as_time().unwrap_err().kind(), ErrorKind::EmptyValue);
    let value = CharacterValue::single(VR::LO, "042Y").unwrap();
    assert_eq!(value.as_age().unwrap_err().kind(), ErrorKind::VrMismatch);
    let value = CharacterValue::single(VR::AS, "42Y").unwrap();
    assert_eq!(value.as_age().unwrap_err().kind(), ErrorKind::InvalidFormat);
}
