use dicom_values::prelude::*;

#[test]
fn can_use_prelude() {
    // can refer to `DicomValue`, `VR`, and `dicom_value!`
    let value: DicomValue = dicom_value!(Str, PN, "Simões^João").unwrap();
    assert_eq!(value.vr(), VR::PN);
    assert_eq!(value.emit().len(), "Simões^João".len());

    // temporal types and the range trait
    let date = DicomDate::from_ym(2023, 2).unwrap();
    assert_eq!(date.precision(), PrecisionLevel::Month);
    assert_eq!(
        date.latest(),
        dicom_values::chrono::NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
    );
    let age = Age::new(3, AgeUnit::Weeks).unwrap();
    assert_eq!(age.dcm(), "003W");

    // values of each kind
    let _ = IntegerValue::from_tags([Tag(0x0020, 0x000D)]);
    assert!(BinaryValue::admits(VR::OW));
    assert!(FloatValue::new(VR::FL, [1.]).is_ok());
    assert!(CharacterValue::single(VR::DA, "20231015")
        .unwrap()
        .as_date()
        .is_ok());
    assert!(DicomTime::from_h(12).is_ok());
    assert_eq!(DicomDateTime::from_date(date).dcm(), "202302");
}
