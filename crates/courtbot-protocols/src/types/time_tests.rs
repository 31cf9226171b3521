use super::*;

#[test]
fn test_parse_and_display() {
    let time: TimeOfDay = "20:30".parse().unwrap();
    assert_eq!(time.hour(), 20);
    assert_eq!(time.minute(), 30);
    assert_eq!(time.to_string(), "20:30");
}

#[test]
fn test_parse_single_digit_hour_pads_on_display() {
    let time: TimeOfDay = "9:05".parse().unwrap();
    assert_eq!(time.to_string(), "09:05");
}

#[test]
fn test_parse_rejects_garbage() {
    assert!("2030".parse::<TimeOfDay>().is_err());
    assert!("24:00".parse::<TimeOfDay>().is_err());
    assert!("12:60".parse::<TimeOfDay>().is_err());
    assert!("12:5".parse::<TimeOfDay>().is_err());
    assert!("ab:cd".parse::<TimeOfDay>().is_err());
    assert!(":30".parse::<TimeOfDay>().is_err());
}

#[test]
fn test_ordering() {
    let early: TimeOfDay = "19:45".parse().unwrap();
    let late: TimeOfDay = "20:30".parse().unwrap();
    assert!(early < late);
}

#[test]
fn test_compact() {
    let time = TimeOfDay::new(7, 5).unwrap();
    assert_eq!(time.compact(), "0705");
}

#[test]
fn test_serde_as_string() {
    let time = TimeOfDay::new(20, 15).unwrap();
    let json = serde_json::to_string(&time).unwrap();
    assert_eq!(json, "\"20:15\"");

    let parsed: TimeOfDay = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, time);
}

#[test]
fn test_serde_rejects_invalid() {
    let result: Result<TimeOfDay, _> = serde_json::from_str("\"25:00\"");
    assert!(result.is_err());
}

#[test]
fn test_into_naive_time() {
    let time: chrono::NaiveTime = TimeOfDay::new(19, 45).unwrap().into();
    assert_eq!(time, chrono::NaiveTime::from_hms_opt(19, 45, 0).unwrap());
}
