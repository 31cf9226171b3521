use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_defaults_from_empty_payload() {
    let request: BookingRequest = serde_json::from_str("{}").unwrap();
    assert_eq!(request, BookingRequest::default());
    assert!(request.dry_run);
    assert!(request.member_only);
    assert_eq!(request.opponent, "vera");
    assert_eq!(request.default_policy, DatePolicy::NextWeek);
    let member: Vec<String> = request.member_times.iter().map(|t| t.to_string()).collect();
    assert_eq!(member, vec!["20:30", "19:45"]);
    let non_member: Vec<String> = request.non_member_times.iter().map(|t| t.to_string()).collect();
    assert_eq!(non_member, vec!["20:15", "19:30"]);
}

#[test]
fn test_full_payload() {
    let json = r#"{
        "dry_run": false,
        "target_date": "2026-10-23",
        "default_policy": "today",
        "skip_dates": ["2026-10-30"],
        "opponent": "koen",
        "member_times": ["21:00"],
        "member_only": false,
        "non_member_times": ["20:45"],
        "scan_order": "forward"
    }"#;
    let request: BookingRequest = serde_json::from_str(json).unwrap();
    assert!(!request.dry_run);
    assert_eq!(request.target_date, Some(date(2026, 10, 23)));
    assert_eq!(request.default_policy, DatePolicy::Today);
    assert!(request.is_skipped(date(2026, 10, 30)));
    assert_eq!(request.opponent, "koen");
    assert_eq!(request.scan_order, Some(ScanOrder::Forward));
}

#[test]
fn test_unknown_field_rejected() {
    let result: Result<BookingRequest, _> = serde_json::from_str(r#"{"oponent": "koen"}"#);
    assert!(result.is_err());
}

#[test]
fn test_invalid_time_rejected() {
    let result: Result<BookingRequest, _> = serde_json::from_str(r#"{"member_times": ["8pm"]}"#);
    assert!(result.is_err());
}

#[test]
fn test_resolve_date_explicit_wins() {
    let request = BookingRequest {
        target_date: Some(date(2026, 11, 2)),
        default_policy: DatePolicy::Today,
        ..Default::default()
    };
    assert_eq!(request.resolve_date(date(2026, 10, 16)), date(2026, 11, 2));
}

#[test]
fn test_resolve_date_next_week() {
    let request = BookingRequest::default();
    assert_eq!(request.resolve_date(date(2026, 12, 28)), date(2027, 1, 4));
}

#[test]
fn test_resolve_date_today() {
    let request = BookingRequest {
        default_policy: DatePolicy::Today,
        ..Default::default()
    };
    assert_eq!(request.resolve_date(date(2026, 10, 16)), date(2026, 10, 16));
}

#[test]
fn test_scan_order_arrange() {
    assert_eq!(ScanOrder::Reverse.arrange(vec![1, 2, 3]), vec![3, 2, 1]);
    assert_eq!(ScanOrder::Forward.arrange(vec![1, 2, 3]), vec![1, 2, 3]);
    assert_eq!(ScanOrder::default(), ScanOrder::Reverse);
}

#[test]
fn test_policy_serialization() {
    assert_eq!(serde_json::to_string(&DatePolicy::NextWeek).unwrap(), "\"next_week\"");
    assert_eq!(serde_json::to_string(&ScanOrder::Reverse).unwrap(), "\"reverse\"");
}
