use super::*;
use chrono::{NaiveDate, TimeZone};

fn reservation(day: u32, time: &str, court: &str, players: &[&str]) -> Reservation {
    Reservation {
        date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
        start_time: time.parse().unwrap(),
        court_label: court.to_string(),
        players: players.iter().map(|p| p.to_string()).collect(),
    }
}

fn renderer() -> IcsRenderer {
    IcsRenderer::from_config(&ExportConfig::default())
        .with_stamp(Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap())
}

fn lines(ics: &str) -> Vec<&str> {
    ics.split("\r\n").collect()
}

#[test]
fn test_empty_calendar() {
    let ics = renderer().render(&[]);
    assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
    assert!(ics.ends_with("END:VCALENDAR\r\n"));
    assert!(ics.contains("X-WR-CALNAME:Squash Reserveringen\r\n"));
    assert!(!ics.contains("BEGIN:VEVENT"));
}

#[test]
fn test_event_fields() {
    let ics = renderer().render(&[reservation(23, "20:30", "Court 4", &["Jeroen", "Vera"])]);
    let lines = lines(&ics);

    assert!(lines.contains(&"UID:squash-20261023-2030-Court4@example.com"));
    assert!(lines.contains(&"DTSTAMP:20261016T120000Z"));
    assert!(lines.contains(&"DTSTART;TZID=Europe/Amsterdam:20261023T203000"));
    assert!(lines.contains(&"DTEND;TZID=Europe/Amsterdam:20261023T213000"));
    assert!(lines.contains(&"SUMMARY:\u{1F3F8} Court 4 20:30"));
    assert!(lines.contains(&"LOCATION:Squash Utrecht"));
    assert!(lines.contains(&"DESCRIPTION:Jeroen\\nVera"));
}

#[test]
fn test_one_event_per_reservation() {
    let ics = renderer().render(&[
        reservation(23, "20:30", "Court 4", &[]),
        reservation(30, "19:45", "Court 2", &[]),
    ]);
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
    assert_eq!(ics.matches("END:VEVENT").count(), 2);
    assert!(!ics.contains("DESCRIPTION"));
}

#[test]
fn test_event_crossing_midnight() {
    let mut config = ExportConfig::default();
    config.event_minutes = 90;
    let ics = IcsRenderer::from_config(&config).render(&[reservation(23, "23:00", "Court 4", &[])]);
    assert!(ics.contains("DTEND;TZID=Europe/Amsterdam:20261024T003000"));
}

#[test]
fn test_escape() {
    assert_eq!(escape("a,b;c\\d\ne"), "a\\,b\\;c\\\\d\\ne");
    assert_eq!(escape("Court 1 (balie)"), "Court 1 (balie)");
}

#[test]
fn test_fold_long_lines() {
    let line = format!("DESCRIPTION:{}", "x".repeat(100));
    let folded = fold(&line);
    let parts: Vec<&str> = folded.split("\r\n").collect();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].len(), 75);
    assert!(parts[1].starts_with(' '));
    assert_eq!(folded.replace("\r\n ", ""), line);
}

#[test]
fn test_fold_keeps_characters_whole() {
    let line = format!("SUMMARY:{}", "\u{1F3F8}".repeat(30));
    let folded = fold(&line);
    for part in folded.split("\r\n") {
        assert!(part.len() <= 75);
    }
    assert_eq!(folded.replace("\r\n ", ""), line);
}

#[test]
fn test_short_line_untouched() {
    assert_eq!(fold("VERSION:2.0"), "VERSION:2.0");
}
