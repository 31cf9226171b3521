use super::*;
use crate::testing::FakeDriver;

fn scraper(config: &SiteConfig) -> ReservationScraper {
    ReservationScraper::from_config(config).with_polling(2, Duration::ZERO)
}

/// Reservations table with one row per `(cells, players)`.
fn account_page(config: &SiteConfig, rows: &[(&[&str], &[&str])]) -> FakeDriver {
    let s = &config.selectors;
    let scraper = scraper(config);
    let row_labels: Vec<&str> = rows.iter().map(|_| "row").collect();

    let mut driver = FakeDriver::new()
        .with_elements(&scraper.rows_selector(), &row_labels)
        .with_elements(&s.reservation_headers, &["Datum", "Begintijd", "Eindtijd", "Baan"])
        .with_clickable(&s.reservation_back);

    for (i, (cells, players)) in rows.iter().enumerate() {
        let link = scraper.link_selector(i);
        driver = driver
            .with_elements(&scraper.cells_selector(i), cells)
            .with_clickable(&link)
            .on_click_show(&link, &s.reservation_detail_marker, &["Speler 1"])
            .on_click_show(&link, &s.reservation_players, players);
    }
    driver
}

#[tokio::test]
async fn test_fetch_reservations() {
    let config = SiteConfig::default();
    let driver = account_page(
        &config,
        &[
            (&["23-10-2026", "20:30", "21:15", "Court 4"], &["Jeroen", "Vera de Vries"]),
            (&[" 30-10-2026 ", "19:45", "20:30", "Court 1 (balie)"], &["Jeroen", "Koen"]),
        ],
    );

    let reservations = scraper(&config).fetch_reservations(&driver).await.unwrap();

    assert_eq!(reservations.len(), 2);
    assert_eq!(reservations[0].date, NaiveDate::from_ymd_opt(2026, 10, 23).unwrap());
    assert_eq!(reservations[0].start_time.to_string(), "20:30");
    assert_eq!(reservations[0].court_label, "Court 4");
    assert_eq!(reservations[0].players, vec!["Jeroen", "Vera de Vries"]);
    assert_eq!(reservations[1].date, NaiveDate::from_ymd_opt(2026, 10, 30).unwrap());
    assert_eq!(reservations[1].players, vec!["Jeroen", "Koen"]);

    let s = &config.selectors;
    assert!(driver.clicked(&scraper(&config).link_selector(1)));
    assert!(driver.clicked(&s.reservation_back));
}

#[tokio::test]
async fn test_empty_table() {
    let config = SiteConfig::default();
    let driver = account_page(&config, &[]);

    let reservations = scraper(&config).fetch_reservations(&driver).await.unwrap();
    assert!(reservations.is_empty());
}

#[tokio::test]
async fn test_malformed_date() {
    let config = SiteConfig::default();
    let driver = account_page(&config, &[(&["morgen", "20:30", "21:15", "Court 4"], &["Jeroen"])]);

    let err = scraper(&config).fetch_reservations(&driver).await.unwrap_err();
    assert!(matches!(err, ScrapeError::MalformedRow { row: 0, field: "date", .. }));
}

#[tokio::test]
async fn test_missing_column() {
    let config = SiteConfig::default();
    let driver = account_page(&config, &[(&["23-10-2026", "20:30"], &["Jeroen"])]);

    let err = scraper(&config).fetch_reservations(&driver).await.unwrap_err();
    assert!(matches!(err, ScrapeError::MissingColumn { row: 0, ref column } if column == "baan"));
}

#[tokio::test]
async fn test_detail_never_opens() {
    let config = SiteConfig::default();
    let s = &config.selectors;
    let scraper = scraper(&config);
    let driver = FakeDriver::new()
        .with_elements(&scraper.rows_selector(), &["row"])
        .with_elements(&s.reservation_headers, &["Datum", "Begintijd", "Baan"])
        .with_elements(&scraper.cells_selector(0), &["23-10-2026", "20:30", "Court 4"])
        .with_clickable(&scraper.link_selector(0));

    let err = scraper.fetch_reservations(&driver).await.unwrap_err();
    assert!(matches!(err, ScrapeError::DetailTimeout(0)));
}

#[tokio::test]
async fn test_list_never_returns() {
    let config = SiteConfig::default();
    let rows_selector = scraper(&config).rows_selector();
    let driver = account_page(
        &config,
        &[
            (&["23-10-2026", "20:30", "21:15", "Court 4"], &["Jeroen"]),
            (&["30-10-2026", "19:45", "20:30", "Court 2"], &["Koen"]),
        ],
    )
    .on_click_show(&config.selectors.reservation_back, &rows_selector, &[]);

    let err = scraper(&config).fetch_reservations(&driver).await.unwrap_err();
    assert!(matches!(err, ScrapeError::ListTimeout(0)));
    assert!(!driver.clicked(&scraper(&config).link_selector(1)));
}

#[test]
fn test_row_selectors() {
    let scraper = ReservationScraper::from_config(&SiteConfig::default());
    assert!(scraper.rows_selector().starts_with("xpath=//th"));
    assert!(scraper.cells_selector(0).starts_with("xpath=(//th"));
    assert!(scraper.cells_selector(0).ends_with(")[1]/td"));
    assert!(scraper.link_selector(2).ends_with(")[3]//a"));
}

#[test]
fn test_to_snake_case() {
    assert_eq!(to_snake_case("Datum"), "datum");
    assert_eq!(to_snake_case("Begintijd"), "begintijd");
    assert_eq!(to_snake_case(" Eind tijd "), "eind_tijd");
    assert_eq!(to_snake_case("CamelCase"), "camel_case");
    assert_eq!(to_snake_case("CamelCaseWithABBR"), "camel_case_with_abbr");
    assert_eq!(to_snake_case("CourtID"), "court_id");
    assert_eq!(to_snake_case("HTTPServer"), "http_server");
    assert_eq!(to_snake_case("With-123"), "with_123");
    assert_eq!(to_snake_case("Hey there!"), "hey_there");
    assert_eq!(to_snake_case(""), "");
}
