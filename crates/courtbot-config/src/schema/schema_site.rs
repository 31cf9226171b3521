//! Site URLs, selectors and scraped column names.

use serde::{Deserialize, Serialize};

/// Placeholder substituted into [`Selectors::free_slot`].
pub const TIME_PLACEHOLDER: &str = "{time}";

/// Entry points of the booking site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteUrls {
    #[serde(default = "default_login_url")]
    pub login_url: String,

    #[serde(default = "default_reservations_url")]
    pub reservations_url: String,

    /// `chrono` format of dates shown by the site.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for SiteUrls {
    fn default() -> Self {
        Self {
            login_url: default_login_url(),
            reservations_url: default_reservations_url(),
            date_format: default_date_format(),
        }
    }
}

fn default_login_url() -> String {
    "https://squtrecht.baanreserveren.nl/".to_string()
}

fn default_reservations_url() -> String {
    "https://squtrecht.baanreserveren.nl/user/future".to_string()
}

fn default_date_format() -> String {
    "%d-%m-%Y".to_string()
}

/// Page selectors. CSS unless prefixed with `xpath=`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub login_email: String,
    pub login_password: String,
    pub login_submit: String,
    /// Present only once the session is authenticated.
    pub logged_in_marker: String,
    pub date_title: String,
    pub next_day: String,
    /// Free cells of one time row; must contain `{time}`.
    pub free_slot: String,
    pub court_label: String,
    pub popup_close: String,
    pub opponent_select: String,
    pub first_submit: String,
    /// The irreversible confirmation.
    pub final_submit: String,
    /// Reservation table rows; must be an XPath selector.
    pub reservation_rows: String,
    pub reservation_headers: String,
    pub reservation_players: String,
    pub reservation_detail_marker: String,
    pub reservation_back: String,
}

impl Selectors {
    /// Free-cell selector for one time row.
    pub fn free_slot_for(&self, time: &str) -> String {
        self.free_slot.replace(TIME_PLACEHOLDER, time)
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            login_email: r#"#login-form input[type="email"]"#.to_string(),
            login_password: r#"#login-form input[type="password"]"#.to_string(),
            login_submit: "#login-form button".to_string(),
            logged_in_marker: r#"a[href="/auth/logout"]"#.to_string(),
            date_title: "#matrix_date_title".to_string(),
            next_day: r#"a.matrix-date-nav[data-offset="+1"]"#.to_string(),
            free_slot: r#"tr[data-time="{time}"] td[type="free"]"#.to_string(),
            court_label: r#"xpath=//td[contains(@class, "tblTitle")][contains(normalize-space(.), "Baan")]/../td[2]"#
                .to_string(),
            popup_close: r#"a[tooltip="Sluiten"]"#.to_string(),
            opponent_select: r#"select[name="players[2]"]"#.to_string(),
            first_submit: r#"input#__make_submit[type="submit"]"#.to_string(),
            final_submit: r#"input#__make_submit2[type="submit"]"#.to_string(),
            reservation_rows: "xpath=//th[contains(text(), 'Reserveringen')]/ancestor::tbody/tr[@class='odd' or @class='even']"
                .to_string(),
            reservation_headers: "xpath=//th[contains(text(), 'Reserveringen')]/ancestor::tbody/tr[@class='tblTitle'][1]/td"
                .to_string(),
            reservation_players: "xpath=//div[@class='res-info-player-name']".to_string(),
            reservation_detail_marker: "xpath=//*[contains(text(), 'Speler 1')]".to_string(),
            reservation_back: "xpath=//input[@value='Terug']".to_string(),
        }
    }
}

/// Snake-cased header names of the reservations table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub date: String,
    pub start_time: String,
    pub court: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            date: "datum".to_string(),
            start_time: "begintijd".to_string(),
            court: "baan".to_string(),
        }
    }
}
