//! Test doubles.
//!
//! [`FakeDriver`] stands in for a browser page: it serves canned text and
//! element lists, reacts to a few scripted clicks, and records every action
//! so callers can assert on the exact sequence issued. [`MemoryStore`] is
//! an in-memory [`BlobStore`].

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use courtbot_config::Selectors;
use courtbot_protocols::{
    BlobStore, DriverError, ElementHandle, PageDriver, StoreError, TimeOfDay,
};
use parking_lot::Mutex;

/// An action that changes page state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(String),
    Fill { selector: String, value: String },
    Click(String),
    ClickElement(ElementHandle),
    SelectOption { selector: String, value: String },
}

struct Calendar {
    title: String,
    next: String,
    shown: NaiveDate,
    frozen: bool,
}

#[derive(Default)]
struct Page {
    url: String,
    texts: HashMap<String, String>,
    elements: HashMap<String, Vec<String>>,
    clickable: HashSet<String>,
    fields: HashSet<String>,
    options: HashMap<String, Vec<String>>,
    /// Clicking element `i` of the key copies its text into the target.
    reveals: HashMap<String, String>,
    /// Clicking the key makes the listed elements appear.
    on_click: HashMap<String, Vec<(String, Vec<String>)>>,
    failing: HashSet<String>,
    calendar: Option<Calendar>,
    actions: Vec<Action>,
    queries: Vec<String>,
}

impl Page {
    fn presence(&self, selector: &str) -> usize {
        if let Some(items) = self.elements.get(selector) {
            return items.len();
        }
        let calendar_hit = self
            .calendar
            .as_ref()
            .is_some_and(|c| c.title == selector || c.next == selector);
        let known = calendar_hit
            || self.texts.contains_key(selector)
            || self.clickable.contains(selector)
            || self.fields.contains(selector)
            || self.options.contains_key(selector)
            || self.on_click.contains_key(selector);
        usize::from(known)
    }
}

/// In-memory [`PageDriver`] driven by a script.
#[derive(Default)]
pub struct FakeDriver {
    page: Mutex<Page>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Static text served by `text_content`.
    pub fn with_text(self, selector: &str, text: &str) -> Self {
        self.page
            .lock()
            .texts
            .insert(selector.to_string(), text.to_string());
        self
    }

    /// Elements matched by `selector`, one per text.
    pub fn with_elements(self, selector: &str, texts: &[&str]) -> Self {
        self.page.lock().elements.insert(
            selector.to_string(),
            texts.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub fn with_clickable(self, selector: &str) -> Self {
        self.page.lock().clickable.insert(selector.to_string());
        self
    }

    pub fn with_field(self, selector: &str) -> Self {
        self.page.lock().fields.insert(selector.to_string());
        self
    }

    pub fn with_options(self, selector: &str, values: &[&str]) -> Self {
        self.page.lock().options.insert(
            selector.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    /// A date view showing `shown`, advanced one day per click on `next`.
    pub fn with_calendar(self, title: &str, next: &str, shown: NaiveDate) -> Self {
        self.page.lock().calendar = Some(Calendar {
            title: title.to_string(),
            next: next.to_string(),
            shown,
            frozen: false,
        });
        self
    }

    /// Make the date view ignore clicks on its next link.
    pub fn frozen_calendar(self) -> Self {
        if let Some(calendar) = self.page.lock().calendar.as_mut() {
            calendar.frozen = true;
        }
        self
    }

    pub fn reveal_on_click(self, element_selector: &str, target: &str) -> Self {
        self.page
            .lock()
            .reveals
            .insert(element_selector.to_string(), target.to_string());
        self
    }

    pub fn on_click_show(self, selector: &str, target: &str, texts: &[&str]) -> Self {
        self.page
            .lock()
            .on_click
            .entry(selector.to_string())
            .or_default()
            .push((target.to_string(), texts.iter().map(|t| t.to_string()).collect()));
        self
    }

    /// Clicks on `selector` fail with a driver error.
    pub fn failing_click(self, selector: &str) -> Self {
        self.page.lock().failing.insert(selector.to_string());
        self
    }

    /// Booking grid showing `shown`, with the popup and submit controls of
    /// `selectors` present and `opponent_ids` selectable.
    pub fn booking_page(selectors: &Selectors, shown: NaiveDate, opponent_ids: &[&str]) -> Self {
        Self::new()
            .with_calendar(&selectors.date_title, &selectors.next_day, shown)
            .with_clickable(&selectors.popup_close)
            .with_clickable(&selectors.first_submit)
            .with_clickable(&selectors.final_submit)
            .with_options(&selectors.opponent_select, opponent_ids)
    }

    /// Free cells at `time`; clicking one shows its court label.
    pub fn with_slots(self, selectors: &Selectors, time: &str, courts: &[&str]) -> Self {
        let cells = selectors.free_slot_for(time);
        self.with_elements(&cells, courts)
            .reveal_on_click(&cells, &selectors.court_label)
    }

    pub fn actions(&self) -> Vec<Action> {
        self.page.lock().actions.clone()
    }

    pub fn clicked(&self, selector: &str) -> bool {
        self.page
            .lock()
            .actions
            .iter()
            .any(|a| matches!(a, Action::Click(s) if s == selector))
    }

    /// Tentative selections made on the cells of `selector`.
    pub fn element_clicks_of(&self, selector: &str) -> Vec<usize> {
        self.page
            .lock()
            .actions
            .iter()
            .filter_map(|a| match a {
                Action::ClickElement(h) if h.selector == selector => Some(h.index),
                _ => None,
            })
            .collect()
    }

    /// Tentative selections made in the row for `time`.
    pub fn slot_clicks(&self, selectors: &Selectors, time: TimeOfDay) -> Vec<usize> {
        self.element_clicks_of(&selectors.free_slot_for(&time.to_string()))
    }

    pub fn queries_of(&self, selector: &str) -> usize {
        self.page
            .lock()
            .queries
            .iter()
            .filter(|q| q.as_str() == selector)
            .count()
    }

    pub fn displayed_date(&self) -> Option<NaiveDate> {
        self.page.lock().calendar.as_ref().map(|c| c.shown)
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        let mut page = self.page.lock();
        page.actions.push(Action::Navigate(url.to_string()));
        page.url = url.to_string();
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<(), DriverError> {
        let mut page = self.page.lock();
        page.actions.push(Action::Fill {
            selector: selector.to_string(),
            value: value.to_string(),
        });
        if !page.fields.contains(selector) {
            return Err(DriverError::ElementNotFound(selector.to_string()));
        }
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), DriverError> {
        let mut page = self.page.lock();
        page.actions.push(Action::Click(selector.to_string()));

        if page.failing.contains(selector) {
            return Err(DriverError::Other(format!("scripted failure on {}", selector)));
        }
        if page.presence(selector) == 0 {
            return Err(DriverError::ElementNotFound(selector.to_string()));
        }

        if let Some(calendar) = page.calendar.as_mut() {
            if calendar.next == selector && !calendar.frozen {
                calendar.shown = calendar.shown + Days::new(1);
            }
        }

        if let Some(effects) = page.on_click.get(selector).cloned() {
            for (target, texts) in effects {
                page.elements.insert(target, texts);
            }
        }
        Ok(())
    }

    async fn click_element(&self, element: &ElementHandle) -> Result<(), DriverError> {
        let mut page = self.page.lock();
        page.actions.push(Action::ClickElement(element.clone()));

        let text = page
            .elements
            .get(&element.selector)
            .and_then(|items| items.get(element.index))
            .cloned()
            .ok_or_else(|| {
                DriverError::ElementNotFound(format!("{} [{}]", element.selector, element.index))
            })?;

        if let Some(target) = page.reveals.get(&element.selector).cloned() {
            page.texts.insert(target, text);
        }
        Ok(())
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>, DriverError> {
        let mut page = self.page.lock();
        page.queries.push(selector.to_string());
        let count = page.presence(selector);
        Ok((0..count).map(|i| ElementHandle::new(selector, i)).collect())
    }

    async fn text_content(&self, selector: &str) -> Result<String, DriverError> {
        let page = self.page.lock();
        if let Some(calendar) = page.calendar.as_ref() {
            if calendar.title == selector {
                return Ok(calendar.shown.format("%a %d-%m-%Y").to_string());
            }
        }
        page.texts
            .get(selector)
            .cloned()
            .or_else(|| page.elements.get(selector).and_then(|e| e.first().cloned()))
            .ok_or_else(|| DriverError::ElementNotFound(selector.to_string()))
    }

    async fn element_text(&self, element: &ElementHandle) -> Result<String, DriverError> {
        let page = self.page.lock();
        page.elements
            .get(&element.selector)
            .and_then(|items| items.get(element.index))
            .cloned()
            .ok_or_else(|| {
                DriverError::ElementNotFound(format!("{} [{}]", element.selector, element.index))
            })
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<(), DriverError> {
        let mut page = self.page.lock();
        page.actions.push(Action::SelectOption {
            selector: selector.to_string(),
            value: value.to_string(),
        });
        let options = page
            .options
            .get(selector)
            .ok_or_else(|| DriverError::ElementNotFound(selector.to_string()))?;
        if !options.iter().any(|o| o == value) {
            return Err(DriverError::OptionNotFound {
                selector: selector.to_string(),
                value: value.to_string(),
            });
        }
        Ok(())
    }

    async fn current_url(&self) -> Result<String, DriverError> {
        Ok(self.page.lock().url.clone())
    }
}

/// Blob store backed by a map of key to (body, content type).
#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<BTreeMap<String, (Vec<u8>, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(self, key: &str, body: &[u8]) -> Self {
        self.blobs
            .lock()
            .insert(key.to_string(), (body.to_vec(), String::new()));
        self
    }

    pub fn keys(&self) -> Vec<String> {
        self.blobs.lock().keys().cloned().collect()
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.blobs
            .lock()
            .get(key)
            .map(|(body, _)| String::from_utf8_lossy(body).into_owned())
    }

    pub fn content_type(&self, key: &str) -> Option<String> {
        self.blobs.lock().get(key).map(|(_, ct)| ct.clone())
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.blobs.lock().get(key).map(|(body, _)| body.clone()))
    }

    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StoreError> {
        self.blobs
            .lock()
            .insert(key.to_string(), (body, content_type.to_string()));
        Ok(())
    }
}
