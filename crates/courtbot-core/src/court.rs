//! Court exclusion rules.

/// Decides whether a court may not be booked through self-service.
pub trait CourtRule: Send + Sync {
    fn is_excluded(&self, court_label: &str) -> bool;
}

impl<F> CourtRule for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_excluded(&self, court_label: &str) -> bool {
        self(court_label)
    }
}

/// Excludes labels that start with a prefix, ignoring case and
/// surrounding whitespace of the label.
#[derive(Debug, Clone)]
pub struct PrefixRule {
    prefix: String,
}

impl PrefixRule {
    pub fn new(prefix: impl AsRef<str>) -> Self {
        Self {
            prefix: prefix.as_ref().to_lowercase(),
        }
    }
}

impl CourtRule for PrefixRule {
    fn is_excluded(&self, court_label: &str) -> bool {
        court_label.trim().to_lowercase().starts_with(&self.prefix)
    }
}
