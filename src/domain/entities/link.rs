//! Link entity representing a short code mapped to a destination URL.

use chrono::{DateTime, Utc};

/// A stored short link.
///
/// `code` and `url` never change after creation. `clicks` and `last_clicked`
/// are only written by the atomic click-record operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Store-assigned identifier. Internal only; `code` is the public key.
    pub id: i64,
    pub code: String,
    pub url: String,
    pub clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        url: String,
        clicks: i64,
        last_clicked: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            url,
            clicks,
            last_clicked,
            created_at,
        }
    }
}

/// Aggregate counts over every stored link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkTotals {
    pub links: i64,
    pub clicks: i64,
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub url: String,
}

impl NewLink {
    pub fn new(code: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = Link::new(
            1,
            "abc123".to_string(),
            "https://example.com".to_string(),
            0,
            None,
            now,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.code, "abc123");
        assert_eq!(link.url, "https://example.com");
        assert_eq!(link.clicks, 0);
        assert_eq!(link.created_at, now);
        assert!(link.last_clicked.is_none());
    }

    #[test]
    fn test_new_link_creation() {
        let new_link = NewLink::new("xyz789", "https://rust-lang.org");

        assert_eq!(new_link.code, "xyz789");
        assert_eq!(new_link.url, "https://rust-lang.org");
    }
}
