//! # Work Item Definitions
//!
//! The element type carried by the shared work queue. Termination is a
//! distinguished `Stop` variant rather than a magic empty value, so a worker
//! can never confuse a real listing with a shutdown signal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of one estate listing, used to address the detail
/// endpoint. The search API reports it as `hash_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(String);

impl ListingId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Extracts a listing id from one search-result entry.
    ///
    /// The live API serves `hash_id` as a JSON number; older captures carry
    /// it as a string. Entries without a usable id yield `None` and are
    /// skipped by the caller.
    #[must_use]
    pub fn from_estate_entry(entry: &serde_json::Value) -> Option<Self> {
        match entry.get("hash_id") {
            Some(serde_json::Value::Number(n)) => Some(Self(n.to_string())),
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(Self(s.clone())),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One element of the shared work queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkItem {
    /// Fetch the detail record for this listing.
    Listing(ListingId),

    /// Terminate the receiving worker. Exactly one is enqueued per started
    /// worker, after production has ended.
    Stop,
}

impl WorkItem {
    /// Returns the item kind as a string for log lines.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Listing(_) => "listing",
            Self::Stop => "stop",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listing_id_from_numeric_hash_id() {
        let entry = json!({ "hash_id": 3021886028_u64 });
        let id = ListingId::from_estate_entry(&entry).unwrap();
        assert_eq!(id.as_str(), "3021886028");
    }

    #[test]
    fn listing_id_from_string_hash_id() {
        let entry = json!({ "hash_id": "123" });
        let id = ListingId::from_estate_entry(&entry).unwrap();
        assert_eq!(id.as_str(), "123");
    }

    #[test]
    fn listing_id_missing_or_empty_is_none() {
        assert!(ListingId::from_estate_entry(&json!({})).is_none());
        assert!(ListingId::from_estate_entry(&json!({ "hash_id": "" })).is_none());
        assert!(ListingId::from_estate_entry(&json!({ "hash_id": null })).is_none());
    }

    #[test]
    fn work_item_kind_strings() {
        assert_eq!(WorkItem::Listing(ListingId::new("1")).kind(), "listing");
        assert_eq!(WorkItem::Stop.kind(), "stop");
    }
}
