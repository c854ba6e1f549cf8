//! Data model for the crawl
//!
//! These types double as the on-disk checkpoint schema. The serialized field
//! names and their order (`user`, `name`, `id`, `url`, `posts`) are the
//! compatibility contract with downstream ingestion and must not change.

use serde::{Deserialize, Serialize};

/// A named grouping container holding an ordered list of items.
///
/// Created once during the discovery phase; `items` is populated exactly
/// once, during this collection's expansion phase. The order of `items`
/// reflects discovery order within the collection and is not guaranteed
/// stable across separate crawl runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Account that owns the collection
    #[serde(rename = "user")]
    pub owner: String,

    /// Human-readable collection name
    pub name: String,

    /// Globally unique id assigned by the remote system
    pub id: String,

    /// URL of the collection's listing page
    pub url: String,

    /// Ordered items, empty until expansion completes (or fails)
    #[serde(rename = "posts")]
    pub items: Vec<Item>,
}

impl Collection {
    /// Creates a collection with no items yet.
    pub fn new(owner: String, name: String, id: String, url: String) -> Self {
        Self {
            owner,
            name,
            id,
            url,
            items: Vec::new(),
        }
    }
}

/// A leaf content reference within a collection.
///
/// `id` is unique within the owning collection. `detail` is an opaque record
/// attached by the extractor; when absent it is omitted from the checkpoint
/// so `posts` entries serialize as exactly `{id, url}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl Item {
    pub fn new(id: String, url: String) -> Self {
        Self {
            id,
            url,
            detail: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_serializes_with_contract_field_names() {
        let mut collection = Collection::new(
            "alice".to_string(),
            "recipes".to_string(),
            "10".to_string(),
            "https://example.com/alice/saved/recipes/10/".to_string(),
        );
        collection.items.push(Item::new(
            "p1".to_string(),
            "https://example.com/p/p1/".to_string(),
        ));

        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value["user"], "alice");
        assert_eq!(value["name"], "recipes");
        assert_eq!(value["id"], "10");
        assert_eq!(value["posts"][0]["id"], "p1");

        // No leakage of the in-memory field names
        assert!(value.get("owner").is_none());
        assert!(value.get("items").is_none());
    }

    #[test]
    fn item_without_detail_serializes_as_id_and_url_only() {
        let item = Item::new("p1".to_string(), "https://example.com/p/p1/".to_string());
        let value = serde_json::to_value(&item).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("id"));
        assert!(obj.contains_key("url"));
    }

    #[test]
    fn item_detail_round_trips() {
        let mut item = Item::new("p2".to_string(), "https://example.com/p/p2/".to_string());
        item.detail = Some(serde_json::json!({"caption": "hello", "likes": 3}));

        let text = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&text).unwrap();
        assert_eq!(back, item);
    }
}
