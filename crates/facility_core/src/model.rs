use serde_json::Value;

use crate::fields::{string_text, text_at};
use crate::ids::EntityId;

/// Top-level grouping of providers (hospitals, pharmacies, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
}

impl Category {
    /// Records without a usable `id` cannot be selected and are skipped.
    pub fn from_record(record: &Value) -> Option<Self> {
        let id = record.get("id").and_then(EntityId::from_value)?;
        Some(Self {
            id,
            name: text_at(record, "name").unwrap_or_default(),
        })
    }
}

/// Refinement within a category, used for filtering and for counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCategory {
    pub id: EntityId,
    pub name: String,
    pub icon_img: Option<String>,
    pub img: Option<String>,
}

impl SubCategory {
    pub fn from_record(record: &Value) -> Option<Self> {
        let id = record.get("id").and_then(EntityId::from_value)?;
        Some(Self {
            id,
            name: text_at(record, "name").unwrap_or_default(),
            icon_img: record.get("icon_img").and_then(string_text),
            img: record.get("img").and_then(string_text),
        })
    }
}

pub fn parse_categories(records: &[Value]) -> Vec<Category> {
    records.iter().filter_map(Category::from_record).collect()
}

pub fn parse_subcategories(records: &[Value]) -> Vec<SubCategory> {
    records.iter().filter_map(SubCategory::from_record).collect()
}

pub(crate) fn find_subcategory<'a>(
    subcategories: &'a [SubCategory],
    id: &EntityId,
) -> Option<&'a SubCategory> {
    subcategories.iter().find(|sub| &sub.id == id)
}
