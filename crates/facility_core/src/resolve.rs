//! Field resolution for provider cards.
//!
//! Provider records come from several upstream sources and each source fills
//! a different subset of keys. Every display field is resolved through an
//! ordered chain of `Source` steps; the first one producing non-blank text wins.
//! The order of each chain is significant and must not be rearranged.
//!
//! All functions here are total: any JSON value, including `null`, scalars and
//! arrays, resolves to a display value.

use serde_json::Value;

use crate::fields::{numeric, record_subcategory_id, scalar_text, string_text, text_at};
use crate::ids::EntityId;
use crate::media::complete_url;
use crate::model::{find_subcategory, SubCategory};

pub const UNNAMED: &str = "Unnamed";
pub const ADDRESS_NOT_AVAILABLE: &str = "Address not available";
pub const TYPE_NOT_AVAILABLE: &str = "Type not available";
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/600x300?text=No+Image";

/// Read-only inputs the resolver needs beyond the record itself.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub api_base: &'a str,
    pub subcategories: &'a [SubCategory],
    pub active_subcategory: Option<&'a EntityId>,
}

/// Resolved display model of one provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderCard {
    pub id: Option<EntityId>,
    pub name: String,
    pub address: String,
    pub provider_type: String,
    pub image_url: String,
    pub rating: f64,
    pub review_count: u64,
}

/// One step of a fallback chain.
#[derive(Debug, Clone, Copy)]
enum Source {
    /// String or number at a top-level key.
    Text(&'static str),
    /// String at a top-level key (numbers are not paths).
    Path(&'static str),
    /// `record[key].name` for objects, or the string or number itself.
    NestedName(&'static str),
    /// `images[0].url`, or `images[0]` when it is a string.
    FirstImage,
}

impl Source {
    fn read(self, record: &Value) -> Option<String> {
        match self {
            Source::Text(key) => text_at(record, key),
            Source::Path(key) => record.get(key).and_then(string_text),
            Source::NestedName(key) => match record.get(key)? {
                Value::Object(nested) => nested.get("name").and_then(scalar_text),
                other => scalar_text(other),
            },
            Source::FirstImage => {
                let first = record.get("images")?.as_array()?.first()?;
                match first {
                    Value::Object(image) => image.get("url").and_then(string_text),
                    other => string_text(other),
                }
            }
        }
    }
}

const NAME_SOURCES: &[Source] = &[
    Source::Text("name"),
    Source::Text("business_name"),
    Source::Text("title"),
    Source::Text("partner_name"),
    Source::Text("PartnerMaster_name"),
];

const ADDRESS_SOURCES: &[Source] = &[
    Source::Text("address"),
    Source::Text("location"),
    Source::Text("full_address"),
];

const TYPE_SOURCES: &[Source] = &[
    Source::Text("type"),
    Source::NestedName("sub_category"),
    Source::NestedName("category"),
];

const IMAGE_SOURCES: &[Source] = &[
    Source::Path("image"),
    Source::Path("logo"),
    Source::Path("photo"),
    Source::Path("partner_image"),
    Source::FirstImage,
    Source::Path("thumbnail"),
    Source::Path("banner"),
    Source::Path("profile"),
    Source::Path("file"),
    Source::Path("icon_img"),
];

const ID_SOURCES: &[&str] = &["id", "PartnerMaster_id"];
const RATING_KEYS: &[&str] = &["rating", "average_rating"];
const REVIEW_KEYS: &[&str] = &["reviews", "review_count", "reviews_count"];

fn first_resolved(record: &Value, sources: &[Source]) -> Option<String> {
    sources.iter().find_map(|source| source.read(record))
}

pub fn resolve_name(record: &Value) -> String {
    first_resolved(record, NAME_SOURCES).unwrap_or_else(|| UNNAMED.to_string())
}

pub fn resolve_address(record: &Value) -> String {
    if let Some(address) = first_resolved(record, ADDRESS_SOURCES) {
        return address;
    }
    match (text_at(record, "area"), text_at(record, "city")) {
        (Some(area), Some(city)) => format!("{area}, {city}"),
        (_, Some(city)) => city,
        _ => ADDRESS_NOT_AVAILABLE.to_string(),
    }
}

/// Direct type fields first, then the nested category objects, and only then
/// the name of the currently active subcategory.
pub fn resolve_type(record: &Value, ctx: &ResolveContext<'_>) -> String {
    first_resolved(record, TYPE_SOURCES)
        .or_else(|| {
            let active = ctx.active_subcategory?;
            let sub = find_subcategory(ctx.subcategories, active)?;
            (!sub.name.trim().is_empty()).then(|| sub.name.clone())
        })
        .unwrap_or_else(|| TYPE_NOT_AVAILABLE.to_string())
}

/// Direct image keys first, then the icon and generic image of the record's
/// subcategory (falling back to the active one), then the placeholder.
pub fn resolve_image(record: &Value, ctx: &ResolveContext<'_>) -> String {
    if let Some(url) =
        first_resolved(record, IMAGE_SOURCES).and_then(|path| complete_url(ctx.api_base, &path))
    {
        return url;
    }

    let sub_id = record_subcategory_id(record).or_else(|| ctx.active_subcategory.cloned());
    sub_id
        .as_ref()
        .and_then(|id| find_subcategory(ctx.subcategories, id))
        .and_then(|sub| {
            sub.icon_img
                .as_deref()
                .and_then(|path| complete_url(ctx.api_base, path))
                .or_else(|| {
                    sub.img
                        .as_deref()
                        .and_then(|path| complete_url(ctx.api_base, path))
                })
        })
        .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string())
}

pub fn resolve_id(record: &Value) -> Option<EntityId> {
    ID_SOURCES
        .iter()
        .find_map(|key| record.get(*key).and_then(EntityId::from_value))
}

pub fn resolve_rating(record: &Value) -> f64 {
    RATING_KEYS
        .iter()
        .find_map(|key| record.get(*key).and_then(numeric).filter(|r| *r > 0.0))
        .unwrap_or(0.0)
}

/// Review totals arrive either as a count or as the list of reviews itself.
pub fn resolve_review_count(record: &Value) -> u64 {
    REVIEW_KEYS
        .iter()
        .find_map(|key| match record.get(*key)? {
            Value::Array(reviews) if !reviews.is_empty() => Some(reviews.len() as u64),
            Value::Array(_) => None,
            other => numeric(other)
                .filter(|count| *count > 0.0)
                .map(|count| count.trunc() as u64),
        })
        .unwrap_or(0)
}

pub fn resolve_provider(record: &Value, ctx: &ResolveContext<'_>) -> ProviderCard {
    ProviderCard {
        id: resolve_id(record),
        name: resolve_name(record),
        address: resolve_address(record),
        provider_type: resolve_type(record, ctx),
        image_url: resolve_image(record, ctx),
        rating: resolve_rating(record),
        review_count: resolve_review_count(record),
    }
}
