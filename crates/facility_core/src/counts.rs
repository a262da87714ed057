use std::collections::BTreeMap;

use serde_json::Value;

use crate::fields::record_subcategory_id;
use crate::ids::EntityId;

/// Key of the synthetic bucket holding the total provider count.
pub const ALL_BUCKET: &str = "all";

/// Provider counts per subcategory plus the `"all"` total.
///
/// Built from the provider set of the active category without any
/// subcategory filter. Providers whose subcategory cannot be resolved only
/// contribute to the total, so the buckets need not sum to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountMap {
    buckets: BTreeMap<String, usize>,
    total: usize,
}

impl CountMap {
    /// Full recount; there is no incremental path.
    pub fn from_providers(records: &[Value]) -> Self {
        let mut buckets = BTreeMap::new();
        for id in records.iter().filter_map(record_subcategory_id) {
            *buckets.entry(id.as_str().to_string()).or_insert(0) += 1;
        }
        Self {
            buckets,
            total: records.len(),
        }
    }

    pub fn all(&self) -> usize {
        self.total
    }

    /// Count for one subcategory; absent buckets count as zero.
    pub fn for_subcategory(&self, id: &EntityId) -> usize {
        self.buckets.get(id.as_str()).copied().unwrap_or(0)
    }

    /// Lookup by raw key. `"all"` always answers the total, even if some
    /// subcategory happens to use that id.
    pub fn get(&self, key: &str) -> Option<usize> {
        if key == ALL_BUCKET {
            return Some(self.total);
        }
        self.buckets.get(key).copied()
    }

    /// The flat `{ id: count, "all": total }` mapping.
    pub fn to_map(&self) -> BTreeMap<String, usize> {
        let mut map = self.buckets.clone();
        map.insert(ALL_BUCKET.to_string(), self.total);
        map
    }
}
