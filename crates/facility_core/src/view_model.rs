use crate::{Category, CountMap, EntityId, ProviderCard, SubCategory};

pub const ALL_CHIP_LABEL: &str = "All";

/// Everything the presentation layer renders. Read-only by contract.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DirectoryViewModel {
    pub categories: Vec<Category>,
    pub active_category_id: Option<EntityId>,
    pub subcategories: Vec<SubCategory>,
    pub active_subcategory_id: Option<EntityId>,
    pub counts: CountMap,
    pub providers: Vec<ProviderCard>,
}

/// A subcategory filter chip; `id: None` is the synthetic "All" chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCategoryChip {
    pub id: Option<EntityId>,
    pub name: String,
    pub count: usize,
    pub active: bool,
}

impl DirectoryViewModel {
    pub fn active_category_name(&self) -> Option<&str> {
        let active = self.active_category_id.as_ref()?;
        self.categories
            .iter()
            .find(|category| &category.id == active)
            .map(|category| category.name.as_str())
    }

    /// "All" first, then one chip per subcategory in list order.
    pub fn subcategory_chips(&self) -> Vec<SubCategoryChip> {
        let mut chips = Vec::with_capacity(self.subcategories.len() + 1);
        chips.push(SubCategoryChip {
            id: None,
            name: ALL_CHIP_LABEL.to_string(),
            count: self.counts.all(),
            active: self.active_subcategory_id.is_none(),
        });
        for sub in &self.subcategories {
            chips.push(SubCategoryChip {
                id: Some(sub.id.clone()),
                name: sub.name.clone(),
                count: self.counts.for_subcategory(&sub.id),
                active: self.active_subcategory_id.as_ref() == Some(&sub.id),
            });
        }
        chips
    }
}
