use thiserror::Error;

use crate::ids::EntityId;
use crate::model::{Category, SubCategory};

/// Active category and subcategory.
///
/// The subcategory is either `None` ("all subcategories") or an id from the
/// current subcategory list. Subcategory ids are only unique within their
/// category, so any category change resets it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    NoCategory,
    CategorySelected {
        category: EntityId,
        subcategory: Option<EntityId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no category is active")]
    NoActiveCategory,
    #[error("subcategory {0} is not in the current list")]
    UnknownSubCategory(EntityId),
}

impl Selection {
    pub fn active_category(&self) -> Option<&EntityId> {
        match self {
            Selection::NoCategory => None,
            Selection::CategorySelected { category, .. } => Some(category),
        }
    }

    pub fn active_subcategory(&self) -> Option<&EntityId> {
        match self {
            Selection::NoCategory => None,
            Selection::CategorySelected { subcategory, .. } => subcategory.as_ref(),
        }
    }

    /// Valid from any state; always clears the subcategory.
    pub fn select_category(&mut self, id: EntityId) {
        *self = Selection::CategorySelected {
            category: id,
            subcategory: None,
        };
    }

    /// First category load: picks `list[0]` while nothing is selected.
    /// Returns the newly selected id.
    pub fn categories_loaded(&mut self, list: &[Category]) -> Option<EntityId> {
        if !matches!(self, Selection::NoCategory) {
            return None;
        }
        let first = list.first()?.id.clone();
        self.select_category(first.clone());
        Some(first)
    }

    /// Auto-selects the first subcategory, or `None` for an empty list.
    /// Returns whether the active subcategory changed.
    pub fn subcategories_loaded(&mut self, list: &[SubCategory]) -> bool {
        match self {
            Selection::NoCategory => false,
            Selection::CategorySelected { subcategory, .. } => {
                let next = list.first().map(|sub| sub.id.clone());
                let changed = *subcategory != next;
                *subcategory = next;
                changed
            }
        }
    }

    /// Direct subcategory choice. Returns whether the selection changed.
    pub fn select_subcategory(
        &mut self,
        id: Option<EntityId>,
        list: &[SubCategory],
    ) -> Result<bool, SelectionError> {
        let Selection::CategorySelected { subcategory, .. } = self else {
            return Err(SelectionError::NoActiveCategory);
        };
        if let Some(id) = &id {
            if !list.iter().any(|sub| &sub.id == id) {
                return Err(SelectionError::UnknownSubCategory(id.clone()));
            }
        }
        let changed = *subcategory != id;
        *subcategory = id;
        Ok(changed)
    }
}
