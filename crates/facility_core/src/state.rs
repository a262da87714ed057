use serde_json::Value;

use crate::counts::CountMap;
use crate::ids::EntityId;
use crate::model::{Category, SubCategory};
use crate::resolve::{resolve_provider, ResolveContext};
use crate::selection::{Selection, SelectionError};
use crate::sync::{FetchTicket, Generations, Slice, StalePolicy};
use crate::view_model::DirectoryViewModel;

/// Session state of the directory.
///
/// Raw provider records are kept as fetched; resolved cards and counts are
/// derived from them, never stored independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    api_base: String,
    policy: StalePolicy,
    categories: Vec<Category>,
    subcategories: Vec<SubCategory>,
    selection: Selection,
    providers: Vec<Value>,
    counts: CountMap,
    generations: Generations,
}

/// No API base: relative image paths stay root-relative.
impl Default for AppState {
    fn default() -> Self {
        Self::with_api_base("")
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `api_base` is used to complete relative image paths.
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            policy: StalePolicy::default(),
            categories: Vec::new(),
            subcategories: Vec::new(),
            selection: Selection::default(),
            providers: Vec::new(),
            counts: CountMap::default(),
            generations: Generations::default(),
        }
    }

    pub fn with_policy(mut self, policy: StalePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn subcategories(&self) -> &[SubCategory] {
        &self.subcategories
    }

    pub fn view(&self) -> DirectoryViewModel {
        let ctx = ResolveContext {
            api_base: &self.api_base,
            subcategories: &self.subcategories,
            active_subcategory: self.selection.active_subcategory(),
        };
        DirectoryViewModel {
            categories: self.categories.clone(),
            active_category_id: self.selection.active_category().cloned(),
            subcategories: self.subcategories.clone(),
            active_subcategory_id: self.selection.active_subcategory().cloned(),
            counts: self.counts.clone(),
            providers: self
                .providers
                .iter()
                .map(|record| resolve_provider(record, &ctx))
                .collect(),
        }
    }

    pub(crate) fn issue(&mut self, slice: Slice) -> FetchTicket {
        self.generations.issue(slice)
    }

    /// Whether a completion for `ticket` may be applied under the policy.
    pub(crate) fn accepts(&self, ticket: FetchTicket) -> bool {
        match self.policy {
            StalePolicy::LastWriteWins => true,
            StalePolicy::DiscardStale => self.generations.is_latest(ticket),
        }
    }

    /// Replaces the category list; from `NoCategory` this also selects the
    /// first entry and returns its id.
    pub(crate) fn categories_loaded(&mut self, categories: Vec<Category>) -> Option<EntityId> {
        self.categories = categories;
        let selected = self.selection.categories_loaded(&self.categories);
        if selected.is_some() {
            self.subcategories.clear();
        }
        selected
    }

    /// Selecting a category invalidates the subcategory list of the old one.
    pub(crate) fn enter_category(&mut self, id: EntityId) {
        self.selection.select_category(id);
        self.subcategories.clear();
    }

    /// Returns whether the active subcategory changed.
    pub(crate) fn subcategories_loaded(&mut self, subcategories: Vec<SubCategory>) -> bool {
        self.subcategories = subcategories;
        self.selection.subcategories_loaded(&self.subcategories)
    }

    pub(crate) fn select_subcategory(
        &mut self,
        id: Option<EntityId>,
    ) -> Result<bool, SelectionError> {
        self.selection.select_subcategory(id, &self.subcategories)
    }

    pub(crate) fn set_providers(&mut self, records: Vec<Value>) {
        self.providers = records;
    }

    /// Only the aggregate is kept; the unfiltered records are not rendered.
    pub(crate) fn set_count_source(&mut self, records: &[Value]) {
        self.counts = CountMap::from_providers(records);
    }
}
