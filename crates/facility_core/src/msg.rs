use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Session start: request the category list.
    Started,
    /// User picked a category tab.
    CategorySelected(crate::EntityId),
    /// User picked a subcategory chip; `None` is the "All" chip.
    SubCategorySelected(Option<crate::EntityId>),
    /// A fetch finished. `records` is already unwrapped from its envelope and
    /// is empty when the fetch failed.
    FetchCompleted {
        ticket: crate::FetchTicket,
        records: Vec<Value>,
    },
}
