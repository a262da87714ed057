use crate::{EntityId, FetchTicket};

/// Remote reads requested by `update`. The runner answers each one with a
/// `Msg::FetchCompleted` carrying the same ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchCategories {
        ticket: FetchTicket,
    },
    FetchSubCategories {
        ticket: FetchTicket,
        category_id: EntityId,
    },
    FetchProviders {
        ticket: FetchTicket,
        category_id: EntityId,
        sub_category_id: Option<EntityId>,
    },
    /// Unfiltered provider list of a category, used only for counts.
    FetchProviderCounts {
        ticket: FetchTicket,
        category_id: EntityId,
    },
}

impl Effect {
    pub fn ticket(&self) -> FetchTicket {
        match self {
            Effect::FetchCategories { ticket }
            | Effect::FetchSubCategories { ticket, .. }
            | Effect::FetchProviders { ticket, .. }
            | Effect::FetchProviderCounts { ticket, .. } => *ticket,
        }
    }
}
