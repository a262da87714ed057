/// One independently fetched piece of remote state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    Categories,
    SubCategories,
    Providers,
    ProviderCounts,
}

const SLICE_COUNT: usize = 4;

impl Slice {
    fn index(self) -> usize {
        match self {
            Slice::Categories => 0,
            Slice::SubCategories => 1,
            Slice::Providers => 2,
            Slice::ProviderCounts => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Slice::Categories => "categories",
            Slice::SubCategories => "subcategories",
            Slice::Providers => "providers",
            Slice::ProviderCounts => "provider counts",
        }
    }
}

/// Identifies an issued fetch: its slice and the per-slice generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub slice: Slice,
    pub generation: u64,
}

/// How completions that were overtaken by a newer fetch are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Every completion overwrites its slice, in arrival order.
    #[default]
    LastWriteWins,
    /// Completions older than the latest issued fetch of their slice are dropped.
    DiscardStale,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Generations {
    latest: [u64; SLICE_COUNT],
}

impl Generations {
    pub(crate) fn issue(&mut self, slice: Slice) -> FetchTicket {
        let slot = &mut self.latest[slice.index()];
        *slot += 1;
        FetchTicket {
            slice,
            generation: *slot,
        }
    }

    pub(crate) fn is_latest(&self, ticket: FetchTicket) -> bool {
        self.latest[ticket.slice.index()] == ticket.generation
    }
}
