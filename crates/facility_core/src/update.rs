use facility_logging::{facility_debug, facility_warn};
use serde_json::Value;

use crate::model::{parse_categories, parse_subcategories};
use crate::{AppState, Effect, EntityId, Msg, Slice};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            let ticket = state.issue(Slice::Categories);
            vec![Effect::FetchCategories { ticket }]
        }
        Msg::CategorySelected(id) => {
            state.enter_category(id.clone());
            category_fetches(&mut state, id)
        }
        Msg::SubCategorySelected(id) => match state.select_subcategory(id) {
            Ok(true) => provider_fetch(&mut state),
            Ok(false) => Vec::new(),
            Err(err) => {
                facility_warn!("Ignoring subcategory selection: {}", err);
                Vec::new()
            }
        },
        Msg::FetchCompleted { ticket, records } => {
            if state.accepts(ticket) {
                apply_completion(&mut state, ticket.slice, records)
            } else {
                facility_debug!(
                    "Discarding stale {} response (generation {})",
                    ticket.slice.label(),
                    ticket.generation
                );
                Vec::new()
            }
        }
    };

    (state, effects)
}

fn apply_completion(state: &mut AppState, slice: Slice, records: Vec<Value>) -> Vec<Effect> {
    match slice {
        Slice::Categories => {
            let categories = parse_categories(&records);
            match state.categories_loaded(categories) {
                Some(first) => category_fetches(state, first),
                None => Vec::new(),
            }
        }
        Slice::SubCategories => {
            if state.selection().active_category().is_none() {
                facility_debug!("Subcategories arrived without an active category");
                return Vec::new();
            }
            let subcategories = parse_subcategories(&records);
            if state.subcategories_loaded(subcategories) {
                provider_fetch(state)
            } else {
                Vec::new()
            }
        }
        Slice::Providers => {
            state.set_providers(records);
            Vec::new()
        }
        Slice::ProviderCounts => {
            state.set_count_source(&records);
            Vec::new()
        }
    }
}

/// Everything that depends on the active category is refetched: its
/// subcategories, its provider list with no subcategory filter yet, and the
/// unfiltered list used for counts.
fn category_fetches(state: &mut AppState, category_id: EntityId) -> Vec<Effect> {
    let subcategories = state.issue(Slice::SubCategories);
    let providers = state.issue(Slice::Providers);
    let counts = state.issue(Slice::ProviderCounts);
    vec![
        Effect::FetchSubCategories {
            ticket: subcategories,
            category_id: category_id.clone(),
        },
        Effect::FetchProviders {
            ticket: providers,
            category_id: category_id.clone(),
            sub_category_id: None,
        },
        Effect::FetchProviderCounts {
            ticket: counts,
            category_id,
        },
    ]
}

fn provider_fetch(state: &mut AppState) -> Vec<Effect> {
    let Some(category_id) = state.selection().active_category().cloned() else {
        return Vec::new();
    };
    let sub_category_id = state.selection().active_subcategory().cloned();
    let ticket = state.issue(Slice::Providers);
    vec![Effect::FetchProviders {
        ticket,
        category_id,
        sub_category_id,
    }]
}
