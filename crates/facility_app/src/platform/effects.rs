use std::collections::HashMap;
use std::time::Duration;

use facility_core::{Effect, EntityId, FetchTicket, Msg};
use facility_engine::{Endpoint, EngineEvent, EngineHandle, RequestId};
use facility_logging::{facility_debug, facility_warn};

/// Forwards core effects to the engine and turns engine completions back
/// into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    pending: HashMap<RequestId, FetchTicket>,
    next_request_id: RequestId,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            pending: HashMap::new(),
            next_request_id: 1,
        }
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            let request_id = self.next_request_id;
            self.next_request_id += 1;

            let ticket = effect.ticket();
            let endpoint = endpoint_for(&effect);
            facility_debug!(
                "Fetch request_id={} {} generation={}",
                request_id,
                ticket.slice.label(),
                ticket.generation
            );
            self.pending.insert(request_id, ticket);
            self.engine.enqueue(request_id, endpoint);
        }
    }

    /// True when every enqueued fetch has reported back.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Waits up to `timeout` for the next completion.
    pub fn next_message(&mut self, timeout: Duration) -> Option<Msg> {
        match self.engine.recv_timeout(timeout)? {
            EngineEvent::FetchCompleted {
                request_id,
                endpoint,
                records,
            } => match self.pending.remove(&request_id) {
                Some(ticket) => Some(Msg::FetchCompleted { ticket, records }),
                None => {
                    facility_warn!(
                        "Completion for unknown request {} ({})",
                        request_id,
                        endpoint.label()
                    );
                    None
                }
            },
        }
    }
}

fn endpoint_for(effect: &Effect) -> Endpoint {
    match effect {
        Effect::FetchCategories { .. } => Endpoint::Categories,
        Effect::FetchSubCategories { category_id, .. } => Endpoint::SubCategories {
            category_id: wire_id(category_id),
        },
        Effect::FetchProviders {
            category_id,
            sub_category_id,
            ..
        } => Endpoint::Providers {
            category_id: wire_id(category_id),
            sub_category_id: sub_category_id.as_ref().map(wire_id),
        },
        Effect::FetchProviderCounts { category_id, .. } => Endpoint::Providers {
            category_id: wire_id(category_id),
            sub_category_id: None,
        },
    }
}

fn wire_id(id: &EntityId) -> String {
    id.as_str().to_string()
}
