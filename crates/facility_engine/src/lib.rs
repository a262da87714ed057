//! Facility engine: remote catalog client and background fetch execution.
mod client;
mod engine;
mod envelope;
mod types;

pub use client::{
    fetch_or_empty, CatalogClient, CatalogSettings, ReqwestCatalogClient, DEFAULT_API_BASE,
};
pub use engine::EngineHandle;
pub use envelope::unwrap_envelope;
pub use types::{Endpoint, EngineEvent, FailureKind, FetchError, RequestId};
