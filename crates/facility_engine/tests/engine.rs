use std::sync::{Arc, Mutex};
use std::time::Duration;

use facility_engine::{CatalogClient, Endpoint, EngineEvent, EngineHandle, FetchError};
use serde_json::{json, Value};

/// Answers from memory; endpoints without an entry fail.
struct CannedClient {
    answers: Vec<(Endpoint, Vec<Value>, Duration)>,
    seen: Arc<Mutex<Vec<Endpoint>>>,
}

#[async_trait::async_trait]
impl CatalogClient for CannedClient {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Vec<Value>, FetchError> {
        self.seen.lock().unwrap().push(endpoint.clone());
        let answer = self
            .answers
            .iter()
            .find(|(candidate, _, _)| candidate == endpoint);
        match answer {
            Some((_, records, delay)) => {
                tokio::time::sleep(*delay).await;
                Ok(records.clone())
            }
            None => Err(unreachable_error()),
        }
    }
}

fn unreachable_error() -> FetchError {
    facility_engine::ReqwestCatalogClient::new(facility_engine::CatalogSettings {
        api_base: "ftp://nowhere".to_string(),
        ..Default::default()
    })
    .unwrap_err()
}

fn collect(engine: &EngineHandle, count: usize) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    while events.len() < count {
        match engine.recv_timeout(Duration::from_secs(5)) {
            Some(event) => events.push(event),
            None => break,
        }
    }
    events
}

#[test]
fn completions_carry_request_id_and_records() {
    let client = CannedClient {
        answers: vec![(
            Endpoint::Categories,
            vec![json!({ "id": 1, "name": "Hospitals" })],
            Duration::ZERO,
        )],
        seen: Arc::default(),
    };
    let engine = EngineHandle::with_client(Arc::new(client));

    engine.enqueue(9, Endpoint::Categories);

    let events = collect(&engine, 1);
    assert_eq!(
        events,
        vec![EngineEvent::FetchCompleted {
            request_id: 9,
            endpoint: Endpoint::Categories,
            records: vec![json!({ "id": 1, "name": "Hospitals" })],
        }]
    );
}

#[test]
fn failures_complete_with_no_records() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let client = CannedClient {
        answers: Vec::new(),
        seen: seen.clone(),
    };
    let engine = EngineHandle::with_client(Arc::new(client));
    let endpoint = Endpoint::SubCategories {
        category_id: "3".to_string(),
    };

    engine.enqueue(1, endpoint.clone());

    let events = collect(&engine, 1);
    assert_eq!(
        events,
        vec![EngineEvent::FetchCompleted {
            request_id: 1,
            endpoint: endpoint.clone(),
            records: Vec::new(),
        }]
    );
    assert_eq!(*seen.lock().unwrap(), vec![endpoint]);
}

#[test]
fn requests_complete_in_completion_order() {
    let slow = Endpoint::Providers {
        category_id: "3".to_string(),
        sub_category_id: None,
    };
    let fast = Endpoint::Providers {
        category_id: "3".to_string(),
        sub_category_id: Some("7".to_string()),
    };
    let client = CannedClient {
        answers: vec![
            (slow.clone(), vec![json!({ "id": 1 })], Duration::from_millis(300)),
            (fast.clone(), vec![json!({ "id": 2 })], Duration::ZERO),
        ],
        seen: Arc::default(),
    };
    let engine = EngineHandle::with_client(Arc::new(client));

    engine.enqueue(1, slow);
    engine.enqueue(2, fast);

    let ids: Vec<u64> = collect(&engine, 2)
        .into_iter()
        .map(|event| match event {
            EngineEvent::FetchCompleted { request_id, .. } => request_id,
        })
        .collect();
    assert_eq!(ids, vec![2, 1]);
}

#[test]
fn idle_engine_has_nothing_to_report() {
    let client = CannedClient {
        answers: Vec::new(),
        seen: Arc::default(),
    };
    let engine = EngineHandle::with_client(Arc::new(client));
    assert!(engine.recv_timeout(Duration::from_millis(20)).is_none());
}
