use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use facility_logging::{facility_debug, facility_error};

use crate::client::{fetch_or_empty, CatalogClient, CatalogSettings, ReqwestCatalogClient};
use crate::{Endpoint, EngineEvent, FetchError, RequestId};

enum EngineCommand {
    Fetch {
        request_id: RequestId,
        endpoint: Endpoint,
    },
}

/// Runs catalog fetches on a background runtime.
///
/// Requests are fire-and-forget: each one completes independently and its
/// result is delivered as an [`EngineEvent`] in completion order. There is no
/// cancellation and no ordering between requests.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: CatalogSettings) -> Result<Self, FetchError> {
        let client = ReqwestCatalogClient::new(settings)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    pub fn with_client(client: Arc<dyn CatalogClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    facility_error!("Failed to start fetch runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, event_tx).await;
                });
            }
            facility_debug!("Engine command channel closed");
        });

        Self { cmd_tx, event_rx }
    }

    pub fn enqueue(&self, request_id: RequestId, endpoint: Endpoint) {
        if self
            .cmd_tx
            .send(EngineCommand::Fetch {
                request_id,
                endpoint,
            })
            .is_err()
        {
            facility_error!("Engine is not running; request {} dropped", request_id);
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    client: &dyn CatalogClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Fetch {
            request_id,
            endpoint,
        } => {
            let records = fetch_or_empty(client, &endpoint).await;
            let _ = event_tx.send(EngineEvent::FetchCompleted {
                request_id,
                endpoint,
                records,
            });
        }
    }
}
