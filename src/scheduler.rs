//! # Command Scheduler
//!
//! Runs one remote call per `Command` on the tokio runtime and feeds the
//! result back into the event loop as exactly one `Action::Completed`.
//!
//! There is no retry, no internal timeout (the HTTP client carries its own
//! deadline) and no cancellation: once scheduled, a command always reports.

use std::sync::Arc;
use std::sync::mpsc;

use log::{info, warn};

use crate::api::{ApiError, HttpTraceService, TraceService};
use crate::core::action::{Action, Command, Completion, Payload};
use crate::core::config::ResolvedConfig;
use crate::core::query::QueryContext;

pub struct Scheduler {
    service: Arc<dyn TraceService>,
    tx: mpsc::Sender<Action>,
}

impl Scheduler {
    /// Builds the HTTP service from the resolved configuration.
    pub fn new(config: &ResolvedConfig, tx: mpsc::Sender<Action>) -> Result<Self, ApiError> {
        let service = HttpTraceService::new(config.base_url.clone(), config.timeout)?;
        info!("Trace service at {}", service.base_url());
        Ok(Self::with_service(Arc::new(service), tx))
    }

    pub fn with_service(service: Arc<dyn TraceService>, tx: mpsc::Sender<Action>) -> Self {
        Self { service, tx }
    }

    /// Spawns the command. Must be called from within a tokio runtime.
    pub fn schedule(&self, command: Command) -> tokio::task::JoinHandle<()> {
        info!("Spawning {:?} command", command.query.kind());
        let service = self.service.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let completion = execute(service.as_ref(), command).await;
            if tx.send(Action::Completed(completion)).is_err() {
                warn!("Failed to deliver completion: receiver dropped");
            }
        })
    }
}

/// Performs the remote call a command describes.
pub async fn execute(service: &dyn TraceService, command: Command) -> Completion {
    let Command { query, token } = command;

    let outcome = match &query {
        QueryContext::Name { term, page } => service
            .search_by_name(&token, term, *page)
            .await
            .map(|res| Payload::Names {
                records: res.data,
                account: res.user,
            }),
        QueryContext::Id { id } => service
            .lookup_by_id(&token, *id)
            .await
            .map(|res| Payload::Details {
                records: res.data,
                account: res.user,
            }),
        QueryContext::IdentityNumber { number } => service
            .lookup_by_identity_number(&token, number)
            .await
            .map(|res| Payload::Details {
                records: res.data,
                account: res.user,
            }),
        QueryContext::Relations { id, offset } => service
            .fetch_relations(&token, *id, *offset)
            .await
            .map(|res| Payload::Relations {
                records: res.data,
                relation: res.relationships,
                account: res.user,
            }),
        QueryContext::History { page } => service
            .fetch_history(&token, *page)
            .await
            .map(|res| Payload::History { entries: res.data }),
    };

    Completion { query, outcome }
}
