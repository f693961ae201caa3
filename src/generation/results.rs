use super::{build_request, generate_with_timeout, Generator, OutputKind};
use crate::model::RootConfig;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Default)]
struct ResultTable {
    results: HashMap<OutputKind, String>,
    // Latest ticket handed out per kind; a kind is pending while its latest
    // request has not resolved.
    pending: HashMap<OutputKind, u64>,
    next_ticket: u64,
}

/// Per-kind store of generated text. Requests for different kinds run
/// independently; for a single kind, whichever request resolves last wins.
#[derive(Clone)]
pub struct Generations {
    generator: Arc<dyn Generator>,
    target_platform: String,
    timeout: Duration,
    table: Arc<RwLock<ResultTable>>,
}

impl Generations {
    pub fn new(
        generator: Arc<dyn Generator>,
        target_platform: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            generator,
            target_platform: target_platform.into(),
            timeout,
            table: Arc::new(RwLock::new(ResultTable::default())),
        }
    }

    /// Starts generating `kind` from a snapshot of `cfg` and returns at once.
    /// Must be called from within a tokio runtime.
    pub fn request(&self, cfg: &RootConfig, kind: OutputKind) -> JoinHandle<()> {
        let ticket = {
            let mut table = self.table.write();
            table.next_ticket += 1;
            let ticket = table.next_ticket;
            table.pending.insert(kind, ticket);
            ticket
        };

        let snapshot = cfg.clone();
        let generator = Arc::clone(&self.generator);
        let table = Arc::clone(&self.table);
        let target = self.target_platform.clone();
        let timeout = self.timeout;

        tracing::info!(%kind, backend = generator.backend_name(), "Generation requested");

        tokio::spawn(async move {
            let outcome = match build_request(&snapshot, kind, &target) {
                Ok(request) => generate_with_timeout(generator.as_ref(), &request, timeout).await,
                Err(e) => Err(e),
            };
            let text = match outcome {
                Ok(text) => {
                    tracing::info!(%kind, bytes = text.len(), "Generation completed");
                    text
                }
                Err(e) => {
                    tracing::warn!(%kind, "{}", e);
                    e.sentinel().to_string()
                }
            };

            let mut table = table.write();
            table.results.insert(kind, text);
            if table.pending.get(&kind) == Some(&ticket) {
                table.pending.remove(&kind);
            }
        })
    }

    pub fn get(&self, kind: OutputKind) -> Option<String> {
        self.table.read().results.get(&kind).cloned()
    }

    pub fn is_pending(&self, kind: OutputKind) -> bool {
        self.table.read().pending.contains_key(&kind)
    }

    pub fn any_pending(&self) -> bool {
        !self.table.read().pending.is_empty()
    }

    pub fn completed_kinds(&self) -> Vec<OutputKind> {
        let table = self.table.read();
        let mut kinds: Vec<_> = table.results.keys().copied().collect();
        kinds.sort();
        kinds
    }
}
