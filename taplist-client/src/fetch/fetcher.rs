//! Fetch orchestrator

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use super::{Debouncer, FetchOptions, FetchState};
use crate::error::{FetchError, FetchResult};
use crate::query::SEARCH_PARAM;
use crate::transport::Transport;

/// Stateful async fetch keyed on a URL.
///
/// One fetcher owns one request slot: pointing it at a new URL supersedes
/// the previous cycle, search-bearing URLs are debounced, and a completion
/// may only write state while its cycle is still the current one. Clones
/// share the same slot.
pub struct Fetcher<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Fetcher<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

struct Shared<T> {
    transport: Arc<dyn Transport>,
    headers: BTreeMap<String, String>,
    state: watch::Sender<FetchState<T>>,
    debouncer: Debouncer,
    cycle: Mutex<Cycle>,
}

/// Current cycle; the generation stamps every in-flight attempt
struct Cycle {
    url: String,
    generation: u64,
}

fn is_search_url(url: &str) -> bool {
    url.contains(SEARCH_PARAM)
}

impl<T> Fetcher<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Create a fetcher and start the first cycle for `url`.
    ///
    /// Spawns onto the ambient Tokio runtime.
    pub fn new(
        transport: Arc<dyn Transport>,
        url: impl Into<String>,
        options: FetchOptions,
    ) -> Self {
        let (state, _) = watch::channel(FetchState::pending());
        let fetcher = Self {
            shared: Arc::new(Shared {
                transport,
                headers: options.headers,
                state,
                debouncer: Debouncer::new(options.debounce),
                cycle: Mutex::new(Cycle {
                    url: String::new(),
                    generation: 0,
                }),
            }),
        };
        fetcher.set_url(url);
        fetcher
    }

    /// Point the fetcher at a URL, starting a new cycle when it changed.
    ///
    /// An unchanged URL is a no-op. Otherwise the previous cycle is
    /// superseded: a pending debounce timer is rearmed or cancelled, and a
    /// late completion of an in-flight request is discarded.
    pub fn set_url(&self, url: impl Into<String>) {
        let url = url.into();
        let generation = {
            let mut cycle = self.shared.cycle.lock().unwrap();
            if cycle.url == url {
                return;
            }
            cycle.url = url.clone();
            cycle.generation += 1;
            // The reset shares the bump's lock acquisition; a racing
            // set_url on a clone could otherwise strand a stale reset
            // on top of a newer settled cycle.
            self.shared.state.send_modify(|state| state.reset());
            cycle.generation
        };
        tracing::debug!(%url, generation, "fetch cycle started");

        let shared = self.shared.clone();
        if is_search_url(&url) {
            self.shared
                .debouncer
                .trigger(async move { Shared::run(shared, generation, url).await });
        } else {
            self.shared.debouncer.cancel();
            tokio::spawn(Shared::run(shared, generation, url));
        }
    }

    /// Latest published state
    pub fn state(&self) -> FetchState<T> {
        self.shared.state.borrow().clone()
    }

    /// Subscribe to state publications
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.shared.state.subscribe()
    }

    /// URL of the current cycle
    pub fn url(&self) -> String {
        self.shared.cycle.lock().unwrap().url.clone()
    }
}

impl<T> Shared<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    async fn run(shared: Arc<Self>, generation: u64, url: String) {
        let outcome = shared.exchange(&url).await;

        // Generation check and state write happen under one lock
        // acquisition so a concurrent set_url cannot slip between them.
        let cycle = shared.cycle.lock().unwrap();
        if cycle.generation != generation {
            tracing::debug!(
                %url,
                generation,
                current = cycle.generation,
                "stale cycle discarded"
            );
            return;
        }
        match outcome {
            Ok(data) => shared.state.send_modify(|state| state.settle_ok(data)),
            Err(error) => {
                tracing::warn!(%url, %error, "fetch cycle failed");
                shared.state.send_modify(|state| state.settle_err(error));
            }
        }
    }

    async fn exchange(&self, url: &str) -> FetchResult<T> {
        let response = self
            .transport
            .perform(url, &self.headers)
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        if response.ok {
            serde_json::from_value(response.body).map_err(|e| FetchError::Decode(e.to_string()))
        } else {
            Err(FetchError::Api(response.body))
        }
    }
}
