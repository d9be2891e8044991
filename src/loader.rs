//! One-time loading of the scripts the grid library needs.
//!
//! Loads are tracked in a registry keyed by script source. The first request for a source
//! starts the load; every later or concurrent request awaits the same settled outcome, so a
//! script is injected at most once per loader.

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use reqwest::Client;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex as SyncMutex};
use tokio::sync::Mutex;
use tracing::{debug, error, info};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("script '{src}' failed to load: {reason}")]
    Failed { src: String, reason: String },
}

/// The page the component lives in, as far as script injection goes.
#[async_trait]
pub trait ScriptHost: Send + Sync {
    /// Whether a script with exactly this source is already present.
    fn is_loaded(&self, src: &str) -> bool;

    /// Injects the script and resolves once it has finished loading.
    async fn inject(&self, src: &str) -> Result<(), LoadError>;
}

type PendingLoad = Shared<BoxFuture<'static, Result<(), LoadError>>>;

pub struct DependencyLoader {
    host: Arc<dyn ScriptHost>,
    registry: Mutex<HashMap<String, PendingLoad>>,
}

impl DependencyLoader {
    pub fn new(host: Arc<dyn ScriptHost>) -> Self {
        Self {
            host,
            registry: Mutex::new(HashMap::new()),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn ensure_loaded(&self, src: &str) -> Result<(), LoadError> {
        let pending = {
            let mut registry = self.registry.lock().await;

            registry
                .entry(src.to_string())
                .or_insert_with(|| {
                    let host = Arc::clone(&self.host);
                    let src = src.to_string();

                    async move {
                        if host.is_loaded(&src) {
                            debug!("Script already present, not injecting it again");
                            return Ok(());
                        }

                        info!("Injecting script");
                        host.inject(&src).await
                    }
                    .boxed()
                    .shared()
                })
                .clone()
        };

        pending.await
    }

    /// Loads `sources` one after the other, each only once the previous one finished.
    /// Stops at the first failure.
    pub async fn load_chain<I, S>(&self, sources: I) -> Result<(), LoadError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for src in sources {
            if let Err(err) = self.ensure_loaded(src.as_ref()).await {
                error!("Aborting dependency chain: {}", err);
                return Err(err);
            }
        }

        Ok(())
    }

    /// Outcome of a load that has already settled, `None` if never requested or still loading.
    pub async fn settled(&self, src: &str) -> Option<Result<(), LoadError>> {
        self.registry
            .lock()
            .await
            .get(src)
            .and_then(|pending| pending.peek().cloned())
    }
}

/// Host that loads scripts by fetching them from the page's origin.
pub struct HttpScriptHost {
    client: Client,
    origin: Url,
    loaded: SyncMutex<HashSet<String>>,
}

impl HttpScriptHost {
    pub fn new(origin: Url) -> Self {
        Self {
            client: Client::new(),
            origin,
            loaded: SyncMutex::new(HashSet::new()),
        }
    }
}

#[async_trait]
impl ScriptHost for HttpScriptHost {
    fn is_loaded(&self, src: &str) -> bool {
        self.loaded
            .lock()
            .map(|loaded| loaded.contains(src))
            .unwrap_or(false)
    }

    #[tracing::instrument(skip(self))]
    async fn inject(&self, src: &str) -> Result<(), LoadError> {
        let failed = |reason: String| LoadError::Failed {
            src: src.to_string(),
            reason,
        };

        let url = self.origin.join(src).map_err(|e| failed(e.to_string()))?;

        self.client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| failed(e.to_string()))?
            .bytes()
            .await
            .map_err(|e| failed(e.to_string()))?;

        if let Ok(mut loaded) = self.loaded.lock() {
            loaded.insert(src.to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const CORE: &str = "/js/fullcalendar/core/index.global.min.js";
    const DAYGRID: &str = "/js/fullcalendar/daygrid/index.global.min.js";

    #[derive(Default)]
    struct RecordingHost {
        present: Vec<String>,
        failing: Vec<String>,
        injected: SyncMutex<Vec<String>>,
        injections: AtomicUsize,
    }

    #[async_trait]
    impl ScriptHost for RecordingHost {
        fn is_loaded(&self, src: &str) -> bool {
            self.present.iter().any(|present| present == src)
        }

        async fn inject(&self, src: &str) -> Result<(), LoadError> {
            self.injections.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.injected.lock().unwrap().push(src.to_string());

            if self.failing.iter().any(|failing| failing == src) {
                return Err(LoadError::Failed {
                    src: src.to_string(),
                    reason: "404".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test_log::test(tokio::test)]
    async fn concurrent_requests_share_one_injection() {
        let host = Arc::new(RecordingHost::default());
        let loader = DependencyLoader::new(host.clone());

        let (first, second) = tokio::join!(loader.ensure_loaded(CORE), loader.ensure_loaded(CORE));
        let third = loader.ensure_loaded(CORE).await;

        assert_eq!(first, Ok(()));
        assert_eq!(second, Ok(()));
        assert_eq!(third, Ok(()));
        assert_eq!(host.injections.load(Ordering::SeqCst), 1);
        assert_eq!(loader.settled(CORE).await, Some(Ok(())));
    }

    #[test_log::test(tokio::test)]
    async fn when_script_is_already_present_should_not_inject() {
        let host = Arc::new(RecordingHost {
            present: vec![CORE.to_string()],
            ..Default::default()
        });
        let loader = DependencyLoader::new(host.clone());

        assert_eq!(loader.ensure_loaded(CORE).await, Ok(()));
        assert_eq!(host.injections.load(Ordering::SeqCst), 0);
    }

    #[test_log::test(tokio::test)]
    async fn chain_loads_in_order() {
        let host = Arc::new(RecordingHost::default());
        let loader = DependencyLoader::new(host.clone());

        assert_eq!(loader.load_chain([CORE, DAYGRID]).await, Ok(()));
        assert_eq!(*host.injected.lock().unwrap(), vec![CORE, DAYGRID]);
    }

    #[test_log::test(tokio::test)]
    async fn when_a_script_fails_should_abort_the_chain() {
        let host = Arc::new(RecordingHost {
            failing: vec![CORE.to_string()],
            ..Default::default()
        });
        let loader = DependencyLoader::new(host.clone());

        let result = loader.load_chain([CORE, DAYGRID]).await;

        assert!(matches!(result, Err(LoadError::Failed { ref src, .. }) if src == CORE));
        assert_eq!(*host.injected.lock().unwrap(), vec![CORE]);
        assert_eq!(loader.settled(DAYGRID).await, None);
    }

    #[test_log::test(tokio::test)]
    async fn failed_load_is_not_retried() {
        let host = Arc::new(RecordingHost {
            failing: vec![DAYGRID.to_string()],
            ..Default::default()
        });
        let loader = DependencyLoader::new(host.clone());

        assert!(loader.ensure_loaded(DAYGRID).await.is_err());
        assert!(loader.ensure_loaded(DAYGRID).await.is_err());
        assert_eq!(host.injections.load(Ordering::SeqCst), 1);
    }
}
