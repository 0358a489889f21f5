//! Fetch pass: one independent fetch per registered site.
//!
//! Each site gets its own worker thread which performs exactly one fetch and
//! reports the result on a channel. Workers never wait for one another, so a
//! slow or failing site only delays its own outcome.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::feed::{FeedSource, FetchError};
use crate::model::SiteCheckData;
use crate::registry::SiteRegistry;

/// Result of one site's fetch, stamped with the session that requested it.
#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: u64,
    pub site_id: String,
    pub result: Result<SiteCheckData, FetchError>,
    pub elapsed: Duration,
}

/// Starts fetch passes over a registry.
pub struct Poller;

impl Poller {
    /// Spawns one fetch per site and returns the number of workers started.
    ///
    /// Outcomes are delivered on `sink` in completion order. Sending stops
    /// silently once the receiving side is gone.
    pub fn start<E>(
        registry: &SiteRegistry,
        source: Arc<dyn FeedSource>,
        generation: u64,
        sink: Sender<E>,
    ) -> usize
    where
        E: From<FetchOutcome> + Send + 'static,
    {
        let mut started = 0;
        for site in registry.iter().cloned() {
            let id = site.id.clone();
            let source = Arc::clone(&source);
            let sink = sink.clone();
            let spawned = thread::Builder::new()
                .name(format!("fetch-{}", site.id))
                .spawn(move || {
                    let t0 = Instant::now();
                    let result = source.fetch(&site);
                    let elapsed = t0.elapsed();
                    match &result {
                        Ok(data) => debug!(
                            site = %site.id,
                            generation,
                            samples = data.checks.len(),
                            duration_ms = elapsed.as_millis() as u64,
                            "fetch completed"
                        ),
                        Err(e) => warn!(
                            site = %site.id,
                            generation,
                            error = %e,
                            duration_ms = elapsed.as_millis() as u64,
                            "fetch failed"
                        ),
                    }
                    let _ = sink.send(E::from(FetchOutcome {
                        generation,
                        site_id: site.id,
                        result,
                        elapsed,
                    }));
                });
            match spawned {
                Ok(_) => started += 1,
                Err(e) => warn!(site = %id, error = %e, "failed to spawn fetch worker"),
            }
        }
        started
    }
}

/// Collects up to `expected` outcomes, giving up once `deadline` has passed.
/// A deadline beyond what an instant can hold waits until every sender is gone.
///
/// Used by the one-shot summary mode, which has no event loop of its own.
pub fn collect_outcomes(
    rx: &Receiver<FetchOutcome>,
    expected: usize,
    deadline: Duration,
) -> Vec<FetchOutcome> {
    let until = Instant::now().checked_add(deadline);
    let mut outcomes = Vec::with_capacity(expected);
    while outcomes.len() < expected {
        let received = match until {
            Some(until) => rx.recv_timeout(until.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(outcome) => outcomes.push(outcome),
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    received = outcomes.len(),
                    expected, "gave up waiting for fetch outcomes"
                );
                break;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    outcomes
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory feed for tests.

    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use crate::model::{CheckSample, Site};

    /// Feed returning canned documents; unknown ids fail with HTTP 404.
    #[derive(Default)]
    pub(crate) struct MockFeed {
        docs: Mutex<HashMap<String, SiteCheckData>>,
        delays: HashMap<String, Duration>,
        pub(crate) calls: Mutex<Vec<String>>,
    }

    impl MockFeed {
        pub(crate) fn with_doc(self, data: SiteCheckData) -> Self {
            self.docs
                .lock()
                .unwrap()
                .insert(data.id.clone(), data);
            self
        }

        pub(crate) fn with_delay(mut self, id: &str, delay: Duration) -> Self {
            self.delays.insert(id.to_string(), delay);
            self
        }

        pub(crate) fn set_doc(&self, data: SiteCheckData) {
            self.docs.lock().unwrap().insert(data.id.clone(), data);
        }
    }

    impl FeedSource for MockFeed {
        fn fetch(&self, site: &Site) -> Result<SiteCheckData, FetchError> {
            self.calls.lock().unwrap().push(site.id.clone());
            if let Some(delay) = self.delays.get(&site.id) {
                std::thread::sleep(*delay);
            }
            self.docs
                .lock()
                .unwrap()
                .get(&site.id)
                .cloned()
                .ok_or_else(|| FetchError::Http {
                    url: url::Url::parse(&format!("http://mock/{}.json", site.id)).unwrap(),
                    status: 404,
                })
        }

        fn describe(&self) -> String {
            "mock".to_string()
        }
    }

    pub(crate) fn doc(id: &str, rts: &[f64]) -> SiteCheckData {
        SiteCheckData {
            id: id.to_string(),
            name: id.to_uppercase(),
            url: format!("https://{}.example", id),
            checks: rts
                .iter()
                .enumerate()
                .map(|(i, rt)| CheckSample {
                    t: format!("2024-01-01T00:{:02}:00Z", i * 10),
                    ok: true,
                    code: 200,
                    rt: *rt,
                })
                .collect(),
        }
    }

    pub(crate) fn registry(ids: &[&str]) -> SiteRegistry {
        SiteRegistry::new(
            ids.iter()
                .map(|id| Site {
                    id: id.to_string(),
                    name: id.to_uppercase(),
                    url: format!("https://{}.example", id),
                })
                .collect(),
        )
        .unwrap()
    }
}
