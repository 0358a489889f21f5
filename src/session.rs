//! Dashboard sessions and full reloads.
//!
//! A session is one "page lifetime": the registry as loaded at its start, the
//! client state filled by its fetch pass, and its reload timer. A full reload
//! throws the session away and starts a new one with a higher generation.
//! Fetch outcomes carry the generation that requested them, so late results
//! from a discarded session never reach the new state.

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::feed::FeedSource;
use crate::poll::{FetchOutcome, Poller};
use crate::refresh::ReloadTimer;
use crate::registry::{RegistrySource, SiteRegistry};
use crate::state::{ClientState, MergeOutcome};

/// What happened to a fetch outcome handed to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Merged(MergeOutcome),
    /// Fetch failed; the site stays absent until the next reload.
    Failed,
    /// Outcome belongs to an earlier session.
    Stale,
    /// Document id does not match any registered site.
    Rejected,
}

/// State of a single session.
#[derive(Debug)]
pub struct Session {
    generation: u64,
    registry: SiteRegistry,
    state: ClientState,
    timer: ReloadTimer,
}

impl Session {
    pub fn new(
        generation: u64,
        registry: SiteRegistry,
        started_at: Instant,
        reload_after: Duration,
    ) -> Self {
        Self {
            generation,
            state: ClientState::new(&registry),
            registry,
            timer: ReloadTimer::new(started_at, reload_after),
        }
    }

    /// Applies one fetch outcome.
    ///
    /// Failures are dropped without retry. A successful document is merged
    /// under the id of the site that was requested.
    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        if outcome.generation != self.generation {
            debug!(
                site = %outcome.site_id,
                outcome_generation = outcome.generation,
                generation = self.generation,
                "dropping outcome from previous session"
            );
            return Applied::Stale;
        }
        let mut data = match outcome.result {
            Ok(data) => data,
            Err(_) => return Applied::Failed,
        };
        debug!(
            site = %outcome.site_id,
            generation = self.generation,
            fetch_ms = outcome.elapsed.as_millis() as u64,
            "applying fetched document"
        );
        if data.id != outcome.site_id {
            debug!(
                site = %outcome.site_id,
                document_id = %data.id,
                "document id differs from requested site, keying by site"
            );
            data.id = outcome.site_id;
        }
        match self.state.merge(data) {
            Ok(merged) => Applied::Merged(merged),
            Err(e) => {
                warn!(error = %e, "rejected fetch result");
                Applied::Rejected
            }
        }
    }

    /// Polls the reload timer. `true` at most once per session.
    pub fn reload_due(&mut self, now: Instant) -> bool {
        self.timer.poll(now)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Time left before the scheduled reload, `None` if none is scheduled.
    pub fn reload_in(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }
}

/// Owns the current session and restarts it on reload.
///
/// `E` is the event type of the loop that consumes fetch outcomes; the TUI
/// uses its own event enum, tests and the one-shot mode use `FetchOutcome`
/// directly.
pub struct Dashboard<E> {
    registry_source: RegistrySource,
    feed: Arc<dyn FeedSource>,
    reload_after: Duration,
    sink: Sender<E>,
    session: Session,
}

impl<E> Dashboard<E>
where
    E: From<FetchOutcome> + Send + 'static,
{
    /// Starts the first session and its fetch pass.
    pub fn start(
        registry: SiteRegistry,
        registry_source: RegistrySource,
        feed: Arc<dyn FeedSource>,
        reload_after: Duration,
        sink: Sender<E>,
        now: Instant,
    ) -> Self {
        let session = Session::new(1, registry, now, reload_after);
        let dashboard = Self {
            registry_source,
            feed,
            reload_after,
            sink,
            session,
        };
        dashboard.fetch_all();
        dashboard
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Hands a fetch outcome to the current session.
    pub fn handle_outcome(&mut self, outcome: FetchOutcome) -> Applied {
        self.session.apply(outcome)
    }

    /// Performs the scheduled reload if it is due. Returns `true` if it ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.session.reload_due(now) {
            return false;
        }
        info!(
            generation = self.session.generation(),
            "scheduled reload"
        );
        self.reload(now);
        true
    }

    /// Discards the current session and starts a new one.
    ///
    /// The registry is re-read from its source. If that fails the previous
    /// registry is kept so the dashboard keeps working.
    pub fn reload(&mut self, now: Instant) {
        let registry = match self.registry_source.load() {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, "failed to reload site list, keeping previous");
                self.session.registry().clone()
            }
        };
        let generation = self.session.generation() + 1;
        self.session = Session::new(generation, registry, now, self.reload_after);
        self.fetch_all();
    }

    fn fetch_all(&self) {
        let started = Poller::start(
            self.session.registry(),
            Arc::clone(&self.feed),
            self.session.generation(),
            self.sink.clone(),
        );
        info!(
            generation = self.session.generation(),
            sites = started,
            feed = %self.feed.describe(),
            "fetch pass started"
        );
    }
}
