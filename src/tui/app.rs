//! Main TUI application.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info};

use crate::feed::FeedSource;
use crate::registry::{RegistrySource, SiteRegistry};
use crate::session::{Applied, Dashboard};

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::{RenderContext, loaded_cards, render};
use super::state::AppState;

/// Settings the application is started with.
pub struct AppConfig {
    pub title: String,
    pub registry: SiteRegistry,
    pub registry_source: RegistrySource,
    pub feed: Arc<dyn FeedSource>,
    pub reload_after: Duration,
    pub tick_rate: Duration,
}

/// Main TUI application.
pub struct App {
    config: AppConfig,
    state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            state: AppState::new(),
            should_quit: false,
        }
    }

    /// Runs the TUI application until the user quits.
    pub fn run(mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(self.config.tick_rate);

        // First session: fetches start before the first frame is drawn, the
        // frame itself never waits for them.
        let mut dashboard = Dashboard::start(
            self.config.registry.clone(),
            self.config.registry_source.clone(),
            Arc::clone(&self.config.feed),
            self.config.reload_after,
            events.sender(),
            Instant::now(),
        );
        info!(
            sites = dashboard.session().registry().len(),
            reload_after_secs = self.config.reload_after.as_secs(),
            "dashboard started"
        );

        let result = self.event_loop(&mut terminal, &events, &mut dashboard);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &EventHandler,
        dashboard: &mut Dashboard<Event>,
    ) -> io::Result<()> {
        loop {
            let now = Instant::now();
            let cards = loaded_cards(dashboard.session()).len();
            self.state.clamp(cards);

            let ctx = RenderContext {
                title: &self.config.title,
                now,
                wall_clock: Utc::now(),
                reload_after_secs: self.config.reload_after.as_secs(),
            };
            terminal.draw(|frame| render(frame, &self.state, dashboard.session(), &ctx))?;

            match events.next() {
                Ok(Event::Tick) | Ok(Event::Resize) => {}
                Ok(Event::Fetch(outcome)) => {
                    let site = outcome.site_id.clone();
                    let applied = dashboard.handle_outcome(outcome);
                    debug!(site = %site, ?applied, "fetch outcome applied");
                    if matches!(applied, Applied::Merged(_)) {
                        self.state.status_message = None;
                    }
                }
                Ok(Event::Key(key)) => {
                    let samples: Vec<usize> = loaded_cards(dashboard.session())
                        .iter()
                        .map(|(_, data)| data.checks.len())
                        .collect();
                    match handle_key(&mut self.state, key, &samples) {
                        KeyAction::Quit => self.should_quit = true,
                        KeyAction::Reload => {
                            info!("manual reload");
                            self.reload(dashboard, Instant::now());
                        }
                        KeyAction::None => {}
                    }
                }
                Err(_) => {
                    self.should_quit = true;
                }
            }

            // Checked after every event so a busy channel cannot delay it.
            if dashboard.tick(Instant::now()) {
                self.state = AppState::new();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    fn reload(&mut self, dashboard: &mut Dashboard<Event>, now: Instant) {
        dashboard.reload(now);
        self.state.focused = 0;
        self.state.cursor = None;
    }
}
