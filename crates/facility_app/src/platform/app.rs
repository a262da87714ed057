use std::collections::VecDeque;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Context;
use chrono::Utc;
use facility_core::{update, AppState, DirectoryViewModel, EntityId, Msg};
use facility_engine::EngineHandle;
use facility_logging::{facility_info, facility_warn};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging;
use super::ui;

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    logging::initialize(config.log_destination, config.log_level()?);
    facility_info!("Browsing catalog at {}", config.api_base);

    let engine =
        EngineHandle::new(config.catalog_settings()).context("failed to start catalog client")?;
    let state = AppState::with_api_base(config.api_base.clone()).with_policy(config.stale_policy());
    let steering = Steering {
        category: config.preferred_category(),
        subcategory: config.preferred_subcategory(),
    };

    let mut session = Session::new(state, EffectRunner::new(engine), steering);
    let view = session.settle(config.settle_timeout());

    let mut out = io::stdout().lock();
    for line in ui::render::render(&view, Utc::now()) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Selections to apply once the automatic cascade has settled.
#[derive(Debug, Default)]
struct Steering {
    category: Option<EntityId>,
    /// `Some(None)` steers to the "All" chip.
    subcategory: Option<Option<EntityId>>,
}

impl Steering {
    /// Next selection to make, if any. Each preference is used at most once.
    fn next(&mut self, state: &AppState) -> Option<Msg> {
        if let Some(wanted) = self.category.take() {
            if state.selection().active_category() != Some(&wanted) {
                if state.categories().iter().any(|category| category.id == wanted) {
                    return Some(Msg::CategorySelected(wanted));
                }
                facility_warn!("Configured category {} is not in the catalog", wanted);
                self.subcategory = None;
                return None;
            }
        }
        let wanted = self.subcategory.take()?;
        state.selection().active_category()?;
        if state.selection().active_subcategory() == wanted.as_ref() {
            return None;
        }
        Some(Msg::SubCategorySelected(wanted))
    }
}

/// Single-threaded message loop: core updates, effects out, completions in.
struct Session {
    state: AppState,
    runner: EffectRunner,
    inbox: VecDeque<Msg>,
    steering: Steering,
}

impl Session {
    fn new(state: AppState, runner: EffectRunner, steering: Steering) -> Self {
        Self {
            state,
            runner,
            inbox: VecDeque::new(),
            steering,
        }
    }

    /// Runs from `Started` until no fetch is outstanding and no steering is
    /// left, or until `timeout` elapses, and returns the resulting view.
    ///
    /// Steering waits for quiescence so that its provider fetch is the only
    /// one in flight and cannot be overwritten by the automatic one.
    fn settle(&mut self, timeout: Duration) -> DirectoryViewModel {
        let deadline = Instant::now() + timeout;
        self.inbox.push_back(Msg::Started);

        loop {
            while let Some(msg) = self.inbox.pop_front() {
                self.dispatch(msg);
            }

            if self.runner.is_idle() {
                match self.steering.next(&self.state) {
                    Some(msg) => {
                        self.inbox.push_back(msg);
                        continue;
                    }
                    None => break,
                }
            }

            let now = Instant::now();
            if now >= deadline {
                facility_warn!(
                    "Stopped waiting with {} fetches outstanding",
                    self.runner.pending_count()
                );
                break;
            }
            if let Some(msg) = self.runner.next_message(deadline - now) {
                self.inbox.push_back(msg);
            }
        }

        self.state.view()
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }
}
