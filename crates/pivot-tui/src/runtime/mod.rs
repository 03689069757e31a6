//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! The runtime uses an "inbox" pattern for async event collection:
//! - Handlers send `UiEvent`s directly to `inbox_tx`
//! - Runtime drains `inbox_rx` each frame to collect results
//! - This eliminates per-operation receivers and simplifies event collection
//!
//! Structure:
//! - `mod.rs`: Core runtime (TuiRuntime, event loop, effect dispatch)
//! - `handlers.rs`: Effect handler implementations (backend calls, file I/O)

mod handlers;

use std::future::Future;
use std::io::Stdout;

use anyhow::{Context, Result};
use crossterm::event;
use pivot_core::api::CareerApi;
use pivot_core::config::Config;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Sender half of the inbox; handlers push their results here.
type UiEventSender = mpsc::UnboundedSender<UiEvent>;
/// Receiver half of the inbox; drained by the runtime each frame.
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Target frame rate while tasks run (60fps = ~16ms per frame).
pub const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(16);

/// Poll duration when idle (no task running, no recent input).
/// Longer timeout reduces CPU usage when nothing is happening.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is guaranteed to be restored on drop or panic.
pub struct TuiRuntime {
    /// Terminal instance.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state.
    pub state: AppState,
    /// Backend client, cloned into each spawned handler.
    api: CareerApi,
    /// Inbox sender - handlers send events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - runtime drains this each frame.
    inbox_rx: UiEventReceiver,
    /// Last time a Tick event was emitted.
    last_tick: std::time::Instant,
    /// Last time a terminal event was received (for fast tick during interaction).
    last_terminal_event: std::time::Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime.
    pub fn new(config: Config) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();

        // Enter alternate screen and raw mode
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let api = CareerApi::from_config(&config);
        let state = AppState::new(config);

        // Create inbox channel for async event collection
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = std::time::Instant::now();
        Ok(Self {
            terminal,
            state,
            api,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop.
    pub fn run(&mut self) -> Result<()> {
        // Kick off the startup careers load before the first frame
        self.dispatch_event(UiEvent::Init);
        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            // Collect events from terminal and inbox
            let mut events = self.collect_events()?;

            // Prepend Frame event with current terminal size
            // This ensures size-dependent behavior (sidebar collapse) sees the
            // current dimensions before other events are processed
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            // Process each event through the reducer
            for event in events {
                // Track terminal activity for fast tick mode
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = std::time::Instant::now();
                }

                // Only Tick triggers render - this caps frame rate at tick cadence
                // Terminal events update state but batch renders to next Tick
                let marks_dirty = matches!(&event, UiEvent::Tick);

                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            // Only render if something changed
            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects events from all sources (terminal, inbox).
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Determine tick interval based on activity level.
        // Use fast polling (60fps) when a backend task is in flight (spinner
        // animation) or there was recent terminal activity (typing, scrolling).
        // Otherwise use slow polling to save CPU.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.tasks.is_any_running() || recent_terminal_activity;

        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Drain inbox - all async results arrive here
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Calculate time until next tick for poll duration.
        // This ensures we wake up exactly when Tick is due.
        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());

        // Poll terminal events:
        // - If we already have events to process, do non-blocking poll (don't delay rendering)
        // - Otherwise, block until next tick is due (keeps input responsive while hitting tick cadence)
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(std::time::Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        // Emit Tick after poll - we've now waited until the tick interval elapsed
        // (or woke early due to terminal input, in which case we check again)
        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = std::time::Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    /// Executes effects returned by the reducer.
    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        if !effects.is_empty() {
            self.execute_effects(effects);
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted lifecycle.
    ///
    /// Handlers are pure async functions that return the result `UiEvent`;
    /// the runtime wraps it in the completion envelope so the reducer can
    /// drop results from superseded submissions.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let started = TaskStarted { id };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let inner = f().await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    /// Executes a single effect by dispatching to the appropriate handler.
    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }

            UiEffect::LoadCareers { task } => {
                let api = self.api.clone();
                self.spawn_task(TaskKind::Careers, task, move || handlers::load_careers(api));
            }

            UiEffect::Generate {
                task,
                kind,
                category,
                subcareer,
            } => {
                let api = self.api.clone();
                self.spawn_task(kind.into(), task, move || {
                    handlers::generate(api, kind, category, subcareer)
                });
            }

            UiEffect::AnalyzeResume {
                task,
                target_role,
                resume_text,
                file_path,
            } => {
                let api = self.api.clone();
                self.spawn_task(TaskKind::Resume, task, move || {
                    handlers::analyze_resume(api, target_role, resume_text, file_path)
                });
            }

            UiEffect::SendChat {
                task,
                message,
                history,
            } => {
                let api = self.api.clone();
                self.spawn_task(TaskKind::Chat, task, move || {
                    handlers::send_chat(api, message, history)
                });
            }

            UiEffect::SearchJobs { task, role } => {
                let api = self.api.clone();
                self.spawn_task(TaskKind::Jobs, task, move || {
                    handlers::search_jobs(api, role)
                });
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
