//! Application state for the TUI: the console state machine plus the
//! scan session and deletion worker it drives.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::console::{ConsoleEvent, ConsoleState, Request, SortMode};
use crate::delete::{DeletionExecutor, DeletionOutcome};
use crate::error::ScanError;
use crate::scan::{ScanEvent, ScanOptions, ScanSession, ScanSummary};
use crate::strategy::StrategyRegistry;

use super::event::{KeyAction, Mode};

/// Everything the console loop owns.
///
/// The loop is the only consumer of both the scan channel and the deletion
/// channel, so `ConsoleState` never needs locking.
pub struct App {
    pub state: ConsoleState,
    registry: Arc<StrategyRegistry>,
    options: ScanOptions,
    session: Option<ScanSession>,
    executor: DeletionExecutor,
    workers: Vec<JoinHandle<()>>,
    outcomes_tx: Sender<DeletionOutcome>,
    outcomes_rx: Receiver<DeletionOutcome>,
    pub show_help: bool,
    needs_render: bool,
}

impl App {
    /// Start scanning `root` and build the console around it.
    pub fn new(
        root: &Path,
        registry: Arc<StrategyRegistry>,
        options: ScanOptions,
        executor: DeletionExecutor,
        sort: SortMode,
        page_size: usize,
    ) -> Result<Self, ScanError> {
        let session = ScanSession::start(root, Arc::clone(&registry), options.clone())?;
        let names = registry.names().into_iter().map(String::from).collect();
        let state = ConsoleState::new(session.root().to_path_buf(), names, sort, page_size);
        let (outcomes_tx, outcomes_rx) = unbounded();

        Ok(Self {
            state,
            registry,
            options,
            session: Some(session),
            executor,
            workers: Vec::new(),
            outcomes_tx,
            outcomes_rx,
            show_help: false,
            needs_render: true,
        })
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub fn mode(&self) -> Mode {
        if self.state.is_confirming() {
            Mode::Confirm
        } else if self.show_help {
            Mode::Help
        } else {
            Mode::Normal
        }
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// True once since the last call if anything asked for a redraw.
    pub fn take_render(&mut self) -> bool {
        std::mem::take(&mut self.needs_render)
    }

    pub fn handle_key(&mut self, action: KeyAction) {
        match action {
            KeyAction::ToggleHelp => {
                self.show_help = !self.show_help;
                self.needs_render = true;
            }
            KeyAction::Console(event) => self.dispatch(event),
        }
    }

    /// Feed everything waiting on the scan and deletion channels.
    pub fn pump(&mut self) {
        let scan_events = match self.session.as_mut() {
            Some(session) => session.drain(),
            None => Vec::new(),
        };
        for event in scan_events {
            self.dispatch(ConsoleEvent::Scan(event));
        }

        let outcomes: Vec<DeletionOutcome> = self.outcomes_rx.try_iter().collect();
        for outcome in outcomes {
            self.dispatch(ConsoleEvent::Deletion(outcome));
        }
    }

    /// Deletion batches still running.
    pub fn pending_deletions(&self) -> usize {
        self.workers.iter().filter(|h| !h.is_finished()).count()
    }

    /// Wait for every deletion batch to end and apply its outcomes.
    ///
    /// Call once the loop is over; a batch is never cut off mid-target.
    pub fn finish(&mut self) {
        self.session = None;

        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                tracing::warn!("Deletion thread panicked");
            }
        }
        self.pump();
    }

    /// Run one event and every request it leads to.
    pub fn dispatch(&mut self, event: ConsoleEvent) {
        let mut queue: VecDeque<ConsoleEvent> = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            for request in self.state.update(event) {
                queue.extend(self.perform(request));
            }
        }
    }

    fn perform(&mut self, request: Request) -> Option<ConsoleEvent> {
        match request {
            Request::Render => {
                self.needs_render = true;
                None
            }
            Request::Delete(items) => {
                tracing::info!(count = items.len(), "Deleting confirmed projects");
                self.workers.retain(|h| !h.is_finished());
                match self
                    .executor
                    .delete_in_background(items.clone(), self.outcomes_tx.clone())
                {
                    Ok(handle) => self.workers.push(handle),
                    Err(err) => {
                        tracing::warn!(error = %err, "Could not start deletion thread, deleting inline");
                        for outcome in self.executor.delete(&items) {
                            let _ = self.outcomes_tx.send(outcome);
                        }
                    }
                }
                None
            }
            Request::CancelScan => {
                if let Some(session) = &self.session {
                    session.cancel();
                }
                None
            }
            Request::Rescan => {
                // Dropping the old session cancels it; its queued events go with it
                self.session = None;
                match ScanSession::start(
                    self.state.root(),
                    Arc::clone(&self.registry),
                    self.options.clone(),
                ) {
                    Ok(session) => {
                        self.session = Some(session);
                        None
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "Rescan failed to start");
                        Some(ConsoleEvent::Scan(ScanEvent::ScanComplete(ScanSummary {
                            cancelled: true,
                            ..ScanSummary::default()
                        })))
                    }
                }
            }
            Request::Quit => {
                // Dropping the session stops sizing as well
                self.session = None;
                None
            }
        }
    }
}
