use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, TryRecvError};

use crate::candidate::ProjectCandidate;
use crate::error::ScanError;
use crate::strategy::StrategyRegistry;

use super::event::{ScanEvent, ScanSummary};
use super::options::ScanOptions;
use super::token::CancellationToken;
use super::walker::Walker;

/// One traversal run: owns the consumer end of the progress channel and the
/// cancellation flag.
///
/// A session cannot be restarted; start a new one instead. Dropping it
/// cancels the walk.
pub struct ScanSession {
    root: PathBuf,
    rx: Receiver<ScanEvent>,
    token: CancellationToken,
    abort: CancellationToken,
    handle: Option<JoinHandle<()>>,
    finished: bool,
}

impl ScanSession {
    /// Validate `root` and start walking it in the background.
    ///
    /// Fails before any worker starts if the root does not exist or is not
    /// a directory.
    pub fn start(
        root: &Path,
        registry: Arc<StrategyRegistry>,
        options: ScanOptions,
    ) -> Result<Self, ScanError> {
        let root = root.canonicalize().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ScanError::RootNotFound(root.to_path_buf()),
            _ => ScanError::Io {
                path: root.to_path_buf(),
                source: e,
            },
        })?;

        let metadata = fs::metadata(&root).map_err(|e| ScanError::Io {
            path: root.clone(),
            source: e,
        })?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(root));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.threads)
            .thread_name(|i| format!("spektr-scan-{}", i))
            .build()
            .map_err(|e| ScanError::ThreadPool(e.to_string()))?;

        let (tx, rx) = bounded(options.channel_capacity.max(1));
        let token = CancellationToken::new();
        let abort = CancellationToken::new();

        tracing::info!(root = %root.display(), threads = pool.current_num_threads(), "Starting scan");

        let worker_token = token.clone();
        let worker_abort = abort.clone();
        let worker_root = root.clone();
        let handle = thread::Builder::new()
            .name("spektr-scan".to_string())
            .spawn(move || {
                let walker = Walker::new(&registry, &options, tx, worker_token, worker_abort);
                let summary = walker.run(&pool, worker_root);
                tracing::info!(
                    directories = summary.directories,
                    errors = summary.errors,
                    cancelled = summary.cancelled,
                    "Scan finished"
                );
            })
            .map_err(|e| ScanError::Io {
                path: root.clone(),
                source: e,
            })?;

        Ok(Self {
            root,
            rx,
            token,
            abort,
            handle: Some(handle),
            finished: false,
        })
    }

    /// Canonical scan root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Ask the workers to stop discovering. Candidates not yet received are
    /// discarded from here on. Sizing of candidates already received runs to
    /// completion, and `ScanComplete` still arrives after it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Stop everything, in-flight sizing included.
    pub fn abort(&self) {
        self.token.cancel();
        self.abort.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// True once `ScanComplete` has been received or the workers are gone.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Block for the next event. `None` once the session is over.
    pub fn recv(&mut self) -> Option<ScanEvent> {
        while !self.finished {
            match self.rx.recv() {
                Ok(event) => {
                    if let Some(event) = self.accept(event) {
                        return Some(event);
                    }
                }
                Err(_) => self.finish(),
            }
        }
        None
    }

    /// Take every event available right now without blocking.
    pub fn drain(&mut self) -> Vec<ScanEvent> {
        let mut events = Vec::new();
        while !self.finished {
            match self.rx.try_recv() {
                Ok(event) => events.extend(self.accept(event)),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.finish(),
            }
        }
        events
    }

    /// Consume the session as a stream of fully sized candidates.
    pub fn candidates(self) -> Candidates {
        Candidates {
            session: self,
            pending: HashMap::new(),
            errors: Vec::new(),
            summary: None,
        }
    }

    fn accept(&mut self, event: ScanEvent) -> Option<ScanEvent> {
        match event {
            ScanEvent::CandidateDiscovered(_) if self.token.is_cancelled() => None,
            ScanEvent::ScanComplete(_) => {
                self.finish();
                Some(event)
            }
            event => Some(event),
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Iterator for ScanSession {
    type Item = ScanEvent;

    fn next(&mut self) -> Option<ScanEvent> {
        self.recv()
    }
}

impl Drop for ScanSession {
    fn drop(&mut self) {
        // Dropping the receiver right after wakes any worker blocked on send.
        self.abort();
    }
}

/// Iterator over candidates whose size is known, in sizing order.
pub struct Candidates {
    session: ScanSession,
    pending: HashMap<PathBuf, ProjectCandidate>,
    errors: Vec<(PathBuf, String)>,
    summary: Option<ScanSummary>,
}

impl Candidates {
    /// Directories skipped so far, with the reason.
    pub fn errors(&self) -> &[(PathBuf, String)] {
        &self.errors
    }

    /// Available once the iterator is exhausted.
    pub fn summary(&self) -> Option<ScanSummary> {
        self.summary
    }

    pub fn root(&self) -> &Path {
        self.session.root()
    }
}

impl Iterator for Candidates {
    type Item = ProjectCandidate;

    fn next(&mut self) -> Option<ProjectCandidate> {
        while let Some(event) = self.session.recv() {
            match event {
                ScanEvent::CandidateDiscovered(candidate) => {
                    self.pending.insert(candidate.path.clone(), candidate);
                }
                ScanEvent::CandidateSized { path, bytes } => {
                    if let Some(candidate) = self.pending.remove(&path) {
                        return Some(candidate.with_size(bytes));
                    }
                }
                ScanEvent::DirectoryError { path, reason } => {
                    self.errors.push((path, reason));
                }
                ScanEvent::ScanComplete(summary) => {
                    self.summary = Some(summary);
                }
            }
        }
        None
    }
}
