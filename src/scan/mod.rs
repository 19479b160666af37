//! Concurrent discovery of cleanable projects.
//!
//! A `ScanSession` walks a root on a bounded rayon pool, classifies each
//! directory with the `StrategyRegistry`, stops descending at the first
//! project root, and streams `ScanEvent`s through a bounded channel.
//! Sizing of each candidate runs as its own task so discovery is never
//! held up by large artifact trees.

mod event;
mod options;
mod session;
mod size;
mod token;
mod walker;

pub use event::{ScanEvent, ScanSummary};
pub use options::{ScanOptions, DEFAULT_CHANNEL_CAPACITY, DEFAULT_EXCLUDES};
pub use session::{Candidates, ScanSession};
pub use size::{dir_size, targets_size};
pub use token::CancellationToken;
