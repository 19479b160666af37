//! Interactive review of discovered candidates.
//!
//! `ConsoleState` is a plain state machine: user intents and channel
//! messages go in as `ConsoleEvent`s, side effects come out as `Request`s.
//! Nothing in here touches the terminal or the filesystem.

mod event;
mod order;
mod state;
mod view;

pub use event::{ConsoleEvent, Request};
pub use order::{Filter, SortMode};
pub use state::{ConsoleState, PendingConfirmation};
pub use view::{display_size, ConfirmationView, ConsoleView, RowView};
