use crate::candidate::DeletionTarget;
use crate::delete::DeletionOutcome;
use crate::scan::ScanEvent;

/// Everything the console reacts to: user intents plus messages arriving
/// from the scan and deletion channels.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleEvent {
    MoveUp,
    MoveDown,
    ToggleSelection,
    SelectAll,
    CycleFilter,
    CycleSort,
    PageNext,
    PagePrev,
    RequestConfirmation,
    Confirm,
    CancelConfirmation,
    CancelScan,
    Rescan,
    /// Rows available for the candidate list.
    Resize { rows: usize },
    Quit,
    Scan(ScanEvent),
    Deletion(DeletionOutcome),
}

impl ConsoleEvent {
    /// Events accepted while a confirmation is pending.
    pub fn allowed_while_confirming(&self) -> bool {
        matches!(
            self,
            ConsoleEvent::Confirm
                | ConsoleEvent::CancelConfirmation
                | ConsoleEvent::Quit
                | ConsoleEvent::Resize { .. }
                | ConsoleEvent::Scan(_)
                | ConsoleEvent::Deletion(_)
        )
    }
}

impl From<ScanEvent> for ConsoleEvent {
    fn from(event: ScanEvent) -> Self {
        ConsoleEvent::Scan(event)
    }
}

impl From<DeletionOutcome> for ConsoleEvent {
    fn from(outcome: DeletionOutcome) -> Self {
        ConsoleEvent::Deletion(outcome)
    }
}

/// Side effects the console loop performs on behalf of the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Render,
    Delete(Vec<DeletionTarget>),
    CancelScan,
    Rescan,
    Quit,
}
