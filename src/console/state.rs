use std::path::{Path, PathBuf};

use crate::candidate::{DeletionStatus, DeletionTarget, ProjectCandidate};
use crate::delete::DeletionOutcome;
use crate::scan::ScanEvent;
use crate::strategy::RiskLevel;

use super::event::{ConsoleEvent, Request};
use super::order::{Filter, SortMode};
use super::view::{display_size, ConfirmationView, ConsoleView, RowView};

/// A deletion batch frozen at confirmation time.
///
/// Later selection changes never reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingConfirmation {
    pub items: Vec<DeletionTarget>,
    pub total_bytes: u64,
    pub max_risk: RiskLevel,
}

impl PendingConfirmation {
    fn freeze(items: Vec<DeletionTarget>) -> Option<Self> {
        let max_risk = items.iter().map(|i| i.risk).max()?;
        let total_bytes = items.iter().filter_map(|i| i.size).sum();
        Some(Self {
            items,
            total_bytes,
            max_risk,
        })
    }
}

/// Review console state. All mutation goes through [`ConsoleState::update`].
#[derive(Debug)]
pub struct ConsoleState {
    root: PathBuf,
    candidates: Vec<ProjectCandidate>,
    strategy_names: Vec<String>,
    filter: Filter,
    sort: SortMode,
    page: usize,
    /// Row within the current page.
    cursor: usize,
    page_size: usize,
    pending: Option<PendingConfirmation>,
    scanning: bool,
    /// Set by `CancelScan` until the next rescan; late discoveries are dropped.
    scan_cancelled: bool,
    errors: Vec<(PathBuf, String)>,
    reclaimed_bytes: u64,
    status: Option<String>,
    should_quit: bool,
}

impl ConsoleState {
    /// Fresh state for a scan that has just been started.
    pub fn new(root: PathBuf, strategy_names: Vec<String>, sort: SortMode, page_size: usize) -> Self {
        Self {
            root,
            candidates: Vec::new(),
            strategy_names,
            filter: Filter::All,
            sort,
            page: 0,
            cursor: 0,
            page_size: page_size.max(1),
            pending: None,
            scanning: true,
            scan_cancelled: false,
            errors: Vec::new(),
            reclaimed_bytes: 0,
            status: None,
            should_quit: false,
        }
    }

    /// Apply one event. Rejected events return no requests; every accepted
    /// one asks for a render.
    pub fn update(&mut self, event: ConsoleEvent) -> Vec<Request> {
        if self.pending.is_some() && !event.allowed_while_confirming() {
            return Vec::new();
        }

        let mut requests = match event {
            ConsoleEvent::MoveUp => {
                self.move_up();
                Vec::new()
            }
            ConsoleEvent::MoveDown => {
                self.move_down();
                Vec::new()
            }
            ConsoleEvent::ToggleSelection => {
                self.toggle_focused();
                Vec::new()
            }
            ConsoleEvent::SelectAll => {
                self.toggle_all_visible();
                Vec::new()
            }
            ConsoleEvent::CycleFilter => {
                self.filter = self.filter.next(&self.strategy_names);
                self.page = 0;
                self.cursor = 0;
                Vec::new()
            }
            ConsoleEvent::CycleSort => {
                self.sort = self.sort.next();
                Vec::new()
            }
            ConsoleEvent::PageNext => {
                if self.page + 1 < self.page_count() {
                    self.page += 1;
                }
                Vec::new()
            }
            ConsoleEvent::PagePrev => {
                self.page = self.page.saturating_sub(1);
                Vec::new()
            }
            ConsoleEvent::RequestConfirmation => {
                self.request_confirmation();
                Vec::new()
            }
            ConsoleEvent::Confirm => self.confirm(),
            ConsoleEvent::CancelConfirmation => {
                self.pending = None;
                Vec::new()
            }
            ConsoleEvent::CancelScan => {
                if !self.scanning || self.scan_cancelled {
                    return Vec::new();
                }
                self.scan_cancelled = true;
                self.status = Some("Cancelling scan".to_string());
                vec![Request::CancelScan]
            }
            ConsoleEvent::Rescan => {
                self.reset_for_rescan();
                vec![Request::Rescan]
            }
            ConsoleEvent::Resize { rows } => {
                self.page_size = rows.max(1);
                Vec::new()
            }
            ConsoleEvent::Quit => {
                self.should_quit = true;
                return vec![Request::Quit];
            }
            ConsoleEvent::Scan(event) => {
                if !self.apply_scan_event(event) {
                    return Vec::new();
                }
                Vec::new()
            }
            ConsoleEvent::Deletion(outcome) => {
                if !self.apply_outcome(outcome) {
                    return Vec::new();
                }
                Vec::new()
            }
        };

        self.clamp();
        requests.push(Request::Render);
        requests
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn candidates(&self) -> &[ProjectCandidate] {
        &self.candidates
    }

    pub fn pending(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }

    pub fn is_confirming(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn errors(&self) -> &[(PathBuf, String)] {
        &self.errors
    }

    pub fn reclaimed_bytes(&self) -> u64 {
        self.reclaimed_bytes
    }

    /// Candidate paths in display order, across all pages.
    pub fn visible_paths(&self) -> Vec<&Path> {
        self.visible()
            .into_iter()
            .map(|i| self.candidates[i].path.as_path())
            .collect()
    }

    pub fn focused(&self) -> Option<&ProjectCandidate> {
        self.focused_index().map(|i| &self.candidates[i])
    }

    pub fn page_count(&self) -> usize {
        let total = self.visible().len();
        total.div_ceil(self.page_size).max(1)
    }

    /// Render snapshot of the current page.
    pub fn view(&self) -> ConsoleView {
        let visible = self.visible();
        let rows = self
            .page_slice(&visible)
            .iter()
            .map(|&i| row(&self.candidates[i]))
            .collect();

        let selected: Vec<&ProjectCandidate> =
            self.candidates.iter().filter(|c| c.selected).collect();

        ConsoleView {
            root: self.root.clone(),
            rows,
            cursor: self.cursor,
            page: self.page,
            page_count: self.page_count(),
            visible_count: visible.len(),
            candidate_count: self.candidates.len(),
            selected_count: selected.len(),
            selected_bytes: selected.iter().filter_map(|c| c.size).sum(),
            total_bytes: self.candidates.iter().filter_map(|c| c.size).sum(),
            reclaimed_bytes: self.reclaimed_bytes,
            filter: self.filter.label().to_string(),
            sort: self.sort,
            scanning: self.scanning,
            error_count: self.errors.len(),
            status: self.status.clone(),
            confirmation: self.pending.as_ref().map(|p| ConfirmationView {
                paths: p.items.iter().map(|i| i.root.clone()).collect(),
                total_bytes: p.total_bytes,
                max_risk: p.max_risk,
            }),
        }
    }

    /// Indices into `candidates`, filtered and sorted.
    fn visible(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.candidates.len())
            .filter(|&i| self.filter.matches(&self.candidates[i]))
            .collect();
        indices.sort_by(|&a, &b| self.sort.compare(&self.candidates[a], &self.candidates[b]));
        indices
    }

    fn page_slice<'v>(&self, visible: &'v [usize]) -> &'v [usize] {
        let start = (self.page * self.page_size).min(visible.len());
        let end = (start + self.page_size).min(visible.len());
        &visible[start..end]
    }

    fn page_len(&self) -> usize {
        self.page_slice(&self.visible()).len()
    }

    fn focused_index(&self) -> Option<usize> {
        self.page_slice(&self.visible()).get(self.cursor).copied()
    }

    fn index_of(&self, path: &Path) -> Option<usize> {
        self.candidates.iter().position(|c| c.path == path)
    }

    fn move_down(&mut self) {
        if self.cursor + 1 < self.page_len() {
            self.cursor += 1;
        } else if self.page + 1 < self.page_count() {
            self.page += 1;
            self.cursor = 0;
        }
    }

    fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        } else if self.page > 0 {
            self.page -= 1;
            self.cursor = self.page_size - 1;
        }
    }

    /// Keep page and cursor inside the current list.
    fn clamp(&mut self) {
        self.page = self.page.min(self.page_count() - 1);
        self.cursor = self.cursor.min(self.page_len().saturating_sub(1));
    }

    fn toggle_focused(&mut self) {
        if let Some(i) = self.focused_index() {
            let candidate = &mut self.candidates[i];
            if !candidate.status.is_deleting() {
                candidate.selected = !candidate.selected;
            }
        }
    }

    /// Select every visible candidate, or clear them if all are selected.
    fn toggle_all_visible(&mut self) {
        let visible: Vec<usize> = self
            .visible()
            .into_iter()
            .filter(|&i| !self.candidates[i].status.is_deleting())
            .collect();
        let select = visible.iter().any(|&i| !self.candidates[i].selected);
        for i in visible {
            self.candidates[i].selected = select;
        }
    }

    fn request_confirmation(&mut self) {
        let mut order: Vec<usize> = (0..self.candidates.len()).collect();
        order.sort_by(|&a, &b| self.sort.compare(&self.candidates[a], &self.candidates[b]));

        let mut chosen: Vec<usize> = order
            .into_iter()
            .filter(|&i| self.candidates[i].selected)
            .collect();
        if chosen.is_empty() {
            chosen.extend(self.focused_index());
        }

        let items: Vec<DeletionTarget> = chosen
            .into_iter()
            .map(|i| &self.candidates[i])
            .filter(|c| !c.status.is_deleting())
            .map(ProjectCandidate::deletion_target)
            .collect();

        self.pending = PendingConfirmation::freeze(items);
        if self.pending.is_none() {
            self.status = Some("Nothing to delete".to_string());
        }
    }

    fn confirm(&mut self) -> Vec<Request> {
        let Some(pending) = self.pending.take() else {
            return Vec::new();
        };

        for item in &pending.items {
            if let Some(i) = self.index_of(&item.root) {
                let candidate = &mut self.candidates[i];
                candidate.status = DeletionStatus::Deleting;
                candidate.selected = false;
            }
        }

        self.status = Some(format!(
            "Deleting {} project(s), {}",
            pending.items.len(),
            display_size(Some(pending.total_bytes))
        ));
        vec![Request::Delete(pending.items)]
    }

    fn reset_for_rescan(&mut self) {
        // In-flight deletions still report back by path
        self.candidates.retain(|c| c.status.is_deleting());
        self.errors.clear();
        self.scanning = true;
        self.scan_cancelled = false;
        self.page = 0;
        self.cursor = 0;
        self.status = Some("Rescanning".to_string());
    }

    /// Returns false if the event changed nothing worth drawing.
    fn apply_scan_event(&mut self, event: ScanEvent) -> bool {
        match event {
            ScanEvent::CandidateDiscovered(candidate) => {
                if self.scan_cancelled || self.index_of(&candidate.path).is_some() {
                    return false;
                }
                self.candidates.push(candidate);
            }
            ScanEvent::CandidateSized { path, bytes } => match self.index_of(&path) {
                Some(i) => self.candidates[i].size = Some(bytes),
                None => return false,
            },
            ScanEvent::DirectoryError { path, reason } => {
                self.errors.push((path, reason));
            }
            ScanEvent::ScanComplete(summary) => {
                self.scanning = false;
                self.status = Some(if summary.cancelled {
                    format!("Scan cancelled, {} project(s) found", self.candidates.len())
                } else {
                    format!("Scan complete, {} project(s) found", self.candidates.len())
                });
            }
        }
        true
    }

    fn apply_outcome(&mut self, outcome: DeletionOutcome) -> bool {
        let Some(i) = self.index_of(&outcome.path) else {
            return false;
        };

        match outcome.result {
            Ok(bytes) => {
                let removed = self.candidates.remove(i);
                self.reclaimed_bytes += bytes;
                self.status = Some(format!(
                    "Deleted {} ({})",
                    removed.name(),
                    display_size(Some(bytes))
                ));
            }
            Err(err) => {
                // Whatever did go away stays gone; a retry covers only the rest
                self.reclaimed_bytes += outcome.freed;
                let candidate = &mut self.candidates[i];
                candidate.targets.retain(|t| !outcome.removed.contains(t));

                if candidate.targets.is_empty() {
                    let removed = self.candidates.remove(i);
                    self.status = Some(format!(
                        "Deleted {} ({}), {}",
                        removed.name(),
                        display_size(Some(outcome.freed)),
                        err
                    ));
                } else {
                    candidate.size = candidate.size.map(|s| s.saturating_sub(outcome.freed));
                    candidate.status = DeletionStatus::Failed(err.to_string());
                    self.status = Some(format!("Failed to delete {}: {}", candidate.name(), err));
                }
            }
        }
        true
    }
}

fn row(candidate: &ProjectCandidate) -> RowView {
    RowView {
        path: candidate.path.clone(),
        name: candidate.name(),
        strategy: candidate.strategy.clone(),
        risk: candidate.risk,
        targets: candidate.targets.clone(),
        size: candidate.size,
        selected: candidate.selected,
        status: candidate.status.clone(),
    }
}
