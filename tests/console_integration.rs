//! Console state driven by a real scan and a real deletion batch

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use spektr::console::{ConsoleEvent, ConsoleState, Request, SortMode};
use spektr::delete::{DeleteOptions, DeletionExecutor};
use spektr::scan::{ScanOptions, ScanSession};
use spektr::strategy::StrategyRegistry;
use spektr::DeletionStatus;
use tempfile::TempDir;

fn project(root: &Path, name: &str, marker: &str, target: &str, bytes: usize) -> PathBuf {
    let proj = root.join(name);
    fs::create_dir_all(proj.join(target)).unwrap();
    fs::write(proj.join(marker), "").unwrap();
    fs::write(proj.join(target).join("blob"), vec![0u8; bytes]).unwrap();
    proj
}

fn scanned_state(root: &Path) -> ConsoleState {
    let registry = Arc::new(StrategyRegistry::builtin());
    let mut session =
        ScanSession::start(root, Arc::clone(&registry), ScanOptions::default()).unwrap();
    let names = registry.names().into_iter().map(String::from).collect();
    let mut state = ConsoleState::new(session.root().to_path_buf(), names, SortMode::PathAsc, 10);

    while let Some(event) = session.recv() {
        state.update(ConsoleEvent::Scan(event));
    }
    state
}

fn focus(state: &mut ConsoleState, name: &str) {
    for _ in 0..state.candidates().len() {
        if state.focused().map(|c| c.path.ends_with(name)) == Some(true) {
            return;
        }
        state.update(ConsoleEvent::MoveDown);
    }
    panic!("{} not in list", name);
}

fn run_deletions(state: &mut ConsoleState, requests: Vec<Request>, executor: &DeletionExecutor) {
    for request in requests {
        if let Request::Delete(items) = request {
            for outcome in executor.delete(&items) {
                state.update(ConsoleEvent::Deletion(outcome));
            }
        }
    }
}

#[test]
fn selection_after_request_is_not_deleted() {
    let tmp = TempDir::new().unwrap();
    let a = project(tmp.path(), "a", "Cargo.toml", "target", 300);
    let b = project(tmp.path(), "b", "Cargo.toml", "target", 100);

    let mut state = scanned_state(tmp.path());
    assert_eq!(state.candidates().len(), 2);

    focus(&mut state, "a");
    state.update(ConsoleEvent::ToggleSelection);
    state.update(ConsoleEvent::RequestConfirmation);

    // Try to add b while the dialog is open
    state.update(ConsoleEvent::MoveDown);
    state.update(ConsoleEvent::ToggleSelection);

    let requests = state.update(ConsoleEvent::Confirm);
    run_deletions(&mut state, requests, &DeletionExecutor::default());

    assert!(!a.join("target").exists());
    assert!(b.join("target").exists());
    assert_eq!(state.candidates().len(), 1);
    assert!(state.candidates()[0].path.ends_with("b"));
    assert_eq!(state.reclaimed_bytes(), 300);
}

#[cfg(unix)]
#[test]
fn failed_deletion_stays_visible() {
    let tmp = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    let a = project(tmp.path(), "a", "package.json", "dist", 10);
    project(tmp.path(), "b", "package.json", "dist", 20);

    let mut state = scanned_state(tmp.path());
    state.update(ConsoleEvent::SelectAll);
    state.update(ConsoleEvent::RequestConfirmation);

    // a's output is swapped for a link while the dialog is open
    fs::remove_dir_all(a.join("dist")).unwrap();
    std::os::unix::fs::symlink(outside.path(), a.join("dist")).unwrap();

    let requests = state.update(ConsoleEvent::Confirm);
    run_deletions(&mut state, requests, &DeletionExecutor::default());

    assert_eq!(state.candidates().len(), 1);
    let left = &state.candidates()[0];
    assert!(left.path.ends_with("a"));
    assert!(matches!(&left.status, DeletionStatus::Failed(reason) if reason.contains("symlink")));
    assert_eq!(state.reclaimed_bytes(), 20);
    assert!(outside.path().exists());
}

#[test]
fn vanished_target_does_not_block_the_row() {
    let tmp = TempDir::new().unwrap();
    let a = project(tmp.path(), "a", "package.json", "dist", 10);

    let mut state = scanned_state(tmp.path());
    state.update(ConsoleEvent::RequestConfirmation);

    // Someone else cleaned a up in the meantime
    fs::remove_dir_all(a.join("dist")).unwrap();

    let requests = state.update(ConsoleEvent::Confirm);
    run_deletions(&mut state, requests, &DeletionExecutor::default());

    assert!(state.candidates().is_empty());
    assert_eq!(state.reclaimed_bytes(), 0);
}

#[test]
fn dry_run_reports_without_touching_disk() {
    let tmp = TempDir::new().unwrap();
    let a = project(tmp.path(), "a", "pom.xml", "target", 42);

    let mut state = scanned_state(tmp.path());
    state.update(ConsoleEvent::RequestConfirmation);
    let requests = state.update(ConsoleEvent::Confirm);
    run_deletions(
        &mut state,
        requests,
        &DeletionExecutor::new(DeleteOptions { dry_run: true }),
    );

    assert!(a.join("target/blob").exists());
    assert_eq!(state.reclaimed_bytes(), 42);
}

#[test]
fn filter_round_trip_over_scanned_list() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), "web", "package.json", "node_modules", 5);
    project(tmp.path(), "api", "Cargo.toml", "target", 5);
    project(tmp.path(), "ml", "requirements.txt", ".venv", 5);

    let mut state = scanned_state(tmp.path());
    let before: Vec<PathBuf> = state.visible_paths().iter().map(|p| p.to_path_buf()).collect();

    let mut seen_subset = false;
    for _ in 0..=StrategyRegistry::builtin().len() {
        state.update(ConsoleEvent::CycleFilter);
        seen_subset |= state.visible_paths().len() == 1;
    }

    let after: Vec<PathBuf> = state.visible_paths().iter().map(|p| p.to_path_buf()).collect();
    assert!(seen_subset);
    assert_eq!(before, after);
}
