//! Integration tests for project discovery

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use spektr::console::{ConsoleEvent, ConsoleState, SortMode};
use spektr::scan::{ScanEvent, ScanOptions, ScanSession};
use spektr::strategy::StrategyRegistry;
use tempfile::TempDir;

fn write_bytes(path: &Path, bytes: usize) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, vec![b'x'; bytes]).unwrap();
}

fn scan(root: &Path, options: ScanOptions) -> Vec<spektr::ProjectCandidate> {
    let session =
        ScanSession::start(root, Arc::new(StrategyRegistry::builtin()), options).unwrap();
    session.candidates().collect()
}

#[test]
fn finds_node_and_rust_projects_without_descending() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write_bytes(&root.join("proj1/package.json"), 2);
    write_bytes(&root.join("proj1/node_modules/lib/index.js"), 500);
    write_bytes(&root.join("proj2/Cargo.toml"), 9);
    write_bytes(&root.join("proj2/target/debug/app"), 200);
    // Inside a project root, so never visited
    write_bytes(&root.join("proj2/vendor_other/package.json"), 2);
    write_bytes(&root.join("proj2/vendor_other/node_modules/x.js"), 50);

    let mut found = scan(root, ScanOptions::default());
    found.sort_by(|a, b| a.path.cmp(&b.path));

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].strategy, "Node.js");
    assert!(found[0].path.ends_with("proj1"));
    assert_eq!(found[0].size, Some(500));
    assert_eq!(found[1].strategy, "Rust");
    assert!(found[1].path.ends_with("proj2"));
    assert_eq!(found[1].size, Some(200));
}

#[test]
fn no_candidate_is_an_ancestor_of_another() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    for dir in ["a", "a/b", "a/b/c", "d/e", "d/e/f/g"] {
        write_bytes(&root.join(dir).join("Cargo.toml"), 1);
        write_bytes(&root.join(dir).join("target/out"), 1);
    }
    write_bytes(&root.join("h/pom.xml"), 1);
    write_bytes(&root.join("h/target/x.jar"), 1);
    write_bytes(&root.join("h/sub/package.json"), 1);
    write_bytes(&root.join("h/sub/dist/x.js"), 1);

    let found = scan(root, ScanOptions::default());
    let paths: Vec<PathBuf> = found.iter().map(|c| c.path.clone()).collect();

    assert_eq!(paths.len(), 3);
    for a in &paths {
        for b in &paths {
            if a != b {
                assert!(!b.starts_with(a), "{} contains {}", a.display(), b.display());
            }
        }
    }
}

#[test]
fn repeated_scans_agree() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    for i in 0..20 {
        let proj = root.join(format!("group{}/p{}", i % 4, i));
        if i % 2 == 0 {
            write_bytes(&proj.join("package.json"), 1);
            write_bytes(&proj.join(".next/cache"), 10);
            // Both markers: the earlier registered family wins
            write_bytes(&proj.join("Cargo.toml"), 1);
        } else {
            write_bytes(&proj.join("pyproject.toml"), 1);
            write_bytes(&proj.join(".venv/lib/site.py"), 10);
        }
    }

    let collect = || -> BTreeSet<(PathBuf, String, Option<u64>)> {
        scan(root, ScanOptions::new().with_threads(4))
            .into_iter()
            .map(|c| (c.path, c.strategy, c.size))
            .collect()
    };

    let first = collect();
    assert_eq!(first.len(), 20);
    assert_eq!(first, collect());
    assert_eq!(first.iter().filter(|(_, s, _)| s == "Node.js").count(), 10);
    assert_eq!(first.iter().filter(|(_, s, _)| s == "Python").count(), 10);
}

#[test]
fn summary_counts_visited_directories() {
    let tmp = TempDir::new().unwrap();
    write_bytes(&tmp.path().join("ok/Cargo.toml"), 1);
    write_bytes(&tmp.path().join("ok/target/x"), 3);

    let session = ScanSession::start(
        tmp.path(),
        Arc::new(StrategyRegistry::builtin()),
        ScanOptions::default(),
    )
    .unwrap();
    let mut candidates = session.candidates();
    let found: Vec<_> = candidates.by_ref().collect();

    assert_eq!(found.len(), 1);
    let summary = candidates.summary().unwrap();
    assert!(!summary.cancelled);
    assert!(summary.directories >= 2);
}

#[test]
fn cancel_after_three_keeps_only_those() {
    let tmp = TempDir::new().unwrap();
    for i in 0..10 {
        let proj = tmp.path().join(format!("p{:02}", i));
        write_bytes(&proj.join("Cargo.toml"), 1);
        write_bytes(&proj.join("target/out"), 100);
    }

    let options = ScanOptions::new().with_threads(1).with_channel_capacity(1);
    let mut session =
        ScanSession::start(tmp.path(), Arc::new(StrategyRegistry::builtin()), options).unwrap();
    let mut state = ConsoleState::new(
        session.root().to_path_buf(),
        vec!["Rust".to_string()],
        SortMode::PathAsc,
        20,
    );

    let mut discovered = 0;
    while discovered < 3 {
        let event = session.recv().expect("scan ended early");
        if matches!(event, ScanEvent::CandidateDiscovered(_)) {
            discovered += 1;
        }
        state.update(ConsoleEvent::Scan(event));
    }

    state.update(ConsoleEvent::CancelScan);
    session.cancel();

    let mut late_discoveries = 0;
    let mut completed = None;
    while let Some(event) = session.recv() {
        match &event {
            ScanEvent::CandidateDiscovered(_) => late_discoveries += 1,
            ScanEvent::ScanComplete(summary) => completed = Some(*summary),
            _ => {}
        }
        state.update(ConsoleEvent::Scan(event));
    }

    assert_eq!(late_discoveries, 0);
    assert!(completed.unwrap().cancelled);
    assert_eq!(state.candidates().len(), 3);
    assert!(!state.is_scanning());
    // Rows already on screen still get their size after the cancel
    assert!(state.candidates().iter().all(|c| c.size == Some(100)));
}

#[test]
fn invalid_roots_fail_before_scanning() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("plain.txt");
    fs::write(&file, "x").unwrap();

    let registry = Arc::new(StrategyRegistry::builtin());
    assert!(ScanSession::start(&tmp.path().join("nope"), registry.clone(), ScanOptions::default()).is_err());
    assert!(ScanSession::start(&file, registry, ScanOptions::default()).is_err());
}
