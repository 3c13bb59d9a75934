use std::fs;

use filewrap::{CloseOutcome, ClosingPolicy, LineDocument, NumericTable, WriteMode};
use tempfile::tempdir;

#[test]
fn append_policy_adds_after_existing_content() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("out.txt");
    fs::write(&path, "x\n").expect("write file");

    let mut doc = LineDocument::with_policy(ClosingPolicy::Append);
    doc.set_path(&path);
    doc.append("y");
    let outcome = doc.close();

    assert_eq!(
        outcome,
        CloseOutcome::Written {
            path: path.clone(),
            mode: WriteMode::Append,
            lines: 1,
        }
    );
    let reread = LineDocument::open(&path, ClosingPolicy::Discard);
    assert_eq!(reread.lines(), ["x", "y"]);
}

#[test]
fn append_policy_starts_on_a_fresh_line() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("out.txt");
    fs::write(&path, "x").expect("write file");

    let mut doc = LineDocument::with_policy(ClosingPolicy::Append);
    doc.set_path(&path);
    doc.append("y");
    assert!(doc.close().is_written());

    let reread = LineDocument::open(&path, ClosingPolicy::Discard);
    assert_eq!(reread.lines(), ["x", "y"]);
}

#[test]
fn append_policy_keeps_numeric_rows_apart() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("data.txt");
    fs::write(&path, "1 2").expect("write file");

    let mut table = NumericTable::with_policy(ClosingPolicy::Append);
    table.set_path(&path);
    table.append_row(vec![3.0]);
    assert!(table.close().is_written());

    let reread = NumericTable::open(&path, ClosingPolicy::Discard);
    assert_eq!(reread.rows(), [vec![1.0, 2.0], vec![3.0]]);
}

#[test]
fn flush_policy_overwrites() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("out.txt");
    fs::write(&path, "old\nlines\n").expect("write file");

    let mut doc = LineDocument::open(&path, ClosingPolicy::Flush);
    doc.remove_at(0);
    assert!(doc.close().is_written());

    assert_eq!(fs::read_to_string(&path).expect("read back"), "lines\n");
}

#[test]
fn discard_policy_leaves_file_alone() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("out.txt");
    fs::write(&path, "keep\n").expect("write file");

    let mut doc = LineDocument::open(&path, ClosingPolicy::Discard);
    doc.clear();

    assert_eq!(doc.close(), CloseOutcome::Discarded);
    assert_eq!(fs::read_to_string(&path).expect("read back"), "keep\n");
}

#[test]
fn drop_without_close_runs_policy() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("out.txt");

    {
        let mut table = NumericTable::with_policy(ClosingPolicy::Flush);
        table.set_path(&path);
        table.append_row(vec![1.0, 2.0]);
    }

    assert_eq!(fs::read_to_string(&path).expect("read back"), "1 2\n");
}

#[test]
fn close_writes_only_once() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("out.txt");

    let mut doc = LineDocument::with_policy(ClosingPolicy::Append);
    doc.set_path(&path);
    doc.append("once");
    doc.close();

    assert_eq!(fs::read_to_string(&path).expect("read back"), "once\n");
}

#[test]
fn policy_without_path_reports_no_path() {
    let mut table = NumericTable::with_policy(ClosingPolicy::Append);
    table.append_row(vec![1.0]);

    assert_eq!(
        table.close(),
        CloseOutcome::NoPath {
            mode: WriteMode::Append
        }
    );
}

#[test]
fn unwritable_path_reports_failure() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("missing").join("out.txt");

    let mut doc = LineDocument::with_policy(ClosingPolicy::Flush);
    doc.set_path(&path);
    doc.append("lost");

    assert!(doc.close().is_failed());
    assert!(!path.exists());
}

#[test]
fn empty_path_unbinds() {
    let mut doc = LineDocument::with_policy(ClosingPolicy::Flush);
    doc.set_path("");
    assert_eq!(doc.path(), None);
    assert!(matches!(doc.close(), CloseOutcome::NoPath { .. }));
}

#[test]
fn clone_carries_path_and_policy() {
    let dir = tempdir().expect("temp dir");
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");

    let mut doc = LineDocument::with_policy(ClosingPolicy::Flush);
    doc.set_path(&first);
    doc.append("shared");

    let mut copy = doc.clone();
    assert_eq!(copy.path(), Some(first.as_path()));
    assert_eq!(copy.policy(), ClosingPolicy::Flush);
    copy.set_path(&second);

    assert!(doc.close().is_written());
    assert!(copy.close().is_written());
    assert_eq!(fs::read_to_string(&first).expect("read first"), "shared\n");
    assert_eq!(fs::read_to_string(&second).expect("read second"), "shared\n");
}
