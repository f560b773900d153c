//! Property-based tests for the workspace buffer.
//!
//! Random operation sequences are driven through a buffer and checked
//! against a plain `Vec<char>` model of the content.

use proptest::prelude::*;

use sanjutsu_workspace::{Author, WorkspaceBuffer, WorkspaceConfig};

#[derive(Debug, Clone)]
enum Op {
    Set(String, Author),
    Insert(usize, String, Author),
    Delete(usize, usize, Author),
    Replace(usize, usize, String, Author),
    Suggest(usize, usize, String),
    Accept(usize),
    Reject(usize),
    Restore(usize),
}

fn text() -> impl Strategy<Value = String> {
    "[a-z é→\n]{0,12}"
}

fn author() -> impl Strategy<Value = Author> {
    prop_oneof![Just(Author::User), Just(Author::Model)]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (text(), author()).prop_map(|(t, a)| Op::Set(t, a)),
        (0..40usize, text(), author()).prop_map(|(p, t, a)| Op::Insert(p, t, a)),
        (0..40usize, 0..40usize, author()).prop_map(|(s, e, a)| Op::Delete(s, e, a)),
        (0..40usize, 0..40usize, text(), author()).prop_map(|(s, e, t, a)| Op::Replace(s, e, t, a)),
        (0..40usize, 0..40usize, text()).prop_map(|(s, e, t)| Op::Suggest(s, e, t)),
        (0..8usize).prop_map(Op::Accept),
        (0..8usize).prop_map(Op::Reject),
        (0..8usize).prop_map(Op::Restore),
    ]
}

fn run(buf: &mut WorkspaceBuffer, ops: &[Op]) {
    for op in ops {
        match op {
            Op::Set(t, a) => {
                buf.set_content(t.clone(), *a, "set");
            }
            Op::Insert(p, t, a) => {
                buf.insert_text(*p, t, *a);
            }
            Op::Delete(s, e, a) => {
                buf.delete_text(*s, *e, *a);
            }
            Op::Replace(s, e, t, a) => {
                buf.replace_text(*s, *e, t, *a);
            }
            Op::Suggest(s, e, t) => {
                buf.suggest_edit(*s, *e, t, "suggested");
            }
            Op::Accept(i) => {
                let ids: Vec<_> = buf.pending_suggestions().iter().map(|e| e.id).collect();
                if let Some(id) = ids.get(*i % ids.len().max(1)) {
                    buf.accept_suggestion(*id);
                }
            }
            Op::Reject(i) => {
                let ids: Vec<_> = buf.pending_suggestions().iter().map(|e| e.id).collect();
                if let Some(id) = ids.get(*i % ids.len().max(1)) {
                    buf.reject_suggestion(*id);
                }
            }
            Op::Restore(i) => {
                let history = buf.version_history();
                let id = history[*i % history.len()].id;
                buf.restore_version(id);
            }
        }
    }
}

fn clamp_range(len: usize, a: usize, b: usize) -> (usize, usize) {
    let (a, b) = (a.min(len), b.min(len));
    if a <= b { (a, b) } else { (b, a) }
}

proptest! {
    #[test]
    fn test_export_import_roundtrip(ops in prop::collection::vec(op(), 0..40)) {
        let mut src = WorkspaceBuffer::new();
        run(&mut src, &ops);

        let value = src.export_session().to_value().unwrap();
        let mut dst = WorkspaceBuffer::new();
        prop_assert!(dst.import_session(&value));

        prop_assert_eq!(dst.content(), src.content());
        prop_assert_eq!(dst.edit_history(0), src.edit_history(0));
        prop_assert_eq!(dst.version_history(), src.version_history());
        prop_assert_eq!(dst.current_version_id(), src.current_version_id());
    }

    #[test]
    fn test_insert_splices_at_clamped_position(
        initial in text(),
        pos in 0..30usize,
        insert in text(),
    ) {
        let mut buf = WorkspaceBuffer::new();
        buf.set_content(initial.clone(), Author::User, "seed");

        let chars: Vec<char> = initial.chars().collect();
        let p = pos.min(chars.len());
        let expected: String = chars[..p].iter().chain(insert.chars().collect::<Vec<_>>().iter()).chain(chars[p..].iter()).collect();

        let edit = buf.insert_text(pos, &insert, Author::User);
        prop_assert_eq!(buf.content(), expected.as_str());
        prop_assert_eq!(edit.position, p);
    }

    #[test]
    fn test_delete_removes_exact_slice(initial in text(), a in 0..30usize, b in 0..30usize) {
        let mut buf = WorkspaceBuffer::new();
        buf.set_content(initial.clone(), Author::User, "seed");
        let edits_before = buf.edit_history(0).len();

        let chars: Vec<char> = initial.chars().collect();
        let (s, e) = clamp_range(chars.len(), a, b);
        let result = buf.delete_text(a, b, Author::User);

        if s == e {
            prop_assert!(result.is_none());
            prop_assert_eq!(buf.content(), initial.as_str());
            prop_assert_eq!(buf.edit_history(0).len(), edits_before);
        } else {
            let edit = result.unwrap();
            let removed: String = chars[s..e].iter().collect();
            let kept: String = chars[..s].iter().chain(chars[e..].iter()).collect();
            prop_assert_eq!(edit.old_text, removed);
            prop_assert_eq!(buf.content(), kept.as_str());
        }
    }

    #[test]
    fn test_suggest_never_mutates(
        ops in prop::collection::vec(op(), 0..20),
        a in 0..30usize,
        b in 0..30usize,
        t in text(),
    ) {
        let mut buf = WorkspaceBuffer::new();
        run(&mut buf, &ops);
        let content = buf.content().to_string();
        let pending = buf.pending_suggestions().len();
        let versions = buf.version_history().to_vec();

        buf.suggest_edit(a, b, &t, "tweak");
        prop_assert_eq!(buf.content(), content.as_str());
        prop_assert_eq!(buf.pending_suggestions().len(), pending + 1);
        prop_assert_eq!(buf.version_history(), versions.as_slice());
    }

    #[test]
    fn test_resolved_suggestion_is_final(
        ops in prop::collection::vec(op(), 0..20),
        a in 0..30usize,
        b in 0..30usize,
        t in text(),
        accept in any::<bool>(),
    ) {
        let mut buf = WorkspaceBuffer::new();
        run(&mut buf, &ops);
        let id = buf.suggest_edit(a, b, &t, "tweak").id;

        // Freshly suggested against current content, so accept cannot conflict.
        if accept {
            prop_assert!(buf.accept_suggestion(id));
        } else {
            prop_assert!(buf.reject_suggestion(id));
        }
        prop_assert!(buf.pending_suggestions().iter().all(|e| e.id != id));
        prop_assert!(!buf.accept_suggestion(id));
        prop_assert!(!buf.reject_suggestion(id));
        let edit = buf.get_edit(id).unwrap();
        prop_assert!(!(edit.accepted() && edit.rejected()));
    }

    #[test]
    fn test_restore_twice_is_stable(ops in prop::collection::vec(op(), 1..30), pick in 0..100usize) {
        let mut buf = WorkspaceBuffer::new();
        run(&mut buf, &ops);
        let history = buf.version_history();
        let target = history[pick % history.len()].clone();

        let before = buf.version_history().len();
        prop_assert!(buf.restore_version(target.id));
        let first = buf.content().to_string();
        prop_assert!(buf.restore_version(target.id));
        prop_assert_eq!(first.as_str(), target.content.as_str());
        prop_assert_eq!(buf.content(), target.content.as_str());
        prop_assert!(buf.version_history().len() >= before.min(100));
    }

    #[test]
    fn test_stats_partition_edit_log(ops in prop::collection::vec(op(), 0..40)) {
        let mut buf = WorkspaceBuffer::new();
        run(&mut buf, &ops);
        let stats = buf.stats();
        prop_assert_eq!(stats.user_edits + stats.model_edits, buf.edit_history(0).len());
        prop_assert_eq!(stats.total_edits, buf.edit_history(0).len());
        prop_assert_eq!(stats.pending_suggestions, buf.pending_suggestions().len());
        prop_assert_eq!(stats.versions, buf.version_history().len());
        prop_assert_eq!(stats.content_length, buf.content().chars().count());
    }
}

#[test]
fn test_version_history_capped_at_100() {
    let mut buf = WorkspaceBuffer::new();
    for i in 0..150 {
        buf.set_content(format!("content {i}"), Author::User, format!("step {i}"));
    }
    let history = buf.version_history();
    assert_eq!(history.len(), 100);
    // Initial + 150 set_content = 151 versions; the oldest 51 are gone.
    assert_eq!(history[0].description, "step 50");
    assert_eq!(history[99].description, "step 149");
    for pair in history.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
    assert_eq!(buf.current_version_id(), history[99].id);
    assert_eq!(buf.edit_history(0).len(), 150);
}

#[test]
fn test_custom_cap_from_config() {
    let config = WorkspaceConfig::from_ron("(max_versions: 3)").unwrap();
    let mut buf = WorkspaceBuffer::with_config(config);
    for i in 0..10 {
        buf.insert_text(0, &i.to_string(), Author::User);
    }
    assert_eq!(buf.version_history().len(), 3);
    assert_eq!(buf.version_history()[2].content, "9876543210");
}
