//! EditEngine の公開API を通したシナリオテスト

use linea::editor::EditEngine;
use linea::error::EditError;
use linea::search::SearchMatch;

fn engine_with(lines: &[&str]) -> EditEngine {
    let mut engine = EditEngine::new();
    engine.load_lines(lines.iter().copied()).unwrap();
    engine
}

#[test]
fn insert_then_delete_restores_line() {
    let mut engine = engine_with(&["hello world"]);
    engine.move_cursor(0, 5).unwrap();
    engine.insert(", dear").unwrap();
    assert_eq!(engine.export_lines(), vec!["hello, dear world"]);

    engine.move_cursor(0, 5).unwrap();
    engine.delete(6).unwrap();
    assert_eq!(engine.export_lines(), vec!["hello world"]);
}

#[test]
fn undo_and_redo_walk_history() {
    let mut engine = EditEngine::new();
    engine.add_line().unwrap();
    engine.append("one").unwrap();
    engine.append(" two").unwrap();

    engine.undo().unwrap();
    assert_eq!(engine.export_lines(), vec!["one"]);
    engine.undo().unwrap();
    assert_eq!(engine.export_lines(), vec![""]);
    engine.undo().unwrap();
    assert!(engine.document().is_empty());
    assert!(engine.cursor().is_none());
    assert_eq!(engine.undo(), Err(EditError::NothingToUndo));

    engine.redo().unwrap();
    engine.redo().unwrap();
    engine.redo().unwrap();
    assert_eq!(engine.export_lines(), vec!["one two"]);
    assert_eq!(engine.redo(), Err(EditError::NothingToRedo));
}

#[test]
fn new_edit_clears_redo() {
    let mut engine = engine_with(&["abc"]);
    engine.append("d").unwrap();
    engine.undo().unwrap();
    assert!(engine.history().can_redo());

    engine.append("e").unwrap();
    assert!(!engine.history().can_redo());
    assert_eq!(engine.export_lines(), vec!["abce"]);
}

#[test]
fn failed_edit_keeps_redo_available() {
    let mut engine = engine_with(&["abc"]);
    engine.append("d").unwrap();
    engine.undo().unwrap();

    assert!(matches!(
        engine.delete(10),
        Err(EditError::RangeExceeded { .. })
    ));
    assert!(engine.history().can_redo());
    engine.redo().unwrap();
    assert_eq!(engine.export_lines(), vec!["abcd"]);
}

#[test]
fn undo_restores_cursor() {
    let mut engine = engine_with(&["abcdef"]);
    engine.move_cursor(0, 2).unwrap();
    engine.insert("XY").unwrap();
    assert_eq!(engine.cursor().map(|c| c.column), Some(4));

    engine.undo().unwrap();
    assert_eq!(engine.cursor().map(|c| (c.line, c.column)), Some((0, 2)));
}

#[test]
fn cut_paste_moves_text_between_lines() {
    let mut engine = engine_with(&["move me", "target: "]);
    engine.cut(5).unwrap();
    assert_eq!(engine.export_lines(), vec!["me", "target: "]);
    assert_eq!(engine.clipboard().content(), Some("move "));

    engine.move_cursor(1, 8).unwrap();
    engine.paste().unwrap();
    engine.paste().unwrap();
    assert_eq!(engine.export_lines(), vec!["me", "target: move move "]);
}

#[test]
fn replace_extends_line_when_needed() {
    let mut engine = engine_with(&["abcdef"]);
    engine.move_cursor(0, 4).unwrap();
    engine.replace("XYZ").unwrap();
    assert_eq!(engine.export_lines(), vec!["abcdXYZ"]);
    assert_eq!(engine.cursor().map(|c| c.column), Some(7));
}

#[test]
fn search_reports_overlapping_matches() {
    let engine = engine_with(&["aaaa", "baab"]);
    let matches = engine.search("aa").unwrap();
    assert_eq!(
        matches,
        vec![
            SearchMatch::new(0, 0),
            SearchMatch::new(0, 1),
            SearchMatch::new(0, 2),
            SearchMatch::new(1, 1),
        ]
    );
    assert_eq!(matches[3].to_string(), "line 2, position 2");
}

#[test]
fn multibyte_positions_are_characters() {
    let mut engine = engine_with(&["日本語テキスト"]);
    engine.move_cursor(0, 3).unwrap();
    assert_eq!(engine.copy(4).unwrap(), "テキスト");
    engine.insert("の").unwrap();
    assert_eq!(engine.export_lines(), vec!["日本語のテキスト"]);
}

#[test]
fn history_limit_drops_oldest() {
    let config = linea::EditorConfig {
        history_limit: 3,
        ..linea::EditorConfig::default()
    };
    let mut engine = EditEngine::with_config(&config);
    engine.add_line().unwrap();
    for text in ["a", "b", "c", "d"] {
        engine.append(text).unwrap();
    }
    assert_eq!(engine.history().undo_depth(), 3);

    while engine.undo().is_ok() {}
    assert_eq!(engine.export_lines(), vec!["a"]);
}

#[test]
fn hello_session_with_undo() {
    let mut engine = EditEngine::new();
    engine.add_line().unwrap();
    engine.append("hello").unwrap();
    assert_eq!(engine.cursor().map(|c| (c.line, c.column)), Some((0, 5)));

    engine.insert_at(0, 0, "XY").unwrap();
    assert_eq!(engine.export_lines(), vec!["XYhello"]);
    assert_eq!(engine.cursor().map(|c| (c.line, c.column)), Some((0, 2)));

    engine.undo().unwrap();
    assert_eq!(engine.export_lines(), vec!["hello"]);
    assert_eq!(engine.cursor().map(|c| (c.line, c.column)), Some((0, 5)));
}

#[test]
fn copy_then_paste_at_end() {
    let mut engine = engine_with(&["XYhello"]);
    assert_eq!(engine.copy(3).unwrap(), "XYh");
    engine.move_cursor(0, 7).unwrap();
    engine.paste().unwrap();
    assert_eq!(engine.export_lines(), vec!["XYhelloXYh"]);
}

#[test]
fn delete_past_end_leaves_line() {
    let mut engine = engine_with(&["abc"]);
    engine.move_cursor(0, 1).unwrap();
    assert_eq!(
        engine.delete(5),
        Err(EditError::RangeExceeded { start: 1, count: 5, len: 3 })
    );
    assert_eq!(engine.export_lines(), vec!["abc"]);
    assert_eq!(engine.history().undo_depth(), 1);
}

#[test]
fn paste_with_empty_clipboard_fails() {
    let mut engine = engine_with(&["abc"]);
    assert_eq!(engine.paste(), Err(EditError::EmptyClipboard));
    assert_eq!(engine.export_lines(), vec!["abc"]);
}

#[test]
fn search_hello_world() {
    let engine = engine_with(&["hello", "world"]);
    let found: Vec<String> = engine
        .search("l")
        .unwrap()
        .iter()
        .map(|m| m.to_string())
        .collect();
    assert_eq!(
        found,
        vec!["line 1, position 3", "line 1, position 4", "line 2, position 4"]
    );
}
