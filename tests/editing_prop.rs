//! EditEngine の性質テスト
//!
//! 文字列モデルと比較し、挿入・削除とアンドゥの整合性を確認する

use linea::editor::EditEngine;
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

#[derive(Debug, Clone)]
enum Operation {
    Insert { pos: usize, text: String },
    Delete { pos: usize, count: usize },
    Replace { pos: usize, text: String },
}

fn short_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<char>().prop_filter("no line breaks", |c| *c != '\n' && *c != '\r'), 1..6)
        .prop_map(|chars| chars.into_iter().collect())
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    let insert = (0usize..64, short_text()).prop_map(|(pos, text)| Operation::Insert { pos, text });
    let delete = (0usize..64, 1usize..8).prop_map(|(pos, count)| Operation::Delete { pos, count });
    let replace = (0usize..64, short_text()).prop_map(|(pos, text)| Operation::Replace { pos, text });
    prop_oneof![insert, delete, replace]
}

fn char_offset(s: &str, pos: usize) -> usize {
    s.char_indices().nth(pos).map(|(idx, _)| idx).unwrap_or(s.len())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]

    #[test]
    fn insert_then_delete_is_identity(initial in "[a-z]{0,20}", pos in 0usize..21, text in short_text()) {
        let pos = pos.min(initial.chars().count());
        let mut engine = EditEngine::new();
        engine.load_lines([initial.as_str()]).unwrap();

        engine.move_cursor(0, pos).unwrap();
        engine.insert(&text).unwrap();
        engine.move_cursor(0, pos).unwrap();
        engine.delete(text.chars().count()).unwrap();

        prop_assert_eq!(engine.export_lines(), vec![initial]);
    }

    #[test]
    fn operations_match_string_model_and_undo_fully(
        initial in "[a-z ]{0,24}",
        ops in proptest::collection::vec(operation_strategy(), 0..16)
    ) {
        let mut engine = EditEngine::new();
        engine.load_lines([initial.as_str()]).unwrap();
        let mut model = initial.clone();
        let mut applied = 0usize;

        for op in ops {
            let len = model.chars().count();
            match op {
                Operation::Insert { pos, text } => {
                    let pos = pos.min(len);
                    engine.move_cursor(0, pos).unwrap();
                    engine.insert(&text).unwrap();
                    model.insert_str(char_offset(&model, pos), &text);
                    applied += 1;
                }
                Operation::Delete { pos, count } => {
                    let pos = pos.min(len);
                    engine.move_cursor(0, pos).unwrap();
                    let result = engine.delete(count);
                    if pos + count <= len {
                        prop_assert!(result.is_ok());
                        let start = char_offset(&model, pos);
                        let end = char_offset(&model, pos + count);
                        model.replace_range(start..end, "");
                        applied += 1;
                    } else {
                        prop_assert!(result.is_err());
                    }
                }
                Operation::Replace { pos, text } => {
                    let pos = pos.min(len);
                    engine.move_cursor(0, pos).unwrap();
                    engine.replace(&text).unwrap();
                    let start = char_offset(&model, pos);
                    let end = char_offset(&model, (pos + text.chars().count()).min(len));
                    model.replace_range(start..end, &text);
                    applied += 1;
                }
            }
            prop_assert_eq!(engine.export_lines(), vec![model.clone()]);
        }

        for _ in 0..applied {
            engine.undo().unwrap();
        }
        prop_assert_eq!(engine.export_lines(), vec![initial]);
    }

    #[test]
    fn capacity_is_whole_units_and_never_shrinks(texts in proptest::collection::vec("[a-z]{1,40}", 1..12)) {
        let mut engine = EditEngine::new();
        engine.add_line().unwrap();
        let mut last = 0usize;
        for text in &texts {
            engine.append(text).unwrap();
            let line = engine.current_line().unwrap();
            prop_assert_eq!(line.capacity() % line.unit(), 0);
            prop_assert!(line.capacity() >= line.len_bytes());
            prop_assert!(line.capacity() >= last);
            last = line.capacity();
        }
    }
}

#[derive(Debug, Clone)]
enum Step {
    MoveTo { line: usize, column: usize },
    Append(String),
    AddLine,
    InsertAt { line: usize, column: usize, text: String },
    Delete(usize),
    Replace(String),
    Cut(usize),
    Paste,
    Load(Vec<String>),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..8, 0usize..32).prop_map(|(line, column)| Step::MoveTo { line, column }),
        short_text().prop_map(Step::Append),
        Just(Step::AddLine),
        (0usize..8, 0usize..32, short_text())
            .prop_map(|(line, column, text)| Step::InsertAt { line, column, text }),
        (1usize..6).prop_map(Step::Delete),
        short_text().prop_map(Step::Replace),
        (1usize..6).prop_map(Step::Cut),
        Just(Step::Paste),
        proptest::collection::vec("[a-z]{0,12}", 0..4).prop_map(Step::Load),
    ]
}

type State = (Vec<String>, Option<linea::buffer::Cursor>);

fn state(engine: &EditEngine) -> State {
    (engine.export_lines(), engine.cursor())
}

/// 変更を伴う操作なら Some(結果) を返す
fn apply(engine: &mut EditEngine, step: &Step) -> Option<linea::error::edit::Result<()>> {
    match step {
        Step::MoveTo { line, column } => {
            let count = engine.document().line_count();
            if count > 0 {
                let line = line % count;
                let len = engine.document().line_at(line).map(|l| l.len()).unwrap_or(0);
                engine.move_cursor(line, column % (len + 1)).unwrap();
            }
            None
        }
        Step::Append(text) => Some(engine.append(text)),
        Step::AddLine => Some(engine.add_line()),
        Step::InsertAt { line, column, text } => {
            let count = engine.document().line_count().max(1);
            let line = line % count;
            let len = engine.document().line_at(line).map(|l| l.len()).unwrap_or(0);
            Some(engine.insert_at(line, column % (len + 1), text))
        }
        Step::Delete(count) => Some(engine.delete(*count)),
        Step::Replace(text) => Some(engine.replace(text)),
        Step::Cut(count) => Some(engine.cut(*count).map(|_| ())),
        Step::Paste => Some(engine.paste()),
        Step::Load(lines) => Some(engine.load_lines(lines)),
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn every_mutation_undoes_and_redoes_exactly(
        steps in proptest::collection::vec(step_strategy(), 1..24)
    ) {
        let mut engine = EditEngine::new();

        for step in &steps {
            let before = state(&engine);
            match apply(&mut engine, step) {
                None => {}
                Some(Err(_)) => {
                    prop_assert_eq!(state(&engine), before);
                }
                Some(Ok(())) => {
                    let after = state(&engine);

                    engine.undo().unwrap();
                    prop_assert_eq!(state(&engine), before);

                    engine.redo().unwrap();
                    prop_assert_eq!(state(&engine), after);
                }
            }
        }
    }
}
