use crate::models::{ChoiceOption, Question, QuestionKind, ANSWER_FALSE, ANSWER_TRUE, MARKER_YES};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const COL_ID: &str = "序号";
pub const COL_CATEGORY: &str = "分类";
pub const COL_CONTENT: &str = "内容";
pub const COL_KIND: &str = "题型";
pub const COL_DIFFICULTY: &str = "难度";
pub const COL_MARKER: &str = "正确答案";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),
    #[error("question bank is missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("row {row}: unknown question type `{kind}`")]
    UnknownKind { row: usize, kind: String },
    #[error("row {row}: question `{id}` has no correct option")]
    NoCorrectOption { row: usize, id: String },
}

pub fn bank_files() -> Vec<PathBuf> {
    let banks_dir = PathBuf::from("banks");
    let mut files = Vec::new();

    if banks_dir.exists() && banks_dir.is_dir()
        && let Ok(entries) = fs::read_dir(&banks_dir) {
            for entry in entries.flatten() {
                if let Some(ext) = entry.path().extension()
                    && ext == "csv" {
                        files.push(entry.path());
                    }
            }
        }

    files.sort();
    files
}

/// Column indices resolved from the header row.
struct Columns {
    id: usize,
    category: usize,
    content: usize,
    kind: usize,
    difficulty: usize,
    marker: usize,
}

fn resolve_columns(header: &[String]) -> Result<Columns, LoadError> {
    let find = |name: &'static str| {
        header
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(LoadError::MissingColumn(name))
    };
    Ok(Columns {
        id: find(COL_ID)?,
        category: find(COL_CATEGORY)?,
        content: find(COL_CONTENT)?,
        kind: find(COL_KIND)?,
        difficulty: find(COL_DIFFICULTY)?,
        marker: find(COL_MARKER)?,
    })
}

/// Loads a question bank from a CSV file.
///
/// Rows are a flat encoding of the question-to-option relationship: a row
/// with a non-blank `序号` cell starts a new question, rows with a blank
/// `序号` cell are option rows for the question most recently started.
/// True/false questions take their answer straight from the question row's
/// marker cell and carry no option rows.
pub fn load_bank(path: &Path) -> Result<Vec<Question>, LoadError> {
    let content = fs::read_to_string(path)?;
    // Excel-exported CSV often carries a BOM.
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    let mut lines = content.lines().enumerate();

    let header = match lines.next() {
        Some((_, line)) => parse_csv_record(line),
        None => return Err(LoadError::MissingColumn(COL_ID)),
    };
    let cols = resolve_columns(&header)?;

    let mut questions = Vec::new();
    let mut current: Option<(usize, Question)> = None;

    for (line_idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let row = line_idx + 1;
        let fields = parse_csv_record(line);
        let cell = |i: usize| fields.get(i).map(String::as_str).unwrap_or("");
        let marked_correct = cell(cols.marker).trim() == MARKER_YES;

        let id = cell(cols.id).trim();
        if !id.is_empty() {
            // New question starts; flush the previous accumulator.
            if let Some((start_row, done)) = current.take() {
                questions.push(finish_question(start_row, done)?);
            }

            let kind_label = cell(cols.kind).trim();
            let kind = QuestionKind::from_label(kind_label).ok_or_else(|| {
                LoadError::UnknownKind {
                    row,
                    kind: kind_label.to_string(),
                }
            })?;

            let mut question = Question {
                id: id.to_string(),
                category: cell(cols.category).trim().to_string(),
                difficulty: cell(cols.difficulty).trim().to_string(),
                content: cell(cols.content).trim().to_string(),
                kind,
                options: Vec::new(),
                answer: Vec::new(),
            };
            if kind == QuestionKind::TrueFalse {
                let literal = if marked_correct { ANSWER_TRUE } else { ANSWER_FALSE };
                question.answer.push(literal.to_string());
            }
            current = Some((row, question));
        } else if let Some((_, question)) = current.as_mut() {
            // Option row. True/false questions keep an empty options list.
            if question.kind == QuestionKind::TrueFalse {
                continue;
            }
            let text = cell(cols.content).trim();
            if text.is_empty() {
                continue;
            }
            question.options.push(ChoiceOption {
                text: text.to_string(),
                is_correct: marked_correct,
            });
            if marked_correct {
                question.answer.push(text.to_string());
            }
        }
        // Option rows before any question has started are ignored.
    }

    if let Some((start_row, done)) = current.take() {
        questions.push(finish_question(start_row, done)?);
    }

    Ok(questions)
}

fn finish_question(row: usize, question: Question) -> Result<Question, LoadError> {
    if question.answer.is_empty() {
        return Err(LoadError::NoCorrectOption {
            row,
            id: question.id,
        });
    }
    Ok(question)
}

pub fn parse_csv_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => {
                field.push(c);
            }
        }
    }
    fields.push(field);
    fields
}
