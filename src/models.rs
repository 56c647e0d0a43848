/// Correctness-marker value in the bank file that flags a row as correct.
pub const MARKER_YES: &str = "是";
/// The two literal answers a true/false question can take.
pub const ANSWER_TRUE: &str = "正确";
pub const ANSWER_FALSE: &str = "错误";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    TrueFalse,
    SingleChoice,
    MultipleChoice,
}

impl QuestionKind {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "判断题" => Some(QuestionKind::TrueFalse),
            "单选题" => Some(QuestionKind::SingleChoice),
            "多选题" => Some(QuestionKind::MultipleChoice),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::TrueFalse => "判断题",
            QuestionKind::SingleChoice => "单选题",
            QuestionKind::MultipleChoice => "多选题",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChoiceOption {
    pub text: String,
    /// Only consulted while loading, to populate `Question::answer`.
    pub is_correct: bool,
}

#[derive(Debug, Clone)]
pub struct Question {
    pub id: String,
    pub category: String,
    pub difficulty: String,
    pub content: String,
    pub kind: QuestionKind,
    /// Input row order. Empty for true/false questions.
    pub options: Vec<ChoiceOption>,
    /// Correct option texts, in option row order. Never empty after loading.
    pub answer: Vec<String>,
}

impl Question {
    /// The choices to present. True/false questions carry no option rows,
    /// so they render the fixed literal pair.
    pub fn display_options(&self) -> Vec<&str> {
        match self.kind {
            QuestionKind::TrueFalse => vec![ANSWER_TRUE, ANSWER_FALSE],
            _ => self.options.iter().map(|o| o.text.as_str()).collect(),
        }
    }

    /// The single correctness rule, applied both at submit time and when the
    /// summary recounts the score. Multiple-choice comparison is a set
    /// comparison: order-independent, no partial credit, extra or missing
    /// selections both score wrong. Unanswered is wrong, never an error.
    pub fn is_correct(&self, answer: &Answer) -> bool {
        match (self.kind, answer) {
            (QuestionKind::TrueFalse | QuestionKind::SingleChoice, Answer::Single(picked)) => {
                self.answer.iter().any(|a| a == picked)
            }
            (QuestionKind::MultipleChoice, Answer::Multiple(picked)) => {
                if picked.len() != self.answer.len() {
                    return false;
                }
                let mut picked: Vec<&str> = picked.iter().map(String::as_str).collect();
                let mut expected: Vec<&str> = self.answer.iter().map(String::as_str).collect();
                picked.sort_unstable();
                expected.sort_unstable();
                picked == expected
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Answer {
    #[default]
    Unanswered,
    Single(String),
    Multiple(Vec<String>),
}

impl Answer {
    pub fn is_unanswered(&self) -> bool {
        matches!(self, Answer::Unanswered)
    }

    pub fn display(&self) -> String {
        match self {
            Answer::Unanswered => "未作答".to_string(),
            Answer::Single(text) => text.clone(),
            Answer::Multiple(texts) => texts.join(", "),
        }
    }
}

/// One quiz attempt over a randomly drawn round of questions. Created at
/// round start, mutated by submit/navigate actions, replaced wholesale on
/// reset. `answers` and `submitted` are parallel to `questions`.
#[derive(Debug)]
pub struct QuizSession {
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub answers: Vec<Answer>,
    pub submitted: Vec<bool>,
    pub completed: bool,
    pub bank_name: String,
    /// Option cursor for the current question (UI interaction state).
    pub highlighted: usize,
}

#[derive(Debug, PartialEq)]
pub enum AppState {
    Menu,
    Quiz,
    QuizQuitConfirm,
    Summary,
}
