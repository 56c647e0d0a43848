pub mod loader;
pub mod logger;
pub mod models;
pub mod session;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use loader::{bank_files, load_bank, LoadError};
pub use models::{Answer, AppState, ChoiceOption, Question, QuestionKind, QuizSession};
pub use session::{handle_quiz_input, SessionError, DEFAULT_ROUND_SIZE};
pub use ui::{draw_menu, draw_quit_confirmation, draw_quiz, draw_summary};
pub use utils::truncate_display;
