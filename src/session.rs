use crate::logger;
use crate::models::{Answer, AppState, Question, QuestionKind, QuizSession};
use crossterm::event::{KeyCode, KeyEvent};
use rand::seq::SliceRandom;
use thiserror::Error;

/// Questions drawn per round. Callers with smaller banks must pass an
/// explicit smaller round size; the engine itself never clamps.
pub const DEFAULT_ROUND_SIZE: usize = 30;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("question bank is empty")]
    EmptyBank,
    #[error("round of {requested} questions exceeds bank size {available}")]
    RoundTooLarge { requested: usize, available: usize },
}

impl QuizSession {
    /// Starts a round by drawing `round_size` questions uniformly at random
    /// without replacement. A round larger than the bank is refused rather
    /// than silently shrunk.
    pub fn new(
        bank: &[Question],
        round_size: usize,
        bank_name: &str,
    ) -> Result<Self, SessionError> {
        if bank.is_empty() || round_size == 0 {
            return Err(SessionError::EmptyBank);
        }
        if round_size > bank.len() {
            return Err(SessionError::RoundTooLarge {
                requested: round_size,
                available: bank.len(),
            });
        }

        let questions: Vec<Question> = bank
            .choose_multiple(&mut rand::thread_rng(), round_size)
            .cloned()
            .collect();
        logger::log(&format!(
            "Started round of {} questions from bank '{}'",
            questions.len(),
            bank_name
        ));

        Ok(QuizSession {
            answers: vec![Answer::Unanswered; questions.len()],
            submitted: vec![false; questions.len()],
            questions,
            current_index: 0,
            completed: false,
            bank_name: bank_name.to_string(),
            highlighted: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    /// Overwrites the answer slot. Once the slot has been submitted the
    /// recorded answer is frozen; later writes are dropped so a scored
    /// answer never silently changes.
    pub fn record_answer(&mut self, index: usize, answer: Answer) {
        if self.submitted[index] {
            return;
        }
        self.answers[index] = answer;
    }

    /// Marks the slot submitted and returns its correctness. The result is
    /// not stored; the summary recomputes it with the same rule.
    pub fn submit(&mut self, index: usize) -> bool {
        self.submitted[index] = true;
        self.questions[index].is_correct(&self.answers[index])
    }

    /// Moves the cursor forward, or completes the round at the last position.
    pub fn advance(&mut self) {
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.highlighted = 0;
        } else {
            self.completed = true;
        }
    }

    /// Moves the cursor back one question. Blocked at the first position.
    pub fn retreat(&mut self) {
        if self.current_index > 0 {
            self.current_index -= 1;
            self.highlighted = 0;
        }
    }

    /// Recounts correctness over every slot with the stored answers.
    /// Unanswered slots count as incorrect.
    pub fn score(&self) -> usize {
        self.questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| q.is_correct(a))
            .count()
    }

    pub fn percentage(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        self.score() as f64 / self.questions.len() as f64 * 100.0
    }

    pub fn highlight_up(&mut self) {
        if self.highlighted > 0 {
            self.highlighted -= 1;
        }
    }

    pub fn highlight_down(&mut self) {
        let option_count = self.current_question().display_options().len();
        if self.highlighted + 1 < option_count {
            self.highlighted += 1;
        }
    }

    /// Applies the highlighted option to the current answer slot: picks it
    /// for single-answer questions, toggles it for multiple-choice.
    pub fn select_highlighted(&mut self) {
        let index = self.current_index;
        if self.submitted[index] {
            return;
        }
        let options = self.current_question().display_options();
        let Some(text) = options.get(self.highlighted).map(|t| t.to_string()) else {
            return;
        };

        match self.questions[index].kind {
            QuestionKind::TrueFalse | QuestionKind::SingleChoice => {
                self.record_answer(index, Answer::Single(text));
            }
            QuestionKind::MultipleChoice => {
                let mut selected = match &self.answers[index] {
                    Answer::Multiple(texts) => texts.clone(),
                    _ => Vec::new(),
                };
                if let Some(pos) = selected.iter().position(|s| *s == text) {
                    selected.remove(pos);
                } else {
                    selected.push(text);
                }
                let answer = if selected.is_empty() {
                    Answer::Unanswered
                } else {
                    Answer::Multiple(selected)
                };
                self.record_answer(index, answer);
            }
        }
    }
}

pub fn handle_quiz_input(session: &mut QuizSession, key: KeyEvent, app_state: &mut AppState) {
    let index = session.current_index;
    if !session.submitted[index] {
        match key.code {
            KeyCode::Esc => {
                *app_state = AppState::QuizQuitConfirm;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                session.highlight_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                session.highlight_down();
            }
            KeyCode::Char(' ') => {
                session.select_highlighted();
            }
            KeyCode::Enter => {
                // Submitting an unanswered question is allowed; it scores
                // incorrect like any other wrong answer.
                session.submit(index);
            }
            KeyCode::Left => {
                session.retreat();
            }
            KeyCode::Right => {
                if index + 1 < session.len() {
                    session.advance();
                }
            }
            _ => {}
        }
    } else {
        match key.code {
            KeyCode::Esc => {
                *app_state = AppState::QuizQuitConfirm;
            }
            KeyCode::Enter | KeyCode::Right => {
                session.advance();
                if session.completed {
                    *app_state = AppState::Summary;
                }
            }
            KeyCode::Left => {
                session.retreat();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChoiceOption, ANSWER_FALSE, ANSWER_TRUE};
    use crossterm::event::KeyModifiers;

    fn bank(size: usize) -> Vec<Question> {
        (0..size)
            .map(|i| Question {
                id: format!("{}", i + 1),
                category: "测试".to_string(),
                difficulty: "易".to_string(),
                content: format!("Q{}", i + 1),
                kind: QuestionKind::SingleChoice,
                options: vec![
                    ChoiceOption {
                        text: format!("right-{i}"),
                        is_correct: true,
                    },
                    ChoiceOption {
                        text: format!("wrong-{i}"),
                        is_correct: false,
                    },
                ],
                answer: vec![format!("right-{i}")],
            })
            .collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_new_session_draws_requested_size() {
        let bank = bank(10);
        let session = QuizSession::new(&bank, 4, "test").unwrap();
        assert_eq!(session.len(), 4);
        assert_eq!(session.current_index, 0);
        assert!(!session.completed);
        assert!(session.answers.iter().all(Answer::is_unanswered));
        assert!(session.submitted.iter().all(|s| !s));
    }

    #[test]
    fn test_draw_is_without_replacement() {
        let bank = bank(8);
        let session = QuizSession::new(&bank, 8, "test").unwrap();
        let mut ids: Vec<&str> = session.questions.iter().map(|q| q.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_round_larger_than_bank_is_refused() {
        let bank = bank(3);
        let err = QuizSession::new(&bank, 5, "test").unwrap_err();
        assert!(matches!(
            err,
            SessionError::RoundTooLarge {
                requested: 5,
                available: 3
            }
        ));
    }

    #[test]
    fn test_empty_bank_is_refused() {
        let err = QuizSession::new(&[], 0, "test").unwrap_err();
        assert!(matches!(err, SessionError::EmptyBank));
    }

    #[test]
    fn test_record_after_submit_is_dropped() {
        let bank = bank(2);
        let mut session = QuizSession::new(&bank, 2, "test").unwrap();
        session.record_answer(0, Answer::Single("first".to_string()));
        session.submit(0);
        session.record_answer(0, Answer::Single("second".to_string()));
        assert_eq!(session.answers[0], Answer::Single("first".to_string()));
    }

    #[test]
    fn test_submit_returns_correctness_and_score_recounts() {
        let bank = bank(3);
        let mut session = QuizSession::new(&bank, 3, "test").unwrap();
        for i in 0..3 {
            let right = session.questions[i].answer[0].clone();
            session.record_answer(i, Answer::Single(right));
            assert!(session.submit(i));
        }
        assert_eq!(session.score(), 3);
    }

    #[test]
    fn test_unanswered_slots_score_incorrect() {
        let bank = bank(4);
        let mut session = QuizSession::new(&bank, 4, "test").unwrap();
        let right = session.questions[0].answer[0].clone();
        session.record_answer(0, Answer::Single(right));
        session.submit(0);
        // Remaining three never answered; score must not error.
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_full_bank_self_answer_scores_bank_size() {
        let bank = bank(12);
        let mut session = QuizSession::new(&bank, bank.len(), "test").unwrap();
        for i in 0..session.len() {
            let answer = Answer::Single(session.questions[i].answer[0].clone());
            session.record_answer(i, answer);
            session.submit(i);
        }
        assert_eq!(session.score(), bank.len());
        assert!((session.percentage() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_advance_completes_at_last_position() {
        let bank = bank(2);
        let mut session = QuizSession::new(&bank, 2, "test").unwrap();
        session.advance();
        assert_eq!(session.current_index, 1);
        assert!(!session.completed);
        session.advance();
        assert_eq!(session.current_index, 1);
        assert!(session.completed);
    }

    #[test]
    fn test_retreat_blocked_at_first_position() {
        let bank = bank(2);
        let mut session = QuizSession::new(&bank, 2, "test").unwrap();
        session.retreat();
        assert_eq!(session.current_index, 0);
        session.advance();
        session.retreat();
        assert_eq!(session.current_index, 0);
    }

    #[test]
    fn test_reset_discards_answers_and_flags() {
        let bank = bank(5);
        let mut session = QuizSession::new(&bank, 5, "test").unwrap();
        session.record_answer(0, Answer::Single("x".to_string()));
        session.submit(0);
        session.advance();

        // Reset is wholesale replacement with a fresh draw.
        session = QuizSession::new(&bank, 5, "test").unwrap();
        assert_eq!(session.current_index, 0);
        assert!(!session.completed);
        assert!(session.answers.iter().all(Answer::is_unanswered));
        assert!(session.submitted.iter().all(|s| !s));
    }

    #[test]
    fn test_select_highlighted_single_choice() {
        let bank = bank(1);
        let mut session = QuizSession::new(&bank, 1, "test").unwrap();
        session.select_highlighted();
        let first = session.questions[0].options[0].text.clone();
        assert_eq!(session.answers[0], Answer::Single(first));

        // Picking another option replaces the previous pick.
        session.highlight_down();
        session.select_highlighted();
        let second = session.questions[0].options[1].text.clone();
        assert_eq!(session.answers[0], Answer::Single(second));
    }

    #[test]
    fn test_select_highlighted_toggles_multiple_choice() {
        let mut bank = bank(1);
        bank[0].kind = QuestionKind::MultipleChoice;
        let mut session = QuizSession::new(&bank, 1, "test").unwrap();
        let first = session.questions[0].options[0].text.clone();
        let second = session.questions[0].options[1].text.clone();

        session.select_highlighted();
        assert_eq!(session.answers[0], Answer::Multiple(vec![first.clone()]));

        session.highlight_down();
        session.select_highlighted();
        assert_eq!(
            session.answers[0],
            Answer::Multiple(vec![first.clone(), second])
        );

        // Toggling off the last selection returns to unanswered.
        session.select_highlighted();
        assert_eq!(session.answers[0], Answer::Multiple(vec![first]));
        session.highlight_up();
        session.select_highlighted();
        assert_eq!(session.answers[0], Answer::Unanswered);
    }

    #[test]
    fn test_true_false_selection_uses_fixed_literals() {
        let mut bank = bank(1);
        bank[0].kind = QuestionKind::TrueFalse;
        bank[0].options.clear();
        bank[0].answer = vec![ANSWER_TRUE.to_string()];
        let mut session = QuizSession::new(&bank, 1, "test").unwrap();

        session.select_highlighted();
        assert_eq!(session.answers[0], Answer::Single(ANSWER_TRUE.to_string()));
        session.highlight_down();
        session.select_highlighted();
        assert_eq!(session.answers[0], Answer::Single(ANSWER_FALSE.to_string()));
        assert!(!session.submit(0));
    }

    #[test]
    fn test_highlight_bounded_by_option_count() {
        let bank = bank(1);
        let mut session = QuizSession::new(&bank, 1, "test").unwrap();
        for _ in 0..10 {
            session.highlight_down();
        }
        assert_eq!(session.highlighted, 1);
        for _ in 0..10 {
            session.highlight_up();
        }
        assert_eq!(session.highlighted, 0);
    }

    #[test]
    fn test_enter_submits_then_advances() {
        let bank = bank(2);
        let mut session = QuizSession::new(&bank, 2, "test").unwrap();
        let mut app_state = AppState::Quiz;

        handle_quiz_input(&mut session, key(KeyCode::Char(' ')), &mut app_state);
        handle_quiz_input(&mut session, key(KeyCode::Enter), &mut app_state);
        assert!(session.submitted[0]);
        assert_eq!(session.current_index, 0);

        handle_quiz_input(&mut session, key(KeyCode::Enter), &mut app_state);
        assert_eq!(session.current_index, 1);
        assert_eq!(app_state, AppState::Quiz);
    }

    #[test]
    fn test_enter_after_last_submission_reaches_summary() {
        let bank = bank(1);
        let mut session = QuizSession::new(&bank, 1, "test").unwrap();
        let mut app_state = AppState::Quiz;

        handle_quiz_input(&mut session, key(KeyCode::Enter), &mut app_state);
        assert!(session.submitted[0]);
        handle_quiz_input(&mut session, key(KeyCode::Enter), &mut app_state);
        assert!(session.completed);
        assert_eq!(app_state, AppState::Summary);
    }

    #[test]
    fn test_right_never_completes_an_unsubmitted_last_question() {
        let bank = bank(2);
        let mut session = QuizSession::new(&bank, 2, "test").unwrap();
        let mut app_state = AppState::Quiz;

        handle_quiz_input(&mut session, key(KeyCode::Right), &mut app_state);
        assert_eq!(session.current_index, 1);
        handle_quiz_input(&mut session, key(KeyCode::Right), &mut app_state);
        assert_eq!(session.current_index, 1);
        assert!(!session.completed);
        assert_eq!(app_state, AppState::Quiz);
    }

    #[test]
    fn test_navigation_resets_highlight() {
        let bank = bank(2);
        let mut session = QuizSession::new(&bank, 2, "test").unwrap();
        let mut app_state = AppState::Quiz;

        handle_quiz_input(&mut session, key(KeyCode::Down), &mut app_state);
        assert_eq!(session.highlighted, 1);
        handle_quiz_input(&mut session, key(KeyCode::Right), &mut app_state);
        assert_eq!(session.highlighted, 0);
    }

    #[test]
    fn test_esc_opens_quit_confirmation() {
        let bank = bank(1);
        let mut session = QuizSession::new(&bank, 1, "test").unwrap();
        let mut app_state = AppState::Quiz;

        handle_quiz_input(&mut session, key(KeyCode::Esc), &mut app_state);
        assert_eq!(app_state, AppState::QuizQuitConfirm);
    }
}
