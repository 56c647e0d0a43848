use crate::models::{Answer, QuestionKind, QuizSession};
use crate::ui::layout::calculate_quiz_chunks;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_quiz(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_quiz_chunks(f.area());

    let question = session.current_question();
    let progress = format!(
        "Question {} / {} - {}  [{} · {} · 难度: {}]",
        session.current_index + 1,
        session.len(),
        session.bank_name,
        question.kind.label(),
        question.category,
        question.difficulty,
    );

    let header = Paragraph::new(progress)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let question_text = Text::from(question.content.as_str());
    let question_widget = Paragraph::new(question_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question_widget, layout.question_area);

    let submitted = session.submitted[session.current_index];
    let answer = &session.answers[session.current_index];

    let mut options_text = Text::default();
    for (i, option) in question.display_options().iter().enumerate() {
        let picked = match answer {
            Answer::Single(text) => text == option,
            Answer::Multiple(texts) => texts.iter().any(|t| t == option),
            Answer::Unanswered => false,
        };
        let marker = match (question.kind, picked) {
            (QuestionKind::MultipleChoice, true) => "[x]",
            (QuestionKind::MultipleChoice, false) => "[ ]",
            (_, true) => "(x)",
            (_, false) => "( )",
        };
        let cursor = if !submitted && i == session.highlighted {
            "▸ "
        } else {
            "  "
        };
        let style = if !submitted && i == session.highlighted {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        options_text.push_line(Line::from(Span::styled(
            format!("{}{} {}", cursor, marker, option),
            style,
        )));
    }

    if submitted {
        options_text.push_line(Line::from(""));
        if question.is_correct(answer) {
            options_text.push_line(Line::from(Span::styled(
                "回答正确！",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        } else {
            options_text.push_line(Line::from(Span::styled(
                format!("回答错误！正确答案是: {}", question.answer.join(", ")),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }
    }

    let options_title = if submitted {
        "Result"
    } else {
        "Options"
    };
    let options_widget = Paragraph::new(options_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(options_title));
    f.render_widget(options_widget, layout.options_area);

    let mut help_text = Vec::new();
    if !submitted {
        help_text.push(Line::from(vec![
            Span::styled(
                "↑/↓",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(" Highlight  "),
            Span::styled(
                "Space",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(" Select  "),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(" Submit"),
        ]));
    } else {
        help_text.push(Line::from(vec![
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(" Next"),
        ]));
    }
    help_text.push(Line::from(vec![
        Span::styled(
            "←/→",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Prev/Next Question  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit to Menu"),
    ]));

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Quit to Menu")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Return to main menu? Current round progress will be lost.")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Return to Menu)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue Quiz)"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
