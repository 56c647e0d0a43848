use crate::models::QuizSession;
use crate::ui::layout::calculate_summary_chunks;
use crate::utils::truncate_display;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_summary(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_summary_chunks(f.area());

    let title_text = format!("Round Summary - {}", session.bank_name);
    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let mut summary_text = Text::default();
    summary_text.push_line(Line::from(Span::styled(
        format!(
            "总得分: {} / {}  正确率: {:.2}%",
            session.score(),
            session.len(),
            session.percentage()
        ),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )));
    summary_text.push_line(Line::from(""));

    for (i, question) in session.questions.iter().enumerate() {
        let answer = &session.answers[i];
        let (mark, mark_style) = if question.is_correct(answer) {
            ("[✓]", Style::default().fg(Color::Green))
        } else {
            ("[✗]", Style::default().fg(Color::Red))
        };
        summary_text.push_line(Line::from(vec![
            Span::styled(mark, mark_style),
            Span::from(format!(
                " {}. {}",
                i + 1,
                truncate_display(&question.content, 60)
            )),
        ]));
        summary_text.push_line(Line::from(format!(
            "    你的答案: {}",
            truncate_display(&answer.display(), 56)
        )));
        summary_text.push_line(Line::from(format!(
            "    正确答案: {}",
            truncate_display(&question.answer.join(", "), 56)
        )));
        summary_text.push_line(Line::from(""));
    }

    let summary = Paragraph::new(summary_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, layout.content_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "r",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" New Round  "),
        Span::styled(
            "m",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Main Menu  "),
        Span::styled(
            "q",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
