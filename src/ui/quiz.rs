use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::models::QuizStep;

pub fn render(frame: &mut Frame, area: Rect, step: &QuizStep, feedback: Option<bool>) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_round_label(frame, chunks[0], &step.round_label);
    render_poster(frame, chunks[1], step, feedback);
    render_question_text(frame, chunks[2], &step.question);
    render_controls(frame, chunks[3], feedback);
}

fn render_round_label(frame: &mut Frame, area: Rect, label: &str) {
    let widget = Paragraph::new(label)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

/// The poster frame doubles as the answer-feedback highlight: its border
/// flashes green or red for the duration of the advance delay.
fn render_poster(frame: &mut Frame, area: Rect, step: &QuizStep, feedback: Option<bool>) {
    let border_color = match feedback {
        Some(true) => Color::Green,
        Some(false) => Color::Red,
        None => Color::DarkGray,
    };

    let caption = format!("poster · {} KB", step.image.len() / 1024);
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(caption, Style::default().fg(Color::DarkGray))),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_color),
    );
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, feedback: Option<bool>) {
    let text = if feedback.is_some() {
        "next round coming up..."
    } else {
        "y yes  ·  n no  ·  q quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
