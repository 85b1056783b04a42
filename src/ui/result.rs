use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::models::GameResult;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    correct: u32,
    total: u32,
    games_count: u32,
    best_game: &GameResult,
    total_accuracy: f64,
) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score(frame, chunks[1], correct, total);
    render_statistics(frame, chunks[2], games_count, best_game, total_accuracy);
    render_controls(frame, chunks[3]);
}

fn render_score(frame: &mut Frame, area: Rect, correct: u32, total: u32) {
    let score_color = if correct == total {
        Color::Green
    } else {
        Color::Cyan
    };
    let content = vec![
        Line::from(Span::styled(
            "THAT ROUND IS OVER!",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Your result: {correct}/{total}"),
            Style::default().fg(score_color).bold(),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_statistics(
    frame: &mut Frame,
    area: Rect,
    games_count: u32,
    best_game: &GameResult,
    total_accuracy: f64,
) {
    let best_date = best_game.date.format("%d.%m.%y %H:%M");
    let lines = vec![
        Line::from(""),
        Line::from(format!("Games played: {games_count}")),
        Line::from(format!(
            "Best game: {}/{} ({best_date})",
            best_game.correct, best_game.total
        )),
        Line::from(format!("Average accuracy: {total_accuracy:.2}%")),
    ];

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .fg(Color::Gray);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("r play again  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
