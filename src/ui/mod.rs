mod loading;
mod notice;
mod quiz;
mod result;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, ViewState};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.state {
        ViewState::Loading => loading::render(frame, area),
        ViewState::Question { step, feedback } => quiz::render(frame, area, step, *feedback),
        ViewState::Results {
            correct,
            total,
            games_count,
            best_game,
            total_accuracy,
        } => result::render(
            frame,
            area,
            *correct,
            *total,
            *games_count,
            best_game,
            *total_accuracy,
        ),
        ViewState::Notice { message, .. } => notice::render(frame, area, message),
    }
}
