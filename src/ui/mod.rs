pub mod alerts;
pub mod charts;
pub mod header;
pub mod help;
pub mod statusbar;
pub mod table;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(
        frame,
        chunks[0],
        &app.snapshot,
        app.engine.is_running(),
        app.engine.policy(),
        app.engine.auto_kill_enabled(),
        &app.theme,
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(chunks[1]);

    let rows = app.sorted_processes();
    table::render(
        frame,
        body[0],
        &rows,
        app.selected_index,
        app.sort_mode.label(),
        &app.theme,
    );

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(1)])
        .split(body[1]);

    alerts::render(frame, side[0], &app.snapshot, &app.theme);
    charts::render(frame, side[1], &app.snapshot, &app.history, &app.theme);

    statusbar::render(
        frame,
        chunks[2],
        app.engine.is_running(),
        app.status_message.as_ref(),
        &app.theme,
    );

    // Overlay renders last so it sits on top
    if app.show_help() {
        help::render(frame, frame.area(), &app.help_entries(), &app.theme);
    }
}

#[cfg(test)]
mod tests;
