use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ui::theme::Theme;

const KEY_COLUMN: usize = 8;

/// Centered overlay listing every keybind with its description. Sized to
/// the longest entry so the box hugs its content.
pub fn render(frame: &mut Frame, area: Rect, entries: &[(String, &str)], theme: &Theme) {
    let widest_desc = entries.iter().map(|(_, d)| d.len()).max().unwrap_or(0);
    // key column + padding + description + borders
    let width = ((KEY_COLUMN + widest_desc + 8) as u16).min(area.width.saturating_sub(2));
    let height = (entries.len() as u16 + 2).min(area.height.saturating_sub(2));

    let overlay = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, overlay);

    let key_style = Style::default()
        .fg(theme.pill_key_fg)
        .bg(theme.pill_key_bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(theme.pill_desc_fg);

    let lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!(" {key:>KEY_COLUMN$} "), key_style),
                Span::raw("  "),
                Span::styled(*desc, desc_style),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Keybinds ",
            Style::default()
                .fg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(overlay);

    frame.render_widget(block, overlay);
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.surface_bg)),
        inner,
    );
}
