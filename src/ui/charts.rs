use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Sparkline};

use crate::format::{format_percent, truncate_unicode};
use crate::sim::history::LoadHistory;
use crate::sim::snapshot::SimSnapshot;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SimSnapshot,
    history: &LoadHistory,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(1),
        ])
        .split(area);

    render_sparkline(
        frame,
        chunks[0],
        format!(" CPU {} ", format_percent(snapshot.aggregate_cpu)),
        history.cpu(),
        theme.sparkline_cpu,
        theme,
    );
    render_sparkline(
        frame,
        chunks[1],
        format!(" Mem {} ", format_percent(snapshot.aggregate_memory)),
        history.memory(),
        theme.sparkline_mem,
        theme,
    );
    render_top_chart(frame, chunks[2], snapshot, theme);
}

fn render_sparkline(
    frame: &mut Frame,
    area: Rect,
    title: String,
    samples: &std::collections::VecDeque<u64>,
    color: ratatui::style::Color,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let data: Vec<u64> = samples.iter().copied().collect();
    let sparkline = Sparkline::default()
        .block(block)
        .data(&data)
        .max(100)
        .style(Style::default().fg(color));

    frame.render_widget(sparkline, area);
}

fn render_top_chart(frame: &mut Frame, area: Rect, snapshot: &SimSnapshot, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Top 5 by CPU ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let top = snapshot.top_by_cpu(5);
    let bars: Vec<Bar> = top
        .iter()
        .map(|p| {
            Bar::default()
                .label(truncate_unicode(p.name, 9))
                .value(p.cpu_percent.round() as u64)
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(9)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme.bar_chart))
        .value_style(
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        )
        .data(BarGroup::default().bars(&bars))
        .max(100);

    frame.render_widget(chart, area);
}
