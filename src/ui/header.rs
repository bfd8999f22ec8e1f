use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::format::{format_percent, format_uptime};
use crate::sim::aggregate::AggregationPolicy;
use crate::sim::snapshot::SimSnapshot;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SimSnapshot,
    running: bool,
    policy: AggregationPolicy,
    auto_kill: bool,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(22),
            Constraint::Percentage(22),
            Constraint::Percentage(22),
        ])
        .split(area);

    render_branding(frame, chunks[0], snapshot, running, policy, auto_kill, theme);
    render_gauge(
        frame,
        chunks[1],
        " CPU ",
        snapshot.aggregate_cpu,
        snapshot.aggregate_cpu,
        theme,
    );
    render_gauge(
        frame,
        chunks[2],
        " Mem ",
        snapshot.aggregate_memory,
        snapshot.aggregate_memory,
        theme,
    );
    render_load_gauge(frame, chunks[3], snapshot, theme);
}

fn render_branding(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SimSnapshot,
    running: bool,
    policy: AggregationPolicy,
    auto_kill: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (run_label, run_color) = if running {
        ("Running", theme.status_ok)
    } else {
        ("Stopped", theme.status_err)
    };

    let top = Line::from(vec![
        Span::styled(
            " simtop ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            run_label,
            Style::default().fg(run_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Procs: {}", snapshot.processes.len()),
            Style::default().fg(theme.text_secondary),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Aggr: {}", policy.label()),
            Style::default().fg(theme.text_secondary),
        ),
    ]);

    let bottom = Line::from(vec![
        Span::styled(
            format!(" Uptime {}", format_uptime(snapshot.uptime_seconds)),
            Style::default().fg(theme.text_secondary),
        ),
        Span::raw("  "),
        Span::styled(
            format!(
                "Thermal {} ({:.0}\u{b0}C)",
                snapshot.tier.thermal_band(),
                snapshot.thermal_temp
            ),
            Style::default().fg(theme.tier_color(snapshot.tier)),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Auto-kill {}", if auto_kill { "ON" } else { "OFF" }),
            Style::default().fg(theme.text_secondary),
        ),
    ]);

    frame.render_widget(Paragraph::new(vec![top, bottom]), inner);
}

fn render_gauge(frame: &mut Frame, area: Rect, title: &str, value: f64, color_by: f64, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            title.to_string(),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(
            Style::default()
                .fg(theme.gauge_color(color_by))
                .bg(theme.gauge_unfilled),
        )
        .ratio((value / 100.0).clamp(0.0, 1.0))
        .label(format_percent(value));

    frame.render_widget(gauge, area);
}

fn render_load_gauge(frame: &mut Frame, area: Rect, snapshot: &SimSnapshot, theme: &Theme) {
    let title = format!(" Load \u{b7} {} ", snapshot.tier.label());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.tier_color(snapshot.tier)))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.tier_color(snapshot.tier))
                .add_modifier(Modifier::BOLD),
        ));

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(
            Style::default()
                .fg(theme.gauge_color(snapshot.system_load))
                .bg(theme.gauge_unfilled),
        )
        .ratio((snapshot.system_load / 100.0).clamp(0.0, 1.0))
        .label(format_percent(snapshot.system_load));

    frame.render_widget(gauge, area);
}
