use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table, TableState};

use crate::format::{format_percent, truncate_unicode};
use crate::sim::process::SimProcess;
use crate::ui::theme::Theme;

/// Per-row severity highlighting kicks in at the same thresholds the
/// bottleneck alerts use.
const ROW_WARN: f64 = 60.0;
const ROW_CRIT: f64 = 80.0;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    processes: &[&SimProcess],
    selected: usize,
    sort_label: &str,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            format!(" Processes \u{b7} sort: {sort_label} "),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let header = Row::new(vec!["PID", "Name", "CPU", "Mem", "Priority", "Status"]).style(
        Style::default()
            .fg(theme.text_secondary)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = processes
        .iter()
        .map(|p| {
            let row_style = if p.cpu_percent > ROW_CRIT || p.memory_percent > ROW_CRIT {
                Style::default()
                    .fg(theme.row_critical)
                    .add_modifier(Modifier::BOLD)
            } else if p.cpu_percent > ROW_WARN || p.memory_percent > ROW_WARN {
                Style::default().fg(theme.row_warning)
            } else {
                Style::default().fg(theme.text_primary)
            };

            Row::new(vec![
                Cell::from(p.pid.to_string()),
                Cell::from(truncate_unicode(p.name, 20)),
                Cell::from(format_percent(p.cpu_percent)),
                Cell::from(format_percent(p.memory_percent)),
                Cell::from(p.priority.label())
                    .style(Style::default().fg(theme.priority_color(p.priority))),
                Cell::from(p.status.label()),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Min(14),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let selection = if processes.is_empty() {
        None
    } else {
        Some(selected.min(processes.len() - 1))
    };
    let mut state = TableState::default().with_selected(selection);
    frame.render_stateful_widget(table, area, &mut state);
}
