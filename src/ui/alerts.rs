use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::format::format_percent;
use crate::sim::remediation::NORMAL_RESPONSE_MS;
use crate::sim::snapshot::SimSnapshot;
use crate::ui::theme::Theme;

const WARN_THRESHOLD: f64 = 60.0;
const CRIT_THRESHOLD: f64 = 80.0;

pub fn render(frame: &mut Frame, area: Rect, snapshot: &SimSnapshot, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Health ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cpu = snapshot.aggregate_cpu;
    let mem = snapshot.aggregate_memory;
    let mut lines: Vec<Line> = Vec::new();

    let secondary = Style::default().fg(theme.text_secondary);
    lines.push(Line::from(Span::styled(
        format!(
            "CPU  Avg {} \u{b7} Sum {} \u{b7} Max {}",
            format_percent(snapshot.cpu_breakdown.avg),
            format_percent(snapshot.cpu_breakdown.sum),
            format_percent(snapshot.cpu_breakdown.max),
        ),
        secondary,
    )));
    lines.push(Line::from(Span::styled(
        format!(
            "Mem  Avg {} \u{b7} Sum {} \u{b7} Max {}",
            format_percent(snapshot.mem_breakdown.avg),
            format_percent(snapshot.mem_breakdown.sum),
            format_percent(snapshot.mem_breakdown.max),
        ),
        secondary,
    )));

    let crit_style = Style::default()
        .fg(theme.status_err)
        .add_modifier(Modifier::BOLD);
    let warn_style = Style::default().fg(theme.status_warn);
    let ok_style = Style::default().fg(theme.status_ok);

    if cpu > CRIT_THRESHOLD {
        lines.push(Line::from(Span::styled(
            format!("CRITICAL: CPU bottleneck at {}", format_percent(cpu)),
            crit_style,
        )));
    } else if cpu > WARN_THRESHOLD {
        lines.push(Line::from(Span::styled(
            format!("WARNING: high CPU usage at {}", format_percent(cpu)),
            warn_style,
        )));
    }

    if mem > CRIT_THRESHOLD {
        lines.push(Line::from(Span::styled(
            format!("CRITICAL: memory bottleneck at {}", format_percent(mem)),
            crit_style,
        )));
    } else if mem > WARN_THRESHOLD {
        lines.push(Line::from(Span::styled(
            format!("WARNING: high memory usage at {}", format_percent(mem)),
            warn_style,
        )));
    }

    if cpu <= WARN_THRESHOLD && mem <= WARN_THRESHOLD {
        lines.push(Line::from(Span::styled(
            "System running optimally",
            ok_style,
        )));
    }

    if snapshot.overloaded {
        lines.push(Line::from(Span::styled(
            "SYSTEM OVERLOAD DETECTED",
            crit_style,
        )));
    }
    if let Some(advisory) = &snapshot.advisory {
        lines.push(Line::from(Span::styled(
            format!("Queue backlog: {} tasks waiting", advisory.backlog_tasks),
            warn_style,
        )));
        lines.push(Line::from(Span::styled(
            format!(
                "Response time: {:.0}ms (normal {:.0}ms)",
                advisory.response_time_ms, NORMAL_RESPONSE_MS
            ),
            warn_style,
        )));
    }

    let top_names: Vec<&str> = snapshot.top_by_cpu(3).iter().map(|p| p.name).collect();
    for suggestion in suggestions(cpu, mem, &top_names) {
        lines.push(Line::from(Span::styled(
            format!("\u{2022} {suggestion}"),
            Style::default().fg(theme.text_primary),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Advisory text mirroring the load bands: tuning hints under pressure,
/// reassurance otherwise.
fn suggestions(cpu: f64, mem: f64, top_names: &[&str]) -> Vec<String> {
    if cpu > CRIT_THRESHOLD || mem > CRIT_THRESHOLD {
        vec![
            "Reduce priority of high-usage processes".to_string(),
            format!("Top consumers: {}", top_names.join(", ")),
            "Reallocate resources from low-priority tasks".to_string(),
        ]
    } else if cpu > WARN_THRESHOLD || mem > WARN_THRESHOLD {
        vec![
            "Monitor system for potential bottlenecks".to_string(),
            "Resources allocated within acceptable range".to_string(),
        ]
    } else {
        vec![
            "System resources well-balanced".to_string(),
            "All processes running within normal parameters".to_string(),
        ]
    }
}
