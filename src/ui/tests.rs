use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::action::Action;
use crate::app::App;
use crate::config::Config;
use crate::sim::health::classify;
use crate::sim::snapshot::SimSnapshot;
use crate::ui::theme::Theme;
use crate::ui::{header, statusbar};

fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            let cell = buf.cell((x, y)).unwrap();
            out.push_str(cell.symbol());
        }
        if y + 1 < area.height {
            out.push('\n');
        }
    }
    out
}

fn render_to_string<F>(width: u16, height: u16, draw: F) -> String
where
    F: FnOnce(&mut ratatui::Frame),
{
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    let buf = terminal.backend().buffer();
    buffer_to_string(buf)
}

fn overloaded_snapshot() -> SimSnapshot {
    let report = classify(95.0);
    SimSnapshot {
        aggregate_cpu: 95.0,
        aggregate_memory: 40.0,
        system_load: 95.0,
        tier: report.tier,
        overloaded: report.overloaded,
        overload_intensity: report.overload_intensity,
        thermal_temp: report.thermal_temp,
        uptime_seconds: Some(125),
        ..Default::default()
    }
}

#[test]
fn full_draw_renders_every_panel() {
    let mut app = App::new(Config::default(), Some(7));
    app.dispatch(Action::ToggleSimulation);

    let output = render_to_string(140, 40, |frame| super::draw(frame, &app));
    assert!(output.contains("simtop"));
    assert!(output.contains("Processes"));
    assert!(output.contains("Health"));
    assert!(output.contains("Top 5 by CPU"));
    assert!(output.contains("Running"));
    assert!(output.contains("Procs: 6"));
}

#[test]
fn full_draw_on_empty_stopped_app_does_not_panic() {
    let app = App::new(Config::default(), Some(7));
    let output = render_to_string(100, 30, |frame| super::draw(frame, &app));
    assert!(output.contains("Stopped"));
    assert!(output.contains("--:--"));
}

#[test]
fn help_overlay_draws_on_top() {
    let mut app = App::new(Config::default(), Some(7));
    app.dispatch(Action::ToggleHelp);

    let output = render_to_string(120, 40, |frame| super::draw(frame, &app));
    assert!(output.contains("Keybinds"));
    assert!(output.contains("Trigger overload burst"));
}

#[test]
fn header_shows_uptime_and_thermal_band() {
    let snapshot = overloaded_snapshot();
    let theme = Theme::from_config("dark");

    let output = render_to_string(160, 4, |frame| {
        header::render(
            frame,
            Rect::new(0, 0, 160, 4),
            &snapshot,
            true,
            crate::sim::aggregate::AggregationPolicy::Sum,
            true,
            &theme,
        );
    });
    assert!(output.contains("Uptime 2:05"));
    assert!(output.contains("Thermal Critical"));
    assert!(output.contains("Critical Overload"));
}

#[test]
fn statusbar_prefers_status_message_over_pills() {
    let theme = Theme::from_config("dark");
    let msg = ("Killed PID 1003".to_string(), std::time::Instant::now());

    let output = render_to_string(80, 1, |frame| {
        statusbar::render(frame, Rect::new(0, 0, 80, 1), true, Some(&msg), &theme);
    });
    assert!(output.contains("Killed PID 1003"));
    assert!(!output.contains("Quit"));
}
