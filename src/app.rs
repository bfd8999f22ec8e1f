use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::{Action, Direction};
use crate::config::{Config, parse_key};
use crate::sim::aggregate::AggregationPolicy;
use crate::sim::engine::Engine;
use crate::sim::history::LoadHistory;
use crate::sim::process::SimProcess;
use crate::sim::snapshot::SimSnapshot;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub toggle_sim: KeyCode,
    pub add: KeyCode,
    pub kill: KeyCode,
    pub kill_top: KeyCode,
    pub overload: KeyCode,
    pub clear: KeyCode,
    pub cycle_sort: KeyCode,
    pub cycle_aggregation: KeyCode,
    pub toggle_auto_kill: KeyCode,
    pub optimize: KeyCode,
    pub help: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &crate::config::KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            toggle_sim: parse_key(&kb.toggle_sim).unwrap_or(KeyCode::Char(' ')),
            add: parse_key(&kb.add).unwrap_or(KeyCode::Char('a')),
            kill: parse_key(&kb.kill).unwrap_or(KeyCode::Char('k')),
            kill_top: parse_key(&kb.kill_top).unwrap_or(KeyCode::Char('K')),
            overload: parse_key(&kb.overload).unwrap_or(KeyCode::Char('o')),
            clear: parse_key(&kb.clear).unwrap_or(KeyCode::Char('x')),
            cycle_sort: parse_key(&kb.cycle_sort).unwrap_or(KeyCode::Char('s')),
            cycle_aggregation: parse_key(&kb.cycle_aggregation).unwrap_or(KeyCode::Char('g')),
            toggle_auto_kill: parse_key(&kb.toggle_auto_kill).unwrap_or(KeyCode::Char('A')),
            optimize: parse_key(&kb.optimize).unwrap_or(KeyCode::Char('z')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        let mut entries = vec![
            (key_label(self.toggle_sim), "Start / stop simulation"),
            (key_label(self.add), "Add process"),
            (key_label(self.kill), "Kill selected process"),
            (key_label(self.kill_top), "Kill top CPU process"),
            (key_label(self.overload), "Trigger overload burst"),
            (key_label(self.optimize), "Optimize resources"),
            (key_label(self.clear), "Clear all processes"),
            (key_label(self.cycle_sort), "Cycle sort mode"),
            (key_label(self.cycle_aggregation), "Cycle aggregation policy"),
            (key_label(self.toggle_auto_kill), "Toggle auto-kill"),
            (key_label(self.help), "Toggle help"),
            (key_label(self.quit), "Quit"),
        ];
        entries.push(("↑↓".to_string(), "Select process"));
        entries.push(("Ctrl+C".to_string(), "Quit (always)"));
        entries
    }
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        _ => "?".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Cpu,
    Memory,
    Pid,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            SortMode::Cpu => SortMode::Memory,
            SortMode::Memory => SortMode::Pid,
            SortMode::Pid => SortMode::Cpu,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Cpu => "CPU",
            SortMode::Memory => "Memory",
            SortMode::Pid => "PID",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => SortMode::Memory,
            "pid" => SortMode::Pid,
            _ => SortMode::Cpu,
        }
    }
}

pub struct App {
    pub running: bool,
    pub engine: Engine,
    pub snapshot: SimSnapshot,
    pub history: LoadHistory,
    pub selected_index: usize,
    pub input_mode: InputMode,
    pub sort_mode: SortMode,
    pub theme: Theme,
    pub status_message: Option<(String, Instant)>,
    pub keybinds: ResolvedKeybinds,
}

impl App {
    pub fn new(config: Config, seed: Option<u64>) -> Self {
        let tuning = config.simulation.tuning();
        let policy = AggregationPolicy::from_str_config(&config.general.default_aggregation);
        let mut engine = match seed {
            Some(seed) => Engine::with_seed(seed, tuning, policy, config.general.auto_kill),
            None => Engine::new(tuning, policy, config.general.auto_kill),
        };
        if config.general.autostart {
            engine.start();
        }

        let mut app = App {
            running: true,
            engine,
            snapshot: SimSnapshot::default(),
            history: LoadHistory::default(),
            selected_index: 0,
            input_mode: InputMode::Normal,
            sort_mode: SortMode::from_str_config(&config.general.default_sort),
            theme: Theme::from_config(&config.general.theme),
            status_message: None,
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
        };
        app.refresh_data();
        app
    }

    /// Pulls a fresh snapshot out of the engine and records the chart
    /// sample. Called after every mutating operation, mirroring the
    /// recompute-and-display pass.
    pub fn refresh_data(&mut self) {
        self.snapshot = self.engine.refresh();
        self.history
            .record(self.snapshot.aggregate_cpu, self.snapshot.aggregate_memory);

        if !self.snapshot.processes.is_empty() && self.selected_index >= self.snapshot.processes.len()
        {
            self.selected_index = self.snapshot.processes.len() - 1;
        }

        // Clear expired status messages (older than 3 seconds)
        if let Some((_, created)) = &self.status_message
            && created.elapsed().as_secs() >= 3
        {
            self.status_message = None;
        }
    }

    /// Timer tick from the event loop. A stopped engine observes its flag
    /// and the tick is dropped without a redraw.
    pub fn on_tick(&mut self) -> bool {
        if !self.engine.is_running() {
            return false;
        }
        self.engine.tick();
        self.refresh_data();
        true
    }

    /// Snapshot processes in display order for the table.
    pub fn sorted_processes(&self) -> Vec<&SimProcess> {
        let mut rows: Vec<&SimProcess> = self.snapshot.processes.iter().collect();
        match self.sort_mode {
            SortMode::Cpu => rows.sort_by(|a, b| {
                b.cpu_percent
                    .partial_cmp(&a.cpu_percent)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            SortMode::Memory => rows.sort_by(|a, b| {
                b.memory_percent
                    .partial_cmp(&a.memory_percent)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            SortMode::Pid => rows.sort_by_key(|p| p.pid),
        }
        rows
    }

    pub fn selected_pid(&self) -> Option<u64> {
        self.sorted_processes()
            .get(self.selected_index)
            .map(|p| p.pid)
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::Help => self.map_key_help(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        // Arrow keys are hardwired (not configurable)
        if let KeyCode::Up = code {
            return Action::Navigate(Direction::Up);
        }
        if let KeyCode::Down = code {
            return Action::Navigate(Direction::Down);
        }

        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.toggle_sim {
            return Action::ToggleSimulation;
        }
        if code == kb.add {
            return Action::AddProcess;
        }
        if code == kb.kill {
            return if let Some(pid) = self.selected_pid() {
                Action::Kill(pid)
            } else {
                Action::None
            };
        }
        if code == kb.kill_top {
            return Action::KillTop;
        }
        if code == kb.overload {
            return Action::TriggerOverload;
        }
        if code == kb.clear {
            return Action::ClearAll;
        }
        if code == kb.cycle_sort {
            return Action::CycleSortMode;
        }
        if code == kb.cycle_aggregation {
            return Action::CycleAggregation;
        }
        if code == kb.toggle_auto_kill {
            return Action::ToggleAutoKill;
        }
        if code == kb.optimize {
            return Action::OptimizeResources;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }

        Action::None
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        let code = key.code;
        // In help mode, only the help key and Esc dismiss, everything else is ignored
        if code == self.keybinds.help || code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Navigate(dir) => self.navigate(dir),
            Action::ToggleSimulation => {
                if self.engine.is_running() {
                    self.engine.stop();
                    self.set_status("Simulation stopped");
                } else {
                    self.engine.start();
                    self.set_status("Simulation started");
                }
                self.refresh_data();
            }
            Action::AddProcess => {
                self.engine.add_process();
                self.refresh_data();
            }
            Action::Kill(pid) => {
                if self.engine.kill_process(pid) {
                    self.set_status(format!("Killed PID {pid}"));
                }
                self.refresh_data();
            }
            Action::KillTop => {
                if let Some(pid) = self.engine.kill_top_process() {
                    self.set_status(format!("Killed top process PID {pid}"));
                }
                self.refresh_data();
            }
            Action::TriggerOverload => {
                self.engine.trigger_overload_burst();
                self.set_status("Overload burst triggered");
                self.refresh_data();
            }
            Action::ClearAll => {
                self.engine.clear_all();
                self.selected_index = 0;
                self.set_status("All processes cleared");
                self.refresh_data();
            }
            Action::CycleSortMode => {
                self.sort_mode = self.sort_mode.next();
                self.set_status(format!("Sort: {}", self.sort_mode.label()));
            }
            Action::CycleAggregation => {
                let policy = self.engine.policy().next();
                self.engine.set_policy(policy);
                self.set_status(format!("Aggregation: {}", policy.label()));
                self.refresh_data();
            }
            Action::ToggleAutoKill => {
                let enabled = !self.engine.auto_kill_enabled();
                self.engine.set_auto_kill_enabled(enabled);
                self.set_status(if enabled {
                    "Auto-kill enabled"
                } else {
                    "Auto-kill disabled"
                });
            }
            Action::OptimizeResources => {
                if self.engine.optimize_resources() {
                    self.set_status("Resources optimized");
                } else {
                    self.set_status("Cannot optimize during overload");
                }
                self.refresh_data();
            }
            Action::ToggleHelp => {
                self.input_mode = if self.input_mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
            }
            Action::None => {}
        }
    }

    fn navigate(&mut self, direction: Direction) {
        let len = self.snapshot.processes.len();
        if len == 0 {
            return;
        }
        match direction {
            Direction::Up => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            Direction::Down => {
                self.selected_index = (self.selected_index + 1).min(len - 1);
            }
        }
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_app() -> App {
        App::new(Config::default(), Some(99))
    }

    #[test]
    fn sort_mode_cycles_through_all_variants() {
        let mode = SortMode::Cpu;
        assert_eq!(mode.next(), SortMode::Memory);
        assert_eq!(mode.next().next(), SortMode::Pid);
        assert_eq!(mode.next().next().next(), SortMode::Cpu);
    }

    #[test]
    fn default_keybinds_map_to_expected_actions() {
        let app = make_test_app();

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::Quit);

        let key = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::ToggleSimulation);

        let key = KeyEvent::new(KeyCode::Char('o'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::TriggerOverload);

        let key = KeyEvent::new(KeyCode::Char('K'), KeyModifiers::SHIFT);
        assert_eq!(app.map_key(key), Action::KillTop);

        let key = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::ToggleHelp);

        // Ctrl+C always quits
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(key), Action::Quit);

        // Arrow keys stay hardwired
        let key = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::Navigate(Direction::Up));
    }

    #[test]
    fn kill_key_targets_selected_row() {
        let mut app = make_test_app();
        app.dispatch(Action::ToggleSimulation);
        assert_eq!(app.snapshot.processes.len(), 6);

        // Selection index 0 in CPU sort order is the top consumer.
        let expected = app.sorted_processes()[0].pid;
        let key = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::Kill(expected));

        app.dispatch(Action::Kill(expected));
        assert_eq!(app.snapshot.processes.len(), 5);
        assert!(app.snapshot.processes.iter().all(|p| p.pid != expected));
    }

    #[test]
    fn kill_key_is_noop_on_empty_collection() {
        let app = make_test_app();
        assert!(app.snapshot.processes.is_empty());
        let key = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::None);
    }

    #[test]
    fn help_mode_blocks_other_keys() {
        let mut app = make_test_app();

        app.dispatch(Action::ToggleHelp);
        assert_eq!(app.input_mode, InputMode::Help);
        assert!(app.show_help());

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::None);

        let key = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::ToggleHelp);

        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::ToggleHelp);

        // Ctrl+C still works (safety)
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(key), Action::Quit);

        app.dispatch(Action::ToggleHelp);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn toggle_simulation_starts_and_stops_engine() {
        let mut app = make_test_app();
        assert!(!app.engine.is_running());

        app.dispatch(Action::ToggleSimulation);
        assert!(app.engine.is_running());
        assert_eq!(app.snapshot.processes.len(), 6);
        assert!(app.snapshot.uptime_seconds.is_some());

        app.dispatch(Action::ToggleSimulation);
        assert!(!app.engine.is_running());
    }

    #[test]
    fn tick_is_dropped_while_stopped() {
        let mut app = make_test_app();
        assert!(!app.on_tick());

        app.dispatch(Action::ToggleSimulation);
        assert!(app.on_tick());
    }

    #[test]
    fn cycle_aggregation_updates_engine_policy() {
        let mut app = make_test_app();
        assert_eq!(app.engine.policy(), AggregationPolicy::Sum);
        app.dispatch(Action::CycleAggregation);
        assert_eq!(app.engine.policy(), AggregationPolicy::Average);
        app.dispatch(Action::CycleAggregation);
        assert_eq!(app.engine.policy(), AggregationPolicy::Max);
    }

    #[test]
    fn toggle_auto_kill_flips_flag_and_sets_status() {
        let mut app = make_test_app();
        assert!(app.engine.auto_kill_enabled());
        app.dispatch(Action::ToggleAutoKill);
        assert!(!app.engine.auto_kill_enabled());
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert_eq!(msg, "Auto-kill disabled");
    }

    #[test]
    fn clear_all_resets_selection_and_uptime() {
        let mut app = make_test_app();
        app.dispatch(Action::ToggleSimulation);
        app.dispatch(Action::Navigate(Direction::Down));
        assert_eq!(app.selected_index, 1);

        app.dispatch(Action::ClearAll);
        assert!(app.snapshot.processes.is_empty());
        assert_eq!(app.selected_index, 0);
        assert!(app.snapshot.uptime_seconds.is_none());
    }

    #[test]
    fn navigation_clamps_to_collection_bounds() {
        let mut app = make_test_app();
        app.dispatch(Action::ToggleSimulation);

        app.dispatch(Action::Navigate(Direction::Up));
        assert_eq!(app.selected_index, 0);

        for _ in 0..20 {
            app.dispatch(Action::Navigate(Direction::Down));
        }
        assert_eq!(app.selected_index, app.snapshot.processes.len() - 1);
    }
}
