use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use serde::Deserialize;

use crate::sim::SimTuning;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub simulation: SimulationConfig,
    pub keybinds: KeybindsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub tick_rate_ms: u64,
    pub default_sort: String,
    pub default_aggregation: String,
    pub auto_kill: bool,
    pub autostart: bool,
    pub theme: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            tick_rate_ms: 2000,
            default_sort: "cpu".to_string(),
            default_aggregation: "sum".to_string(),
            auto_kill: true,
            autostart: false,
            theme: "dark".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed_processes: usize,
    pub max_processes: usize,
    pub min_processes: usize,
    pub spawn_probability: f64,
    pub reap_probability: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            seed_processes: 6,
            max_processes: 12,
            min_processes: 3,
            spawn_probability: 0.10,
            reap_probability: 0.05,
        }
    }
}

impl SimulationConfig {
    pub fn tuning(&self) -> SimTuning {
        SimTuning {
            seed_processes: self.seed_processes,
            max_processes: self.max_processes,
            min_processes: self.min_processes,
            spawn_probability: self.spawn_probability.clamp(0.0, 1.0),
            reap_probability: self.reap_probability.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub toggle_sim: String,
    pub add: String,
    pub kill: String,
    pub kill_top: String,
    pub overload: String,
    pub clear: String,
    pub cycle_sort: String,
    pub cycle_aggregation: String,
    pub toggle_auto_kill: String,
    pub optimize: String,
    pub help: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            toggle_sim: "Space".to_string(),
            add: "a".to_string(),
            kill: "k".to_string(),
            kill_top: "K".to_string(),
            overload: "o".to_string(),
            clear: "x".to_string(),
            cycle_sort: "s".to_string(),
            cycle_aggregation: "g".to_string(),
            toggle_auto_kill: "A".to_string(),
            optimize: "z".to_string(),
            help: "?".to_string(),
        }
    }
}

/// Parses a config keybind string into a key code. Single characters map
/// verbatim (case matters); a few named keys are accepted.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    match s {
        "Enter" | "enter" => Some(KeyCode::Enter),
        "Escape" | "escape" | "Esc" | "esc" => Some(KeyCode::Esc),
        "Space" | "space" => Some(KeyCode::Char(' ')),
        "Tab" | "tab" => Some(KeyCode::Tab),
        "Backspace" | "backspace" => Some(KeyCode::Backspace),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("simtop").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.general.tick_rate_ms, 2000);
        assert_eq!(config.general.default_sort, "cpu");
        assert_eq!(config.general.default_aggregation, "sum");
        assert!(config.general.auto_kill);
        assert!(!config.general.autostart);
        assert_eq!(config.simulation.seed_processes, 6);
        assert_eq!(config.simulation.max_processes, 12);
        assert_eq!(config.keybinds.quit, "q");
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
tick_rate_ms = 500
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.tick_rate_ms, 500);
        // Other fields should be defaults
        assert_eq!(config.general.default_sort, "cpu");
        assert_eq!(config.simulation.min_processes, 3);
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[general]
tick_rate_ms = 1000
default_aggregation = "max"
auto_kill = false
autostart = true

[simulation]
seed_processes = 4
spawn_probability = 0.5

[keybinds]
quit = "Q"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.tick_rate_ms, 1000);
        assert_eq!(config.general.default_aggregation, "max");
        assert!(!config.general.auto_kill);
        assert!(config.general.autostart);
        assert_eq!(config.simulation.seed_processes, 4);
        assert!((config.simulation.spawn_probability - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.keybinds.quit, "Q");
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.general.tick_rate_ms, 2000);
    }

    #[test]
    fn invalid_toml_returns_default() {
        let temp = std::env::temp_dir().join("simtop_test_invalid.toml");
        std::fs::write(&temp, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&temp);
        assert_eq!(config.general.tick_rate_ms, 2000);
        let _ = std::fs::remove_file(&temp);
    }

    #[test]
    fn tuning_clamps_probabilities() {
        let sim = SimulationConfig {
            spawn_probability: 2.5,
            reap_probability: -1.0,
            ..SimulationConfig::default()
        };
        let tuning = sim.tuning();
        assert_eq!(tuning.spawn_probability, 1.0);
        assert_eq!(tuning.reap_probability, 0.0);
    }

    #[test]
    fn parse_key_handles_named_and_single_chars() {
        assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("Esc"), Some(KeyCode::Esc));
        assert_eq!(parse_key("K"), Some(KeyCode::Char('K')));
        assert_eq!(parse_key("?"), Some(KeyCode::Char('?')));
        assert_eq!(parse_key("too-long"), None);
    }
}
