/// Load above this threshold is a critical overload and arms auto-kill.
pub const CRITICAL_LOAD: f64 = 90.0;
const SEVERE_LOAD: f64 = 75.0;
const HIGH_LOAD: f64 = 60.0;
const MODERATE_LOAD: f64 = 40.0;

const BASE_TEMP_C: f64 = 45.0;
const DEGREES_PER_LOAD: f64 = 0.5;

/// Severity classification of the system-wide load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum HealthTier {
    #[default]
    Normal,
    Moderate,
    High,
    Severe,
    Critical,
}

impl HealthTier {
    pub fn label(self) -> &'static str {
        match self {
            HealthTier::Normal => "Normal",
            HealthTier::Moderate => "Moderate",
            HealthTier::High => "High Load",
            HealthTier::Severe => "Severe Overload",
            HealthTier::Critical => "Critical Overload",
        }
    }

    /// Descriptive thermal band shown next to the temperature.
    pub fn thermal_band(self) -> &'static str {
        match self {
            HealthTier::Normal => "Cool",
            HealthTier::Moderate | HealthTier::High => "Warm",
            HealthTier::Severe => "Hot",
            HealthTier::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthReport {
    pub tier: HealthTier,
    pub overloaded: bool,
    pub overload_intensity: f64,
    pub thermal_temp: f64,
}

/// Synthetic thermal reading, a pure function of the current load with no
/// inertia modeled.
pub fn thermal_temp(system_load: f64) -> f64 {
    BASE_TEMP_C + system_load * DEGREES_PER_LOAD
}

/// Maps aggregate load to a severity tier. Rules are checked most severe
/// first with exclusive lower bounds; the first match wins. Everything
/// above Moderate counts as overloaded.
pub fn classify(system_load: f64) -> HealthReport {
    let (tier, overloaded, overload_intensity) = if system_load > CRITICAL_LOAD {
        (HealthTier::Critical, true, system_load.min(100.0))
    } else if system_load > SEVERE_LOAD {
        (HealthTier::Severe, true, system_load)
    } else if system_load > HIGH_LOAD {
        (HealthTier::High, true, system_load)
    } else if system_load > MODERATE_LOAD {
        (HealthTier::Moderate, false, 0.0)
    } else {
        (HealthTier::Normal, false, 0.0)
    };

    HealthReport {
        tier,
        overloaded,
        overload_intensity,
        thermal_temp: thermal_temp(system_load),
    }
}
