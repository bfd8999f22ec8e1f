use ratatui::style::Color;

use crate::sim::health::HealthTier;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub overlay_border: Color,
    pub surface_bg: Color,
    pub statusbar_bg: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub status_ok: Color,
    pub status_warn: Color,
    pub status_err: Color,
    pub gauge_ok: Color,
    pub gauge_warn: Color,
    pub gauge_crit: Color,
    pub gauge_unfilled: Color,
    pub sparkline_cpu: Color,
    pub sparkline_mem: Color,
    pub bar_chart: Color,
    pub priority_high: Color,
    pub priority_medium: Color,
    pub priority_low: Color,
    pub row_warning: Color,
    pub row_critical: Color,
}

impl Theme {
    pub fn from_config(theme_name: &str) -> Self {
        match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Indexed(61),
            header_accent_fg: Color::Indexed(231),
            text_primary: Color::Indexed(252),
            text_secondary: Color::Indexed(245),
            overlay_border: Color::Indexed(240),
            surface_bg: Color::Indexed(236),
            statusbar_bg: Color::Indexed(235),
            pill_key_bg: Color::Indexed(61),
            pill_key_fg: Color::Indexed(231),
            pill_desc_fg: Color::Indexed(250),
            status_ok: Color::Indexed(114),
            status_warn: Color::Indexed(179),
            status_err: Color::Indexed(167),
            gauge_ok: Color::Indexed(71),
            gauge_warn: Color::Indexed(178),
            gauge_crit: Color::Indexed(160),
            gauge_unfilled: Color::Indexed(238),
            sparkline_cpu: Color::Indexed(110),
            sparkline_mem: Color::Indexed(174),
            bar_chart: Color::Indexed(109),
            priority_high: Color::Indexed(167),
            priority_medium: Color::Indexed(179),
            priority_low: Color::Indexed(108),
            row_warning: Color::Indexed(179),
            row_critical: Color::Indexed(167),
        }
    }

    fn light() -> Self {
        Theme {
            name: "light",
            header_accent_bg: Color::Indexed(104),
            header_accent_fg: Color::Indexed(231),
            text_primary: Color::Indexed(235),
            text_secondary: Color::Indexed(242),
            overlay_border: Color::Indexed(248),
            surface_bg: Color::Indexed(254),
            statusbar_bg: Color::Indexed(253),
            pill_key_bg: Color::Indexed(104),
            pill_key_fg: Color::Indexed(231),
            pill_desc_fg: Color::Indexed(238),
            status_ok: Color::Indexed(28),
            status_warn: Color::Indexed(130),
            status_err: Color::Indexed(124),
            gauge_ok: Color::Indexed(28),
            gauge_warn: Color::Indexed(130),
            gauge_crit: Color::Indexed(124),
            gauge_unfilled: Color::Indexed(251),
            sparkline_cpu: Color::Indexed(25),
            sparkline_mem: Color::Indexed(125),
            bar_chart: Color::Indexed(24),
            priority_high: Color::Indexed(124),
            priority_medium: Color::Indexed(130),
            priority_low: Color::Indexed(28),
            row_warning: Color::Indexed(130),
            row_critical: Color::Indexed(124),
        }
    }

    /// Gauge fill color mirroring the progress-bar severity bands.
    pub fn gauge_color(&self, value: f64) -> Color {
        if value > 80.0 {
            self.gauge_crit
        } else if value > 60.0 {
            self.gauge_warn
        } else {
            self.gauge_ok
        }
    }

    pub fn tier_color(&self, tier: HealthTier) -> Color {
        match tier {
            HealthTier::Normal => self.status_ok,
            HealthTier::Moderate | HealthTier::High => self.status_warn,
            HealthTier::Severe | HealthTier::Critical => self.status_err,
        }
    }

    pub fn priority_color(&self, priority: crate::sim::process::Priority) -> Color {
        match priority {
            crate::sim::process::Priority::High => self.priority_high,
            crate::sim::process::Priority::Medium => self.priority_medium,
            crate::sim::process::Priority::Low => self.priority_low,
        }
    }
}
