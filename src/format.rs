use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Uptime as minutes:seconds; a dash placeholder while the simulation has
/// no start timestamp.
pub fn format_uptime(seconds: Option<u64>) -> String {
    match seconds {
        Some(s) => format!("{}:{:02}", s / 60, s % 60),
        None => "--:--".to_string(),
    }
}
