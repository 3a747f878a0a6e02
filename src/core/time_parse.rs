//! Parsers for the vendor's time encodings plus the label formatters used on
//! chart axes and tooltips.
//!
//! Parse failures are reported as `None`; a parsed time of exactly zero
//! seconds is a valid value.

/// Parses a net (chip) time of the form `HH:MM:SS,fff` into seconds.
///
/// All whitespace is stripped first. The fractional digits are read as a
/// decimal fraction, so `"01:02:03,5"` is `3723.5`.
#[must_use]
pub fn parse_net_time(text: &str) -> Option<f64> {
    let clean: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if clean.is_empty() {
        return None;
    }

    let parts: Vec<&str> = clean.split(':').collect();
    let [hours, minutes, rest] = parts.as_slice() else {
        return None;
    };
    let sec_fraction: Vec<&str> = rest.split(',').collect();
    let [seconds, fraction] = sec_fraction.as_slice() else {
        return None;
    };

    let hours = parse_component(hours)?;
    let minutes = parse_component(minutes)?;
    let seconds = parse_component(seconds)?;
    let fraction = parse_fraction(fraction)?;

    let total = hours * 3600.0 + minutes * 60.0 + seconds + fraction;
    total.is_finite().then_some(total)
}

/// Parses a start (clock) time of the form `HH:MM` or `HH:MM:SS` into
/// seconds since midnight.
#[must_use]
pub fn parse_start_time(text: &str) -> Option<f64> {
    let clean = text.trim();
    if clean.is_empty() {
        return None;
    }

    let parts: Vec<&str> = clean.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [hours, minutes] => (*hours, *minutes, None),
        [hours, minutes, seconds] => (*hours, *minutes, Some(*seconds)),
        _ => return None,
    };

    let hours = parse_component(hours)?;
    let minutes = parse_component(minutes)?;
    let seconds = match seconds {
        Some(value) => parse_component(value)?,
        None => 0.0,
    };

    let total = hours * 3600.0 + minutes * 60.0 + seconds;
    total.is_finite().then_some(total)
}

// Empty components count as zero, matching how the export treats "00::05".
fn parse_component(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }
    let value: f64 = text.parse().ok()?;
    value.is_finite().then_some(value)
}

fn parse_fraction(digits: &str) -> Option<f64> {
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if digits.is_empty() {
        return Some(0.0);
    }
    format!("0.{digits}").parse().ok()
}

/// Formats a minute count as `HH:MM`, flooring to whole minutes.
#[must_use]
pub fn minutes_to_label(minutes: f64) -> String {
    let total = if minutes.is_finite() {
        minutes.floor() as i64
    } else {
        0
    };
    let hours = total.div_euclid(60);
    let mins = total.rem_euclid(60);
    format!("{hours:02}:{mins:02}")
}

/// Formats seconds as `HH:MM:SS`, dropping any fraction.
#[must_use]
pub fn format_hms(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Formats a non-negative offset in seconds as `+M:SS`.
#[must_use]
pub fn format_offset(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("+{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn net_time_parses_hours_minutes_seconds_and_fraction() {
        let parsed = parse_net_time("01:02:03,456").expect("valid net time");
        assert_relative_eq!(parsed, 3723.456, epsilon = 1e-9);
    }

    #[test]
    fn net_time_ignores_embedded_whitespace() {
        let parsed = parse_net_time(" 00:45 :12,000 ").expect("valid net time");
        assert_relative_eq!(parsed, 2712.0, epsilon = 1e-9);
    }

    #[test]
    fn net_time_rejects_malformed_input() {
        assert_eq!(parse_net_time("bad"), None);
        assert_eq!(parse_net_time("1:2:3"), None);
        assert_eq!(parse_net_time(""), None);
        assert_eq!(parse_net_time("00:aa:10,0"), None);
        assert_eq!(parse_net_time("00:10:10,1,2"), None);
        assert_eq!(parse_net_time("00:10:10,x"), None);
    }

    #[test]
    fn overflowing_components_are_parse_failures() {
        assert_eq!(parse_net_time("1e306:00:00,000"), None);
        assert_eq!(parse_start_time("1e306:00"), None);
        assert!(parse_net_time("4000000000000000:00:00,000").is_some());
    }

    #[test]
    fn zero_net_time_is_not_a_parse_failure() {
        assert_eq!(parse_net_time("00:00:00,000"), Some(0.0));
    }

    #[test]
    fn start_time_accepts_optional_seconds() {
        assert_eq!(parse_start_time("08:15"), Some(29_700.0));
        assert_eq!(parse_start_time("08:15:30"), Some(29_730.0));
        assert_eq!(parse_start_time("  08:15:30 "), Some(29_730.0));
    }

    #[test]
    fn start_time_rejects_malformed_input() {
        assert_eq!(parse_start_time(""), None);
        assert_eq!(parse_start_time("08"), None);
        assert_eq!(parse_start_time("08:15:30:01"), None);
        assert_eq!(parse_start_time("ab:15"), None);
    }

    #[test]
    fn label_formatters_pad_components() {
        assert_eq!(minutes_to_label(45.0), "00:45");
        assert_eq!(minutes_to_label(125.9), "02:05");
        assert_eq!(format_hms(3723.456), "01:02:03");
        assert_eq!(format_offset(125.0), "+2:05");
    }
}
