//! Shared helpers for duration formatting and percentage rounding.

/// Formats a whole-second total as zero-padded `HH:MM:SS`.
///
/// Hours are unbounded: totals past a day render as e.g. `27:15:09`.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Parses an `HH:MM:SS` clock string into whole seconds.
///
/// Hours are unbounded; minutes and seconds must be below 60. An optional
/// `N days ` prefix (as pandas renders timedeltas) is accepted. Returns
/// `None` for anything else.
pub fn parse_hms(input: &str) -> Option<u64> {
    let trimmed = input.trim();
    let (days, clock) = if let Some((days, rest)) = trimmed.split_once(" days ") {
        (days.trim().parse::<u64>().ok()?, rest.trim())
    } else if let Some((days, rest)) = trimmed.split_once(" day ") {
        (days.trim().parse::<u64>().ok()?, rest.trim())
    } else {
        (0, trimmed)
    };

    let mut parts = clock.splitn(3, ':');
    let hours: u64 = parts.next()?.trim().parse().ok()?;
    let minutes: u64 = parts.next()?.trim().parse().ok()?;
    let seconds: u64 = parts.next()?.trim().parse().ok()?;
    if minutes > 59 || seconds > 59 {
        return None;
    }

    Some(days * 86_400 + hours * 3600 + minutes * 60 + seconds)
}

/// Rounds to two decimal places, half away from zero.
///
/// This is the pinned rounding mode for all report percentages.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
