//! Formatting utilities for terminal output

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || !value.is_finite() {
        return "░".repeat(width);
    }

    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max).max(0.0) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Bar for a probability in [0, 1]
#[must_use]
pub fn probability_bar(probability: f64, width: usize) -> String {
    create_progress_bar(probability, 1.0, width)
}

/// Format a natural-log value, spelling out negative infinity
#[must_use]
pub fn format_log(value: f64) -> String {
    if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{value:.5}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_degenerate_max() {
        assert_eq!(create_progress_bar(1.0, 0.0, 4), "░░░░");
        assert_eq!(create_progress_bar(f64::NAN, 1.0, 4), "░░░░");
    }

    #[test]
    fn probability_bar_scales_to_one() {
        assert_eq!(probability_bar(0.25, 8), "██░░░░░░");
    }

    #[test]
    fn log_formatting() {
        assert_eq!(format_log(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_log(-0.5), "-0.50000");
    }
}
