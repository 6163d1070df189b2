/// Format a completion fraction as a whole-number percentage.
pub fn format_percent(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).round() as i64)
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (f64::from(filled) / f64::from(total)).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds() {
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(0.714), "71%");
        assert_eq!(format_percent(1.0), "100%");
    }

    #[test]
    fn progress_bar_handles_zero_total() {
        assert_eq!(progress_bar(3, 0, 5), "░░░░░");
        assert_eq!(progress_bar(5, 5, 5), "█████");
    }
}
