//! Download progress formatting.

/// Percentage of `total` covered by `current`. A missing or zero total
/// reads as 0%.
pub fn percent(current: u64, total: Option<u64>) -> f64 {
    match total {
        Some(total) if total > 0 => current as f64 / total as f64 * 100.0,
        _ => 0.0,
    }
}

/// `Downloading: NN.NN%`
pub fn format_progress(current: u64, total: Option<u64>) -> String {
    format!("Downloading: {:.2}%", percent(current, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_progress_two_decimals() {
        assert_eq!(format_progress(0, Some(200)), "Downloading: 0.00%");
        assert_eq!(format_progress(1, Some(3)), "Downloading: 33.33%");
        assert_eq!(format_progress(200, Some(200)), "Downloading: 100.00%");
    }

    #[test]
    fn test_unknown_length_is_zero() {
        assert_eq!(format_progress(4096, None), "Downloading: 0.00%");
        assert_eq!(format_progress(4096, Some(0)), "Downloading: 0.00%");
    }
}
