//! Label formatting shared by the panel cards.

/// Delimiter between speaker names on a card.
pub const SPEAKER_DELIMITER: &str = ", ";

/// Join speaker names with [`SPEAKER_DELIMITER`].
pub fn speakers(names: &[String]) -> String {
    names.join(SPEAKER_DELIMITER)
}

/// Average rating rendered with one decimal place.
pub fn rating(average: f64) -> String {
    format!("{:.1}", average)
}

/// Vote count label, e.g. `"12 Votes"`.
pub fn vote_count(votes: u32) -> String {
    format!("{} Votes", votes)
}

/// Session time window, e.g. `"09:30 - 10:20"`.
///
/// A missing bound degrades to the bound that is present, and two missing
/// bounds to an empty string.
pub fn time_range(begin: Option<&str>, end: Option<&str>) -> String {
    match (begin, end) {
        (Some(begin), Some(end)) => format!("{} - {}", begin, end),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_rounds_to_one_decimal() {
        assert_eq!(rating(14.0 / 3.0), "4.7");
        assert_eq!(rating(4.0), "4.0");
        assert_eq!(rating(0.0), "0.0");
    }

    #[test]
    fn vote_count_includes_zero() {
        assert_eq!(vote_count(0), "0 Votes");
        assert_eq!(vote_count(37), "37 Votes");
    }

    #[test]
    fn speakers_are_comma_joined() {
        let names = vec!["A".to_string(), "B".to_string()];
        assert_eq!(speakers(&names), "A, B");
        assert_eq!(speakers(&[]), "");
    }

    #[test]
    fn time_range_degrades_on_missing_bounds() {
        assert_eq!(time_range(Some("09:30"), Some("10:20")), "09:30 - 10:20");
        assert_eq!(time_range(Some("09:30"), None), "09:30");
        assert_eq!(time_range(None, None), "");
    }
}
