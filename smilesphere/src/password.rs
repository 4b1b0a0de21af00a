//! Password strength meter and confirmation check
//!
//! Pure functions behind the registration form. Scoring is advisory
//! only; the server still enforces its own policy on submit.

/// Message shown while the two password fields differ
pub const MISMATCH_MESSAGE: &str = "Passwords don't match";

/// Score a candidate password from 0 to 4
///
/// One point per rule met: at least 8 characters, mixed case, a digit,
/// and a symbol. Length counts characters, not bytes, so multibyte
/// input is not over-credited.
pub fn score(password: &str) -> u8 {
    let mut strength = 0;

    if password.chars().count() >= 8 {
        strength += 1;
    }
    if password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
    {
        strength += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        strength += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        strength += 1;
    }

    strength
}

/// Rendering of one strength score on the progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthMeter {
    /// Feedback label shown inside the bar
    pub label: &'static str,
    /// Bar width as a percentage
    pub width_percent: u8,
    /// Full class string for the bar element
    pub bar_class: &'static str,
}

/// Map a score to its meter rendering
///
/// Scores above 4 cannot come out of [`score`] and clamp to the
/// strongest meter.
pub fn meter(score: u8) -> StrengthMeter {
    match score {
        0 => StrengthMeter {
            label: "Very Weak",
            width_percent: 25,
            bar_class: "progress-bar bg-danger",
        },
        1 => StrengthMeter {
            label: "Weak",
            width_percent: 25,
            bar_class: "progress-bar bg-danger",
        },
        2 => StrengthMeter {
            label: "Fair",
            width_percent: 50,
            bar_class: "progress-bar bg-warning",
        },
        3 => StrengthMeter {
            label: "Good",
            width_percent: 75,
            bar_class: "progress-bar bg-info",
        },
        _ => StrengthMeter {
            label: "Strong",
            width_percent: 100,
            bar_class: "progress-bar bg-success",
        },
    }
}

/// Validity message for the confirmation field
///
/// Returns the mismatch message while the fields differ and `None`
/// once they agree, including when both are still empty.
pub fn confirmation_message(password: &str, confirmation: &str) -> Option<&'static str> {
    if password != confirmation {
        Some(MISMATCH_MESSAGE)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_rule_adds_one_point() {
        assert_eq!(score(""), 0);
        assert_eq!(score("abcdefgh"), 1); // length only
        assert_eq!(score("Abcdefgh"), 2); // length + mixed case
        assert_eq!(score("Abcdefg1"), 3); // length + mixed case + digit
        assert_eq!(score("Abcdef1!"), 4); // all four
    }

    #[test]
    fn test_rules_score_independently_of_length() {
        assert_eq!(score("aB1!"), 3); // everything but length
        assert_eq!(score("!!!"), 1); // symbol only
        assert_eq!(score("1234"), 1); // digit only
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Eight two-byte characters pass the length rule, and each
        // counts as a symbol.
        assert_eq!(score("éééééééé"), 2);
    }

    #[test]
    fn test_meter_matches_the_page_rendering() {
        assert_eq!(meter(0).label, "Very Weak");
        assert_eq!(meter(0).width_percent, 25);
        assert_eq!(meter(1).label, "Weak");
        assert_eq!(meter(1).bar_class, "progress-bar bg-danger");
        assert_eq!(meter(2).label, "Fair");
        assert_eq!(meter(2).width_percent, 50);
        assert_eq!(meter(3).label, "Good");
        assert_eq!(meter(3).bar_class, "progress-bar bg-info");
        assert_eq!(meter(4).label, "Strong");
        assert_eq!(meter(4).width_percent, 100);
        assert_eq!(meter(4).bar_class, "progress-bar bg-success");
    }

    #[test]
    fn test_empty_password_shows_the_weakest_meter() {
        assert_eq!(meter(score("")).label, "Very Weak");
    }

    #[test]
    fn test_confirmation_reports_any_difference() {
        assert_eq!(confirmation_message("secret", "secre"), Some(MISMATCH_MESSAGE));
        assert_eq!(confirmation_message("", "typing"), Some(MISMATCH_MESSAGE));
        assert_eq!(confirmation_message("secret", "secret"), None);
        assert_eq!(confirmation_message("", ""), None);
    }
}
