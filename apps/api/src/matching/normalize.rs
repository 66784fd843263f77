/// Canonicalizes a free-text name for matching.
///
/// Lower-cases, drops every character that is not a lowercase letter, digit or
/// whitespace, then collapses whitespace runs to single spaces and trims.
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize("St. Mary's  Parish   School-Board!"),
            "st marys parish schoolboard"
        );
    }

    #[test]
    fn test_trims_and_collapses_whitespace() {
        assert_eq!(normalize("  Anniston\tCity \n Board "), "anniston city board");
    }

    #[test]
    fn test_keeps_digits() {
        assert_eq!(normalize("District #12"), "district 12");
    }

    #[test]
    fn test_non_ascii_letters_are_dropped() {
        assert_eq!(normalize("Cañon City RE-1"), "caon city re1");
    }

    #[test]
    fn test_empty_and_symbol_only_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("--- !!! ---"), "");
    }

    #[test]
    fn test_idempotent_and_restricted_alphabet() {
        let samples = [
            "Anniston City Board of Education",
            "  O'Fallon   Township H.S. Dist. 203 ",
            "ÉCOLE  Öffentlich 42",
            "\t\tmixed\u{00A0}space\u{2003}kinds",
            "ALL-CAPS_and_underscores",
            "",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
            assert!(
                once.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '),
                "unexpected character in {once:?}"
            );
            assert!(!once.contains("  "), "double space in {once:?}");
            assert_eq!(once.trim(), once);
        }
    }
}
