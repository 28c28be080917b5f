//! Movement id derivation.

use regex::Regex;
use std::sync::LazyLock;

/// Maximum slug length in characters.
pub const MAX_SLUG_LEN: usize = 40;

/// Runs of anything that is not a letter or a digit.
static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").unwrap());

/// Turn a display name into a stable movement id.
///
/// Lowercases, collapses every run of whitespace or punctuation into one
/// hyphen, strips hyphens at both ends and caps the length at
/// [`MAX_SLUG_LEN`] characters.
///
/// ```
/// use liftlog::catalog::slugify;
///
/// assert_eq!(slugify("Barbell Bench Press"), "barbell-bench-press");
/// assert_eq!(slugify("  Pull-Up (weighted) "), "pull-up-weighted");
/// ```
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let replaced = SEPARATOR_RUNS.replace_all(&lowered, "-");
    let truncated: String = replaced
        .trim_matches('-')
        .chars()
        .take(MAX_SLUG_LEN)
        .collect();
    truncated.trim_end_matches('-').to_string()
}

/// Check whether `s` is already in slug form.
pub fn is_slug(s: &str) -> bool {
    !s.is_empty() && slugify(s) == s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Barbell Bench Press"), "barbell-bench-press");
    }

    #[test]
    fn collapses_punctuation_runs() {
        assert_eq!(slugify("DB  Row -- (single_arm)"), "db-row-single-arm");
    }

    #[test]
    fn strips_leading_and_trailing_separators() {
        assert_eq!(slugify("...Squat!!!"), "squat");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(slugify("5/3/1 Press"), "5-3-1-press");
    }

    #[test]
    fn keeps_non_ascii_letters() {
        assert_eq!(slugify("Küstenlauf Übung"), "küstenlauf-übung");
    }

    #[test]
    fn all_punctuation_yields_empty() {
        assert_eq!(slugify(" !?- "), "");
    }

    #[test]
    fn truncates_without_trailing_hyphen() {
        let name = "Single Arm Dumbbell Overhead Triceps Extension Seated";
        let slug = slugify(name);
        assert!(slug.chars().count() <= MAX_SLUG_LEN);
        assert!(!slug.ends_with('-'));
        assert!(slug.starts_with("single-arm-dumbbell"));
    }

    #[test]
    fn is_deterministic_and_idempotent() {
        let names = [
            "Barbell Bench Press",
            "  Romanian   Deadlift ",
            "Farmer's Walk",
            "Single Arm Dumbbell Overhead Triceps Extension Seated",
            "Küstenlauf Übung",
        ];
        for name in names {
            let once = slugify(name);
            assert_eq!(once, slugify(name));
            assert_eq!(once, slugify(&once));
        }
    }

    #[test]
    fn is_slug_checks_canonical_form() {
        assert!(is_slug("barbell-bench-press"));
        assert!(!is_slug("Barbell Bench Press"));
        assert!(!is_slug("-squat"));
        assert!(!is_slug(""));
    }
}
