use crate::models::{ExtractedProfile, MatchFlags, VerificationRequest};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Country spellings that refer to the same nation but are not substrings
/// of each other after normalization
const COUNTRY_ALIASES: &[&[&str]] = &[
    &["usa", "us", "united states"],
    &["uk", "gb", "gbr", "united kingdom", "great britain"],
];

/// Normalize a free-text value for comparison
///
/// Lowercases, strips diacritics, drops everything outside `[a-z0-9]` and
/// whitespace, collapses whitespace runs and trims.
pub fn normalize(value: &str) -> String {
    let cleaned: String = value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compare two text values: equal or one contains the other after
/// normalization. Empty values never match.
#[inline]
pub fn text_matches(submitted: &str, extracted: &str) -> bool {
    let a = normalize(submitted);
    let b = normalize(extracted);

    if a.is_empty() || b.is_empty() {
        return false;
    }

    a == b || a.contains(&b) || b.contains(&a)
}

/// Compare countries with the generic text rule plus known aliases
pub fn country_matches(submitted: &str, extracted: &str) -> bool {
    if text_matches(submitted, extracted) {
        return true;
    }

    let a = normalize(submitted);
    let b = normalize(extracted);

    COUNTRY_ALIASES.iter().any(|group| {
        let in_group = |value: &str| {
            group
                .iter()
                .any(|alias| value == *alias || (alias.contains(' ') && value.contains(alias)))
        };
        in_group(&a) && in_group(&b)
    })
}

/// Ages match when the page carried an age and it is within one year of
/// the submitted value
#[inline]
pub fn age_matches(submitted: u8, extracted: u8) -> bool {
    extracted > 0 && submitted.abs_diff(extracted) <= 1
}

/// Compare every submitted field against the extracted profile
pub fn compare(request: &VerificationRequest, profile: &ExtractedProfile) -> MatchFlags {
    MatchFlags {
        first_name: text_matches(&request.first_name, &profile.first_name),
        last_name: text_matches(&request.last_name, &profile.last_name),
        country: country_matches(&request.country, &profile.country),
        age: age_matches(request.age, profile.age),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Stan Wawrinka "), "stan wawrinka");
        assert_eq!(normalize("Gaël Monfils"), "gael monfils");
        assert_eq!(normalize("Juan Martín  del Potro"), "juan martin del potro");
        assert_eq!(normalize("O'Connell-Smith"), "oconnellsmith");
    }

    #[test]
    fn test_text_matches_substring_both_ways() {
        assert!(text_matches("Rafael", "Rafael Nadal Parera"));
        assert!(text_matches("Rafael Nadal Parera", "Rafael"));
        assert!(text_matches("Nadal", "nadal"));
        assert!(!text_matches("Roger", "Novak"));
    }

    #[test]
    fn test_text_matches_rejects_empty() {
        assert!(!text_matches("", "Federer"));
        assert!(!text_matches("Federer", ""));
        assert!(!text_matches("!!!", "Federer"));
    }

    #[test]
    fn test_country_aliases() {
        assert!(country_matches("USA", "United States"));
        assert!(country_matches("United States", "USA"));
        assert!(country_matches("United States of America", "USA"));
        assert!(country_matches("UK", "Great Britain"));
        assert!(country_matches("Spain", "spain"));
        assert!(!country_matches("Spain", "France"));
        assert!(!country_matches("USA", "United Kingdom"));
    }

    #[test]
    fn test_age_matches() {
        assert!(age_matches(24, 24));
        assert!(age_matches(24, 25));
        assert!(age_matches(25, 24));
        assert!(!age_matches(24, 26));
        assert!(!age_matches(0, 0));
        assert!(!age_matches(1, 0));
    }
}
