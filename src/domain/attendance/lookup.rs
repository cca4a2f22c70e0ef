//! Identifier-matching helpers for front-desk attendance marking.
//!
//! Staff type whatever the member remembers: a member code, an email, a
//! phone number with or without the country prefix, or part of a name.
//! These helpers keep the matching rules pure and testable; the handler
//! owns the lookup order.

use crate::domain::member::MemberProfile;

/// Lowercased, whitespace-trimmed form used for case-insensitive matching.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Candidate spellings of a phone number, with and without the country
/// prefix, after stripping separators.
///
/// Returns an empty list when the input has no digits at all.
pub fn phone_variants(raw: &str, country_code: &str) -> Vec<String> {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    if !stripped.chars().any(|c| c.is_ascii_digit()) {
        return Vec::new();
    }

    let mut variants = vec![stripped.clone()];
    if let Some(national) = stripped.strip_prefix(country_code) {
        if !national.is_empty() {
            variants.push(national.to_string());
        }
    } else if !stripped.starts_with('+') {
        variants.push(format!("{country_code}{stripped}"));
    }
    variants.dedup();
    variants
}

/// Orders partial-name matches deterministically so the same query always
/// resolves to the same member: lowercased name first, user id as the
/// tie-break.
pub fn sort_name_matches(profiles: &mut [MemberProfile]) {
    profiles.sort_by(|a, b| {
        normalize_name(&a.name)
            .cmp(&normalize_name(&b.name))
            .then_with(|| a.user_id.as_str().cmp(b.user_id.as_str()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Role, UserId};

    fn profile(user_id: &str, name: &str) -> MemberProfile {
        MemberProfile::new(
            UserId::new(user_id).unwrap(),
            name,
            format!("F3-{user_id}"),
            format!("{user_id}@example.com"),
            "+919876543210",
            Role::Member,
            None,
        )
        .unwrap()
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_name("  Priya Sharma "), "priya sharma");
    }

    #[test]
    fn variants_strip_separators() {
        let variants = phone_variants("98765 432-10", "+91");
        assert_eq!(variants, vec!["9876543210", "+919876543210"]);
    }

    #[test]
    fn prefixed_number_also_tries_national_form() {
        let variants = phone_variants("+919876543210", "+91");
        assert_eq!(variants, vec!["+919876543210", "9876543210"]);
    }

    #[test]
    fn no_digits_yields_nothing() {
        assert!(phone_variants("n/a", "+91").is_empty());
    }

    #[test]
    fn name_matches_sorted_by_name_then_id() {
        let mut profiles = vec![
            profile("0003", "priya"),
            profile("0001", "Arun"),
            profile("0002", "arun"),
        ];
        sort_name_matches(&mut profiles);
        let ids: Vec<&str> = profiles.iter().map(|p| p.user_id.as_str()).collect();
        assert_eq!(ids, vec!["0001", "0002", "0003"]);
    }
}
