use slug::slugify;

const FALLBACK_SLUG: &str = "user";

/// Slugified name, `user` when nothing URL-safe is left
pub fn slug_base(name: &str) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// First of `base`, `base-1`, `base-2`… not in `taken`
pub fn unique_slug(base: &str, taken: &[String]) -> String {
    let is_taken = |candidate: &str| taken.iter().any(|slug| slug == candidate);

    if !is_taken(base) {
        return base.to_string();
    }

    let mut suffix = 1;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !is_taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Jane Doe", "jane-doe")]
    #[case("  Élodie   Martin ", "elodie-martin")]
    #[case("!!!", "user")]
    #[case("", "user")]
    fn base_is_url_safe(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(slug_base(name), expected);
    }

    #[test]
    fn free_base_is_used_as_is() {
        assert_eq!(unique_slug("jane-doe", &[]), "jane-doe");
        assert_eq!(
            unique_slug("jane-doe", &["jane-doe-1".to_string()]),
            "jane-doe"
        );
    }

    #[test]
    fn taken_base_gets_the_first_free_suffix() {
        let taken = vec![
            "jane-doe".to_string(),
            "jane-doe-1".to_string(),
            "jane-doe-3".to_string(),
        ];
        assert_eq!(unique_slug("jane-doe", &taken), "jane-doe-2");
    }
}
