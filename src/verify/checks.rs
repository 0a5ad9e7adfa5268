use super::BadgePolicy;
use crate::scraping::{scan_tags, TagKind};
use crate::types::VerificationOutcome;

/// Any `<a>` whose `href` contains the canonical root. Substring match, so paths and
/// query strings after the root still count.
pub fn has_backlink(html: &str, policy: &BadgePolicy) -> bool {
    scan_tags(html, TagKind::Anchor).any(|tag| {
        tag.get("href")
            .is_some_and(|href| href.contains(policy.canonical_root.as_str()))
    })
}

/// Any `<img>` whose `src` and `alt` are exactly the badge's. No case or whitespace folding.
pub fn has_badge(html: &str, policy: &BadgePolicy) -> bool {
    scan_tags(html, TagKind::Image).any(|tag| {
        tag.get("src") == Some(policy.badge_src.as_str())
            && tag.get("alt") == Some(policy.badge_alt.as_str())
    })
}

/// Run both checks (never short-circuited) and collect remediation messages in
/// [backlink, badge] order.
pub fn check_page(html: &str, policy: &BadgePolicy) -> VerificationOutcome {
    let backlink_ok = has_backlink(html, policy);
    let badge_ok = has_badge(html, policy);

    let mut failures = Vec::with_capacity(2);
    if !backlink_ok {
        failures.push(policy.backlink_message());
    }
    if !badge_ok {
        failures.push(policy.badge_message());
    }
    VerificationOutcome::from_failures(failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BADGE: &str = r#"<img src="https://toolcategory.com/badge-light.svg" alt="Featured on ToolCategory.com" width="200">"#;

    fn policy() -> BadgePolicy {
        BadgePolicy::default()
    }

    #[test]
    fn backlink_matches_paths_under_root() {
        let html = r#"<a href="https://toolcategory.com/foo">Listed on ToolCategory</a>"#;
        assert!(has_backlink(html, &policy()));
    }

    #[test]
    fn backlink_rejects_other_domains() {
        let html = r#"<a href="https://other.com">elsewhere</a>"#;
        assert!(!has_backlink(html, &policy()));
        assert!(!has_backlink("<p>no anchors</p>", &policy()));
    }

    #[test]
    fn backlink_attribute_names_are_case_insensitive() {
        let upper = "<A HREF='https://toolcategory.com/'>ToolCategory</A>";
        let lower = "<a href='https://toolcategory.com/'>ToolCategory</a>";
        assert_eq!(has_backlink(upper, &policy()), has_backlink(lower, &policy()));
        assert!(has_backlink(upper, &policy()));
    }

    #[test]
    fn backlink_accepts_query_and_trailing_content() {
        let html = r#"<a href="https://toolcategory.com/?ref=badge#top">x</a>"#;
        assert!(has_backlink(html, &policy()));
    }

    #[test]
    fn backlink_without_trailing_slash_does_not_count() {
        let html = r#"<a href="https://toolcategory.com">x</a>"#;
        assert!(!has_backlink(html, &policy()));
    }

    #[test]
    fn badge_requires_exact_src_and_alt() {
        assert!(has_badge(BADGE, &policy()));

        let wrong_case = r#"<img src="https://toolcategory.com/badge-light.svg" alt="Featured on toolcategory.com">"#;
        assert!(!has_badge(wrong_case, &policy()));

        let dark = r#"<img src="https://toolcategory.com/badge-dark.svg" alt="Featured on ToolCategory.com">"#;
        assert!(!has_badge(dark, &policy()));

        let no_alt = r#"<img src="https://toolcategory.com/badge-light.svg">"#;
        assert!(!has_badge(no_alt, &policy()));
    }

    #[test]
    fn badge_alt_and_src_must_be_on_the_same_image() {
        let html = r#"
            <img src="https://toolcategory.com/badge-light.svg" alt="logo">
            <img src="/logo.png" alt="Featured on ToolCategory.com">
        "#;
        assert!(!has_badge(html, &policy()));
    }

    #[test]
    fn badge_tolerates_surrounding_whitespace_in_values() {
        let html = r#"<img alt=" Featured on ToolCategory.com " src=" https://toolcategory.com/badge-light.svg ">"#;
        assert!(has_badge(html, &policy()));
    }

    #[test]
    fn badge_after_unquoted_apostrophe_is_found() {
        let html = r#"<img src=avatar.png alt=Bob's><a href="https://toolcategory.com/"><img src="https://toolcategory.com/badge-light.svg" alt="Featured on ToolCategory.com"></a><img src="/footer.png" alt='footer'>"#;
        assert!(has_badge(html, &policy()));
        assert!(has_backlink(html, &policy()));
        assert!(check_page(html, &policy()).success);
    }

    #[test]
    fn missing_everything_reports_both_in_order() {
        let outcome = check_page("<html><body>hello</body></html>", &policy());
        assert!(!outcome.success);
        assert_eq!(
            outcome.failure_reasons,
            vec![
                "Add a link pointing to https://toolcategory.com/.".to_string(),
                "Include the ToolCategory badge image with alt text \"Featured on ToolCategory.com\"."
                    .to_string(),
            ]
        );
    }

    #[test]
    fn only_badge_missing_reports_one_message() {
        let html = r#"<a href="https://toolcategory.com/">ToolCategory</a>"#;
        let outcome = check_page(html, &policy());
        assert_eq!(outcome.failure_reasons, vec![policy().badge_message()]);
    }

    #[test]
    fn linked_badge_passes() {
        let html = format!(r#"<a href="https://toolcategory.com/" target="_blank">{BADGE}</a>"#);
        let outcome = check_page(&html, &policy());
        assert!(outcome.success);
        assert!(outcome.failure_reasons.is_empty());
    }

    #[test]
    fn injected_policy_is_honoured() {
        let staging = BadgePolicy {
            canonical_root: "https://staging.toolcategory.test/".into(),
            badge_src: "https://staging.toolcategory.test/badge.svg".into(),
            badge_alt: "Staging badge".into(),
        };
        let html = r#"<a href="https://staging.toolcategory.test/x"><img src="https://staging.toolcategory.test/badge.svg" alt="Staging badge"></a>"#;
        assert!(check_page(html, &staging).success);
        assert!(!check_page(html, &policy()).success);
    }
}
