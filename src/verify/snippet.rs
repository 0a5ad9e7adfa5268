use super::BadgePolicy;
use crate::types::BadgeSnippet;

fn quoted(value: &str) -> String {
    // The checker never decodes entities, so pick a quote style instead of escaping.
    if value.contains('"') {
        format!("'{value}'")
    } else {
        format!("\"{value}\"")
    }
}

/// The embed makers paste on their site. It passes both content checks by construction.
pub fn badge_snippet(policy: &BadgePolicy) -> BadgeSnippet {
    let html = format!(
        "<a href={} target=\"_blank\" rel=\"noopener\"><img src={} alt={} width=\"200\" height=\"54\" /></a>",
        quoted(&policy.canonical_root),
        quoted(&policy.badge_src),
        quoted(&policy.badge_alt),
    );
    BadgeSnippet {
        html,
        badge_src: policy.badge_src.clone(),
        badge_alt: policy.badge_alt.clone(),
        link_href: policy.canonical_root.clone(),
    }
}
