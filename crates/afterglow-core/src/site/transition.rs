pub const INTERNAL_LINK_SELECTOR: &str =
    r#"a[href^="index"], a[href^="about"], a[href^="skills"]"#;
pub const BODY_CLASSES: [&str; 4] = [
    "opacity-0",
    "transition-opacity",
    "duration-500",
    "ease-in-out",
];
pub const FADED_CLASS: &str = "opacity-0";
/// Matches the `duration-500` body transition.
pub const FADE_OUT_MS: i32 = 500;

/// Whether a click on a link with this `href` should fade the page out
/// before navigating. Same-page anchors and mail links navigate as usual.
pub fn should_intercept(href: Option<&str>) -> bool {
    match href {
        Some(href) => !(href.is_empty() || href.starts_with('#') || href.starts_with("mailto")),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intercepts_page_links() {
        assert!(should_intercept(Some("about.html")));
        assert!(should_intercept(Some("skills.html#backend")));
    }

    #[test]
    fn leaves_anchors_and_mail_alone() {
        assert!(!should_intercept(None));
        assert!(!should_intercept(Some("")));
        assert!(!should_intercept(Some("#top")));
        assert!(!should_intercept(Some("mailto:me@example.com")));
    }
}
