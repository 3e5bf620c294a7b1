//! Skills page: the "By Level" view is rebuilt from the cards already
//! rendered in the "By Domain" view.

use std::fmt::Write as _;

pub const TAB_DOMAIN_ID: &str = "tab-domain";
pub const TAB_LEVEL_ID: &str = "tab-level";
pub const DOMAIN_VIEW_ID: &str = "domain-view";
pub const LEVEL_VIEW_ID: &str = "level-view";
pub const CARD_SELECTOR: &str = ".grid > div";
pub const NAME_SELECTOR: &str = ".flex-col span:first-child";
pub const LEVEL_TAG_SELECTOR: &str = ".uppercase.tracking-wider";
pub const HIDDEN_CLASS: &str = "hidden";

pub const ACTIVE_TAB_CLASSES: [&str; 2] = ["border-primary", "text-primary"];
pub const INACTIVE_TAB_CLASSES: [&str; 3] =
    ["border-transparent", "text-slate-500", "dark:text-[#92adc9]"];

pub const EMPTY_LEVEL_VIEW: &str =
    r#"<p class="text-center text-slate-500">No skills data found.</p>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillLevel {
    Production,
    Academic,
    Learning,
}

impl SkillLevel {
    /// Display order of the level groups.
    pub const ALL: [SkillLevel; 3] = [
        SkillLevel::Production,
        SkillLevel::Academic,
        SkillLevel::Learning,
    ];

    /// Maps a card's level tag text to its group. Unrecognised tags count as
    /// learning.
    pub fn classify(raw: &str) -> Self {
        let tag = raw.trim().to_lowercase();
        if tag.contains("production") {
            SkillLevel::Production
        } else if tag.contains("academic") {
            SkillLevel::Academic
        } else {
            SkillLevel::Learning
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SkillLevel::Production => "Production",
            SkillLevel::Academic => "Academic",
            SkillLevel::Learning => "Learning",
        }
    }

    pub fn accent_class(self) -> &'static str {
        match self {
            SkillLevel::Production => "text-primary",
            SkillLevel::Academic => "text-purple-500",
            SkillLevel::Learning => "text-slate-500",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SkillLevel::Production => "verified",
            SkillLevel::Academic => "school",
            SkillLevel::Learning => "auto_stories",
        }
    }
}

/// A card lifted out of the domain view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCard {
    pub name: String,
    pub level: SkillLevel,
    /// Inner HTML of the domain-view card, re-wrapped as-is.
    pub html: String,
}

impl SkillCard {
    pub fn new(name: &str, level_tag: &str, html: impl Into<String>) -> Self {
        Self {
            name: name.trim().to_owned(),
            level: SkillLevel::classify(level_tag),
            html: html.into(),
        }
    }
}

/// Non-empty groups in display order, cards kept in page order.
pub fn group_by_level(cards: &[SkillCard]) -> Vec<(SkillLevel, Vec<&SkillCard>)> {
    SkillLevel::ALL
        .iter()
        .map(|&level| {
            let group: Vec<_> = cards.iter().filter(|c| c.level == level).collect();
            (level, group)
        })
        .filter(|(_, group)| !group.is_empty())
        .collect()
}

pub fn render_level_view(cards: &[SkillCard]) -> String {
    if cards.is_empty() {
        return EMPTY_LEVEL_VIEW.to_owned();
    }

    let mut html = String::new();
    for (level, group) in group_by_level(cards) {
        let mut cards_html = String::new();
        for card in group {
            let _ = write!(
                cards_html,
                r#"
                    <div class="proximity-card flex items-center justify-between p-3 rounded-xl bg-white dark:bg-surface-dark border-l-4 border-primary shadow-sm hover:shadow-md transition-shadow">
                        {}
                    </div>
                "#,
                card.html
            );
        }
        let _ = write!(
            html,
            r#"
                <div class="flex flex-col gap-3">
                    <div class="flex items-center gap-2 pb-1 border-b border-slate-200 dark:border-slate-800/50">
                         <span class="material-symbols-outlined {accent}">
                            {icon}
                         </span>
                         <h3 class="text-slate-900 dark:text-white text-lg font-bold">{label} Experience</h3>
                    </div>
                    <div class="grid grid-cols-1 sm:grid-cols-2 gap-3">
                        {cards_html}
                    </div>
                </div>"#,
            accent = level.accent_class(),
            icon = level.icon(),
            label = level.label(),
        );
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, tag: &str) -> SkillCard {
        SkillCard::new(name, tag, format!("<span>{name}</span>"))
    }

    #[test]
    fn classifies_level_tags() {
        assert_eq!(SkillLevel::classify("  PRODUCTION ready "), SkillLevel::Production);
        assert_eq!(SkillLevel::classify("Academic project"), SkillLevel::Academic);
        assert_eq!(SkillLevel::classify("Currently learning"), SkillLevel::Learning);
        assert_eq!(SkillLevel::classify("hobby"), SkillLevel::Learning);
    }

    #[test]
    fn groups_in_fixed_order_and_skips_empty_levels() {
        let cards = vec![
            card("Go", "learning"),
            card("Rust", "production"),
            card("Python", "Production"),
        ];
        let groups = group_by_level(&cards);
        let levels: Vec<_> = groups.iter().map(|(level, _)| *level).collect();
        assert_eq!(levels, [SkillLevel::Production, SkillLevel::Learning]);
        let names: Vec<_> = groups[0].1.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Rust", "Python"]);
    }

    #[test]
    fn renders_headers_and_wraps_cards() {
        let html = render_level_view(&[card("Rust", "production"), card("Haskell", "academic")]);
        assert!(html.contains("Production Experience"));
        assert!(html.contains("Academic Experience"));
        assert!(!html.contains("Learning Experience"));
        assert!(html.contains("school"));
        assert_eq!(html.matches("proximity-card").count(), 2);
        assert!(html.find("Rust").unwrap() < html.find("Haskell").unwrap());
    }

    #[test]
    fn empty_input_renders_placeholder() {
        assert_eq!(render_level_view(&[]), EMPTY_LEVEL_VIEW);
    }
}
