const MOBILE_AGENT_TOKENS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// What kind of pointer the host offers. The trail only runs with a fine
/// pointer that can hover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Fine,
    TouchOnly,
}

impl PointerKind {
    pub fn detect(mobile_user_agent: bool, hover_unavailable: bool) -> Self {
        if mobile_user_agent || hover_unavailable {
            PointerKind::TouchOnly
        } else {
            PointerKind::Fine
        }
    }

    pub fn supports_trail(self) -> bool {
        self == PointerKind::Fine
    }
}

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let agent = user_agent.to_lowercase();
    MOBILE_AGENT_TOKENS.iter().any(|token| agent.contains(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_mobile_agents() {
        assert!(is_mobile_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15"
        ));
        assert!(is_mobile_user_agent("Mozilla/5.0 (Linux; Android 14; Pixel 8)"));
        assert!(is_mobile_user_agent("Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)"));
    }

    #[test]
    fn desktop_agents_are_not_mobile() {
        assert!(!is_mobile_user_agent(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/126.0 Safari/537.36"
        ));
        assert!(!is_mobile_user_agent(
            "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0"
        ));
    }

    #[test]
    fn either_signal_disables_the_trail() {
        assert_eq!(PointerKind::detect(false, false), PointerKind::Fine);
        assert_eq!(PointerKind::detect(true, false), PointerKind::TouchOnly);
        assert_eq!(PointerKind::detect(false, true), PointerKind::TouchOnly);
        assert!(!PointerKind::TouchOnly.supports_trail());
    }
}
