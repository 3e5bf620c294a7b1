//! Scroll reveal: elements start hidden and fade up the first time they
//! intersect the viewport.

pub const TARGET_SELECTOR: &str = "section, .card, .skill-card, h1, h2, h3, p";
pub const HIDDEN_CLASSES: [&str; 5] = [
    "opacity-0",
    "translate-y-4",
    "transition-all",
    "duration-700",
    "ease-out",
];
pub const VISIBLE_CLASS: &str = "animate-fade-up";
pub const THRESHOLD: f64 = 0.1;
pub const ROOT_MARGIN: &str = "0px";

pub const STYLESHEET: &str = r#"
    .animate-fade-up {
        opacity: 1 !important;
        transform: translateY(0) !important;
    }

    @keyframes fadeIn {
        from { opacity: 0; transform: translateY(10px); }
        to { opacity: 1; transform: translateY(0); }
    }

    .animate-fade-in {
         animation: fadeIn 0.5s ease-out forwards;
    }
"#;
