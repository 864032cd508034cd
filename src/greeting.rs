use gloo_console::log;

pub const LINES: [(&str, &str); 3] = [
    ("%c🙏 21 Jours de Prière", "font-size: 24px; font-weight: bold; color: #1a365d;"),
    (
        "%cTransformez votre vie de prière avec ce parcours spirituel guidé.",
        "font-size: 14px; color: #4a5568;",
    ),
    ("%c→ https://21joursdepriere.com", "font-size: 12px; color: #319795;"),
];

/// For visitors who open the devtools.
pub fn print() {
    for (text, style) in LINES {
        log!(text, style);
    }
}
