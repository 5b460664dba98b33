//! Video identifier extraction from user-supplied URLs

use regex::Regex;
use std::sync::OnceLock;

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:v=|/v/|youtu\.be/|/embed/|/shorts/)([A-Za-z0-9_-]{11})")
            .expect("video URL pattern is valid")
    })
}

fn bare_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("video id pattern is valid"))
}

/// Extract the 11-character video id from a watch/short/embed URL or a bare id
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();

    if let Some(caps) = url_pattern().captures(input) {
        return caps.get(1).map(|m| m.as_str().to_string());
    }

    bare_id_pattern()
        .is_match(input)
        .then(|| input.to_string())
}
