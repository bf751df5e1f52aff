use regex::Regex;

pub mod logging;

/// Classify a conferencing URL by provider. Bookings carry explicit link
/// fields, so unlike free-text scanning this only has to look at the URL
/// itself.
pub fn conferencing_platform(url: &str) -> Option<&'static str> {
    let patterns = [
        (r"https://[^\s]*zoom\.us/(j|my|s)/", "Zoom"),
        (r"https://meet\.google\.com/", "Google Meet"),
        (r"https://teams\.(microsoft|live)\.com/", "Teams"),
        (r"https://[^\s]*webex\.com/", "Webex"),
        (r"https://[^\s]*whereby\.com/", "Whereby"),
        (r"https://meet\.jit\.si/", "Jitsi"),
    ];

    for (pattern, platform) in patterns {
        if let Ok(regex) = Regex::new(pattern) {
            if regex.is_match(url) {
                return Some(platform);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_zoom_link() {
        let result = conferencing_platform("https://us02web.zoom.us/j/123456789");
        assert_eq!(result, Some("Zoom"));
    }

    #[test]
    fn test_classify_google_meet_link() {
        let result = conferencing_platform("https://meet.google.com/abc-def-xyz");
        assert_eq!(result, Some("Google Meet"));
    }

    #[test]
    fn test_classify_teams_link() {
        let result = conferencing_platform("https://teams.microsoft.com/l/meetup-join/xyz");
        assert_eq!(result, Some("Teams"));
    }

    #[test]
    fn test_plain_link_is_not_classified() {
        assert_eq!(conferencing_platform("https://example.com/about"), None);
    }
}
