//! Output file naming for extracted frame sequences

/// Suffix shared by every frame file; the viewer scans for it.
pub const FRAMES_SUFFIX: &str = "_moves.json";

/// Derives a filesystem-safe identifier from a free-text event name:
/// keeps alphanumerics, spaces, underscores and hyphens, trims, and
/// replaces spaces with underscores.
pub fn sanitize_event(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect::<String>()
        .trim()
        .replace(' ', "_")
}

/// File name for one extracted game:
/// `{sanitized-event}_{sourceFileStem}_Match{n}_moves.json`.
pub fn frames_file_name(event: &str, source_stem: &str, match_number: usize) -> String {
    format!(
        "{}_{}_Match{}{}",
        sanitize_event(event),
        source_stem,
        match_number,
        FRAMES_SUFFIX
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_punctuation() {
        assert_eq!(sanitize_event("World Ch@mp!on 2024"), "World_Chmpon_2024");
    }

    #[test]
    fn test_sanitize_trims_before_joining() {
        assert_eq!(sanitize_event("  Casual Game  "), "Casual_Game");
        assert_eq!(sanitize_event("rated-blitz_2+1"), "rated-blitz_21");
    }

    #[test]
    fn test_frames_file_name() {
        assert_eq!(
            frames_file_name("FIDE World Cup", "game07", 1),
            "FIDE_World_Cup_game07_Match1_moves.json"
        );
    }
}
