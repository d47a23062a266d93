//! Sport key → league descriptor used to steer search.

/// Known sport keys and the league/season wording fed to the model.
const PROFILES: &[(&str, &str)] = &[
    ("basketball", "NBA basketball"),
    ("football", "NFL football"),
    ("baseball", "MLB baseball"),
    ("hockey", "NHL hockey"),
    ("soccer", "MLS soccer or Premier League"),
    ("tennis", "ATP/WTA tennis"),
    ("golf", "PGA golf"),
];

/// Resolves `sport` to its league descriptor.
///
/// Matching ignores case and surrounding whitespace. Unmapped sports are
/// returned verbatim (trimmed), so "cricket" stays "cricket".
pub fn league_for(sport: &str) -> &str {
    let key = sport.trim();
    PROFILES
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, league)| *league)
        .unwrap_or(key)
}

/// True if `sport` has a dedicated descriptor.
pub fn is_known(sport: &str) -> bool {
    let key = sport.trim();
    PROFILES.iter().any(|(k, _)| k.eq_ignore_ascii_case(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_sports_resolve_to_league() {
        assert_eq!(league_for("basketball"), "NBA basketball");
        assert_eq!(league_for("Soccer"), "MLS soccer or Premier League");
        assert_eq!(league_for(" golf "), "PGA golf");
        assert!(is_known("tennis"));
    }

    #[test]
    fn unmapped_sport_passes_through() {
        assert_eq!(league_for("cricket"), "cricket");
        assert_eq!(league_for("Formula 1"), "Formula 1");
        assert!(!is_known("cricket"));
    }
}
