//! Team list: one name per line.

use tracing::info;

use crate::error::LoadError;

/// Parse team names, one per line. Names are trimmed and blank lines skipped.
///
/// ```
/// use trivia_board::loader::parse_teams;
///
/// let teams = parse_teams("  Red \n\nBlue\r\n").unwrap();
/// assert_eq!(teams, vec!["Red", "Blue"]);
/// ```
pub fn parse_teams(source: &str) -> Result<Vec<String>, LoadError> {
    let teams: Vec<String> = source
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect();

    if teams.is_empty() {
        return Err(LoadError::NoTeams);
    }
    info!(count = teams.len(), "teams loaded");
    Ok(teams)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_order() {
        let teams = parse_teams("Zeta\nAlpha\nMu").unwrap();
        assert_eq!(teams, vec!["Zeta", "Alpha", "Mu"]);
    }

    #[test]
    fn test_empty_source_is_error() {
        assert!(matches!(parse_teams(""), Err(LoadError::NoTeams)));
        assert!(matches!(parse_teams(" \n\t\n"), Err(LoadError::NoTeams)));
    }

    #[test]
    fn test_inner_whitespace_kept() {
        let teams = parse_teams("Los Tigres del Norte\n").unwrap();
        assert_eq!(teams, vec!["Los Tigres del Norte"]);
    }
}
