//! Field-level validation and display formatting.
//!
//! Messages are user-facing and localized (French), matching what the
//! API reports on a 400 response.

use crate::domain::UNSPECIFIED;
use crate::error::{CatalogError, Result};

/// Maximum length accepted for an import request identifier.
pub const IMPORT_IMDB_ID_MAX_LEN: usize = 10;
/// Maximum length of a stored IMDb identifier.
pub const IMDB_ID_MAX_LEN: usize = 20;
/// Maximum length of a movie title.
pub const TITLE_MAX_LEN: usize = 255;
/// Maximum length of a stored duration display string.
pub const DURATION_MAX_LEN: usize = 10;

pub const MSG_IMDB_ID_BLANK: &str =
    "L'identifiant IMDb de ce film ne peut être vide";
pub const MSG_TITLE_BLANK: &str = "Le titre de ce film ne peut être vide";
pub const MSG_SEARCH_TITLE_BLANK: &str =
    "Le titre à rechercher ne peut être vide";
pub const MSG_MOVIE_ALREADY_PRESENT: &str =
    "Ce film est déjà présent dans le catalogue";

fn max_len_message(max_len: usize) -> String {
    format!(
        "Assurez-vous que ce champ ne comporte pas plus de {} caractères.",
        max_len
    )
}

/// Reject blank or overlong IMDb identifiers.
pub fn validate_imdb_id(imdb_id: &str, max_len: usize) -> Result<()> {
    if imdb_id.trim().is_empty() {
        return Err(CatalogError::Validation(MSG_IMDB_ID_BLANK.to_string()));
    }
    if imdb_id.chars().count() > max_len {
        return Err(CatalogError::Validation(max_len_message(max_len)));
    }
    Ok(())
}

/// Reject blank or overlong movie titles.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(CatalogError::Validation(MSG_TITLE_BLANK.to_string()));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(CatalogError::Validation(max_len_message(TITLE_MAX_LEN)));
    }
    Ok(())
}

/// Reject user-supplied duration display strings that are too long.
pub fn validate_duration(duration: &str) -> Result<()> {
    if duration.chars().count() > DURATION_MAX_LEN {
        return Err(CatalogError::Validation(max_len_message(DURATION_MAX_LEN)));
    }
    Ok(())
}

/// Render a provider runtime (minutes) as the stored display string.
///
/// 142 minutes becomes "2h22"; a missing runtime becomes "Non indiqué".
pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) => format!("{}h{:02}", m / 60, m % 60),
        None => UNSPECIFIED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_imdb_id() {
        assert!(validate_imdb_id("tt0111161", IMPORT_IMDB_ID_MAX_LEN).is_ok());
    }

    #[test]
    fn rejects_blank_imdb_id() {
        let err = validate_imdb_id("", IMPORT_IMDB_ID_MAX_LEN).unwrap_err();
        assert_eq!(
            err.to_string(),
            "L'identifiant IMDb de ce film ne peut être vide"
        );
    }

    #[test]
    fn rejects_whitespace_imdb_id() {
        assert!(validate_imdb_id("   ", IMPORT_IMDB_ID_MAX_LEN).is_err());
    }

    #[test]
    fn rejects_overlong_imdb_id() {
        let err =
            validate_imdb_id("tt0111161234", IMPORT_IMDB_ID_MAX_LEN).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Assurez-vous que ce champ ne comporte pas plus de 10 caractères."
        );
    }

    #[test]
    fn rejects_blank_title() {
        let err = validate_title(" ").unwrap_err();
        assert_eq!(err.to_string(), MSG_TITLE_BLANK);
    }

    #[test]
    fn accepts_short_duration() {
        assert!(validate_duration("2h28").is_ok());
    }

    #[test]
    fn rejects_overlong_duration() {
        let err = validate_duration("12h3456789é").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Assurez-vous que ce champ ne comporte pas plus de 10 caractères."
        );
    }

    #[test]
    fn formats_runtime_minutes() {
        assert_eq!(format_runtime(Some(142)), "2h22");
        assert_eq!(format_runtime(Some(150)), "2h30");
        assert_eq!(format_runtime(Some(60)), "1h00");
        assert_eq!(format_runtime(Some(45)), "0h45");
    }

    #[test]
    fn missing_runtime_falls_back_to_default() {
        assert_eq!(format_runtime(None), "Non indiqué");
    }
}
