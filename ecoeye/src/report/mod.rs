//! Eco report data model.
//!
//! Defines the vehicle selection identity, the report document shape as
//! returned by the generation backend, and validation of untrusted report
//! payloads at the acquisition boundary.
//!
//! # Cache Identity
//!
//! All caching is keyed by a normalized slug derived from the model name
//! (lowercased, non-alphanumeric stripped, whitespace collapsed to
//! underscores) combined with the year, e.g. `"Tesla Model Y"` + 2024
//! becomes `tesla_model_y_2024`.

mod types;
mod validate;

pub use types::{EcoReport, EcoTips, VehicleSelection};
pub use validate::{parse_report_value, ValidationError};

/// Derives the normalized cache slug for a model name.
///
/// Lowercases the name, converts whitespace runs to single underscores and
/// strips every remaining non-alphanumeric character.
pub fn model_slug(model: &str) -> String {
    let mut slug = String::with_capacity(model.len());
    let mut pending_separator = false;

    for ch in model.trim().to_lowercase().chars() {
        if ch.is_whitespace() {
            pending_separator = !slug.is_empty();
        } else if ch.is_alphanumeric() {
            if pending_separator {
                slug.push('_');
                pending_separator = false;
            }
            slug.push(ch);
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_slug_lowercases_and_underscores() {
        assert_eq!(model_slug("Tesla Model Y"), "tesla_model_y");
        assert_eq!(model_slug("Toyota Prius"), "toyota_prius");
    }

    #[test]
    fn test_model_slug_strips_punctuation() {
        assert_eq!(model_slug("Ford Mustang Mach-E"), "ford_mustang_mache");
        assert_eq!(model_slug("Citroën C4"), "citroën_c4");
    }

    #[test]
    fn test_model_slug_collapses_whitespace() {
        assert_eq!(model_slug("  Honda   Civic  "), "honda_civic");
    }

    #[test]
    fn test_model_slug_empty_input() {
        assert_eq!(model_slug(""), "");
        assert_eq!(model_slug("   "), "");
    }
}
