//! URL-safe slug derivation.

use deunicode::deunicode_with_tofu;

/// Token used when a text has no alphanumeric characters at all.
pub const FALLBACK_SLUG: &str = "unknown";

/// Transliterate `text` to ASCII, lowercase it and collapse every run of
/// non-alphanumeric characters into a single `-`, without leading or
/// trailing separators.
///
/// Characters with no transliteration act as separators.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode_with_tofu(text, " ");
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_runs_and_trims() {
        assert_eq!(slugify("Some Party!!"), "some-party");
        assert_eq!(slugify("  --Labour  &  Co-operative--  "), "labour-co-operative");
        assert_eq!(slugify("Party_2024"), "party-2024");
    }

    #[test]
    fn test_transliterates_accented_letters() {
        assert_eq!(slugify("Europe Écologie"), "europe-ecologie");
        assert_eq!(slugify("Europe Écologie Les Verts"), "europe-ecologie-les-verts");
        assert_eq!(slugify("Partido Socialista Obrero Español"), "partido-socialista-obrero-espanol");
    }

    #[test]
    fn test_non_latin_scripts_stay_distinct() {
        let united = slugify("Единая Россия");
        let just = slugify("Справедливая Россия");

        assert_ne!(united, FALLBACK_SLUG);
        assert_ne!(just, FALLBACK_SLUG);
        assert_ne!(united, just);
        assert!(united.contains("ross"), "got {united}");
        assert_ne!(slugify("Νέα Δημοκρατία"), FALLBACK_SLUG);
    }

    #[test]
    fn test_fallback_for_symbols_only() {
        assert_eq!(slugify("!!! ???"), FALLBACK_SLUG);
        assert_eq!(slugify(""), FALLBACK_SLUG);
    }
}
