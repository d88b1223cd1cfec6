//! URL-safe slug derivation for catalog entries.
//!
//! The transform is pure and deterministic: the same input always yields the
//! same slug, and feeding a slug back through yields the slug unchanged.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Separator used between word runs unless the caller overrides it.
pub const DEFAULT_SEPARATOR: char = '-';

/// Derives a URL-safe slug from free-form text using [`DEFAULT_SEPARATOR`].
///
/// The input is decomposed (NFD) so accented letters reduce to their base
/// letter, combining marks are dropped, everything is lowercased, and every
/// run of characters outside `[a-z0-9]` collapses into a single separator.
/// Separators never lead or trail the result.
///
/// Text with no usable characters still produces a non-empty slug: the
/// separator itself.
///
/// ```rust
/// use machex_kernel::slug::slugify;
///
/// assert_eq!(slugify("Héllo World!!"), "hello-world");
/// assert_eq!(slugify("Precision Lathe 200"), "precision-lathe-200");
/// assert_eq!(slugify("!!!"), "-");
/// ```
#[must_use]
pub fn slugify(input: &str) -> String {
    slugify_with(input, DEFAULT_SEPARATOR)
}

/// [`slugify`] with a custom separator character.
#[must_use]
pub fn slugify_with(input: &str, separator: char) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_separator = false;

    for ch in input.nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        for lower in ch.to_lowercase() {
            if lower.is_ascii_alphanumeric() {
                if pending_separator && !out.is_empty() {
                    out.push(separator);
                }
                pending_separator = false;
                out.push(lower);
            } else {
                pending_separator = true;
            }
        }
    }

    // Never hand back an empty slug, it would break routing.
    if out.is_empty() {
        out.push(separator);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_diacritics_and_lowercases() {
        assert_eq!(slugify("Héllo World!!"), "hello-world");
        assert_eq!(slugify("Čelní Fréza Ø50"), "celni-freza-50");
        assert_eq!(slugify("ÀÉÎÕÜ"), "aeiou");
    }

    #[test]
    fn collapses_runs_and_trims_edges() {
        assert_eq!(slugify("  Precision   Lathe -- 200  "), "precision-lathe-200");
        assert_eq!(slugify("--already--slugged--"), "already-slugged");
    }

    #[test]
    fn empty_and_symbol_only_inputs_yield_the_separator() {
        assert_eq!(slugify(""), "-");
        assert_eq!(slugify("!!!"), "-");
        assert_eq!(slugify("   "), "-");
        assert_eq!(slugify_with("©®™", '_'), "_");
    }

    #[test]
    fn custom_separator_is_respected() {
        assert_eq!(slugify_with("Band Saw 3000", '_'), "band_saw_3000");
        assert_eq!(slugify_with("a--b", '.'), "a.b");
    }

    #[test]
    fn is_idempotent() {
        for input in ["Héllo World!!", "  a  b  ", "!!!", "déjà-vu", "X Æ A-12"] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "slugify must be idempotent for {input:?}");
        }
    }
}
