//! Title to URL slug conversion.

/// Convert a post title into a URL-safe slug.
///
/// The title is lower-cased, whitespace runs become a single hyphen,
/// anything that is not an ASCII letter, digit, underscore or hyphen is
/// dropped, and hyphen runs are collapsed. Leading and trailing hyphens
/// never survive.
///
/// Titles made only of punctuation produce an empty slug.
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;

    for c in lowered.chars() {
        if is_separator_space(c) || c == '-' {
            pending_hyphen = true;
        } else if c.is_ascii_alphanumeric() || c == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        }
    }

    slug
}

/// Whitespace as browsers' regex `\s` defines it.
///
/// Unlike `char::is_whitespace` this includes U+FEFF and excludes U+0085.
fn is_separator_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{B}'
            | '\u{C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unicode_spacing_characters() {
        assert_eq!(generate_slug("a\u{FEFF}b"), "a-b");
        assert_eq!(generate_slug("\u{FEFF}Title\u{FEFF}"), "title");
        assert_eq!(generate_slug("a\u{85}b"), "ab");
        assert_eq!(generate_slug("a\u{3000}b\u{2009}c"), "a-b-c");
    }

    #[test]
    fn test_punctuation_and_padding() {
        assert_eq!(generate_slug("  Hello, World!  "), "hello-world");
    }

    #[test]
    fn test_empty_and_symbol_only_titles() {
        assert_eq!(generate_slug(""), "");
        assert_eq!(generate_slug("   "), "");
        assert_eq!(generate_slug("!!! ??? ..."), "");
    }

    #[test]
    fn test_hyphen_runs_collapse() {
        assert_eq!(generate_slug("Rust -- the  good   parts"), "rust-the-good-parts");
        assert_eq!(generate_slug("a ! b"), "a-b");
        assert_eq!(generate_slug("--edge--"), "edge");
    }

    #[test]
    fn test_dropped_characters_do_not_split_words() {
        assert_eq!(generate_slug("don't"), "dont");
        assert_eq!(generate_slug("C++ & Rust"), "c-rust");
    }

    #[test]
    fn test_keeps_digits_and_underscores() {
        assert_eq!(generate_slug("Top 10 snake_case tips"), "top-10-snake_case-tips");
    }

    #[test]
    fn test_non_ascii_letters_are_dropped() {
        assert_eq!(generate_slug("Café au lait"), "caf-au-lait");
        assert_eq!(generate_slug("日本語"), "");
    }

    proptest! {
        #[test]
        fn slug_never_has_whitespace_or_edge_hyphens(title in "\\PC*") {
            let slug = generate_slug(&title);
            prop_assert!(!slug.chars().any(char::is_whitespace));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }

        #[test]
        fn slug_is_idempotent(title in "[ -~]*") {
            let once = generate_slug(&title);
            prop_assert_eq!(generate_slug(&once), once);
        }
    }
}
