use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Collapse text into its canonical matching form: lowercase, diacritics
/// folded away, everything outside `[a-z0-9@#]` treated as a separator,
/// whitespace collapsed and trimmed.
#[must_use]
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;
    for ch in input.chars().flat_map(char::to_lowercase).nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        if matches!(ch, 'a'..='z' | '0'..='9' | '@' | '#') {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            pending_space = true;
        }
    }
    out
}

/// Split normalized text into match tokens.
///
/// A leading `@` or `#` is significant (mentions, hashtags) and is kept as
/// part of the token; anywhere else the prefix characters are noise and
/// trailing runs of them are stripped.
#[must_use]
pub fn tokenize(input: &str) -> Vec<String> {
    normalize(input).split(' ').filter_map(clean_token).collect()
}

fn clean_token(raw: &str) -> Option<String> {
    if raw.is_empty() || raw == "@" || raw == "#" {
        return None;
    }
    if raw.starts_with('@') || raw.starts_with('#') {
        return Some(raw.to_owned());
    }
    let stripped = raw.trim_end_matches(['@', '#']);
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_and_diacritic_folding() {
        assert_eq!(normalize("I love Café culture"), "i love cafe culture");
        assert_eq!(normalize("Société Générale"), "societe generale");
    }

    #[test]
    fn punctuation_becomes_separator() {
        assert_eq!(normalize("Orthopedic-surgery update!"), "orthopedic surgery update");
        assert_eq!(tokenize("AT&T's launch"), vec!["at", "t", "s", "launch"]);
    }

    #[test]
    fn whitespace_collapse_and_trim() {
        assert_eq!(normalize("  a \t b\n\nc  "), "a b c");
    }

    #[test]
    fn mention_and_hashtag_prefixes_survive() {
        assert_eq!(tokenize("#stryker trauma @team"), vec!["#stryker", "trauma", "@team"]);
    }

    #[test]
    fn lone_prefix_characters_are_dropped() {
        assert_eq!(tokenize("a @ # b"), vec!["a", "b"]);
    }

    #[test]
    fn trailing_prefix_runs_are_stripped() {
        assert_eq!(tokenize("foo@ bar##"), vec!["foo", "bar"]);
    }

    #[test]
    fn empty_and_symbol_only_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("!!! ...").is_empty());
    }

    #[test]
    fn tokenize_is_idempotent() {
        let samples = ["I love Café culture", "#tag @user mixed-CASE text", "  x  "];
        for s in samples {
            let once = tokenize(s);
            let again = tokenize(&once.join(" "));
            assert_eq!(once, again, "idempotence violated for {s:?}");
        }
    }
}
