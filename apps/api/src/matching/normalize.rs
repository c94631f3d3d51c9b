//! Canonical form for skill, level and location strings.

use std::sync::LazyLock;

use regex::Regex;

/// Anything that is not a word character, whitespace, `.`, `#`, `+` or `-`.
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s.#+\-]").expect("static pattern"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

/// Lowercases `text`, folds disallowed punctuation into spaces, collapses
/// whitespace runs and trims the ends.
///
/// `"React.js / Node"` → `"react.js node"`, `"C#"` → `"c#"`.
/// Idempotent: the output only contains characters the patterns keep.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let folded = DISALLOWED.replace_all(&lowered, " ");
    let collapsed = WHITESPACE_RUN.replace_all(&folded, " ");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_trims() {
        assert_eq!(normalize("  JavaScript  "), "javascript");
    }

    #[test]
    fn test_keeps_symbol_characters() {
        assert_eq!(normalize("C#"), "c#");
        assert_eq!(normalize("C++"), "c++");
        assert_eq!(normalize("Node.js"), "node.js");
        assert_eq!(normalize("flask-restful"), "flask-restful");
    }

    #[test]
    fn test_folds_punctuation_to_single_space() {
        assert_eq!(normalize("CI/CD"), "ci cd");
        assert_eq!(normalize("React, Redux!!  (Toolkit)"), "react redux toolkit");
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n "), "");
        assert_eq!(normalize("***"), "");
    }

    #[test]
    fn test_non_ascii_letters_become_spaces() {
        assert_eq!(normalize("Café Society"), "caf society");
    }

    #[test]
    fn test_idempotent_on_examples() {
        for raw in ["Senior  Engineer", "Remote / Berlin", "ASP.NET Core", "k8s"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }
}
