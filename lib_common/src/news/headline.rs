//! # Headline Cleaning
//!
//! Upstream article titles arrive with editorial noise: bracketed or
//! parenthetical annotations ("[update]", "(video)") and a trailing
//! publisher suffix ("... - CNN", "... | BBC"). Every headline leaving the
//! service passes through [`clean_headline`] first, including the entries
//! of the static fallback list below.

use regex::Regex;
use static_init::dynamic;

/// Fixed regional scope for both provider queries: the home region plus
/// neighboring territories, OR-ed the way both upstream APIs expect.
pub const REGION_QUERY: &str = "Cyprus OR Greece OR \"Eastern Mediterranean\"";

/// Served when no other branch of the fallback chain can produce headlines.
pub const FALLBACK_HEADLINES: [&str; 5] = [
    "Parliament debates the revised national budget for the coming year",
    "Energy grid upgrades continue across the island's rural districts",
    "Tourism arrivals show steady growth compared to last season",
    "New public transport routes announced for the capital region",
    "Coastal weather warning lifted as conditions return to normal",
];

#[dynamic]
static ANNOTATION_RE: Regex =
    Regex::new(r"\s*(\[[^\]]*\]|\([^)]*\))").expect("annotation pattern is valid");

// Last run of "- Source" / "| Source" anchored at the end; whitespace on
// either side of the separator is optional.
#[dynamic]
static TRAILING_SOURCE_RE: Regex =
    Regex::new(r"\s*[-|]\s*[^-|]+$").expect("trailing source pattern is valid");

/// Returns the static fallback list as owned strings.
pub fn fallback_headlines() -> Vec<String> {
    FALLBACK_HEADLINES.iter().map(|h| h.to_string()).collect()
}

/// Normalizes a raw article title.
///
/// 1. Removes bracketed `[...]` and parenthetical `(...)` annotations,
///    including any whitespace immediately before them.
/// 2. Strips one trailing `- Source` / `| Source` run.
/// 3. Trims surrounding whitespace.
///
/// Deterministic and total; empty input yields empty output.
pub fn clean_headline(raw: &str) -> String {
    let without_annotations = ANNOTATION_RE.replace_all(raw, "");
    let without_source = TRAILING_SOURCE_RE.replace(&without_annotations, "");
    without_source.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bracketed_annotation() {
        assert_eq!(clean_headline("Foo Bar [update]"), "Foo Bar");
    }

    #[test]
    fn strips_trailing_dash_source() {
        assert_eq!(clean_headline("Story Title - CNN"), "Story Title");
    }

    #[test]
    fn strips_annotation_and_pipe_source() {
        assert_eq!(clean_headline("Headline (video) | BBC"), "Headline");
    }

    #[test]
    fn strips_only_the_last_source_run() {
        assert_eq!(
            clean_headline("Back-to-back wins - Reuters"),
            "Back-to-back wins"
        );
        assert_eq!(clean_headline("A | B | C"), "A | B");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(clean_headline(""), "");
        assert_eq!(clean_headline("   "), "");
    }

    #[test]
    fn cleaning_is_idempotent() {
        let samples = [
            "Foo Bar [update]",
            "Story Title - CNN",
            "Headline (video) | BBC",
            "  Plain headline  ",
            "Markets rally after rate decision (live blog) - Bloomberg",
            "",
        ];
        for raw in samples {
            let once = clean_headline(raw);
            assert_eq!(clean_headline(&once), once, "not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn fallback_list_is_already_clean() {
        for h in FALLBACK_HEADLINES {
            assert_eq!(clean_headline(h), h);
        }
    }
}
