// file: src/search/positive_control.rs
// description: self-test of the matcher and highlighter against a fixed fixture
// reference: expected/actual comparison table

use crate::models::{ControlCase, PositiveControlResult};
use crate::search::{Highlighter, WordMatcher};
use tracing::{debug, warn};

/// Embedded fixture. Each check below has a known outcome against it.
pub const FIXTURE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Positive control fixture</title>
<style>.notice::after { content: "hidden"; }</style>
</head>
<body>
<!-- hidden comment -->
<p class="hidden">Compliance CERTIFICATE issued for the category of records.</p>
<p>The TeSt phrase uses ex<b>am</b>ple markup.</p>
<p>毒薬劇薬の取扱い</p>
<p>Catalog entries concatenate.</p>
</body>
</html>
"#;

struct Check {
    name: &'static str,
    word: &'static str,
    expected_hit: bool,
}

const CHECKS: &[Check] = &[
    Check {
        name: "latin_word_boundary_hit",
        word: "certificate",
        expected_hit: true,
    },
    Check {
        name: "case_insensitive_hit",
        word: "test",
        expected_hit: true,
    },
    Check {
        name: "cjk_substring_hit",
        word: "劇薬",
        expected_hit: true,
    },
    Check {
        name: "inline_markup_split_hit",
        word: "example",
        expected_hit: true,
    },
    Check {
        name: "partial_word_decoy",
        word: "cat",
        expected_hit: false,
    },
    Check {
        name: "markup_only_decoy",
        word: "hidden",
        expected_hit: false,
    },
];

const ROUND_TRIP_CASE: &str = "highlight_round_trip";

pub struct PositiveControl<'a> {
    matcher: WordMatcher,
    highlighter: &'a Highlighter,
}

impl<'a> PositiveControl<'a> {
    pub fn new(matcher: WordMatcher, highlighter: &'a Highlighter) -> Self {
        Self {
            matcher,
            highlighter,
        }
    }

    pub fn run(&self) -> PositiveControlResult {
        self.run_against(FIXTURE)
    }

    fn run_against(&self, fixture: &str) -> PositiveControlResult {
        let mut test_cases: Vec<ControlCase> = CHECKS
            .iter()
            .map(|check| {
                let actual_hit = !self.matcher.find_matches(fixture, check.word).is_empty();
                case(check.name, check.expected_hit, actual_hit)
            })
            .collect();

        test_cases.push(case(ROUND_TRIP_CASE, true, self.round_trip_holds(fixture)));

        let failed: Vec<&str> = test_cases
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.name.as_str())
            .collect();
        let all_passed = failed.is_empty();

        let warning = if all_passed {
            debug!("Positive control passed ({} cases)", test_cases.len());
            None
        } else {
            let message = format!(
                "Positive control failed: {} of {} cases mismatched ({}); results in this certificate may be unreliable",
                failed.len(),
                test_cases.len(),
                failed.join(", ")
            );
            warn!("{}", message);
            Some(message)
        };

        PositiveControlResult {
            executed: true,
            test_cases,
            all_passed,
            warning,
        }
    }

    /// Highlights every expected hit and verifies that stripping the
    /// markers gives back the fixture byte for byte.
    fn round_trip_holds(&self, fixture: &str) -> bool {
        let mut spans: Vec<_> = CHECKS
            .iter()
            .filter(|check| check.expected_hit)
            .flat_map(|check| self.matcher.find_matches(fixture, check.word))
            .collect();
        spans.sort();
        spans.dedup_by(|later, earlier| later.overlaps(earlier));

        if spans.is_empty() {
            return false;
        }

        match self.highlighter.highlight_content(fixture, &spans) {
            Ok(highlighted) => {
                highlighted.contains(self.highlighter.open_marker())
                    && self.highlighter.strip_markers(&highlighted) == fixture
            }
            Err(_) => false,
        }
    }
}

fn case(name: &str, expected_hit: bool, actual_hit: bool) -> ControlCase {
    ControlCase {
        name: name.to_string(),
        expected_hit,
        actual_hit,
        passed: expected_hit == actual_hit,
    }
}
