//! Extinguisher rating parsing.
//!
//! Ratings follow the UL/ULC label format, e.g. `3-A:40-B:C`: a numeric
//! Class A value, a numeric Class B value, and listing letters for the
//! non-numeric classes.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Commonly stocked ratings offered as presets.
pub const STANDARD_RATINGS: &[&str] = &[
    "1-A:10-B:C",
    "2-A:10-B:C",
    "3-A:40-B:C",
    "4-A:60-B:C",
    "6-A:80-B:C",
    "10-A:120-B:C",
    "20-A:120-B:C",
    "30-A:160-B:C",
    "40-A:240-B:C",
    "Class D (Metal)",
    "Class K (Kitchen)",
];

/// The preset used when nothing else is specified.
pub const DEFAULT_RATING: &str = "4-A:60-B:C";

fn class_a_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)-A").expect("valid Class A pattern"))
}

fn class_b_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)-B").expect("valid Class B pattern"))
}

/// A parsed extinguisher rating.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rating {
    /// The rating text as entered.
    pub raw: String,
    /// Class A numeric rating (0 when absent).
    pub a: u32,
    /// Class B numeric rating (0 when absent).
    pub b: u32,
    /// Listed for Class C (energized electrical).
    pub c: bool,
    /// Listed for Class D (combustible metals).
    pub d: bool,
    /// Listed for Class K (cooking media).
    pub k: bool,
}

impl Rating {
    /// Parse a rating label.
    ///
    /// Parsing never fails: anything that is not recognised simply
    /// contributes nothing to the rating.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let normalized: String = text
            .to_uppercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        let numeric = |re: &Regex| {
            re.captures(&normalized)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .unwrap_or(0)
        };

        let listed = |letter: char| {
            normalized.contains(&format!(":{letter}"))
                || normalized.contains(&format!("-{letter}"))
                || normalized.contains(&format!("CLASS{letter}"))
        };

        Self {
            raw: text.to_string(),
            a: numeric(class_a_regex()),
            b: numeric(class_b_regex()),
            c: listed('C'),
            d: listed('D'),
            k: listed('K'),
        }
    }

    /// Whether the label looks like a dry chemical agent.
    ///
    /// True for labels mentioning "dry", and for multipurpose A/B/C labels,
    /// which in practice are ammonium phosphate dry chemical units.
    #[must_use]
    pub fn is_dry_chemical_like(&self) -> bool {
        self.raw.to_lowercase().contains("dry")
            || (self.raw.contains('A') && self.raw.contains('B') && self.raw.contains('C'))
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
