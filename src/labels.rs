// Copyright (C) 2017 Hove and/or its affiliates.
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, version 3.

// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.

// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>

//! Cleanup of stop names and trip headsigns.
//!
//! Every function is a pure rewrite of its input and a fixed point on its own
//! output: cleaning an already cleaned label leaves it unchanged.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use titlecase::titlecase;

lazy_static! {
    static ref FERRY_STOP: Regex = Regex::new(r"(?i)ferry\s+stop\s*-\s*").unwrap();
    static ref ENDS_WITH_NUMBER: Regex = Regex::new(r"(\s*\([0-9]+\))+$").unwrap();
    static ref NUMBER_ORDINAL: Regex = Regex::new(r"(?i)\b([0-9]+)(st|nd|rd|th)\b").unwrap();
    static ref WORD_ORDINAL: Regex = Regex::new(
        r"(?i)\b(first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth)\b"
    )
    .unwrap();
    static ref SPACES: Regex = Regex::new(r"\s+").unwrap();
    static ref SPACE_AFTER_PARENTHESIS: Regex = Regex::new(r"\(\s+").unwrap();
    static ref SPACE_BEFORE_PUNCTUATION: Regex = Regex::new(r"\s+([,.;:!?)])").unwrap();
    static ref NO_SPACE_AFTER_COMMA: Regex = Regex::new(r",([A-Za-z])").unwrap();
    static ref LEADING_SEPARATORS: Regex = Regex::new(r"^[\s,\-]+").unwrap();
    static ref TRAILING_SEPARATORS: Regex = Regex::new(r"[\s,\-]+$").unwrap();
    static ref STREET_TYPES: Regex =
        Regex::new(r"\b(Rd|Ave|Av|Dr|Blvd|Hwy|Ter|Cres|Pkwy|Ln|Ct|Pl|Sq)\b\.?").unwrap();
}

/// Words after which "St" names a saint rather than a street.
const SAINT_PRECEDERS: &[&str] = &["-", "/", "&", "to", "To", "at", "At"];

/// General label hygiene: trims, collapses white spaces and fixes the spacing
/// around punctuation.
pub fn clean_label(label: &str) -> String {
    let label = SPACES.replace_all(label.trim(), " ");
    let label = SPACE_AFTER_PARENTHESIS.replace_all(&label, "(");
    let label = SPACE_BEFORE_PUNCTUATION.replace_all(&label, "$1");
    let label = NO_SPACE_AFTER_COMMA.replace_all(&label, ", $1");
    let label = LEADING_SEPARATORS.replace(&label, "");
    TRAILING_SEPARATORS.replace(&label, "").into_owned()
}

/// Normalizes ordinals: `"2ND"` and `"second"` both become `"2nd"`.
pub fn clean_numbers(label: &str) -> String {
    let label = NUMBER_ORDINAL.replace_all(label, |caps: &Captures| {
        format!("{}{}", &caps[1], caps[2].to_lowercase())
    });
    WORD_ORDINAL
        .replace_all(&label, |caps: &Captures| {
            let ordinal = match caps[1].to_lowercase().as_str() {
                "first" => "1st",
                "second" => "2nd",
                "third" => "3rd",
                "fourth" => "4th",
                "fifth" => "5th",
                "sixth" => "6th",
                "seventh" => "7th",
                "eighth" => "8th",
                "ninth" => "9th",
                _ => "10th",
            };
            ordinal.to_string()
        })
        .into_owned()
}

/// Cleans a raw `stop_name`.
///
/// `"Ferry Stop - Halifax Ferry Terminal (3)"` becomes
/// `"Halifax Ferry Terminal"`.
pub fn clean_stop_name(stop_name: &str) -> String {
    let stop_name = clean_label(stop_name);
    let stop_name = FERRY_STOP.replace_all(&stop_name, "");
    let stop_name = ENDS_WITH_NUMBER.replace(&stop_name, "");
    let stop_name = clean_numbers(&stop_name);
    clean_label(&stop_name)
}

/// Cleans a raw `trip_headsign`: title case, no "via" clause, expanded street
/// types.
pub fn clean_trip_headsign(headsign: &str) -> String {
    let headsign = clean_label(headsign);
    let headsign = if headsign.chars().any(char::is_lowercase) {
        headsign
    } else {
        headsign.to_lowercase()
    };
    let headsign = titlecase(clean_label(&without_via(&headsign)).as_str());
    let headsign = STREET_TYPES.replace_all(&headsign, |caps: &Captures| {
        let street_type = match &caps[1] {
            "Rd" => "Road",
            "Ave" | "Av" => "Avenue",
            "Dr" => "Drive",
            "Blvd" => "Boulevard",
            "Hwy" => "Highway",
            "Ter" => "Terrace",
            "Cres" => "Crescent",
            "Pkwy" => "Parkway",
            "Ln" => "Lane",
            "Ct" => "Court",
            "Pl" => "Place",
            _ => "Square",
        };
        street_type.to_string()
    });
    clean_label(&saint_or_street(&headsign))
}

/// Drops every "via" clause, each one running up to the next "to".
fn without_via(label: &str) -> String {
    let mut in_via = false;
    label
        .split_whitespace()
        .filter(|word| {
            if word.eq_ignore_ascii_case("via") {
                in_via = true;
            } else if word.eq_ignore_ascii_case("to") {
                in_via = false;
            }
            !in_via
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn saint_or_street(label: &str) -> String {
    let words: Vec<&str> = label.split(' ').collect();
    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if *word != "St" && *word != "St." {
                return *word;
            }
            let after_separator = i == 0 || SAINT_PRECEDERS.contains(&words[i - 1]);
            if after_separator {
                "Saint"
            } else {
                "Street"
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ferry_stop_prefix_and_number_suffix() {
        assert_eq!(
            "Halifax Ferry Terminal",
            clean_stop_name("Ferry Stop - Halifax Ferry Terminal (3)")
        );
        assert_eq!(
            "Alderney Ferry Terminal",
            clean_stop_name("FERRY STOP - Alderney Ferry Terminal")
        );
    }

    #[test]
    fn repeated_suffixes_and_loose_prefix() {
        assert_eq!(
            "Halifax Ferry Terminal",
            clean_stop_name("Halifax Ferry Terminal (3) (4)")
        );
        assert_eq!("Halifax", clean_stop_name("Ferry  Stop - Halifax"));
        assert_eq!("Woodside", clean_stop_name("ferry stop-Woodside (2)(5)"));
    }

    #[test]
    fn non_numeric_suffix_is_kept() {
        assert_eq!(
            "Woodside Ferry Terminal (North)",
            clean_stop_name("Woodside Ferry Terminal (North)")
        );
    }

    #[test]
    fn label_hygiene() {
        assert_eq!(
            "Halifax, Lower Water St. (Pier 2)",
            clean_label("  Halifax ,Lower   Water St .  ( Pier 2 )  ")
        );
        assert_eq!("Dartmouth", clean_label("- Dartmouth -"));
    }

    #[test]
    fn ordinals() {
        assert_eq!("2nd Ave at 1st St", clean_numbers("2ND Ave at first St"));
    }

    #[test]
    fn stop_names_are_fixed_points() {
        for name in &[
            "Ferry Stop - Halifax Ferry Terminal (3)",
            "  Halifax ,Lower   Water St .  ( Pier 2 )  ",
            "ferry stop - Second Ferry Terminal (12)",
            "a , ,",
            "Halifax Ferry Terminal (3) (4)",
            "Ferry  Stop - Halifax",
            "Ferry Stop -Woodside (2)(5) -",
        ] {
            let cleaned = clean_stop_name(name);
            assert_eq!(cleaned, clean_stop_name(&cleaned));
        }
    }

    #[test]
    fn via_clause_is_removed() {
        assert_eq!("Woodside", clean_trip_headsign("woodside via alderney"));
        assert_eq!(
            "Halifax to Woodside",
            clean_trip_headsign("halifax via alderney to woodside")
        );
        assert_eq!(
            "Dartmouth to Halifax",
            clean_trip_headsign("dartmouth via alderney to halifax via woodside")
        );
    }

    #[test]
    fn street_types_are_expanded() {
        assert_eq!(
            "Halifax Ferry Terminal to Barrington Street",
            clean_trip_headsign("halifax ferry terminal to barrington st")
        );
        assert_eq!(
            "Saint Margarets Bay Road",
            clean_trip_headsign("st margarets bay rd")
        );
        assert_eq!(
            "Dartmouth to Saint Margarets Bay Road",
            clean_trip_headsign("DARTMOUTH TO ST MARGARETS BAY RD")
        );
    }

    #[test]
    fn headsigns_are_fixed_points() {
        for headsign in &[
            "halifax via alderney to woodside",
            "st margarets bay rd",
            "Halifax Ferry Terminal to Barrington Street",
            "a via b to c via d",
            "via alderney to woodside",
        ] {
            let cleaned = clean_trip_headsign(headsign);
            assert_eq!(cleaned, clean_trip_headsign(&cleaned));
        }
    }
}
