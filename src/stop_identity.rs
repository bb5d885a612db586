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

//! Canonical identity of a stop, extracted from its textual `stop_id`.

use crate::Error;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DIGITS: Regex = Regex::new(r"[0-9]+").unwrap();
}

/// Numeric identity and display code of a stop.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StopIdentity {
    /// Canonical numeric identifier
    pub id: u32,
    /// Code displayed to riders
    pub code: String,
}

/// Extracts the `StopIdentity` of a raw `stop_id`.
///
/// A `stop_id` made of digits only is its own code ("GoTime" number).
/// Otherwise the first run of digits is used, `"STOP_1073B"` giving 1073.
pub fn normalize(raw_stop_id: &str) -> Result<StopIdentity, Error> {
    let unrecognized = || Error::UnrecognizedStopId(raw_stop_id.to_string());
    if !raw_stop_id.is_empty() && raw_stop_id.bytes().all(|b| b.is_ascii_digit()) {
        let id = raw_stop_id.parse().map_err(|_| unrecognized())?;
        return Ok(StopIdentity {
            id,
            code: raw_stop_id.to_string(),
        });
    }
    let digits = DIGITS.find(raw_stop_id).ok_or_else(unrecognized)?;
    let id = digits.as_str().parse().map_err(|_| unrecognized())?;
    Ok(StopIdentity {
        id,
        code: digits.as_str().to_string(),
    })
}

/// Canonical identifier of a raw `stop_id`.
pub fn stop_id(raw_stop_id: &str) -> Result<u32, Error> {
    normalize(raw_stop_id).map(|identity| identity.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn digits_only() {
        let identity = normalize("1073").unwrap();
        assert_eq!(1073, identity.id);
        assert_eq!("1073", identity.code);
    }

    #[test]
    fn leading_zeros_are_kept_in_code() {
        let identity = normalize("01073").unwrap();
        assert_eq!(1073, identity.id);
        assert_eq!("01073", identity.code);
    }

    #[test]
    fn first_digit_run() {
        let identity = normalize("STOP_1073B").unwrap();
        assert_eq!(1073, identity.id);
        assert_eq!("1073", identity.code);

        let identity = normalize("F12_34").unwrap();
        assert_eq!(12, identity.id);
        assert_eq!("12", identity.code);
    }

    #[test]
    fn without_digits() {
        assert_eq!(
            Err(Error::UnrecognizedStopId("HFX_TERMINAL".to_string())),
            normalize("HFX_TERMINAL")
        );
        assert_eq!(
            Err(Error::UnrecognizedStopId(String::new())),
            normalize("")
        );
    }

    #[test]
    #[should_panic(expected = "UnrecognizedStopId(\"99999999999\")")]
    fn overflowing_identity() {
        stop_id("99999999999").unwrap();
    }
}
