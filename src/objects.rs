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

//! The canonical objects produced by the normalization, and the small value
//! types shared with the raw feed.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A calendar date.
pub type Date = chrono::NaiveDate;

/// Canonical identifier of a route, stable across feed versions.
pub type RouteId = u64;

/// One of the two travel directions of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Direction index 0.
    Forward,
    /// Direction index 1.
    Backward,
}

impl Direction {
    /// Both directions, in index order.
    pub const ALL: [Direction; 2] = [Direction::Forward, Direction::Backward];

    /// The GTFS `direction_id` of this direction.
    pub fn index(self) -> u8 {
        match self {
            Direction::Forward => 0,
            Direction::Backward => 1,
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = u8;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::Forward),
            1 => Ok(Direction::Backward),
            other => Err(other),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Errors while parsing a `Time`
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeError {
    /// The string is not of the form `HH:MM:SS`.
    #[error("wrong time format, expected HH:MM:SS")]
    WrongFormat,
    /// Minutes or seconds are above 59, or the time does not fit in a `u32`
    /// number of seconds.
    #[error("wrong time value, minutes and seconds must be below 60")]
    WrongValue,
}

/// A scheduled time, in seconds since the start of the service day.
///
/// Hours can go above 23 for trips running past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Time(u32);

impl Time {
    /// Creates a `Time` from hours, minutes and seconds, saturating at the
    /// largest time.
    pub fn new(h: u32, m: u32, s: u32) -> Time {
        Time::checked_new(h, m, s).unwrap_or(Time(u32::MAX))
    }
    /// Creates a `Time` from hours, minutes and seconds, `None` on overflow.
    pub fn checked_new(h: u32, m: u32, s: u32) -> Option<Time> {
        h.checked_mul(60 * 60)?
            .checked_add(m.checked_mul(60)?)?
            .checked_add(s)
            .map(Time)
    }
    /// Hours
    pub fn hours(self) -> u32 {
        self.0 / 60 / 60
    }
    /// Minutes of the hour
    pub fn minutes(self) -> u32 {
        self.0 / 60 % 60
    }
    /// Seconds of the minute
    pub fn seconds(self) -> u32 {
        self.0 % 60
    }
    /// Seconds since the start of the service day
    pub fn total_seconds(self) -> u32 {
        self.0
    }
}

impl FromStr for Time {
    type Err = TimeError;
    fn from_str(time: &str) -> Result<Self, Self::Err> {
        let mut t = time.trim().split(':');
        let (hours, minutes, seconds) = match (t.next(), t.next(), t.next(), t.next()) {
            (Some(h), Some(m), Some(s), None) => (h, m, s),
            _ => return Err(TimeError::WrongFormat),
        };
        let parse = |s: &str| s.parse::<u32>().map_err(|_| TimeError::WrongFormat);
        let (hours, minutes, seconds) = (parse(hours)?, parse(minutes)?, parse(seconds)?);
        if minutes > 59 || seconds > 59 {
            return Err(TimeError::WrongValue);
        }
        Time::checked_new(hours, minutes, seconds).ok_or(TimeError::WrongValue)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}

impl Serialize for Time {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D>(deserializer: D) -> Result<Time, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TimeVisitor;
        impl<'de> de::Visitor<'de> for TimeVisitor {
            type Value = Time;
            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a time in the format HH:MM:SS")
            }
            fn visit_str<E: de::Error>(self, time: &str) -> Result<Time, E> {
                time.parse().map_err(|e| E::custom(format!("{}: '{}'", e, time)))
            }
        }
        deserializer.deserialize_str(TimeVisitor)
    }
}

/// A normalized route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Canonical numeric identifier
    pub id: RouteId,
    /// Canonical short name (e.g. `ALD`)
    pub short_name: String,
    /// Canonical long name (e.g. `Alderney`)
    pub long_name: String,
    /// Color, as a 6 hexadecimal digits string
    pub color: String,
}

/// A normalized stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    /// Canonical numeric identifier
    pub id: u32,
    /// Code displayed to riders
    pub code: String,
    /// Cleaned display name
    pub name: String,
}

/// A stop of a canonical trip, at its position in the direction's reference
/// sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TripStop {
    /// Canonical stop identifier
    pub stop_id: u32,
    /// Index in the reference sequence
    pub position: usize,
}

/// A canonical directional trip: one per (route, direction).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    /// Canonical route identifier
    pub route_id: RouteId,
    /// Direction of the trip
    pub direction: Direction,
    /// Headsign displayed to riders
    pub headsign: String,
    /// Visited stops, ordered by position
    pub stops: Vec<TripStop>,
}

impl Trip {
    /// Canonical trip identifier, derived from the route and the direction.
    pub fn id(&self) -> u64 {
        trip_id(self.route_id, self.direction)
    }
}

/// Identifier of the canonical trip of `route_id` in `direction`.
pub fn trip_id(route_id: RouteId, direction: Direction) -> u64 {
    route_id * 100 + u64::from(direction.index())
}

/// A raw stop visit resolved to a canonical trip and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    /// Service of the raw trip
    pub service_id: String,
    /// Canonical route identifier
    pub route_id: RouteId,
    /// Direction the raw trip was classified in
    pub direction: Direction,
    /// Canonical stop identifier
    pub stop_id: u32,
    /// Position in the direction's reference sequence
    pub position: usize,
    /// Scheduled arrival
    pub arrival_time: Time,
    /// Scheduled departure
    pub departure_time: Time,
    /// Raw trip the visit comes from
    pub raw_trip_id: String,
}

impl Schedule {
    /// Identifier of the canonical trip this visit belongs to.
    pub fn trip_id(&self) -> u64 {
        trip_id(self.route_id, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_time_after_midnight() {
        let time: Time = "25:03:09".parse().unwrap();
        assert_eq!(25, time.hours());
        assert_eq!(3, time.minutes());
        assert_eq!(9, time.seconds());
        assert_eq!("25:03:09", time.to_string());
    }

    #[test]
    fn parse_invalid_times() {
        assert_eq!(Err(TimeError::WrongFormat), "10:00".parse::<Time>());
        assert_eq!(Err(TimeError::WrongFormat), "10:aa:00".parse::<Time>());
        assert_eq!(Err(TimeError::WrongValue), "10:60:00".parse::<Time>());
        assert_eq!(
            Err(TimeError::WrongValue),
            "4000000:00:00".parse::<Time>()
        );
    }

    #[test]
    fn largest_times() {
        let time: Time = "1193046:28:15".parse().unwrap();
        assert_eq!(u32::MAX, time.total_seconds());
        assert_eq!(None, Time::checked_new(1_193_046, 28, 16));
        assert_eq!(time, Time::new(4_000_000, 0, 0));
    }

    #[test]
    fn direction_from_index() {
        assert_eq!(Ok(Direction::Forward), Direction::try_from(0));
        assert_eq!(Ok(Direction::Backward), Direction::try_from(1));
        assert_eq!(Err(2), Direction::try_from(2));
    }

    #[test]
    fn canonical_trip_ids() {
        assert_eq!(10000100, trip_id(100001, Direction::Forward));
        assert_eq!(10000201, trip_id(100002, Direction::Backward));
    }
}
