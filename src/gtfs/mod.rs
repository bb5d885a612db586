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

//! [GTFS](http://gtfs.org/) reading: the raw feed as published by the agency.

mod read;

use crate::{
    file_handler::{PathFileHandler, ZipHandler},
    objects::{Date, Time},
    serde_utils::*,
    Result,
};
use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::path::Path;
use tracing::info;
use typed_index_collection::{impl_id, CollectionWithId};

/// A route, as found in `routes.txt`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Route {
    /// Raw `route_id`
    #[serde(rename = "route_id")]
    pub id: String,
    /// Raw `route_short_name`, the code mapped to a canonical route
    #[serde(rename = "route_short_name", default)]
    pub short_name: String,
    /// Raw `route_long_name`
    #[serde(rename = "route_long_name", default)]
    pub long_name: String,
    /// Raw `route_type`
    #[serde(default, deserialize_with = "de_with_empty_default")]
    pub route_type: u16,
    /// Raw `route_color`, blank being `None`
    #[serde(
        rename = "route_color",
        default,
        deserialize_with = "de_option_non_blank"
    )]
    pub color: Option<String>,
}
impl_id!(Route);

/// A stop, as found in `stops.txt`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Stop {
    /// Raw textual `stop_id`
    #[serde(rename = "stop_id")]
    pub id: String,
    /// Raw `stop_code`
    #[serde(rename = "stop_code", default, deserialize_with = "de_option_non_blank")]
    pub code: Option<String>,
    /// Raw `stop_name`
    #[serde(rename = "stop_name", default)]
    pub name: String,
}
impl_id!(Stop);

/// A stop visit, as found in `stop_times.txt`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct StopTime {
    /// Raw `trip_id`
    pub trip_id: String,
    /// Raw `stop_id`
    pub stop_id: String,
    /// `stop_sequence`
    #[serde(rename = "stop_sequence")]
    pub sequence: u32,
    /// Scheduled arrival
    pub arrival_time: Time,
    /// Scheduled departure
    pub departure_time: Time,
}

/// A trip, as found in `trips.txt`, with its stop visits.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Trip {
    /// Raw `trip_id`
    #[serde(rename = "trip_id")]
    pub id: String,
    /// Raw `route_id`
    pub route_id: String,
    /// Raw `service_id`
    pub service_id: String,
    /// Raw `trip_headsign`
    #[serde(rename = "trip_headsign", default)]
    pub headsign: String,
    /// Direction flag supplied by the feed, if any
    #[serde(default)]
    pub direction_id: Option<u8>,
    /// Stop visits, sorted by `stop_sequence`
    #[serde(skip)]
    pub stop_times: Vec<StopTime>,
}
impl_id!(Trip);

/// A service validity window, as found in `calendar.txt`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Calendar {
    /// Service identity
    pub service_id: String,
    /// True if the Service is active on Mondays
    #[serde(deserialize_with = "de_from_u8")]
    pub monday: bool,
    /// True if the Service is active on Tuesdays
    #[serde(deserialize_with = "de_from_u8")]
    pub tuesday: bool,
    /// True if the Service is active on Wednesdays
    #[serde(deserialize_with = "de_from_u8")]
    pub wednesday: bool,
    /// True if the Service is active on Thursdays
    #[serde(deserialize_with = "de_from_u8")]
    pub thursday: bool,
    /// True if the Service is active on Fridays
    #[serde(deserialize_with = "de_from_u8")]
    pub friday: bool,
    /// True if the Service is active on Saturdays
    #[serde(deserialize_with = "de_from_u8")]
    pub saturday: bool,
    /// True if the Service is active on Sundays
    #[serde(deserialize_with = "de_from_u8")]
    pub sunday: bool,
    /// The Service is active starting from this date
    #[serde(deserialize_with = "de_from_date_string")]
    pub start_date: Date,
    /// The Service is active until this date
    #[serde(deserialize_with = "de_from_date_string")]
    pub end_date: Date,
}

impl Calendar {
    /// True if the service runs on at least one day of the week.
    pub fn has_active_day(&self) -> bool {
        self.monday
            || self.tuesday
            || self.wednesday
            || self.thursday
            || self.friday
            || self.saturday
            || self.sunday
    }
}

/// Is the calendar exception adding or removing the date
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionType {
    /// The service runs on the date
    #[serde(rename = "1")]
    Add,
    /// The service does not run on the date
    #[serde(rename = "2")]
    Remove,
}

/// A calendar exception, as found in `calendar_dates.txt`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CalendarDate {
    /// Service identity
    pub service_id: String,
    /// Date at which the exception applies
    #[serde(deserialize_with = "de_from_date_string")]
    pub date: Date,
    /// Is the date added or removed
    pub exception_type: ExceptionType,
}

/// An in-memory snapshot of a GTFS feed.
#[derive(Debug, Default)]
pub struct Feed {
    /// Routes
    pub routes: CollectionWithId<Route>,
    /// Trips, with their stop visits
    pub trips: CollectionWithId<Trip>,
    /// Stops
    pub stops: CollectionWithId<Stop>,
    /// Service validity windows
    pub calendars: Vec<Calendar>,
    /// Service exceptions
    pub calendar_dates: Vec<CalendarDate>,
}

/// Imports a `Feed` from the GTFS files in the given directory.
pub fn read_from_path<P: AsRef<Path>>(p: P) -> Result<Feed> {
    let mut file_handler = PathFileHandler::new(p.as_ref().to_path_buf());
    read::read_feed(&mut file_handler)
}

/// Imports a `Feed` from a zip file containing the GTFS.
pub fn read_from_zip<P: AsRef<Path>>(path: P) -> Result<Feed> {
    let reader = std::fs::File::open(path.as_ref())?;
    let mut file_handler = ZipHandler::new(reader, path)?;
    read::read_feed(&mut file_handler)
}

/// Imports a `Feed` from a directory or a zip file containing the GTFS.
pub fn read<P: AsRef<Path>>(path: P) -> Result<Feed> {
    let p = path.as_ref();
    info!("Reading GTFS from {:?}", p);
    if p.is_file() {
        read_from_zip(p).with_context(|| format!("impossible to read ziped gtfs {:?}", p))
    } else if p.is_dir() {
        read_from_path(p).with_context(|| format!("impossible to read gtfs directory from {:?}", p))
    } else {
        Err(anyhow!(
            "file {:?} is neither a file nor a directory, cannot read a gtfs from it",
            p
        ))
    }
}
