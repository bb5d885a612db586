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

//! Export of the normalized objects as CSV files.

use crate::{
    gtfs::{Calendar, CalendarDate, ExceptionType},
    objects::{Date, Route, Schedule, Stop, Time, Trip},
    pipeline::Output,
    Result, AGENCY_ROUTE_TYPE,
};
use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Serialize, Debug)]
struct AgencyRow<'a> {
    agency_color: &'a str,
    route_type: u16,
}

#[derive(Serialize, Debug)]
struct RouteRow<'a> {
    route_id: u64,
    route_short_name: &'a str,
    route_long_name: &'a str,
    route_color: &'a str,
}

impl<'a> From<&'a Route> for RouteRow<'a> {
    fn from(route: &'a Route) -> Self {
        RouteRow {
            route_id: route.id,
            route_short_name: &route.short_name,
            route_long_name: &route.long_name,
            route_color: &route.color,
        }
    }
}

#[derive(Serialize, Debug)]
struct TripRow<'a> {
    trip_id: u64,
    route_id: u64,
    direction_id: u8,
    trip_headsign: &'a str,
}

impl<'a> From<&'a Trip> for TripRow<'a> {
    fn from(trip: &'a Trip) -> Self {
        TripRow {
            trip_id: trip.id(),
            route_id: trip.route_id,
            direction_id: trip.direction.index(),
            trip_headsign: &trip.headsign,
        }
    }
}

#[derive(Serialize, Debug)]
struct TripStopRow {
    trip_id: u64,
    stop_id: u32,
    stop_position: usize,
}

#[derive(Serialize, Debug)]
struct StopRow<'a> {
    stop_id: u32,
    stop_code: &'a str,
    stop_name: &'a str,
}

impl<'a> From<&'a Stop> for StopRow<'a> {
    fn from(stop: &'a Stop) -> Self {
        StopRow {
            stop_id: stop.id,
            stop_code: &stop.code,
            stop_name: &stop.name,
        }
    }
}

#[derive(Serialize, Debug)]
struct ScheduleRow<'a> {
    service_id: &'a str,
    trip_id: u64,
    stop_id: u32,
    stop_position: usize,
    arrival_time: Time,
    departure_time: Time,
}

impl<'a> From<&'a Schedule> for ScheduleRow<'a> {
    fn from(schedule: &'a Schedule) -> Self {
        ScheduleRow {
            service_id: &schedule.service_id,
            trip_id: schedule.trip_id(),
            stop_id: schedule.stop_id,
            stop_position: schedule.position,
            arrival_time: schedule.arrival_time,
            departure_time: schedule.departure_time,
        }
    }
}

#[derive(Serialize, Debug)]
struct CalendarRow<'a> {
    service_id: &'a str,
    monday: u8,
    tuesday: u8,
    wednesday: u8,
    thursday: u8,
    friday: u8,
    saturday: u8,
    sunday: u8,
    start_date: String,
    end_date: String,
}

impl<'a> From<&'a Calendar> for CalendarRow<'a> {
    fn from(calendar: &'a Calendar) -> Self {
        CalendarRow {
            service_id: &calendar.service_id,
            monday: calendar.monday.into(),
            tuesday: calendar.tuesday.into(),
            wednesday: calendar.wednesday.into(),
            thursday: calendar.thursday.into(),
            friday: calendar.friday.into(),
            saturday: calendar.saturday.into(),
            sunday: calendar.sunday.into(),
            start_date: format_date(calendar.start_date),
            end_date: format_date(calendar.end_date),
        }
    }
}

#[derive(Serialize, Debug)]
struct CalendarDateRow<'a> {
    service_id: &'a str,
    date: String,
    exception_type: u8,
}

impl<'a> From<&'a CalendarDate> for CalendarDateRow<'a> {
    fn from(calendar_date: &'a CalendarDate) -> Self {
        CalendarDateRow {
            service_id: &calendar_date.service_id,
            date: format_date(calendar_date.date),
            exception_type: match calendar_date.exception_type {
                ExceptionType::Add => 1,
                ExceptionType::Remove => 2,
            },
        }
    }
}

fn format_date(date: Date) -> String {
    date.format("%Y%m%d").to_string()
}

const AGENCY_HEADERS: &[&str] = &["agency_color", "route_type"];
const ROUTE_HEADERS: &[&str] = &[
    "route_id",
    "route_short_name",
    "route_long_name",
    "route_color",
];
const TRIP_HEADERS: &[&str] = &["trip_id", "route_id", "direction_id", "trip_headsign"];
const TRIP_STOP_HEADERS: &[&str] = &["trip_id", "stop_id", "stop_position"];
const STOP_HEADERS: &[&str] = &["stop_id", "stop_code", "stop_name"];
const SCHEDULE_HEADERS: &[&str] = &[
    "service_id",
    "trip_id",
    "stop_id",
    "stop_position",
    "arrival_time",
    "departure_time",
];
const CALENDAR_HEADERS: &[&str] = &[
    "service_id",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
    "start_date",
    "end_date",
];
const CALENDAR_DATE_HEADERS: &[&str] = &["service_id", "date", "exception_type"];

fn write_rows<R, I>(path: &Path, file_name: &str, headers: &[&str], rows: I) -> Result<()>
where
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    info!(file_name = %file_name, "Writing");
    let path = path.join(file_name);
    let mut wtr =
        csv::Writer::from_path(&path).with_context(|| format!("Error writing {:?}", path))?;
    let mut is_empty = true;
    for row in rows {
        wtr.serialize(row)
            .with_context(|| format!("Error writing {:?}", path))?;
        is_empty = false;
    }
    if is_empty {
        // serde only writes the header along with the first row
        wtr.write_record(headers)
            .with_context(|| format!("Error writing {:?}", path))?;
    }
    wtr.flush()
        .with_context(|| format!("Error writing {:?}", path))?;
    Ok(())
}

/// Writes the normalized objects in the directory `path`, created if needed.
///
/// Every file name starts with `files_prefix`.
pub fn write<P: AsRef<Path>>(output: &Output, path: P, files_prefix: &str) -> Result<()> {
    let path = path.as_ref();
    info!("Writing normalized feed to {:?}", path);
    fs::create_dir_all(path).with_context(|| format!("Error creating {:?}", path))?;
    let file = |name: &str| format!("{}{}", files_prefix, name);

    write_rows(
        path,
        &file("agency.txt"),
        AGENCY_HEADERS,
        std::iter::once(AgencyRow {
            agency_color: &output.agency_color,
            route_type: AGENCY_ROUTE_TYPE,
        }),
    )?;
    write_rows(
        path,
        &file("routes.txt"),
        ROUTE_HEADERS,
        output.routes.iter().map(RouteRow::from),
    )?;
    write_rows(
        path,
        &file("trips.txt"),
        TRIP_HEADERS,
        output.trips.iter().map(TripRow::from),
    )?;
    let trip_stops = output.trips.iter().flat_map(|trip| {
        trip.stops.iter().map(move |stop| TripStopRow {
            trip_id: trip.id(),
            stop_id: stop.stop_id,
            stop_position: stop.position,
        })
    });
    write_rows(path, &file("trip_stops.txt"), TRIP_STOP_HEADERS, trip_stops)?;
    write_rows(
        path,
        &file("stops.txt"),
        STOP_HEADERS,
        output.stops.iter().map(StopRow::from),
    )?;
    write_rows(
        path,
        &file("schedules.txt"),
        SCHEDULE_HEADERS,
        output.schedules.iter().map(ScheduleRow::from),
    )?;
    write_rows(
        path,
        &file("calendar.txt"),
        CALENDAR_HEADERS,
        output.calendars.iter().map(CalendarRow::from),
    )?;
    write_rows(
        path,
        &file("calendar_dates.txt"),
        CALENDAR_DATE_HEADERS,
        output.calendar_dates.iter().map(CalendarDateRow::from),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{Direction, TripStop};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn output() -> Output {
        Output {
            agency_color: "FDB714".to_string(),
            routes: vec![Route {
                id: 100_001,
                short_name: "ALD".to_string(),
                long_name: "Alderney".to_string(),
                color: "08215C".to_string(),
            }],
            trips: vec![Trip {
                route_id: 100_001,
                direction: Direction::Forward,
                headsign: "Dartmouth".to_string(),
                stops: vec![
                    TripStop {
                        stop_id: 1073,
                        position: 0,
                    },
                    TripStop {
                        stop_id: 1074,
                        position: 1,
                    },
                ],
            }],
            stops: vec![Stop {
                id: 1073,
                code: "1073".to_string(),
                name: "Halifax Ferry Terminal".to_string(),
            }],
            schedules: vec![Schedule {
                service_id: "weekday".to_string(),
                route_id: 100_001,
                direction: Direction::Forward,
                stop_id: 1073,
                position: 0,
                arrival_time: Time::new(24, 5, 0),
                departure_time: Time::new(24, 5, 0),
                raw_trip_id: "t1".to_string(),
            }],
            calendars: vec![],
            calendar_dates: vec![CalendarDate {
                service_id: "weekday".to_string(),
                date: Date::from_ymd_opt(2024, 7, 1).unwrap(),
                exception_type: ExceptionType::Remove,
            }],
        }
    }

    fn read(dir: &TempDir, file_name: &str) -> String {
        fs::read_to_string(dir.path().join(file_name)).unwrap()
    }

    #[test]
    fn write_normalized_feed() {
        let dir = TempDir::new().expect("create temp dir failed");
        let path = dir.path().join("output");

        write(&output(), &path, "ferry_").unwrap();

        let dir_path = |name: &str| format!("output/{}", name);
        assert_eq!(
            "agency_color,route_type\nFDB714,4\n",
            read(&dir, &dir_path("ferry_agency.txt"))
        );
        assert_eq!(
            "route_id,route_short_name,route_long_name,route_color\n\
             100001,ALD,Alderney,08215C\n",
            read(&dir, &dir_path("ferry_routes.txt"))
        );
        assert_eq!(
            "trip_id,route_id,direction_id,trip_headsign\n10000100,100001,0,Dartmouth\n",
            read(&dir, &dir_path("ferry_trips.txt"))
        );
        assert_eq!(
            "trip_id,stop_id,stop_position\n10000100,1073,0\n10000100,1074,1\n",
            read(&dir, &dir_path("ferry_trip_stops.txt"))
        );
        assert_eq!(
            "stop_id,stop_code,stop_name\n1073,1073,Halifax Ferry Terminal\n",
            read(&dir, &dir_path("ferry_stops.txt"))
        );
        assert_eq!(
            "service_id,trip_id,stop_id,stop_position,arrival_time,departure_time\n\
             weekday,10000100,1073,0,24:05:00,24:05:00\n",
            read(&dir, &dir_path("ferry_schedules.txt"))
        );
        assert_eq!(
            "service_id,date,exception_type\nweekday,20240701,2\n",
            read(&dir, &dir_path("ferry_calendar_dates.txt"))
        );
    }

    #[test]
    fn empty_output_writes_headers() {
        let dir = TempDir::new().expect("create temp dir failed");

        write(&Output::default(), dir.path(), "").unwrap();

        assert_eq!(
            "service_id,monday,tuesday,wednesday,thursday,friday,saturday,sunday,start_date,end_date\n",
            read(&dir, "calendar.txt")
        );
        assert_eq!(
            "trip_id,stop_id,stop_position\n",
            read(&dir, "trip_stops.txt")
        );
        assert_eq!("agency_color,route_type\n,4\n", read(&dir, "agency.txt"));
    }
}
