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

use super::{Calendar, CalendarDate, Feed, StopTime, Trip};
use crate::{
    file_handler::{check_feed_files, FileHandler},
    read_utils::{read_collection, read_objects, read_opt_objects},
    Result,
};
use anyhow::Context;
use std::collections::BTreeMap;
use tracing::info;
use typed_index_collection::CollectionWithId;

pub(super) fn read_feed<H>(file_handler: &mut H) -> Result<Feed>
where
    for<'a> &'a mut H: FileHandler,
{
    check_feed_files(file_handler)?;
    let calendars: Vec<Calendar> = read_opt_objects(file_handler, "calendar.txt")?;
    let calendar_dates: Vec<CalendarDate> = read_opt_objects(file_handler, "calendar_dates.txt")?;
    let routes = read_collection(file_handler, "routes.txt")?;
    let stops = read_collection(file_handler, "stops.txt")?;
    let trips: Vec<Trip> = read_objects(file_handler, "trips.txt")?;
    let stop_times: Vec<StopTime> = read_objects(file_handler, "stop_times.txt")?;
    let trips = attach_stop_times(trips, stop_times)?;
    Ok(Feed {
        routes,
        trips,
        stops,
        calendars,
        calendar_dates,
    })
}

fn attach_stop_times(
    trips: Vec<Trip>,
    stop_times: Vec<StopTime>,
) -> Result<CollectionWithId<Trip>> {
    let mut stop_times_by_trip: BTreeMap<String, Vec<StopTime>> = BTreeMap::new();
    for stop_time in stop_times {
        stop_times_by_trip
            .entry(stop_time.trip_id.clone())
            .or_default()
            .push(stop_time);
    }
    let mut trips = trips;
    for trip in &mut trips {
        if let Some(mut stop_times) = stop_times_by_trip.remove(&trip.id) {
            stop_times.sort_by_key(|stop_time| stop_time.sequence);
            trip.stop_times = stop_times;
        }
    }
    for trip_id in stop_times_by_trip.keys() {
        info!("stop times of unknown trip {:?} are ignored", trip_id);
    }
    let trips = CollectionWithId::new(trips).context("Error reading trips.txt")?;
    Ok(trips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_handler::PathFileHandler;
    use crate::gtfs::ExceptionType;
    use crate::objects::Time;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write_files(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().expect("create temp dir failed");
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    const ROUTES: &str = "route_id,route_short_name,route_long_name,route_type,route_color\n\
                          r1,FerD,,4,\n";
    const STOPS: &str = "stop_id,stop_code,stop_name\n1073,,Halifax\n1074,,Alderney\n";
    const TRIPS: &str = "route_id,service_id,trip_id,trip_headsign,direction_id\n\
                         r1,s1,t1,Dartmouth,\n";

    #[test]
    fn stop_times_are_sorted_by_sequence() {
        let dir = write_files(&[
            ("routes.txt", ROUTES),
            ("stops.txt", STOPS),
            ("trips.txt", TRIPS),
            (
                "stop_times.txt",
                "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
                 t1,10:15:00,10:15:00,1074,2\n\
                 t1,10:00:00,10:00:00,1073,1\n",
            ),
            (
                "calendar_dates.txt",
                "service_id,date,exception_type\ns1,20240301,1\n",
            ),
        ]);
        let mut file_handler = PathFileHandler::new(dir.path().to_path_buf());
        let feed = read_feed(&mut file_handler).unwrap();

        let trip = feed.trips.get("t1").unwrap();
        assert_eq!(None, trip.direction_id);
        let stops: Vec<_> = trip.stop_times.iter().map(|st| st.stop_id.as_str()).collect();
        assert_eq!(vec!["1073", "1074"], stops);
        assert_eq!(Time::new(10, 0, 0), trip.stop_times[0].departure_time);
        assert!(feed.calendars.is_empty());
        assert_eq!(ExceptionType::Add, feed.calendar_dates[0].exception_type);
        assert_eq!(None, feed.routes.get("r1").unwrap().color);
    }

    #[test]
    fn missing_calendars() {
        let dir = write_files(&[
            ("routes.txt", ROUTES),
            ("stops.txt", STOPS),
            ("trips.txt", TRIPS),
            (
                "stop_times.txt",
                "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n",
            ),
        ]);
        let mut file_handler = PathFileHandler::new(dir.path().to_path_buf());
        let err = read_feed(&mut file_handler).unwrap_err();
        assert_eq!(
            "calendar_dates.txt or calendar.txt not found",
            err.to_string()
        );
    }

    #[test]
    fn duplicated_trip_id() {
        let dir = write_files(&[
            ("routes.txt", ROUTES),
            ("stops.txt", STOPS),
            (
                "trips.txt",
                "route_id,service_id,trip_id\nr1,s1,t1\nr1,s1,t1\n",
            ),
            (
                "stop_times.txt",
                "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n",
            ),
            (
                "calendar.txt",
                "service_id,monday,tuesday,wednesday,thursday,friday,saturday,sunday,start_date,end_date\n\
                 s1,1,1,1,1,1,0,0,20240101,20241231\n",
            ),
        ]);
        let mut file_handler = PathFileHandler::new(dir.path().to_path_buf());
        let err = read_feed(&mut file_handler).unwrap_err();
        assert_eq!("Error reading trips.txt", err.to_string());
    }
}
