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

//! Build a [`Feed`] in a few lines, mostly for tests.

use crate::gtfs::{Calendar, CalendarDate, ExceptionType, Feed, Route, Stop, StopTime, Trip};
use crate::objects::{Date, Time};
use crate::AGENCY_ROUTE_TYPE;
use std::collections::BTreeSet;
use typed_index_collection::CollectionWithId;

/// Service of the trips built without any service.
pub const DEFAULT_SERVICE: &str = "default_service";

/// Builder of a raw feed
#[derive(Default)]
pub struct FeedBuilder {
    routes: Vec<Route>,
    trips: Vec<Trip>,
    stops: Vec<Stop>,
    calendars: Vec<Calendar>,
    calendar_dates: Vec<CalendarDate>,
}

/// Builder of a raw trip, created by [`FeedBuilder::trip`]
pub struct TripBuilder<'a> {
    trip: &'a mut Trip,
    stops: &'a mut Vec<Stop>,
}

impl FeedBuilder {
    /// Add a new Trip to the feed
    ///
    /// ```
    /// # fn main() {
    /// let feed = ferry_model::feed_builder::FeedBuilder::default()
    ///     .trip("t1", |trip| {
    ///         trip.route("FerD")
    ///             .st("1073", "10:00:00", "10:00:00")
    ///             .st("1074", "10:12:00", "10:12:00");
    ///     })
    ///     .build();
    /// assert_eq!(2, feed.trips.get("t1").unwrap().stop_times.len());
    /// # }
    /// ```
    pub fn trip<F>(mut self, id: &str, mut trip_initer: F) -> Self
    where
        F: FnMut(TripBuilder),
    {
        assert!(
            self.trips.iter().all(|trip| trip.id != id),
            "trip {} already exists",
            id
        );
        self.trips.push(Trip {
            id: id.to_string(),
            service_id: DEFAULT_SERVICE.to_string(),
            ..Default::default()
        });
        let FeedBuilder { trips, stops, .. } = &mut self;
        if let Some(trip) = trips.last_mut() {
            trip_initer(TripBuilder { trip, stops });
        }
        self
    }

    /// Add a new Route to the feed, its short name being its id
    pub fn route<F>(mut self, id: &str, mut route_initer: F) -> Self
    where
        F: FnMut(&mut Route),
    {
        let mut route = default_route(id);
        route_initer(&mut route);
        self.routes.push(route);
        self
    }

    /// Add a new Stop to the feed, its name being its id
    pub fn stop<F>(mut self, id: &str, mut stop_initer: F) -> Self
    where
        F: FnMut(&mut Stop),
    {
        let stop = match self.stops.iter().position(|stop| stop.id == id) {
            Some(position) => &mut self.stops[position],
            None => {
                self.stops.push(default_stop(id));
                let last = self.stops.len() - 1;
                &mut self.stops[last]
            }
        };
        stop_initer(stop);
        self
    }

    /// Add a new Calendar to the feed, running every day of 2024
    pub fn calendar<F>(mut self, service_id: &str, mut calendar_initer: F) -> Self
    where
        F: FnMut(&mut Calendar),
    {
        let mut calendar = default_calendar(service_id);
        calendar_initer(&mut calendar);
        self.calendars.push(calendar);
        self
    }

    /// Add a calendar exception to the feed
    pub fn calendar_date(
        mut self,
        service_id: &str,
        date: Date,
        exception_type: ExceptionType,
    ) -> Self {
        self.calendar_dates.push(CalendarDate {
            service_id: service_id.to_string(),
            date,
            exception_type,
        });
        self
    }

    /// Consume the builder to create a feed.
    ///
    /// Routes referenced by trips are created when missing, and so are
    /// calendars of services without calendar nor exception.
    pub fn build(mut self) -> Feed {
        let route_ids: BTreeSet<String> = self.trips.iter().map(|t| t.route_id.clone()).collect();
        for route_id in route_ids {
            if self.routes.iter().all(|route| route.id != route_id) {
                self.routes.push(default_route(&route_id));
            }
        }
        let service_ids: BTreeSet<String> =
            self.trips.iter().map(|t| t.service_id.clone()).collect();
        for service_id in service_ids {
            let has_calendar = self.calendars.iter().any(|c| c.service_id == service_id);
            let has_exception = self
                .calendar_dates
                .iter()
                .any(|cd| cd.service_id == service_id);
            if !has_calendar && !has_exception {
                self.calendars.push(default_calendar(&service_id));
            }
        }
        Feed {
            routes: CollectionWithId::new(self.routes).unwrap(),
            trips: CollectionWithId::new(self.trips).unwrap(),
            stops: CollectionWithId::new(self.stops).unwrap(),
            calendars: self.calendars,
            calendar_dates: self.calendar_dates,
        }
    }
}

/// Conversion into a [`Time`], `&str` being parsed
pub trait IntoTime {
    /// Convert into a `Time`
    fn into_time(self) -> Time;
}

impl IntoTime for Time {
    fn into_time(self) -> Time {
        self
    }
}

impl IntoTime for &str {
    // Note: if the string is not in the right format, this conversion will fail
    fn into_time(self) -> Time {
        self.parse().unwrap()
    }
}

impl<'a> TripBuilder<'a> {
    /// Add a stop visit to the trip, creating the stop if needed
    pub fn st(self, stop_id: &str, arrival: impl IntoTime, departure: impl IntoTime) -> Self {
        if self.stops.iter().all(|stop| stop.id != stop_id) {
            self.stops.push(default_stop(stop_id));
        }
        let sequence = self.trip.stop_times.len() as u32 + 1;
        self.trip.stop_times.push(StopTime {
            trip_id: self.trip.id.clone(),
            stop_id: stop_id.to_string(),
            sequence,
            arrival_time: arrival.into_time(),
            departure_time: departure.into_time(),
        });
        self
    }

    /// Set the raw route of the trip
    pub fn route(self, id: &str) -> Self {
        self.trip.route_id = id.to_string();
        self
    }

    /// Set the service of the trip
    pub fn service(self, id: &str) -> Self {
        self.trip.service_id = id.to_string();
        self
    }

    /// Set the direction flag of the trip
    pub fn direction(self, direction_id: u8) -> Self {
        self.trip.direction_id = Some(direction_id);
        self
    }

    /// Set the raw headsign of the trip
    pub fn headsign(self, headsign: &str) -> Self {
        self.trip.headsign = headsign.to_string();
        self
    }
}

fn default_route(id: &str) -> Route {
    Route {
        id: id.to_string(),
        short_name: id.to_string(),
        route_type: AGENCY_ROUTE_TYPE,
        ..Default::default()
    }
}

fn default_stop(id: &str) -> Stop {
    Stop {
        id: id.to_string(),
        name: id.to_string(),
        ..Default::default()
    }
}

fn default_calendar(service_id: &str) -> Calendar {
    Calendar {
        service_id: service_id.to_string(),
        monday: true,
        tuesday: true,
        wednesday: true,
        thursday: true,
        friday: true,
        saturday: true,
        sunday: true,
        start_date: Date::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: Date::from_ymd_opt(2024, 12, 31).unwrap(),
    }
}
