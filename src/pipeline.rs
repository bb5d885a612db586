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

//! Normalization of a raw feed into the canonical objects.

use crate::{
    agency::AgencyTables,
    calendars::useful_service_ids,
    configuration::Configuration,
    gtfs::{self, Feed},
    labels::clean_stop_name,
    objects::{Direction, Route, RouteId, Schedule, Stop, Trip, TripStop},
    route_trip_spec::AssignedVisit,
    routes,
    service_filter::ServiceFilter,
    stop_identity, Error, Result,
};
use anyhow::{anyhow, Context};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Everything produced by a normalization run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Output {
    /// Color of the agency
    pub agency_color: String,
    /// Routes with at least one kept trip, sorted by id
    pub routes: Vec<Route>,
    /// Canonical trips, sorted by id
    pub trips: Vec<Trip>,
    /// Stops visited by the kept trips, sorted by id
    pub stops: Vec<Stop>,
    /// Stop visits of the kept trips
    pub schedules: Vec<Schedule>,
    /// Kept service validity windows
    pub calendars: Vec<gtfs::Calendar>,
    /// Kept service exceptions
    pub calendar_dates: Vec<gtfs::CalendarDate>,
}

/// Normalizes `feed` with the tables of the Halifax Transit ferries.
pub fn transform(feed: Feed, configuration: &Configuration) -> Result<Output> {
    let tables = AgencyTables::halifax_ferries()?;
    transform_with(feed, configuration, &tables)
}

/// Normalizes `feed` with the given agency tables.
///
/// Any mismatch between the tables and the feed aborts the whole run.
pub fn transform_with(
    feed: Feed,
    configuration: &Configuration,
    tables: &AgencyTables,
) -> Result<Output> {
    info!("Normalizing the feed");
    let start = Instant::now();
    let service_ids = useful_service_ids(
        &feed.calendars,
        &feed.calendar_dates,
        &feed.trips,
        configuration.reference_date,
    );
    let filter = ServiceFilter::new(Some(service_ids));
    let mut output = Output {
        agency_color: configuration.agency_color.clone(),
        ..Default::default()
    };
    if filter.is_feed_empty() {
        info!("No active service, nothing to normalize");
        return Ok(output);
    }

    output.calendars = feed
        .calendars
        .iter()
        .filter(|calendar| filter.include_calendar(calendar))
        .cloned()
        .collect();
    output.calendar_dates = feed
        .calendar_dates
        .iter()
        .filter(|calendar_date| filter.include_calendar_date(calendar_date))
        .cloned()
        .collect();

    let route_identities = resolve_routes(&feed, configuration)?;
    let mut visits_by_route: BTreeMap<RouteId, Vec<(Direction, AssignedVisit)>> = BTreeMap::new();
    let mut raw_stop_ids = BTreeSet::new();
    for trip in feed.trips.values().filter(|trip| filter.include_trip(trip)) {
        let route = route_identities.get(trip.route_id.as_str()).ok_or_else(|| {
            anyhow!(
                "trip '{}' references an unknown route '{}'",
                trip.id,
                trip.route_id
            )
        })?;
        if trip.stop_times.is_empty() {
            debug!("trip '{}' ignored, it has no stop time", trip.id);
            continue;
        }
        let spec = tables
            .route_trip_spec(route.id)
            .ok_or_else(|| Error::UnexpectedTrip {
                trip_id: trip.id.clone(),
                route_id: route.id,
            })?;
        let direction = spec.classify(trip)?;
        let visits = spec.split_trip_stops(trip, direction)?;
        for (stop_time, visit) in trip.stop_times.iter().zip(&visits) {
            raw_stop_ids.insert(stop_time.stop_id.as_str());
            output.schedules.push(Schedule {
                service_id: trip.service_id.clone(),
                route_id: route.id,
                direction,
                stop_id: visit.stop_id,
                position: visit.position,
                arrival_time: stop_time.arrival_time,
                departure_time: stop_time.departure_time,
                raw_trip_id: trip.id.clone(),
            });
        }
        visits_by_route
            .entry(route.id)
            .or_default()
            .extend(visits.into_iter().map(|visit| (direction, visit)));
    }

    let mut routes = BTreeMap::new();
    for (route_id, visits) in visits_by_route {
        debug!("route {}: {} stop visits", route_id, visits.len());
        if let Some(spec) = tables.route_trip_spec(route_id) {
            output.trips.extend(spec.canonical_trips(visits).iter().cloned());
        }
        if let Some(route) = route_identities.values().find(|route| route.id == route_id) {
            routes.insert(route_id, route.clone());
        }
    }
    output.routes = routes.into_iter().map(|(_, route)| route).collect();
    output.stops = normalize_stops(&feed, &raw_stop_ids)?;
    output.schedules.sort_by(|a, b| {
        a.stop_id
            .cmp(&b.stop_id)
            .then_with(|| a.service_id.cmp(&b.service_id))
            .then_with(|| a.departure_time.cmp(&b.departure_time))
            .then_with(|| {
                if a.route_id == b.route_id {
                    tables.compare_early(a.route_id, &trip_stop(a), &trip_stop(b))
                } else {
                    std::cmp::Ordering::Equal
                }
            })
    });
    info!(
        "{} routes, {} trips, {} stops and {} schedules normalized in {:?}",
        output.routes.len(),
        output.trips.len(),
        output.stops.len(),
        output.schedules.len(),
        start.elapsed()
    );
    Ok(output)
}

fn trip_stop(schedule: &Schedule) -> TripStop {
    TripStop {
        stop_id: schedule.stop_id,
        position: schedule.position,
    }
}

/// Canonical routes, by raw `route_id`.
fn resolve_routes<'a>(
    feed: &'a Feed,
    configuration: &Configuration,
) -> Result<BTreeMap<&'a str, Route>> {
    let mut route_identities = BTreeMap::new();
    for raw_route in feed.routes.values() {
        let identity = routes::resolve(raw_route)?;
        let route = Route {
            id: identity.id,
            short_name: identity.short_name.to_string(),
            long_name: identity.long_name.to_string(),
            color: routes::route_color(raw_route, &configuration.default_route_color),
        };
        route_identities.insert(raw_route.id.as_str(), route);
    }
    Ok(route_identities)
}

/// Canonical stops of the given raw `stop_id`s.
///
/// When two raw stops share an identity, the first one in raw `stop_id`
/// order is kept.
fn normalize_stops(feed: &Feed, raw_stop_ids: &BTreeSet<&str>) -> Result<Vec<Stop>> {
    let mut stops: BTreeMap<u32, Stop> = BTreeMap::new();
    for raw_stop_id in raw_stop_ids {
        let raw_stop = feed
            .stops
            .get(raw_stop_id)
            .ok_or_else(|| anyhow!("stop '{}' not found in stops.txt", raw_stop_id))?;
        let identity = stop_identity::normalize(raw_stop_id)
            .with_context(|| format!("Error normalizing stop '{}'", raw_stop_id))?;
        if let Some(stop) = stops.get(&identity.id) {
            warn!(
                "stop '{}' ignored, its identity {} is already used by '{}'",
                raw_stop_id, identity.id, stop.name
            );
            continue;
        }
        stops.insert(
            identity.id,
            Stop {
                id: identity.id,
                code: identity.code,
                name: clean_stop_name(&raw_stop.name),
            },
        );
    }
    Ok(stops.into_iter().map(|(_, stop)| stop).collect())
}
