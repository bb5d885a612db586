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

//! Splitting of the raw trips of a route into two canonical directional trips.
//!
//! Each direction of a route is described by a reference sequence of stop
//! identities. Raw stop visits are matched against it with a cursor that only
//! moves forward, so a stop appearing twice in a reference sequence (a loop
//! through a terminal) is told apart by its position.

use crate::{
    gtfs,
    labels::clean_trip_headsign,
    objects::{Direction, RouteId, Trip, TripStop},
    stop_identity, Error,
};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::convert::TryFrom;

/// The reference path of one direction of a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionSpec {
    /// Headsign of the canonical trip
    pub label: String,
    /// Canonical stop identities, in travel order
    pub stop_ids: Vec<u32>,
}

impl DirectionSpec {
    /// Builds a direction from its headsign and its reference stops.
    pub fn new(label: &str, stop_ids: Vec<u32>) -> Self {
        DirectionSpec {
            label: clean_trip_headsign(label),
            stop_ids,
        }
    }

    /// Position of `stop_id` at or after `cursor`.
    fn find_from(&self, cursor: usize, stop_id: u32) -> Option<usize> {
        self.stop_ids
            .iter()
            .skip(cursor)
            .position(|id| *id == stop_id)
            .map(|offset| cursor + offset)
    }

    /// True if the stops can be matched, in order, against the reference
    /// sequence.
    fn is_compatible(&self, stop_ids: &[u32]) -> bool {
        let mut cursor = 0;
        for stop_id in stop_ids {
            match self.find_from(cursor, *stop_id) {
                Some(position) => cursor = position + 1,
                None => return false,
            }
        }
        true
    }
}

/// A raw stop visit with its position in the reference sequence of the
/// direction its trip was classified in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignedVisit {
    /// Canonical stop identity
    pub stop_id: u32,
    /// Position in the reference sequence
    pub position: usize,
    /// Raw `stop_sequence`
    pub sequence: u32,
}

impl From<AssignedVisit> for TripStop {
    fn from(visit: AssignedVisit) -> Self {
        TripStop {
            stop_id: visit.stop_id,
            position: visit.position,
        }
    }
}

/// The two directions of a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTripSpec {
    route_id: RouteId,
    directions: [DirectionSpec; 2],
}

impl RouteTripSpec {
    /// Builds the specification of `route_id`.
    ///
    /// Both directions may share stops but not their whole sequence.
    pub fn new(
        route_id: RouteId,
        forward: DirectionSpec,
        backward: DirectionSpec,
    ) -> Result<Self, Error> {
        if forward.stop_ids == backward.stop_ids {
            return Err(Error::IdenticalDirections(route_id));
        }
        Ok(RouteTripSpec {
            route_id,
            directions: [forward, backward],
        })
    }

    /// Canonical route identifier
    pub fn route_id(&self) -> RouteId {
        self.route_id
    }

    /// Reference path of `direction`.
    pub fn direction(&self, direction: Direction) -> &DirectionSpec {
        &self.directions[usize::from(direction.index())]
    }

    /// Direction of a raw trip.
    ///
    /// The direction flag of the feed is used when present. Otherwise the
    /// trip goes to the only direction whose reference sequence is compatible
    /// with its whole stop sequence.
    pub fn classify(&self, trip: &gtfs::Trip) -> Result<Direction, Error> {
        if let Some(direction_id) = trip.direction_id {
            return Direction::try_from(direction_id).map_err(|direction| {
                Error::InvalidDirection {
                    trip_id: trip.id.clone(),
                    direction,
                }
            });
        }
        let stops = trip_stop_ids(trip)?;
        let compatible: Vec<Direction> = Direction::ALL
            .iter()
            .copied()
            .filter(|direction| self.direction(*direction).is_compatible(&stops))
            .collect();
        match compatible.as_slice() {
            [direction] => Ok(*direction),
            [] => Err(Error::UnmatchedTrip {
                trip_id: trip.id.clone(),
                route_id: self.route_id,
                stops,
            }),
            _ => Err(Error::AmbiguousTrip {
                trip_id: trip.id.clone(),
                route_id: self.route_id,
                stops,
            }),
        }
    }

    /// Assigns a reference position to every stop visit of `trip`, in the
    /// order of its stop visits.
    ///
    /// Positions are strictly increasing along the trip.
    pub fn split_trip_stops(
        &self,
        trip: &gtfs::Trip,
        direction: Direction,
    ) -> Result<Vec<AssignedVisit>, Error> {
        let spec = self.direction(direction);
        let mut cursor = 0;
        let mut visits = Vec::with_capacity(trip.stop_times.len());
        for stop_time in &trip.stop_times {
            let stop_id = stop_identity::stop_id(&stop_time.stop_id)?;
            let position = spec
                .find_from(cursor, stop_id)
                .ok_or_else(|| Error::UnmatchedStop {
                    trip_id: trip.id.clone(),
                    sequence: stop_time.sequence,
                    stop_id,
                    route_id: self.route_id,
                    direction: direction.index(),
                })?;
            cursor = position + 1;
            visits.push(AssignedVisit {
                stop_id,
                position,
                sequence: stop_time.sequence,
            });
        }
        Ok(visits)
    }

    /// Orders two visits of the route that a time-based sort cannot tell
    /// apart: the smaller reference position comes first.
    ///
    /// Equal positions compare `Equal`, callers rely on a stable sort.
    pub fn compare_early(&self, a: &TripStop, b: &TripStop) -> Ordering {
        a.position.cmp(&b.position)
    }

    /// The two canonical trips of the route, one per direction, made of every
    /// position visited by at least one raw trip.
    pub fn canonical_trips<I>(&self, visits: I) -> [Trip; 2]
    where
        I: IntoIterator<Item = (Direction, AssignedVisit)>,
    {
        let mut trip_stops: [BTreeSet<TripStop>; 2] = Default::default();
        for (direction, visit) in visits {
            trip_stops[usize::from(direction.index())].insert(visit.into());
        }
        let [forward, backward] = trip_stops;
        [
            self.canonical_trip(Direction::Forward, forward),
            self.canonical_trip(Direction::Backward, backward),
        ]
    }

    fn canonical_trip(&self, direction: Direction, stops: BTreeSet<TripStop>) -> Trip {
        let mut stops: Vec<TripStop> = stops.into_iter().collect();
        stops.sort_by_key(|stop| stop.position);
        Trip {
            route_id: self.route_id,
            direction,
            headsign: self.direction(direction).label.clone(),
            stops,
        }
    }
}

fn trip_stop_ids(trip: &gtfs::Trip) -> Result<Vec<u32>, Error> {
    trip.stop_times
        .iter()
        .map(|stop_time| stop_identity::stop_id(&stop_time.stop_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gtfs::StopTime;
    use crate::objects::Time;
    use pretty_assertions::assert_eq;

    fn alderney() -> RouteTripSpec {
        RouteTripSpec::new(
            100_001,
            DirectionSpec::new("Dartmouth", vec![1073, 1074]),
            DirectionSpec::new("Halifax", vec![1074, 1073]),
        )
        .unwrap()
    }

    // Halifax -> Alderney -> Halifax -> Woodside
    fn loop_route() -> RouteTripSpec {
        RouteTripSpec::new(
            42,
            DirectionSpec::new("Woodside", vec![1073, 1074, 1073, 1075]),
            DirectionSpec::new("Halifax", vec![1075, 1073]),
        )
        .unwrap()
    }

    fn trip(id: &str, direction_id: Option<u8>, stops: &[&str]) -> gtfs::Trip {
        let stop_times = stops
            .iter()
            .enumerate()
            .map(|(i, stop_id)| StopTime {
                trip_id: id.to_string(),
                stop_id: stop_id.to_string(),
                sequence: i as u32 + 1,
                arrival_time: Time::new(10, i as u32 * 10, 0),
                departure_time: Time::new(10, i as u32 * 10, 0),
            })
            .collect();
        gtfs::Trip {
            id: id.to_string(),
            route_id: "FerD".to_string(),
            service_id: "s1".to_string(),
            headsign: String::new(),
            direction_id,
            stop_times,
        }
    }

    #[test]
    fn identical_directions() {
        let err = RouteTripSpec::new(
            7,
            DirectionSpec::new("Dartmouth", vec![1073, 1074]),
            DirectionSpec::new("Halifax", vec![1073, 1074]),
        )
        .unwrap_err();
        assert_eq!(Error::IdenticalDirections(7), err);
    }

    #[test]
    fn classify_by_stop_sequence() {
        let spec = alderney();
        let direction = spec.classify(&trip("t1", None, &["1073", "1074"])).unwrap();
        assert_eq!(Direction::Forward, direction);
        let direction = spec.classify(&trip("t2", None, &["1074", "1073"])).unwrap();
        assert_eq!(Direction::Backward, direction);
    }

    #[test]
    fn classify_by_direction_flag() {
        let spec = alderney();
        // the flag wins over the stop sequence
        let direction = spec
            .classify(&trip("t1", Some(1), &["1073", "1074"]))
            .unwrap();
        assert_eq!(Direction::Backward, direction);
    }

    #[test]
    fn invalid_direction_flag() {
        let err = alderney()
            .classify(&trip("t1", Some(2), &["1073", "1074"]))
            .unwrap_err();
        assert_eq!(
            Error::InvalidDirection {
                trip_id: "t1".to_string(),
                direction: 2,
            },
            err
        );
    }

    #[test]
    fn unmatched_trip() {
        let err = alderney()
            .classify(&trip("t1", None, &["1073", "1075"]))
            .unwrap_err();
        assert_eq!(
            Error::UnmatchedTrip {
                trip_id: "t1".to_string(),
                route_id: 100_001,
                stops: vec![1073, 1075],
            },
            err
        );
    }

    #[test]
    fn ambiguous_trip() {
        let err = alderney()
            .classify(&trip("t1", None, &["1073"]))
            .unwrap_err();
        assert_eq!(
            Error::AmbiguousTrip {
                trip_id: "t1".to_string(),
                route_id: 100_001,
                stops: vec![1073],
            },
            err
        );
    }

    #[test]
    fn unrecognized_stop_in_trip() {
        let err = alderney()
            .classify(&trip("t1", None, &["1073", "TERMINAL"]))
            .unwrap_err();
        assert_eq!(Error::UnrecognizedStopId("TERMINAL".to_string()), err);
    }

    #[test]
    fn repeated_stop_is_matched_by_position() {
        let spec = loop_route();
        let trip = trip("t1", None, &["1073", "1074", "1073", "1075"]);
        let direction = spec.classify(&trip).unwrap();
        assert_eq!(Direction::Forward, direction);

        let visits = spec.split_trip_stops(&trip, direction).unwrap();
        let positions: Vec<usize> = visits.iter().map(|v| v.position).collect();
        assert_eq!(vec![0, 1, 2, 3], positions);
        let sequences: Vec<u32> = visits.iter().map(|v| v.sequence).collect();
        assert_eq!(vec![1, 2, 3, 4], sequences);
    }

    #[test]
    fn partial_trip_skips_reference_positions() {
        let spec = loop_route();
        let trip = trip("t1", None, &["1074", "1073"]);
        let visits = spec.split_trip_stops(&trip, Direction::Forward).unwrap();
        let positions: Vec<usize> = visits.iter().map(|v| v.position).collect();
        assert_eq!(vec![1, 2], positions);
    }

    #[test]
    fn positions_never_go_backwards() {
        let spec = loop_route();
        for stops in &[
            vec!["1073", "1075"],
            vec!["1073", "1073", "1075"],
            vec!["1074", "1073", "1075"],
            vec!["1073", "1074", "1073", "1075"],
        ] {
            let trip = trip("t1", None, stops);
            let visits = spec.split_trip_stops(&trip, Direction::Forward).unwrap();
            assert_eq!(stops.len(), visits.len());
            assert!(visits.windows(2).all(|w| w[0].position < w[1].position));
        }
    }

    #[test]
    fn unmatched_stop() {
        let spec = alderney();
        // flagged forward but running backward
        let trip = trip("t1", Some(0), &["1074", "1073"]);
        let err = spec.split_trip_stops(&trip, Direction::Forward).unwrap_err();
        assert_eq!(
            Error::UnmatchedStop {
                trip_id: "t1".to_string(),
                sequence: 2,
                stop_id: 1073,
                route_id: 100_001,
                direction: 0,
            },
            err
        );
    }

    #[test]
    fn earlier_position_sorts_first() {
        let spec = RouteTripSpec::new(
            100_002,
            DirectionSpec::new("Halifax", vec![1073, 1075]),
            DirectionSpec::new("Woodside", vec![1075, 1073]),
        )
        .unwrap();
        let first = TripStop {
            stop_id: 1073,
            position: 0,
        };
        let last = TripStop {
            stop_id: 1073,
            position: 1,
        };
        assert_eq!(Ordering::Less, spec.compare_early(&first, &last));
        assert_eq!(Ordering::Greater, spec.compare_early(&last, &first));
        assert_eq!(Ordering::Equal, spec.compare_early(&first, &first));

        let mut visits = vec![last, first];
        visits.sort_by(|a, b| spec.compare_early(a, b));
        assert_eq!(vec![first, last], visits);
    }

    #[test]
    fn exactly_two_canonical_trips() {
        let spec = loop_route();
        let mut visits = Vec::new();
        for stops in &[vec!["1073", "1075"], vec!["1074", "1073", "1075"]] {
            let trip = trip("t1", None, stops);
            let direction = spec.classify(&trip).unwrap();
            for visit in spec.split_trip_stops(&trip, direction).unwrap() {
                visits.push((direction, visit));
            }
        }

        let [forward, backward] = spec.canonical_trips(visits);

        assert_eq!(4200, forward.id());
        assert_eq!("Woodside", forward.headsign);
        let positions: Vec<usize> = forward.stops.iter().map(|s| s.position).collect();
        assert_eq!(vec![0, 1, 2, 3], positions);
        let stop_ids: Vec<u32> = forward.stops.iter().map(|s| s.stop_id).collect();
        assert_eq!(vec![1073, 1074, 1073, 1075], stop_ids);

        assert_eq!(4201, backward.id());
        assert_eq!("Halifax", backward.headsign);
        assert!(backward.stops.is_empty());
    }
}
