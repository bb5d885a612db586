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

use thiserror::Error;

/// A mismatch between the hand-maintained agency tables and the feed.
///
/// None of these are recoverable: the tables must be fixed for the feed
/// version being processed. Records excluded by the active service set are
/// never reported through this type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// `route_short_name` absent from the route registry.
    #[error("unexpected route '{route_id}' with short name '{short_name}'")]
    UnknownRoute {
        /// Raw `route_id`.
        route_id: String,
        /// Raw `route_short_name`.
        short_name: String,
    },
    /// `stop_id` without any digit to build a stop identity from.
    #[error("unexpected stop ID '{0}'")]
    UnrecognizedStopId(String),
    /// Trip whose stops match none of the directions of its route.
    #[error("trip '{trip_id}' of route {route_id} matches no direction (stops {stops:?})")]
    UnmatchedTrip {
        /// Raw `trip_id`.
        trip_id: String,
        /// Canonical route ID.
        route_id: u64,
        /// Stop identities visited by the trip.
        stops: Vec<u32>,
    },
    /// Trip whose stops match both directions of its route.
    #[error("trip '{trip_id}' of route {route_id} matches both directions (stops {stops:?})")]
    AmbiguousTrip {
        /// Raw `trip_id`.
        trip_id: String,
        /// Canonical route ID.
        route_id: u64,
        /// Stop identities visited by the trip.
        stops: Vec<u32>,
    },
    /// Stop visit with no reference position left for it.
    #[error("stop {stop_id} (sequence {sequence}) of trip '{trip_id}' not found in direction {direction} of route {route_id}")]
    UnmatchedStop {
        /// Raw `trip_id`.
        trip_id: String,
        /// `stop_sequence` of the visit.
        sequence: u32,
        /// Stop identity of the visit.
        stop_id: u32,
        /// Canonical route ID.
        route_id: u64,
        /// Direction index the trip was classified in.
        direction: u8,
    },
    /// `direction_id` other than 0 or 1.
    #[error("trip '{trip_id}' has an invalid direction '{direction}'")]
    InvalidDirection {
        /// Raw `trip_id`.
        trip_id: String,
        /// Raw `direction_id`.
        direction: u8,
    },
    /// Both directions of a route share the same reference sequence.
    #[error("both directions of route {0} have the same stops")]
    IdenticalDirections(u64),
    /// Trip of a route without any route trip specification.
    #[error("unexpected trip '{trip_id}' on route {route_id}")]
    UnexpectedTrip {
        /// Raw `trip_id`.
        trip_id: String,
        /// Canonical route ID.
        route_id: u64,
    },
}
