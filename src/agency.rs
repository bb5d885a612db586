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

//! The hand-maintained tables of the Halifax Transit ferries.

use crate::{
    objects::{RouteId, TripStop},
    route_trip_spec::{DirectionSpec, RouteTripSpec},
    routes::{RID_ALD, RID_WS},
    stop_identity, Error,
};
use std::cmp::Ordering;
use std::collections::BTreeMap;

const DARTMOUTH: &str = "Dartmouth";
const HALIFAX: &str = "Halifax";
const WOODSIDE: &str = "Woodside";

/// Route trip specifications of the agency, by canonical route.
#[derive(Debug, Clone, Default)]
pub struct AgencyTables {
    route_trip_specs: BTreeMap<RouteId, RouteTripSpec>,
}

impl AgencyTables {
    /// Builds the tables from route trip specifications.
    pub fn new<I>(route_trip_specs: I) -> Self
    where
        I: IntoIterator<Item = RouteTripSpec>,
    {
        let route_trip_specs = route_trip_specs
            .into_iter()
            .map(|spec| (spec.route_id(), spec))
            .collect();
        AgencyTables { route_trip_specs }
    }

    /// The tables of the Halifax Transit ferries.
    pub fn halifax_ferries() -> Result<Self, Error> {
        let alderney = RouteTripSpec::new(
            RID_ALD,
            direction(DARTMOUTH, &["1073", "1074"])?,
            direction(HALIFAX, &["1074", "1073"])?,
        )?;
        let woodside = RouteTripSpec::new(
            RID_WS,
            direction(HALIFAX, &["1075", "1073"])?,
            direction(WOODSIDE, &["1073", "1075"])?,
        )?;
        Ok(AgencyTables::new(vec![alderney, woodside]))
    }

    /// Route trip specification of a route, if any.
    pub fn route_trip_spec(&self, route_id: RouteId) -> Option<&RouteTripSpec> {
        self.route_trip_specs.get(&route_id)
    }

    /// Orders two visits of `route_id` which share a stop and a time.
    ///
    /// Routes without specification keep the time-based order.
    pub fn compare_early(&self, route_id: RouteId, a: &TripStop, b: &TripStop) -> Ordering {
        self.route_trip_spec(route_id)
            .map(|spec| spec.compare_early(a, b))
            .unwrap_or(Ordering::Equal)
    }
}

fn direction(label: &str, raw_stop_ids: &[&str]) -> Result<DirectionSpec, Error> {
    let stop_ids = raw_stop_ids
        .iter()
        .map(|raw_stop_id| stop_identity::stop_id(raw_stop_id))
        .collect::<Result<_, _>>()?;
    Ok(DirectionSpec::new(label, stop_ids))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::Direction;
    use pretty_assertions::assert_eq;

    #[test]
    fn alderney_directions() {
        let tables = AgencyTables::halifax_ferries().unwrap();
        let spec = tables.route_trip_spec(100_001).unwrap();
        let forward = spec.direction(Direction::Forward);
        assert_eq!("Dartmouth", forward.label);
        assert_eq!(vec![1073, 1074], forward.stop_ids);
        let backward = spec.direction(Direction::Backward);
        assert_eq!("Halifax", backward.label);
        assert_eq!(vec![1074, 1073], backward.stop_ids);
    }

    #[test]
    fn woodside_directions() {
        let tables = AgencyTables::halifax_ferries().unwrap();
        let spec = tables.route_trip_spec(100_002).unwrap();
        assert_eq!("Halifax", spec.direction(Direction::Forward).label);
        assert_eq!(vec![1075, 1073], spec.direction(Direction::Forward).stop_ids);
        assert_eq!("Woodside", spec.direction(Direction::Backward).label);
    }

    #[test]
    fn compare_early_without_specification() {
        let tables = AgencyTables::halifax_ferries().unwrap();
        let a = TripStop {
            stop_id: 1073,
            position: 0,
        };
        let b = TripStop {
            stop_id: 1073,
            position: 1,
        };
        assert_eq!(Ordering::Less, tables.compare_early(100_001, &a, &b));
        assert_eq!(Ordering::Equal, tables.compare_early(999, &a, &b));
    }
}
