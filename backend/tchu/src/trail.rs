use crate::route::Route;
use crate::station::Station;

use im::Vector;
use serde::Serialize;
use std::fmt;

/// A continuous path through some routes, never passing twice through the same station.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trail {
    routes: Vector<Route>,
    /// Stations in travel order; one more than the routes, or none for the empty trail.
    stations: Vector<Station>,
    length: u32,
}

impl Trail {
    /// The trail going through no route, of length 0.
    pub fn empty() -> Self {
        Self {
            routes: Vector::new(),
            stations: Vector::new(),
            length: 0,
        }
    }

    fn single(route: Route, from: Station, to: Station) -> Self {
        Self {
            routes: im::vector![route],
            stations: im::vector![from, to],
            length: route.length() as u32,
        }
    }

    /// Appends `route` to this trail, if it leaves from the trail's end towards a station not yet visited.
    fn extended_with(&self, route: &Route) -> Option<Self> {
        let end = self.station2()?;
        let next = route.station_opposite(end).ok()?;
        if self.stations.contains(&next) {
            return None;
        }

        let mut extended = self.clone();
        extended.routes.push_back(*route);
        extended.stations.push_back(next);
        extended.length += route.length() as u32;

        Some(extended)
    }

    /// The longest trail that can be built out of `routes`.
    ///
    /// Every route seeds two trails, one per direction, which are then extended with every
    /// usable route until no trail can grow any further. Among trails of equal length, the
    /// first one found wins.
    ///
    /// # Example
    /// ```
    /// use tchu::map;
    /// use tchu::trail::Trail;
    ///
    /// let routes = [
    ///     map::route_by_id("ELP_PHO").unwrap(),
    ///     map::route_by_id("DEN_PHO").unwrap(),
    /// ];
    ///
    /// // El Paso -> Phoenix is of length 3, Phoenix -> Denver is of length 5.
    /// assert_eq!(Trail::longest(&routes).length(), 8);
    /// ```
    pub fn longest(routes: &[Route]) -> Self {
        let mut trails: Vec<Trail> = routes
            .iter()
            .flat_map(|route| {
                [
                    Self::single(*route, route.station1(), route.station2()),
                    Self::single(*route, route.station2(), route.station1()),
                ]
            })
            .collect();
        let mut longest = Self::empty();

        while !trails.is_empty() {
            let mut extended_trails = Vec::new();

            for trail in &trails {
                if trail.length > longest.length {
                    longest = trail.clone();
                }

                extended_trails.extend(
                    routes
                        .iter()
                        .filter_map(|route| trail.extended_with(route)),
                );
            }

            trails = extended_trails;
        }

        longest
    }

    #[inline]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Where the trail starts, `None` for the empty trail.
    pub fn station1(&self) -> Option<Station> {
        self.stations.front().copied()
    }

    /// Where the trail ends, `None` for the empty trail.
    pub fn station2(&self) -> Option<Station> {
        self.stations.back().copied()
    }

    pub fn routes(&self) -> &Vector<Route> {
        &self.routes
    }
}

impl fmt::Display for Trail {
    /// Formats as e.g. `Denver - Phoenix - El Paso (8)`, or `empty (0)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stations.is_empty() {
            return write!(f, "empty (0)");
        }

        let names: Vec<&str> = self.stations.iter().map(|station| station.name()).collect();
        write!(f, "{} ({})", names.join(" - "), self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::route::Level;

    fn route(id: &'static str, station1: Station, station2: Station, length: u8) -> Route {
        Route::new(id, station1, station2, length, Level::Overground, None).unwrap()
    }

    #[test]
    fn longest_of_no_routes() {
        let trail = Trail::longest(&[]);

        assert_eq!(trail.length(), 0);
        assert_eq!(trail.station1(), None);
        assert_eq!(trail.station2(), None);
        assert_eq!(trail.to_string(), "empty (0)");
    }

    #[test]
    fn longest_of_single_route() {
        let trail = Trail::longest(&[route("A", Station::Denver, Station::Omaha, 4)]);

        assert_eq!(trail.length(), 4);
        assert_eq!(trail.station1(), Some(Station::Denver));
        assert_eq!(trail.station2(), Some(Station::Omaha));
        assert_eq!(trail.to_string(), "Denver - Omaha (4)");
    }

    #[test]
    fn longest_of_triangle_cannot_close_cycle() {
        let trail = Trail::longest(&[
            route("A", Station::Dallas, Station::Houston, 1),
            route("B", Station::Houston, Station::NewOrleans, 1),
            route("C", Station::NewOrleans, Station::Dallas, 1),
        ]);

        assert_eq!(trail.length(), 2);
        assert_eq!(trail.routes().len(), 2);
    }

    #[test]
    fn longest_of_triangle_with_tail_visits_each_station_once() {
        let trail = Trail::longest(&[
            route("A", Station::Dallas, Station::Houston, 1),
            route("B", Station::Houston, Station::NewOrleans, 1),
            route("C", Station::NewOrleans, Station::Dallas, 1),
            route("D", Station::Dallas, Station::ElPaso, 4),
        ]);

        assert_eq!(trail.length(), 6);
        assert_eq!(trail.routes().len(), 3);
        assert_eq!(trail.to_string(), "Houston - New Orleans - Dallas - El Paso (6)");
    }

    #[test]
    fn longest_picks_longest_branch() {
        // Helena is a crossroads: the longest trail goes through the two longest branches.
        let trail = Trail::longest(&[
            route("A", Station::Helena, Station::Seattle, 6),
            route("B", Station::Helena, Station::Denver, 4),
            route("C", Station::Helena, Station::Duluth, 6),
            route("D", Station::Denver, Station::SantaFe, 2),
        ]);

        assert_eq!(trail.length(), 12);
        assert_eq!(trail.station1(), Some(Station::Seattle));
        assert_eq!(trail.station2(), Some(Station::Duluth));
        assert_eq!(trail.to_string(), "Seattle - Helena - Duluth (12)");
    }

    #[test]
    fn longest_of_disconnected_routes() {
        let trail = Trail::longest(&[
            route("A", Station::Boston, Station::Montreal, 2),
            route("B", Station::LosAngeles, Station::ElPaso, 6),
            route("C", Station::ElPaso, Station::Dallas, 4),
        ]);

        assert_eq!(trail.length(), 10);
        assert_eq!(trail.to_string(), "Los Angeles - El Paso - Dallas (10)");
    }

    #[test]
    fn parallel_routes_do_not_loop_back() {
        let trail = Trail::longest(&[
            route("A", Station::Seattle, Station::Portland, 1),
            route("B", Station::Portland, Station::Seattle, 1),
        ]);

        assert_eq!(trail.length(), 1);
    }
}
