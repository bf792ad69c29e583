//! The canonical map: every station, route and ticket of a game.
//!
//! The order of routes and tickets is fixed, and is the order used to identify them across processes.

use crate::card::Color::*;
use crate::route::Level::*;
use crate::route::Route;
use crate::sorted_bag::SortedBag;
use crate::station::Station::{self, *};
use crate::ticket::{Ticket, Trip};

use strum::IntoEnumIterator;

// Two routes per pair of stations linked by parallel routes.
const NUM_ROUTES: usize = 100;

/// Convenience macro to generate a route between two stations.
macro_rules! route {
    ($id:literal, $start:ident, $end:ident, $l:literal, $level:ident, $color:expr) => {
        Route {
            id: $id,
            station1: $start,
            station2: $end,
            length: $l,
            level: $level,
            color: $color,
        }
    };
}

/// Convenience macro to generate a ticket leaving from one station towards one or several others.
macro_rules! ticket {
  ($start:ident => $($end:ident: $points:literal),+) => {
    Ticket::from_trips(vec![$(Trip { from: $start, to: $end, points: $points }),+])
  };
}

static ROUTES: [Route; NUM_ROUTES] = [
    // Atlanta.
    route!("ATL_CHA", Atlanta, Charleston, 2, Overground, None),
    route!("ATL_MIA", Atlanta, Miami, 5, Overground, Some(Blue)),
    route!("ATL_NAS", Atlanta, Nashville, 1, Overground, None),
    route!("ATL_NOR_1", Atlanta, NewOrleans, 5, Overground, Some(Orange)),
    route!("ATL_NOR_2", Atlanta, NewOrleans, 5, Overground, Some(Yellow)),
    route!("ATL_RAL_1", Atlanta, Raleigh, 2, Overground, None),
    route!("ATL_RAL_2", Atlanta, Raleigh, 2, Overground, None),
    // Boston.
    route!("BOS_MON_1", Boston, Montreal, 2, Overground, None),
    route!("BOS_MON_2", Boston, Montreal, 2, Overground, None),
    route!("BOS_NYC_1", Boston, NewYork, 2, Overground, Some(Yellow)),
    route!("BOS_NYC_2", Boston, NewYork, 2, Overground, Some(Red)),
    // Calgary.
    route!("CAL_HEL", Calgary, Helena, 4, Underground, None),
    route!("CAL_SEA", Calgary, Seattle, 4, Underground, None),
    route!("CAL_VAN", Calgary, Vancouver, 3, Underground, None),
    route!("CAL_WIN", Calgary, Winnipeg, 6, Overground, Some(White)),
    // Charleston.
    route!("CHA_MIA", Charleston, Miami, 4, Overground, Some(Violet)),
    route!("CHA_RAL", Charleston, Raleigh, 2, Overground, None),
    // Chicago.
    route!("CHI_DUL", Chicago, Duluth, 3, Overground, Some(Red)),
    route!("CHI_OMA", Chicago, Omaha, 4, Overground, Some(Blue)),
    route!("CHI_PIT_1", Chicago, Pittsburgh, 3, Overground, Some(Black)),
    route!("CHI_PIT_2", Chicago, Pittsburgh, 3, Overground, Some(Orange)),
    route!("CHI_STL_1", Chicago, SaintLouis, 2, Overground, Some(Green)),
    route!("CHI_STL_2", Chicago, SaintLouis, 2, Overground, Some(White)),
    route!("CHI_TOR", Chicago, Toronto, 4, Overground, Some(White)),
    // Dallas.
    route!("DAL_ELP", Dallas, ElPaso, 4, Overground, Some(Red)),
    route!("DAL_HOU_1", Dallas, Houston, 1, Overground, None),
    route!("DAL_HOU_2", Dallas, Houston, 1, Overground, None),
    route!("DAL_LIT", Dallas, LittleRock, 2, Overground, None),
    route!("DAL_OKL_1", Dallas, OklahomaCity, 2, Overground, None),
    route!("DAL_OKL_2", Dallas, OklahomaCity, 2, Overground, None),
    // Denver.
    route!("DEN_HEL", Denver, Helena, 4, Underground, Some(Green)),
    route!("DEN_KAN_1", Denver, KansasCity, 4, Overground, Some(Black)),
    route!("DEN_KAN_2", Denver, KansasCity, 4, Overground, Some(Orange)),
    route!("DEN_OKL", Denver, OklahomaCity, 4, Overground, Some(Red)),
    route!("DEN_OMA", Denver, Omaha, 4, Overground, Some(Violet)),
    route!("DEN_PHO", Denver, Phoenix, 5, Overground, Some(White)),
    route!("DEN_SLC_1", Denver, SaltLakeCity, 3, Underground, Some(Red)),
    route!("DEN_SLC_2", Denver, SaltLakeCity, 3, Underground, Some(Yellow)),
    route!("DEN_SFE", Denver, SantaFe, 2, Underground, None),
    // Duluth.
    route!("DUL_HEL", Duluth, Helena, 6, Overground, Some(Orange)),
    route!("DUL_OMA_1", Duluth, Omaha, 2, Overground, None),
    route!("DUL_OMA_2", Duluth, Omaha, 2, Overground, None),
    route!("DUL_SSM", Duluth, SaultStMarie, 3, Overground, None),
    route!("DUL_TOR", Duluth, Toronto, 6, Overground, Some(Violet)),
    route!("DUL_WIN", Duluth, Winnipeg, 4, Overground, Some(Black)),
    // El Paso.
    route!("ELP_HOU", ElPaso, Houston, 6, Overground, Some(Green)),
    route!("ELP_LOS", ElPaso, LosAngeles, 6, Overground, Some(Black)),
    route!("ELP_OKL", ElPaso, OklahomaCity, 5, Overground, Some(Yellow)),
    route!("ELP_PHO", ElPaso, Phoenix, 3, Overground, None),
    route!("ELP_SFE", ElPaso, SantaFe, 2, Overground, None),
    // Helena.
    route!("HEL_OMA", Helena, Omaha, 5, Overground, Some(Red)),
    route!("HEL_SLC", Helena, SaltLakeCity, 3, Underground, Some(Violet)),
    route!("HEL_SEA", Helena, Seattle, 6, Underground, Some(Yellow)),
    route!("HEL_WIN", Helena, Winnipeg, 4, Overground, Some(Blue)),
    // Houston.
    route!("HOU_NOR", Houston, NewOrleans, 2, Overground, None),
    // Kansas City.
    route!("KAN_STL_1", KansasCity, SaintLouis, 2, Overground, Some(Blue)),
    route!("KAN_STL_2", KansasCity, SaintLouis, 2, Overground, Some(Violet)),
    route!("KAN_OKL_1", KansasCity, OklahomaCity, 2, Overground, None),
    route!("KAN_OKL_2", KansasCity, OklahomaCity, 2, Overground, None),
    route!("KAN_OMA_1", KansasCity, Omaha, 1, Overground, None),
    route!("KAN_OMA_2", KansasCity, Omaha, 1, Overground, None),
    // Las Vegas.
    route!("LAS_LOS", LasVegas, LosAngeles, 2, Overground, None),
    route!("LAS_SLC", LasVegas, SaltLakeCity, 3, Underground, Some(Orange)),
    // Little Rock.
    route!("LIT_NAS", LittleRock, Nashville, 3, Overground, Some(White)),
    route!("LIT_NOR", LittleRock, NewOrleans, 3, Overground, None),
    route!("LIT_OKL", LittleRock, OklahomaCity, 2, Overground, None),
    route!("LIT_STL", LittleRock, SaintLouis, 2, Overground, None),
    // Los Angeles.
    route!("LOS_PHO", LosAngeles, Phoenix, 3, Overground, None),
    route!("LOS_SFO_1", LosAngeles, SanFrancisco, 3, Overground, Some(Violet)),
    route!("LOS_SFO_2", LosAngeles, SanFrancisco, 3, Overground, Some(Yellow)),
    // Miami.
    route!("MIA_NOR", Miami, NewOrleans, 6, Overground, Some(Red)),
    // Montréal.
    route!("MON_NYC", Montreal, NewYork, 3, Overground, Some(Blue)),
    route!("MON_SSM", Montreal, SaultStMarie, 5, Overground, Some(Black)),
    route!("MON_TOR", Montreal, Toronto, 3, Overground, None),
    // Nashville.
    route!("NAS_PIT", Nashville, Pittsburgh, 4, Overground, Some(Yellow)),
    route!("NAS_RAL", Nashville, Raleigh, 3, Overground, Some(Black)),
    route!("NAS_STL", Nashville, SaintLouis, 2, Overground, None),
    // New York.
    route!("NYC_PIT_1", NewYork, Pittsburgh, 2, Overground, Some(Green)),
    route!("NYC_PIT_2", NewYork, Pittsburgh, 2, Overground, Some(White)),
    route!("NYC_WAS_1", NewYork, Washington, 2, Overground, Some(Black)),
    route!("NYC_WAS_2", NewYork, Washington, 2, Overground, Some(Orange)),
    // Oklahoma City.
    route!("OKL_SFE", OklahomaCity, SantaFe, 3, Overground, Some(Blue)),
    // Phoenix.
    route!("PHO_SFE", Phoenix, SantaFe, 3, Overground, None),
    // Pittsburgh.
    route!("PIT_RAL", Pittsburgh, Raleigh, 2, Overground, None),
    route!("PIT_STL", Pittsburgh, SaintLouis, 5, Overground, Some(Green)),
    route!("PIT_TOR", Pittsburgh, Toronto, 2, Overground, None),
    route!("PIT_WAS", Pittsburgh, Washington, 2, Overground, None),
    // Portland.
    route!("POR_SLC", Portland, SaltLakeCity, 6, Underground, Some(Blue)),
    route!("POR_SFO_1", Portland, SanFrancisco, 5, Overground, Some(Green)),
    route!("POR_SFO_2", Portland, SanFrancisco, 5, Overground, Some(Violet)),
    // Raleigh.
    route!("RAL_WAS_1", Raleigh, Washington, 2, Overground, None),
    route!("RAL_WAS_2", Raleigh, Washington, 2, Overground, None),
    // Salt Lake City.
    route!("SLC_SFO_1", SaltLakeCity, SanFrancisco, 5, Overground, Some(Orange)),
    route!("SLC_SFO_2", SaltLakeCity, SanFrancisco, 5, Overground, Some(White)),
    // Sault St. Marie.
    route!("SSM_TOR", SaultStMarie, Toronto, 2, Overground, None),
    route!("SSM_WIN", SaultStMarie, Winnipeg, 6, Overground, None),
    // Seattle.
    route!("SEA_POR_1", Seattle, Portland, 1, Overground, None),
    route!("SEA_POR_2", Seattle, Portland, 1, Overground, None),
    route!("SEA_VAN_1", Seattle, Vancouver, 1, Overground, None),
    route!("SEA_VAN_2", Seattle, Vancouver, 1, Overground, None),
];

lazy_static! {
    static ref TICKETS: Vec<Ticket> = vec![
        ticket!(Boston => Miami: 12),
        ticket!(Calgary => Phoenix: 13),
        ticket!(Calgary => SaltLakeCity: 7),
        ticket!(Chicago => NewOrleans: 7),
        ticket!(Chicago => SantaFe: 9),
        ticket!(Dallas => NewYork: 11),
        ticket!(Denver => ElPaso: 4),
        ticket!(Denver => Pittsburgh: 11),
        ticket!(Duluth => ElPaso: 10),
        ticket!(Duluth => Houston: 8),
        ticket!(Helena => LosAngeles: 8),
        ticket!(KansasCity => Houston: 5),
        ticket!(LosAngeles => Chicago: 16),
        ticket!(LosAngeles => Miami: 20),
        ticket!(LosAngeles => NewYork: 21),
        ticket!(Montreal => Atlanta: 9),
        ticket!(Montreal => NewOrleans: 13),
        ticket!(NewYork => Atlanta: 6),
        ticket!(Portland => Nashville: 17),
        ticket!(Portland => Phoenix: 11),
        ticket!(SanFrancisco => Atlanta: 17),
        ticket!(SaultStMarie => Nashville: 8),
        ticket!(SaultStMarie => OklahomaCity: 9),
        ticket!(Seattle => LosAngeles: 9),
        ticket!(Seattle => NewYork: 22),
        ticket!(Toronto => Miami: 10),
        ticket!(Vancouver => Montreal: 20),
        ticket!(Vancouver => SantaFe: 13),
        ticket!(Winnipeg => Houston: 12),
        ticket!(Winnipeg => LittleRock: 11),
        // Coast to coast.
        ticket!(Seattle => Boston: 24, Miami: 26, NewYork: 22),
        ticket!(LosAngeles => Boston: 22, Montreal: 23, NewYork: 21),
        ticket!(Vancouver => Miami: 27, NewYork: 24, Washington: 23),
    ];
}

/// Every station, ordered by id.
pub fn stations() -> Vec<Station> {
    Station::iter().collect()
}

/// Every route, in canonical order.
pub fn routes() -> &'static [Route] {
    &ROUTES
}

/// Every ticket, in canonical order.
pub fn tickets() -> &'static [Ticket] {
    &TICKETS
}

/// Every ticket, as the bag a game starts with.
pub fn all_tickets() -> SortedBag<Ticket> {
    TICKETS.iter().cloned().collect()
}

/// Looks up a route by its id, e.g. `"DEN_SLC_2"`.
pub fn route_by_id(id: &str) -> Option<Route> {
    ROUTES.iter().find(|route| route.id() == id).copied()
}

/// Position of `route` in the canonical order.
pub fn route_index(route: &Route) -> Option<usize> {
    ROUTES.iter().position(|other| other == route)
}

/// Position of `ticket` in the canonical order.
pub fn ticket_index(ticket: &Ticket) -> Option<usize> {
    TICKETS.iter().position(|other| other == ticket)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::route::Level;
    use std::collections::HashSet;
    use strum::EnumCount;

    #[test]
    fn stations_by_id() {
        let stations = stations();

        assert_eq!(stations.len(), Station::COUNT);
        assert_eq!(stations[Station::Omaha.id()], Station::Omaha);
    }

    #[test]
    fn routes_are_valid() {
        for route in routes() {
            assert!(
                Route::new(
                    route.id(),
                    route.station1(),
                    route.station2(),
                    route.length(),
                    route.level(),
                    route.color()
                )
                .is_ok(),
                "Invalid route {}",
                route.id()
            );
        }
    }

    #[test]
    fn route_ids_are_unique() {
        let ids: HashSet<&str> = routes().iter().map(|route| route.id()).collect();

        assert_eq!(ids.len(), NUM_ROUTES);
    }

    #[test]
    fn every_station_is_reachable() {
        let stations: HashSet<Station> = routes()
            .iter()
            .flat_map(|route| route.stations())
            .collect();

        assert_eq!(stations.len(), Station::COUNT);
    }

    #[test]
    fn parallel_routes() {
        let parallel_pairs = routes()
            .iter()
            .enumerate()
            .flat_map(|(index, route)| {
                routes()[index + 1..]
                    .iter()
                    .filter(move |other| route.is_parallel_to(other))
            })
            .count();

        assert_eq!(parallel_pairs, 22);
    }

    #[test]
    fn tunnels_are_in_the_mountains() {
        let tunnels: Vec<&str> = routes()
            .iter()
            .filter(|route| route.level() == Level::Underground)
            .map(|route| route.id())
            .collect();

        assert_eq!(
            tunnels,
            vec![
                "CAL_HEL",
                "CAL_SEA",
                "CAL_VAN",
                "DEN_HEL",
                "DEN_SLC_1",
                "DEN_SLC_2",
                "DEN_SFE",
                "HEL_SLC",
                "HEL_SEA",
                "LAS_SLC",
                "POR_SLC"
            ]
        );
    }

    #[test]
    fn route_lookup() {
        let route = route_by_id("KAN_STL_2").unwrap();

        assert_eq!(route.station1(), Station::KansasCity);
        assert_eq!(route.station2(), Station::SaintLouis);
        assert_eq!(route.color(), Some(crate::card::Color::Violet));
        assert_eq!(route_index(&route), Some(56));
        assert_eq!(routes()[56], route);
        assert_eq!(route_by_id("MIA_SEA"), None);
    }

    #[test]
    fn tickets_are_distinct() {
        assert_eq!(tickets().len(), 33);
        assert_eq!(all_tickets().size(), 33);
        assert_eq!(all_tickets().to_set().len(), 33);
    }

    #[test]
    fn ticket_lookup() {
        let ticket = &tickets()[30];

        assert_eq!(ticket.text(), "Seattle - {Boston (24), Miami (26), New York (22)}");
        assert_eq!(ticket.trips().len(), 3);
        assert_eq!(ticket_index(ticket), Some(30));
    }
}
