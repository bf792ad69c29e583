use crate::card::{Card, Color};
use crate::sorted_bag::SortedBag;
use crate::station::Station;

use serde::Serialize;
use strum::IntoEnumIterator;

/// Shortest possible route.
pub const MIN_ROUTE_LENGTH: u8 = 1;
/// Longest possible route.
pub const MAX_ROUTE_LENGTH: u8 = 6;
/// How many cards are drawn from the deck when attempting to claim a tunnel.
pub const ADDITIONAL_TUNNEL_CARDS: usize = 3;

// Claim points, indexed by route length.
const ROUTE_CLAIM_POINTS: [u32; MAX_ROUTE_LENGTH as usize + 1] = [0, 1, 2, 4, 7, 10, 15];

/// Whether a route runs on the surface, or through a tunnel.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Overground,
    /// Tunnels may require additional cards once the claim is attempted.
    Underground,
}

/// A route connecting two adjacent stations.
///
/// When two stations are linked by two "parallel" routes, each of them is a distinct [`Route`]
/// with its own id.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Route {
    pub(crate) id: &'static str,
    pub(crate) station1: Station,
    pub(crate) station2: Station,
    pub(crate) length: u8,
    pub(crate) level: Level,
    /// `None` means that cards of any color may claim this route.
    pub(crate) color: Option<Color>,
}

impl Route {
    /// Builds a route, checking that its stations differ and that its length is within bounds.
    ///
    /// # Example
    /// ```
    /// use tchu::route::{Level, Route};
    /// use tchu::station::Station;
    ///
    /// let route = Route::new("DEN_OMA", Station::Denver, Station::Omaha, 4, Level::Overground, None);
    /// assert!(route.is_ok());
    ///
    /// let loop_route = Route::new("DEN_DEN", Station::Denver, Station::Denver, 4, Level::Overground, None);
    /// assert!(loop_route.is_err());
    /// ```
    pub fn new(
        id: &'static str,
        station1: Station,
        station2: Station,
        length: u8,
        level: Level,
        color: Option<Color>,
    ) -> Result<Self, String> {
        if station1 == station2 {
            return Err(format!(
                "A route cannot start and end at the same station ({}).",
                station1
            ));
        }

        if !(MIN_ROUTE_LENGTH..=MAX_ROUTE_LENGTH).contains(&length) {
            return Err(format!(
                "A route must have a length between {} and {}, got {}.",
                MIN_ROUTE_LENGTH, MAX_ROUTE_LENGTH, length
            ));
        }

        Ok(Self {
            id,
            station1,
            station2,
            length,
            level,
            color,
        })
    }

    #[inline]
    pub fn id(&self) -> &'static str {
        self.id
    }

    #[inline]
    pub fn station1(&self) -> Station {
        self.station1
    }

    #[inline]
    pub fn station2(&self) -> Station {
        self.station2
    }

    #[inline]
    pub fn length(&self) -> u8 {
        self.length
    }

    #[inline]
    pub fn level(&self) -> Level {
        self.level
    }

    #[inline]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Both stations, in the route's own order.
    pub fn stations(&self) -> [Station; 2] {
        [self.station1, self.station2]
    }

    /// The station at the other end of the route.
    ///
    /// Fails if `station` is not one of the route's stations.
    pub fn station_opposite(&self, station: Station) -> Result<Station, String> {
        if station == self.station1 {
            Ok(self.station2)
        } else if station == self.station2 {
            Ok(self.station1)
        } else {
            Err(format!(
                "{} is not an end of the route between {} and {}.",
                station, self.station1, self.station2
            ))
        }
    }

    /// Whether both routes connect the same two stations, in either order.
    pub fn is_parallel_to(&self, other: &Route) -> bool {
        (self.station1 == other.station1 && self.station2 == other.station2)
            || (self.station1 == other.station2 && self.station2 == other.station1)
    }

    /// Every bag of cards that could be played to claim this route.
    ///
    /// A surface route accepts one bag per matching color, each with as many cards as the route is long.
    /// A tunnel additionally accepts bags mixing locomotives in, ordered by increasing number of
    /// locomotives, and finally a bag made only of locomotives.
    pub fn possible_claim_cards(&self) -> Vec<SortedBag<Card>> {
        let colors: Vec<Color> = match self.color {
            Some(color) => vec![color],
            None => Color::iter().collect(),
        };
        let length = self.length as usize;
        let max_locomotives = match self.level {
            Level::Overground => 0,
            Level::Underground => length - 1,
        };

        let mut claim_cards = Vec::new();
        for locomotives in 0..=max_locomotives {
            for color in &colors {
                claim_cards.push(SortedBag::of_pair(
                    length - locomotives,
                    Card::of(*color),
                    locomotives,
                    Card::Locomotive,
                ));
            }
        }

        if self.level == Level::Underground {
            claim_cards.push(SortedBag::of_n(length, Card::Locomotive));
        }

        claim_cards
    }

    /// Number of additional cards to play when claiming this tunnel with `claim_cards`,
    /// given the three cards `drawn_cards` from the top of the deck.
    ///
    /// Every drawn locomotive counts, as does every drawn card whose kind was played in `claim_cards`.
    ///
    /// # Example
    /// ```
    /// use tchu::card::Card;
    /// use tchu::map;
    /// use tchu::sorted_bag::SortedBag;
    ///
    /// let tunnel = map::route_by_id("DEN_SFE").unwrap();
    /// let claim_cards = SortedBag::of_n(2, Card::Red);
    /// let drawn_cards = SortedBag::of_pair(1, Card::Red, 1, Card::Locomotive)
    ///     .union(&SortedBag::of(Card::Blue));
    ///
    /// assert_eq!(tunnel.additional_claim_cards_count(&claim_cards, &drawn_cards), Ok(2));
    /// ```
    pub fn additional_claim_cards_count(
        &self,
        claim_cards: &SortedBag<Card>,
        drawn_cards: &SortedBag<Card>,
    ) -> Result<usize, String> {
        if self.level != Level::Underground {
            return Err(format!(
                "The route between {} and {} is not a tunnel.",
                self.station1, self.station2
            ));
        }

        if drawn_cards.size() != ADDITIONAL_TUNNEL_CARDS {
            return Err(format!(
                "Expected {} drawn cards, got {}.",
                ADDITIONAL_TUNNEL_CARDS,
                drawn_cards.size()
            ));
        }

        Ok(drawn_cards
            .iter()
            .filter(|card| card.is_locomotive() || claim_cards.count_of(card) > 0)
            .count())
    }

    /// Points earned when claiming this route.
    #[inline]
    pub fn claim_points(&self) -> u32 {
        ROUTE_CLAIM_POINTS[self.length as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(length: u8, level: Level, color: Option<Color>) -> Route {
        Route::new("TEST", Station::Denver, Station::Omaha, length, level, color).unwrap()
    }

    #[test]
    fn new_route_length_out_of_bounds() {
        for length in [0, 7] {
            assert!(Route::new(
                "TEST",
                Station::Denver,
                Station::Omaha,
                length,
                Level::Overground,
                None
            )
            .is_err());
        }
    }

    #[test]
    fn station_opposite() {
        let route = route(3, Level::Overground, None);

        assert_eq!(route.station_opposite(Station::Denver), Ok(Station::Omaha));
        assert_eq!(route.station_opposite(Station::Omaha), Ok(Station::Denver));
        assert_eq!(
            route.station_opposite(Station::Miami),
            Err(String::from(
                "Miami is not an end of the route between Denver and Omaha."
            ))
        );
    }

    #[test]
    fn parallel_routes() {
        let reversed =
            Route::new("TEST", Station::Omaha, Station::Denver, 2, Level::Overground, None)
                .unwrap();
        let other =
            Route::new("TEST", Station::Omaha, Station::Duluth, 2, Level::Overground, None)
                .unwrap();

        assert!(route(4, Level::Overground, None).is_parallel_to(&reversed));
        assert!(!route(4, Level::Overground, None).is_parallel_to(&other));
    }

    #[test]
    fn possible_claim_cards_colored_surface_route() {
        let route = route(3, Level::Overground, Some(Color::Red));

        assert_eq!(
            route.possible_claim_cards(),
            vec![SortedBag::of_n(3, Card::Red)]
        );
    }

    #[test]
    fn possible_claim_cards_colorless_surface_route() {
        let claim_cards = route(2, Level::Overground, None).possible_claim_cards();
        let expected: Vec<_> = Color::iter()
            .map(|color| SortedBag::of_n(2, Card::of(color)))
            .collect();

        assert_eq!(claim_cards, expected);
    }

    #[test]
    fn possible_claim_cards_colored_tunnel() {
        let route = route(2, Level::Underground, Some(Color::Green));

        assert_eq!(
            route.possible_claim_cards(),
            vec![
                SortedBag::of_n(2, Card::Green),
                SortedBag::of_pair(1, Card::Green, 1, Card::Locomotive),
                SortedBag::of_n(2, Card::Locomotive),
            ]
        );
    }

    #[test]
    fn possible_claim_cards_colorless_tunnel() {
        let claim_cards = route(3, Level::Underground, None).possible_claim_cards();

        // 3 ways to mix locomotives in, for each of the 8 colors, plus only locomotives.
        assert_eq!(claim_cards.len(), 3 * 8 + 1);
        assert_eq!(claim_cards[0], SortedBag::of_n(3, Card::Black));
        assert_eq!(
            claim_cards[8],
            SortedBag::of_pair(2, Card::Black, 1, Card::Locomotive)
        );
        assert_eq!(claim_cards[24], SortedBag::of_n(3, Card::Locomotive));
        assert!(claim_cards.iter().all(|cards| cards.size() == 3));
    }

    #[test]
    fn additional_claim_cards_count() {
        let tunnel = route(2, Level::Underground, None);
        let claim_cards = SortedBag::of_n(2, Card::Red);
        let drawn_cards: SortedBag<Card> = [Card::Red, Card::Locomotive, Card::Blue]
            .iter()
            .copied()
            .collect();

        assert_eq!(
            tunnel.additional_claim_cards_count(&claim_cards, &drawn_cards),
            Ok(2)
        );
    }

    #[test]
    fn additional_claim_cards_count_with_locomotives_only() {
        let tunnel = route(2, Level::Underground, None);
        let claim_cards = SortedBag::of_n(2, Card::Locomotive);
        let drawn_cards: SortedBag<Card> = [Card::Red, Card::Locomotive, Card::Red]
            .iter()
            .copied()
            .collect();

        assert_eq!(
            tunnel.additional_claim_cards_count(&claim_cards, &drawn_cards),
            Ok(1)
        );
    }

    #[test]
    fn additional_claim_cards_count_preconditions() {
        let claim_cards = SortedBag::of_n(2, Card::Red);
        let drawn_cards = SortedBag::of_n(3, Card::Red);

        assert!(route(2, Level::Overground, None)
            .additional_claim_cards_count(&claim_cards, &drawn_cards)
            .is_err());
        assert!(route(2, Level::Underground, None)
            .additional_claim_cards_count(&claim_cards, &SortedBag::of_n(2, Card::Red))
            .is_err());
    }

    #[test]
    fn claim_points() {
        let points: Vec<u32> = (MIN_ROUTE_LENGTH..=MAX_ROUTE_LENGTH)
            .map(|length| route(length, Level::Overground, None).claim_points())
            .collect();

        assert_eq!(points, vec![1, 2, 4, 7, 10, 15]);
    }

    #[test]
    fn route_to_json() -> serde_json::Result<()> {
        let route = route(2, Level::Underground, Some(Color::Blue));

        assert_eq!(
            serde_json::to_string(&route)?,
            r#"{"id":"TEST","station1":6,"station2":21,"length":2,"level":"underground","color":2}"#
        );
        Ok(())
    }
}
