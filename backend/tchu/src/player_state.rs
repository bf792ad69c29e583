use crate::card::Card;
use crate::route::{Route, ADDITIONAL_TUNNEL_CARDS};
use crate::sorted_bag::SortedBag;
use crate::station_partition::StationPartition;
use crate::ticket::Ticket;

use im::Vector;
use serde::Serialize;
use std::ops::Deref;
use strum::EnumCount;

/// Every player starts the game with 40 cars.
pub const INITIAL_CAR_COUNT: u8 = 40;
/// How many cards each player is dealt when the game starts.
pub const INITIAL_CARDS_COUNT: usize = 4;

/// Information about a player's state that is visible to all players.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PublicPlayerState {
    ticket_count: usize,
    card_count: usize,
    routes: Vector<Route>,
    /// Derived from the claimed routes.
    car_count: u8,
    /// Derived from the claimed routes.
    claim_points: u32,
}

impl PublicPlayerState {
    /// Fails if the routes need more cars than a player has.
    pub fn new(ticket_count: usize, card_count: usize, routes: Vector<Route>) -> Result<Self, String> {
        let used_cars: u32 = routes.iter().map(|route| route.length() as u32).sum();
        if used_cars > INITIAL_CAR_COUNT as u32 {
            return Err(format!(
                "Claimed routes use {} cars, but a player only has {}.",
                used_cars, INITIAL_CAR_COUNT
            ));
        }

        Ok(Self {
            ticket_count,
            card_count,
            car_count: INITIAL_CAR_COUNT - used_cars as u8,
            claim_points: routes.iter().map(|route| route.claim_points()).sum(),
            routes,
        })
    }

    #[inline]
    pub fn ticket_count(&self) -> usize {
        self.ticket_count
    }

    #[inline]
    pub fn card_count(&self) -> usize {
        self.card_count
    }

    /// Claimed routes, in the order they were claimed.
    pub fn routes(&self) -> &Vector<Route> {
        &self.routes
    }

    #[inline]
    pub fn car_count(&self) -> u8 {
        self.car_count
    }

    /// Points earned by claiming routes so far.
    #[inline]
    pub fn claim_points(&self) -> u32 {
        self.claim_points
    }
}

/// The whole state of a player: their tickets and cards on top of the public information.
///
/// Dereferences to its [`PublicPlayerState`], the only part other players may see.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    public: PublicPlayerState,
    tickets: SortedBag<Ticket>,
    cards: SortedBag<Card>,
}

impl PlayerState {
    pub fn new(
        tickets: SortedBag<Ticket>,
        cards: SortedBag<Card>,
        routes: Vector<Route>,
    ) -> Result<Self, String> {
        Ok(Self {
            public: PublicPlayerState::new(tickets.size(), cards.size(), routes)?,
            tickets,
            cards,
        })
    }

    /// The state of a player at the start of the game: no tickets, no routes, and the four dealt cards.
    pub fn initial(initial_cards: SortedBag<Card>) -> Result<Self, String> {
        if initial_cards.size() != INITIAL_CARDS_COUNT {
            return Err(format!(
                "A player starts with {} cards, not {}.",
                INITIAL_CARDS_COUNT,
                initial_cards.size()
            ));
        }

        Self::new(SortedBag::new(), initial_cards, Vector::new())
    }

    /// The public projection of this state.
    pub fn public(&self) -> &PublicPlayerState {
        &self.public
    }

    pub fn tickets(&self) -> &SortedBag<Ticket> {
        &self.tickets
    }

    pub fn cards(&self) -> &SortedBag<Card> {
        &self.cards
    }

    pub fn with_added_tickets(&self, new_tickets: &SortedBag<Ticket>) -> Self {
        let tickets = self.tickets.union(new_tickets);

        Self {
            public: PublicPlayerState {
                ticket_count: tickets.size(),
                ..self.public.clone()
            },
            tickets,
            cards: self.cards.clone(),
        }
    }

    pub fn with_added_card(&self, card: Card) -> Self {
        let cards = self.cards.union(&SortedBag::of(card));

        Self {
            public: PublicPlayerState {
                card_count: cards.size(),
                ..self.public.clone()
            },
            tickets: self.tickets.clone(),
            cards,
        }
    }

    /// Whether this player has enough cars, and the cards, to claim `route`.
    pub fn can_claim_route(&self, route: &Route) -> bool {
        self.car_count() >= route.length()
            && route
                .possible_claim_cards()
                .iter()
                .any(|claim_cards| self.cards.contains(claim_cards))
    }

    /// Every bag of cards from this player's hand that could be played to claim `route`.
    ///
    /// Fails if the player does not have enough cars left.
    pub fn possible_claim_cards(&self, route: &Route) -> Result<Vec<SortedBag<Card>>, String> {
        if self.car_count() < route.length() {
            return Err(format!(
                "Cannot claim a route of length {} with {} cars left.",
                route.length(),
                self.car_count()
            ));
        }

        Ok(route
            .possible_claim_cards()
            .into_iter()
            .filter(|claim_cards| self.cards.contains(claim_cards))
            .collect())
    }

    /// Every bag of `additional_count` cards this player could add to `initial_cards` to claim a tunnel.
    ///
    /// Only cards left in hand once `initial_cards` are played are considered, restricted to locomotives
    /// and to the kinds of cards already played. Options are sorted by increasing number of locomotives.
    ///
    /// Fails if `additional_count` is not between 1 and 3, or if `initial_cards` is empty or made of
    /// more than two kinds of cards.
    pub fn possible_additional_cards(
        &self,
        additional_count: usize,
        initial_cards: &SortedBag<Card>,
    ) -> Result<Vec<SortedBag<Card>>, String> {
        if !(1..=ADDITIONAL_TUNNEL_CARDS).contains(&additional_count) {
            return Err(format!(
                "A tunnel requires between 1 and {} additional cards, not {}.",
                ADDITIONAL_TUNNEL_CARDS, additional_count
            ));
        }

        let kinds = initial_cards.to_set().len();
        if kinds == 0 || kinds > 2 {
            return Err(format!(
                "Initial claim cards must hold one or two kinds of cards, not {}.",
                kinds
            ));
        }

        let usable_cards: SortedBag<Card> = self
            .cards
            .difference(initial_cards)
            .iter()
            .filter(|card| card.is_locomotive() || initial_cards.count_of(card) > 0)
            .copied()
            .collect();

        if additional_count > usable_cards.size() {
            return Ok(Vec::new());
        }

        let mut options = usable_cards.subsets_of_size(additional_count)?;
        options.sort_by_key(|option| option.count_of(&Card::Locomotive));

        Ok(options)
    }

    /// The same player, having claimed `route` with `claim_cards` taken out of their hand.
    pub fn with_claimed_route(
        &self,
        route: &Route,
        claim_cards: &SortedBag<Card>,
    ) -> Result<Self, String> {
        if !self.cards.contains(claim_cards) {
            return Err(format!(
                "Cannot claim the route between {} and {} with cards the player does not hold.",
                route.station1(),
                route.station2()
            ));
        }

        let mut routes = self.routes().clone();
        routes.push_back(*route);

        Self::new(
            self.tickets.clone(),
            self.cards.difference(claim_cards),
            routes,
        )
    }

    /// Points earned (or lost) with tickets, given the routes claimed so far.
    pub fn ticket_points(&self) -> i32 {
        let mut builder = StationPartition::builder(crate::station::Station::COUNT);
        for route in self.routes() {
            builder.connect(route.station1(), route.station2());
        }
        let partition = builder.build();

        self.tickets
            .iter()
            .map(|ticket| ticket.points(&partition))
            .sum()
    }

    /// Claim points plus ticket points.
    pub fn final_points(&self) -> i32 {
        self.claim_points() as i32 + self.ticket_points()
    }
}

impl Deref for PlayerState {
    type Target = PublicPlayerState;

    fn deref(&self) -> &Self::Target {
        &self.public
    }
}
