use crate::card::Card;
use crate::card_state::{CardState, PublicCardState};
use crate::deck::Deck;
use crate::player::PlayerId;
use crate::player_state::{PlayerState, PublicPlayerState, INITIAL_CARDS_COUNT};
use crate::route::Route;
use crate::sorted_bag::SortedBag;
use crate::ticket::Ticket;

use rand::Rng;
use serde::Serialize;
use std::ops::Deref;
#[allow(unused_imports)]
use strum::EnumCount;

/// How many tickets each player picks from at the start of the game.
pub const INITIAL_TICKETS_COUNT: usize = 5;
/// How many tickets are revealed when drawing tickets during the game.
pub const IN_GAME_TICKETS_COUNT: usize = 3;
/// The last turn begins once a player has this many cars left, or fewer.
pub const LAST_TURN_CAR_COUNT: u8 = 2;
/// Cards needed in the deck and the discards together for a player to draw cards.
pub const MIN_CARDS_TO_DRAW: usize = 5;

/// Information about the game that is visible to all players.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PublicGameState {
    tickets_count: usize,
    card_state: PublicCardState,
    current_player_id: PlayerId,
    player_states: [PublicPlayerState; PlayerId::COUNT],
    /// Set once the last turn has begun.
    last_player: Option<PlayerId>,
}

impl PublicGameState {
    pub fn new(
        tickets_count: usize,
        card_state: PublicCardState,
        current_player_id: PlayerId,
        player_states: [PublicPlayerState; PlayerId::COUNT],
        last_player: Option<PlayerId>,
    ) -> Self {
        Self {
            tickets_count,
            card_state,
            current_player_id,
            player_states,
            last_player,
        }
    }

    #[inline]
    pub fn tickets_count(&self) -> usize {
        self.tickets_count
    }

    #[inline]
    pub fn can_draw_tickets(&self) -> bool {
        self.tickets_count > 0
    }

    pub fn card_state(&self) -> &PublicCardState {
        &self.card_state
    }

    /// Whether there are enough cards left, in the deck and the discards, to draw some.
    pub fn can_draw_cards(&self) -> bool {
        self.card_state.deck_size() + self.card_state.discards_size() >= MIN_CARDS_TO_DRAW
    }

    #[inline]
    pub fn current_player_id(&self) -> PlayerId {
        self.current_player_id
    }

    pub fn player_state(&self, player_id: PlayerId) -> &PublicPlayerState {
        &self.player_states[player_id.index()]
    }

    pub fn current_player_state(&self) -> &PublicPlayerState {
        self.player_state(self.current_player_id)
    }

    /// Every route claimed so far, by either player.
    pub fn claimed_routes(&self) -> Vec<Route> {
        self.player_states
            .iter()
            .flat_map(|player_state| player_state.routes().iter().copied())
            .collect()
    }

    /// Whether nobody has claimed `route` nor the route running alongside it.
    pub fn is_route_claimable(&self, route: &Route) -> bool {
        !self
            .claimed_routes()
            .iter()
            .any(|claimed| claimed.is_parallel_to(route))
    }

    #[inline]
    pub fn last_player(&self) -> Option<PlayerId> {
        self.last_player
    }
}

/// The whole state of a game, including the hidden decks and each player's hand.
///
/// Every transition returns a new state, sharing what did not change with the previous one.
/// Dereferences to its [`PublicGameState`].
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    public: PublicGameState,
    tickets: Deck<Ticket>,
    card_state: CardState,
    player_states: [PlayerState; PlayerId::COUNT],
}

impl GameState {
    /// Shuffles `tickets` and the cards, deals four cards to each player, and picks who plays first.
    pub fn initial<R: Rng + ?Sized>(tickets: &SortedBag<Ticket>, rng: &mut R) -> Result<Self, String> {
        let tickets = Deck::of(tickets, rng);
        let cards = Deck::of(&Card::all(), rng);

        let first_hand = cards.top_cards(INITIAL_CARDS_COUNT)?;
        let cards = cards.without_top_cards(INITIAL_CARDS_COUNT)?;
        let second_hand = cards.top_cards(INITIAL_CARDS_COUNT)?;
        let cards = cards.without_top_cards(INITIAL_CARDS_COUNT)?;

        let current_player_id = PlayerId::ALL[rng.gen_range(0..PlayerId::COUNT)];

        Ok(Self::assemble(
            tickets,
            CardState::of(&cards)?,
            current_player_id,
            [
                PlayerState::initial(first_hand)?,
                PlayerState::initial(second_hand)?,
            ],
            None,
        ))
    }

    fn assemble(
        tickets: Deck<Ticket>,
        card_state: CardState,
        current_player_id: PlayerId,
        player_states: [PlayerState; PlayerId::COUNT],
        last_player: Option<PlayerId>,
    ) -> Self {
        Self {
            public: PublicGameState::new(
                tickets.size(),
                card_state.public().clone(),
                current_player_id,
                [
                    player_states[0].public().clone(),
                    player_states[1].public().clone(),
                ],
                last_player,
            ),
            tickets,
            card_state,
            player_states,
        }
    }

    fn with_player_state(&self, player_id: PlayerId, player_state: PlayerState) -> Self {
        let mut player_states = self.player_states.clone();
        player_states[player_id.index()] = player_state;

        Self::assemble(
            self.tickets.clone(),
            self.card_state.clone(),
            self.current_player_id(),
            player_states,
            self.last_player(),
        )
    }

    /// The public projection of this state.
    pub fn public(&self) -> &PublicGameState {
        &self.public
    }

    /// The full state of a player, hand and tickets included.
    pub fn player_state(&self, player_id: PlayerId) -> &PlayerState {
        &self.player_states[player_id.index()]
    }

    pub fn current_player_state(&self) -> &PlayerState {
        self.player_state(self.current_player_id())
    }

    /// The `count` tickets on top of the ticket deck.
    pub fn top_tickets(&self, count: usize) -> Result<SortedBag<Ticket>, String> {
        self.tickets.top_cards(count)
    }

    pub fn without_top_tickets(&self, count: usize) -> Result<Self, String> {
        Ok(Self::assemble(
            self.tickets.without_top_cards(count)?,
            self.card_state.clone(),
            self.current_player_id(),
            self.player_states.clone(),
            self.last_player(),
        ))
    }

    /// The card on top of the draw pile; fails if it is empty.
    pub fn top_card(&self) -> Result<Card, String> {
        self.card_state.top_deck_card()
    }

    pub fn without_top_card(&self) -> Result<Self, String> {
        Ok(Self::assemble(
            self.tickets.clone(),
            self.card_state.without_top_deck_card()?,
            self.current_player_id(),
            self.player_states.clone(),
            self.last_player(),
        ))
    }

    pub fn with_more_discarded_cards(&self, discarded_cards: &SortedBag<Card>) -> Self {
        Self::assemble(
            self.tickets.clone(),
            self.card_state.with_more_discarded_cards(discarded_cards),
            self.current_player_id(),
            self.player_states.clone(),
            self.last_player(),
        )
    }

    /// Shuffles the discards into a new draw pile, only if the draw pile is empty.
    pub fn with_cards_deck_recreated_if_needed<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Self, String> {
        if !self.card_state.is_deck_empty() {
            return Ok(self.clone());
        }

        Ok(Self::assemble(
            self.tickets.clone(),
            self.card_state.with_deck_recreated_from_discards(rng)?,
            self.current_player_id(),
            self.player_states.clone(),
            self.last_player(),
        ))
    }

    /// Gives `chosen_tickets` to `player_id`, at the start of the game.
    ///
    /// Fails if the player already holds tickets.
    pub fn with_initially_chosen_tickets(
        &self,
        player_id: PlayerId,
        chosen_tickets: &SortedBag<Ticket>,
    ) -> Result<Self, String> {
        let player_state = self.player_state(player_id);
        if !player_state.tickets().is_empty() {
            return Err(format!(
                "{} already chose their initial tickets.",
                player_id
            ));
        }

        Ok(self.with_player_state(player_id, player_state.with_added_tickets(chosen_tickets)))
    }

    /// Gives `chosen_tickets` to the current player, who drew `drawn_tickets` from the top of the ticket deck.
    ///
    /// Fails if `chosen_tickets` are not among `drawn_tickets`.
    pub fn with_chosen_additional_tickets(
        &self,
        drawn_tickets: &SortedBag<Ticket>,
        chosen_tickets: &SortedBag<Ticket>,
    ) -> Result<Self, String> {
        if !drawn_tickets.contains(chosen_tickets) {
            return Err(String::from("Chosen tickets must be among the drawn tickets."));
        }

        let player_state = self
            .current_player_state()
            .with_added_tickets(chosen_tickets);
        let mut player_states = self.player_states.clone();
        player_states[self.current_player_id().index()] = player_state;

        Ok(Self::assemble(
            self.tickets.without_top_cards(drawn_tickets.size())?,
            self.card_state.clone(),
            self.current_player_id(),
            player_states,
            self.last_player(),
        ))
    }

    /// The current player takes the face-up card at `slot`, replaced by the top card of the deck.
    pub fn with_drawn_face_up_card(&self, slot: usize) -> Result<Self, String> {
        let card = self.card_state.face_up_card(slot)?;
        let card_state = self.card_state.with_drawn_face_up_card(slot)?;
        let mut player_states = self.player_states.clone();
        player_states[self.current_player_id().index()] =
            self.current_player_state().with_added_card(card);

        Ok(Self::assemble(
            self.tickets.clone(),
            card_state,
            self.current_player_id(),
            player_states,
            self.last_player(),
        ))
    }

    /// The current player takes the card on top of the deck.
    pub fn with_blindly_drawn_card(&self) -> Result<Self, String> {
        let card = self.card_state.top_deck_card()?;
        let mut player_states = self.player_states.clone();
        player_states[self.current_player_id().index()] =
            self.current_player_state().with_added_card(card);

        Ok(Self::assemble(
            self.tickets.clone(),
            self.card_state.without_top_deck_card()?,
            self.current_player_id(),
            player_states,
            self.last_player(),
        ))
    }

    /// The current player claims `route` with `cards`, which are discarded.
    pub fn with_claimed_route(&self, route: &Route, cards: &SortedBag<Card>) -> Result<Self, String> {
        if !self.is_route_claimable(route) {
            return Err(format!(
                "The route between {} and {} was already claimed.",
                route.station1(),
                route.station2()
            ));
        }

        let mut player_states = self.player_states.clone();
        player_states[self.current_player_id().index()] =
            self.current_player_state().with_claimed_route(route, cards)?;

        Ok(Self::assemble(
            self.tickets.clone(),
            self.card_state.with_more_discarded_cards(cards),
            self.current_player_id(),
            player_states,
            self.last_player(),
        ))
    }

    /// Whether the current player just got few enough cars for the last turn to begin.
    pub fn last_turn_begins(&self) -> bool {
        self.last_player().is_none() && self.current_player_state().car_count() <= LAST_TURN_CAR_COUNT
    }

    /// Passes the turn to the other player, recording the current one as last player if the last turn begins.
    pub fn for_next_turn(&self) -> Self {
        let last_player = if self.last_turn_begins() {
            Some(self.current_player_id())
        } else {
            self.last_player()
        };

        Self::assemble(
            self.tickets.clone(),
            self.card_state.clone(),
            self.current_player_id().next(),
            self.player_states.clone(),
            last_player,
        )
    }
}

impl Deref for GameState {
    type Target = PublicGameState;

    fn deref(&self) -> &Self::Target {
        &self.public
    }
}
