use crate::card::Card;
use crate::game_state::{GameState, INITIAL_TICKETS_COUNT, IN_GAME_TICKETS_COUNT};
use crate::info::Info;
use crate::player::{DrawSlot, Player, PlayerId, TurnKind};
use crate::route::{Level, Route, ADDITIONAL_TUNNEL_CARDS};
use crate::sorted_bag::SortedBag;
use crate::ticket::Ticket;
use crate::trail::Trail;

use log::{debug, info, warn};
use rand::Rng;
use serde::Serialize;
use std::cmp::{min, Ordering};

/// Points granted to the player(s) with the longest trail.
pub const LONGEST_TRAIL_BONUS_POINTS: i32 = 10;
/// How many cards a player draws when picking the draw-cards turn.
pub const DRAWN_CARDS_COUNT: usize = 2;

// The game goes on for this many turns once the last turn began, the triggering turn included.
const LAST_TURNS_COUNT: usize = 3;

/// How a game ended.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameOutcome {
    pub player_names: [String; 2],
    /// Final points of each player, longest trail bonus included.
    pub points: [i32; 2],
    pub longest_trails: [Trail; 2],
    /// `None` for a draw.
    pub winner: Option<PlayerId>,
}

/// Runs a game between two players, from the deal to the final scores.
///
/// Each player is called in turn; any error from a player, or any move breaking the rules
/// (e.g. claiming a route without the right cards), ends the game with that error.
pub struct Game<'a> {
    players: [&'a mut dyn Player; 2],
    player_names: [String; 2],
    infos: [Info; 2],
}

impl<'a> Game<'a> {
    /// Plays a whole game with `tickets`, indexing `players` and `player_names` by [`PlayerId::index`].
    pub fn play<R: Rng + ?Sized>(
        players: [&'a mut dyn Player; 2],
        player_names: [String; 2],
        tickets: &SortedBag<Ticket>,
        rng: &mut R,
    ) -> Result<GameOutcome, String> {
        let infos = [
            Info::new(player_names[0].clone()),
            Info::new(player_names[1].clone()),
        ];
        let mut game = Game {
            players,
            player_names,
            infos,
        };

        let state = game.start(tickets, rng)?;
        let state = game.play_turns(state, rng)?;
        game.finish(&state)
    }

    fn broadcast(&mut self, message: &str) -> Result<(), String> {
        for player in self.players.iter_mut() {
            player.receive_info(message)?;
        }
        Ok(())
    }

    fn update_states(&mut self, state: &GameState) -> Result<(), String> {
        for player_id in PlayerId::ALL {
            self.players[player_id.index()].update_state(state.public(), state.player_state(player_id))?;
        }
        Ok(())
    }

    fn start<R: Rng + ?Sized>(&mut self, tickets: &SortedBag<Ticket>, rng: &mut R) -> Result<GameState, String> {
        for player_id in PlayerId::ALL {
            self.players[player_id.index()].init_players(player_id, &self.player_names)?;
        }

        let mut state = GameState::initial(tickets, rng)?;
        info!(
            "Game starts between {} and {}, {} plays first.",
            self.player_names[0],
            self.player_names[1],
            self.player_names[state.current_player_id().index()]
        );
        let message = self.infos[state.current_player_id().index()].will_play_first();
        self.broadcast(&message)?;

        let mut offered_tickets = Vec::with_capacity(PlayerId::ALL.len());
        for player_id in PlayerId::ALL {
            let offered = state.top_tickets(INITIAL_TICKETS_COUNT)?;
            state = state.without_top_tickets(INITIAL_TICKETS_COUNT)?;
            self.players[player_id.index()].set_initial_ticket_choice(&offered)?;
            offered_tickets.push(offered);

            let message = self.infos[player_id.index()].drew_tickets(INITIAL_TICKETS_COUNT);
            self.broadcast(&message)?;
        }
        self.update_states(&state)?;

        for player_id in PlayerId::ALL {
            let chosen = self.players[player_id.index()].choose_initial_tickets()?;
            if !offered_tickets[player_id.index()].contains(&chosen) {
                return Err(format!(
                    "{} kept initial tickets they were not offered.",
                    self.player_names[player_id.index()]
                ));
            }
            state = state.with_initially_chosen_tickets(player_id, &chosen)?;
        }

        for player_id in PlayerId::ALL {
            let message = self.infos[player_id.index()]
                .kept_tickets(state.player_state(player_id).ticket_count());
            self.broadcast(&message)?;
        }

        Ok(state)
    }

    fn play_turns<R: Rng + ?Sized>(&mut self, mut state: GameState, rng: &mut R) -> Result<GameState, String> {
        let mut last_turns = 0;

        while last_turns < LAST_TURNS_COUNT {
            state = self.play_turn(state, rng)?;

            if state.last_turn_begins() {
                info!(
                    "Last turn begins, {} has {} cars left.",
                    self.player_names[state.current_player_id().index()],
                    state.current_player_state().car_count()
                );
                let message = self.infos[state.current_player_id().index()]
                    .last_turn_begins(state.current_player_state().car_count());
                self.broadcast(&message)?;
            }
            if state.last_turn_begins() || state.last_player().is_some() {
                last_turns += 1;
            }

            state = state.for_next_turn();
        }

        Ok(state)
    }

    fn play_turn<R: Rng + ?Sized>(&mut self, state: GameState, rng: &mut R) -> Result<GameState, String> {
        let current = state.current_player_id().index();
        let message = self.infos[current].can_play();
        self.broadcast(&message)?;
        self.update_states(&state)?;

        let turn_kind = self.players[current].next_turn()?;
        debug!("{} plays {}.", self.player_names[current], turn_kind);

        match turn_kind {
            TurnKind::DrawTickets => self.draw_tickets(state),
            TurnKind::DrawCards => self.draw_cards(state, rng),
            TurnKind::ClaimRoute => self.claim_route(state, rng),
        }
    }

    fn draw_tickets(&mut self, state: GameState) -> Result<GameState, String> {
        let current = state.current_player_id().index();
        if !state.can_draw_tickets() {
            return Err(format!(
                "{} cannot draw tickets, none are left.",
                self.player_names[current]
            ));
        }

        let count = min(IN_GAME_TICKETS_COUNT, state.tickets_count());
        let drawn = state.top_tickets(count)?;
        let message = self.infos[current].drew_tickets(count);
        self.broadcast(&message)?;

        let chosen = self.players[current].choose_tickets(&drawn)?;
        if chosen.is_empty() {
            return Err(format!(
                "{} must keep at least one of the drawn tickets.",
                self.player_names[current]
            ));
        }
        let state = state.with_chosen_additional_tickets(&drawn, &chosen)?;

        let message = self.infos[current].kept_tickets(chosen.size());
        self.broadcast(&message)?;
        Ok(state)
    }

    fn draw_cards<R: Rng + ?Sized>(&mut self, mut state: GameState, rng: &mut R) -> Result<GameState, String> {
        let current = state.current_player_id().index();

        for draw in 0..DRAWN_CARDS_COUNT {
            state = state.with_cards_deck_recreated_if_needed(rng)?;
            if draw > 0 {
                self.update_states(&state)?;
            }

            match self.players[current].draw_slot()? {
                DrawSlot::Deck => {
                    state = state.with_blindly_drawn_card()?;
                    let message = self.infos[current].drew_blind_card();
                    self.broadcast(&message)?;
                }
                DrawSlot::FaceUp(slot) => {
                    let card = state.card_state().face_up_card(slot)?;
                    state = state.with_drawn_face_up_card(slot)?;
                    let message = self.infos[current].drew_visible_card(card);
                    self.broadcast(&message)?;
                }
            }
        }

        Ok(state)
    }

    fn claim_route<R: Rng + ?Sized>(&mut self, state: GameState, rng: &mut R) -> Result<GameState, String> {
        let current = state.current_player_id().index();
        let route = self.players[current].claimed_route()?;
        let initial_cards = self.players[current].initial_claim_cards()?;

        if !route.possible_claim_cards().contains(&initial_cards) {
            return Err(format!(
                "{} cannot claim the route between {} and {} with these cards.",
                self.player_names[current],
                route.station1(),
                route.station2()
            ));
        }

        if route.level() == Level::Overground {
            let state = state.with_claimed_route(&route, &initial_cards)?;
            let message = self.infos[current].claimed_route(&route, &initial_cards);
            self.broadcast(&message)?;
            return Ok(state);
        }

        self.claim_tunnel(state, route, initial_cards, rng)
    }

    fn claim_tunnel<R: Rng + ?Sized>(
        &mut self,
        mut state: GameState,
        route: Route,
        initial_cards: SortedBag<Card>,
        rng: &mut R,
    ) -> Result<GameState, String> {
        let current = state.current_player_id().index();
        let message = self.infos[current].attempts_tunnel_claim(&route, &initial_cards);
        self.broadcast(&message)?;

        let mut drawn_cards = SortedBag::builder();
        for _ in 0..ADDITIONAL_TUNNEL_CARDS {
            state = state.with_cards_deck_recreated_if_needed(rng)?;
            drawn_cards.add(state.top_card()?);
            state = state.without_top_card()?;
        }
        let drawn_cards = drawn_cards.build();
        state = state.with_more_discarded_cards(&drawn_cards);

        let additional_count = route.additional_claim_cards_count(&initial_cards, &drawn_cards)?;
        let message = self.infos[current].drew_additional_cards(&drawn_cards, additional_count);
        self.broadcast(&message)?;

        let claim_cards = if additional_count == 0 {
            initial_cards
        } else {
            let options = state
                .current_player_state()
                .possible_additional_cards(additional_count, &initial_cards)?;
            let chosen = if options.is_empty() {
                SortedBag::new()
            } else {
                self.players[current].choose_additional_cards(&options)?
            };

            if chosen.is_empty() {
                warn!(
                    "{} gave up on the tunnel between {} and {}.",
                    self.player_names[current],
                    route.station1(),
                    route.station2()
                );
                let message = self.infos[current].did_not_claim_route(&route);
                self.broadcast(&message)?;
                return Ok(state);
            }
            if !options.contains(&chosen) {
                return Err(format!(
                    "{} chose additional cards that were not offered.",
                    self.player_names[current]
                ));
            }

            initial_cards.union(&chosen)
        };

        let state = state.with_claimed_route(&route, &claim_cards)?;
        let message = self.infos[current].claimed_route(&route, &claim_cards);
        self.broadcast(&message)?;
        Ok(state)
    }

    fn finish(&mut self, state: &GameState) -> Result<GameOutcome, String> {
        let longest_trails = [
            Self::longest_trail(state, PlayerId::Player1),
            Self::longest_trail(state, PlayerId::Player2),
        ];
        let bonus_players: Vec<PlayerId> =
            match longest_trails[0].length().cmp(&longest_trails[1].length()) {
                Ordering::Greater => vec![PlayerId::Player1],
                Ordering::Less => vec![PlayerId::Player2],
                Ordering::Equal => PlayerId::ALL.to_vec(),
            };

        for player_id in &bonus_players {
            let message = self.infos[player_id.index()]
                .gets_longest_trail_bonus(&longest_trails[player_id.index()]);
            self.broadcast(&message)?;
        }

        let mut points = [0; 2];
        for player_id in PlayerId::ALL {
            let bonus = if bonus_players.contains(&player_id) {
                LONGEST_TRAIL_BONUS_POINTS
            } else {
                0
            };
            points[player_id.index()] = state.player_state(player_id).final_points() + bonus;
        }

        self.update_states(state)?;

        let winner = match points[0].cmp(&points[1]) {
            Ordering::Greater => Some(PlayerId::Player1),
            Ordering::Less => Some(PlayerId::Player2),
            Ordering::Equal => None,
        };
        let message = match winner {
            Some(winner) => self.infos[winner.index()]
                .won(points[winner.index()], points[winner.next().index()]),
            None => Info::draw(&self.player_names, points[0]),
        };
        info!("Game over: {}", message);
        self.broadcast(&message)?;

        Ok(GameOutcome {
            player_names: self.player_names.clone(),
            points,
            longest_trails,
            winner,
        })
    }

    fn longest_trail(state: &GameState, player_id: PlayerId) -> Trail {
        let routes: Vec<Route> = state.player_state(player_id).routes().iter().copied().collect();
        Trail::longest(&routes)
    }
}
