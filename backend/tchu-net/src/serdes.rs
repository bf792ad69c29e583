//! The textual encoding of everything that travels between the server and a remote player.
//!
//! Every value is encoded without spaces or newlines, so that a message fits on one line
//! with its arguments separated by spaces:
//! - integers in decimal, strings in Base64 (of their UTF-8 bytes);
//! - cards, routes, tickets, turn kinds and player ids as their index in their canonical order;
//! - a bag as its sorted elements, separated by `,`; a list of bags separated by `;`;
//! - composite states as their fields separated by `;`, or `:` for the whole game state.

use std::fmt;
use std::io;

use strum::IntoEnumIterator;
use tchu::card::Card;
use tchu::card_state::{PublicCardState, FACE_UP_CARDS_COUNT};
use tchu::game_state::PublicGameState;
use tchu::map;
use tchu::player::{DrawSlot, PlayerId, TurnKind};
use tchu::player_state::{PlayerState, PublicPlayerState};
use tchu::route::Route;
use tchu::sorted_bag::SortedBag;
use tchu::ticket::Ticket;

/// Types of error when talking to the other end of a connection.
#[derive(Debug)]
pub enum ProtocolError {
    /// The connection failed.
    Io(io::Error),
    /// A line or value could not be understood.
    Malformed(String),
    /// The connection closed while a line was expected.
    UnexpectedEof,
    /// The local player failed to answer.
    Player(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Io(e) => write!(f, "Connection error: {}", e),
            ProtocolError::Malformed(message) => write!(f, "Malformed message: {}", message),
            ProtocolError::UnexpectedEof => write!(f, "Connection closed unexpectedly."),
            ProtocolError::Player(message) => write!(f, "Player error: {}", message),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl From<io::Error> for ProtocolError {
    fn from(e: io::Error) -> Self {
        ProtocolError::Io(e)
    }
}

impl From<ProtocolError> for String {
    fn from(e: ProtocolError) -> Self {
        e.to_string()
    }
}

fn malformed(what: &str, text: &str) -> ProtocolError {
    ProtocolError::Malformed(format!("invalid {}: {:?}", what, text))
}

/// A value with a textual encoding, free of spaces and newlines.
pub trait Wire: Sized {
    /// Fails for values that cannot be named on the wire, e.g. a route off the map.
    fn to_wire(&self) -> Result<String, ProtocolError>;

    fn from_wire(text: &str) -> Result<Self, ProtocolError>;
}

/// Encodes `items` one by one, joined with `separator`.
pub fn list_to_wire<'a, T: Wire + 'a>(
    items: impl IntoIterator<Item = &'a T>,
    separator: char,
) -> Result<String, ProtocolError> {
    let encoded = items
        .into_iter()
        .map(Wire::to_wire)
        .collect::<Result<Vec<String>, ProtocolError>>()?;

    Ok(encoded.join(&separator.to_string()))
}

/// Decodes a list joined with `separator`; the empty string is the empty list.
pub fn list_from_wire<T: Wire>(text: &str, separator: char) -> Result<Vec<T>, ProtocolError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    text.split(separator).map(T::from_wire).collect()
}

fn index_from_wire(what: &str, text: &str) -> Result<usize, ProtocolError> {
    text.parse().map_err(|_| malformed(what, text))
}

impl Wire for usize {
    fn to_wire(&self) -> Result<String, ProtocolError> {
        Ok(self.to_string())
    }

    fn from_wire(text: &str) -> Result<Self, ProtocolError> {
        index_from_wire("integer", text)
    }
}

impl Wire for String {
    fn to_wire(&self) -> Result<String, ProtocolError> {
        Ok(base64::encode(self.as_bytes()))
    }

    fn from_wire(text: &str) -> Result<Self, ProtocolError> {
        let bytes = base64::decode(text).map_err(|_| malformed("Base64 string", text))?;
        String::from_utf8(bytes).map_err(|_| malformed("UTF-8 string", text))
    }
}

impl Wire for PlayerId {
    fn to_wire(&self) -> Result<String, ProtocolError> {
        Ok(self.index().to_string())
    }

    fn from_wire(text: &str) -> Result<Self, ProtocolError> {
        PlayerId::ALL
            .get(index_from_wire("player id", text)?)
            .copied()
            .ok_or_else(|| malformed("player id", text))
    }
}

impl Wire for TurnKind {
    fn to_wire(&self) -> Result<String, ProtocolError> {
        Ok((*self as usize).to_string())
    }

    fn from_wire(text: &str) -> Result<Self, ProtocolError> {
        TurnKind::ALL
            .get(index_from_wire("turn kind", text)?)
            .copied()
            .ok_or_else(|| malformed("turn kind", text))
    }
}

impl Wire for Card {
    fn to_wire(&self) -> Result<String, ProtocolError> {
        Ok((*self as usize).to_string())
    }

    fn from_wire(text: &str) -> Result<Self, ProtocolError> {
        Card::iter()
            .nth(index_from_wire("card", text)?)
            .ok_or_else(|| malformed("card", text))
    }
}

impl Wire for Route {
    fn to_wire(&self) -> Result<String, ProtocolError> {
        map::route_index(self)
            .map(|index| index.to_string())
            .ok_or_else(|| malformed("route", self.id()))
    }

    fn from_wire(text: &str) -> Result<Self, ProtocolError> {
        map::routes()
            .get(index_from_wire("route", text)?)
            .copied()
            .ok_or_else(|| malformed("route", text))
    }
}

impl Wire for Ticket {
    fn to_wire(&self) -> Result<String, ProtocolError> {
        map::ticket_index(self)
            .map(|index| index.to_string())
            .ok_or_else(|| malformed("ticket", self.text()))
    }

    fn from_wire(text: &str) -> Result<Self, ProtocolError> {
        map::tickets()
            .get(index_from_wire("ticket", text)?)
            .cloned()
            .ok_or_else(|| malformed("ticket", text))
    }
}

impl Wire for DrawSlot {
    /// The deck is `-1`, face-up slots are `0` to `4`.
    fn to_wire(&self) -> Result<String, ProtocolError> {
        Ok(match self {
            DrawSlot::Deck => String::from("-1"),
            DrawSlot::FaceUp(slot) => slot.to_string(),
        })
    }

    fn from_wire(text: &str) -> Result<Self, ProtocolError> {
        match text.parse::<i32>() {
            Ok(-1) => Ok(DrawSlot::Deck),
            Ok(slot) if (0..FACE_UP_CARDS_COUNT as i32).contains(&slot) => {
                Ok(DrawSlot::FaceUp(slot as usize))
            }
            _ => Err(malformed("draw slot", text)),
        }
    }
}

impl<T: Wire + Ord + Clone> Wire for SortedBag<T> {
    fn to_wire(&self) -> Result<String, ProtocolError> {
        list_to_wire(self.iter(), ',')
    }

    fn from_wire(text: &str) -> Result<Self, ProtocolError> {
        Ok(list_from_wire(text, ',')?.into_iter().collect())
    }
}

/// Options of additional cards for a tunnel.
///
/// Never holds an empty bag, which could not be told apart from a missing one.
impl Wire for Vec<SortedBag<Card>> {
    fn to_wire(&self) -> Result<String, ProtocolError> {
        list_to_wire(self.iter(), ';')
    }

    fn from_wire(text: &str) -> Result<Self, ProtocolError> {
        list_from_wire(text, ';')
    }
}

impl Wire for PublicCardState {
    fn to_wire(&self) -> Result<String, ProtocolError> {
        Ok(format!(
            "{};{};{}",
            list_to_wire(self.face_up_cards().iter(), ',')?,
            self.deck_size(),
            self.discards_size()
        ))
    }

    fn from_wire(text: &str) -> Result<Self, ProtocolError> {
        match text.split(';').collect::<Vec<_>>().as_slice() {
            [face_up_cards, deck_size, discards_size] => PublicCardState::new(
                &list_from_wire::<Card>(face_up_cards, ',')?,
                usize::from_wire(deck_size)?,
                usize::from_wire(discards_size)?,
            )
            .map_err(ProtocolError::Malformed),
            _ => Err(malformed("card state", text)),
        }
    }
}

impl Wire for PublicPlayerState {
    fn to_wire(&self) -> Result<String, ProtocolError> {
        Ok(format!(
            "{};{};{}",
            self.ticket_count(),
            self.card_count(),
            list_to_wire(self.routes().iter(), ',')?
        ))
    }

    fn from_wire(text: &str) -> Result<Self, ProtocolError> {
        match text.split(';').collect::<Vec<_>>().as_slice() {
            [ticket_count, card_count, routes] => PublicPlayerState::new(
                usize::from_wire(ticket_count)?,
                usize::from_wire(card_count)?,
                list_from_wire::<Route>(routes, ',')?.into_iter().collect(),
            )
            .map_err(ProtocolError::Malformed),
            _ => Err(malformed("public player state", text)),
        }
    }
}

impl Wire for PlayerState {
    fn to_wire(&self) -> Result<String, ProtocolError> {
        Ok(format!(
            "{};{};{}",
            self.tickets().to_wire()?,
            self.cards().to_wire()?,
            list_to_wire(self.routes().iter(), ',')?
        ))
    }

    fn from_wire(text: &str) -> Result<Self, ProtocolError> {
        match text.split(';').collect::<Vec<_>>().as_slice() {
            [tickets, cards, routes] => PlayerState::new(
                SortedBag::from_wire(tickets)?,
                SortedBag::from_wire(cards)?,
                list_from_wire::<Route>(routes, ',')?.into_iter().collect(),
            )
            .map_err(ProtocolError::Malformed),
            _ => Err(malformed("player state", text)),
        }
    }
}

impl Wire for PublicGameState {
    /// The last player is left empty until the last turn begins.
    fn to_wire(&self) -> Result<String, ProtocolError> {
        let last_player = match self.last_player() {
            Some(player_id) => player_id.to_wire()?,
            None => String::new(),
        };

        Ok(format!(
            "{}:{}:{}:{}:{}:{}",
            self.tickets_count(),
            self.card_state().to_wire()?,
            self.current_player_id().to_wire()?,
            self.player_state(PlayerId::Player1).to_wire()?,
            self.player_state(PlayerId::Player2).to_wire()?,
            last_player
        ))
    }

    fn from_wire(text: &str) -> Result<Self, ProtocolError> {
        match text.split(':').collect::<Vec<_>>().as_slice() {
            [tickets_count, card_state, current_player_id, player1, player2, last_player] => {
                let last_player = if last_player.is_empty() {
                    None
                } else {
                    Some(PlayerId::from_wire(last_player)?)
                };

                Ok(PublicGameState::new(
                    usize::from_wire(tickets_count)?,
                    PublicCardState::from_wire(card_state)?,
                    PlayerId::from_wire(current_player_id)?,
                    [
                        PublicPlayerState::from_wire(player1)?,
                        PublicPlayerState::from_wire(player2)?,
                    ],
                    last_player,
                ))
            }
            _ => Err(malformed("game state", text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tchu::game_state::GameState;
    use tchu::station::Station;
    use tchu::ticket::Trip;

    fn route(id: &str) -> Route {
        map::route_by_id(id).unwrap()
    }

    fn round_trip<T: Wire + PartialEq + fmt::Debug>(value: T) {
        let encoded = value.to_wire().unwrap();
        assert!(!encoded.contains(' ') && !encoded.contains('\n'));
        assert_eq!(T::from_wire(&encoded).unwrap(), value);
    }

    #[test]
    fn strings_are_base64() {
        assert_eq!(String::from("Charles").to_wire().unwrap(), "Q2hhcmxlcw==");
        assert_eq!(String::from_wire("QWRh").unwrap(), "Ada");
        round_trip(String::from("Émilie du Châtelet"));
        round_trip(String::new());
        assert!(String::from_wire("not base64!").is_err());
    }

    #[test]
    fn enumerations_are_ordinals() {
        assert_eq!(Card::Locomotive.to_wire().unwrap(), "8");
        assert_eq!(Card::from_wire("2").unwrap(), Card::Blue);
        assert_eq!(TurnKind::ClaimRoute.to_wire().unwrap(), "2");
        assert_eq!(PlayerId::from_wire("1").unwrap(), PlayerId::Player2);
        assert!(Card::from_wire("9").is_err());
        assert!(PlayerId::from_wire("2").is_err());
        assert!(TurnKind::from_wire("-1").is_err());
    }

    #[test]
    fn draw_slots() {
        assert_eq!(DrawSlot::Deck.to_wire().unwrap(), "-1");
        assert_eq!(DrawSlot::from_wire("4").unwrap(), DrawSlot::FaceUp(4));
        assert!(DrawSlot::from_wire("5").is_err());
        assert!(DrawSlot::from_wire("-2").is_err());
    }

    #[test]
    fn routes_and_tickets_are_map_indices() {
        assert_eq!(route("ATL_CHA").to_wire().unwrap(), "0");
        round_trip(route("SEA_VAN_2"));
        assert_eq!(route("SEA_VAN_2").to_wire().unwrap(), "99");
        round_trip(map::tickets()[30].clone());
        assert!(Route::from_wire("100").is_err());

        let off_map = Ticket::new(vec![Trip::new(Station::Boston, Station::Omaha, 1).unwrap()]).unwrap();
        assert!(off_map.to_wire().is_err());
    }

    #[test]
    fn bags() {
        let cards = SortedBag::of_pair(2, Card::Red, 1, Card::Locomotive);

        assert_eq!(cards.to_wire().unwrap(), "6,6,8");
        round_trip(cards);
        assert_eq!(SortedBag::<Card>::new().to_wire().unwrap(), "");
        round_trip(SortedBag::<Card>::new());
        round_trip(map::all_tickets());
    }

    #[test]
    fn lists_of_bags() {
        let options = vec![
            SortedBag::of_n(2, Card::Green),
            SortedBag::of_pair(1, Card::Green, 1, Card::Locomotive),
            SortedBag::of_n(2, Card::Locomotive),
        ];

        assert_eq!(options.to_wire().unwrap(), "3,3;3,8;8,8");
        round_trip(options);
        round_trip(Vec::<SortedBag<Card>>::new());
    }

    #[test]
    fn public_card_state() {
        let state = PublicCardState::new(
            &[Card::Black, Card::Violet, Card::Blue, Card::Green, Card::Locomotive],
            9,
            2,
        )
        .unwrap();

        assert_eq!(state.to_wire().unwrap(), "0,1,2,3,8;9;2");
        round_trip(state);
        assert!(PublicCardState::from_wire("0,1,2,3;9;2").is_err());
    }

    #[test]
    fn player_states() {
        let public = PublicPlayerState::new(3, 5, routes(&["ATL_CHA", "BOS_NYC_2"])).unwrap();
        assert_eq!(public.to_wire().unwrap(), "3;5;0,10");
        round_trip(public);
        round_trip(PublicPlayerState::new(0, 0, routes(&[])).unwrap());

        let private = PlayerState::new(
            map::tickets()[..2].iter().cloned().collect(),
            SortedBag::of_n(2, Card::White),
            routes(&["ATL_CHA"]),
        )
        .unwrap();
        assert_eq!(private.to_wire().unwrap(), "0,1;7,7;0");
        round_trip(private);
        round_trip(PlayerState::new(SortedBag::new(), SortedBag::new(), routes(&[])).unwrap());
    }

    fn routes<C: FromIterator<Route>>(ids: &[&str]) -> C {
        ids.iter().map(|id| route(id)).collect()
    }

    #[test]
    fn public_game_state() {
        let state = GameState::initial(&map::all_tickets(), &mut StdRng::seed_from_u64(5)).unwrap();
        let encoded = state.public().to_wire().unwrap();

        assert!(encoded.ends_with(':'));
        assert_eq!(encoded.split(':').count(), 6);
        round_trip(state.public().clone());

        let last_turn = PublicGameState::new(
            0,
            state.card_state().clone(),
            PlayerId::Player2,
            [
                state.player_state(PlayerId::Player1).public().clone(),
                state.player_state(PlayerId::Player2).public().clone(),
            ],
            Some(PlayerId::Player1),
        );
        assert!(last_turn.to_wire().unwrap().ends_with(":0"));
        round_trip(last_turn);
    }

    #[test]
    fn malformed_records() {
        assert!(PublicGameState::from_wire("").is_err());
        assert!(PlayerState::from_wire("0;1").is_err());
        assert!(PublicPlayerState::from_wire("a;0;").is_err());
        assert!(usize::from_wire("-3").is_err());
    }
}
