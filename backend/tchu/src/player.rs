use crate::card::Card;
use crate::game_state::PublicGameState;
use crate::player_state::PlayerState;
use crate::route::Route;
use crate::sorted_bag::SortedBag;
use crate::ticket::Ticket;

use serde_repr::{Deserialize_repr, Serialize_repr};
#[allow(unused_imports)]
use strum::EnumCount;
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

/// Identifies one of the two players of a game.
///
/// # JSON
/// Player ids are serialized as their 8-bit ordinal.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize_repr,
    Display,
    EnumCountMacro,
    EnumIter,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize_repr,
)]
#[repr(u8)]
pub enum PlayerId {
    #[strum(serialize = "PLAYER_1")]
    Player1 = 0,
    #[strum(serialize = "PLAYER_2")]
    Player2 = 1,
}

impl PlayerId {
    /// Both players, in turn order.
    pub const ALL: [PlayerId; PlayerId::COUNT] = [PlayerId::Player1, PlayerId::Player2];

    /// The player whose turn comes after this one.
    pub fn next(&self) -> Self {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
        }
    }

    /// Index of this player in per-player arrays.
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// The three kinds of actions a player picks from at the start of their turn.
#[derive(Clone, Copy, Debug, Display, EnumCountMacro, EnumIter, Eq, Hash, PartialEq)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnKind {
    DrawTickets,
    DrawCards,
    ClaimRoute,
}

impl TurnKind {
    /// Every turn kind, in declaration order.
    pub const ALL: [TurnKind; TurnKind::COUNT] = [
        TurnKind::DrawTickets,
        TurnKind::DrawCards,
        TurnKind::ClaimRoute,
    ];
}

/// Where a player draws a card from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DrawSlot {
    /// The top of the draw pile.
    Deck,
    /// One of the five face-up cards, from 0 to 4.
    FaceUp(usize),
}

/// Any answer from a player may fail, e.g. if a remote player disconnects.
pub type PlayerResult<T> = Result<T, String>;

/// Everything the game needs from a player, whether local, scripted or remote.
///
/// Methods are called synchronously by the game, in the order of play;
/// choosing methods block until the player has made up their mind.
pub trait Player {
    /// Tells the player their own id, and the names of both players indexed by [`PlayerId::index`].
    fn init_players(&mut self, own_id: PlayerId, player_names: &[String; 2]) -> PlayerResult<()>;

    /// Shares a message about the progress of the game.
    fn receive_info(&mut self, info: &str) -> PlayerResult<()>;

    /// Shares the new state of the game, and the full state of this player.
    fn update_state(&mut self, state: &PublicGameState, own_state: &PlayerState) -> PlayerResult<()>;

    /// Offers the five tickets the player picks from at the start of the game.
    fn set_initial_ticket_choice(&mut self, tickets: &SortedBag<Ticket>) -> PlayerResult<()>;

    /// The tickets kept among those offered through [`Player::set_initial_ticket_choice`].
    fn choose_initial_tickets(&mut self) -> PlayerResult<SortedBag<Ticket>>;

    /// What the player does at the start of their turn.
    fn next_turn(&mut self) -> PlayerResult<TurnKind>;

    /// The tickets kept among those drawn during the game; at least one.
    fn choose_tickets(&mut self, options: &SortedBag<Ticket>) -> PlayerResult<SortedBag<Ticket>>;

    /// Where the player draws their next card from.
    fn draw_slot(&mut self) -> PlayerResult<DrawSlot>;

    /// The route the player attempts to claim.
    fn claimed_route(&mut self) -> PlayerResult<Route>;

    /// The cards the player initially plays to claim their route.
    fn initial_claim_cards(&mut self) -> PlayerResult<SortedBag<Card>>;

    /// The additional cards played to claim a tunnel, among `options`.
    ///
    /// An empty bag means the player gives up on the tunnel.
    fn choose_additional_cards(
        &mut self,
        options: &[SortedBag<Card>],
    ) -> PlayerResult<SortedBag<Card>>;
}
