use crate::card::Card;
use crate::game_state::PublicGameState;
use crate::player::{DrawSlot, Player, PlayerId, PlayerResult, TurnKind};
use crate::player_state::PlayerState;
use crate::route::Route;
use crate::sorted_bag::SortedBag;
use crate::ticket::Ticket;

use std::sync::mpsc::{self, Receiver, Sender, SyncSender};

/// Sends back the answer to a [`PlayerRequest`] to the blocked game thread.
#[derive(Debug)]
pub struct Responder<T>(SyncSender<T>);

impl<T> Responder<T> {
    /// Fails if the game stopped waiting for this answer.
    pub fn respond(self, value: T) -> Result<(), String> {
        self.0
            .send(value)
            .map_err(|_| String::from("The game is no longer waiting for an answer."))
    }
}

/// A call of the [`Player`] contract, forwarded to the thread that owns the actual player (e.g. a UI loop).
///
/// Requests that expect an answer carry a [`Responder`].
#[derive(Debug)]
pub enum PlayerRequest {
    InitPlayers {
        own_id: PlayerId,
        player_names: [String; 2],
    },
    ReceiveInfo(String),
    UpdateState {
        state: PublicGameState,
        own_state: PlayerState,
    },
    SetInitialTicketChoice(SortedBag<Ticket>),
    ChooseInitialTickets(Responder<SortedBag<Ticket>>),
    NextTurn(Responder<TurnKind>),
    ChooseTickets {
        options: SortedBag<Ticket>,
        responder: Responder<SortedBag<Ticket>>,
    },
    DrawSlot(Responder<DrawSlot>),
    ClaimedRoute(Responder<Route>),
    InitialClaimCards(Responder<SortedBag<Card>>),
    ChooseAdditionalCards {
        options: Vec<SortedBag<Card>>,
        responder: Responder<SortedBag<Card>>,
    },
}

/// A [`Player`] living on another thread, reached through a channel of [`PlayerRequest`]s.
///
/// The game thread blocks on a single-slot channel until each query is answered.
#[derive(Clone, Debug)]
pub struct ChannelPlayer {
    requests: Sender<PlayerRequest>,
}

impl ChannelPlayer {
    /// Creates the player, and the receiving end the other thread should serve.
    pub fn new() -> (Self, Receiver<PlayerRequest>) {
        let (requests, receiver) = mpsc::channel();
        (Self { requests }, receiver)
    }

    fn send(&self, request: PlayerRequest) -> PlayerResult<()> {
        self.requests
            .send(request)
            .map_err(|_| String::from("The player's thread hung up."))
    }

    fn query<T>(&self, request: impl FnOnce(Responder<T>) -> PlayerRequest) -> PlayerResult<T> {
        let (tx, rx) = mpsc::sync_channel(1);
        self.send(request(Responder(tx)))?;
        rx.recv()
            .map_err(|_| String::from("The player's thread dropped the request unanswered."))
    }
}

impl Player for ChannelPlayer {
    fn init_players(&mut self, own_id: PlayerId, player_names: &[String; 2]) -> PlayerResult<()> {
        self.send(PlayerRequest::InitPlayers {
            own_id,
            player_names: player_names.clone(),
        })
    }

    fn receive_info(&mut self, info: &str) -> PlayerResult<()> {
        self.send(PlayerRequest::ReceiveInfo(info.to_owned()))
    }

    fn update_state(&mut self, state: &PublicGameState, own_state: &PlayerState) -> PlayerResult<()> {
        self.send(PlayerRequest::UpdateState {
            state: state.clone(),
            own_state: own_state.clone(),
        })
    }

    fn set_initial_ticket_choice(&mut self, tickets: &SortedBag<Ticket>) -> PlayerResult<()> {
        self.send(PlayerRequest::SetInitialTicketChoice(tickets.clone()))
    }

    fn choose_initial_tickets(&mut self) -> PlayerResult<SortedBag<Ticket>> {
        self.query(PlayerRequest::ChooseInitialTickets)
    }

    fn next_turn(&mut self) -> PlayerResult<TurnKind> {
        self.query(PlayerRequest::NextTurn)
    }

    fn choose_tickets(&mut self, options: &SortedBag<Ticket>) -> PlayerResult<SortedBag<Ticket>> {
        let options = options.clone();
        self.query(|responder| PlayerRequest::ChooseTickets { options, responder })
    }

    fn draw_slot(&mut self) -> PlayerResult<DrawSlot> {
        self.query(PlayerRequest::DrawSlot)
    }

    fn claimed_route(&mut self) -> PlayerResult<Route> {
        self.query(PlayerRequest::ClaimedRoute)
    }

    fn initial_claim_cards(&mut self) -> PlayerResult<SortedBag<Card>> {
        self.query(PlayerRequest::InitialClaimCards)
    }

    fn choose_additional_cards(
        &mut self,
        options: &[SortedBag<Card>],
    ) -> PlayerResult<SortedBag<Card>> {
        let options = options.to_vec();
        self.query(|responder| PlayerRequest::ChooseAdditionalCards { options, responder })
    }
}
