use crate::message_id::MessageId;
use crate::serdes::{list_to_wire, ProtocolError, Wire};

use log::trace;
use std::io::{self, BufRead, BufReader, Write};
use std::net::TcpStream;
use tchu::card::Card;
use tchu::game_state::PublicGameState;
use tchu::player::{DrawSlot, Player, PlayerId, PlayerResult, TurnKind};
use tchu::player_state::PlayerState;
use tchu::route::Route;
use tchu::sorted_bag::SortedBag;
use tchu::ticket::Ticket;

/// Stands for a player playing on the other end of a connection, on the server side.
///
/// Each [`Player`] call is sent as one line; calls expecting an answer then block until the
/// remote player replies with a line of their own.
pub struct RemotePlayerProxy<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl RemotePlayerProxy<BufReader<TcpStream>, TcpStream> {
    /// Talks to the player connected through `stream`.
    pub fn from_stream(stream: TcpStream) -> io::Result<Self> {
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self::new(reader, stream))
    }
}

impl<R: BufRead, W: Write> RemotePlayerProxy<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn send(&mut self, message_id: MessageId, arguments: &[String]) -> Result<(), ProtocolError> {
        let mut line = message_id.to_string();
        for argument in arguments {
            line.push(' ');
            line.push_str(argument);
        }
        trace!("> {}", line);

        line.push('\n');
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    fn receive<T: Wire>(&mut self) -> Result<T, ProtocolError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(ProtocolError::UnexpectedEof);
        }

        let line = line.trim_end_matches(&['\r', '\n'][..]);
        trace!("< {}", line);
        T::from_wire(line)
    }

    fn query<T: Wire>(&mut self, message_id: MessageId, arguments: &[String]) -> Result<T, ProtocolError> {
        self.send(message_id, arguments)?;
        self.receive()
    }
}

impl<R: BufRead, W: Write> Player for RemotePlayerProxy<R, W> {
    fn init_players(&mut self, own_id: PlayerId, player_names: &[String; 2]) -> PlayerResult<()> {
        let arguments = [own_id.to_wire()?, list_to_wire(player_names.iter(), ',')?];
        Ok(self.send(MessageId::InitPlayers, &arguments)?)
    }

    fn receive_info(&mut self, info: &str) -> PlayerResult<()> {
        let arguments = [info.to_owned().to_wire()?];
        Ok(self.send(MessageId::ReceiveInfo, &arguments)?)
    }

    fn update_state(&mut self, state: &PublicGameState, own_state: &PlayerState) -> PlayerResult<()> {
        let arguments = [state.to_wire()?, own_state.to_wire()?];
        Ok(self.send(MessageId::UpdateState, &arguments)?)
    }

    fn set_initial_ticket_choice(&mut self, tickets: &SortedBag<Ticket>) -> PlayerResult<()> {
        let arguments = [tickets.to_wire()?];
        Ok(self.send(MessageId::SetInitialTickets, &arguments)?)
    }

    fn choose_initial_tickets(&mut self) -> PlayerResult<SortedBag<Ticket>> {
        Ok(self.query(MessageId::ChooseInitialTickets, &[])?)
    }

    fn next_turn(&mut self) -> PlayerResult<TurnKind> {
        Ok(self.query(MessageId::NextTurn, &[])?)
    }

    fn choose_tickets(&mut self, options: &SortedBag<Ticket>) -> PlayerResult<SortedBag<Ticket>> {
        let arguments = [options.to_wire()?];
        Ok(self.query(MessageId::ChooseTickets, &arguments)?)
    }

    fn draw_slot(&mut self) -> PlayerResult<DrawSlot> {
        Ok(self.query(MessageId::DrawSlot, &[])?)
    }

    fn claimed_route(&mut self) -> PlayerResult<Route> {
        Ok(self.query(MessageId::Route, &[])?)
    }

    fn initial_claim_cards(&mut self) -> PlayerResult<SortedBag<Card>> {
        Ok(self.query(MessageId::Cards, &[])?)
    }

    fn choose_additional_cards(
        &mut self,
        options: &[SortedBag<Card>],
    ) -> PlayerResult<SortedBag<Card>> {
        let arguments = [options.to_vec().to_wire()?];
        Ok(self.query(MessageId::ChooseAdditionalCards, &arguments)?)
    }
}
