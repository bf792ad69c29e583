use crate::message_id::MessageId;
use crate::serdes::{list_from_wire, ProtocolError, Wire};

use log::{debug, trace};
use smallvec::SmallVec;
use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};
use tchu::card::Card;
use tchu::game_state::PublicGameState;
use tchu::player::{Player, PlayerId};
use tchu::player_state::PlayerState;
use tchu::sorted_bag::SortedBag;
use tchu::ticket::Ticket;

/// Lets a local [`Player`] take part in a game run by a remote server.
///
/// Reads the server's messages one line at a time, calls the matching method of the player,
/// and sends back its answer when one is expected.
pub struct RemotePlayerClient<P: Player, R: BufRead, W: Write> {
    player: P,
    reader: R,
    writer: W,
}

impl<P: Player> RemotePlayerClient<P, BufReader<TcpStream>, TcpStream> {
    /// Connects `player` to the server listening at `address`.
    pub fn connect(player: P, address: impl ToSocketAddrs) -> io::Result<Self> {
        let stream = TcpStream::connect(address)?;
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self::new(player, reader, stream))
    }
}

fn argument<'l>(arguments: &[&'l str], index: usize) -> Result<&'l str, ProtocolError> {
    arguments
        .get(index)
        .copied()
        .ok_or_else(|| ProtocolError::Malformed(format!("missing argument {}", index)))
}

impl<P: Player, R: BufRead, W: Write> RemotePlayerClient<P, R, W> {
    pub fn new(player: P, reader: R, writer: W) -> Self {
        Self {
            player,
            reader,
            writer,
        }
    }

    /// Serves the server's messages until it closes the connection.
    pub fn run(&mut self) -> Result<(), ProtocolError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                debug!("Server closed the connection.");
                return Ok(());
            }

            let message = line.trim_end_matches(&['\r', '\n'][..]);
            trace!("< {}", message);
            if let Some(reply) = self.dispatch(message)? {
                trace!("> {}", reply);
                self.writer.write_all(reply.as_bytes())?;
                self.writer.write_all(b"\n")?;
                self.writer.flush()?;
            }
        }
    }

    /// Gives the local player back, e.g. once the game is over.
    pub fn into_player(self) -> P {
        self.player
    }

    /// Calls the player as told by `message`, returning the reply to send, if any.
    fn dispatch(&mut self, message: &str) -> Result<Option<String>, ProtocolError> {
        let mut tokens = message.split(' ');
        let message_id: MessageId = tokens
            .next()
            .unwrap_or_default()
            .parse()
            .map_err(|_| ProtocolError::Malformed(format!("unknown message {:?}", message)))?;
        let arguments: SmallVec<[&str; 2]> = tokens.collect();
        let player = &mut self.player;

        let reply = match message_id {
            MessageId::InitPlayers => {
                let own_id = PlayerId::from_wire(argument(&arguments, 0)?)?;
                let player_names = match list_from_wire::<String>(argument(&arguments, 1)?, ',')?
                    .as_slice()
                {
                    [player1, player2] => [player1.clone(), player2.clone()],
                    _ => {
                        return Err(ProtocolError::Malformed(String::from(
                            "expected two player names",
                        )))
                    }
                };
                player
                    .init_players(own_id, &player_names)
                    .map_err(ProtocolError::Player)?;
                None
            }
            MessageId::ReceiveInfo => {
                let info = String::from_wire(argument(&arguments, 0)?)?;
                player.receive_info(&info).map_err(ProtocolError::Player)?;
                None
            }
            MessageId::UpdateState => {
                let state = PublicGameState::from_wire(argument(&arguments, 0)?)?;
                let own_state = PlayerState::from_wire(argument(&arguments, 1)?)?;
                player
                    .update_state(&state, &own_state)
                    .map_err(ProtocolError::Player)?;
                None
            }
            MessageId::SetInitialTickets => {
                let tickets = SortedBag::<Ticket>::from_wire(argument(&arguments, 0)?)?;
                player
                    .set_initial_ticket_choice(&tickets)
                    .map_err(ProtocolError::Player)?;
                None
            }
            MessageId::ChooseInitialTickets => Some(
                player
                    .choose_initial_tickets()
                    .map_err(ProtocolError::Player)?
                    .to_wire()?,
            ),
            MessageId::NextTurn => Some(player.next_turn().map_err(ProtocolError::Player)?.to_wire()?),
            MessageId::ChooseTickets => {
                let options = SortedBag::<Ticket>::from_wire(argument(&arguments, 0)?)?;
                Some(
                    player
                        .choose_tickets(&options)
                        .map_err(ProtocolError::Player)?
                        .to_wire()?,
                )
            }
            MessageId::DrawSlot => Some(player.draw_slot().map_err(ProtocolError::Player)?.to_wire()?),
            MessageId::Route => Some(
                player
                    .claimed_route()
                    .map_err(ProtocolError::Player)?
                    .to_wire()?,
            ),
            MessageId::Cards => Some(
                player
                    .initial_claim_cards()
                    .map_err(ProtocolError::Player)?
                    .to_wire()?,
            ),
            MessageId::ChooseAdditionalCards => {
                let options = Vec::<SortedBag<Card>>::from_wire(argument(&arguments, 0)?)?;
                Some(
                    player
                        .choose_additional_cards(&options)
                        .map_err(ProtocolError::Player)?
                        .to_wire()?,
                )
            }
        };

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use tchu::player::{DrawSlot, PlayerResult, TurnKind};
    use tchu::route::Route;

    /// Records what it is told, and always answers the same.
    #[derive(Default)]
    struct RecordingPlayer {
        calls: Vec<String>,
    }

    impl Player for RecordingPlayer {
        fn init_players(&mut self, own_id: PlayerId, player_names: &[String; 2]) -> PlayerResult<()> {
            self.calls
                .push(format!("init {} {} {}", own_id, player_names[0], player_names[1]));
            Ok(())
        }

        fn receive_info(&mut self, info: &str) -> PlayerResult<()> {
            self.calls.push(format!("info {}", info));
            Ok(())
        }

        fn update_state(&mut self, state: &PublicGameState, own_state: &PlayerState) -> PlayerResult<()> {
            self.calls.push(format!(
                "state {} {}",
                state.tickets_count(),
                own_state.card_count()
            ));
            Ok(())
        }

        fn set_initial_ticket_choice(&mut self, tickets: &SortedBag<Ticket>) -> PlayerResult<()> {
            self.calls.push(format!("tickets {}", tickets.size()));
            Ok(())
        }

        fn choose_initial_tickets(&mut self) -> PlayerResult<SortedBag<Ticket>> {
            Ok(SortedBag::new())
        }

        fn next_turn(&mut self) -> PlayerResult<TurnKind> {
            Ok(TurnKind::DrawCards)
        }

        fn choose_tickets(&mut self, options: &SortedBag<Ticket>) -> PlayerResult<SortedBag<Ticket>> {
            Ok(options.clone())
        }

        fn draw_slot(&mut self) -> PlayerResult<DrawSlot> {
            Ok(DrawSlot::FaceUp(3))
        }

        fn claimed_route(&mut self) -> PlayerResult<Route> {
            Err(String::from("No route to claim."))
        }

        fn initial_claim_cards(&mut self) -> PlayerResult<SortedBag<Card>> {
            Ok(SortedBag::of_n(2, Card::Violet))
        }

        fn choose_additional_cards(&mut self, options: &[SortedBag<Card>]) -> PlayerResult<SortedBag<Card>> {
            Ok(options.last().cloned().unwrap_or_default())
        }
    }

    fn run(messages: &str) -> (Result<(), ProtocolError>, RecordingPlayer, String) {
        let mut replies = Vec::new();
        let mut client = RemotePlayerClient::new(
            RecordingPlayer::default(),
            Cursor::new(messages.as_bytes().to_vec()),
            &mut replies,
        );
        let result = client.run();
        let player = client.into_player();

        (result, player, String::from_utf8(replies).unwrap())
    }

    #[test]
    fn notifications_get_no_reply() {
        let (result, player, replies) = run(
            "INIT_PLAYERS 0 QWRh,Q2hhcmxlcw==\nRECEIVE_INFO QWRhIHdpbGwgcGxheSBmaXJzdC4=\nSET_INITIAL_TICKETS 0,1,2,3,4\n",
        );

        assert!(result.is_ok());
        assert_eq!(
            player.calls,
            vec![
                "init PLAYER_1 Ada Charles",
                "info Ada will play first.",
                "tickets 5"
            ]
        );
        assert_eq!(replies, "");
    }

    #[test]
    fn queries_get_one_line_replies() {
        let (result, _, replies) =
            run("NEXT_TURN\nDRAW_SLOT\nCARDS\nCHOOSE_INITIAL_TICKETS\nCHOOSE_ADDITIONAL_CARDS 1,8;8,8\nCHOOSE_TICKETS 30\n");

        assert!(result.is_ok());
        assert_eq!(replies, "1\n3\n1,1\n\n8,8\n30\n");
    }

    #[test]
    fn player_error_stops_the_client() {
        let (result, _, replies) = run("ROUTE\nNEXT_TURN\n");

        match result {
            Err(ProtocolError::Player(message)) => assert_eq!(message, "No route to claim."),
            other => panic!("Unexpected result: {:?}", other),
        }
        assert_eq!(replies, "");
    }

    #[test]
    fn unknown_message_is_malformed() {
        let (result, _, _) = run("HELLO 1 2\n");

        assert!(matches!(result, Err(ProtocolError::Malformed(_))));
    }

    #[test]
    fn missing_argument_is_malformed() {
        let (result, _, _) = run("RECEIVE_INFO\n");

        assert!(matches!(result, Err(ProtocolError::Malformed(_))));
    }
}
