use parse_display::{Display, FromStr};

/// The first token of every line sent by the server, naming the [`tchu::player::Player`] method to call.
#[derive(Clone, Copy, Debug, Display, Eq, FromStr, Hash, PartialEq)]
#[display(style = "SNAKE_CASE")]
pub enum MessageId {
    InitPlayers,
    ReceiveInfo,
    UpdateState,
    SetInitialTickets,
    ChooseInitialTickets,
    NextTurn,
    ChooseTickets,
    DrawSlot,
    Route,
    Cards,
    ChooseAdditionalCards,
}

impl MessageId {
    /// Whether the client must answer this message with a line of its own.
    pub fn expects_reply(&self) -> bool {
        !matches!(
            self,
            MessageId::InitPlayers
                | MessageId::ReceiveInfo
                | MessageId::UpdateState
                | MessageId::SetInitialTickets
        )
    }
}
