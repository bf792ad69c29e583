use crate::card::Card;
use crate::deck::Deck;
use crate::sorted_bag::SortedBag;

use rand::Rng;
use serde::Serialize;
use std::ops::Deref;

/// How many cards are openly displayed at all times.
pub const FACE_UP_CARDS_COUNT: usize = 5;

/// Information about the cards that is visible to all players.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PublicCardState {
    face_up_cards: [Card; FACE_UP_CARDS_COUNT],
    deck_size: usize,
    discards_size: usize,
}

impl PublicCardState {
    /// Fails unless exactly five face-up cards are given.
    pub fn new(face_up_cards: &[Card], deck_size: usize, discards_size: usize) -> Result<Self, String> {
        let face_up_cards = array_init::from_iter(face_up_cards.iter().copied())
            .filter(|_| face_up_cards.len() == FACE_UP_CARDS_COUNT)
            .ok_or_else(|| {
                format!(
                    "Expected {} face-up cards, got {}.",
                    FACE_UP_CARDS_COUNT,
                    face_up_cards.len()
                )
            })?;

        Ok(Self {
            face_up_cards,
            deck_size,
            discards_size,
        })
    }

    pub fn face_up_cards(&self) -> &[Card; FACE_UP_CARDS_COUNT] {
        &self.face_up_cards
    }

    /// The face-up card at `slot`, from 0 to 4.
    pub fn face_up_card(&self, slot: usize) -> Result<Card, String> {
        self.face_up_cards.get(slot).copied().ok_or_else(|| {
            format!(
                "Face-up card looked up at slot {} is out of bounds (size {}).",
                slot, FACE_UP_CARDS_COUNT
            )
        })
    }

    #[inline]
    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    #[inline]
    pub fn is_deck_empty(&self) -> bool {
        self.deck_size == 0
    }

    #[inline]
    pub fn discards_size(&self) -> usize {
        self.discards_size
    }
}

/// The whole state of the cards that are not in a player's hand.
///
/// Dereferences to its [`PublicCardState`], the only part other players may see.
#[derive(Clone, Debug, PartialEq)]
pub struct CardState {
    public: PublicCardState,
    deck: Deck<Card>,
    discards: SortedBag<Card>,
}

impl CardState {
    /// Turns the five top cards of `deck` face up, leaving the rest as the draw pile.
    pub fn of(deck: &Deck<Card>) -> Result<Self, String> {
        if deck.size() < FACE_UP_CARDS_COUNT {
            return Err(format!(
                "A deck of {} cards cannot fill {} face-up slots.",
                deck.size(),
                FACE_UP_CARDS_COUNT
            ));
        }

        let mut face_up_cards = Vec::with_capacity(FACE_UP_CARDS_COUNT);
        let mut remaining = deck.clone();
        for _ in 0..FACE_UP_CARDS_COUNT {
            face_up_cards.push(remaining.top_card()?);
            remaining = remaining.without_top_card()?;
        }

        Self::assemble(&face_up_cards, remaining, SortedBag::new())
    }

    fn assemble(
        face_up_cards: &[Card],
        deck: Deck<Card>,
        discards: SortedBag<Card>,
    ) -> Result<Self, String> {
        Ok(Self {
            public: PublicCardState::new(face_up_cards, deck.size(), discards.size())?,
            deck,
            discards,
        })
    }

    /// The public projection of this state.
    pub fn public(&self) -> &PublicCardState {
        &self.public
    }

    /// Replaces the face-up card at `slot` with the top card of the deck.
    pub fn with_drawn_face_up_card(&self, slot: usize) -> Result<Self, String> {
        self.face_up_card(slot)?;
        let replacement = self.deck.top_card()?;

        let mut face_up_cards = self.face_up_cards().to_vec();
        face_up_cards[slot] = replacement;

        Self::assemble(
            &face_up_cards,
            self.deck.without_top_card()?,
            self.discards.clone(),
        )
    }

    /// The card on top of the draw pile.
    pub fn top_deck_card(&self) -> Result<Card, String> {
        self.deck.top_card()
    }

    /// The same state, without the card on top of the draw pile.
    pub fn without_top_deck_card(&self) -> Result<Self, String> {
        Self::assemble(
            self.face_up_cards(),
            self.deck.without_top_card()?,
            self.discards.clone(),
        )
    }

    /// Shuffles the discards into a new draw pile.
    ///
    /// Fails unless the draw pile is empty.
    pub fn with_deck_recreated_from_discards<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Self, String> {
        if !self.deck.is_empty() {
            return Err(format!(
                "Cannot recreate the deck while it still holds {} cards.",
                self.deck.size()
            ));
        }

        Self::assemble(
            self.face_up_cards(),
            Deck::of(&self.discards, rng),
            SortedBag::new(),
        )
    }

    pub fn with_more_discarded_cards(&self, cards: &SortedBag<Card>) -> Self {
        Self {
            public: PublicCardState {
                discards_size: self.discards.size() + cards.size(),
                ..self.public.clone()
            },
            deck: self.deck.clone(),
            discards: self.discards.union(cards),
        }
    }
}

impl Deref for CardState {
    type Target = PublicCardState;

    fn deref(&self) -> &Self::Target {
        &self.public
    }
}
