use crate::sorted_bag::SortedBag;

use serde_repr::{Deserialize_repr, Serialize_repr};
#[allow(unused_imports)]
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

/// How many cards of each color the game starts with.
pub const CARDS_PER_COLOR: usize = 12;
/// How many locomotive cards the game starts with.
pub const LOCOMOTIVE_CARDS: usize = 14;

/// The colors of cars and routes.
///
/// # JSON
/// Colors are serialized as their 8-bit ordinal, in declaration order.
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
#[strum(serialize_all = "lowercase")]
pub enum Color {
    Black = 0,
    Violet = 1,
    Blue = 2,
    Green = 3,
    Yellow = 4,
    Orange = 5,
    Red = 6,
    White = 7,
}

/// Represents the different variants of cards: one car card per color, plus the locomotive.
///
/// # JSON
/// Cards are serialized as their 8-bit ordinal, in declaration order.
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
#[strum(serialize_all = "lowercase")]
pub enum Card {
    Black = 0,
    Violet = 1,
    Blue = 2,
    Green = 3,
    Yellow = 4,
    Orange = 5,
    Red = 6,
    White = 7,
    /// Matches with any color.
    Locomotive = 8,
}

impl Card {
    /// The car card of the given color.
    ///
    /// # Example
    /// ```
    /// use tchu::card::{Card, Color};
    ///
    /// assert_eq!(Card::of(Color::Violet), Card::Violet);
    /// assert_eq!(Card::of(Color::White).color(), Some(Color::White));
    /// ```
    pub fn of(color: Color) -> Self {
        match color {
            Color::Black => Card::Black,
            Color::Violet => Card::Violet,
            Color::Blue => Card::Blue,
            Color::Green => Card::Green,
            Color::Yellow => Card::Yellow,
            Color::Orange => Card::Orange,
            Color::Red => Card::Red,
            Color::White => Card::White,
        }
    }

    /// The color of a car card, `None` for the locomotive.
    pub fn color(&self) -> Option<Color> {
        Color::iter().find(|color| Card::of(*color) == *self)
    }

    #[inline]
    pub fn is_locomotive(&self) -> bool {
        *self == Card::Locomotive
    }

    /// Every card of a full game: 12 cards per color and 14 locomotives.
    pub fn all() -> SortedBag<Card> {
        let mut builder = SortedBag::builder();
        for color in Color::iter() {
            builder.add_n(CARDS_PER_COLOR, Card::of(color));
        }
        builder.add_n(LOCOMOTIVE_CARDS, Card::Locomotive);

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_count() {
        assert_eq!(Color::COUNT, 8);
        assert_eq!(Card::COUNT, 9);
    }

    #[test]
    fn card_to_string() {
        assert_eq!(Card::Violet.to_string(), "violet");
        assert_eq!(Card::Locomotive.to_string(), "locomotive");
        assert_eq!(Color::Orange.to_string(), "orange");
    }

    #[test]
    fn card_to_json() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&Card::Black)?, "0");
        assert_eq!(serde_json::to_string(&Card::Locomotive)?, "8");
        assert_eq!(serde_json::to_string(&Color::White)?, "7");
        Ok(())
    }

    #[test]
    fn json_to_card() -> serde_json::Result<()> {
        assert_eq!(serde_json::from_str::<Card>("4")?, Card::Yellow);
        assert_eq!(serde_json::from_str::<Color>("1")?, Color::Violet);
        Ok(())
    }

    #[test]
    fn invalid_json_to_card() {
        assert!(serde_json::from_str::<Card>("9").is_err());
        assert!(serde_json::from_str::<Color>("8").is_err());
    }

    #[test]
    fn card_color_round_trip() {
        for color in Color::iter() {
            assert_eq!(Card::of(color).color(), Some(color));
        }
        assert_eq!(Card::Locomotive.color(), None);
    }

    #[test]
    fn cards_follow_color_order() {
        let cards: Vec<Card> = Card::iter().collect();
        let colors: Vec<Card> = Color::iter().map(Card::of).collect();

        assert_eq!(&cards[..Color::COUNT], &colors[..]);
        assert_eq!(cards[Color::COUNT], Card::Locomotive);
    }

    #[test]
    fn all_cards() {
        let all = Card::all();

        assert_eq!(all.size(), 110);
        assert_eq!(all.count_of(&Card::Locomotive), 14);
        assert_eq!(all.count_of(&Card::Green), 12);
    }
}
