use crate::card::Card;
use crate::route::Route;
use crate::sorted_bag::SortedBag;
use crate::trail::Trail;

/// Builds the messages describing what a given player did, as broadcast to both players.
#[derive(Clone, Debug)]
pub struct Info {
    player_name: String,
}

fn plural(count: usize) -> &'static str {
    if count > 1 {
        "s"
    } else {
        ""
    }
}

fn join_with_and(parts: &[String]) -> String {
    match parts.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}

fn route_name(route: &Route) -> String {
    format!("{} - {}", route.station1().name(), route.station2().name())
}

fn cards_name(cards: &SortedBag<Card>) -> String {
    let parts: Vec<String> = cards
        .entries()
        .map(|(card, count)| format!("{} {}", count, Info::card_name(*card, count)))
        .collect();

    join_with_and(&parts)
}

impl Info {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
        }
    }

    /// The name of `card`, in the plural if `count` is above 1.
    ///
    /// # Example
    /// ```
    /// use tchu::card::Card;
    /// use tchu::info::Info;
    ///
    /// assert_eq!(Info::card_name(Card::Locomotive, 1), "locomotive");
    /// assert_eq!(Info::card_name(Card::Violet, 3), "violets");
    /// ```
    pub fn card_name(card: Card, count: usize) -> String {
        format!("{}{}", card, plural(count))
    }

    /// Announces a draw between all `player_names`, who each scored `points`.
    pub fn draw(player_names: &[String], points: i32) -> String {
        format!(
            "{} are tied with {} point{}!",
            join_with_and(player_names),
            points,
            plural(points.unsigned_abs() as usize)
        )
    }

    pub fn will_play_first(&self) -> String {
        format!("{} will play first.", self.player_name)
    }

    pub fn kept_tickets(&self, count: usize) -> String {
        format!("{} kept {} ticket{}.", self.player_name, count, plural(count))
    }

    pub fn can_play(&self) -> String {
        format!("It is {}'s turn to play.", self.player_name)
    }

    pub fn drew_tickets(&self, count: usize) -> String {
        format!("{} drew {} ticket{}...", self.player_name, count, plural(count))
    }

    pub fn drew_blind_card(&self) -> String {
        format!("{} drew a card from the deck.", self.player_name)
    }

    pub fn drew_visible_card(&self, card: Card) -> String {
        format!(
            "{} drew a face-up {} card.",
            self.player_name,
            Self::card_name(card, 1)
        )
    }

    pub fn claimed_route(&self, route: &Route, cards: &SortedBag<Card>) -> String {
        format!(
            "{} claimed the {} route with {}.",
            self.player_name,
            route_name(route),
            cards_name(cards)
        )
    }

    pub fn attempts_tunnel_claim(&self, route: &Route, initial_cards: &SortedBag<Card>) -> String {
        format!(
            "{} attempts to claim the {} tunnel with {}!",
            self.player_name,
            route_name(route),
            cards_name(initial_cards)
        )
    }

    /// Describes the three cards drawn while claiming a tunnel, and what they add to the cost.
    pub fn drew_additional_cards(&self, drawn_cards: &SortedBag<Card>, additional_cost: usize) -> String {
        let cost = if additional_cost == 0 {
            String::from("They do not add to the cost.")
        } else {
            format!(
                "They add {} card{} to the cost.",
                additional_cost,
                plural(additional_cost)
            )
        };

        format!("The additional cards are {}. {}", cards_name(drawn_cards), cost)
    }

    pub fn did_not_claim_route(&self, route: &Route) -> String {
        format!(
            "{} did not (or could not) claim the {} route.",
            self.player_name,
            route_name(route)
        )
    }

    pub fn last_turn_begins(&self, car_count: u8) -> String {
        format!(
            "{} has only {} car{} left, the last turn begins!",
            self.player_name,
            car_count,
            plural(car_count as usize)
        )
    }

    pub fn gets_longest_trail_bonus(&self, longest_trail: &Trail) -> String {
        format!(
            "{} gets the bonus for the longest trail, {}.",
            self.player_name, longest_trail
        )
    }

    pub fn won(&self, points: i32, loser_points: i32) -> String {
        format!(
            "{} wins with {} point{}, against {} point{}!",
            self.player_name,
            points,
            plural(points.unsigned_abs() as usize),
            loser_points,
            plural(loser_points.unsigned_abs() as usize)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::map;

    #[test]
    fn cards_are_listed_by_kind() {
        let cards = SortedBag::of_pair(2, Card::Red, 1, Card::Locomotive)
            .union(&SortedBag::of(Card::Blue));

        assert_eq!(cards_name(&cards), "1 blue, 2 reds and 1 locomotive");
        assert_eq!(cards_name(&SortedBag::of_n(3, Card::White)), "3 whites");
    }

    #[test]
    fn claimed_route_message() {
        let info = Info::new("Ada");
        let route = map::route_by_id("DEN_SFE").unwrap();

        assert_eq!(
            info.claimed_route(&route, &SortedBag::of_pair(1, Card::Green, 1, Card::Locomotive)),
            "Ada claimed the Denver - Santa Fe route with 1 green and 1 locomotive."
        );
        assert_eq!(
            info.did_not_claim_route(&route),
            "Ada did not (or could not) claim the Denver - Santa Fe route."
        );
    }

    #[test]
    fn additional_cost_message() {
        let info = Info::new("Charles");
        let drawn = SortedBag::of_pair(2, Card::Black, 1, Card::Orange);

        assert_eq!(
            info.drew_additional_cards(&drawn, 0),
            "The additional cards are 2 blacks and 1 orange. They do not add to the cost."
        );
        assert_eq!(
            info.drew_additional_cards(&drawn, 2),
            "The additional cards are 2 blacks and 1 orange. They add 2 cards to the cost."
        );
    }

    #[test]
    fn plurals() {
        let info = Info::new("Ada");

        assert_eq!(info.kept_tickets(1), "Ada kept 1 ticket.");
        assert_eq!(info.kept_tickets(3), "Ada kept 3 tickets.");
        assert_eq!(
            info.last_turn_begins(1),
            "Ada has only 1 car left, the last turn begins!"
        );
        assert_eq!(
            info.won(72, -3),
            "Ada wins with 72 points, against -3 points!"
        );
    }

    #[test]
    fn draw_message() {
        let names = [String::from("Ada"), String::from("Charles")];

        assert_eq!(Info::draw(&names, 50), "Ada and Charles are tied with 50 points!");
    }
}
