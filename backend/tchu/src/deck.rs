use crate::sorted_bag::SortedBag;

use im::Vector;
use rand::seq::SliceRandom;
use rand::Rng;

/// An immutable shuffled pile of elements, drawn from the top.
///
/// The order is fixed once, when the deck is built: drawing never reshuffles.
#[derive(Clone, Debug, PartialEq)]
pub struct Deck<T: Ord + Clone> {
    elements: Vector<T>,
}

impl<T: Ord + Clone> Deck<T> {
    /// Builds a deck holding all elements of `bag`, in a random order picked by `rng`.
    ///
    /// # Example
    /// ```
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    /// use tchu::deck::Deck;
    /// use tchu::sorted_bag::SortedBag;
    ///
    /// let bag = SortedBag::of_pair(3, 'x', 2, 'y');
    /// let deck = Deck::of(&bag, &mut StdRng::seed_from_u64(7));
    ///
    /// assert_eq!(deck.size(), 5);
    /// assert_eq!(deck.top_cards(5), Ok(bag));
    /// ```
    pub fn of<R: Rng + ?Sized>(bag: &SortedBag<T>, rng: &mut R) -> Self {
        let mut elements = bag.to_list();
        elements.shuffle(rng);

        Self {
            elements: Vector::from(elements),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The element on top of the deck.
    pub fn top_card(&self) -> Result<T, String> {
        self.elements
            .front()
            .cloned()
            .ok_or_else(|| String::from("Cannot look at the top of an empty deck."))
    }

    /// The same deck, without its top element.
    pub fn without_top_card(&self) -> Result<Self, String> {
        self.without_top_cards(1)
    }

    /// The `count` elements on top of the deck.
    ///
    /// Fails unless `count` is between 1 and the size of the deck.
    pub fn top_cards(&self, count: usize) -> Result<SortedBag<T>, String> {
        self.check_count(count)?;

        Ok(self.elements.iter().take(count).cloned().collect())
    }

    /// The same deck, without its `count` top elements.
    ///
    /// Fails unless `count` is between 1 and the size of the deck.
    pub fn without_top_cards(&self, count: usize) -> Result<Self, String> {
        self.check_count(count)?;

        Ok(Self {
            elements: self.elements.skip(count),
        })
    }

    #[inline]
    fn check_count(&self, count: usize) -> Result<(), String> {
        if count == 0 || count > self.size() {
            return Err(format!(
                "Cannot draw {} elements from a deck of {}.",
                count,
                self.size()
            ));
        }

        Ok(())
    }
}
