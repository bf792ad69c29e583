use im::OrdMap;
use serde::{Serialize, Serializer};
use std::cmp::min;
use std::collections::BTreeSet;
use std::iter::{repeat, FromIterator};

/// An immutable multiset, whose elements are always enumerated in ascending order.
///
/// Elements are stored with their multiplicity in a persistent ordered map, so that
/// deriving a new bag (e.g. through [`SortedBag::union`]) shares most of its structure
/// with the bag it was derived from.
///
/// # JSON
/// A bag is serialized as the sorted list of its elements, each repeated by its multiplicity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortedBag<T: Ord + Clone> {
    counts: OrdMap<T, usize>,
    size: usize,
}

impl<T: Ord + Clone> SortedBag<T> {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self {
            counts: OrdMap::new(),
            size: 0,
        }
    }

    /// Creates a bag holding `count` copies of `element`.
    ///
    /// # Example
    /// ```
    /// use tchu::sorted_bag::SortedBag;
    ///
    /// let bag = SortedBag::of_n(3, 'a');
    /// assert_eq!(bag.size(), 3);
    /// assert_eq!(bag.count_of(&'a'), 3);
    /// ```
    pub fn of_n(count: usize, element: T) -> Self {
        Self::new().with_added(element, count)
    }

    /// Creates a bag holding `count1` copies of `element1` and `count2` copies of `element2`.
    pub fn of_pair(count1: usize, element1: T, count2: usize, element2: T) -> Self {
        Self::of_n(count1, element1).with_added(element2, count2)
    }

    /// Creates a bag holding a single element.
    pub fn of(element: T) -> Self {
        Self::of_n(1, element)
    }

    /// Starts building a bag one element at a time.
    pub fn builder() -> SortedBagBuilder<T> {
        SortedBagBuilder {
            bag: Self::new(),
        }
    }

    fn with_added(mut self, element: T, count: usize) -> Self {
        if count == 0 {
            return self;
        }

        let current = self.counts.get(&element).copied().unwrap_or(0);
        self.counts.insert(element, current + count);
        self.size += count;
        self
    }

    /// Total number of elements, counting duplicates.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// How many copies of `element` this bag holds (0 if absent).
    pub fn count_of(&self, element: &T) -> usize {
        self.counts.get(element).copied().unwrap_or(0)
    }

    /// The distinct elements of this bag, in ascending order.
    pub fn to_set(&self) -> BTreeSet<T> {
        self.counts.keys().cloned().collect()
    }

    /// All elements of this bag in ascending order, repeated by multiplicity.
    pub fn to_list(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Iterates over all elements in ascending order, repeated by multiplicity.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.counts
            .iter()
            .flat_map(|(element, count)| repeat(element).take(*count))
    }

    /// Iterates over the distinct elements and their multiplicity, in ascending order.
    pub fn entries(&self) -> impl Iterator<Item = (&T, usize)> + '_ {
        self.counts.iter().map(|(element, count)| (element, *count))
    }

    /// The bag holding the elements of both bags, multiplicities added up.
    ///
    /// # Example
    /// ```
    /// use tchu::sorted_bag::SortedBag;
    ///
    /// let bag = SortedBag::of_n(2, 1).union(&SortedBag::of_pair(1, 1, 4, 2));
    /// assert_eq!(bag.count_of(&1), 3);
    /// assert_eq!(bag.count_of(&2), 4);
    /// ```
    pub fn union(&self, other: &Self) -> Self {
        other
            .entries()
            .fold(self.clone(), |bag, (element, count)| {
                bag.with_added(element.clone(), count)
            })
    }

    /// The bag holding the elements of this bag, minus those of `other`.
    ///
    /// Multiplicities are subtracted, never going below zero.
    pub fn difference(&self, other: &Self) -> Self {
        let mut difference = self.clone();

        for (element, count) in other.entries() {
            let current = difference.count_of(element);
            let removed = min(current, count);
            if removed == 0 {
                continue;
            }

            if removed == current {
                difference.counts.remove(element);
            } else {
                difference.counts.insert(element.clone(), current - removed);
            }
            difference.size -= removed;
        }

        difference
    }

    /// Whether `other` is included in this bag, multiplicities included.
    pub fn contains(&self, other: &Self) -> bool {
        other
            .entries()
            .all(|(element, count)| self.count_of(element) >= count)
    }

    /// Every distinct sub-bag of exactly `size` elements.
    ///
    /// Sub-bags are listed in a fixed order: smaller elements are taken as many times as possible first.
    /// Fails if `size` is larger than this bag.
    ///
    /// # Example
    /// ```
    /// use tchu::sorted_bag::SortedBag;
    ///
    /// let bag = SortedBag::of_pair(2, 'a', 1, 'b');
    /// let subsets = bag.subsets_of_size(2).unwrap();
    ///
    /// assert_eq!(
    ///     subsets,
    ///     vec![SortedBag::of_n(2, 'a'), SortedBag::of_pair(1, 'a', 1, 'b')]
    /// );
    /// ```
    pub fn subsets_of_size(&self, size: usize) -> Result<Vec<Self>, String> {
        if size > self.size {
            return Err(format!(
                "Cannot pick {} elements out of a bag of {}.",
                size, self.size
            ));
        }

        let entries: Vec<(T, usize)> = self
            .entries()
            .map(|(element, count)| (element.clone(), count))
            .collect();
        let mut subsets = Vec::new();
        Self::extend_subsets(&entries, size, Self::new(), &mut subsets);

        Ok(subsets)
    }

    fn extend_subsets(
        entries: &[(T, usize)],
        remaining: usize,
        partial: Self,
        subsets: &mut Vec<Self>,
    ) {
        if remaining == 0 {
            subsets.push(partial);
            return;
        }

        let available: usize = entries.iter().map(|(_, count)| count).sum();
        if available < remaining {
            return;
        }

        if let Some(((element, count), rest)) = entries.split_first() {
            for taken in (0..=min(*count, remaining)).rev() {
                Self::extend_subsets(
                    rest,
                    remaining - taken,
                    partial.clone().with_added(element.clone(), taken),
                    subsets,
                );
            }
        }
    }
}

impl<T: Ord + Clone> Default for SortedBag<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> FromIterator<T> for SortedBag<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut builder = Self::builder();
        for element in iter {
            builder.add(element);
        }
        builder.build()
    }
}

impl<T: Ord + Clone + Serialize> Serialize for SortedBag<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Accumulates elements before freezing them into a [`SortedBag`].
#[derive(Debug)]
pub struct SortedBagBuilder<T: Ord + Clone> {
    bag: SortedBag<T>,
}

impl<T: Ord + Clone> SortedBagBuilder<T> {
    pub fn add(&mut self, element: T) -> &mut Self {
        self.add_n(1, element)
    }

    pub fn add_n(&mut self, count: usize, element: T) -> &mut Self {
        let bag = std::mem::take(&mut self.bag);
        self.bag = bag.with_added(element, count);
        self
    }

    pub fn add_all(&mut self, bag: &SortedBag<T>) -> &mut Self {
        self.bag = self.bag.union(bag);
        self
    }

    /// Number of elements added so far.
    pub fn size(&self) -> usize {
        self.bag.size()
    }

    pub fn build(&mut self) -> SortedBag<T> {
        self.bag.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag_of(elements: &[u8]) -> SortedBag<u8> {
        elements.iter().copied().collect()
    }

    #[test]
    fn empty_bag() {
        let bag: SortedBag<u8> = SortedBag::new();

        assert!(bag.is_empty());
        assert_eq!(bag.size(), 0);
        assert_eq!(bag.count_of(&3), 0);
        assert!(bag.to_list().is_empty());
    }

    #[test]
    fn bag_is_sorted() {
        let bag = bag_of(&[5, 1, 3, 1, 5, 5]);

        assert_eq!(bag.to_list(), vec![1, 1, 3, 5, 5, 5]);
        assert_eq!(bag.to_set().into_iter().collect::<Vec<_>>(), vec![1, 3, 5]);
        assert_eq!(bag.size(), 6);
    }

    #[test]
    fn union_adds_counts() {
        let a = bag_of(&[1, 2, 2, 7]);
        let b = bag_of(&[2, 3, 7, 7]);
        let union = a.union(&b);

        for x in 0..10 {
            assert_eq!(union.count_of(&x), a.count_of(&x) + b.count_of(&x));
        }
        assert_eq!(union.size(), a.size() + b.size());
    }

    #[test]
    fn difference_with_itself_is_empty() {
        let a = bag_of(&[4, 4, 2, 9]);

        assert!(a.difference(&a).is_empty());
    }

    #[test]
    fn difference_is_multiplicity_aware() {
        let a = bag_of(&[1, 1, 1, 2, 3]);
        let b = bag_of(&[1, 3, 3, 8]);

        assert_eq!(a.difference(&b), bag_of(&[1, 1, 2]));
        assert_eq!(b.difference(&a), bag_of(&[3, 8]));
    }

    #[test]
    fn bag_contains_itself() {
        let a = bag_of(&[6, 6, 0]);

        assert!(a.contains(&a));
        assert!(a.contains(&SortedBag::new()));
    }

    #[test]
    fn bag_contains_counts_multiplicity() {
        let a = bag_of(&[1, 1, 2]);

        assert!(a.contains(&bag_of(&[1, 2])));
        assert!(!a.contains(&bag_of(&[1, 1, 1])));
        assert!(!a.contains(&bag_of(&[3])));
    }

    #[test]
    fn subsets_of_distinct_elements() {
        let bag = bag_of(&[1, 2, 3, 4, 5]);
        let subsets = bag.subsets_of_size(2).unwrap();

        // C(5, 2)
        assert_eq!(subsets.len(), 10);
        for subset in &subsets {
            assert_eq!(subset.size(), 2);
            assert!(bag.contains(subset));
        }
    }

    #[test]
    fn subsets_with_duplicates_collapse() {
        let bag = bag_of(&[1, 1, 1, 2]);
        let subsets = bag.subsets_of_size(2).unwrap();

        assert_eq!(subsets, vec![bag_of(&[1, 1]), bag_of(&[1, 2])]);
    }

    #[test]
    fn subsets_of_size_zero_and_full() {
        let bag = bag_of(&[3, 3, 4]);

        assert_eq!(bag.subsets_of_size(0), Ok(vec![SortedBag::new()]));
        assert_eq!(bag.subsets_of_size(3), Ok(vec![bag.clone()]));
    }

    #[test]
    fn subsets_of_size_too_large() {
        assert!(bag_of(&[1, 2]).subsets_of_size(3).is_err());
    }

    #[test]
    fn builder_accumulates() {
        let mut builder = SortedBag::builder();
        builder.add(3).add_n(2, 1).add_all(&bag_of(&[3, 9]));

        assert_eq!(builder.size(), 5);
        assert_eq!(builder.build(), bag_of(&[1, 1, 3, 3, 9]));
    }

    #[test]
    fn bag_to_json() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&bag_of(&[2, 1, 2]))?, "[1,2,2]");
        Ok(())
    }
}
