use crate::station::Station;
use crate::ticket::StationConnectivity;

/// A flattened partition of stations into connected components.
///
/// Each entry maps a station id to the representative of its component, so that
/// [`StationPartition::connected`] is a constant-time lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct StationPartition {
    representatives: Vec<usize>,
}

impl StationPartition {
    /// Starts a partition where each of the first `station_count` stations is alone in its component.
    pub fn builder(station_count: usize) -> StationPartitionBuilder {
        StationPartitionBuilder {
            parents: (0..station_count).collect(),
        }
    }
}

impl StationConnectivity for StationPartition {
    /// Stations outside of the partition are only connected to themselves.
    fn connected(&self, station1: Station, station2: Station) -> bool {
        match (
            self.representatives.get(station1.id()),
            self.representatives.get(station2.id()),
        ) {
            (Some(representative1), Some(representative2)) => representative1 == representative2,
            _ => station1 == station2,
        }
    }
}

/// Union-find structure used to build a [`StationPartition`].
#[derive(Debug)]
pub struct StationPartitionBuilder {
    parents: Vec<usize>,
}

impl StationPartitionBuilder {
    fn representative(&self, mut id: usize) -> usize {
        while self.parents[id] != id {
            id = self.parents[id];
        }
        id
    }

    /// Joins the components of both stations.
    ///
    /// The partition grows if either station lies beyond its current size.
    pub fn connect(&mut self, station1: Station, station2: Station) -> &mut Self {
        let required = station1.id().max(station2.id()) + 1;
        if required > self.parents.len() {
            let current = self.parents.len();
            self.parents.extend(current..required);
        }

        let representative1 = self.representative(station1.id());
        let representative2 = self.representative(station2.id());
        self.parents[representative1] = representative2;

        self
    }

    /// Flattens every station to its representative.
    pub fn build(&self) -> StationPartition {
        StationPartition {
            representatives: (0..self.parents.len())
                .map(|id| self.representative(id))
                .collect(),
        }
    }
}
