use crate::station::Station;

use serde::Serialize;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// Answers whether two stations are linked by a player's network.
pub trait StationConnectivity {
    fn connected(&self, station1: Station, station2: Station) -> bool;
}

/// One way of fulfilling a ticket: linking `from` to `to`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Trip {
    pub from: Station,
    pub to: Station,
    pub points: u32,
}

impl Trip {
    pub fn new(from: Station, to: Station, points: u32) -> Result<Self, String> {
        if points == 0 {
            return Err(format!(
                "A trip from {} to {} must be worth some points.",
                from, to
            ));
        }

        Ok(Self { from, to, points })
    }

    /// Every trip from one of `from` to one of `to`, all worth `points`.
    pub fn all(from: &[Station], to: &[Station], points: u32) -> Result<Vec<Self>, String> {
        if from.is_empty() || to.is_empty() {
            return Err(String::from(
                "Trips need at least one departure and one arrival station.",
            ));
        }

        from.iter()
            .flat_map(|from| to.iter().map(move |to| Self::new(*from, *to, points)))
            .collect()
    }

    /// Points granted for this trip: positive if both stations are connected, negative otherwise.
    pub fn points(&self, connectivity: &impl StationConnectivity) -> i32 {
        if connectivity.connected(self.from, self.to) {
            self.points as i32
        } else {
            -(self.points as i32)
        }
    }
}

/// A destination ticket, made of one or several trips leaving from the same place.
///
/// Tickets are compared and ordered through their text.
#[derive(Clone, Debug, Serialize)]
pub struct Ticket {
    trips: SmallVec<[Trip; 1]>,
    text: String,
}

impl Ticket {
    /// Builds a ticket out of trips that all leave from a station with the same name.
    ///
    /// # Example
    /// ```
    /// use tchu::station::Station;
    /// use tchu::ticket::{Ticket, Trip};
    ///
    /// let ticket = Ticket::new(vec![
    ///     Trip::new(Station::Seattle, Station::NewYork, 22).unwrap(),
    ///     Trip::new(Station::Seattle, Station::Miami, 26).unwrap(),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(ticket.text(), "Seattle - {Miami (26), New York (22)}");
    /// ```
    pub fn new(trips: Vec<Trip>) -> Result<Self, String> {
        let from = match trips.first() {
            Some(trip) => trip.from.name(),
            None => return Err(String::from("A ticket needs at least one trip.")),
        };

        if let Some(trip) = trips.iter().find(|trip| trip.from.name() != from) {
            return Err(format!(
                "All trips of a ticket must leave from {}, not {}.",
                from, trip.from
            ));
        }

        Ok(Self::from_trips(trips))
    }

    /// Builds a ticket out of trips already known to be valid.
    pub(crate) fn from_trips(trips: Vec<Trip>) -> Self {
        let from = trips.first().map(|trip| trip.from.name()).unwrap_or_default();
        let text = Self::compute_text(from, &trips);

        Self {
            trips: trips.into(),
            text,
        }
    }

    fn compute_text(from: &str, trips: &[Trip]) -> String {
        let destinations: BTreeSet<String> = trips
            .iter()
            .map(|trip| format!("{} ({})", trip.to.name(), trip.points))
            .collect();

        let destinations: Vec<String> = destinations.into_iter().collect();
        if destinations.len() == 1 {
            format!("{} - {}", from, destinations[0])
        } else {
            format!("{} - {{{}}}", from, destinations.join(", "))
        }
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Best score among the trips of this ticket.
    pub fn points(&self, connectivity: &impl StationConnectivity) -> i32 {
        self.trips
            .iter()
            .map(|trip| trip.points(connectivity))
            .max()
            .unwrap_or(0)
    }
}

impl PartialEq for Ticket {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Ticket {}

impl PartialOrd for Ticket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ticket {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
