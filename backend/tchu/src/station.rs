use serde_repr::{Deserialize_repr, Serialize_repr};
#[allow(unused_imports)]
use strum::EnumCount;
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};

/// All the stations on the map.
///
/// A station's id is its position in this enumeration, and indexes connectivity structures.
///
/// # JSON
/// Stations are serialized as an 8-bit unsigned integer.
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
    IntoStaticStr,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize_repr,
)]
#[repr(u8)]
pub enum Station {
    Atlanta = 0,
    Boston = 1,
    Calgary = 2,
    Charleston = 3,
    Chicago = 4,
    Dallas = 5,
    Denver = 6,
    Duluth = 7,
    #[strum(serialize = "El Paso")]
    ElPaso = 8,
    Helena = 9,
    Houston = 10,
    #[strum(serialize = "Kansas City")]
    KansasCity = 11,
    #[strum(serialize = "Las Vegas")]
    LasVegas = 12,
    #[strum(serialize = "Little Rock")]
    LittleRock = 13,
    #[strum(serialize = "Los Angeles")]
    LosAngeles = 14,
    Miami = 15,
    #[strum(serialize = "Montréal")]
    Montreal = 16,
    Nashville = 17,
    #[strum(serialize = "New Orleans")]
    NewOrleans = 18,
    #[strum(serialize = "New York")]
    NewYork = 19,
    #[strum(serialize = "Oklahoma City")]
    OklahomaCity = 20,
    Omaha = 21,
    Phoenix = 22,
    Pittsburgh = 23,
    Portland = 24,
    Raleigh = 25,
    #[strum(serialize = "Saint Louis")]
    SaintLouis = 26,
    #[strum(serialize = "Salt Lake City")]
    SaltLakeCity = 27,
    #[strum(serialize = "San Francisco")]
    SanFrancisco = 28,
    #[strum(serialize = "Santa Fe")]
    SantaFe = 29,
    #[strum(serialize = "Sault St. Marie")]
    SaultStMarie = 30,
    Seattle = 31,
    Toronto = 32,
    Vancouver = 33,
    Washington = 34,
    Winnipeg = 35,
}

impl Station {
    #[inline]
    pub fn id(&self) -> usize {
        *self as usize
    }

    /// The displayed name of the station, e.g. `"Salt Lake City"`.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.into()
    }
}
