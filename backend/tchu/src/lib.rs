pub mod card;
pub mod card_state;
pub mod channel_player;
pub mod deck;
pub mod game;
pub mod game_state;
pub mod info;
pub mod map;
pub mod player;
pub mod player_state;
pub mod route;
pub mod sorted_bag;
pub mod station;
pub mod station_partition;
pub mod ticket;
pub mod trail;

#[macro_use]
extern crate lazy_static;
