//! Plays tCHu over TCP: the server runs the [`tchu::game::Game`] against two
//! [`remote_player_proxy::RemotePlayerProxy`]s, and each client serves a local
//! [`tchu::player::Player`] through a [`remote_player_client::RemotePlayerClient`].

pub mod message_id;
pub mod remote_player_client;
pub mod remote_player_proxy;
pub mod serdes;
