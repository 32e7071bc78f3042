//! Simulation engine for the lightspeed combat core.
//!
//! Owns the entity store, per-entity histories and the retarded-time
//! perception solver, runs the systems at a fixed tick rate, and produces
//! perceived room views for the transport layer.

pub mod ai;
pub mod commands;
pub mod heat;
pub mod history;
pub mod hub;
pub mod perception;
pub mod room;
pub mod routes;
pub mod store;
pub mod systems;
pub mod world_setup;

pub use hub::{Hub, HubError, Ticker};
pub use lightspeed_core as core;
pub use room::{Room, RoomState};
pub use store::World;
