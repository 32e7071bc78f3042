//! Core types and definitions for the lightspeed combat simulation.
//!
//! This crate defines the vocabulary shared across the workspace:
//! components, commands, room views, events, tuning constants, and the
//! heat and missile parameter models. It has no dependency on the ECS or
//! any runtime machinery.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod effects;
pub mod enums;
pub mod events;
pub mod heat;
pub mod missile;
pub mod missile_routes;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
