//! ECS systems that operate on the room world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for
//! read-only). They own no state; everything lives in components or is
//! passed in by the room.

pub mod cleanup;
pub mod collision;
pub mod guidance;
pub mod heat;
pub mod route_follow;
pub mod snapshot;
