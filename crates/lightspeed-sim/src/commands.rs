//! Execution of [`AiCommand`]s against a room.

use tracing::debug;

use lightspeed_core::commands::AiCommand;
use lightspeed_core::events::SimEvent;
use lightspeed_core::missile::{missile_cooldown_for_speed, sanitize_missile_config};

use crate::room::RoomState;
use crate::world_setup;

/// Applies a command for one player of a room. Unknown players, missing or
/// destroyed ships and launches during cooldown are silently ignored.
pub trait ApplyCommand {
    fn apply(self, state: &mut RoomState, player_id: &str);
}

impl ApplyCommand for AiCommand {
    fn apply(self, state: &mut RoomState, player_id: &str) {
        let Some(ship) = state.players.get(player_id).and_then(|p| p.ship) else {
            return;
        };
        if state.world.is_destroyed(ship) {
            return;
        }

        match self {
            AiCommand::SetShipRoute { waypoints } => {
                let waypoints: Vec<_> =
                    waypoints.into_iter().filter(|wp| wp.is_finite()).collect();
                if let Some(mut route) = state.world.route_mut(ship) {
                    route.waypoints = waypoints;
                }
                if let Some(mut follower) = state.world.route_follower_mut(ship) {
                    follower.index = 0;
                    follower.override_waypoint = None;
                }
            }
            AiCommand::ClearShipRoute => state.clear_ship_waypoints(ship),
            AiCommand::LaunchMissile { config, waypoints } => {
                let now = state.time.now;
                let ready = state
                    .players
                    .get(player_id)
                    .is_some_and(|p| p.missile_ready(now));
                if !ready {
                    debug!(player = player_id, "launch refused during cooldown");
                    return;
                }
                let Some(ship_speed) = state.world.transform(ship).map(|t| t.vel.length()) else {
                    return;
                };

                let waypoints = if waypoints.is_empty() {
                    state
                        .players
                        .get(player_id)
                        .and_then(|p| p.missile_routes.active())
                        .map(|route| route.waypoints.clone())
                        .unwrap_or_default()
                } else {
                    waypoints
                };
                let waypoints: Vec<_> =
                    waypoints.into_iter().filter(|wp| wp.is_finite()).collect();

                let config = sanitize_missile_config(config);
                let Some(missile) = world_setup::spawn_missile(
                    &mut state.world,
                    player_id,
                    ship,
                    &config,
                    &waypoints,
                    now,
                ) else {
                    return;
                };

                if let Some(player) = state.players.get_mut(player_id) {
                    player.missile_ready_at = now + missile_cooldown_for_speed(ship_speed);
                }
                debug!(player = player_id, missile = %missile, speed = config.speed, "missile launched");
                state.events.push(SimEvent::MissileLaunched {
                    missile,
                    owner: player_id.to_owned(),
                });
            }
        }
    }
}
