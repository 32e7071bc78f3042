//! Rooms.
//!
//! `RoomState` owns one match: the entity store, the clock, players, bots,
//! the seeded RNG and the command queue. It advances in fixed steps through
//! [`RoomState::tick`]. `Room` puts the state behind a mutex that the ticker
//! holds for a whole tick and connection readers hold only long enough to
//! extract a view.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use lightspeed_core::commands::AiCommand;
use lightspeed_core::config::RoomConfig;
use lightspeed_core::constants::*;
use lightspeed_core::effects::{NodeId, ProgressEvent, ProgressKind, ProgressionEffects};
use lightspeed_core::events::SimEvent;
use lightspeed_core::heat::HeatParams;
use lightspeed_core::missile_routes::MissileRouteSet;
use lightspeed_core::state::RoomView;
use lightspeed_core::types::{EntityId, SimTime, Vec2, WorldBounds};

use crate::ai::{build_ai_context, AiBehavior, BotAgent};
use crate::commands::ApplyCommand;
use crate::store::{ComponentKey, World};
use crate::systems;
use crate::systems::collision::Kill;
use crate::world_setup;

/// A participant, human or bot.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub is_bot: bool,
    /// Current ship. Replaced on respawn.
    pub ship: Option<EntityId>,
    pub kills: u32,
    /// Room time before which missile launches are refused.
    pub missile_ready_at: f64,
    /// Progression transitions not yet forwarded to the client.
    pub progress: Vec<ProgressEvent>,
    /// Planned missile routes. Launches without waypoints fly the active one.
    pub missile_routes: MissileRouteSet,
}

impl Player {
    fn new(id: &str, name: &str, is_bot: bool) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            is_bot,
            ship: None,
            kills: 0,
            missile_ready_at: 0.0,
            progress: Vec::new(),
            missile_routes: MissileRouteSet::new(),
        }
    }

    pub fn missile_ready(&self, now: f64) -> bool {
        now >= self.missile_ready_at
    }
}

/// Complete state of one room.
pub struct RoomState {
    pub(crate) id: String,
    pub(crate) world: World,
    pub(crate) time: SimTime,
    pub(crate) bounds: WorldBounds,
    pub(crate) heat_defaults: HeatParams,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) players: BTreeMap<String, Player>,
    pub(crate) bots: BTreeMap<String, BotAgent>,
    command_queue: VecDeque<(String, AiCommand)>,
    pub(crate) events: Vec<SimEvent>,
    despawn_buffer: Vec<EntityId>,
    next_bot: u64,
}

impl RoomState {
    pub fn new(id: &str, config: &RoomConfig) -> Self {
        Self {
            id: id.to_owned(),
            world: World::new(),
            time: SimTime::default(),
            bounds: config.bounds(),
            heat_defaults: config.ship_heat(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            players: BTreeMap::new(),
            bots: BTreeMap::new(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
            next_bot: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn now(&self) -> f64 {
        self.time.now
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn heat_defaults(&self) -> HeatParams {
        self.heat_defaults
    }

    /// Read-only access to the entity store.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the entity store, for embedding layers that place
    /// their own entities.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn human_count(&self) -> usize {
        self.players.values().filter(|p| !p.is_bot).count()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= ROOM_MAX_PLAYERS
    }

    // --- Players ---

    /// Join a human player with a fresh ship at `start`. Returns the ship,
    /// or `None` when the id is taken or the room is full.
    pub fn add_player(&mut self, id: &str, name: &str, start: Vec2) -> Option<EntityId> {
        if self.players.contains_key(id) || self.is_full() {
            return None;
        }
        let ship = self.spawn_player_ship(id, start);
        let mut player = Player::new(id, name, false);
        player.ship = Some(ship);
        self.players.insert(id.to_owned(), player);
        info!(room = %self.id, player = id, ship = %ship, "player joined");
        Some(ship)
    }

    /// Add a bot driven by `behavior`. Returns its player id, or `None` when
    /// the room is full.
    pub fn add_bot(
        &mut self,
        name: &str,
        behavior: Box<dyn AiBehavior>,
        start: Vec2,
    ) -> Option<String> {
        if self.is_full() {
            return None;
        }
        let id = loop {
            self.next_bot += 1;
            let candidate = format!("bot-{}", self.next_bot);
            if !self.players.contains_key(&candidate) {
                break candidate;
            }
        };
        let ship = self.spawn_player_ship(&id, start);
        let mut player = Player::new(&id, name, true);
        player.ship = Some(ship);
        self.players.insert(id.clone(), player);
        self.bots.insert(id.clone(), BotAgent::new(behavior));
        info!(room = %self.id, bot = %id, ship = %ship, "bot added");
        Some(id)
    }

    pub fn remove_bot(&mut self, id: &str) {
        if self.bots.remove(id).is_some() {
            self.remove_player(id);
            info!(room = %self.id, bot = id, "bot removed");
        }
    }

    pub fn remove_all_bots(&mut self) {
        let ids: Vec<String> = self.bots.keys().cloned().collect();
        for id in ids {
            self.remove_bot(&id);
        }
    }

    /// Drop a player and every entity it owns.
    pub fn remove_player(&mut self, id: &str) {
        let owned: Vec<EntityId> = self
            .world
            .ids_with(&[ComponentKey::Owner])
            .into_iter()
            .filter(|&e| self.world.owner(e).as_deref() == Some(id))
            .collect();
        for entity in owned {
            self.world.remove_entity(entity);
        }
        self.bots.remove(id);
        if self.players.remove(id).is_some() {
            info!(room = %self.id, player = id, "player left");
        }
    }

    fn spawn_player_ship(&mut self, owner: &str, start: Vec2) -> EntityId {
        let pos = self.bounds.clamp(start);
        world_setup::spawn_ship(&mut self.world, owner, pos, self.time.now, self.heat_defaults)
    }

    // --- Commands ---

    /// Queue a command for `player_id`, applied at the next tick boundary.
    pub fn queue_command(&mut self, player_id: &str, command: AiCommand) {
        self.command_queue.push_back((player_id.to_owned(), command));
    }

    /// Apply a command immediately.
    pub fn handle_command(&mut self, player_id: &str, command: AiCommand) {
        command.apply(self, player_id);
    }

    fn process_commands(&mut self) {
        while let Some((player_id, command)) = self.command_queue.pop_front() {
            self.handle_command(&player_id, command);
        }
    }

    // --- Tick ---

    /// Advance the room by one fixed step.
    pub fn tick(&mut self) {
        self.time.advance();
        let now = self.time.now;

        // 1. Queued commands
        self.process_commands();
        // 2. Bot planning
        self.update_bots();
        // 3. Heat (ship stall, missile overheat)
        systems::heat::run(&mut self.world, now, DT, &mut self.events);
        // 4. Missile guidance
        systems::guidance::run(&mut self.world, now, &mut self.events);
        // 5. Route following + history
        systems::route_follow::run(&mut self.world, now, DT, &self.bounds);
        // 6. Collisions
        let kills =
            systems::collision::run(&mut self.world, now, &mut self.rng, &mut self.events);
        for kill in kills {
            self.handle_kill(kill);
        }
        // 7. Garbage collection
        if self.time.tick % CLEANUP_INTERVAL_TICKS == 0 {
            let removed =
                systems::cleanup::run(&mut self.world, now, &mut self.despawn_buffer);
            if removed > 0 {
                debug!(room = %self.id, removed, "cleaned up destroyed entities");
            }
        }
    }

    fn update_bots(&mut self) {
        let now = self.time.now;
        let ids: Vec<String> = self.bots.keys().cloned().collect();

        for id in ids {
            let Some(player) = self.players.get(&id) else {
                continue;
            };
            let Some(ship) = player.ship else {
                continue;
            };
            if self.world.is_destroyed(ship) {
                continue;
            }
            let ready = player.missile_ready(now);
            if !self.bots.get(&id).is_some_and(|a| a.ready(now)) {
                continue;
            }
            let Some(ctx) = build_ai_context(&self.world, now, self.bounds, &id, ship, ready)
            else {
                continue;
            };

            let commands = match self.bots.get_mut(&id) {
                Some(agent) => {
                    agent.next_plan_at = now + AI_PLAN_INTERVAL.max(DT);
                    agent.behavior.plan(&ctx)
                }
                None => continue,
            };
            for command in commands {
                self.handle_command(&id, command);
            }
        }
    }

    /// Credit the attacker and give the victim a replacement ship.
    fn handle_kill(&mut self, kill: Kill) {
        if let Some(attacker) = self.players.get_mut(&kill.attacker) {
            attacker.kills += 1;
        }
        let Some(is_bot) = self.players.get(&kill.victim).map(|p| p.is_bot) else {
            return;
        };

        let pos = if is_bot {
            world_setup::random_interior_point(&self.bounds, &mut self.rng)
        } else {
            self.bounds.center()
        };
        let ship = self.spawn_player_ship(&kill.victim, pos);
        if let Some(victim) = self.players.get_mut(&kill.victim) {
            victim.ship = Some(ship);
            victim.missile_ready_at = 0.0;
        }
        if let Some(agent) = self.bots.get_mut(&kill.victim) {
            agent.next_plan_at = 0.0;
        }
        debug!(room = %self.id, player = %kill.victim, ship = %ship, "respawned");
    }

    /// Take the events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Progression ---

    /// Effects sink bound to one player of this room.
    pub fn effects(&mut self, player_id: &str) -> RoomEffects<'_> {
        RoomEffects {
            state: self,
            player_id: player_id.to_owned(),
        }
    }

    fn record_progress(&mut self, player_id: &str, node: &NodeId, kind: ProgressKind) {
        let at = self.time.now;
        if let Some(player) = self.players.get_mut(player_id) {
            debug!(player = player_id, node = %node.0, ?kind, "progression");
            player.progress.push(ProgressEvent {
                node: node.clone(),
                kind,
                at,
            });
        }
    }

    /// Take the progression events recorded for `player_id`.
    pub fn drain_progress(&mut self, player_id: &str) -> Vec<ProgressEvent> {
        self.players
            .get_mut(player_id)
            .map(|p| std::mem::take(&mut p.progress))
            .unwrap_or_default()
    }

    /// Perceived view for `player_id`.
    pub fn view(&self, player_id: &str) -> Option<RoomView> {
        systems::snapshot::build_room_view(self, player_id)
    }
}

/// [`ProgressionEffects`] recording transitions on a room player.
pub struct RoomEffects<'a> {
    state: &'a mut RoomState,
    player_id: String,
}

impl ProgressionEffects for RoomEffects<'_> {
    fn on_start(&mut self, node: &NodeId) {
        self.state
            .record_progress(&self.player_id, node, ProgressKind::Started);
    }

    fn on_complete(&mut self, node: &NodeId) {
        self.state
            .record_progress(&self.player_id, node, ProgressKind::Completed);
    }

    fn on_cancel(&mut self, node: &NodeId) {
        self.state
            .record_progress(&self.player_id, node, ProgressKind::Cancelled);
    }
}

/// A room shared between the ticker and connection readers.
pub struct Room {
    id: String,
    state: Mutex<RoomState>,
}

impl Room {
    pub fn new(id: &str, config: &RoomConfig) -> Self {
        info!(room = id, seed = config.seed, "room created");
        Self {
            id: id.to_owned(),
            state: Mutex::new(RoomState::new(id, config)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn lock(&self) -> MutexGuard<'_, RoomState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advance one tick under the room lock.
    pub fn tick(&self) {
        self.lock().tick();
    }

    /// Short read of the state. Keep `f` to extraction only.
    pub fn read<R>(&self, f: impl FnOnce(&RoomState) -> R) -> R {
        f(&*self.lock())
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut RoomState) -> R) -> R {
        f(&mut *self.lock())
    }

    pub fn view(&self, player_id: &str) -> Option<RoomView> {
        self.read(|state| state.view(player_id))
    }

    /// True when no human is connected.
    pub fn is_empty(&self) -> bool {
        self.read(|state| state.human_count() == 0)
    }
}
