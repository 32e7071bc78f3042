#[cfg(test)]
mod tests {
    use crate::commands::AiCommand;
    use crate::components::RouteWaypoint;
    use crate::config::{ConfigError, RoomConfig};
    use crate::constants::*;
    use crate::enums::MissilePreset;
    use crate::heat::*;
    use crate::missile::*;
    use crate::missile_routes::MissileRouteSet;
    use crate::types::{Snapshot, Vec2, WorldBounds};

    #[test]
    fn test_history_capacity_matches_retention() {
        assert_eq!(HISTORY_CAPACITY, 604);
        assert!((PERCEPTION_TOLERANCE - 0.025).abs() < 1e-12);
    }

    #[test]
    fn test_snapshot_lerp_midpoint() {
        let a = Snapshot::new(0.0, Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        let b = Snapshot::new(1.0, Vec2::new(10.0, 20.0), Vec2::new(20.0, 0.0));
        let mid = a.lerp(&b, 0.5);
        assert!((mid.t - 0.5).abs() < 1e-12);
        assert!((mid.pos - Vec2::new(5.0, 10.0)).length() < 1e-12);
        assert!((mid.vel.x - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_world_bounds_clamp() {
        let b = WorldBounds::default();
        let p = b.clamp(Vec2::new(-5.0, WORLD_H + 10.0));
        assert_eq!(p, Vec2::new(0.0, WORLD_H));
        assert_eq!(b.center(), Vec2::new(WORLD_W * 0.5, WORLD_H * 0.5));
    }

    // ---- Heat params ----

    #[test]
    fn test_sanitize_heat_params_replaces_invalid() {
        let p = sanitize_heat_params(HeatParams {
            max: -1.0,
            warn_at: f64::NAN,
            overheat_at: 500.0,
            stall_seconds: -2.0,
            marker_speed: 0.0,
            exp: 0.0,
            k_up: -3.0,
            k_down: f64::NAN,
            missile_spike_chance: 4.0,
            missile_spike_min: 10.0,
            missile_spike_max: 2.0,
        });
        assert_eq!(p.max, HEAT_MAX);
        assert_eq!(p.warn_at, HEAT_WARN_AT);
        assert!(p.overheat_at <= p.max && p.overheat_at >= p.warn_at);
        assert_eq!(p.stall_seconds, HEAT_STALL_SECONDS);
        assert_eq!(p.marker_speed, HEAT_MARKER_SPEED);
        assert_eq!(p.exp, HEAT_EXP);
        assert_eq!(p.k_up, HEAT_K_UP);
        assert_eq!(p.k_down, HEAT_K_DOWN);
        assert_eq!(p.missile_spike_chance, 1.0);
        assert!(p.missile_spike_max >= p.missile_spike_min);
    }

    #[test]
    fn test_missile_heat_defaults_never_stall() {
        let p = default_missile_heat_params();
        assert_eq!(p.stall_seconds, 0.0);
        assert_eq!(p.max, MISSILE_HEAT_MAX);
        assert_eq!(p.missile_spike_chance, 0.0);
    }

    // ---- Missile config ----

    #[test]
    fn test_sanitize_missile_config_clamps() {
        let cfg = sanitize_missile_config(MissileConfig {
            speed: 10_000.0,
            agro_radius: 5.0,
            lifetime: 9999.0,
            heat: HeatParams {
                max: 0.0,
                ..default_heat_params()
            },
        });
        assert_eq!(cfg.speed, MISSILE_MAX_SPEED);
        assert_eq!(cfg.agro_radius, MISSILE_MIN_AGRO_RADIUS);
        assert_eq!(cfg.heat, default_missile_heat_params());
        assert_eq!(cfg.lifetime, missile_lifetime_for(cfg.speed, cfg.agro_radius));
    }

    #[test]
    fn test_missile_lifetime_bounds() {
        let slow = missile_lifetime_for(MISSILE_MIN_SPEED, MISSILE_MIN_AGRO_RADIUS);
        assert!((slow - MISSILE_MAX_LIFETIME).abs() < 1e-9);

        let fast = missile_lifetime_for(MISSILE_MAX_SPEED, 1e9);
        let expected =
            MISSILE_MAX_LIFETIME - MISSILE_LIFETIME_SPEED_PENALTY - MISSILE_LIFETIME_AGRO_PENALTY;
        assert!((fast - expected).abs() < 1e-9);
        assert!(fast >= MISSILE_MIN_LIFETIME);
    }

    #[test]
    fn test_missile_cooldown_grows_with_speed() {
        assert!((missile_cooldown_for_speed(0.0) - MISSILE_BASE_COOLDOWN).abs() < 1e-12);
        let at_c = missile_cooldown_for_speed(C * 2.0);
        assert!((at_c - MISSILE_BASE_COOLDOWN * (1.0 + MISSILE_COOLDOWN_SCALE)).abs() < 1e-9);
        assert!(missile_cooldown_for_speed(200.0) > missile_cooldown_for_speed(100.0));
    }

    #[test]
    fn test_presets_are_distinct_and_sane() {
        let scout = preset_config(MissilePreset::Scout);
        let hunter = preset_config(MissilePreset::Hunter);
        let sniper = preset_config(MissilePreset::Sniper);
        assert!(scout.agro_radius > hunter.agro_radius);
        assert!(sniper.speed > hunter.speed);
        assert!(scout.lifetime > sniper.lifetime);
        for cfg in [scout, hunter, sniper] {
            assert_eq!(cfg.heat.stall_seconds, 0.0);
            assert!(cfg.heat.overheat_at <= cfg.heat.max);
        }
        assert_eq!(MissileConfig::default(), hunter);
    }

    // ---- Config ----

    #[test]
    fn test_room_config_partial_json() {
        let cfg = RoomConfig::from_json_str(r#"{"seed": 7, "heat": {"max": 120, "kUp": 30}}"#)
            .unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.world_width, WORLD_W);
        let heat = cfg.ship_heat();
        assert_eq!(heat.max, 120.0);
        assert_eq!(heat.k_up, 30.0);
        assert_eq!(heat.k_down, HEAT_K_DOWN);
    }

    #[test]
    fn test_room_config_rejects_bad_world() {
        let err = RoomConfig::from_json_str(r#"{"worldWidth": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::WorldSize { .. }));

        let err = RoomConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejected_heat_overrides_are_named() {
        let cfg = RoomConfig::from_json_str(r#"{"heat": {"max": 120, "kUp": -5}}"#).unwrap();
        assert_eq!(cfg.heat.rejected(default_heat_params()), vec!["kUp"]);
        assert_eq!(cfg.ship_heat().k_up, HEAT_K_UP);
    }

    // ---- Missile routes ----

    #[test]
    fn test_missile_route_set_starts_with_one_active_route() {
        let set = MissileRouteSet::new();
        assert_eq!(set.routes().len(), 1);
        let active = set.active().unwrap();
        assert_eq!(active.name, "Route 1");
        assert_eq!(active.id, set.active_id());
    }

    #[test]
    fn test_missile_route_add_rename_activate() {
        let mut set = MissileRouteSet::new();
        let first = set.active_id().to_owned();

        let second = set.add("  ");
        assert_eq!(set.get(&second).unwrap().name, "Route 2");
        assert_eq!(set.active_id(), second, "new route becomes active");

        let named = set.add(" Flank ");
        assert_eq!(set.get(&named).unwrap().name, "Flank");
        assert_ne!(named, second);

        assert!(set.rename(&second, "Pincer"));
        assert!(!set.rename(&second, "   "));
        assert!(!set.rename("missing", "X"));
        assert_eq!(set.get(&second).unwrap().name, "Pincer");

        assert!(set.set_active(&first));
        assert!(!set.set_active("missing"));
        assert_eq!(set.active_id(), first);
    }

    #[test]
    fn test_missile_route_delete_keeps_one() {
        let mut set = MissileRouteSet::new();
        let first = set.active_id().to_owned();
        let second = set.add("B");
        set.add_waypoint(&first, RouteWaypoint::new(Vec2::new(1.0, 1.0), 100.0));

        assert!(set.delete(&second));
        assert_eq!(set.routes().len(), 1);
        assert_eq!(set.active_id(), first, "active falls back to the first route");

        assert!(set.delete(&first));
        assert_eq!(set.routes().len(), 1);
        assert!(set.get(&first).unwrap().waypoints.is_empty());
        assert!(!set.delete("missing"));
    }

    #[test]
    fn test_missile_route_waypoint_edits() {
        let mut set = MissileRouteSet::new();
        let id = set.active_id().to_owned();

        assert!(set.add_waypoint(&id, RouteWaypoint::new(Vec2::new(10.0, 0.0), 0.0)));
        assert!(set.add_waypoint(&id, RouteWaypoint::new(Vec2::new(20.0, 0.0), 10_000.0)));
        assert!(set.add_waypoint(&id, RouteWaypoint::new(Vec2::new(30.0, 0.0), 5.0)));
        assert!(!set.add_waypoint(&id, RouteWaypoint::new(Vec2::new(f64::NAN, 0.0), 100.0)));
        assert!(!set.add_waypoint("missing", RouteWaypoint::new(Vec2::ZERO, 100.0)));
        {
            let wps = &set.get(&id).unwrap().waypoints;
            assert_eq!(wps.len(), 3);
            assert_eq!(wps[0].speed, 0.0);
            assert_eq!(wps[1].speed, MISSILE_MAX_SPEED);
            assert_eq!(wps[2].speed, MISSILE_MIN_SPEED);
        }

        assert!(set.update_waypoint_speed(&id, 0, 1.0));
        assert!(!set.update_waypoint_speed(&id, 3, 100.0));
        assert!(set.move_waypoint(&id, 1, Vec2::new(25.0, 5.0)));
        assert!(!set.move_waypoint(&id, 1, Vec2::new(f64::INFINITY, 0.0)));
        assert!(!set.move_waypoint(&id, 9, Vec2::ZERO));
        assert!(set.delete_waypoint(&id, 0));
        assert!(!set.delete_waypoint(&id, 2));

        let wps = &set.get(&id).unwrap().waypoints;
        assert_eq!(wps.len(), 2);
        assert_eq!(wps[0].pos, Vec2::new(25.0, 5.0));

        assert!(set.clear(&id));
        assert!(set.get(&id).unwrap().waypoints.is_empty());
    }

    #[test]
    fn test_waypoint_finiteness() {
        assert!(RouteWaypoint::new(Vec2::new(1.0, 2.0), 3.0).is_finite());
        assert!(!RouteWaypoint::new(Vec2::new(f64::NAN, 2.0), 3.0).is_finite());
        assert!(!RouteWaypoint::new(Vec2::ZERO, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_ai_command_tagged_json() {
        let cmd = AiCommand::SetShipRoute {
            waypoints: vec![RouteWaypoint::new(Vec2::new(1.0, 2.0), 50.0)],
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"SetShipRoute\""));
        let back: AiCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }
}
