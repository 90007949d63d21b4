use glam::DVec2;
use log::{trace, warn};
use std::collections::HashSet;

use super::body::{Body, BodyId, BodySet};
use super::collision::{self, CollisionEvent};
use super::config::{WorldConfig, DEFAULT_WORLD};
use super::PhysicsError;

/// Physics world that owns every ball and advances them frame by frame
pub struct PhysicsWorld {
    /// Fixed simulation parameters
    config: WorldConfig,

    /// Every ball, in spawn order
    bodies: BodySet,

    /// What the last step resolved
    events: Vec<CollisionEvent>,

    /// Number of steps that actually advanced the world
    step_count: u64,

    /// Pairs already reported as coincident, so the warning fires once
    degenerate_pairs: HashSet<(usize, usize)>,
}

impl PhysicsWorld {
    /// Create an empty world, rejecting unusable parameters
    pub fn new(config: WorldConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self::with_config_unchecked(config))
    }

    fn with_config_unchecked(config: WorldConfig) -> Self {
        Self {
            config,
            bodies: BodySet::new(),
            events: Vec::with_capacity(32), // Pre-allocate for common case
            step_count: 0,
            degenerate_pairs: HashSet::new(),
        }
    }

    /// Spawn a resting default-size ball with its bounding box at `position`
    pub fn spawn(&mut self, position: DVec2) -> BodyId {
        self.bodies.spawn(position)
    }

    /// Add a ball built elsewhere
    pub fn insert(&mut self, body: Body) -> BodyId {
        self.bodies.insert(body)
    }

    /// Advance every ball by `dt` seconds
    ///
    /// Integration and the platform check run for each ball first, then every
    /// pair `(i, j)` with `i < j` is tested in store order against the live
    /// state, so later pairs see what earlier pairs changed.
    pub fn step(&mut self, dt: f64) {
        self.events.clear();

        if dt == 0.0 {
            return;
        }
        if !dt.is_finite() || dt < 0.0 {
            warn!("Ignoring physics step with invalid dt {}", dt);
            return;
        }

        let platform = self.config.platform;
        for (index, body) in self.bodies.iter_mut().enumerate() {
            integrate(body, &self.config, dt);

            if let Some(impact_speed) =
                collision::resolve_platform(body, &platform, self.config.bounce_factor)
            {
                self.events.push(CollisionEvent::Platform {
                    body: BodyId(index),
                    impact_speed,
                });
            }
        }

        let count = self.bodies.len();
        for i in 0..count {
            for j in (i + 1)..count {
                let (a, b) = self.bodies.pair_mut(i, j);

                let Some(contact) = collision::detect(a, b) else {
                    continue;
                };

                // Coincident centers have no usable normal
                if contact.distance < self.config.min_contact_distance {
                    if self.degenerate_pairs.insert((i, j)) {
                        warn!("Skipping degenerate contact between bodies {} and {}", i, j);
                    } else {
                        trace!("Still skipping degenerate contact {} / {}", i, j);
                    }
                    continue;
                }

                if let Some(impulse) = collision::resolve(a, b, &contact, &self.config) {
                    self.events.push(CollisionEvent::Contact {
                        body1: BodyId(i),
                        body2: BodyId(j),
                        impulse,
                    });
                }
            }
        }

        self.step_count += 1;
        for event in &self.events {
            trace!("Step {}: {:?}", self.step_count, event);
        }
    }

    /// All balls, in spawn order
    pub fn bodies(&self) -> &BodySet {
        &self.bodies
    }

    /// Number of balls
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Collisions resolved by the most recent step
    pub fn collision_events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Simulation parameters
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Steps that advanced the world so far
    pub fn step_count(&self) -> u64 {
        self.step_count
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::with_config_unchecked(DEFAULT_WORLD)
    }
}

/// Apply gravity, clamp speed and move one ball
///
/// Only downward speed is capped on the y axis; upward speed after a bounce
/// is left alone.
fn integrate(body: &mut Body, config: &WorldConfig, dt: f64) {
    body.velocity.y += config.gravity * dt;
    body.velocity.y = body.velocity.y.min(config.max_velocity);
    body.velocity.x = body
        .velocity
        .x
        .clamp(-config.max_velocity, config.max_velocity);
    body.position += body.velocity * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::{BodyBuilder, DEFAULT_RADIUS};
    use crate::engine::physics::config::Platform;
    use approx::assert_relative_eq;

    /// Default parameters with the platform moved out of the way
    fn open_sky() -> WorldConfig {
        WorldConfig::default().with_platform(Platform::new(0.0, 1.0e9, 300.0, 20.0))
    }

    fn weightless() -> WorldConfig {
        open_sky().with_gravity(0.0)
    }

    fn ball(x: f64, y: f64, vx: f64, vy: f64) -> Body {
        BodyBuilder::new(DVec2::new(x, y))
            .velocity(vx, vy)
            .build()
            .unwrap()
    }

    fn center_distance(world: &PhysicsWorld, i: usize, j: usize) -> f64 {
        let a = world.bodies().get(BodyId(i)).unwrap();
        let b = world.bodies().get(BodyId(j)).unwrap();
        a.center().distance(b.center())
    }

    #[test]
    fn test_new_world_is_empty() {
        let world = PhysicsWorld::new(WorldConfig::default()).unwrap();
        assert_eq!(world.body_count(), 0);
        assert!(world.bodies().is_empty());
        assert!(world.collision_events().is_empty());
        assert_eq!(world.step_count(), 0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = WorldConfig::default().with_restitution(2.0);
        assert!(PhysicsWorld::new(config).is_err());
    }

    #[test]
    fn test_spawn_scenario() {
        let mut world = PhysicsWorld::default();
        let id = world.spawn(DVec2::new(50.0, 50.0));

        assert_eq!(world.body_count(), 1);
        let body = world.bodies().get(id).unwrap();
        assert_eq!(body.velocity, DVec2::ZERO);
        assert_eq!(body.position, DVec2::new(50.0, 50.0));
        assert_eq!(body.radius(), DEFAULT_RADIUS);
    }

    #[test]
    fn test_gravity_is_monotonic_until_clamped() {
        let mut world = PhysicsWorld::new(open_sky()).unwrap();
        let id = world.spawn(DVec2::ZERO);
        let max_velocity = world.config().max_velocity;

        let mut previous = 0.0;
        for _ in 0..30 {
            world.step(0.125);
            let vy = world.bodies().get(id).unwrap().velocity.y;
            if previous < max_velocity {
                assert!(vy > previous, "vy {} did not grow past {}", vy, previous);
            }
            assert!(vy <= max_velocity);
            previous = vy;
        }

        assert_eq!(previous, max_velocity);
    }

    #[test]
    fn test_upward_speed_is_not_clamped() {
        let mut world = PhysicsWorld::new(weightless()).unwrap();
        let id = world.insert(ball(0.0, 0.0, 0.0, -1000.0));
        world.step(0.01);
        assert_eq!(world.bodies().get(id).unwrap().velocity.y, -1000.0);
    }

    #[test]
    fn test_horizontal_speed_is_clamped_both_ways() {
        let mut world = PhysicsWorld::new(weightless()).unwrap();
        let right = world.insert(ball(0.0, 0.0, 1000.0, 0.0));
        let left = world.insert(ball(0.0, 500.0, -1000.0, 0.0));
        world.step(0.01);

        assert_eq!(world.bodies().get(right).unwrap().velocity.x, 300.0);
        assert_eq!(world.bodies().get(left).unwrap().velocity.x, -300.0);
    }

    #[test]
    fn test_platform_containment() {
        let mut world = PhysicsWorld::default();
        let id = world.insert(ball(50.0, 230.0, 0.0, 300.0));
        let platform_y = world.config().platform.y;
        let bounce = world.config().bounce_factor;

        world.step(0.1);

        let body = world.bodies().get(id).unwrap();
        assert!(body.position.y + 2.0 * body.radius() <= platform_y);
        assert_eq!(body.bottom(), platform_y);
        assert_eq!(body.velocity.y.signum(), (bounce * 300.0).signum());
        assert_relative_eq!(body.velocity.y, -270.0);
        assert_eq!(
            world.collision_events(),
            &[CollisionEvent::Platform {
                body: id,
                impact_speed: 300.0
            }]
        );
    }

    #[test]
    fn test_large_dt_is_not_clamped() {
        let mut world = PhysicsWorld::new(weightless()).unwrap();
        let id = world.insert(ball(0.0, 0.0, 100.0, 0.0));
        world.step(5.0);
        assert_eq!(world.bodies().get(id).unwrap().position.x, 500.0);
    }

    #[test]
    fn test_large_dt_still_lands_on_platform() {
        let mut world = PhysicsWorld::default();
        let id = world.spawn(DVec2::new(10.0, 0.0));
        world.step(10.0);
        assert_eq!(world.bodies().get(id).unwrap().bottom(), 280.0);
    }

    #[test]
    fn test_concrete_collision_scenario() {
        let mut world = PhysicsWorld::default();
        let a = world.insert(ball(100.0, 100.0, 10.0, 0.0));
        let b = world.insert(ball(130.0, 100.0, -10.0, 0.0));

        world.step(0.016);

        let va = world.bodies().get(a).unwrap().velocity;
        let vb = world.bodies().get(b).unwrap().velocity;
        assert!(va.x < 0.0, "first ball should bounce back, got {}", va.x);
        assert!(vb.x > 0.0, "second ball should bounce back, got {}", vb.x);
        assert_relative_eq!(va.x, -7.0, epsilon = 1e-9);
        assert_relative_eq!(vb.x, 7.0, epsilon = 1e-9);
        assert!(center_distance(&world, 0, 1) > 30.0);

        match world.collision_events() {
            [CollisionEvent::Contact {
                body1,
                body2,
                impulse,
            }] => {
                assert_eq!((*body1, *body2), (a, b));
                assert_relative_eq!(*impulse, 340.0, epsilon = 1e-9);
            }
            other => panic!("unexpected events {:?}", other),
        }
    }

    #[test]
    fn test_separating_pair_keeps_integrated_state() {
        let left = ball(100.0, 100.0, -10.0, 0.0);
        let right = ball(130.0, 100.0, 10.0, 0.0);

        let mut world = PhysicsWorld::default();
        world.insert(left);
        world.insert(right);
        world.step(0.016);

        // Same balls stepped on their own see only integration
        let mut alone_left = PhysicsWorld::default();
        alone_left.insert(left);
        alone_left.step(0.016);
        let mut alone_right = PhysicsWorld::default();
        alone_right.insert(right);
        alone_right.step(0.016);

        assert!(center_distance(&world, 0, 1) < 40.0, "still overlapping");
        assert_eq!(world.bodies().get(BodyId(0)), alone_left.bodies().get(BodyId(0)));
        assert_eq!(world.bodies().get(BodyId(1)), alone_right.bodies().get(BodyId(0)));
        assert!(world.collision_events().is_empty());
    }

    #[test]
    fn test_exactly_touching_pair_is_not_resolved() {
        let mut world = PhysicsWorld::new(weightless()).unwrap();
        world.spawn(DVec2::new(0.0, 0.0));
        world.spawn(DVec2::new(40.0, 0.0));

        world.step(0.016);

        assert!(world.collision_events().is_empty());
        assert_eq!(world.bodies().get(BodyId(0)).unwrap().position, DVec2::ZERO);
        assert_eq!(
            world.bodies().get(BodyId(1)).unwrap().position,
            DVec2::new(40.0, 0.0)
        );
    }

    #[test]
    fn test_coincident_bodies_do_not_produce_nan() {
        let mut world = PhysicsWorld::default();
        world.spawn(DVec2::new(60.0, 60.0));
        world.spawn(DVec2::new(60.0, 60.0));

        for _ in 0..10 {
            world.step(0.016);
        }

        for body in world.bodies().iter() {
            assert!(body.position.is_finite());
            assert!(body.velocity.is_finite());
        }
        assert!(!world
            .collision_events()
            .iter()
            .any(|e| matches!(e, CollisionEvent::Contact { .. })));
    }

    #[test]
    fn test_coincident_pair_is_reported_once() {
        let mut world = PhysicsWorld::default();
        world.spawn(DVec2::new(60.0, 60.0));
        world.spawn(DVec2::new(60.0, 60.0));
        world.spawn(DVec2::new(200.0, 60.0));

        for _ in 0..600 {
            world.step(1.0 / 30.0);
        }

        // The pair never separates, but it is only reported the first time
        assert_eq!(center_distance(&world, 0, 1), 0.0);
        assert_eq!(world.degenerate_pairs.len(), 1);
        assert!(world.degenerate_pairs.contains(&(0, 1)));
    }

    #[test]
    fn test_pair_order_changes_outcome() {
        // Three balls in a row; the middle one overlaps both neighbours
        let row = [
            ball(0.0, 0.0, 10.0, 0.0),
            ball(30.0, 0.0, 0.0, 0.0),
            ball(60.0, 0.0, -10.0, 0.0),
        ];

        let mut forward = PhysicsWorld::new(weightless()).unwrap();
        for body in row {
            forward.insert(body);
        }
        let mut reversed = PhysicsWorld::new(weightless()).unwrap();
        for body in row.iter().rev() {
            reversed.insert(*body);
        }

        forward.step(0.01);
        reversed.step(0.01);

        let forward_middle = forward.bodies().get(BodyId(1)).unwrap().velocity.x;
        let reversed_middle = reversed.bodies().get(BodyId(1)).unwrap().velocity.x;
        assert_relative_eq!(forward_middle, -7.225, epsilon = 1e-9);
        assert_relative_eq!(reversed_middle, 7.225, epsilon = 1e-9);
        assert_eq!(forward.collision_events().len(), 2);
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let mut world = PhysicsWorld::default();
        let id = world.spawn(DVec2::new(10.0, 10.0));
        let before = *world.bodies().get(id).unwrap();

        world.step(0.0);
        world.step(-0.5);
        world.step(f64::NAN);
        world.step(f64::INFINITY);

        assert_eq!(*world.bodies().get(id).unwrap(), before);
        assert_eq!(world.step_count(), 0);
    }

    #[test]
    fn test_events_are_cleared_each_step() {
        let mut world = PhysicsWorld::default();
        world.insert(ball(50.0, 239.0, 0.0, 100.0));
        world.step(0.016);
        assert_eq!(world.collision_events().len(), 1);

        world.step(0.016);
        assert!(world.collision_events().is_empty());
        assert_eq!(world.step_count(), 2);
    }
}
