// The ball pit: physics world plus what the window shows of it

use glam::{Vec2, Vec4};
use log::debug;

use crate::engine::physics::{BodyId, PhysicsError, PhysicsWorld, WorldConfig};
use crate::engine::renderer::Shape;

/// Ball fill color
pub const BALL_COLOR: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);

/// Platform fill color
pub const PLATFORM_COLOR: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);

/// Simulation state driven by the frame loop
pub struct Scene {
    world: PhysicsWorld,
}

impl Scene {
    /// Create an empty scene
    pub fn new(config: WorldConfig) -> Result<Self, PhysicsError> {
        Ok(Self {
            world: PhysicsWorld::new(config)?,
        })
    }

    /// Drop a ball with its bounding box corner at `at` (world units)
    pub fn spawn_ball(&mut self, at: Vec2) -> BodyId {
        let id = self.world.spawn(at.as_dvec2());
        debug!(
            "Spawned ball {} at ({:.1}, {:.1}), {} in play",
            id.index(),
            at.x,
            at.y,
            self.world.body_count()
        );
        id
    }

    /// Advance the simulation by `dt` seconds
    pub fn update(&mut self, dt: f64) {
        self.world.step(dt);
    }

    /// Platform plus every ball, back to front
    pub fn shapes(&self) -> Vec<Shape> {
        let platform = self.world.config().platform;
        let mut shapes = Vec::with_capacity(self.world.body_count() + 1);

        shapes.push(Shape::Rect {
            origin: platform.origin().as_vec2(),
            size: platform.size().as_vec2(),
            color: PLATFORM_COLOR,
        });

        shapes.extend(self.world.bodies().iter().map(|body| Shape::Circle {
            center: body.center().as_vec2(),
            radius: body.radius() as f32,
            color: BALL_COLOR,
        }));

        shapes
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            world: PhysicsWorld::default(),
        }
    }
}
