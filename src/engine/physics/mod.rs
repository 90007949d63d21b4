// Ball physics: append-only body store plus an impulse-based stepper

pub mod body;
mod collision;
pub mod config;
mod world;

pub use body::BodyId;
pub use config::WorldConfig;
pub use world::PhysicsWorld;

#[allow(unused_imports)]
pub use body::{Body, BodyBuilder, BodySet, DEFAULT_RADIUS};
#[allow(unused_imports)]
pub use collision::CollisionEvent;
#[allow(unused_imports)]
pub use config::{Platform, DEFAULT_WORLD};

#[allow(unused_imports)]
pub use collision::{detect, Contact};

/// Physics setup errors
///
/// Stepping never fails; these only come from building bodies or worlds.
#[derive(Debug, thiserror::Error)]
pub enum PhysicsError {
    #[error("Invalid body radius: {0} (must be finite and > 0)")]
    InvalidRadius(f64),

    #[error("Invalid world config: {0}")]
    InvalidConfig(String),
}
