// World parameters for the ball simulation
//
// Everything here is fixed once the world is built. Tests that need other
// values start from `WorldConfig::default()` and use the `with_*` setters.

use super::PhysicsError;
use glam::DVec2;

/// Static platform the balls land on (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    /// Left edge
    pub x: f64,
    /// Top edge, the lower collision boundary of the arena
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Platform {
    /// Create a platform from its top-left corner and size
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner
    pub fn origin(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Width and height
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

/// Immutable simulation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    /// Downward acceleration (units/s²)
    pub gravity: f64,
    /// Applied to `velocity.y` on platform contact (negative reflects)
    pub bounce_factor: f64,
    /// Cap for downward speed and for horizontal speed in both directions
    pub max_velocity: f64,
    /// Ball-to-ball restitution (0 = inelastic, 1 = elastic)
    pub restitution: f64,
    /// Fraction of the penetration pushed out per frame
    pub correction_percent: f64,
    /// Penetration left alone by the positional correction
    pub correction_slop: f64,
    /// Center distances below this are degenerate and never resolved
    pub min_contact_distance: f64,
    pub platform: Platform,
}

/// Arena matching a 300x300 window with a 20px platform at the bottom
pub const DEFAULT_WORLD: WorldConfig = WorldConfig {
    gravity: 200.0,
    bounce_factor: -0.9,
    max_velocity: 300.0,
    restitution: 0.7,
    correction_percent: 0.2,
    correction_slop: 0.01,
    min_contact_distance: 1e-9,
    platform: Platform::new(0.0, 280.0, 300.0, 20.0),
};

impl Default for WorldConfig {
    fn default() -> Self {
        DEFAULT_WORLD
    }
}

impl WorldConfig {
    /// Set gravity
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the velocity clamp
    pub fn with_max_velocity(mut self, max_velocity: f64) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    /// Set the ball-to-ball restitution
    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set positional correction percent and slop
    pub fn with_correction(mut self, percent: f64, slop: f64) -> Self {
        self.correction_percent = percent;
        self.correction_slop = slop;
        self
    }

    /// Replace the platform
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Check that every parameter is usable by the stepper
    pub fn validate(&self) -> Result<(), PhysicsError> {
        let finite = [
            ("gravity", self.gravity),
            ("bounce_factor", self.bounce_factor),
            ("max_velocity", self.max_velocity),
            ("restitution", self.restitution),
            ("correction_percent", self.correction_percent),
            ("correction_slop", self.correction_slop),
            ("min_contact_distance", self.min_contact_distance),
            ("platform.x", self.platform.x),
            ("platform.y", self.platform.y),
            ("platform.width", self.platform.width),
            ("platform.height", self.platform.height),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(PhysicsError::InvalidConfig(format!("{name} must be finite")));
        }

        if self.max_velocity <= 0.0 {
            return Err(PhysicsError::InvalidConfig(
                "max_velocity must be > 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(PhysicsError::InvalidConfig(
                "restitution must be within [0, 1]".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.correction_percent) {
            return Err(PhysicsError::InvalidConfig(
                "correction_percent must be within [0, 1]".to_string(),
            ));
        }
        if self.correction_slop < 0.0 || self.min_contact_distance < 0.0 {
            return Err(PhysicsError::InvalidConfig(
                "correction_slop and min_contact_distance must be >= 0".to_string(),
            ));
        }
        if self.platform.width <= 0.0 || self.platform.height <= 0.0 {
            return Err(PhysicsError::InvalidConfig(
                "platform must have a positive size".to_string(),
            ));
        }

        Ok(())
    }
}
