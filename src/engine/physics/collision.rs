use super::body::{Body, BodyId};
use super::config::{Platform, WorldConfig};
use glam::DVec2;

/// Overlap between two bodies found by the narrow phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Distance between the two centers
    pub distance: f64,
    /// Sum of the radii
    pub reach: f64,
    /// Unnormalized direction from the first center to the second
    pub delta: DVec2,
}

impl Contact {
    /// Unit normal pointing from the first body to the second
    ///
    /// Only meaningful when `distance` is not degenerate.
    pub fn normal(&self) -> DVec2 {
        self.delta / self.distance
    }

    /// How deep the circles overlap
    pub fn penetration(&self) -> f64 {
        self.reach - self.distance
    }
}

/// Test two bodies for overlap
///
/// The comparison is strict: circles that exactly touch do not collide.
pub fn detect(a: &Body, b: &Body) -> Option<Contact> {
    let delta = b.center() - a.center();
    let distance = delta.length();
    let reach = a.radius() + b.radius();

    (distance < reach).then_some(Contact {
        distance,
        reach,
        delta,
    })
}

/// Resolve an overlapping pair with an impulse plus a partial push-apart
///
/// Bodies already separating along the normal are left alone entirely, the
/// positional correction included. Returns the impulse magnitude when the
/// pair was resolved.
pub fn resolve(a: &mut Body, b: &mut Body, contact: &Contact, config: &WorldConfig) -> Option<f64> {
    let normal = contact.normal();
    let relative_velocity = b.velocity - a.velocity;
    let velocity_along_normal = relative_velocity.dot(normal);

    if velocity_along_normal > 0.0 {
        return None;
    }

    let inv_sum = a.inv_radius() + b.inv_radius();

    let j = -(1.0 + config.restitution) * velocity_along_normal / inv_sum;
    let impulse = normal * j;
    a.velocity -= impulse * a.inv_radius();
    b.velocity += impulse * b.inv_radius();

    let depth = (contact.penetration() - config.correction_slop).max(0.0);
    let correction = normal * (depth / inv_sum * config.correction_percent);
    a.position -= correction * a.inv_radius();
    b.position += correction * b.inv_radius();

    Some(j)
}

/// Clamp a body onto the platform and bounce it
///
/// Returns the vertical speed the body hit the platform with.
pub fn resolve_platform(body: &mut Body, platform: &Platform, bounce_factor: f64) -> Option<f64> {
    if body.bottom() <= platform.y {
        return None;
    }

    let impact_speed = body.velocity.y;
    body.position.y = platform.y - 2.0 * body.radius();
    body.velocity.y *= bounce_factor;
    Some(impact_speed)
}

/// Something the stepper resolved during the last step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionEvent {
    /// A body was pushed back onto the platform
    Platform { body: BodyId, impact_speed: f64 },

    /// Two bodies exchanged an impulse
    Contact {
        body1: BodyId,
        body2: BodyId,
        impulse: f64,
    },
}
