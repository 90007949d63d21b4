use super::PhysicsError;
use glam::DVec2;

/// Radius every spawned ball gets
pub const DEFAULT_RADIUS: f64 = 20.0;

/// Index of a body in its `BodySet`, stable for the life of the set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

impl BodyId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Dynamic circular body
///
/// `position` is the top-left corner of the bounding box, so the center sits
/// at `position + (radius, radius)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: DVec2,
    pub velocity: DVec2,
    radius: f64,
}

impl Body {
    /// Create a resting body; the radius must be finite and positive
    pub fn new(position: DVec2, radius: f64) -> Result<Self, PhysicsError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(PhysicsError::InvalidRadius(radius));
        }
        Ok(Self {
            position,
            velocity: DVec2::ZERO,
            radius,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Center of the circle
    pub fn center(&self) -> DVec2 {
        self.position + DVec2::splat(self.radius)
    }

    /// Inverse of the radius, which stands in for inverse mass
    pub fn inv_radius(&self) -> f64 {
        1.0 / self.radius
    }

    /// Bottom edge of the bounding box
    pub fn bottom(&self) -> f64 {
        self.position.y + 2.0 * self.radius
    }
}

/// Builder for bodies that need more than the spawn defaults
pub struct BodyBuilder {
    position: DVec2,
    velocity: DVec2,
    radius: f64,
}

impl BodyBuilder {
    /// Start from a resting default-radius body at `position`
    pub fn new(position: DVec2) -> Self {
        Self {
            position,
            velocity: DVec2::ZERO,
            radius: DEFAULT_RADIUS,
        }
    }

    /// Set the radius
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the initial velocity
    pub fn velocity(mut self, x: f64, y: f64) -> Self {
        self.velocity = DVec2::new(x, y);
        self
    }

    /// Build the body
    pub fn build(self) -> Result<Body, PhysicsError> {
        let mut body = Body::new(self.position, self.radius)?;
        body.velocity = self.velocity;
        Ok(body)
    }
}

/// Append-only, ordered store of bodies
#[derive(Debug, Default, Clone)]
pub struct BodySet {
    bodies: Vec<Body>,
}

impl BodySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resting default-radius body at `position`
    pub fn spawn(&mut self, position: DVec2) -> BodyId {
        self.push(Body {
            position,
            velocity: DVec2::ZERO,
            radius: DEFAULT_RADIUS,
        })
    }

    /// Append an already built body
    pub fn insert(&mut self, body: Body) -> BodyId {
        self.push(body)
    }

    fn push(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.bodies.len());
        self.bodies.push(body);
        id
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0)
    }

    /// Bodies in store order
    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.iter_mut()
    }

    /// Disjoint mutable borrows of bodies `i` and `j`, requires `i < j < len`
    pub fn pair_mut(&mut self, i: usize, j: usize) -> (&mut Body, &mut Body) {
        debug_assert!(i < j, "pair_mut expects i < j");
        let (head, tail) = self.bodies.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    }
}
