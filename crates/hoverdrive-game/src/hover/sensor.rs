//! Downward ground probe

use glam::Vec3;
use hoverdrive_physics::GroundQuery;
use tracing::debug;

/// Result of the most recent ground probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundHit {
    /// Distance from the body center to the ground
    pub distance: f32,
    /// Surface normal at the hit point
    pub normal: Vec3,
    /// Whether `distance` and `normal` come from the latest probe
    pub valid: bool,
}

impl Default for GroundHit {
    fn default() -> Self {
        Self {
            distance: 0.0,
            normal: Vec3::Y,
            valid: false,
        }
    }
}

/// Casts a ray straight down from the body once per frame
#[derive(Debug, Clone, Default)]
pub struct GroundSensor {
    grounded: bool,
    hit: GroundHit,
}

impl GroundSensor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe below `origin` and overwrite the grounded flag.
    ///
    /// A miss clears `grounded` and `hit.valid` but keeps the last distance
    /// and normal; readers must check the flag first.
    pub fn sense<G: GroundQuery + ?Sized>(
        &mut self,
        ground: &G,
        origin: Vec3,
        probe_distance: f32,
        layer_mask: u32,
    ) -> bool {
        let was_grounded = self.grounded;

        match ground.raycast(origin, Vec3::NEG_Y, probe_distance, layer_mask) {
            Some(contact) => {
                self.grounded = true;
                self.hit = GroundHit {
                    distance: contact.distance,
                    normal: contact.normal,
                    valid: true,
                };
            }
            None => {
                self.grounded = false;
                self.hit.valid = false;
            }
        }

        if self.grounded != was_grounded {
            debug!(grounded = self.grounded, distance = self.hit.distance, "Ground contact changed");
        }

        self.grounded
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn hit(&self) -> &GroundHit {
        &self.hit
    }
}
