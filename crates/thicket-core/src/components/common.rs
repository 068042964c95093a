//! Components shared by every actor kind.

use thicket_logic::geometry::Vec2;
use thicket_logic::orientation::Facing;
use thicket_logic::probes::{ProbeFlags, ProbeReach};

use crate::host::LayerMask;

/// Physical state of an actor.
///
/// The simulation mutates `velocity`, `facing` and the death fields; the
/// host owns integration, so it writes `position` back after moving the
/// body and resolving contacts. `probes` is refreshed at the start of
/// every tick and is only valid within that tick.
#[derive(Debug, Clone)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    pub half_extents: Vec2,
    /// Layer this body lives on.
    pub layer: LayerMask,
    /// Layer its target probe looks for. Zero for actors that do not hunt.
    pub sight_mask: LayerMask,
    pub reach: ProbeReach,
    pub probes: ProbeFlags,
    /// Terminal. A dead body keeps falling and spinning but stops thinking.
    pub dead: bool,
    /// When false the body neither blocks nor receives contacts.
    pub surfaces_enabled: bool,
    pub gravity_enabled: bool,
    /// Visual roll in degrees. Only corpses accumulate it.
    pub rotation: f32,
    /// Signed corpse spin in degrees per second.
    pub spin_rate: f32,
}

impl Body {
    pub fn new(position: Vec2, half_extents: Vec2, layer: LayerMask, reach: ProbeReach) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            half_extents,
            layer,
            sight_mask: 0,
            reach,
            probes: ProbeFlags::default(),
            dead: false,
            surfaces_enabled: true,
            gravity_enabled: true,
            rotation: 0.0,
            spin_rate: 0.0,
        }
    }

    /// Flip facing. Sign and direction always change together.
    pub fn flip(&mut self) {
        self.facing = self.facing.flipped();
    }
}
