//! Corpse spin. Dead actors stop thinking but keep tumbling at their
//! spin rate until the host removes them; gravity keeps pulling them
//! through the host's integrator.

use hecs::World;

use crate::components::Body;

pub fn death_system(world: &mut World, dt: f32) {
    for (_entity, body) in world.query_mut::<&mut Body>() {
        if body.dead {
            body.rotation += body.spin_rate * dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thicket_logic::geometry::Vec2;
    use thicket_logic::probes::ProbeReach;

    use crate::host::layers;

    #[test]
    fn test_only_corpses_accumulate_rotation() {
        let mut world = World::new();
        let mut corpse = Body::new(
            Vec2::ZERO,
            Vec2::new(0.4, 0.4),
            layers::ENEMY,
            ProbeReach::grounded_only(1.1, 0.7),
        );
        corpse.dead = true;
        corpse.spin_rate = -150.0;
        let corpse = world.spawn((corpse,));
        let live = world.spawn((Body::new(
            Vec2::ZERO,
            Vec2::new(0.4, 0.4),
            layers::ENEMY,
            ProbeReach::grounded_only(1.1, 0.7),
        ),));

        for _ in 0..60 {
            death_system(&mut world, 1.0 / 60.0);
        }
        let spun = world.get::<&Body>(corpse).unwrap().rotation;
        assert!((spun + 150.0).abs() < 1e-3);
        assert_eq!(world.get::<&Body>(live).unwrap().rotation, 0.0);
    }
}
