use bevy_ecs::prelude::*;

use crate::components::confetti::Confetti;
use crate::components::worldposition::WorldPosition;
use crate::resources::worldtime::WorldTime;
use crate::rules::{CONFETTI_FLOOR, confetti_step};

/// Let confetti fall and drop the pieces that sank below the floor.
///
/// Runs in every state so the celebration keeps going after the run stops.
pub fn confetti_system(
    mut commands: Commands,
    mut query: Query<(Entity, &mut WorldPosition, &mut Confetti)>,
    time: Res<WorldTime>,
) {
    for (entity, mut position, mut confetti) in query.iter_mut() {
        let (pos, velocity) = confetti_step(position.pos, confetti.velocity, time.delta);
        position.pos = pos;
        confetti.velocity = velocity;
        if pos.y < CONFETTI_FLOOR {
            commands.entity(entity).despawn();
        }
    }
}
