//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame with raylib's frame delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Store this frame's delta and advance the running totals.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.delta = dt;
    wt.elapsed += dt;
    wt.frame_count += 1;
}
