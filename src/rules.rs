//! Gameplay tuning and the arithmetic rules of the run.
//!
//! Every rule the frame loop applies lives here as a plain function over
//! numbers and vectors, so it can be exercised without an ECS world or a
//! window. Systems in [`crate::systems`] only gather the inputs and write the
//! results back.
//!
//! Coordinates follow the scene layout: the path runs along the Z axis, the
//! cat runs toward negative Z, X is lateral and Y is up.

use fastrand::Rng;
use raylib::prelude::{Color, Vector2, Vector3};

// Animation
pub const ANIM_FPS: f32 = 10.0;
pub const ANIM_FRAME_COUNT: usize = 4;
pub const SHEET_COLUMNS: usize = 2;
pub const SHEET_ROWS: usize = 2;

// World
pub const GROUND_Y: f32 = 0.0;
pub const PATH_WIDTH: f32 = 10.0;
pub const BORDER_HEIGHT: f32 = 0.5;
pub const BORDER_WIDTH: f32 = 0.5;
pub const LAVA_WIDTH: f32 = 500.0;
pub const LAVA_LENGTH: f32 = 1000.0;
pub const LAVA_DROP: f32 = 0.05;
pub const GROUND_REPEAT: Vector2 = Vector2 { x: 2.0, y: 50.0 };
pub const LAVA_SCROLL_SPEED: f32 = 0.05;
pub const CASTLE_Z: f32 = -400.0;
pub const CASTLE_SCALE: f32 = 10.0;
/// Distance in front of the castle at which the run counts as won.
pub const CASTLE_WIN_BUFFER: f32 = 5.0;

// Player
pub const CAT_FORWARD_SPEED: f32 = 10.0;
pub const CAT_LATERAL_SPEED: f32 = 5.0;
pub const CAT_SCALE: f32 = 1.5;
pub const CAT_START_X: f32 = 0.0;
pub const CAT_START_Z: f32 = 45.0;
pub const CAMERA_FOLLOW_DISTANCE: f32 = 5.0;
pub const CAMERA_HEIGHT_OFFSET: f32 = 2.0;
pub const CAMERA_FOVY: f32 = 75.0;

// Enemies
pub const ENEMY_COUNT: usize = 20;
pub const ENEMY_SCALE: f32 = 1.2;
pub const ENEMY_HORIZONTAL_SPEED: f32 = 1.0;
pub const ENEMY_ACTIVATION_DISTANCE_Z: f32 = 10.0;
/// Lateral gap below which a drifting enemy stops correcting.
pub const ENEMY_DRIFT_DEAD_ZONE: f32 = 0.1;
pub const ENEMY_FIRST_GAP: f32 = 15.0;
pub const MIN_ENEMY_SPACING: f32 = 8.0;
pub const MAX_ENEMY_SPACING: f32 = 40.0;
pub const COLLISION_DISTANCE: f32 = 0.7;

// Feedback
pub const SKY_COLOR: Color = Color::new(135, 206, 235, 255);
pub const FLASH_COLOR: Color = Color::new(255, 0, 0, 255);
pub const FLASH_DURATION: f32 = 0.150;
pub const BORDER_COLOR: Color = Color::new(105, 105, 105, 255);

// Confetti
pub const CONFETTI_COUNT: usize = 200;
pub const CONFETTI_GRAVITY: f32 = 2.0;
pub const CONFETTI_FLOOR: f32 = GROUND_Y - 5.0;
pub const CONFETTI_SIZE: f32 = 0.2;

/// Seconds each sprite-sheet frame stays on screen.
pub fn frame_time() -> f32 {
    1.0 / ANIM_FPS
}

/// Height at which a billboard of the given height stands on the ground.
pub fn standing_height(scale_y: f32) -> f32 {
    GROUND_Y + scale_y / 2.0
}

/// Where the cat starts each run.
pub fn cat_start() -> Vector3 {
    Vector3 {
        x: CAT_START_X,
        y: standing_height(CAT_SCALE),
        z: CAT_START_Z,
    }
}

/// Vertical texture scroll of the path strip, in texture units per second.
pub fn ground_scroll_speed() -> f32 {
    CAT_FORWARD_SPEED / (LAVA_LENGTH / GROUND_REPEAT.y) / 50.0
}

/// Texture scroll of the lava planes, in texture units per second.
pub fn lava_scroll_velocity() -> Vector2 {
    Vector2 {
        x: LAVA_SCROLL_SPEED,
        y: LAVA_SCROLL_SPEED * 0.7,
    }
}

/// Advance a sprite-sheet timer by `dt`.
///
/// At most one frame is advanced per call; the overflow is carried over in
/// `timer`. Looping clips wrap to frame 0, one-shot clips hold the last frame.
/// Returns true when the visible frame changed.
pub fn tick_frame_timer(
    timer: &mut f32,
    frame: &mut usize,
    dt: f32,
    frame_time: f32,
    frame_count: usize,
    looped: bool,
) -> bool {
    if frame_count == 0 {
        return false;
    }
    *timer += dt;
    if *timer < frame_time {
        return false;
    }
    *timer -= frame_time;
    let next = *frame + 1;
    if next < frame_count {
        *frame = next;
        true
    } else if looped {
        *frame = 0;
        true
    } else {
        false
    }
}

/// Cell of a sprite-sheet grid as (column, row), row-major from the top-left.
pub fn frame_cell(frame: usize, columns: usize) -> (usize, usize) {
    let columns = columns.max(1);
    (frame % columns, frame / columns)
}

/// Lateral velocity produced by the two steering intents. Holding both cancels.
pub fn lateral_velocity(move_left: bool, move_right: bool) -> f32 {
    let mut vx = 0.0;
    if move_left {
        vx -= CAT_LATERAL_SPEED;
    }
    if move_right {
        vx += CAT_LATERAL_SPEED;
    }
    vx
}

/// Cat position after one frame of running.
///
/// Forward motion is toward negative Z at `forward_speed`; `y` is pinned to
/// `ground_y`. X is never clamped.
pub fn integrate_runner(
    pos: Vector3,
    forward_speed: f32,
    lateral_velocity: f32,
    ground_y: f32,
    dt: f32,
) -> Vector3 {
    Vector3 {
        x: pos.x + lateral_velocity * dt,
        y: ground_y,
        z: pos.z - forward_speed * dt,
    }
}

/// True once the cat is within the win buffer of the castle.
pub fn reached_castle(cat_z: f32, castle_z: f32) -> bool {
    cat_z <= castle_z + CASTLE_WIN_BUFFER
}

/// True when the cat has stepped past either edge of the path.
pub fn is_off_path(cat_x: f32, path_width: f32) -> bool {
    cat_x.abs() > path_width / 2.0
}

/// New X for an enemy drifting toward the cat.
///
/// Only enemies strictly ahead of the cat and closer than the activation
/// distance move. The step is `ENEMY_HORIZONTAL_SPEED * dt`, never more than
/// the remaining gap, and gaps inside the dead zone are left alone.
pub fn enemy_drift_x(cat: Vector3, enemy: Vector3, dt: f32) -> f32 {
    let distance_z = cat.z - enemy.z;
    if distance_z <= 0.0 || distance_z >= ENEMY_ACTIVATION_DISTANCE_Z {
        return enemy.x;
    }
    let gap = cat.x - enemy.x;
    if gap.abs() <= ENEMY_DRIFT_DEAD_ZONE {
        return enemy.x;
    }
    let step = (ENEMY_HORIZONTAL_SPEED * dt).min(gap.abs());
    enemy.x + gap.signum() * step
}

/// True when the enemy is behind the cat (the cat has run past it).
pub fn enemy_is_behind(enemy_z: f32, cat_z: f32) -> bool {
    enemy_z > cat_z
}

/// Euclidean distance between two points.
pub fn distance(a: Vector3, b: Vector3) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// True when two bodies are closer than the collision distance.
pub fn collides(a: Vector3, b: Vector3) -> bool {
    distance(a, b) < COLLISION_DISTANCE
}

/// Camera position and look-at target trailing the cat.
pub fn camera_rig(cat: Vector3) -> (Vector3, Vector3) {
    let position = Vector3 {
        x: 0.0,
        y: cat.y + CAMERA_HEIGHT_OFFSET,
        z: cat.z + CAMERA_FOLLOW_DISTANCE,
    };
    (position, cat)
}

/// Uniform value in `[-range / 2, range / 2)`.
pub fn rand_spread(rng: &mut Rng, range: f32) -> f32 {
    range * (rng.f32() - 0.5)
}

/// Uniform value in `[low, high)`.
pub fn rand_between(rng: &mut Rng, low: f32, high: f32) -> f32 {
    low + (high - low) * rng.f32()
}

/// Lay out `count` enemies down the path ahead of `start_z`.
///
/// The first enemy sits at least [`ENEMY_FIRST_GAP`] plus one spacing ahead;
/// each following one is a random spacing further. X is spread over 80% of
/// the path width. Returned as (x, z) pairs ordered by distance.
pub fn enemy_layout(rng: &mut Rng, start_z: f32, count: usize) -> Vec<(f32, f32)> {
    let mut z = start_z - ENEMY_FIRST_GAP;
    (0..count)
        .map(|_| {
            z -= rand_between(rng, MIN_ENEMY_SPACING, MAX_ENEMY_SPACING);
            let x = rand_spread(rng, PATH_WIDTH * 0.8);
            (x, z)
        })
        .collect()
}

/// Start position and velocity of one confetti particle, relative to the camera.
pub fn confetti_spawn(rng: &mut Rng, camera: Vector3) -> (Vector3, Vector3) {
    let position = Vector3 {
        x: rand_spread(rng, PATH_WIDTH * 1.5),
        y: rand_between(rng, camera.y + 5.0, camera.y + 15.0),
        z: camera.z - rand_between(rng, 5.0, 15.0),
    };
    let velocity = Vector3 {
        x: rand_spread(rng, 0.5),
        y: rand_between(rng, -2.0, -4.0),
        z: rand_spread(rng, 0.5),
    };
    (position, velocity)
}

/// One confetti step: move by the current velocity, then apply gravity.
pub fn confetti_step(pos: Vector3, vel: Vector3, dt: f32) -> (Vector3, Vector3) {
    let pos = Vector3 {
        x: pos.x + vel.x * dt,
        y: pos.y + vel.y * dt,
        z: pos.z + vel.z * dt,
    };
    let vel = Vector3 {
        x: vel.x,
        y: vel.y - CONFETTI_GRAVITY * dt,
        z: vel.z,
    };
    (pos, vel)
}
