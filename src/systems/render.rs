//! Rendering.
//!
//! [`render_system`] draws one frame: the sky (or the game-over flash), the
//! 3D scene through the chase camera, then the HUD and the optional debug
//! overlay on top. Anything whose texture failed to load is drawn as a flat
//! colour so the game stays playable without assets.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use raylib::ffi;
use raylib::prelude::*;

use crate::components::animation::Animation;
use crate::components::billboard::Billboard;
use crate::components::confetti::Confetti;
use crate::components::enemy::Enemy;
use crate::components::runner::Player;
use crate::components::surface::{SolidBox, Surface, TextureScroll};
use crate::components::tint::Tint;
use crate::components::worldposition::WorldPosition;
use crate::resources::camera::FollowCamera;
use crate::resources::debugmode::DebugMode;
use crate::resources::flash::BackgroundFlash;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::input::InputState;
use crate::resources::texturestore::TextureStore;
use crate::resources::windowsize::{HudLayout, WindowSize};
use crate::resources::worldtime::WorldTime;
use crate::rules::{COLLISION_DISTANCE, CONFETTI_SIZE, FLASH_COLOR, SKY_COLOR};

const HUD_BUTTON: Color = Color::new(0, 0, 0, 90);
const HUD_BUTTON_HELD: Color = Color::new(0, 0, 0, 160);
const GAME_OVER_COLOR: Color = Color::new(220, 20, 20, 255);
const WIN_COLOR: Color = Color::new(255, 215, 0, 255);

/// Everything that is drawn in world space.
#[derive(SystemParam)]
pub struct SceneQueries<'w, 's> {
    surfaces: Query<'w, 's, (&'static WorldPosition, &'static Surface, Option<&'static TextureScroll>)>,
    boxes: Query<'w, 's, (&'static WorldPosition, &'static SolidBox)>,
    billboards: Query<
        'w,
        's,
        (
            &'static WorldPosition,
            &'static Billboard,
            Option<&'static Animation>,
            Option<&'static Tint>,
        ),
    >,
    confetti: Query<'w, 's, (&'static WorldPosition, &'static Tint), With<Confetti>>,
    cat: Query<'w, 's, &'static WorldPosition, With<Player>>,
    enemies: Query<'w, 's, (&'static Enemy, &'static WorldPosition)>,
}

/// Draw the frame.
#[allow(clippy::too_many_arguments)]
pub fn render_system(
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    scene: SceneQueries,
    textures: Option<Res<TextureStore>>,
    camera: Res<FollowCamera>,
    flash: Res<BackgroundFlash>,
    state: Res<GameState>,
    window: Res<WindowSize>,
    input: Res<InputState>,
    time: Res<WorldTime>,
    debug: Option<Res<DebugMode>>,
) {
    let empty = TextureStore::default();
    let textures = textures.as_deref().unwrap_or(&empty);
    let cam = camera.to_camera3d();

    let mut d = rl.begin_drawing(&th);
    d.clear_background(if flash.is_active() { FLASH_COLOR } else { SKY_COLOR });

    {
        let mut d3 = d.begin_mode3D(cam);
        draw_surfaces(&mut d3, &scene, textures);
        for (position, solid) in scene.boxes.iter() {
            d3.draw_cube(position.pos, solid.size.x, solid.size.y, solid.size.z, solid.color);
        }
        draw_billboards(&mut d3, &scene, textures, cam);
        for (position, tint) in scene.confetti.iter() {
            d3.draw_cube(position.pos, CONFETTI_SIZE, CONFETTI_SIZE, CONFETTI_SIZE, tint.color);
        }
        if debug.is_some() {
            draw_collision_spheres(&mut d3, &scene);
        }
    }

    draw_hud(&mut d, &window.hud_layout(), &window, state.get(), &input);
    if debug.is_some() {
        draw_debug_overlay(&mut d, &scene, state.get(), &time);
    }
}

fn draw_surfaces(d3: &mut RaylibMode3D<RaylibDrawHandle>, scene: &SceneQueries, textures: &TextureStore) {
    for (position, surface, scroll) in scene.surfaces.iter() {
        let center = position.pos;
        let Some(tex) = textures.get(&surface.tex_key) else {
            d3.draw_plane(center, surface.size, surface.fallback);
            continue;
        };
        let offset = scroll.map_or(Vector2 { x: 0.0, y: 0.0 }, |s| s.offset);
        let (x0, x1) = (center.x - surface.size.x / 2.0, center.x + surface.size.x / 2.0);
        let (z0, z1) = (center.z - surface.size.y / 2.0, center.z + surface.size.y / 2.0);
        let (u0, u1) = (offset.x, offset.x + surface.repeat.x);
        let (v0, v1) = (offset.y, offset.y + surface.repeat.y);
        // Immediate-mode quad so UVs can exceed 1.0 and tile with REPEAT wrap.
        unsafe {
            ffi::rlSetTexture(tex.id);
            ffi::rlBegin(ffi::RL_QUADS as i32);
            ffi::rlColor4ub(255, 255, 255, 255);
            ffi::rlNormal3f(0.0, 1.0, 0.0);
            ffi::rlTexCoord2f(u0, v0);
            ffi::rlVertex3f(x0, center.y, z0);
            ffi::rlTexCoord2f(u0, v1);
            ffi::rlVertex3f(x0, center.y, z1);
            ffi::rlTexCoord2f(u1, v1);
            ffi::rlVertex3f(x1, center.y, z1);
            ffi::rlTexCoord2f(u1, v0);
            ffi::rlVertex3f(x1, center.y, z0);
            ffi::rlEnd();
            ffi::rlSetTexture(0);
        }
    }
}

fn draw_billboards(
    d3: &mut RaylibMode3D<RaylibDrawHandle>,
    scene: &SceneQueries,
    textures: &TextureStore,
    cam: Camera3D,
) {
    // Far to near so transparent sprite edges blend over what is behind them.
    let mut sorted: Vec<_> = scene.billboards.iter().collect();
    let eye = cam.position;
    let dist2 = |p: Vector3| {
        let (dx, dy, dz) = (p.x - eye.x, p.y - eye.y, p.z - eye.z);
        dx * dx + dy * dy + dz * dz
    };
    sorted.sort_by(|a, b| dist2(b.0.pos).total_cmp(&dist2(a.0.pos)));

    for (position, billboard, animation, tint) in sorted {
        let frame = animation.map_or(0, |a| a.frame_index);
        let tint = tint.map_or(Color::WHITE, |t| t.color);
        match textures.get(&billboard.tex_key) {
            Some(tex) => {
                let source = billboard.source_rect(frame, tex.width as f32, tex.height as f32);
                d3.draw_billboard_rec(cam, tex, source, position.pos, billboard.size, tint);
            }
            None => {
                let s = billboard.size;
                d3.draw_cube(position.pos, s.x, s.y, s.x * 0.1, billboard.fallback);
            }
        }
    }
}

fn draw_collision_spheres(d3: &mut RaylibMode3D<RaylibDrawHandle>, scene: &SceneQueries) {
    if let Ok(cat) = scene.cat.single() {
        d3.draw_sphere_wires(cat.pos, COLLISION_DISTANCE / 2.0, 8, 8, Color::GREEN);
    }
    for (enemy, position) in scene.enemies.iter() {
        let color = if enemy.has_passed { Color::GRAY } else { Color::RED };
        d3.draw_sphere_wires(position.pos, COLLISION_DISTANCE / 2.0, 8, 8, color);
    }
}

fn draw_centered_text(d: &mut RaylibDrawHandle, text: &str, center_x: f32, y: f32, size: i32, color: Color) {
    let width = measure_text(text, size);
    d.draw_text(text, center_x as i32 - width / 2, y as i32, size, color);
}

fn draw_button(d: &mut RaylibDrawHandle, rect: Rectangle, label: &str, held: bool) {
    d.draw_rectangle_rec(rect, if held { HUD_BUTTON_HELD } else { HUD_BUTTON });
    d.draw_rectangle_lines_ex(rect, 2.0, Color::WHITE);
    let size = (rect.height * 0.5) as i32;
    draw_centered_text(
        d,
        label,
        rect.x + rect.width / 2.0,
        rect.y + (rect.height - size as f32) / 2.0,
        size,
        Color::WHITE,
    );
}

fn draw_hud(d: &mut RaylibDrawHandle, hud: &HudLayout, window: &WindowSize, state: &GameStates, input: &InputState) {
    draw_button(d, hud.left, "<", input.wants_left());
    draw_button(d, hud.right, ">", input.wants_right());

    let message = match state {
        GameStates::GameOver(_) => Some(("GAME OVER", GAME_OVER_COLOR)),
        GameStates::Won => Some(("YOU WIN!", WIN_COLOR)),
        _ => None,
    };
    if let Some((text, color)) = message {
        let size = (window.h as f32 * 0.12) as i32;
        let center_x = window.w as f32 / 2.0;
        let y = window.h as f32 * 0.3;
        draw_centered_text(d, text, center_x + 3.0, y + 3.0, size, Color::BLACK);
        draw_centered_text(d, text, center_x, y, size, color);
        draw_button(d, hud.restart, "RESTART", input.pointer_restart.active);
    }
}

fn draw_debug_overlay(d: &mut RaylibDrawHandle, scene: &SceneQueries, state: &GameStates, time: &WorldTime) {
    let fps = d.get_fps();
    d.draw_text(&format!("DEBUG (F11) | FPS: {}", fps), 10, 10, 20, Color::BLACK);
    d.draw_text(&debug_clock_line(time), 10, 110, 20, Color::BLACK);
    if let Ok(cat) = scene.cat.single() {
        let text = format!("Cat: ({:.2}, {:.2}, {:.2})", cat.pos.x, cat.pos.y, cat.pos.z);
        d.draw_text(&text, 10, 35, 20, Color::BLACK);
    }
    d.draw_text(&format!("State: {:?}", state), 10, 60, 20, Color::BLACK);
    let passed = scene.enemies.iter().filter(|(e, _)| e.has_passed).count();
    let total = scene.enemies.iter().count();
    d.draw_text(&format!("Enemies passed: {}/{}", passed, total), 10, 85, 20, Color::BLACK);
}

/// Clock line of the debug overlay.
fn debug_clock_line(time: &WorldTime) -> String {
    format!(
        "Time: {:.1}s | Frame: {} | dt: {:.1}ms",
        time.elapsed,
        time.frame_count,
        time.delta * 1000.0
    )
}
