use bevy_ecs::prelude::*;

use crate::components::runner::Player;
use crate::components::worldposition::WorldPosition;
use crate::resources::camera::FollowCamera;

/// Keep the camera trailing the cat.
pub fn camera_follow(cat: Query<&WorldPosition, With<Player>>, mut camera: ResMut<FollowCamera>) {
    if let Ok(cat) = cat.single() {
        camera.follow(cat.pos);
    }
}
