//! Chase camera resource.
//!
//! Holds the position and look-at target written by
//! [`camera_follow`](crate::systems::camera::camera_follow) and read by the
//! renderer to build a raylib [`Camera3D`].

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera3D, Vector3};

use crate::rules::{CAMERA_FOVY, camera_rig, cat_start};

const ORIGIN: Vector3 = Vector3 {
    x: 0.0,
    y: 0.0,
    z: 0.0,
};
const UP: Vector3 = Vector3 {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};

#[derive(Resource, Debug, Clone, Copy)]
pub struct FollowCamera {
    pub position: Vector3,
    pub target: Vector3,
    pub fovy: f32,
}

impl Default for FollowCamera {
    fn default() -> Self {
        let mut camera = FollowCamera {
            position: ORIGIN,
            target: ORIGIN,
            fovy: CAMERA_FOVY,
        };
        camera.follow(cat_start());
        camera
    }
}

impl FollowCamera {
    /// Place the camera behind and above `cat`, looking at it.
    pub fn follow(&mut self, cat: Vector3) {
        let (position, target) = camera_rig(cat);
        self.position = position;
        self.target = target;
    }

    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D::perspective(self.position, self.target, UP, self.fovy)
    }
}
