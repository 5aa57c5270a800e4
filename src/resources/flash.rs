//! Background flash shown when a run is lost.

use bevy_ecs::prelude::Resource;

use crate::rules::FLASH_DURATION;

/// Remaining time of the red background flash, in seconds.
///
/// While `remaining > 0` the renderer clears to the flash colour instead of
/// the sky colour.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct BackgroundFlash {
    pub remaining: f32,
}

impl BackgroundFlash {
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Start a flash. Does nothing and returns false if one is already showing.
    pub fn trigger(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.remaining = FLASH_DURATION;
        true
    }

    /// Count the flash down by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_does_not_overlap() {
        let mut flash = BackgroundFlash::default();
        assert!(flash.trigger());
        flash.tick(0.1);
        assert!(!flash.trigger());
        assert!(flash.is_active());
    }

    #[test]
    fn flash_ends_after_duration() {
        let mut flash = BackgroundFlash::default();
        flash.trigger();
        flash.tick(0.1);
        flash.tick(0.1);
        assert!(!flash.is_active());
        assert_eq!(flash.remaining, 0.0);
        assert!(flash.trigger());
    }
}
