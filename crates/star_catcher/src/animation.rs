use core::time::Duration;

use bevy::prelude::*;

/// A looping run of consecutive atlas frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteClip {
    Idle,
    Run,
    Spin,
}

impl SpriteClip {
    /// First and last atlas index, inclusive.
    pub const fn frames(self) -> (usize, usize) {
        match self {
            Self::Idle => (0, 3),
            Self::Run => (4, 19),
            Self::Spin => (0, 11),
        }
    }

    pub const fn fps(self) -> u64 {
        match self {
            Self::Idle => 6,
            Self::Run | Self::Spin => 12,
        }
    }

    pub const fn frame_count(self) -> usize {
        let (first, last) = self.frames();
        last - first + 1
    }

    fn frame_duration(self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.fps())
    }
}

#[derive(Component, Debug)]
pub struct FrameAnimation {
    clip: SpriteClip,
    frame: usize,
    timer: Timer,
}

impl FrameAnimation {
    pub fn new(clip: SpriteClip) -> Self {
        Self {
            clip,
            frame: 0,
            timer: Timer::new(clip.frame_duration(), TimerMode::Repeating),
        }
    }

    /// Switches clips, restarting only when the clip actually changes.
    pub fn play(&mut self, clip: SpriteClip) {
        if self.clip != clip {
            *self = Self::new(clip);
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.timer.tick(delta);
        let steps = self.timer.times_finished_this_tick() as usize;
        self.frame = (self.frame + steps) % self.clip.frame_count();
    }

    pub const fn atlas_index(&self) -> usize {
        self.clip.frames().0 + self.frame
    }
}

pub fn animate_sprites(time: Res<Time>, mut query: Query<(&mut FrameAnimation, &mut Sprite)>) {
    for (mut animation, mut sprite) in &mut query {
        animation.advance(time.delta());
        if let Some(atlas) = &mut sprite.texture_atlas {
            atlas.index = animation.atlas_index();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_loops_over_four_frames_at_six_fps() {
        let mut animation = FrameAnimation::new(SpriteClip::Idle);
        let frame = Duration::from_nanos(1_000_000_000 / 6);

        let indices: Vec<_> = (0..5)
            .map(|_| {
                animation.advance(frame);
                animation.atlas_index()
            })
            .collect();
        assert_eq!(indices, vec![1, 2, 3, 0, 1], "wraps after frame 3");
    }

    #[test]
    fn run_starts_at_frame_four() {
        let mut animation = FrameAnimation::new(SpriteClip::Idle);
        animation.play(SpriteClip::Run);
        assert_eq!(animation.atlas_index(), 4, "first run frame");

        animation.advance(Duration::from_secs(1));
        assert_eq!(animation.atlas_index(), 4 + 12, "twelve frames a second");
    }

    #[test]
    fn replaying_the_current_clip_keeps_its_frame() {
        let mut animation = FrameAnimation::new(SpriteClip::Spin);
        animation.advance(Duration::from_millis(250));
        let before = animation.atlas_index();

        animation.play(SpriteClip::Spin);
        assert_eq!(animation.atlas_index(), before, "not restarted");
    }
}
