//! Keyframe clips for the built-in robot scene

use super::model::{Model, PartId};
use crate::rasterizer::Vec3;

/// Which part transform a track drives.
/// The viewer owns rotation.z for the spin control, so rotation tracks
/// write x and y only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelTarget {
    Translation,
    Rotation,
}

#[derive(Debug, Clone, Copy)]
pub struct Keyframe {
    pub time: f32,
    pub value: Vec3,
}

impl Keyframe {
    pub fn new(time: f32, value: Vec3) -> Self {
        Self { time, value }
    }
}

#[derive(Debug, Clone)]
pub struct Track {
    pub part: PartId,
    pub target: ChannelTarget,
    pub keyframes: Vec<Keyframe>,
}

impl Track {
    /// Linearly interpolated value at time t, clamped to the end keyframes
    pub fn sample(&self, t: f32) -> Option<Vec3> {
        let first = self.keyframes.first()?;
        let last = self.keyframes.last()?;

        if t <= first.time {
            return Some(first.value);
        }
        if t >= last.time {
            return Some(last.value);
        }

        for pair in self.keyframes.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t >= a.time && t < b.time {
                let span = b.time - a.time;
                if span <= 0.0 {
                    return Some(b.value);
                }
                let s = (t - a.time) / span;
                return Some(a.value + (b.value - a.value) * s);
            }
        }

        Some(last.value)
    }
}

/// A named set of tracks that loop over a shared duration
#[derive(Debug, Clone)]
pub struct Clip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

/// Plays every clip it holds, looping, until stopped.
/// Starts playing immediately, matching the built-in scene mounting its
/// animations on load.
#[derive(Debug, Clone)]
pub struct ClipPlayer {
    clips: Vec<Clip>,
    time: f32,
    playing: bool,
}

impl ClipPlayer {
    pub fn new(clips: Vec<Clip>) -> Self {
        Self {
            clips,
            time: 0.0,
            playing: true,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Advance the shared clock and write sampled values into the model
    pub fn advance(&mut self, dt: f32, model: &mut Model) {
        if !self.playing {
            return;
        }
        self.time += dt;

        for clip in &self.clips {
            if clip.duration <= 0.0 {
                continue;
            }
            let t = self.time % clip.duration;

            for track in &clip.tracks {
                let Some(value) = track.sample(t) else {
                    continue;
                };
                let Some(part) = model.parts.get_mut(track.part) else {
                    continue;
                };
                match track.target {
                    ChannelTarget::Translation => part.translation = value,
                    ChannelTarget::Rotation => {
                        part.rotation.x = value.x;
                        part.rotation.y = value.y;
                    }
                }
            }
        }
    }
}
