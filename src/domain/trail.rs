//! Short-lived trail of recent pointer positions.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use egui::Pos2;

pub const DEFAULT_TRAIL_LENGTH: usize = 12;
pub const DEFAULT_TRAIL_LIFESPAN: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub pos: Pos2,
    pub at: Instant,
}

/// A trail dot ready to be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailDot {
    pub pos: Pos2,
    pub opacity: f32,
    pub diameter: f32,
}

/// Newest-first ring of pointer positions, bounded by count and age.
#[derive(Debug, Clone)]
pub struct CursorTrail {
    points: VecDeque<TrailPoint>,
    capacity: usize,
    lifespan: Duration,
}

impl Default for CursorTrail {
    fn default() -> Self {
        Self::new(DEFAULT_TRAIL_LENGTH, DEFAULT_TRAIL_LIFESPAN)
    }
}

impl CursorTrail {
    pub fn new(capacity: usize, lifespan: Duration) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
            lifespan,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Records a pointer position, dropping expired and overflowing points.
    pub fn push(&mut self, pos: Pos2, now: Instant) {
        self.prune(now);
        self.points.push_front(TrailPoint { pos, at: now });
        self.points.truncate(self.capacity);
    }

    /// Drops points older than the lifespan.
    pub fn prune(&mut self, now: Instant) {
        let lifespan = self.lifespan;
        self.points
            .retain(|p| now.saturating_duration_since(p.at) < lifespan);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Returns drawable dots, newest first, fading with age and shrinking
    /// with position in the trail.
    pub fn dots(&self, now: Instant) -> Vec<TrailDot> {
        let lifespan = self.lifespan.as_secs_f32();
        self.points
            .iter()
            .enumerate()
            .filter_map(|(index, point)| {
                let age = now.saturating_duration_since(point.at).as_secs_f32();
                let opacity = if lifespan > 0.0 { 1.0 - age / lifespan } else { 0.0 };
                (opacity > 0.0).then(|| TrailDot {
                    pos: point.pos,
                    opacity,
                    diameter: (8.0 - index as f32 * 0.5).max(3.0),
                })
            })
            .collect()
    }
}
