//! Playback position → frame index.

use std::time::{Duration, Instant};

/// Wall-clock playback timer with pause support.
///
/// Time spent paused does not count toward [`elapsed`](Self::elapsed). When
/// an audio player supplies its own position, [`frame_index`](Self::frame_index)
/// maps that position instead and the wall clock is ignored.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    fps: u32,
    started: Instant,
    paused_total: Duration,
    paused_at: Option<Instant>,
}

impl PlaybackClock {
    /// Start a clock running now at `fps` frames per second.
    pub fn new(fps: u32) -> Self {
        Self::started_at(fps, Instant::now())
    }

    /// Start a clock that began running at `start`.
    pub fn started_at(fps: u32, start: Instant) -> Self {
        Self {
            fps,
            started: start,
            paused_total: Duration::ZERO,
            paused_at: None,
        }
    }

    /// Frames per second.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// True while paused.
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Stop the clock at `now`. No effect when already paused.
    pub fn pause_at(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Restart the clock at `now`. No effect when running.
    pub fn resume_at(&mut self, now: Instant) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += now.saturating_duration_since(paused_at);
        }
    }

    /// Flip between paused and running; returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        let now = Instant::now();
        if self.is_paused() {
            self.resume_at(now);
        } else {
            self.pause_at(now);
        }
        self.is_paused()
    }

    /// Running time up to `now`, excluding pauses.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        let end = self.paused_at.unwrap_or(now);
        end.saturating_duration_since(self.started)
            .saturating_sub(self.paused_total)
    }

    /// Running time so far, excluding pauses.
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    /// Frame shown `position_secs` into playback.
    ///
    /// Negative and non-finite positions map to frame 0.
    pub fn frame_index(&self, position_secs: f64) -> usize {
        if !position_secs.is_finite() || position_secs <= 0.0 {
            return 0;
        }
        (position_secs * f64::from(self.fps)).floor() as usize
    }

    /// Frame for the wall-clock position.
    pub fn current_frame(&self) -> usize {
        self.frame_index(self.elapsed().as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_index() {
        let clock = PlaybackClock::new(30);
        assert_eq!(clock.frame_index(0.0), 0);
        assert_eq!(clock.frame_index(0.0333), 0);
        assert_eq!(clock.frame_index(0.034), 1);
        assert_eq!(clock.frame_index(1.0), 30);
        assert_eq!(clock.frame_index(10.5), 315);
        assert_eq!(clock.frame_index(-2.0), 0);
        assert_eq!(clock.frame_index(f64::NAN), 0);
    }

    #[test]
    fn test_elapsed_excludes_pauses() {
        let t0 = Instant::now();
        let mut clock = PlaybackClock::started_at(30, t0);

        assert_eq!(clock.elapsed_at(t0 + Duration::from_secs(2)), Duration::from_secs(2));

        clock.pause_at(t0 + Duration::from_secs(2));
        assert!(clock.is_paused());
        // Frozen while paused
        assert_eq!(clock.elapsed_at(t0 + Duration::from_secs(5)), Duration::from_secs(2));

        clock.resume_at(t0 + Duration::from_secs(5));
        assert!(!clock.is_paused());
        assert_eq!(clock.elapsed_at(t0 + Duration::from_secs(6)), Duration::from_secs(3));
    }

    #[test]
    fn test_double_pause_and_resume_are_noops() {
        let t0 = Instant::now();
        let mut clock = PlaybackClock::started_at(30, t0);
        clock.resume_at(t0 + Duration::from_secs(1));
        clock.pause_at(t0 + Duration::from_secs(1));
        clock.pause_at(t0 + Duration::from_secs(3));
        clock.resume_at(t0 + Duration::from_secs(4));
        assert_eq!(clock.elapsed_at(t0 + Duration::from_secs(4)), Duration::from_secs(1));
    }

    #[test]
    fn test_toggle_pause() {
        let mut clock = PlaybackClock::new(60);
        assert!(clock.toggle_pause());
        assert!(!clock.toggle_pause());
        assert_eq!(clock.fps(), 60);
    }
}
