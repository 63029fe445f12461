use std::time::{Duration, Instant};

/// Number of tick samples averaged by [`Clock::get_fps`].
pub const SAMPLE_COUNT: usize = 10;

/// Value every sample starts with, roughly one frame at 30 FPS.
const INITIAL_SAMPLE_MS: f64 = 33.0;

/// Source of monotonic timestamps in milliseconds.
///
/// The clock only ever subtracts two readings, so the origin is arbitrary.
pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Wall-clock source backed by [`Instant`].
#[derive(Debug, Clone)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Frame clock measuring the time between ticks.
///
/// Keeps the last [`SAMPLE_COUNT`] tick intervals in a ring buffer and derives
/// a smoothed FPS estimate from their mean. A clock is meant to be owned by a
/// single loop; multiple loops should not share one.
///
/// The clock never sleeps. A requested frame rate is turned into a target
/// frame interval ([`Clock::frame_interval`]) that the caller may honor.
#[derive(Debug, Clone)]
pub struct Clock<S: TimeSource = SystemTimeSource> {
    source: S,
    start: f64,
    last: f64,
    samples: [f64; SAMPLE_COUNT],
    pos: usize,
    framerate: u32,
    frame_interval: Option<Duration>,
    frame_index: u64,
}

impl Clock<SystemTimeSource> {
    pub fn new() -> Self {
        Self::with_source(SystemTimeSource::new())
    }
}

impl Default for Clock<SystemTimeSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TimeSource> Clock<S> {
    /// Creates a clock reading time from `source`.
    pub fn with_source(source: S) -> Self {
        let now = source.now_ms();
        Self {
            source,
            start: now,
            last: now,
            samples: [INITIAL_SAMPLE_MS; SAMPLE_COUNT],
            pos: 0,
            framerate: 0,
            frame_interval: None,
            frame_index: 0,
        }
    }

    /// Records one frame and returns the milliseconds since the previous tick.
    ///
    /// `framerate` is the desired frames per second, `0` for unlimited. It is
    /// only picked up once per pass over the sample buffer (every
    /// [`SAMPLE_COUNT`] ticks, starting with the first).
    pub fn tick(&mut self, framerate: u32) -> f64 {
        if self.pos > 0 {
            self.pos -= 1;
        } else {
            self.pos = SAMPLE_COUNT - 1;
            if self.framerate != framerate {
                self.set_framerate(framerate);
            }
        }

        let now = self.source.now_ms();
        let elapsed = (now - self.last).max(0.0);
        self.samples[self.pos] = elapsed;
        self.last = now;
        self.frame_index = self.frame_index.wrapping_add(1);

        elapsed
    }

    /// Same as [`Clock::tick`].
    pub fn tick_busy_loop(&mut self, framerate: u32) -> f64 {
        self.tick(framerate)
    }

    /// Milliseconds between the last two ticks.
    pub fn get_time(&self) -> f64 {
        self.samples[self.pos]
    }

    /// Frames per second over the last [`SAMPLE_COUNT`] ticks.
    ///
    /// Returns `0.0` when no measurable time has passed.
    pub fn get_fps(&self) -> f64 {
        let mean = self.samples.iter().sum::<f64>() / SAMPLE_COUNT as f64;
        if mean > 0.0 { 1000.0 / mean } else { 0.0 }
    }

    /// Milliseconds since the clock was created.
    pub fn ticks(&self) -> f64 {
        (self.source.now_ms() - self.start).max(0.0)
    }

    /// Number of ticks so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_index
    }

    /// Frame rate currently in effect, `0` when unlimited.
    pub fn framerate(&self) -> u32 {
        self.framerate
    }

    /// Target time per frame for the rate in effect, if limited.
    pub fn frame_interval(&self) -> Option<Duration> {
        self.frame_interval
    }

    /// Rebaselines the previous-tick timestamp.
    ///
    /// Useful after a pause so the next tick does not report the whole gap.
    pub fn reset(&mut self) {
        self.last = self.source.now_ms();
    }

    fn set_framerate(&mut self, framerate: u32) {
        self.framerate = framerate;
        self.frame_interval =
            (framerate > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(framerate)));
        match self.frame_interval {
            Some(interval) => log::debug!("frame rate set to {framerate} fps ({interval:?} per frame)"),
            None => log::debug!("frame rate unlimited"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct ManualTime(Rc<Cell<f64>>);

    impl ManualTime {
        fn advance(&self, ms: f64) {
            self.0.set(self.0.get() + ms);
        }
    }

    impl TimeSource for ManualTime {
        fn now_ms(&self) -> f64 {
            self.0.get()
        }
    }

    fn clock() -> (Clock<ManualTime>, ManualTime) {
        let time = ManualTime::default();
        (Clock::with_source(time.clone()), time)
    }

    // ── tick ──────────────────────────────────────────────────────────────

    #[test]
    fn tick_returns_elapsed_ms() {
        let (mut c, time) = clock();
        time.advance(20.0);
        assert_eq!(c.tick(0), 20.0);
        assert_eq!(c.get_time(), 20.0);
        time.advance(5.0);
        assert_eq!(c.tick_busy_loop(0), 5.0);
        assert_eq!(c.get_time(), 5.0);
        assert_eq!(c.frame_count(), 2);
    }

    #[test]
    fn reset_rebaselines() {
        let (mut c, time) = clock();
        time.advance(500.0);
        c.reset();
        time.advance(16.0);
        assert_eq!(c.tick(0), 16.0);
        assert_eq!(c.ticks(), 516.0);
    }

    // ── fps ───────────────────────────────────────────────────────────────

    #[test]
    fn fps_starts_from_seeded_samples() {
        let (c, _) = clock();
        assert!((c.get_fps() - 1000.0 / 33.0).abs() < 1e-9);
    }

    #[test]
    fn fps_blends_new_samples_with_old() {
        let (mut c, time) = clock();
        time.advance(20.0);
        c.tick(0);
        let expected = 1000.0 / ((33.0 * 9.0 + 20.0) / 10.0);
        assert!((c.get_fps() - expected).abs() < 1e-9);
    }

    #[test]
    fn fps_after_full_window() {
        let (mut c, time) = clock();
        for _ in 0..SAMPLE_COUNT {
            time.advance(20.0);
            c.tick(0);
        }
        assert_eq!(c.get_fps(), 50.0);
    }

    #[test]
    fn fps_is_zero_without_elapsed_time() {
        let (mut c, _) = clock();
        for _ in 0..SAMPLE_COUNT {
            c.tick(0);
        }
        assert_eq!(c.get_fps(), 0.0);
    }

    // ── frame rate ────────────────────────────────────────────────────────

    #[test]
    fn framerate_applies_on_first_tick() {
        let (mut c, _) = clock();
        assert_eq!(c.frame_interval(), None);
        c.tick(60);
        assert_eq!(c.framerate(), 60);
        assert_eq!(c.frame_interval(), Some(Duration::from_secs_f64(1.0 / 60.0)));
    }

    #[test]
    fn framerate_changes_wait_for_buffer_wrap() {
        let (mut c, _) = clock();
        c.tick(60);
        for _ in 1..SAMPLE_COUNT {
            c.tick(30);
            assert_eq!(c.framerate(), 60);
        }
        c.tick(30);
        assert_eq!(c.framerate(), 30);
        assert_eq!(c.frame_interval(), Some(Duration::from_secs_f64(1.0 / 30.0)));
    }

    #[test]
    fn zero_framerate_is_unlimited() {
        let (mut c, _) = clock();
        c.tick(60);
        for _ in 0..SAMPLE_COUNT {
            c.tick(0);
        }
        assert_eq!(c.framerate(), 0);
        assert_eq!(c.frame_interval(), None);
    }
}
