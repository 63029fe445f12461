use anyhow::{Context, Result};
use tessel_engine::coords::Vector2;
use tessel_engine::logging::{init_logging, LoggingConfig};
use tessel_engine::time::Clock;

/// Playfield size in logical pixels.
const BOUNDS: Vector2 = Vector2::new(640.0, 480.0);

fn main() -> Result<()> {
    init_logging(LoggingConfig::default().with_timestamps());

    let frames = env_or("TESSEL_FRAMES", 120)?;
    let fps = env_or("TESSEL_FPS", 60)?;
    log::info!("running {frames} frames at {fps} fps");

    let mut clock = Clock::new();
    let mut pos = BOUNDS / 2.0;
    let mut velocity = Vector2::polar(180.0, 30.0);

    for frame in 0..frames {
        let dt = clock.tick(fps) / 1000.0;

        velocity.rotate_ip(1.5);
        pos += velocity * dt;

        // Bounce off the walls.
        if !(pos.x > 0.0 && pos.x < BOUNDS.x) {
            velocity.reflect_ip((1.0, 0.0))?;
        }
        if !(pos.y > 0.0 && pos.y < BOUNDS.y) {
            velocity.reflect_ip((0.0, 1.0))?;
        }
        pos = clamp(pos);

        if frame % 30 == 0 {
            let (speed, heading) = velocity.as_polar();
            log::info!(
                "frame {frame:>4}: pos {pos} speed {speed:.1} heading {heading:.1} deg, {:.1} fps",
                clock.get_fps()
            );
        }

        if let Some(interval) = clock.frame_interval() {
            std::thread::sleep(interval);
        }
    }

    log::info!(
        "done after {:.0} ms, final position {pos}, {:.1} fps",
        clock.ticks(),
        clock.get_fps()
    );
    Ok(())
}

fn clamp(p: Vector2) -> Vector2 {
    let lower = Vector2::zero();
    if p >= lower.elementwise() && p <= BOUNDS.elementwise() {
        return p;
    }
    Vector2::new(p.x.clamp(0.0, BOUNDS.x), p.y.clamp(0.0, BOUNDS.y))
}

fn env_or(name: &str, default: u32) -> Result<u32> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a non-negative integer, got {raw:?}")),
        Err(_) => Ok(default),
    }
}
