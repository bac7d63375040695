//! Batch constructors for the animated background sections.
//!
//! Each batch scatters descriptors across `bounds` with category-specific
//! randomized size, color and animation parameters. The caller owns the
//! returned descriptors and hands them back when they leave the screen.

use serde_json::{json, Value};
use sp_core::particle::{
    Bounds, OpaquePayload, ParticleCategory, ParticleConfig, ParticleDescriptor, Position,
};

use super::ParticlePool;

const STAR_COLORS: [&str; 3] = ["bg-blue-400", "bg-cyan-400", "bg-blue-300"];

const ORB_COLORS: [&str; 4] = [
    "rgba(59, 130, 246, 0.6)",
    "rgba(6, 182, 212, 0.6)",
    "rgba(147, 197, 253, 0.6)",
    "rgba(96, 165, 250, 0.6)",
];

const SHOOTING_COLOR: &str = "bg-blue-300";

impl ParticlePool {
    /// Twinkling stars, 1-4 px.
    pub fn create_star_batch(&mut self, count: usize, bounds: Bounds) -> Vec<ParticleDescriptor> {
        (0..count)
            .map(|_| {
                let size = self.random.next_f64() * 3.0 + 1.0;
                let color = STAR_COLORS[self.random.next_index(STAR_COLORS.len())];
                let glow = self.random.next_f64() * 0.8 + 0.2;
                let position = self.random_position(bounds.width, bounds.height);
                let duration = 2.0 + self.random.next_f64() * 3.0;
                let delay = self.random.next_f64() * 3.0;

                let style = payload(json!({
                    "width": format!("{size}px"),
                    "height": format!("{size}px"),
                    "boxShadow": format!(
                        "0 0 {}px rgba(59, 130, 246, {glow}), 0 0 {}px rgba(59, 130, 246, {})",
                        size * 3.0,
                        size * 6.0,
                        glow * 0.5
                    ),
                }));
                let animation = payload(json!({
                    "opacity": [0.3, 1.0, 0.3],
                    "scale": [1.0, 1.2, 1.0],
                    "transition": looping(duration, delay, "easeInOut"),
                }));

                self.get_particle(
                    ParticleConfig::new(ParticleCategory::Star)
                        .with_size(size)
                        .with_color(color)
                        .with_position(position)
                        .with_style(style)
                        .with_animation(animation),
                )
            })
            .collect()
    }

    /// Drifting glow orbs, 4-10 px.
    pub fn create_orb_batch(&mut self, count: usize, bounds: Bounds) -> Vec<ParticleDescriptor> {
        (0..count)
            .map(|_| {
                let size = self.random.next_f64() * 6.0 + 4.0;
                let color = ORB_COLORS[self.random.next_index(ORB_COLORS.len())];
                let position = self.random_position(bounds.width, bounds.height);
                let drift = self.random.next_f64() * 30.0 - 15.0;
                let duration = 4.0 + self.random.next_f64() * 3.0;
                let delay = self.random.next_f64() * 2.0;

                let style = payload(json!({
                    "width": format!("{size}px"),
                    "height": format!("{size}px"),
                    "background": format!("radial-gradient(circle, {color} 0%, transparent 70%)"),
                    "boxShadow": format!("0 0 {}px {color}, 0 0 {}px {color}", size * 2.0, size * 4.0),
                }));
                let animation = payload(json!({
                    "y": [0.0, -40.0, 0.0],
                    "x": [0.0, drift, 0.0],
                    "opacity": [0.4, 0.9, 0.4],
                    "scale": [1.0, 1.3, 1.0],
                    "transition": looping(duration, delay, "easeInOut"),
                }));

                self.get_particle(
                    ParticleConfig::new(ParticleCategory::Orb)
                        .with_size(size)
                        .with_color(color)
                        .with_position(position)
                        .with_style(style)
                        .with_animation(animation),
                )
            })
            .collect()
    }

    /// Shooting stars. They start in the upper half of `bounds` and are
    /// staggered by half a second each.
    pub fn create_shooting_batch(
        &mut self,
        count: usize,
        bounds: Bounds,
    ) -> Vec<ParticleDescriptor> {
        (0..count)
            .map(|i| {
                let trail = self.random.next_f64() * 200.0 + 100.0;
                let position = self.random_position(bounds.width, bounds.height * 0.5);
                let duration = 1.5 + self.random.next_f64();
                let delay = i as f64 * 0.5 + self.random.next_f64() * 3.0;

                let style = payload(json!({
                    "width": "1px",
                    "height": "1px",
                    "boxShadow": "0 0 6px rgba(147, 197, 253, 0.8), 0 0 12px rgba(147, 197, 253, 0.4)",
                }));
                let animation = payload(json!({
                    "x": [0.0, trail],
                    "y": [0.0, trail * 0.5],
                    "opacity": [0.0, 1.0, 0.0],
                    "scale": [0.0, 1.0, 0.0],
                    "transition": looping(duration, delay, "easeOut"),
                }));

                self.get_particle(
                    ParticleConfig::new(ParticleCategory::ShootingTrail)
                        .with_size(1.0)
                        .with_color(SHOOTING_COLOR)
                        .with_position(position)
                        .with_style(style)
                        .with_animation(animation),
                )
            })
            .collect()
    }

    fn random_position(&mut self, width: f64, height: f64) -> Position {
        let x = self.random.next_f64() * width;
        let y = self.random.next_f64() * height;
        Position::new(x, y)
    }
}

fn looping(duration: f64, delay: f64, ease: &str) -> Value {
    json!({
        "duration": duration,
        "delay": delay,
        "repeat": "infinity",
        "ease": ease,
    })
}

fn payload(value: Value) -> OpaquePayload {
    match value {
        Value::Object(map) => map,
        _ => OpaquePayload::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRandom;
    use sp_core::config::ParticlePoolConfig;
    use sp_infra::SeededRandomSource;

    const BOUNDS: Bounds = Bounds {
        width: 800.0,
        height: 600.0,
    };

    fn pool_with(random: impl sp_core::ports::RandomSourcePort + 'static) -> ParticlePool {
        ParticlePool::new(ParticlePoolConfig::default(), Box::new(random))
    }

    #[test]
    fn star_batch_uses_scripted_samples() {
        let mut pool = pool_with(ScriptedRandom::constant(0.5));
        let batch = pool.create_star_batch(2, BOUNDS);

        assert_eq!(batch.len(), 2);
        let star = &batch[0];
        assert_eq!(star.category(), ParticleCategory::Star);
        assert_eq!(star.size, 2.5);
        assert_eq!(star.color, "bg-cyan-400");
        assert_eq!(star.position, Position::new(400.0, 300.0));
        assert_eq!(star.style["width"], "2.5px");
        assert_eq!(star.animation["transition"]["duration"], 3.5);
        assert_eq!(pool.get_stats().active_particles, 2);
    }

    #[test]
    fn orb_batch_stays_in_size_range_and_bounds() {
        let mut pool = pool_with(SeededRandomSource::new(7));
        let batch = pool.create_orb_batch(100, BOUNDS);

        for orb in &batch {
            assert!((4.0..10.0).contains(&orb.size));
            assert!(ORB_COLORS.contains(&orb.color.as_str()));
            assert!((0.0..800.0).contains(&orb.position.x));
            assert!((0.0..600.0).contains(&orb.position.y));
        }
    }

    #[test]
    fn shooting_batch_starts_in_upper_half_and_staggers() {
        let mut pool = pool_with(ScriptedRandom::constant(0.0));
        let batch = pool.create_shooting_batch(3, BOUNDS);

        for (i, trail) in batch.iter().enumerate() {
            assert_eq!(trail.category(), ParticleCategory::ShootingTrail);
            assert!(trail.position.y < 300.0);
            assert_eq!(trail.animation["transition"]["delay"], i as f64 * 0.5);
            assert_eq!(trail.animation["x"][1], 100.0);
        }
    }

    #[test]
    fn same_seed_gives_same_batch() {
        let mut a = pool_with(SeededRandomSource::new(42));
        let mut b = pool_with(SeededRandomSource::new(42));

        let left = a.create_star_batch(20, BOUNDS);
        let right = b.create_star_batch(20, BOUNDS);
        assert_eq!(left, right);
    }

    #[test]
    fn returned_batch_is_reused_by_next_batch() {
        let mut pool = pool_with(SeededRandomSource::new(1));
        let first = pool.create_star_batch(30, BOUNDS);
        for star in first {
            pool.return_particle(star);
        }

        let second = pool.create_star_batch(30, BOUNDS);
        let stats = pool.get_stats();

        assert_eq!(second.len(), 30);
        assert_eq!(stats.total_created, 30);
        assert_eq!(stats.total_reused, 30);
        assert!(second.iter().all(|s| !s.animation.is_empty()));
    }
}
