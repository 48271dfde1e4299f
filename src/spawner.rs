use rand::Rng;

use crate::assets::Catalog;
use crate::config::Config;
use crate::geometry::Viewport;
use crate::physics::jump_apex;
use crate::world::Obstacle;

/// Decides when the next obstacle appears.
///
/// Two gates must both be open: the distance scrolled since the last spawn
/// exceeds the minimum gap, and the time since the last spawn exceeds an
/// interval drawn fresh every tick from `[min, max)`.
#[derive(Clone, Debug)]
pub struct Spawner {
    pub distance: f64,
    pub elapsed_ms: f64,
    min_gap: f64,
    interval_ms: (f64, f64),
}

impl Spawner {
    pub fn new(config: &Config, viewport: &Viewport) -> Self {
        let min_gap = viewport.min_gap(config.min_gap_ratio);
        Spawner {
            distance: min_gap + 1.0,
            elapsed_ms: 0.0,
            min_gap,
            interval_ms: (config.spawn_interval_min_ms, config.spawn_interval_max_ms),
        }
    }

    pub fn min_gap(&self) -> f64 {
        self.min_gap
    }

    /// Start-of-run state: the distance gate is already open, so only time
    /// holds back the first obstacle.
    pub fn reset(&mut self) {
        self.distance = self.min_gap + 1.0;
        self.elapsed_ms = 0.0;
    }

    /// Advances both counters; true means spawn now (counters are zeroed).
    pub fn advance<R: Rng>(&mut self, scroll_speed: f64, dt_ms: f64, rng: &mut R) -> bool {
        self.distance += scroll_speed;
        self.elapsed_ms += dt_ms;
        let interval = rng.gen_range(self.interval_ms.0..self.interval_ms.1);
        if self.distance > self.min_gap && self.elapsed_ms > interval {
            self.distance = 0.0;
            self.elapsed_ms = 0.0;
            true
        } else {
            false
        }
    }
}

/// Tallest obstacle the player can still clear: the jump apex less the
/// safety margin, never above the fixed cap.
pub fn max_obstacle_height(config: &Config) -> f64 {
    let apex = jump_apex(config.jump_impulse, config.gravity);
    (apex - config.safety_margin).floor().min(config.max_fixed_obs_height)
}

/// Width and height for `variant` in `viewport`, scaled down uniformly when
/// taller than `max_h`.
pub fn obstacle_size(
    catalog: &Catalog,
    variant: usize,
    config: &Config,
    viewport: &Viewport,
    max_h: f64,
) -> (f64, f64) {
    let v = catalog.get(variant);
    let scale = config.obstacle_scale(variant) * config.global_obstacle_scale;
    let mut w = v.natural_w * scale * (viewport.width / 960.0);
    let mut h = v.natural_h * scale * (viewport.height / 360.0);
    if h > max_h {
        let fit = max_h / h;
        h *= fit;
        w *= fit;
    }
    (w, h)
}

/// A random variant placed just past the right edge, resting on the ground.
/// `None` when the catalog has no variants to pick from.
pub fn spawn_obstacle<R: Rng>(
    catalog: &Catalog,
    config: &Config,
    viewport: &Viewport,
    base_speed: f64,
    rng: &mut R,
) -> Option<Obstacle> {
    if catalog.is_empty() {
        return None;
    }
    let variant = rng.gen_range(0..catalog.len());
    let (width, height) =
        obstacle_size(catalog, variant, config, viewport, max_obstacle_height(config));
    let jitter = if config.speed_jitter > 0.0 {
        rng.gen_range(0.0..config.speed_jitter)
    } else {
        0.0
    };
    Some(Obstacle {
        x: viewport.width + config.spawn_offset,
        y: viewport.ground_line() - height,
        width,
        height,
        speed: base_speed + jitter,
        variant,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn setup() -> (Config, Viewport, Catalog) {
        (
            Config::default(),
            Viewport::new(960.0, 600.0),
            Catalog::builtin(),
        )
    }

    #[test]
    fn bound_is_min_of_apex_and_cap() {
        let (mut config, _, _) = setup();
        assert_eq!(max_obstacle_height(&config), 180.0);

        config.jump_impulse = -10.0;
        // apex 90.9, less margin 8 => 82
        assert_eq!(max_obstacle_height(&config), 82.0);
    }

    #[test]
    fn every_variant_is_jumpable() {
        let (mut config, _, catalog) = setup();
        config.jump_impulse = -12.0;
        let bound = max_obstacle_height(&config);
        let apex = jump_apex(config.jump_impulse, config.gravity);
        for viewport in [
            Viewport::new(960.0, 600.0),
            Viewport::new(3000.0, 600.0),
            Viewport::new(1000.0, 1400.0),
        ] {
            for i in 0..catalog.len() {
                let (_, h) = obstacle_size(&catalog, i, &config, &viewport, bound);
                assert!(h <= bound + 1e-9, "variant {i} height {h}");
                assert!(h <= apex - config.safety_margin);
            }
        }
    }

    #[test]
    fn downscale_keeps_aspect() {
        let (config, viewport, catalog) = setup();
        // variant 6: 36x80 natural, 80 * 1.3 * 600/360 = 173.3 fits
        let (w, h) = obstacle_size(&catalog, 6, &config, &viewport, 180.0);
        assert!((h - 173.333).abs() < 0.01);
        let (w2, h2) = obstacle_size(&catalog, 6, &config, &viewport, 100.0);
        assert!((h2 - 100.0).abs() < 1e-9);
        assert!((w2 / h2 - w / h).abs() < 1e-9);
    }

    #[test]
    fn spawned_obstacle_rests_on_ground() {
        let (config, viewport, catalog) = setup();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let o = spawn_obstacle(&catalog, &config, &viewport, 4.0, &mut rng).unwrap();
            assert!((o.y + o.height - viewport.ground_line()).abs() < 1e-9);
            assert_eq!(o.x, 980.0);
            assert!(o.speed >= 4.0 && o.speed < 5.2);
            assert!(o.variant < catalog.len());
        }
    }

    #[test]
    fn zero_jitter_spawns_at_base_speed() {
        let (mut config, viewport, catalog) = setup();
        config.speed_jitter = 0.0;
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            let o = spawn_obstacle(&catalog, &config, &viewport, 4.0, &mut rng).unwrap();
            assert_eq!(o.speed, 4.0);
        }
    }

    #[test]
    fn empty_catalog_spawns_nothing() {
        let (config, viewport, _) = setup();
        let catalog = Catalog {
            variants: Vec::new(),
            failed: 0,
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(spawn_obstacle(&catalog, &config, &viewport, 4.0, &mut rng).is_none());
    }

    #[test]
    fn first_spawn_waits_for_time_only() {
        let (config, viewport, _) = setup();
        let mut spawner = Spawner::new(&config, &viewport);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(!spawner.advance(4.0, 700.0, &mut rng));
        assert!(spawner.advance(4.0, 1200.0, &mut rng));
        assert_eq!(spawner.distance, 0.0);
        assert_eq!(spawner.elapsed_ms, 0.0);
    }

    #[test]
    fn never_spawns_inside_the_gap() {
        let (config, viewport, _) = setup();
        let mut spawner = Spawner::new(&config, &viewport);
        let mut rng = StdRng::seed_from_u64(99);
        let mut since_last = spawner.distance;
        let mut spawns = 0;
        for _ in 0..20_000 {
            since_last += 4.0;
            if spawner.advance(4.0, 16.67, &mut rng) {
                assert!(since_last > spawner.min_gap());
                since_last = 0.0;
                spawns += 1;
            }
        }
        assert!(spawns > 10);
    }

    #[test]
    fn long_frames_still_respect_the_gap() {
        let (config, viewport, _) = setup();
        let mut spawner = Spawner::new(&config, &viewport);
        let mut rng = StdRng::seed_from_u64(3);
        assert!(spawner.advance(4.0, 5000.0, &mut rng));
        // time gate wide open, distance gate closed
        for _ in 0..(432 / 4) {
            assert!(!spawner.advance(4.0, 5000.0, &mut rng));
        }
        assert!(spawner.advance(4.0, 5000.0, &mut rng));
    }
}
