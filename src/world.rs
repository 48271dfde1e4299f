use crate::geometry::{Rect, collides};

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Leftward speed per tick, fixed at spawn.
    pub speed: f64,
    /// Index into the asset catalog.
    pub variant: usize,
}

impl Obstacle {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Live obstacles in spawn order.
#[derive(Clone, Debug, Default)]
pub struct World {
    pub obstacles: Vec<Obstacle>,
    offscreen_margin: f64,
    /// Total scroll since the run started, for background parallax.
    pub travelled: f64,
}

impl World {
    pub fn new(offscreen_margin: f64) -> Self {
        World {
            obstacles: Vec::new(),
            offscreen_margin,
            travelled: 0.0,
        }
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.travelled = 0.0;
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Moves every obstacle left by its own speed, then drops the ones whose
    /// right edge is past the off-screen margin.
    pub fn advance(&mut self, scroll_speed: f64) {
        self.travelled += scroll_speed;
        for o in &mut self.obstacles {
            o.x -= o.speed;
        }
        let limit = -self.offscreen_margin;
        self.obstacles.retain(|o| o.x + o.width >= limit);
    }

    /// First obstacle overlapping `target`, in spawn order.
    pub fn first_hit(&self, target: &Rect) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| collides(target, &o.bounds()))
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(x: f64, speed: f64) -> Obstacle {
        Obstacle {
            x,
            y: 500.0,
            width: 30.0,
            height: 64.0,
            speed,
            variant: 0,
        }
    }

    #[test]
    fn each_obstacle_moves_by_its_own_speed() {
        let mut world = World::new(50.0);
        world.push(obstacle(500.0, 4.0));
        world.push(obstacle(800.0, 5.5));
        world.advance(4.0);
        assert_eq!(world.obstacles[0].x, 496.0);
        assert_eq!(world.obstacles[1].x, 794.5);
        assert_eq!(world.travelled, 4.0);
    }

    #[test]
    fn prunes_past_margin_only() {
        let mut world = World::new(50.0);
        // right edge lands exactly on -50: kept
        world.push(obstacle(-76.0, 4.0));
        // right edge lands on -51: pruned
        world.push(obstacle(-77.0, 4.0));
        world.push(obstacle(300.0, 4.0));
        world.advance(4.0);
        assert_eq!(world.len(), 2);
        assert_eq!(world.obstacles[0].x, -80.0);
        assert_eq!(world.obstacles[1].x, 296.0);

        world.advance(4.0);
        assert_eq!(world.len(), 1);
        assert_eq!(world.obstacles[0].x, 292.0);
    }

    #[test]
    fn first_hit_returns_spawn_order_match() {
        let mut world = World::new(50.0);
        world.push(obstacle(100.0, 4.0));
        world.push(obstacle(110.0, 4.0));
        let player = Rect::new(105.0, 520.0, 20.0, 20.0);
        let hit = world.first_hit(&player).unwrap();
        assert_eq!(hit.x, 100.0);
        assert!(world.first_hit(&Rect::new(0.0, 0.0, 10.0, 10.0)).is_none());
    }

    #[test]
    fn clear_resets_scroll() {
        let mut world = World::new(50.0);
        world.push(obstacle(100.0, 4.0));
        world.advance(4.0);
        world.clear();
        assert!(world.is_empty());
        assert_eq!(world.travelled, 0.0);
    }
}
