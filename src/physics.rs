use crate::config::Config;
use crate::geometry::{Rect, Viewport};

/// Natural size of the player art, in logical units before scaling.
pub const PLAYER_NATURAL: (f64, f64) = (64.0, 64.0);

/// Highest point above the take-off height reachable with `impulse` against
/// constant `gravity`: v² / 2g.
pub fn jump_apex(impulse: f64, gravity: f64) -> f64 {
    impulse.abs().powi(2) / (2.0 * gravity)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub vy: f64,
    pub gravity: f64,
    pub jump_impulse: f64,
    pub airborne: bool,
    /// `y` when standing on the ground line.
    ground_y: f64,
}

impl Player {
    pub fn new(config: &Config, viewport: &Viewport) -> Self {
        let mut player = Player {
            x: 0.0,
            y: 0.0,
            width: PLAYER_NATURAL.0,
            height: PLAYER_NATURAL.1,
            vy: 0.0,
            gravity: config.gravity,
            jump_impulse: config.jump_impulse,
            airborne: false,
            ground_y: 0.0,
        };
        player.fit(config, viewport);
        player
    }

    /// Sizes and places the player for `viewport`, standing on the ground.
    pub fn fit(&mut self, config: &Config, viewport: &Viewport) {
        let (nat_w, nat_h) = PLAYER_NATURAL;
        let viewport_scale = (viewport.height / 600.0).min(2.0);
        let target_h =
            (nat_h * config.player_scale * viewport_scale).floor().min(config.max_player_height);
        let scale = target_h / nat_h;

        self.width = (nat_w * scale).floor();
        self.height = (nat_h * scale).floor();
        self.x = (viewport.width * 0.065).floor();
        self.ground_y = viewport.ground_line() - self.height;
        self.land();
    }

    pub fn ground_y(&self) -> f64 {
        self.ground_y
    }

    pub fn land(&mut self) {
        self.y = self.ground_y;
        self.vy = 0.0;
        self.airborne = false;
    }

    /// One explicit Euler step. Returns true when `jump` started a jump.
    pub fn step(&mut self, jump: bool) -> bool {
        let jumped = jump && !self.airborne;
        if jumped {
            self.vy = self.jump_impulse;
            self.airborne = true;
        }
        if self.airborne {
            self.vy += self.gravity;
            self.y += self.vy;
            if self.y >= self.ground_y {
                self.land();
            }
        }
        jumped
    }

    #[cfg(test)]
    pub fn apex(&self) -> f64 {
        jump_apex(self.jump_impulse, self.gravity)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}
