/// Axis-aligned box in logical world units, `y` growing downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

/// Strict AABB overlap: boxes that only share an edge do not collide.
pub fn collides(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Logical play area. The height is fixed by config; the width follows the
/// terminal's aspect ratio so that one logical unit is square on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Viewport { width, height }
    }

    /// `pw`×`ph` is the pixel buffer size (terminal rows count twice).
    pub fn from_pixels(pw: usize, ph: usize, world_height: f64) -> Self {
        let ph = ph.max(1) as f64;
        Viewport {
            width: world_height * pw as f64 / ph,
            height: world_height,
        }
    }

    pub fn ground_height(&self) -> f64 {
        (self.height * 0.06).floor().max(24.0)
    }

    /// Top of the ground strip; everything rests on this line.
    pub fn ground_line(&self) -> f64 {
        self.height - self.ground_height()
    }

    pub fn base_speed(&self) -> f64 {
        (self.width / 250.0).floor().max(4.0)
    }

    pub fn min_gap(&self, ratio: f64) -> f64 {
        (self.width * ratio).floor()
    }
}
