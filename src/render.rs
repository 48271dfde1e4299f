use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
    terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate},
};
use std::io::{self, Write};

use crate::assets::{Art, Shape, Sprite};
use crate::geometry::Rect;
use crate::run::{Snapshot, Status};

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    pub const fn scale(self, t_256: u16) -> Rgb {
        Rgb::lerp(Rgb(0, 0, 0), self, t_256)
    }

    fn term(self) -> CColor {
        CColor::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

/// Drawn wherever an image failed to load.
pub const MISSING: Rgb = Rgb(234, 242, 255);

const SKY_TOP: Rgb = Rgb(235, 224, 200);
const SKY_BOT: Rgb = Rgb(250, 240, 215);
const DUNE_FAR: Rgb = Rgb(228, 205, 160);
const DUNE_NEAR: Rgb = Rgb(214, 186, 136);
const GROUND: Rgb = Rgb(196, 164, 112);
const GROUND_DARK: Rgb = Rgb(170, 140, 92);
const GROUND_EDGE: Rgb = Rgb(120, 96, 64);
const CACTUS: Rgb = Rgb(46, 110, 40);
const CACTUS_HI: Rgb = Rgb(92, 160, 64);
const ROCK: Rgb = Rgb(128, 118, 108);
const ROCK_DARK: Rgb = Rgb(96, 88, 80);
const DINO: Rgb = Rgb(83, 83, 83);
const DINO_EYE: Rgb = Rgb(255, 255, 255);
const TEXT: Rgb = Rgb(60, 60, 60);
const GOLD: Rgb = Rgb(255, 200, 40);
const PANEL: Rgb = Rgb(250, 240, 215);
const PANEL_EDGE: Rgb = Rgb(83, 83, 83);
const SHADOW: Rgb = Rgb(30, 30, 30);

// ── Pixel buffer with half-block rendering ──────────────────────────────────

pub struct PixelBuf {
    pub w: usize,
    pub h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![SKY_TOP; w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, SKY_TOP);
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    /// Mixes `c` over the current pixel; `alpha` in 0..=1.
    pub fn blend(&mut self, x: i32, y: i32, c: Rgb, alpha: f32) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            let t = (alpha.clamp(0.0, 1.0) * 256.0) as u16;
            let under = self.get(x as usize, y as usize);
            self.set(x, y, Rgb::lerp(under, c, t));
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Darkens the whole buffer to `t_256`/256 brightness.
    pub fn dim(&mut self, t_256: u16) {
        for c in &mut self.px {
            *c = c.scale(t_256);
        }
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, BeginSynchronizedUpdate, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg = Rgb(0, 0, 0);
        let mut prev_bg = Rgb(0, 0, 0);
        let mut need_fg = true;
        let mut need_bg = true;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    if need_bg || prev_bg != top {
                        queue!(out, style::SetBackgroundColor(top.term()))?;
                        prev_bg = top;
                        need_bg = false;
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if need_fg || prev_fg != top {
                        queue!(out, style::SetForegroundColor(top.term()))?;
                        prev_fg = top;
                        need_fg = false;
                    }
                    if need_bg || prev_bg != bot {
                        queue!(out, style::SetBackgroundColor(bot.term()))?;
                        prev_bg = bot;
                        need_bg = false;
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                need_fg = true;
                need_bg = true;
            }
        }
        queue!(out, style::ResetColor, EndSynchronizedUpdate)?;
        out.flush()
    }
}

// ── 3x5 bitmap font ─────────────────────────────────────────────────────────

#[rustfmt::skip]
fn glyph(ch: char) -> [u8; 5] {
    match ch.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b011, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        _ => [0; 5],
    }
}

pub fn text_width(text: &str, size: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 { 0 } else { (n * 4 - 1) * size }
}

/// Draws `text` with its top-left at (x, y), each font pixel `size` wide.
/// `alpha` below 1 blends over what is already there.
pub fn draw_text(buf: &mut PixelBuf, x: i32, y: i32, text: &str, size: i32, fg: Rgb, alpha: f32) {
    for (i, ch) in text.chars().enumerate() {
        let gx = x + i as i32 * 4 * size;
        for (row, bits) in glyph(ch).iter().enumerate() {
            for col in 0..3 {
                if bits & (0b100 >> col) == 0 {
                    continue;
                }
                let px = gx + col * size;
                let py = y + row as i32 * size;
                for dy in 0..size {
                    for dx in 0..size {
                        buf.blend(px + dx, py + dy, fg, alpha);
                    }
                }
            }
        }
    }
}

fn draw_text_centered(buf: &mut PixelBuf, cx: i32, y: i32, text: &str, size: i32, fg: Rgb) {
    draw_text(buf, cx - text_width(text, size) / 2, y, text, size, fg, 1.0);
}

// ── Scene ───────────────────────────────────────────────────────────────────

/// Maps logical world units onto buffer pixels.
struct Projection {
    s: f64,
}

impl Projection {
    fn px(&self, v: f64) -> i32 {
        (v * self.s).round() as i32
    }

    /// Pixel box for `r`, at least one pixel each way.
    fn rect(&self, r: &Rect) -> (i32, i32, i32, i32) {
        let x = self.px(r.x);
        let y = self.px(r.y);
        let w = (self.px(r.right()) - x).max(1);
        let h = (self.px(r.bottom()) - y).max(1);
        (x, y, w, h)
    }
}

pub fn draw(buf: &mut PixelBuf, view: &Snapshot) {
    let proj = Projection {
        s: buf.h as f64 / view.viewport.height,
    };
    let ground = proj.px(view.viewport.ground_line());

    draw_backdrop(buf, ground, view.travelled * proj.s);
    for o in view.obstacles {
        let (x, y, w, h) = proj.rect(&o.bounds());
        draw_art(buf, &view.catalog.get(o.variant).art, x, y, w, h);
    }
    draw_ground(buf, ground, view.travelled * proj.s);

    let (x, y, w, h) = proj.rect(&view.player.bounds());
    let stride = view.player.airborne || view.status != Status::Running || (view.tick / 6) % 2 == 0;
    stamp(buf, x, y, w, h, if stride { &DINO_A } else { &DINO_B }, dino_color);

    draw_hud(buf, view);
    match view.status {
        Status::Idle => draw_title(buf),
        Status::Running => {}
        Status::GameOver => draw_game_over(buf, view),
    }
    if let Some(alpha) = view.high_score_cue {
        draw_high_score_cue(buf, alpha);
    }
}

fn draw_backdrop(buf: &mut PixelBuf, ground: i32, scroll: f64) {
    let sky_h = ground.max(1);
    for y in 0..sky_h {
        let t = (y as u32 * 256 / sky_h as u32) as u16;
        let c = Rgb::lerp(SKY_TOP, SKY_BOT, t);
        for x in 0..buf.w as i32 {
            buf.set(x, y, c);
        }
    }
    let unit = sky_h as f64 / 48.0;
    for (layer, color, speed, freq, amp) in [
        (0, DUNE_FAR, 0.2, 0.03, 5.0),
        (1, DUNE_NEAR, 0.4, 0.05, 3.0),
    ] {
        for x in 0..buf.w as i32 {
            let fx = (x as f64 + scroll * speed) * freq;
            let h = (fx.sin() * amp + (fx * 1.9).sin() * amp * 0.4 + amp + 2.0 - layer as f64)
                * unit;
            for y in (ground - h as i32)..ground {
                buf.set(x, y, color);
            }
        }
    }
}

fn draw_ground(buf: &mut PixelBuf, ground: i32, scroll: f64) {
    for x in 0..buf.w as i32 {
        buf.set(x, ground, GROUND_EDGE);
    }
    for y in (ground + 1)..buf.h as i32 {
        for x in 0..buf.w as i32 {
            let speck = ((x as f64 + scroll) as i32 * 7 + (y - ground) * 13).rem_euclid(23) == 0;
            buf.set(x, y, if speck { GROUND_DARK } else { GROUND });
        }
    }
}

fn draw_art(buf: &mut PixelBuf, art: &Art, x: i32, y: i32, w: i32, h: i32) {
    match art {
        Art::Shape(Shape::Cactus { arms }) => draw_cactus(buf, x, y, w, h, *arms),
        Art::Shape(Shape::Cluster { stems }) => draw_cluster(buf, x, y, w, h, *stems),
        Art::Shape(Shape::Rock) => draw_rock(buf, x, y, w, h),
        Art::Sprite(sprite) => draw_sprite(buf, sprite, x, y, w, h),
        Art::Missing => buf.fill_rect(x, y, w, h, MISSING),
    }
}

fn frac(v: i32, f: f64) -> i32 {
    ((v as f64 * f).round() as i32).max(1)
}

fn draw_cactus(buf: &mut PixelBuf, x: i32, y: i32, w: i32, h: i32, arms: u8) {
    let trunk_w = frac(w, 0.36);
    let trunk_x = x + (w - trunk_w) / 2;
    let arm_w = frac(w, 0.2);

    buf.fill_rect(trunk_x, y, trunk_w, h, CACTUS);
    buf.fill_rect(trunk_x + trunk_w / 3, y + 1, 1, h - 1, CACTUS_HI);

    if arms >= 1 {
        let top = y + frac(h, 0.28);
        let elbow = y + frac(h, 0.58);
        buf.fill_rect(x, top, arm_w, elbow - top + arm_w, CACTUS);
        buf.fill_rect(x, elbow, trunk_x - x, arm_w, CACTUS);
    }
    if arms >= 2 {
        let top = y + frac(h, 0.16);
        let elbow = y + frac(h, 0.46);
        let ax = x + w - arm_w;
        buf.fill_rect(ax, top, arm_w, elbow - top + arm_w, CACTUS);
        buf.fill_rect(trunk_x + trunk_w, elbow, ax - trunk_x - trunk_w, arm_w, CACTUS);
    }
}

fn draw_cluster(buf: &mut PixelBuf, x: i32, y: i32, w: i32, h: i32, stems: u8) {
    const HEIGHTS: [f64; 4] = [1.0, 0.7, 0.85, 0.6];
    let n = stems.max(1) as i32;
    let slot = (w as f64 / (n * 2 - 1) as f64).max(1.0);
    for i in 0..n {
        let sx = x + (i as f64 * 2.0 * slot).round() as i32;
        let sh = frac(h, HEIGHTS[i as usize % HEIGHTS.len()]);
        let sw = (slot.round() as i32).max(1);
        buf.fill_rect(sx, y + h - sh, sw, sh, CACTUS);
        buf.fill_rect(sx, y + h - sh, 1, sh, CACTUS_HI);
    }
}

fn draw_rock(buf: &mut PixelBuf, x: i32, y: i32, w: i32, h: i32) {
    for row in 0..h {
        let t = row as f64 / h as f64;
        let inset = ((1.0 - t).powi(2) * w as f64 * 0.4) as i32;
        let c = if row >= h - h / 4 { ROCK_DARK } else { ROCK };
        buf.fill_rect(x + inset, y + row, w - inset * 2, 1, c);
    }
}

fn draw_sprite(buf: &mut PixelBuf, sprite: &Sprite, x: i32, y: i32, w: i32, h: i32) {
    for dy in 0..h {
        let sy = dy as usize * sprite.h / h as usize;
        for dx in 0..w {
            let sx = dx as usize * sprite.w / w as usize;
            if let Some(c) = sprite.get(sx, sy) {
                buf.set(x + dx, y + dy, c);
            }
        }
    }
}

#[rustfmt::skip]
const DINO_A: [&str; 16] = [
    "........xxxxxxx.",
    ".......xxexxxxxx",
    ".......xxxxxxxxx",
    ".......xxxxx....",
    ".......xxxxxxx..",
    "x.....xxxxx.....",
    "x....xxxxxxx....",
    "xx..xxxxxxxxx...",
    "xxxxxxxxxxx.x...",
    ".xxxxxxxxxx.....",
    "..xxxxxxxxx.....",
    "...xxxxxxx......",
    "....xxx.xx......",
    "....xx...x......",
    "....x....x......",
    "....xx...xx.....",
];

#[rustfmt::skip]
const DINO_B: [&str; 16] = [
    "........xxxxxxx.",
    ".......xxexxxxxx",
    ".......xxxxxxxxx",
    ".......xxxxx....",
    ".......xxxxxxx..",
    "x.....xxxxx.....",
    "x....xxxxxxx....",
    "xx..xxxxxxxxx...",
    "xxxxxxxxxxx.x...",
    ".xxxxxxxxxx.....",
    "..xxxxxxxxx.....",
    "...xxxxxxx......",
    "....xxx.xx......",
    "....xx..x.......",
    ".....x..x.......",
    ".....xx.xx......",
];

fn dino_color(ch: char) -> Option<Rgb> {
    match ch {
        'x' => Some(DINO),
        'e' => Some(DINO_EYE),
        _ => None,
    }
}

/// Stretches an ASCII mask over a pixel box.
fn stamp(buf: &mut PixelBuf, x: i32, y: i32, w: i32, h: i32, rows: &[&str], color: fn(char) -> Option<Rgb>) {
    let mh = rows.len();
    let mw = rows.first().map_or(0, |r| r.len());
    if mw == 0 || w <= 0 || h <= 0 {
        return;
    }
    for dy in 0..h {
        let row = rows[dy as usize * mh / h as usize].as_bytes();
        for dx in 0..w {
            if let Some(c) = color(row[dx as usize * mw / w as usize] as char) {
                buf.set(x + dx, y + dy, c);
            }
        }
    }
}

fn draw_hud(buf: &mut PixelBuf, view: &Snapshot) {
    let line = format!("HI {:05}  {:05}", view.best, view.score);
    let x = buf.w as i32 - text_width(&line, 1) - 2;
    draw_text(buf, x, 2, &line, 1, TEXT, 1.0);
    draw_text(buf, 2, 2, view.status_text, 1, TEXT, 1.0);
}

fn draw_title(buf: &mut PixelBuf) {
    let cx = buf.w as i32 / 2;
    let cy = buf.h as i32 / 4;
    let size = if buf.w >= 80 { 2 } else { 1 };
    draw_text_centered(buf, cx + 1, cy + 1, "DINO RUN", size, SHADOW);
    draw_text_centered(buf, cx, cy, "DINO RUN", size, DINO);
    draw_text_centered(buf, cx, cy + 6 * size + 3, "SPACE TO START", 1, TEXT);
}

fn draw_game_over(buf: &mut PixelBuf, view: &Snapshot) {
    // 55% black veil
    buf.dim(115);

    let cx = buf.w as i32 / 2;
    let cy = buf.h as i32 / 2;
    let panel_w = text_width("GAME OVER", 2) + 10;
    let panel_h = 30;
    let px = cx - panel_w / 2;
    let py = cy - panel_h / 2;

    buf.fill_rect(px - 1, py - 1, panel_w + 2, panel_h + 2, PANEL_EDGE);
    buf.fill_rect(px, py, panel_w, panel_h, PANEL);
    draw_text_centered(buf, cx, py + 3, "GAME OVER", 2, DINO);
    draw_text_centered(buf, cx, py + 16, &format!("SCORE {}", view.score), 1, TEXT);
    draw_text_centered(buf, cx, py + 23, &format!("BEST {}", view.best), 1, TEXT);
}

fn draw_high_score_cue(buf: &mut PixelBuf, alpha: f32) {
    let text = "NEW HIGH SCORE!";
    let x = buf.w as i32 / 2 - text_width(text, 1) / 2;
    let y = (buf.h as i32 / 2 - 25).max(9);
    for dy in -2..7 {
        for dx in -3..text_width(text, 1) + 3 {
            buf.blend(x + dx, y + dy, SHADOW, alpha * 0.6);
        }
    }
    draw_text(buf, x, y, text, 1, GOLD, alpha);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Catalog, Variant};
    use crate::config::Config;
    use crate::geometry::Viewport;
    use crate::physics::Player;
    use crate::world::Obstacle;

    fn snapshot<'a>(
        player: &'a Player,
        obstacles: &'a [Obstacle],
        catalog: &'a Catalog,
        status: Status,
    ) -> Snapshot<'a> {
        Snapshot {
            viewport: Viewport::new(1000.0, 600.0),
            player,
            obstacles,
            catalog,
            status,
            status_text: "running",
            score: 17,
            best: 42,
            travelled: 0.0,
            tick: 0,
            high_score_cue: None,
        }
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut buf = PixelBuf::new(4, 4);
        buf.set(-1, 0, MISSING);
        buf.set(4, 0, MISSING);
        buf.blend(0, 9, MISSING, 1.0);
        assert!((0..4).all(|x| (0..4).all(|y| buf.get(x, y) == SKY_TOP)));
    }

    #[test]
    fn blend_mixes_toward_color() {
        let mut buf = PixelBuf::new(1, 1);
        buf.fill_rect(0, 0, 1, 1, Rgb(0, 0, 0));
        buf.blend(0, 0, Rgb(200, 100, 0), 0.5);
        assert_eq!(buf.get(0, 0), Rgb(100, 50, 0));
    }

    #[test]
    fn text_width_counts_gaps() {
        assert_eq!(text_width("", 1), 0);
        assert_eq!(text_width("0", 1), 3);
        assert_eq!(text_width("42", 1), 7);
        assert_eq!(text_width("42", 2), 14);
    }

    #[test]
    fn glyphs_cover_status_text() {
        for ch in "ready running gameover highscore reset! (assets failed: 3)".chars() {
            if ch != ' ' {
                assert_ne!(glyph(ch), [0; 5], "{ch:?}");
            }
        }
    }

    #[test]
    fn player_and_missing_art_are_drawn() {
        let config = Config::default();
        let viewport = Viewport::new(1000.0, 600.0);
        let player = Player::new(&config, &viewport);
        let catalog = Catalog {
            variants: vec![Variant::missing()],
            failed: 1,
        };
        let obstacles = [Obstacle {
            x: 500.0,
            y: 400.0,
            width: 100.0,
            height: 164.0,
            speed: 4.0,
            variant: 0,
        }];
        let view = snapshot(&player, &obstacles, &catalog, Status::Running);

        // 100x60 pixels: one logical unit is 0.1 px
        let mut buf = PixelBuf::new(100, 60);
        draw(&mut buf, &view);
        assert_eq!(buf.get(55, 50), MISSING);

        // lower body of the dino sprite
        let (x, y, w, h) = Projection { s: 0.1 }.rect(&player.bounds());
        assert_eq!(buf.get((x + w / 2) as usize, (y + h * 10 / 16) as usize), DINO);
    }

    #[test]
    fn game_over_draws_panel() {
        let config = Config::default();
        let viewport = Viewport::new(1000.0, 600.0);
        let player = Player::new(&config, &viewport);
        let catalog = Catalog::builtin();
        let view = snapshot(&player, &[], &catalog, Status::GameOver);

        let mut buf = PixelBuf::new(100, 60);
        draw(&mut buf, &view);
        let panel_w = text_width("GAME OVER", 2) + 10;
        let px = 50 - panel_w / 2;
        assert_eq!(buf.get(px as usize + 1, 16), PANEL);
        // the veil darkens the corner sky
        assert!(buf.get(0, 1).0 < SKY_TOP.0 / 2 + 1);
    }

    #[test]
    fn render_emits_one_line_per_row_pair() {
        let buf = PixelBuf::new(3, 4);
        let mut out = Vec::new();
        buf.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\r\n").count(), 1);
    }
}
