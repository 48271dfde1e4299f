//! Obstacle art.
//!
//! Each variant has a natural size (what an image's pixel dimensions would
//! be) that the spawner scales, plus the art the renderer stretches over the
//! scaled box. Variants come from an [`AssetLoader`]; a failed variant keeps
//! the slot with a fallback size and is drawn as a flat fill.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::render::Rgb;

pub const VARIANT_COUNT: usize = 9;

/// Natural size used when a variant could not be loaded.
pub const FALLBACK_NATURAL: (f64, f64) = (28.0, 72.0);

/// Logical units per sprite cell when sizing a sprite file.
const SPRITE_CELL: f64 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Saguaro with 0, 1 or 2 arms.
    Cactus { arms: u8 },
    /// Several short stems side by side.
    Cluster { stems: u8 },
    Rock,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub w: usize,
    pub h: usize,
    pub px: Vec<Option<Rgb>>,
}

impl Sprite {
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        self.px[y * self.w + x]
    }

    /// Parses ASCII art: `#` dark green, `+` light green, `o` brown, `*`
    /// flower pink, `.` or space transparent.
    pub fn parse(text: &str) -> std::result::Result<Sprite, String> {
        let rows: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end())
            .filter(|l| !l.is_empty())
            .collect();
        let h = rows.len();
        let w = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        if w == 0 || h == 0 {
            return Err("empty sprite".into());
        }
        let mut px = Vec::with_capacity(w * h);
        for (y, row) in rows.iter().enumerate() {
            let mut n = 0;
            for ch in row.chars() {
                px.push(match ch {
                    '#' => Some(Rgb(46, 110, 40)),
                    '+' => Some(Rgb(92, 160, 64)),
                    'o' => Some(Rgb(140, 100, 60)),
                    '*' => Some(Rgb(235, 120, 170)),
                    '.' | ' ' => None,
                    other => return Err(format!("unknown cell {other:?} on row {}", y + 1)),
                });
                n += 1;
            }
            px.extend(std::iter::repeat_n(None, w - n));
        }
        Ok(Sprite { w, h, px })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Art {
    Shape(Shape),
    Sprite(Sprite),
    Missing,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Variant {
    pub natural_w: f64,
    pub natural_h: f64,
    pub art: Art,
}

impl Variant {
    pub fn missing() -> Self {
        Variant {
            natural_w: FALLBACK_NATURAL.0,
            natural_h: FALLBACK_NATURAL.1,
            art: Art::Missing,
        }
    }
}

pub trait AssetLoader {
    fn load_variant(&self, index: usize) -> Result<Variant>;
}

/// Procedural art, always available.
pub struct Builtin;

#[rustfmt::skip]
const BUILTIN: [(f64, f64, Shape); VARIANT_COUNT] = [
    (28.0, 72.0, Shape::Cactus { arms: 0 }),
    (40.0, 70.0, Shape::Cactus { arms: 1 }),
    (56.0, 64.0, Shape::Cactus { arms: 2 }),
    (52.0, 44.0, Shape::Cluster { stems: 2 }),
    (72.0, 48.0, Shape::Cluster { stems: 3 }),
    (48.0, 32.0, Shape::Rock),
    (36.0, 80.0, Shape::Cactus { arms: 2 }),
    (88.0, 52.0, Shape::Cluster { stems: 4 }),
    (64.0, 40.0, Shape::Rock),
];

impl AssetLoader for Builtin {
    fn load_variant(&self, index: usize) -> Result<Variant> {
        let (natural_w, natural_h, shape) = BUILTIN[index % VARIANT_COUNT];
        Ok(Variant {
            natural_w,
            natural_h,
            art: Art::Shape(shape),
        })
    }
}

/// Reads `obstacle1.txt` .. `obstacle9.txt` from a directory.
pub struct SpriteDir {
    dir: PathBuf,
}

impl SpriteDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SpriteDir { dir: dir.into() }
    }

    fn path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("obstacle{}.txt", index + 1))
    }
}

impl AssetLoader for SpriteDir {
    fn load_variant(&self, index: usize) -> Result<Variant> {
        let path = self.path(index);
        let text = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let sprite = Sprite::parse(&text).map_err(|reason| Error::Sprite {
            path: path.clone(),
            reason,
        })?;
        Ok(Variant {
            natural_w: sprite.w as f64 * SPRITE_CELL,
            natural_h: sprite.h as f64 * SPRITE_CELL,
            art: Art::Sprite(sprite),
        })
    }
}

#[derive(Clone, Debug)]
pub struct Catalog {
    pub variants: Vec<Variant>,
    pub failed: usize,
}

impl Catalog {
    /// Loads every variant once. Failures are logged and counted; they never
    /// abort the load.
    pub fn load(loader: &dyn AssetLoader) -> Catalog {
        let mut failed = 0;
        let variants = (0..VARIANT_COUNT)
            .map(|i| match loader.load_variant(i) {
                Ok(v) => v,
                Err(e) => {
                    warn!(variant = i + 1, error = %e, "failed to load obstacle art");
                    failed += 1;
                    Variant::missing()
                }
            })
            .collect();
        info!(failed, "obstacle art loaded");
        Catalog { variants, failed }
    }

    pub fn builtin() -> Catalog {
        Catalog::load(&Builtin)
    }

    pub fn from_dir(dir: &Path) -> Catalog {
        Catalog::load(&SpriteDir::new(dir))
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn get(&self, index: usize) -> &Variant {
        &self.variants[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_loads_without_failures() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), VARIANT_COUNT);
        assert_eq!(catalog.failed, 0);
        assert!(catalog.variants.iter().all(|v| matches!(v.art, Art::Shape(_))));
    }

    #[test]
    fn parse_pads_short_rows() {
        let sprite = Sprite::parse(".#.\n###\n#\n").unwrap();
        assert_eq!((sprite.w, sprite.h), (3, 3));
        assert_eq!(sprite.get(1, 0), Some(Rgb(46, 110, 40)));
        assert_eq!(sprite.get(0, 0), None);
        assert_eq!(sprite.get(2, 2), None);
    }

    #[test]
    fn parse_rejects_unknown_cells() {
        assert!(Sprite::parse("#?#").is_err());
        assert!(Sprite::parse("\n\n").is_err());
    }

    #[test]
    fn missing_sprite_dir_falls_back_per_variant() {
        let dir = std::env::temp_dir().join(format!("dino-tui-sprites-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("obstacle1.txt"), ".#.\n###\n.#.\n.#.\n").unwrap();

        let catalog = Catalog::from_dir(&dir);
        assert_eq!(catalog.failed, VARIANT_COUNT - 1);
        assert_eq!(catalog.get(0).natural_w, 12.0);
        assert_eq!(catalog.get(0).natural_h, 16.0);
        assert_eq!(catalog.get(1), &Variant::missing());

        fs::remove_dir_all(&dir).unwrap();
    }
}
