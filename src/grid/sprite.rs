use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use ratatui::style::Color;

use super::error::GridError;

/// Number of precomputed rotation frames for a rotatable sprite
pub const ROTATION_STEPS: usize = 64;

const ARROWS: [&str; 8] = ["→ ", "↘ ", "↓ ", "↙ ", "← ", "↖ ", "↑ ", "↗ "];

/// How one grid cell of a sprite looks in the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub symbol: String,
    pub color: Color,
}

impl Glyph {
    pub fn new(symbol: impl Into<String>, color: Color) -> Self {
        Self {
            symbol: symbol.into(),
            color,
        }
    }
}

/// A loaded sprite: one glyph, or one per rotation step when rotatable
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    frames: Vec<Glyph>,
    rotatable: bool,
}

impl Sprite {
    fn fixed(glyph: Glyph) -> Self {
        Self {
            frames: vec![glyph],
            rotatable: false,
        }
    }

    fn rotated(base: &Glyph) -> Self {
        let frames = (0..ROTATION_STEPS)
            .map(|step| {
                // each of the 8 arrows covers 8 rotation steps centred on its heading
                let octant = ((step + 4) / 8) % 8;
                Glyph::new(ARROWS[octant], base.color)
            })
            .collect();
        Self {
            frames,
            rotatable: true,
        }
    }

    pub fn is_rotatable(&self) -> bool {
        self.rotatable
    }

    /// Glyph to draw for the given rotation index
    pub fn glyph(&self, rotation_index: usize) -> &Glyph {
        if self.rotatable {
            &self.frames[rotation_index % ROTATION_STEPS]
        } else {
            &self.frames[0]
        }
    }
}

/// Resource paths known to the toolkit and what they look like
#[derive(Debug, Clone)]
pub struct SpriteCatalog {
    glyphs: HashMap<String, Glyph>,
}

impl SpriteCatalog {
    pub fn empty() -> Self {
        Self {
            glyphs: HashMap::new(),
        }
    }

    pub fn register(&mut self, path: impl Into<String>, glyph: Glyph) {
        self.glyphs.insert(path.into(), glyph);
    }

    pub fn lookup(&self, path: &str) -> Option<&Glyph> {
        self.glyphs.get(path)
    }
}

impl Default for SpriteCatalog {
    fn default() -> Self {
        let mut catalog = Self::empty();

        // Square snake in four colours, plus the uncoloured base images
        let palette = [Color::Green, Color::Cyan, Color::Yellow, Color::Magenta];
        catalog.register("sprites/squarehead.png", Glyph::new("■ ", Color::LightGreen));
        catalog.register("sprites/squarebody.png", Glyph::new("□ ", Color::Green));
        for (i, color) in palette.iter().enumerate() {
            catalog.register(format!("sprites/squarehead_{i}.png"), Glyph::new("■ ", *color));
            catalog.register(format!("sprites/squarebody_{i}.png"), Glyph::new("□ ", *color));
        }

        catalog.register("sprites/apple.png", Glyph::new("● ", Color::Red));
        catalog.register("sprites/nibble.png", Glyph::new("◆ ", Color::LightGreen));
        catalog.register("sprites/snake_head.png", Glyph::new("@ ", Color::Cyan));
        catalog.register("sprites/snake_tail.png", Glyph::new("o ", Color::Green));
        catalog.register("sprites/mouse.png", Glyph::new("m ", Color::Gray));
        catalog
    }
}

/// Expands a single image path into per-frame paths.
///
/// `sprites/body.png` with three frames becomes `sprites/body_0.png`,
/// `sprites/body_1.png` and `sprites/body_2.png`. A single frame keeps the
/// path unchanged.
pub fn frame_paths(path: &str, count: usize) -> Vec<String> {
    if count <= 1 {
        return vec![path.to_string()];
    }

    let (stem, ext) = match path.rfind('.') {
        Some(dot) if dot > path.rfind('/').map_or(0, |slash| slash + 1) => path.split_at(dot),
        _ => (path, ""),
    };
    (0..count).map(|i| format!("{stem}_{i}{ext}")).collect()
}

/// Cache of loaded sprites, keyed by resource path.
///
/// Every actor asking for the same path shares one `Sprite`. Rotation frames
/// are computed once, when the path is first requested as rotatable.
pub struct SpriteStore {
    catalog: SpriteCatalog,
    sprites: HashMap<(String, bool), Arc<Sprite>>,
}

impl SpriteStore {
    pub fn new(catalog: SpriteCatalog) -> Self {
        Self {
            catalog,
            sprites: HashMap::new(),
        }
    }

    pub fn get(&mut self, path: &str, rotatable: bool) -> Result<Arc<Sprite>, GridError> {
        let key = (path.to_string(), rotatable);
        if let Some(sprite) = self.sprites.get(&key) {
            return Ok(Arc::clone(sprite));
        }

        let base = self
            .catalog
            .lookup(path)
            .ok_or_else(|| GridError::SpriteNotFound {
                path: path.to_string(),
            })?;

        let sprite = if rotatable {
            Sprite::rotated(base)
        } else {
            Sprite::fixed(base.clone())
        };
        debug!("loaded sprite {path} (rotatable: {rotatable})");

        let sprite = Arc::new(sprite);
        self.sprites.insert(key, Arc::clone(&sprite));
        Ok(sprite)
    }

    /// Loads every frame of a multi-frame actor
    pub fn get_frames(
        &mut self,
        path: &str,
        count: usize,
        rotatable: bool,
    ) -> Result<Vec<Arc<Sprite>>, GridError> {
        frame_paths(path, count)
            .iter()
            .map(|frame| self.get(frame, rotatable))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

impl Default for SpriteStore {
    fn default() -> Self {
        Self::new(SpriteCatalog::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_paths() {
        assert_eq!(frame_paths("sprites/apple.png", 1), vec!["sprites/apple.png"]);
        assert_eq!(
            frame_paths("sprites/squarebody.png", 3),
            vec![
                "sprites/squarebody_0.png",
                "sprites/squarebody_1.png",
                "sprites/squarebody_2.png",
            ]
        );
        assert_eq!(frame_paths("noext", 2), vec!["noext_0", "noext_1"]);
        assert_eq!(frame_paths("dir.d/noext", 2), vec!["dir.d/noext_0", "dir.d/noext_1"]);
    }

    #[test]
    fn test_store_caches_by_path() {
        let mut store = SpriteStore::default();
        let a = store.get("sprites/apple.png", false).unwrap();
        let b = store.get("sprites/apple.png", false).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_sprite_is_an_error() {
        let mut store = SpriteStore::default();
        let err = store.get("sprites/nemo.gif", false).unwrap_err();
        assert_eq!(
            err,
            GridError::SpriteNotFound {
                path: "sprites/nemo.gif".to_string()
            }
        );
    }

    #[test]
    fn test_rotatable_sprite_follows_heading() {
        let mut store = SpriteStore::default();
        let head = store.get("sprites/snake_head.png", true).unwrap();

        assert!(head.is_rotatable());
        // rotation index for a direction d is (1000 * d) / 5625
        assert_eq!(head.glyph(0).symbol, "→ ");
        assert_eq!(head.glyph(16).symbol, "↓ ");
        assert_eq!(head.glyph(32).symbol, "← ");
        assert_eq!(head.glyph(48).symbol, "↑ ");
        assert_eq!(head.glyph(63).symbol, "→ ");
    }

    #[test]
    fn test_registered_glyph() {
        let mut catalog = SpriteCatalog::empty();
        catalog.register("sprites/nemo.gif", Glyph::new("f ", Color::LightRed));
        let mut store = SpriteStore::new(catalog);

        let frames = store.get_frames("sprites/nemo.gif", 1, false).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].glyph(0).symbol, "f ");
    }
}
