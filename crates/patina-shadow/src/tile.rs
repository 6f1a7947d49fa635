//! Rendered shadow tile caching.
//!
//! A shadow is composed of eight border tiles around the window. Tiles are
//! rendered once per distinct [`TileKey`] and cached; the cache is thrown away
//! wholesale whenever the palette or shadow configuration changes, never
//! partially invalidated.

use ahash::HashMap;
use tracing::debug;

use crate::config::Rgba;

bitflags::bitflags! {
    /// Which window borders the shadow must wrap around.
    ///
    /// Menus are drawn flush with their parent at top and bottom, so their
    /// shadows omit those borders (the "square" tile set). Ordinary windows
    /// use all borders (the "round" tile set).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BorderFlags: u8 {
        const TOP = 1 << 0;
        const BOTTOM = 1 << 1;
    }
}

impl BorderFlags {
    pub const ROUND: BorderFlags = BorderFlags::all();
    pub const SQUARE: BorderFlags = BorderFlags::empty();
}

/// Cache key for one rendered tile set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub size: u32,
    pub active: bool,
    pub borders: BorderFlags,
}

/// One rendered tile surface, as produced by the host renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data, row-major, owned by the cache.
    pub pixels: Vec<u8>,
}

/// Number of tiles in one set: four corners and four edges.
pub const TILES_PER_SET: usize = 8;

/// Host-provided tile rendering.
///
/// Pixel production (gradients, compositing) lives with the drawing layer;
/// this crate only decides *which* tiles exist and when they are stale.
pub trait TileRenderer {
    fn render_tiles(&mut self, key: TileKey, color: Rgba) -> [Tile; TILES_PER_SET];
}

/// Cache of rendered tile sets, invalidated wholesale.
#[derive(Debug, Default)]
pub struct TileCache {
    tiles: HashMap<TileKey, [Tile; TILES_PER_SET]>,
    /// Bumped on every invalidation so consumers can tell stale handles apart.
    generation: u64,
}

impl TileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tile set for a key, rendering it on first access.
    pub fn tiles(
        &mut self,
        key: TileKey,
        color: Rgba,
        renderer: &mut dyn TileRenderer,
    ) -> &[Tile; TILES_PER_SET] {
        self.tiles.entry(key).or_insert_with(|| {
            debug!(?key, "rendering shadow tile set");
            renderer.render_tiles(key, color)
        })
    }

    pub fn contains(&self, key: TileKey) -> bool {
        self.tiles.contains_key(&key)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drop every cached tile and bump the generation counter.
    pub fn invalidate(&mut self) {
        self.tiles.clear();
        self.generation += 1;
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingRenderer {
        calls: u32,
    }

    impl TileRenderer for CountingRenderer {
        fn render_tiles(&mut self, key: TileKey, _color: Rgba) -> [Tile; TILES_PER_SET] {
            self.calls += 1;
            std::array::from_fn(|_| Tile {
                width: key.size,
                height: key.size,
                pixels: vec![0; (key.size * key.size * 4) as usize],
            })
        }
    }

    fn key(active: bool, borders: BorderFlags) -> TileKey {
        TileKey {
            size: 29,
            active,
            borders,
        }
    }

    #[test]
    fn test_tiles_rendered_once_per_key() {
        let mut cache = TileCache::new();
        let mut renderer = CountingRenderer { calls: 0 };

        cache.tiles(key(true, BorderFlags::ROUND), Rgba::BLACK, &mut renderer);
        cache.tiles(key(true, BorderFlags::ROUND), Rgba::BLACK, &mut renderer);
        assert_eq!(renderer.calls, 1);

        cache.tiles(key(false, BorderFlags::ROUND), Rgba::BLACK, &mut renderer);
        cache.tiles(key(true, BorderFlags::SQUARE), Rgba::BLACK, &mut renderer);
        assert_eq!(renderer.calls, 3);
    }

    #[test]
    fn test_invalidate_is_wholesale() {
        let mut cache = TileCache::new();
        let mut renderer = CountingRenderer { calls: 0 };
        cache.tiles(key(true, BorderFlags::ROUND), Rgba::BLACK, &mut renderer);
        cache.tiles(key(false, BorderFlags::SQUARE), Rgba::BLACK, &mut renderer);

        let generation = cache.generation();
        cache.invalidate();
        assert!(cache.is_empty());
        assert_eq!(cache.generation(), generation + 1);

        // next access re-renders
        cache.tiles(key(true, BorderFlags::ROUND), Rgba::BLACK, &mut renderer);
        assert_eq!(renderer.calls, 3);
    }
}
