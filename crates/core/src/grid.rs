//! Fixed-size tile grid produced by generation and read by the simulation.

use std::fmt;

use crate::types::{Pos, TileKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, tiles: vec![TileKind::Nothing; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn reset(&mut self) {
        self.tiles.fill(TileKind::Nothing);
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Tile at `pos`; anything outside the world reads as `Nothing`.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Nothing;
        }
        self.tiles[self.index(pos)]
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    pub fn set_if_nothing(&mut self, pos: Pos, tile: TileKind) -> bool {
        if !self.is_nothing(pos) {
            return false;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
        true
    }

    pub fn is_nothing(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.tiles[self.index(pos)] == TileKind::Nothing
    }

    pub fn is_floor(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.tiles[self.index(pos)] == TileKind::Floor
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.is_floor(pos)
    }

    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|&&tile| tile == TileKind::Floor).count()
    }

    pub fn floor_ratio(&self) -> f64 {
        if self.tiles.is_empty() {
            return 0.0;
        }
        self.floor_count() as f64 / self.tiles.len() as f64
    }

    pub fn first_floor(&self) -> Option<Pos> {
        self.positions().find(|&pos| self.tile_at(pos) == TileKind::Floor)
    }

    /// Every cell, column by column: `x` ascending outer, `y` ascending inner. Wall dressing
    /// and avatar placement depend on this order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.width).flat_map(move |x| {
            (0..self.height).map(move |y| Pos { y: y as i32, x: x as i32 })
        })
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.tiles.len());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for tile in &self.tiles {
            bytes.push(match tile {
                TileKind::Nothing => 0,
                TileKind::Floor => 1,
                TileKind::SideWall => 2,
                TileKind::TopWall => 3,
            });
        }
        bytes
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            let row: String = (0..self.width)
                .map(|x| self.tiles[y * self.width + x].glyph())
                .collect();
            writeln!(f, "{}", row.trim_end())?;
        }
        Ok(())
    }
}
