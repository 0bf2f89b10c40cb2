use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A discrete block position in world or authoring space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPosition {
    pub const ORIGIN: BlockPosition = BlockPosition { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        BlockPosition { x, y, z }
    }

    /// Minimum corner of the 16-block-aligned section containing this
    /// position. Clearing the low 4 bits rounds toward negative
    /// infinity, so this is correct for negative coordinates too.
    pub const fn min_section_corner(&self) -> BlockPosition {
        BlockPosition {
            x: self.x & !15,
            y: self.y & !15,
            z: self.z & !15,
        }
    }
}

impl Add for BlockPosition {
    type Output = BlockPosition;

    fn add(self, other: BlockPosition) -> BlockPosition {
        BlockPosition::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for BlockPosition {
    type Output = BlockPosition;

    fn sub(self, other: BlockPosition) -> BlockPosition {
        BlockPosition::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl From<(i32, i32, i32)> for BlockPosition {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        BlockPosition::new(x, y, z)
    }
}

impl From<BlockPosition> for (i32, i32, i32) {
    fn from(pos: BlockPosition) -> Self {
        (pos.x, pos.y, pos.z)
    }
}

/// A continuous position, as used for entity coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3d {
    pub const ZERO: Vec3d = Vec3d {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3d { x, y, z }
    }

    /// Floor each axis toward negative infinity.
    pub fn floor(&self) -> BlockPosition {
        BlockPosition::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }

    /// Minimum corner of the 16-block-aligned section containing this
    /// point: floor first, then mask. Truncation instead of flooring
    /// would misplace negative coordinates by one section.
    pub fn min_section_corner(&self) -> BlockPosition {
        self.floor().min_section_corner()
    }
}

impl Add for Vec3d {
    type Output = Vec3d;

    fn add(self, other: Vec3d) -> Vec3d {
        Vec3d::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3d {
    type Output = Vec3d;

    fn sub(self, other: Vec3d) -> Vec3d {
        Vec3d::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Add<BlockPosition> for Vec3d {
    type Output = Vec3d;

    fn add(self, other: BlockPosition) -> Vec3d {
        Vec3d::new(
            self.x + other.x as f64,
            self.y + other.y as f64,
            self.z + other.z as f64,
        )
    }
}

impl Sub<BlockPosition> for Vec3d {
    type Output = Vec3d;

    fn sub(self, other: BlockPosition) -> Vec3d {
        Vec3d::new(
            self.x - other.x as f64,
            self.y - other.y as f64,
            self.z - other.z as f64,
        )
    }
}

impl From<BlockPosition> for Vec3d {
    fn from(pos: BlockPosition) -> Self {
        Vec3d::new(pos.x as f64, pos.y as f64, pos.z as f64)
    }
}

impl From<(f64, f64, f64)> for Vec3d {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Vec3d::new(x, y, z)
    }
}
