use crate::block_position::{BlockPosition, Vec3d};
use crate::error::{Result, TemplateError};
use crate::transform::MapTransform;
use quartz_nbt::{NbtCompound, NbtTag};
use serde::{Deserialize, Serialize};

/// An axis-aligned box of block positions, inclusive on both corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockBounds {
    min: BlockPosition,
    max: BlockPosition,
}

impl BlockBounds {
    /// Build a box from any two opposing corners; the corners are
    /// normalized so `min` is the componentwise minimum.
    pub fn new(a: BlockPosition, b: BlockPosition) -> Self {
        BlockBounds {
            min: BlockPosition::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: BlockPosition::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    pub fn of_block(pos: BlockPosition) -> Self {
        BlockBounds { min: pos, max: pos }
    }

    pub fn min(&self) -> BlockPosition {
        self.min
    }

    pub fn max(&self) -> BlockPosition {
        self.max
    }

    pub fn size(&self) -> BlockPosition {
        self.max - self.min + BlockPosition::new(1, 1, 1)
    }

    pub fn center(&self) -> Vec3d {
        Vec3d::new(
            (self.min.x + self.max.x) as f64 / 2.0 + 0.5,
            (self.min.y + self.max.y) as f64 / 2.0 + 0.5,
            (self.min.z + self.max.z) as f64 / 2.0 + 0.5,
        )
    }

    pub fn contains(&self, pos: BlockPosition) -> bool {
        pos.x >= self.min.x
            && pos.x <= self.max.x
            && pos.y >= self.min.y
            && pos.y <= self.max.y
            && pos.z >= self.min.z
            && pos.z <= self.max.z
    }

    pub fn union(&self, other: &BlockBounds) -> BlockBounds {
        BlockBounds {
            min: BlockPosition::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: BlockPosition::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    pub fn intersection(&self, other: &BlockBounds) -> Option<BlockBounds> {
        let min = BlockPosition::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.min.z.max(other.min.z),
        );
        let max = BlockPosition::new(
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
            self.max.z.min(other.max.z),
        );
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return None;
        }
        Some(BlockBounds { min, max })
    }

    /// Transform both corners and re-normalize; a rotation or mirror
    /// can swap which corner is minimal.
    pub fn transformed(&self, transform: &MapTransform) -> BlockBounds {
        BlockBounds::new(
            transform.transformed_block(self.min),
            transform.transformed_block(self.max),
        )
    }

    /// Iterate every block position inside the box, X fastest.
    pub fn iter(&self) -> impl Iterator<Item = BlockPosition> + '_ {
        let min = self.min;
        let max = self.max;
        (min.y..=max.y).flat_map(move |y| {
            (min.z..=max.z)
                .flat_map(move |z| (min.x..=max.x).map(move |x| BlockPosition::new(x, y, z)))
        })
    }

    pub fn serialize(&self, tag: &mut NbtCompound) {
        tag.insert(
            "min",
            NbtTag::IntArray(vec![self.min.x, self.min.y, self.min.z]),
        );
        tag.insert(
            "max",
            NbtTag::IntArray(vec![self.max.x, self.max.y, self.max.z]),
        );
    }

    pub fn deserialize(tag: &NbtCompound) -> Result<BlockBounds> {
        let min = match tag.get::<_, &NbtTag>("min") {
            Ok(NbtTag::IntArray(arr)) if arr.len() == 3 => {
                BlockPosition::new(arr[0], arr[1], arr[2])
            }
            _ => {
                return Err(TemplateError::MalformedBounds(
                    "missing or malformed min corner".to_string(),
                ))
            }
        };
        let max = match tag.get::<_, &NbtTag>("max") {
            Ok(NbtTag::IntArray(arr)) if arr.len() == 3 => {
                BlockPosition::new(arr[0], arr[1], arr[2])
            }
            _ => {
                return Err(TemplateError::MalformedBounds(
                    "missing or malformed max corner".to_string(),
                ))
            }
        };
        Ok(BlockBounds::new(min, max))
    }
}
