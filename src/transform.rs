use crate::block_position::{BlockPosition, Vec3d};
use serde::{Deserialize, Serialize};

/// Rotation about the vertical axis in 90° steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    None,
    Clockwise90,
    Clockwise180,
    Counterclockwise90,
}

impl Rotation {
    fn rotate(&self, x: f64, z: f64) -> (f64, f64) {
        match self {
            Rotation::None => (x, z),
            Rotation::Clockwise90 => (-z, x),
            Rotation::Clockwise180 => (-x, -z),
            Rotation::Counterclockwise90 => (z, -x),
        }
    }

    fn rotate_block(&self, x: i32, z: i32) -> (i32, i32) {
        match self {
            Rotation::None => (x, z),
            Rotation::Clockwise90 => (-z, x),
            Rotation::Clockwise180 => (-x, -z),
            Rotation::Counterclockwise90 => (z, -x),
        }
    }
}

/// Mirroring across one of the horizontal axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mirror {
    None,
    /// Negates Z.
    LeftRight,
    /// Negates X.
    FrontBack,
}

impl Mirror {
    fn mirror(&self, x: f64, z: f64) -> (f64, f64) {
        match self {
            Mirror::None => (x, z),
            Mirror::LeftRight => (x, -z),
            Mirror::FrontBack => (-x, z),
        }
    }

    fn mirror_block(&self, x: i32, z: i32) -> (i32, i32) {
        match self {
            Mirror::None => (x, z),
            Mirror::LeftRight => (x, -z),
            Mirror::FrontBack => (-x, z),
        }
    }
}

/// A rotation and/or mirror about a pivot point.
///
/// The mirror applies before the rotation, matching vanilla structure
/// placement. The point map is a bijection, so transformed templates
/// round-trip exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapTransform {
    rotation: Rotation,
    mirror: Mirror,
    pivot: BlockPosition,
}

impl MapTransform {
    pub fn new(pivot: BlockPosition, rotation: Rotation, mirror: Mirror) -> Self {
        MapTransform {
            rotation,
            mirror,
            pivot,
        }
    }

    pub fn identity() -> Self {
        MapTransform::new(BlockPosition::ORIGIN, Rotation::None, Mirror::None)
    }

    pub fn rotation_around(pivot: BlockPosition, rotation: Rotation) -> Self {
        MapTransform::new(pivot, rotation, Mirror::None)
    }

    pub fn mirror_around(pivot: BlockPosition, mirror: Mirror) -> Self {
        MapTransform::new(pivot, Rotation::None, mirror)
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn mirror(&self) -> Mirror {
        self.mirror
    }

    pub fn pivot(&self) -> BlockPosition {
        self.pivot
    }

    /// Transform a continuous point. Exact for coordinates that are
    /// representable without rounding, which covers every half-block
    /// position a template can hold.
    pub fn transformed_point(&self, point: Vec3d) -> Vec3d {
        let x = point.x - self.pivot.x as f64;
        let z = point.z - self.pivot.z as f64;
        let (x, z) = self.mirror.mirror(x, z);
        let (x, z) = self.rotation.rotate(x, z);
        Vec3d::new(x + self.pivot.x as f64, point.y, z + self.pivot.z as f64)
    }

    /// Transform a discrete block point with pure integer math.
    pub fn transformed_block(&self, pos: BlockPosition) -> BlockPosition {
        let x = pos.x - self.pivot.x;
        let z = pos.z - self.pivot.z;
        let (x, z) = self.mirror.mirror_block(x, z);
        let (x, z) = self.rotation.rotate_block(x, z);
        BlockPosition::new(x + self.pivot.x, pos.y, z + self.pivot.z)
    }
}
