//! Capture, transform, and re-place regions of a Minecraft world as
//! map templates.
//!
//! A template holds entities with section-local position encoding
//! ([`MapEntity`]), named regions with auxiliary NBT data
//! ([`TemplateRegion`]), and supports 90°-step rotation and mirroring
//! of the whole capture ([`MapTransform`]). Integration with a live
//! world goes through the [`LiveEntity`] and [`EntitySpawner`] traits.

pub mod block_position;
pub mod bounding_box;
pub mod entity;
pub mod error;
pub mod region;
pub mod template;
pub mod transform;

pub use block_position::{BlockPosition, Vec3d};
pub use bounding_box::BlockBounds;
pub use entity::{EntitySpawner, LiveEntity, MapEntity};
pub use error::{Result, TemplateError};
pub use region::TemplateRegion;
pub use template::MapTemplate;
pub use transform::{MapTransform, Mirror, Rotation};
