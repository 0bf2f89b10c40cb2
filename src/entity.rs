use crate::block_position::{BlockPosition, Vec3d};
use crate::error::{Result, TemplateError};
use crate::transform::MapTransform;
use log::debug;
use quartz_nbt::{NbtCompound, NbtList, NbtTag};

/// A live entity that can be captured into a template.
///
/// Implemented by the host game integration; `save_nbt` returns false
/// for entity types that are excluded from persistence (players), which
/// callers must treat as "cannot be captured" rather than an error.
pub trait LiveEntity {
    fn save_nbt(&self, tag: &mut NbtCompound) -> bool;

    /// The discrete block position the entity itself reports, used to
    /// re-anchor attachment offsets during capture.
    fn block_pos(&self) -> BlockPosition;
}

/// Host-side entity construction, including nested passenger entities.
pub trait EntitySpawner {
    type Entity;

    fn load_entity_with_passengers(
        &mut self,
        tag: &NbtCompound,
        consumer: &mut dyn FnMut(&Self::Entity),
    );
}

/// An entity stored in a map template.
///
/// `position` is in authoring space; the tag's `Pos` list is kept
/// relative to the minimum corner of the 16-block section containing
/// `position`, so a template can be stored section by section and
/// re-placed anywhere. Hanging entities additionally carry an integer
/// `TileX`/`TileY`/`TileZ` attachment point, stored in the same
/// section-local frame as `Pos`.
#[derive(Debug, Clone, PartialEq)]
pub struct MapEntity {
    position: Vec3d,
    tag: NbtCompound,
}

impl MapEntity {
    pub fn new(position: Vec3d, tag: NbtCompound) -> Self {
        MapEntity { position, tag }
    }

    pub fn position(&self) -> Vec3d {
        self.position
    }

    pub fn tag(&self) -> &NbtCompound {
        &self.tag
    }

    /// Capture a live entity at the given authoring-space position.
    ///
    /// Returns `None` when the entity cannot be persisted. The saved
    /// tag has its `UUID` removed so multiple placements of the same
    /// template never collide, and its `Pos` re-encoded section-locally.
    pub fn from_entity<E: LiveEntity>(entity: &E, position: Vec3d) -> Option<MapEntity> {
        let mut tag = NbtCompound::new();
        if !entity.save_nbt(&mut tag) {
            debug!(
                "entity at ({}, {}, {}) is not persistable, skipping",
                position.x, position.y, position.z
            );
            return None;
        }

        // Avoid conflicts when the template is placed more than once.
        tag.inner_mut().remove("UUID");

        let min_corner = position.min_section_corner();
        tag.insert("Pos", pos_to_list(position - min_corner));

        // Hanging entities anchor to a block; re-express the anchor
        // relative to this section instead of the entity's own position.
        if let Some(attachment) = attachment_offset(&tag) {
            let local = (Vec3d::from(attachment - entity.block_pos()) + position).floor()
                - min_corner;
            put_attachment_offset(&mut tag, local);
        }

        Some(MapEntity { position, tag })
    }

    /// Decode an entity stored under the section whose minimum corner
    /// is `section_min`. The tag is trusted to have been produced by
    /// capture against that same section.
    pub fn from_tag(section_min: BlockPosition, tag: NbtCompound) -> Result<MapEntity> {
        let local_pos = read_pos(&tag)?;
        Ok(MapEntity {
            position: local_pos + section_min,
            tag,
        })
    }

    /// Build the spawn payload for placing this entity at `origin`.
    ///
    /// The result carries absolute world coordinates in `Pos` (and the
    /// attachment point, when present) for the host spawn API. It is a
    /// one-shot output: it is not section-local and must not be fed
    /// back through [`MapEntity::from_tag`].
    pub fn create_entity_tag(&self, origin: BlockPosition) -> Result<NbtCompound> {
        let mut tag = self.tag.clone();

        // Read from the source tag before Pos is overwritten below.
        let section_local_pos = read_pos(&self.tag)?;

        let world_position = self.position + origin;
        tag.insert("Pos", pos_to_list(world_position));

        if let Some(attachment) = attachment_offset(&tag) {
            let moved =
                (Vec3d::from(attachment) + (world_position - section_local_pos)).floor();
            put_attachment_offset(&mut tag, moved);
        }

        Ok(tag)
    }

    /// Construct this entity (and any passengers) in a world at the
    /// given placement origin, invoking `consumer` once per constructed
    /// entity.
    pub fn create_entities<S, F>(
        &self,
        world: &mut S,
        origin: BlockPosition,
        mut consumer: F,
    ) -> Result<()>
    where
        S: EntitySpawner,
        F: FnMut(&S::Entity),
    {
        let tag = self.create_entity_tag(origin)?;
        world.load_entity_with_passengers(&tag, &mut consumer);
        Ok(())
    }

    /// Apply a rotation/mirror, producing a new entity whose tag is
    /// re-encoded relative to the section containing the transformed
    /// position. Each entity's local frame is always its own position's
    /// section, never a shared origin.
    pub fn transformed(&self, transform: &MapTransform) -> MapEntity {
        let result_position = transform.transformed_point(self.position);
        let mut result_tag = self.tag.clone();

        let min_corner = self.position.min_section_corner();
        let min_result_corner = result_position.min_section_corner();

        result_tag.insert("Pos", pos_to_list(result_position - min_result_corner));

        // The attachment point must undergo the same geometric transform
        // as the position: reconstruct it in absolute coordinates, map
        // it, and re-encode against the result section.
        if let Some(attachment) = attachment_offset(&result_tag) {
            let attached = attachment + min_corner;
            let local = transform.transformed_block(attached) - min_result_corner;
            put_attachment_offset(&mut result_tag, local);
        }

        MapEntity {
            position: result_position,
            tag: result_tag,
        }
    }
}

fn read_pos(tag: &NbtCompound) -> Result<Vec3d> {
    let list = tag
        .get::<_, &NbtList>("Pos")
        .map_err(|e| TemplateError::MalformedPos(e.to_string()))?;
    list_to_pos(list)
}

fn pos_to_list(pos: Vec3d) -> NbtTag {
    NbtTag::List(NbtList::from(vec![
        NbtTag::Double(pos.x),
        NbtTag::Double(pos.y),
        NbtTag::Double(pos.z),
    ]))
}

fn list_to_pos(list: &NbtList) -> Result<Vec3d> {
    if list.len() < 3 {
        return Err(TemplateError::MalformedPos(format!(
            "expected 3 doubles, found {}",
            list.len()
        )));
    }
    Ok(Vec3d::new(
        list.get::<f64>(0)
            .map_err(|e| TemplateError::MalformedPos(e.to_string()))?,
        list.get::<f64>(1)
            .map_err(|e| TemplateError::MalformedPos(e.to_string()))?,
        list.get::<f64>(2)
            .map_err(|e| TemplateError::MalformedPos(e.to_string()))?,
    ))
}

/// The attachment triple is either fully present or fully absent; its
/// presence is the sole trigger for attachment handling in capture,
/// placement, and transform.
fn attachment_offset(tag: &NbtCompound) -> Option<BlockPosition> {
    let x = tag.get::<_, i32>("TileX").ok()?;
    let y = tag.get::<_, i32>("TileY").ok()?;
    let z = tag.get::<_, i32>("TileZ").ok()?;
    Some(BlockPosition::new(x, y, z))
}

fn put_attachment_offset(tag: &mut NbtCompound, pos: BlockPosition) {
    tag.insert("TileX", NbtTag::Int(pos.x));
    tag.insert("TileY", NbtTag::Int(pos.y));
    tag.insert("TileZ", NbtTag::Int(pos.z));
}
