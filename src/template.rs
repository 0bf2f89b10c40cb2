use crate::block_position::BlockPosition;
use crate::bounding_box::BlockBounds;
use crate::entity::{EntitySpawner, MapEntity};
use crate::error::Result;
use crate::region::TemplateRegion;
use crate::transform::MapTransform;
use quartz_nbt::NbtCompound;

/// A captured map template: the entities and marked regions of one
/// area of a world, ready to be transformed and placed elsewhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapTemplate {
    entities: Vec<MapEntity>,
    regions: Vec<TemplateRegion>,
    bounds: Option<BlockBounds>,
}

impl MapTemplate {
    pub fn new() -> Self {
        MapTemplate::default()
    }

    pub fn add_entity(&mut self, entity: MapEntity) {
        self.entities.push(entity);
    }

    pub fn entities(&self) -> &[MapEntity] {
        &self.entities
    }

    pub fn add_region(
        &mut self,
        marker: impl Into<smol_str::SmolStr>,
        bounds: BlockBounds,
        data: Option<NbtCompound>,
    ) {
        self.regions.push(TemplateRegion::new(marker, bounds, data));
    }

    pub fn regions(&self) -> &[TemplateRegion] {
        &self.regions
    }

    /// All regions carrying the given marker; markers are not unique.
    pub fn regions_matching<'a>(
        &'a self,
        marker: &'a str,
    ) -> impl Iterator<Item = &'a TemplateRegion> + 'a {
        self.regions.iter().filter(move |r| r.marker() == marker)
    }

    pub fn set_bounds(&mut self, bounds: BlockBounds) {
        self.bounds = Some(bounds);
    }

    pub fn bounds(&self) -> Option<BlockBounds> {
        self.bounds
    }

    /// Apply a rotation/mirror to the whole template.
    pub fn transformed(&self, transform: &MapTransform) -> MapTemplate {
        MapTemplate {
            entities: self
                .entities
                .iter()
                .map(|entity| entity.transformed(transform))
                .collect(),
            regions: self
                .regions
                .iter()
                .map(|region| region.transformed(transform))
                .collect(),
            bounds: self.bounds.map(|bounds| bounds.transformed(transform)),
        }
    }

    /// Construct every stored entity in a world at the given placement
    /// origin. A failure to decode one entity skips the rest, so
    /// callers that want best-effort placement should store only
    /// capture-produced entities, which always decode.
    pub fn place_entities<S, F>(
        &self,
        world: &mut S,
        origin: BlockPosition,
        mut consumer: F,
    ) -> Result<()>
    where
        S: EntitySpawner,
        F: FnMut(&S::Entity),
    {
        for entity in &self.entities {
            entity.create_entities(world, origin, &mut consumer)?;
        }
        Ok(())
    }
}
