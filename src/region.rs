use crate::bounding_box::BlockBounds;
use crate::error::{Result, TemplateError};
use crate::transform::MapTransform;
use log::debug;
use quartz_nbt::{NbtCompound, NbtTag};
use smol_str::SmolStr;

/// A named, bounded area of a template carrying optional auxiliary
/// data.
///
/// Markers identify what a region is for ("spawn", "waiting_area") and
/// are not required to be unique within a template. The marker and
/// bounds are fixed at construction; only the data can be replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateRegion {
    marker: SmolStr,
    bounds: BlockBounds,
    data: Option<NbtCompound>,
}

impl TemplateRegion {
    pub fn new(marker: impl Into<SmolStr>, bounds: BlockBounds, data: Option<NbtCompound>) -> Self {
        TemplateRegion {
            marker: marker.into(),
            bounds,
            data,
        }
    }

    pub fn marker(&self) -> &str {
        self.marker.as_str()
    }

    pub fn bounds(&self) -> BlockBounds {
        self.bounds
    }

    pub fn data(&self) -> Option<&NbtCompound> {
        self.data.as_ref()
    }

    pub fn set_data(&mut self, data: Option<NbtCompound>) {
        self.data = data;
    }

    pub fn serialize(&self, tag: &mut NbtCompound) {
        tag.insert("marker", self.marker.to_string());
        self.bounds.serialize(tag);
        if let Some(data) = &self.data {
            tag.insert("data", NbtTag::Compound(data.clone()));
        }
    }

    /// Read a region written by [`TemplateRegion::serialize`]. A
    /// missing `data` field decodes as `None`; a present compound, even
    /// an empty one, decodes as `Some`.
    pub fn deserialize(tag: &NbtCompound) -> Result<TemplateRegion> {
        let marker: SmolStr = tag
            .get::<_, &str>("marker")
            .map_err(|e| TemplateError::MalformedRegion(format!("missing marker: {}", e)))?
            .into();

        let data = if tag.contains_key("data") {
            let data = tag
                .get::<_, &NbtCompound>("data")
                .map_err(|e| TemplateError::MalformedRegion(format!("malformed data: {}", e)))?;
            Some(data.clone())
        } else {
            None
        };

        let bounds = BlockBounds::deserialize(tag)?;
        debug!("decoded region '{}' with bounds {:?}", marker, bounds);

        Ok(TemplateRegion {
            marker,
            bounds,
            data,
        })
    }

    /// An independent copy: the data compound is deep-copied when
    /// present, so mutating the copy never aliases the original.
    pub fn copy(&self) -> TemplateRegion {
        TemplateRegion {
            marker: self.marker.clone(),
            bounds: self.bounds,
            data: self.data.clone(),
        }
    }

    /// Same marker and data, bounds mapped through the transform.
    pub fn transformed(&self, transform: &MapTransform) -> TemplateRegion {
        TemplateRegion {
            marker: self.marker.clone(),
            bounds: self.bounds.transformed(transform),
            data: self.data.clone(),
        }
    }
}
