use map_templates::{
    BlockBounds, BlockPosition, EntitySpawner, LiveEntity, MapEntity, MapTemplate, MapTransform,
    Mirror, Rotation, TemplateRegion, Vec3d,
};
use quartz_nbt::{NbtCompound, NbtList, NbtTag};

// ── Test doubles ─────────────────────────────────────────────────────────────

struct FakeEntity {
    persistable: bool,
    block_pos: BlockPosition,
    attachment: Option<BlockPosition>,
}

impl FakeEntity {
    fn persistable() -> Self {
        FakeEntity {
            persistable: true,
            block_pos: BlockPosition::ORIGIN,
            attachment: None,
        }
    }

    fn player() -> Self {
        FakeEntity {
            persistable: false,
            block_pos: BlockPosition::ORIGIN,
            attachment: None,
        }
    }

    fn hanging(anchor: BlockPosition) -> Self {
        FakeEntity {
            persistable: true,
            block_pos: anchor,
            attachment: Some(anchor),
        }
    }
}

impl LiveEntity for FakeEntity {
    fn save_nbt(&self, tag: &mut NbtCompound) -> bool {
        if !self.persistable {
            return false;
        }
        tag.insert("id", NbtTag::String("minecraft:item_frame".to_string()));
        tag.insert("UUID", NbtTag::IntArray(vec![1, 2, 3, 4]));
        tag.insert("Invulnerable", NbtTag::Byte(0));
        if let Some(attachment) = self.attachment {
            tag.insert("TileX", NbtTag::Int(attachment.x));
            tag.insert("TileY", NbtTag::Int(attachment.y));
            tag.insert("TileZ", NbtTag::Int(attachment.z));
        }
        true
    }

    fn block_pos(&self) -> BlockPosition {
        self.block_pos
    }
}

/// Spawner that records payloads and simulates one passenger per
/// spawned entity when the payload carries a `Passengers` list.
struct RecordingSpawner {
    payloads: Vec<NbtCompound>,
}

impl EntitySpawner for RecordingSpawner {
    type Entity = String;

    fn load_entity_with_passengers(
        &mut self,
        tag: &NbtCompound,
        consumer: &mut dyn FnMut(&Self::Entity),
    ) {
        self.payloads.push(tag.clone());
        let id = tag.get::<_, &str>("id").unwrap_or("unknown").to_string();
        consumer(&id);
        if let Ok(passengers) = tag.get::<_, &NbtList>("Passengers") {
            for passenger in passengers.iter() {
                if let NbtTag::Compound(passenger) = passenger {
                    let id = passenger.get::<_, &str>("id").unwrap_or("unknown").to_string();
                    consumer(&id);
                }
            }
        }
    }
}

fn attachment_of(tag: &NbtCompound) -> Option<BlockPosition> {
    Some(BlockPosition::new(
        tag.get::<_, i32>("TileX").ok()?,
        tag.get::<_, i32>("TileY").ok()?,
        tag.get::<_, i32>("TileZ").ok()?,
    ))
}

fn pos_of(tag: &NbtCompound) -> Vec3d {
    let list = tag.get::<_, &NbtList>("Pos").unwrap();
    Vec3d::new(
        list.get::<f64>(0).unwrap(),
        list.get::<f64>(1).unwrap(),
        list.get::<f64>(2).unwrap(),
    )
}

const EPSILON: f64 = 1e-9;

fn assert_close(a: Vec3d, b: Vec3d) {
    assert!(
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.z - b.z).abs() < EPSILON,
        "expected {:?} to equal {:?}",
        a,
        b
    );
}

// ── Capture and decode ───────────────────────────────────────────────────────

#[test]
fn capture_then_decode_restores_position() {
    for &(x, y, z) in &[
        (5.0, 64.0, 9.0),
        (21.5, 70.25, -3.0),
        (-0.5, -60.0, -17.0),
        (16.0, 0.0, 16.0),
    ] {
        let position = Vec3d::new(x, y, z);
        let captured = MapEntity::from_entity(&FakeEntity::persistable(), position).unwrap();

        let section_min = position.min_section_corner();
        let decoded = MapEntity::from_tag(section_min, captured.tag().clone()).unwrap();
        assert_close(decoded.position(), position);
    }
}

#[test]
fn capture_strips_unique_identity() {
    let captured =
        MapEntity::from_entity(&FakeEntity::persistable(), Vec3d::new(1.0, 2.0, 3.0)).unwrap();
    assert!(!captured.tag().contains_key("UUID"));
    // Entity-specific fields pass through untouched.
    assert!(captured.tag().contains_key("Invulnerable"));
}

#[test]
fn capture_of_player_yields_none() {
    assert!(MapEntity::from_entity(&FakeEntity::player(), Vec3d::ZERO).is_none());
}

// ── Materialize ──────────────────────────────────────────────────────────────

#[test]
fn materialize_is_absolute() {
    // position (5, 64, 9) has section corner (0, 64, 0), local Pos (5, 0, 9)
    let entity =
        MapEntity::from_entity(&FakeEntity::persistable(), Vec3d::new(5.0, 64.0, 9.0)).unwrap();
    assert_close(pos_of(entity.tag()), Vec3d::new(5.0, 0.0, 9.0));

    let spawn = entity
        .create_entity_tag(BlockPosition::new(100, 0, 200))
        .unwrap();
    assert_eq!(pos_of(&spawn), Vec3d::new(105.0, 64.0, 209.0));
}

#[test]
fn materialize_moves_attachment_into_world_frame() {
    let anchor = BlockPosition::new(100, 65, 8);
    let entity = MapEntity::from_entity(
        &FakeEntity::hanging(anchor),
        Vec3d::new(100.0, 65.0, 8.0),
    )
    .unwrap();

    let origin = BlockPosition::new(-50, 10, 30);
    let spawn = entity.create_entity_tag(origin).unwrap();

    // The attachment point must land at anchor + origin, the same
    // translation the position received.
    assert_eq!(attachment_of(&spawn), Some(anchor + origin));
    assert_close(pos_of(&spawn), Vec3d::new(50.0, 75.0, 38.0));
}

#[test]
fn materialize_does_not_mutate_stored_entity() {
    let entity =
        MapEntity::from_entity(&FakeEntity::persistable(), Vec3d::new(5.0, 64.0, 9.0)).unwrap();
    let before = entity.tag().clone();
    entity.create_entity_tag(BlockPosition::new(7, 7, 7)).unwrap();
    assert_eq!(entity.tag(), &before);
}

// ── Transform ────────────────────────────────────────────────────────────────

#[test]
fn attachment_co_transforms_with_position() {
    let entity = MapEntity::from_entity(
        &FakeEntity::hanging(BlockPosition::ORIGIN),
        Vec3d::new(0.0, 0.0, 0.0),
    )
    .unwrap();

    let pivot = BlockPosition::new(5, 0, -3);
    let cw90 = MapTransform::rotation_around(pivot, Rotation::Clockwise90);
    let result = entity.transformed(&cw90);

    assert_close(result.position(), cw90.transformed_point(Vec3d::ZERO));

    // Reconstruct the absolute attachment point from the result frame.
    let reconstructed =
        attachment_of(result.tag()).unwrap() + result.position().min_section_corner();
    assert_eq!(reconstructed, cw90.transformed_block(BlockPosition::ORIGIN));
}

#[test]
fn transform_composition_matches_composed_point_map() {
    let t1 = MapTransform::rotation_around(BlockPosition::new(8, 0, 8), Rotation::Clockwise90);
    let t2 = MapTransform::mirror_around(BlockPosition::new(-4, 0, 12), Mirror::LeftRight);

    let position = Vec3d::new(23.0, 64.0, -9.0);
    let entity = MapEntity::from_entity(&FakeEntity::persistable(), position).unwrap();

    let stepwise = entity.transformed(&t1).transformed(&t2);
    let composed = t2.transformed_point(t1.transformed_point(position));
    assert_close(stepwise.position(), composed);

    // The stepwise result still satisfies the section-local encoding.
    let decoded = MapEntity::from_tag(
        stepwise.position().min_section_corner(),
        stepwise.tag().clone(),
    )
    .unwrap();
    assert_close(decoded.position(), stepwise.position());
}

#[test]
fn transform_round_trip_is_identity() {
    let pivot = BlockPosition::new(16, 0, 16);
    let cw90 = MapTransform::rotation_around(pivot, Rotation::Clockwise90);
    let ccw90 = MapTransform::rotation_around(pivot, Rotation::Counterclockwise90);

    let entity = MapEntity::from_entity(
        &FakeEntity::hanging(BlockPosition::new(3, 70, -21)),
        Vec3d::new(3.0, 70.0, -21.0),
    )
    .unwrap();

    let returned = entity.transformed(&cw90).transformed(&ccw90);
    assert_close(returned.position(), entity.position());
    assert_eq!(attachment_of(returned.tag()), attachment_of(entity.tag()));
    assert_close(pos_of(returned.tag()), pos_of(entity.tag()));
}

// ── Regions ──────────────────────────────────────────────────────────────────

#[test]
fn region_round_trip_and_copy_isolation() {
    let mut data = NbtCompound::new();
    data.insert("Waves", NbtTag::Int(3));

    let bounds = BlockBounds::new(BlockPosition::new(-16, 0, -16), BlockPosition::new(15, 90, 15));
    let region = TemplateRegion::new("arena", bounds, Some(data));

    let mut tag = NbtCompound::new();
    region.serialize(&mut tag);
    let decoded = TemplateRegion::deserialize(&tag).unwrap();
    assert_eq!(decoded.marker(), region.marker());
    assert_eq!(decoded.bounds(), region.bounds());
    assert_eq!(decoded.data(), region.data());

    let mut copy = region.copy();
    let mut mutated = copy.data().unwrap().clone();
    mutated.insert("Waves", NbtTag::Int(99));
    copy.set_data(Some(mutated));
    assert_eq!(region.data().unwrap().get::<_, i32>("Waves").unwrap(), 3);
}

// ── Template placement ───────────────────────────────────────────────────────

#[test]
fn place_entities_visits_passengers() {
    let mut tag = NbtCompound::new();
    tag.insert("id", NbtTag::String("minecraft:pig".to_string()));
    tag.insert(
        "Pos",
        NbtTag::List(NbtList::from(vec![
            NbtTag::Double(1.0),
            NbtTag::Double(4.0),
            NbtTag::Double(1.0),
        ])),
    );
    let mut passenger = NbtCompound::new();
    passenger.insert("id", NbtTag::String("minecraft:zombie".to_string()));
    tag.insert(
        "Passengers",
        NbtTag::List(NbtList::from(vec![NbtTag::Compound(passenger)])),
    );

    let mut template = MapTemplate::new();
    template.add_entity(MapEntity::new(Vec3d::new(1.0, 4.0, 1.0), tag));

    let mut spawner = RecordingSpawner { payloads: Vec::new() };
    let mut visited = Vec::new();
    template
        .place_entities(&mut spawner, BlockPosition::new(64, 0, 64), |id| {
            visited.push(id.clone())
        })
        .unwrap();

    assert_eq!(visited, vec!["minecraft:pig", "minecraft:zombie"]);
    assert_eq!(spawner.payloads.len(), 1);
    assert_eq!(pos_of(&spawner.payloads[0]), Vec3d::new(65.0, 4.0, 65.0));
}

#[test]
fn template_transform_keeps_entities_decodable() {
    let mut template = MapTemplate::new();
    for &(x, y, z) in &[(2.5, 64.0, 2.5), (30.0, 70.0, -1.0), (-18.25, 0.0, 47.5)] {
        let entity =
            MapEntity::from_entity(&FakeEntity::persistable(), Vec3d::new(x, y, z)).unwrap();
        template.add_entity(entity);
    }

    let transform =
        MapTransform::rotation_around(BlockPosition::new(16, 0, 16), Rotation::Counterclockwise90);
    let transformed = template.transformed(&transform);

    for (entity, original) in transformed.entities().iter().zip(template.entities()) {
        assert_close(
            entity.position(),
            transform.transformed_point(original.position()),
        );
        let decoded = MapEntity::from_tag(
            entity.position().min_section_corner(),
            entity.tag().clone(),
        )
        .unwrap();
        assert_close(decoded.position(), entity.position());
    }
}
