//! Scene geometry: mesh objects, their sources, and the two packed groups
//! the renderer draws.
//!
//! The [`Scene`] owns a static **level** group (tile map, loaded models)
//! and a dynamic **actors** group (actor pyramids, plants, props). Each
//! group tracks its own generation so [`Scene::pack_dirty`] only rebuilds
//! what changed.

mod actor;
mod mesh;
mod mesh_concat;
pub mod mesh_gen;
pub mod obj;
mod source;

use std::thread;

pub use actor::{Actor, ActorKind};
use glam::IVec2;
pub use mesh::{
    MeshError, MeshObject, COLOR_COMPONENTS, NORMAL_COMPONENTS,
    POSITION_COMPONENTS,
};
pub use mesh_concat::{pack, PackedBuffer};
pub use mesh_gen::Plant;
pub use obj::ObjError;
use rand::Rng;
pub use source::{MeshSource, StaticMesh};

/// The two independently packed geometry groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneGroup {
    /// Static level geometry, rebuilt only when the level changes.
    Level,
    /// Actors and other moving geometry.
    Actors,
}

/// Handle to an actor in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(usize);

/// Extent of the tile map in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapBounds {
    /// First tile.
    pub origin: IVec2,
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
}

impl Default for MapBounds {
    fn default() -> Self {
        Self {
            origin: IVec2::ZERO,
            width: 1,
            height: 1,
        }
    }
}

/// Freshly packed buffers for the groups that changed.
#[derive(Debug, Default)]
pub struct ScenePacks {
    /// New level buffer, if the level changed.
    pub level: Option<PackedBuffer>,
    /// New actors buffer, if any actor changed.
    pub actors: Option<PackedBuffer>,
}

/// Per-group change tracking.
#[derive(Debug, Clone, Copy)]
struct Generation {
    /// Bumped on any mutation.
    current: u64,
    /// Generation that was last packed.
    packed: u64,
}

impl Generation {
    fn new() -> Self {
        // Start dirty so the first pack uploads even an empty group.
        Self {
            current: 1,
            packed: 0,
        }
    }

    fn invalidate(&mut self) {
        self.current += 1;
    }

    fn is_dirty(self) -> bool {
        self.current != self.packed
    }

    fn mark_packed(&mut self) {
        self.packed = self.current;
    }
}

/// The level and actor groups with change tracking.
pub struct Scene {
    level: Vec<Box<dyn MeshSource>>,
    actors: Vec<Actor>,
    plants: Vec<Plant>,
    props: Vec<Box<dyn MeshSource>>,
    player: Option<ActorId>,
    map: MapBounds,
    level_generation: Generation,
    actors_generation: Generation,
}

impl Scene {
    /// Create an empty scene with a 1x1 map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: Vec::new(),
            actors: Vec::new(),
            plants: Vec::new(),
            props: Vec::new(),
            player: None,
            map: MapBounds::default(),
            level_generation: Generation::new(),
            actors_generation: Generation::new(),
        }
    }

    // -- Level --

    /// Append a static mesh to the level group.
    pub fn add_level_mesh(&mut self, source: impl MeshSource + 'static) {
        self.level.push(Box::new(source));
        self.level_generation.invalidate();
    }

    /// Drop all level meshes (e.g. on a level change).
    pub fn clear_level(&mut self) {
        self.level.clear();
        self.level_generation.invalidate();
    }

    /// Number of sources in the level group.
    #[must_use]
    pub fn level_len(&self) -> usize {
        self.level.len()
    }

    /// Set the tile map extent used by the map-overlook camera.
    pub fn set_map(&mut self, map: MapBounds) {
        self.map = map;
    }

    /// Tile map extent.
    #[must_use]
    pub fn map(&self) -> MapBounds {
        self.map
    }

    // -- Actors --

    /// Add an actor to the dynamic group.
    pub fn add_actor(&mut self, actor: Actor) -> ActorId {
        self.actors.push(actor);
        self.actors_generation.invalidate();
        ActorId(self.actors.len() - 1)
    }

    /// Look up an actor.
    #[must_use]
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.0)
    }

    /// Mutable access to an actor. The actors group is marked dirty.
    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        let actor = self.actors.get_mut(id.0)?;
        self.actors_generation.invalidate();
        Some(actor)
    }

    /// Choose which actor the follow and first-person cameras track.
    pub fn set_player(&mut self, id: ActorId) {
        if self.actors.get(id.0).is_some() {
            self.player = Some(id);
        } else {
            log::warn!("ignoring unknown player actor {id:?}");
        }
    }

    /// The tracked player actor, if any.
    #[must_use]
    pub fn player(&self) -> Option<&Actor> {
        self.player.and_then(|id| self.actor(id))
    }

    /// Add a plant to the dynamic group.
    pub fn add_plant(&mut self, plant: Plant) {
        self.plants.push(plant);
        self.actors_generation.invalidate();
    }

    /// Grow every plant by one part.
    pub fn grow_plants<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut grew = false;
        for plant in &mut self.plants {
            grew |= plant.grow(rng);
        }
        if grew {
            self.actors_generation.invalidate();
        }
    }

    /// Add any other moving mesh (e.g. an axis gizmo) to the dynamic group.
    pub fn add_prop(&mut self, source: impl MeshSource + 'static) {
        self.props.push(Box::new(source));
        self.actors_generation.invalidate();
    }

    // -- Packing --

    /// Whether a group changed since it was last packed.
    #[must_use]
    pub fn is_dirty(&self, group: SceneGroup) -> bool {
        match group {
            SceneGroup::Level => self.level_generation.is_dirty(),
            SceneGroup::Actors => self.actors_generation.is_dirty(),
        }
    }

    /// Force a group to be repacked on the next
    /// [`pack_dirty`](Self::pack_dirty).
    pub fn force_dirty(&mut self, group: SceneGroup) {
        match group {
            SceneGroup::Level => self.level_generation.invalidate(),
            SceneGroup::Actors => self.actors_generation.invalidate(),
        }
    }

    /// Pack one group from its current sources.
    #[must_use]
    pub fn pack_group(&self, group: SceneGroup) -> PackedBuffer {
        match group {
            SceneGroup::Level => pack(&self.level),
            SceneGroup::Actors => {
                let mut sources: Vec<&dyn MeshSource> = Vec::with_capacity(
                    self.actors.len() + self.plants.len() + self.props.len(),
                );
                for actor in &self.actors {
                    sources.push(actor);
                }
                for plant in &self.plants {
                    sources.push(plant);
                }
                for prop in &self.props {
                    sources.push(prop.as_ref());
                }
                pack(sources)
            }
        }
    }

    /// Repack the groups that changed and mark them clean.
    ///
    /// When both groups changed they are packed concurrently; both are
    /// finished before this returns.
    pub fn pack_dirty(&mut self) -> ScenePacks {
        let level_dirty = self.level_generation.is_dirty();
        let actors_dirty = self.actors_generation.is_dirty();

        let packs = match (level_dirty, actors_dirty) {
            (false, false) => ScenePacks::default(),
            (true, false) => ScenePacks {
                level: Some(self.pack_group(SceneGroup::Level)),
                actors: None,
            },
            (false, true) => ScenePacks {
                level: None,
                actors: Some(self.pack_group(SceneGroup::Actors)),
            },
            (true, true) => {
                let (level, actors) = self.pack_both();
                ScenePacks {
                    level: Some(level),
                    actors: Some(actors),
                }
            }
        };

        self.level_generation.mark_packed();
        self.actors_generation.mark_packed();
        packs
    }

    fn pack_both(&self) -> (PackedBuffer, PackedBuffer) {
        thread::scope(|s| {
            let level = thread::Builder::new()
                .name("pack-level".into())
                .spawn_scoped(s, || self.pack_group(SceneGroup::Level));
            let actors = self.pack_group(SceneGroup::Actors);
            let level = match level {
                Ok(handle) => match handle.join() {
                    Ok(level) => level,
                    Err(payload) => std::panic::resume_unwind(payload),
                },
                Err(e) => {
                    log::warn!("packing level inline, spawn failed: {e}");
                    self.pack_group(SceneGroup::Level)
                }
            };
            (level, actors)
        })
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn player() -> Actor {
        Actor::new(ActorKind::Player, IVec2::new(1, 1), Vec3::ONE, 0.25)
    }

    #[test]
    fn new_scene_packs_empty_groups_once() {
        let mut scene = Scene::new();
        let packs = scene.pack_dirty();
        assert!(packs.level.as_ref().is_some_and(PackedBuffer::is_empty));
        assert!(packs.actors.as_ref().is_some_and(PackedBuffer::is_empty));

        let packs = scene.pack_dirty();
        assert!(packs.level.is_none());
        assert!(packs.actors.is_none());
    }

    #[test]
    fn only_changed_group_is_repacked() {
        let mut scene = Scene::new();
        let _ = scene.pack_dirty();

        let id = scene.add_actor(player());
        assert!(!scene.is_dirty(SceneGroup::Level));
        assert!(scene.is_dirty(SceneGroup::Actors));
        let packs = scene.pack_dirty();
        assert!(packs.level.is_none());
        let actors = packs.actors.as_ref().map(PackedBuffer::vertex_count);
        assert_eq!(actors, Some(5));

        if let Some(actor) = scene.actor_mut(id) {
            actor.move_to(IVec2::new(2, 1));
        }
        assert!(scene.is_dirty(SceneGroup::Actors));
    }

    #[test]
    fn both_groups_pack_together() {
        let mut scene = Scene::new();
        scene.add_level_mesh(mesh_gen::tile_block(
            IVec2::ZERO,
            0.25,
            true,
            Vec3::ONE,
        ));
        let _ = scene.add_actor(player());
        scene.add_plant(Plant::new(0.1));
        scene.add_prop(mesh_gen::axis_gizmo(1.0, 2.0, 0.01));

        let packs = scene.pack_dirty();
        let level = packs.level.unwrap();
        let actors = packs.actors.unwrap();
        assert_eq!(level.vertex_count(), 8);
        assert_eq!(actors.vertex_count(), 5 + 4 + 18);
        // Plant indices follow the actor's five vertices.
        assert_eq!(actors.indices[18], 5 + 1);
        assert_eq!(level, scene.pack_group(SceneGroup::Level));
        assert_eq!(actors, scene.pack_group(SceneGroup::Actors));
    }

    #[test]
    fn growing_plants_dirties_actors() {
        let mut scene = Scene::new();
        scene.add_plant(Plant::new(0.1));
        let _ = scene.pack_dirty();
        scene.grow_plants(&mut StdRng::seed_from_u64(3));
        assert!(scene.is_dirty(SceneGroup::Actors));
        assert!(!scene.is_dirty(SceneGroup::Level));
    }

    #[test]
    fn player_must_exist() {
        let mut scene = Scene::new();
        scene.set_player(ActorId(4));
        assert!(scene.player().is_none());
        let id = scene.add_actor(player());
        scene.set_player(id);
        assert_eq!(scene.player().map(Actor::tile), Some(IVec2::new(1, 1)));
    }

    #[test]
    fn force_dirty_repacks() {
        let mut scene = Scene::new();
        let _ = scene.pack_dirty();
        scene.force_dirty(SceneGroup::Level);
        assert!(scene.pack_dirty().level.is_some());
        scene.clear_level();
        assert_eq!(scene.level_len(), 0);
        assert!(scene.is_dirty(SceneGroup::Level));
    }
}
