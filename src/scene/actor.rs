use glam::{IVec2, Vec2, Vec3};

use super::mesh::MeshObject;
use super::mesh_gen::actor_pyramid;
use super::source::MeshSource;

/// What an actor is; decides how much of its tile the pyramid fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    /// The player.
    Player,
    /// A level exit.
    Portal,
    /// A hostile creature.
    Monster,
    /// Something to pick up.
    Item,
    /// Anything else.
    Other,
}

impl ActorKind {
    /// Fraction of the tile the actor's base covers.
    #[must_use]
    pub fn scale(self) -> f32 {
        match self {
            Self::Player => 0.9,
            Self::Portal => 0.8,
            Self::Monster => 0.7,
            Self::Item => 0.4,
            Self::Other => 0.2,
        }
    }
}

/// An actor placed on the tile map, with its pyramid mesh kept in sync.
#[derive(Debug, Clone)]
pub struct Actor {
    kind: ActorKind,
    tile: IVec2,
    direction: Vec2,
    alive: bool,
    color: Vec3,
    tile_size: f32,
    mesh: MeshObject,
}

impl Actor {
    /// A living actor on `tile`, facing +y.
    #[must_use]
    pub fn new(
        kind: ActorKind,
        tile: IVec2,
        color: Vec3,
        tile_size: f32,
    ) -> Self {
        let mut actor = Self {
            kind,
            tile,
            direction: Vec2::Y,
            alive: true,
            color,
            tile_size,
            mesh: MeshObject::default(),
        };
        actor.rebuild();
        actor
    }

    /// The actor's kind.
    #[must_use]
    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    /// Current tile.
    #[must_use]
    pub fn tile(&self) -> IVec2 {
        self.tile
    }

    /// 2D facing direction.
    #[must_use]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Whether the actor still has hit points.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Centre of the actor's tile at half a tile above the floor.
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        let half = self.tile_size / 2.0;
        (self.tile.as_vec2() * self.tile_size + half).extend(half)
    }

    /// Move to `tile`, turning to face the direction of travel.
    pub fn move_to(&mut self, tile: IVec2) {
        let step = (tile - self.tile).as_vec2();
        if step != Vec2::ZERO {
            self.direction = step;
        }
        self.tile = tile;
        self.rebuild();
    }

    /// Turn without moving.
    pub fn face(&mut self, direction: Vec2) {
        self.direction = direction;
    }

    /// Kill or revive the actor. Dead actors are drawn flat.
    pub fn set_alive(&mut self, alive: bool) {
        if alive != self.alive {
            self.alive = alive;
            self.rebuild();
        }
    }

    fn rebuild(&mut self) {
        self.mesh = actor_pyramid(
            self.tile,
            self.tile_size,
            self.kind.scale(),
            self.alive,
            self.color,
        );
    }
}

impl MeshSource for Actor {
    fn mesh(&self) -> &MeshObject {
        &self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::mesh_gen::DEAD_ACTOR_HEIGHT;

    fn apex_z(actor: &Actor) -> f32 {
        actor.mesh().positions()[4 * 4 + 2]
    }

    #[test]
    fn world_position_is_tile_centre() {
        let actor =
            Actor::new(ActorKind::Player, IVec2::new(2, 3), Vec3::ONE, 0.25);
        assert_eq!(actor.world_position(), Vec3::new(0.625, 0.875, 0.125));
    }

    #[test]
    fn moving_updates_mesh_and_facing() {
        let mut actor =
            Actor::new(ActorKind::Monster, IVec2::ZERO, Vec3::ONE, 1.0);
        let before = actor.mesh().clone();
        actor.move_to(IVec2::new(-1, 0));
        assert_eq!(actor.direction(), Vec2::new(-1.0, 0.0));
        assert_ne!(actor.mesh(), &before);
        assert!((actor.mesh().positions()[16] - -0.5).abs() < 1e-6);

        actor.move_to(IVec2::new(-1, 0));
        assert_eq!(actor.direction(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn dead_actor_is_flat() {
        let mut actor =
            Actor::new(ActorKind::Item, IVec2::ONE, Vec3::ONE, 0.25);
        assert!(apex_z(&actor) > DEAD_ACTOR_HEIGHT);
        actor.set_alive(false);
        assert!(!actor.is_alive());
        assert_eq!(apex_z(&actor), DEAD_ACTOR_HEIGHT);
    }

    #[test]
    fn kinds_shrink_in_order() {
        let kinds = [
            ActorKind::Player,
            ActorKind::Portal,
            ActorKind::Monster,
            ActorKind::Item,
            ActorKind::Other,
        ];
        assert!(kinds.windows(2).all(|w| w[0].scale() > w[1].scale()));
    }
}
