use bevy::prelude::*;

/// Despawns every entity carrying the marker `T`, children included.
///
/// Meant to be registered on `OnExit` of the state that spawned the entities.
pub fn despawn_marked<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
