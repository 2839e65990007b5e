//! Data layer — populates the static registries at startup.
//!
//! This plugin runs in OnEnter(GameState::Loading), fills the
//! ResourceRegistry and ShopCatalog from the hard-coded game-design data in
//! the submodules, requests the initial snapshot load, then transitions into
//! GameState::Playing.
//!
//! No other domain needs to seed these resources. All domain plugins can
//! safely read them once GameState has advanced past Loading.

mod resources;
mod shops;

use bevy::prelude::*;

use crate::shared::*;

pub use resources::populate_resources;
pub use shops::populate_shop;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

/// Single system that populates every registry, queues the initial load,
/// and transitions to Playing.
fn load_all_data(
    mut registry: ResMut<ResourceRegistry>,
    mut catalog: ResMut<ShopCatalog>,
    mut load_writer: EventWriter<LoadRequestEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("DataPlugin: populating registries…");

    populate_resources(&mut registry);
    info!("  Resource definitions loaded: {}", registry.len());

    populate_shop(&mut catalog);
    info!("  Shop items loaded: {}", catalog.len());

    // Pick up where the last session left off (or start fresh if there is
    // no save file yet).
    load_writer.send(LoadRequestEvent);

    info!("DataPlugin: registries populated. Entering Playing.");
    next_state.set(GameState::Playing);
}
