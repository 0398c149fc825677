use bevy::prelude::*;
use bevy_asset_loader::prelude::*;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Default, States)]
pub enum AssetState {
    #[default]
    Loading,
    Loaded,
    Failed,
}

#[derive(AssetCollection, Resource)]
pub struct GameAssets {
    #[asset(path = "spritesheets/knight.png")]
    pub knight: Handle<Image>,
    #[asset(texture_atlas_layout(tile_size_x = 32, tile_size_y = 32, columns = 8, rows = 8))]
    pub knight_layout: Handle<TextureAtlasLayout>,
    #[asset(path = "spritesheets/coin.png")]
    pub coin: Handle<Image>,
    #[asset(texture_atlas_layout(tile_size_x = 16, tile_size_y = 16, columns = 12, rows = 1))]
    pub coin_layout: Handle<TextureAtlasLayout>,
    #[asset(path = "images/bomb.png")]
    pub bomb: Handle<Image>,
}

/// Loads every collection up front; other plugins add theirs with
/// `configure_loading_state`.
pub struct AssetsPlugin;

impl Plugin for AssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AssetState>()
            .add_loading_state(
                LoadingState::new(AssetState::Loading)
                    .continue_to_state(AssetState::Loaded)
                    .on_failure_continue_to_state(AssetState::Failed)
                    .load_collection::<GameAssets>(),
            )
            .add_systems(OnEnter(AssetState::Loaded), || info!("Assets loaded"))
            .add_systems(OnEnter(AssetState::Failed), exit_on_failure);
    }
}

// Every scene needs the sprites and sounds, so there is nothing to fall back to
fn exit_on_failure(mut exit: EventWriter<AppExit>) {
    error!("Failed to load game assets, check the assets directory");
    exit.send(AppExit::error());
}
