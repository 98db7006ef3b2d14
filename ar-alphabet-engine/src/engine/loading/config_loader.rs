use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::asset_paths::CONFIG_PATH;

use crate::engine::assets::{ArConfig, AssetRegistry};
use crate::engine::core::app_state::HostState;

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<ArConfig>>,
}

// Start loading the JSON configuration unless the host already supplied one
pub fn start_config_load(
    mut config_loader: ResMut<ConfigLoader>,
    existing: Option<Res<ArConfig>>,
    asset_server: Option<Res<AssetServer>>,
) {
    if existing.is_some() {
        return;
    }
    if let Some(asset_server) = asset_server {
        info!("Loading configuration from {}", CONFIG_PATH);
        config_loader.handle = Some(asset_server.load(CONFIG_PATH));
    }
}

// Resolve the configuration, then move the host into Running
pub fn finish_config_load(
    mut commands: Commands,
    config_loader: Res<ConfigLoader>,
    existing: Option<Res<ArConfig>>,
    asset_server: Option<Res<AssetServer>>,
    configs: Option<Res<Assets<ArConfig>>>,
    mut next_state: ResMut<NextState<HostState>>,
) {
    let resolved = if let Some(config) = existing {
        ArConfig::clone(&config)
    } else {
        match (&config_loader.handle, asset_server, configs) {
            (Some(handle), Some(asset_server), Some(configs)) => {
                if let Some(config) = configs.get(handle) {
                    info!("Configuration loaded from {}", CONFIG_PATH);
                    config.clone()
                } else if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle.id()) {
                    warn!("Configuration failed to load ({}), using defaults", err);
                    ArConfig::default()
                } else {
                    return;
                }
            }
            _ => {
                warn!("No asset server available, using default configuration");
                ArConfig::default()
            }
        }
    };

    let config = match resolved.validate() {
        Ok(()) => resolved,
        Err(err) => {
            warn!("{}, using defaults", err);
            ArConfig::default()
        }
    };

    commands.insert_resource(AssetRegistry::from_config(&config));
    commands.insert_resource(config);
    next_state.set(HostState::Running);
}
