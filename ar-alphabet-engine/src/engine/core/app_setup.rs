// Standard library and external crates
use bevy::asset::{AssetMetaCheck, AssetPlugin};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy_common_assets::json::JsonAssetPlugin;

// Crate engine modules
use crate::engine::assets::ArConfig;
use crate::engine::core::app_state::HostState;
use crate::engine::core::session_systems::{
    dispatch_host_events, drain_host_queue, start_session, tick_lifecycle_timers,
};
use crate::engine::loading::config_loader::{ConfigLoader, finish_config_load, start_config_load};
use crate::engine::session::{HostEvent, HostEventQueue};

// Web RPC and host adapters
use crate::rpc::web_rpc::WebRpcPlugin;

/// Create the headless flashcard app with asset loading and logging.
pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin::default())
        .add_plugins(AssetPlugin {
            meta_check: AssetMetaCheck::Never,
            ..default()
        })
        .add_plugins(StatesPlugin)
        .add_plugins(JsonAssetPlugin::<ArConfig>::new(&["json"]))
        .add_plugins(ArAlphabetPlugin);

    app
}

/// Session wiring: configuration loading, host event dispatch, timers and
/// the control surface.
///
/// Native builds bind a no-op UI and an in-memory scene; replace the
/// `UiBinding`/`SceneBinding` non-send resources after adding the plugin to
/// observe them.
pub struct ArAlphabetPlugin;

impl Plugin for ArAlphabetPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<HostState>()
            .init_resource::<ConfigLoader>()
            .init_resource::<HostEventQueue>()
            .add_event::<HostEvent>()
            .add_plugins(WebRpcPlugin)
            .add_systems(OnEnter(HostState::LoadingConfig), start_config_load)
            .add_systems(
                Update,
                finish_config_load.run_if(in_state(HostState::LoadingConfig)),
            )
            .add_systems(OnEnter(HostState::Running), start_session)
            .add_systems(
                Update,
                (drain_host_queue, dispatch_host_events, tick_lifecycle_timers)
                    .chain()
                    .run_if(in_state(HostState::Running)),
            );

        #[cfg(not(target_arch = "wasm32"))]
        {
            use crate::engine::core::session_systems::{SceneBinding, UiBinding};
            use crate::engine::scene::RecordingScene;
            use crate::ui::NullUi;

            app.insert_non_send_resource(UiBinding(Box::new(NullUi)))
                .insert_non_send_resource(SceneBinding(Box::new(RecordingScene::new())));
        }

        #[cfg(target_arch = "wasm32")]
        {
            use crate::web::{
                attach_scene_listeners, install_console_bridge, install_dom_bindings,
                request_camera_access,
            };

            app.add_systems(Startup, (install_dom_bindings, install_console_bridge))
                .add_systems(
                    OnEnter(HostState::Running),
                    (attach_scene_listeners, request_camera_access).after(start_session),
                );
        }
    }
}
