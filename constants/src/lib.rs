pub mod alphabet;
pub mod asset_paths;
pub mod dom;
pub mod loading;
pub mod model;
