pub mod activities;
pub mod buildings;
pub mod organizations;
pub mod system_settings;
