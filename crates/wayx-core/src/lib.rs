pub mod config;
pub mod logging;

pub mod event;
pub mod extract;
pub mod fetch;
pub mod locale;
pub mod waypoint;
