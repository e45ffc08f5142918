pub mod config_cmd;
pub mod enhance;
pub mod providers;
