pub mod config;
pub mod dashboard;
pub mod event;
pub mod event_filter;
pub mod export;
pub mod http_client;
pub mod logging;
pub mod pitch_map;
pub mod player_summary;
pub mod provider;
pub mod ranking;
pub mod state;
pub mod statsbomb;
