pub mod cli;
pub mod commands;
pub mod db;
pub mod defaults;
pub mod models;
pub mod plan;
pub mod remote;
pub mod state;
pub mod store;
pub mod sync;
pub mod types;
pub mod utils;

pub use types::OutputFmt;
