pub mod academic;
pub mod completions;
pub mod config;
pub mod history;
pub mod personality;
pub mod results;
pub mod status;

mod render;
mod session;
