//! Project configuration.

mod loader;
mod schema;

pub use loader::load_config;
pub use schema::Config;
