//! jsonconfig: JSON configuration directory loader (library crate).
//!
//! Scans a configuration directory for `*.json` files, parses each one into
//! a registered typed schema or a generic ordered mapping, and publishes it
//! to a host-provided [`registry::ServiceRegistry`] under its filename.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use jsonconfig::config::ConfigLoader;
//! use jsonconfig::properties::HostProperties;
//! use jsonconfig::registry::InMemoryRegistry;
//! use jsonconfig::schema::SchemaRegistry;
//!
//! # fn main() -> Result<(), jsonconfig::config::ConfigError> {
//! let props = HostProperties::from_env().with("jsonconfig.dir", "/etc/myapp/conf.d");
//! let registry = Arc::new(InMemoryRegistry::new());
//! let loader = ConfigLoader::start(&props, SchemaRegistry::new(), registry.clone())?;
//!
//! if let Some(db) = registry.get("db.json") {
//!     println!("{}", db.value.to_json());
//! }
//! loader.stop();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod env;
pub mod logging;
pub mod models;
pub mod output;
pub mod properties;
pub mod registry;
pub mod schema;
