//! App-wide constants.
//!
//! Centralises property names, metadata keys, environment variable names,
//! and the configuration file extension so a rename only requires changing
//! this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "jsonconfig";

/// Crate version, as reported by `jsonconfig version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compilation target triple (set by `build.rs`).
pub const TARGET: &str = env!("TARGET");

/// Extension a file must carry to be loaded.
pub const CONFIG_EXTENSION: &str = ".json";

/// URI-style prefix marking a local filesystem path.
pub const FILE_SCHEME: &str = "file:";

/// Directory name under the user config dir used as the default area.
pub const CONFIG_DIR: &str = "jsonconfig";

// ── Host property names ─────────────────────────────────────────────

/// Explicit override for the configuration directory.
pub const PROP_CONFIG_DIR: &str = "jsonconfig.dir";

/// General-purpose configuration area of the host.
pub const PROP_CONFIG_AREA: &str = "config.area";

/// Default for [`PROP_CONFIG_AREA`].
pub const PROP_CONFIG_AREA_DEFAULT: &str = "config.area.default";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_CONFIG_DIR: &str = "JSONCONFIG_DIR";
pub const ENV_CONFIG_AREA: &str = "JSONCONFIG_AREA";
pub const ENV_CONFIG_AREA_DEFAULT: &str = "JSONCONFIG_AREA_DEFAULT";

// ── Publication metadata keys ───────────────────────────────────────

/// Stable publication identifier (the filename, extension included).
pub const META_SERVICE_PID: &str = "service.pid";

/// Logical configuration name (the filename without extension).
pub const META_CONFIG_NAME: &str = "config.name";

/// Absolute path of the file the value was parsed from.
pub const META_CONFIG_FILE: &str = "config.file";

/// `typed` or `map`, depending on how the file was parsed.
pub const META_CONFIG_KIND: &str = "config.kind";

/// Interface name under which generic mappings are published.
pub const GENERIC_MAP_INTERFACE: &str = "jsonconfig::ConfigMap";
