//! Loaded configuration entries.

use std::path::{Path, PathBuf};

use crate::constants;
use crate::models::{ConfigKind, ConfigValue, ServiceProperties};
use crate::registry::ServiceHandle;

/// One published configuration file.
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    /// Filename, extension included; also the publication key.
    pub name: String,
    /// Absolute path of the source file.
    pub source_file: PathBuf,
    pub value: ConfigValue,
    /// Handle needed to unpublish the value.
    pub handle: ServiceHandle,
}

impl ConfigEntry {
    /// Logical configuration name (filename without `.json`).
    pub fn type_key(&self) -> &str {
        type_key(&self.name)
    }

    pub fn kind(&self) -> ConfigKind {
        self.value.kind()
    }
}

/// Strip the configuration extension from a filename.
pub fn type_key(name: &str) -> &str {
    name.strip_suffix(constants::CONFIG_EXTENSION).unwrap_or(name)
}

/// Metadata published alongside a configuration value.
pub fn publication_properties(name: &str, source_file: &Path, kind: ConfigKind) -> ServiceProperties {
    let mut properties = ServiceProperties::new();
    properties.insert(constants::META_SERVICE_PID.to_string(), name.to_string());
    properties.insert(constants::META_CONFIG_NAME.to_string(), type_key(name).to_string());
    properties.insert(
        constants::META_CONFIG_FILE.to_string(),
        source_file.display().to_string(),
    );
    properties.insert(constants::META_CONFIG_KIND.to_string(), kind.to_string());
    properties
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_key_strips_extension_once() {
        assert_eq!(type_key("db.json"), "db");
        assert_eq!(type_key("a.b.json"), "a.b");
        assert_eq!(type_key("x.json.json"), "x.json");
        assert_eq!(type_key("noext"), "noext");
    }

    #[test]
    fn properties_describe_the_publication() {
        let props = publication_properties("db.json", Path::new("/etc/app/db.json"), ConfigKind::Map);
        let pairs: Vec<_> = props.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                ("service.pid", "db.json"),
                ("config.name", "db"),
                ("config.file", "/etc/app/db.json"),
                ("config.kind", "map"),
            ]
        );
    }
}
