//! Integration tests for a host embedding the loader: properties files,
//! environment fallbacks, several schemas, and reloads.

use std::path::Path;
use std::sync::Arc;

use jsonconfig::config::ConfigLoader;
use jsonconfig::env::Env;
use jsonconfig::models::ConfigKind;
use jsonconfig::properties::HostProperties;
use jsonconfig::registry::InMemoryRegistry;
use jsonconfig::schema::{SchemaRegistry, TypedSchema};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Database {
    host: String,
    port: u16,
    #[serde(default)]
    pool_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct Features {
    enabled: Vec<String>,
}

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

fn schemas() -> SchemaRegistry {
    let mut schemas = SchemaRegistry::new();
    schemas.register::<Database>("db");
    schemas.register_schema(Box::new(TypedSchema::<Features>::with_interface(
        "features",
        "app.Features",
    )));
    schemas
}

#[test]
fn properties_file_points_at_configuration_area() {
    let root = tempfile::tempdir().unwrap();
    let conf = root.path().join("area");
    std::fs::create_dir(&conf).unwrap();
    write(&conf, "db.json", r#"{"host": "db.internal", "port": 5432, "pool_size": 8}"#);
    write(&conf, "features.json", r#"{"enabled": ["search", "export"]}"#);
    write(&conf, "extra.json", r#"{"anything": [1, 2, 3]}"#);

    let props_path = root.path().join("host.toml");
    std::fs::write(
        &props_path,
        format!("[config]\narea = \"file:{}\"\n", conf.display()),
    )
    .unwrap();

    let mut props = HostProperties::new(Env::empty());
    props.load_file(&props_path).unwrap();

    let registry = Arc::new(InMemoryRegistry::new());
    let loader = ConfigLoader::start(&props, schemas(), registry.clone()).unwrap();

    assert_eq!(loader.directory().path(), conf.as_path());
    assert_eq!(registry.keys(), vec!["db.json", "extra.json", "features.json"]);

    let db = registry.get("db.json").unwrap().value.downcast::<Database>().unwrap();
    assert_eq!(db.host, "db.internal");
    assert_eq!(db.port, 5432);
    assert_eq!(db.pool_size, Some(8));

    let features = registry.find_by_interface("app.Features");
    assert_eq!(features.len(), 1);
    let features = features[0].value.downcast::<Features>().unwrap();
    assert_eq!(features.enabled, vec!["search", "export"]);

    assert_eq!(registry.get("extra.json").unwrap().value.kind(), ConfigKind::Map);
    assert_eq!(loader.stop(), 3);
    assert!(registry.is_empty());
}

#[test]
fn environment_default_area_is_used_last() {
    let root = tempfile::tempdir().unwrap();
    write(root.path(), "db.json", r#"{"host": "h", "port": 1}"#);

    let env = Env::from_vars([("JSONCONFIG_AREA_DEFAULT", root.path().display().to_string())]);
    let props = HostProperties::new(env);

    let registry = Arc::new(InMemoryRegistry::new());
    let loader = ConfigLoader::start(&props, schemas(), registry.clone()).unwrap();

    assert_eq!(loader.directory().property(), Some("config.area.default"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn reload_swaps_values_without_a_gap() {
    let root = tempfile::tempdir().unwrap();
    write(root.path(), "db.json", r#"{"host": "old", "port": 1}"#);
    write(root.path(), "legacy.json", "{}");

    let props = HostProperties::isolated().with("jsonconfig.dir", root.path().display().to_string());
    let registry = Arc::new(InMemoryRegistry::new());
    let mut loader = ConfigLoader::start(&props, schemas(), registry.clone()).unwrap();
    let old_handle = loader.entry("db.json").unwrap().handle.clone();

    write(root.path(), "db.json", r#"{"host": "new", "port": 2}"#);
    std::fs::remove_file(root.path().join("legacy.json")).unwrap();
    let report = loader.reload();

    assert_eq!(report.loaded, vec!["db.json"]);
    assert_eq!(report.removed, vec!["legacy.json"]);

    let db = registry.get("db.json").unwrap();
    assert_ne!(db.handle, old_handle);
    assert_eq!(db.value.downcast::<Database>().unwrap().host, "new");
    assert_eq!(registry.keys(), vec!["db.json"]);
}

#[test]
fn typed_mismatch_still_publishes_a_map() {
    let root = tempfile::tempdir().unwrap();
    write(root.path(), "db.json", r#"{"host": "h", "port": "not a number"}"#);

    let props = HostProperties::isolated().with("jsonconfig.dir", root.path().display().to_string());
    let registry = Arc::new(InMemoryRegistry::new());
    let mut loader = ConfigLoader::new(
        jsonconfig::config::ConfigDirectory::resolve(&props).unwrap(),
        schemas(),
        registry.clone(),
    );
    let report = loader.load();

    assert_eq!(report.fallbacks, vec!["db.json"]);
    let db = registry.get("db.json").unwrap();
    assert_eq!(db.value.kind(), ConfigKind::Map);
    assert_eq!(db.interface, jsonconfig::constants::GENERIC_MAP_INTERFACE);
    assert_eq!(db.value.as_map().unwrap()["port"], "not a number");
}
