use machex_domain::config::{ApiConfig, CatalogConfig, DatabaseConfig, SecurityConfig, ServerConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4583);
    assert!(server.ssl.is_none());

    let db = DatabaseConfig::default();
    assert_eq!(db.url, "mem://");
    assert_eq!(db.namespace, "machex");
    assert_eq!(db.database, "core");
    assert!(db.credentials.is_some());

    let security = SecurityConfig::default();
    assert_eq!(security.session_ttl_seconds, 3600);

    let catalog = CatalogConfig::default();
    assert_eq!(catalog.slug_separator, '-');
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "database": { "url": "mem://", "namespace": "n", "database": "d", "credentials": null },
        "catalog": { "slug_separator": "_" }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.database.namespace, "n");
    assert_eq!(cfg.catalog.slug_separator, '_');
}
