//! Shared integration-test server bootstrap helpers.

use axum_test::TestServer;
use coursefinder_server::{create_app, AppState, Catalog, Config};
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

pub(crate) fn test_config_for_catalog_path(catalog_path: &Path) -> Config {
    Config {
        port: 0,
        catalog_path: catalog_path.to_str().expect("catalog path").to_string(),
        page_size: 9,
        search_debounce: Duration::from_millis(300),
    }
}

pub(crate) fn fixture_catalog_json() -> serde_json::Value {
    json!([
        {
            "slug": "react-fundamentals",
            "title": "React Fundamentals",
            "description": "Components, props and hooks.",
            "tags": ["frontend"],
            "category": "Web Development",
            "level": "Beginner",
            "type": "Recorded",
            "priceType": "Free"
        },
        {
            "slug": "data-analysis",
            "title": "Python for Data Analysis",
            "tags": ["python"],
            "category": "Data Science",
            "level": "Intermediate",
            "type": "Live",
            "priceType": "Paid"
        },
        {
            "slug": "security-career",
            "title": "Security Analyst Path",
            "category": "Cybersecurity",
            "level": "Beginner",
            "type": "Career Path",
            "priceType": "Paid"
        }
    ])
}

pub(crate) fn test_server_for_config(config: Config) -> TestServer {
    let catalog = Catalog::load(&config.catalog_path).expect("load catalog");
    let state = AppState::new(config, catalog);
    let app = create_app(state, false);
    TestServer::new(app).expect("server")
}

pub(crate) fn setup_test_server() -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let catalog_path = temp_dir.path().join("catalog.json");
    std::fs::write(&catalog_path, fixture_catalog_json().to_string()).expect("write catalog");
    let config = test_config_for_catalog_path(&catalog_path);
    (test_server_for_config(config), temp_dir)
}
