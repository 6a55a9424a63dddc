//! End-to-end tests for the collection codec and file storage.
//!
//! These tests load documents from disk, edit the tree, write them back and
//! check that the rewritten document keeps its shape.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::tempdir;

use satchel_application::ports::{CollectionStorage, EnvironmentStorage};
use satchel_application::use_cases::{MergeCollections, MergeOptions, ResolveRequest};
use satchel_domain::{
    CollectionElement, Environment, EnvironmentSet, EventType, ItemGroup, ItemKind, Property,
    PropertyList,
};
use satchel_infrastructure::{
    FileCollectionStorage, FileEnvironmentStorage, TokioFileSystem, parse_collection,
    render_collection, validate_document,
};

const WEATHER: &str = r#"{
    "info": {
        "_postman_id": "weather-1",
        "name": "Weather",
        "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
    },
    "item": [
        {
            "name": "Forecast",
            "event": [{"listen": "test", "script": {"exec": ["pm.test('ok');"]}}],
            "item": [
                {
                    "name": "Daily",
                    "request": {
                        "method": "GET",
                        "header": [{"key": "X-Units", "value": "{{units}}"}],
                        "url": "https://{{host}}/forecast/:city/daily?days=5"
                    }
                }
            ]
        },
        {"name": "Archive", "item": []},
        {
            "name": "Report",
            "event": [{"listen": "test", "script": {"exec": "pm.test('report');"}}],
            "request": {
                "method": "POST",
                "url": "https://{{host}}/reports",
                "body": {"mode": "urlencoded", "urlencoded": [
                    {"key": "station", "value": "{{station}}"},
                    {"key": "temp", "value": "21"}
                ]}
            }
        }
    ],
    "event": [{"listen": "test", "script": {"type": "text/javascript", "exec": ["pm.test('root');"]}}],
    "variable": [
        {"key": "host", "value": "weather.test"},
        {"key": "units", "value": "metric"}
    ],
    "auth": {"type": "bearer", "bearer": [{"key": "token", "value": "{{token}}"}]}
}"#;

#[tokio::test]
async fn test_load_edit_save_reload() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("weather.postman_collection.json");
    tokio::fs::write(&path, WEATHER).await.unwrap();

    let storage = FileCollectionStorage::new(TokioFileSystem::new());
    let mut collection = storage.load(&path).await.expect("Failed to load collection");
    assert_eq!(collection.request_count(), 2);

    collection.move_item_by_key("Report", "Archive").unwrap();
    let out = dir.path().join("out").join("weather.json");
    storage.save(&collection, &out).await.expect("Failed to save collection");

    let text = tokio::fs::read_to_string(&out).await.unwrap();
    assert!(text.ends_with('\n'));
    let document: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(document["item"][1]["name"], "Archive");
    assert_eq!(document["item"][1]["item"][0]["name"], "Report");
    assert_eq!(document["item"].as_array().unwrap().len(), 2);

    let reloaded = storage.load(&out).await.unwrap();
    let report = reloaded.get_request("Report").unwrap();
    let archive = reloaded.get_folder("Archive").unwrap();
    assert_eq!(report.parent(), Some(archive.id()));
    assert_eq!(reloaded.postman_id().unwrap().as_str(), "weather-1");
}

#[test]
fn test_rendering_is_stable() {
    let collection = parse_collection(WEATHER).unwrap();
    let first = render_collection(&collection).unwrap();
    let second = render_collection(&parse_collection(&first).unwrap()).unwrap();
    assert_eq!(first, second);

    let report = validate_document(&first);
    assert!(report.is_valid, "issues: {:?}", report.issues);
    assert_eq!(report.schema_version.as_deref(), Some("2.1.0"));
    assert_eq!(report.folder_count, 2);
    assert_eq!(report.request_count, 2);
}

#[test]
fn test_script_chain_follows_the_tree() {
    let collection = parse_collection(WEATHER).unwrap();
    let daily = collection.get_item("Daily", Some(ItemKind::Request)).unwrap();

    let chain = collection.script_chain(daily.id(), EventType::Test).unwrap();
    let sources: Vec<String> = chain.iter().map(|event| event.source_code()).collect();
    assert_eq!(sources, vec!["pm.test('root');", "pm.test('ok');"]);
}

#[tokio::test]
async fn test_resolve_with_environment_files() {
    let dir = tempdir().expect("Failed to create temp directory");
    let storage = FileEnvironmentStorage::new(TokioFileSystem::new());

    let base = Environment::new(
        "base",
        PropertyList::try_from_iter([
            Property::new("token", "base-token"),
            Property::new("station", "EGLL"),
        ])
        .unwrap(),
    );
    let staging = Environment::new(
        "staging",
        PropertyList::try_from_iter([Property::new("host", "staging.weather.test")]).unwrap(),
    )
    .with_parent("base");
    storage.save(&base, &dir.path().join("base.json")).await.unwrap();
    storage.save(&staging, &dir.path().join("staging.json")).await.unwrap();

    let mut environments = EnvironmentSet::new();
    for name in ["base.json", "staging.json"] {
        environments.insert(storage.load(&dir.path().join(name)).await.unwrap());
    }
    let overrides = environments.merged("staging").unwrap();

    let collection = parse_collection(WEATHER).unwrap();
    let resolved = ResolveRequest::with_overrides(overrides)
        .execute(&collection, "Report")
        .unwrap();

    assert_eq!(resolved.url, "https://staging.weather.test/reports");
    assert_eq!(resolved.body.as_deref(), Some("station=EGLL&temp=21"));
    let auth = resolved.auth.unwrap();
    assert_eq!(auth.property("token").unwrap().value(), Some("base-token"));
}

#[test]
fn test_merge_then_render() {
    let mut target = parse_collection(WEATHER).unwrap();
    let other = parse_collection(
        r#"{
            "info": {"name": "Alerts"},
            "item": [{"name": "List alerts", "request": {"method": "GET", "url": "https://{{alerts}}/v1"}}],
            "variable": [{"key": "alerts", "value": "alerts.test"}]
        }"#,
    )
    .unwrap();

    let options = MergeOptions {
        parent_folder: Some("Forecast".to_string()),
        copy_scripts: false,
        copy_variables: true,
    };
    MergeCollections::new(options).execute(&mut target, other).unwrap();

    let document: Value = serde_json::from_str(&render_collection(&target).unwrap()).unwrap();
    let forecast = &document["item"][0];
    assert_eq!(forecast["item"][1]["name"], "Alerts");
    assert_eq!(forecast["item"][1]["item"][0]["name"], "List alerts");
    assert_eq!(
        document["variable"][2],
        json!({"key": "alerts", "value": "alerts.test"})
    );
}
