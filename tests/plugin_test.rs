//! Plugin result payloads for each way a run can end.

mod common;

use common::{CopyConverter, FakeHost, FakeResolver, Library};
use heic_converter::plugin::{self, PluginInput, PluginOutput};

fn input(raw: &str) -> PluginInput {
    PluginInput::parse(raw).unwrap()
}

#[tokio::test]
async fn test_scan_mode_output() {
    let lib = Library::new();
    lib.add("photo1.heic");
    lib.add("photo2.heif");
    let host = FakeHost::with_roots(vec![lib.root()]);

    let output = plugin::execute(
        &input(r#"{"args": {"mode": "scan"}}"#),
        host,
        FakeResolver::missing(),
    )
    .await;

    assert_eq!(output, PluginOutput::Output("Found 2 HEIC/HEIF file(s)".to_string()));
    assert!(lib.path("photo1.heic").exists());
}

#[tokio::test]
async fn test_default_mode_converts() {
    let lib = Library::new();
    lib.add("photo1.heic");
    let host = FakeHost::with_roots(vec![lib.root()]);

    let output = plugin::execute(
        &input(r#"{"server_connection": {"Port": 9999}}"#),
        host.clone(),
        FakeResolver::with(CopyConverter::default()),
    )
    .await;

    assert_eq!(
        output.to_json(),
        r#"{"output":"Done: 1 converted, 0 skipped, 0 failed"}"#
    );
    assert!(lib.path("photo1.jpg").exists());
    assert!(!lib.path("photo1.heic").exists());
    assert_eq!(host.scans(), 1);
}

#[tokio::test]
async fn test_unknown_mode_is_reported_as_output() {
    let lib = Library::new();
    lib.add("photo1.heic");
    let host = FakeHost::with_roots(vec![lib.root()]);
    let resolver = FakeResolver::with(CopyConverter::default());

    let output = plugin::execute(
        &input(r#"{"args": {"mode": "purge"}}"#),
        host.clone(),
        resolver.clone(),
    )
    .await;

    assert_eq!(output, PluginOutput::Output("Unknown mode: purge".to_string()));
    assert!(!output.is_error());
    assert_eq!(host.path_queries(), 0);
    assert_eq!(resolver.resolved(), 0);
    assert!(lib.path("photo1.heic").exists());
}

#[tokio::test]
async fn test_missing_imagemagick_is_an_error_payload() {
    let lib = Library::new();
    lib.add("photo1.heic");
    let host = FakeHost::with_roots(vec![lib.root()]);

    let output = plugin::execute(&input("{}"), host, FakeResolver::missing()).await;

    assert!(output.is_error());
    let json: serde_json::Value = serde_json::from_str(&output.to_json()).unwrap();
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("ImageMagick not found"));
    assert!(message.contains("magick, convert"));
    assert!(lib.path("photo1.heic").exists());
}

#[tokio::test]
async fn test_unreachable_host_is_an_error_payload() {
    let host = FakeHost::unreachable("connection refused");

    let output = plugin::execute(&input("{}"), host, FakeResolver::missing()).await;

    assert_eq!(
        output,
        PluginOutput::Error("could not retrieve library paths: connection refused".to_string())
    );
}
