//! Child-process environments built over the real process environment.

use anyhow::{Result, anyhow, ensure};
use blend_config::compose::LayerComposer;
use blend_config::{Context, build_env};
use rstest::rstest;
use serde_json::{Map, Value, json};
use serial_test::serial;
use test_helpers::env;

fn mapping(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a mapping, got {other}"),
    }
}

#[rstest]
#[serial]
fn flattened_settings_override_inherited_variables() {
    let _scope = env::scope([
        ("BLEND_IT_HOME", Some("/home/ci")),
        ("BLEND_IT_KEEP", Some("inherited")),
    ]);
    let settings = mapping(json!({"blend_it": {"home": "/srv/app"}}));

    let child = build_env(&settings, &Context::new());

    assert_eq!(child.get("BLEND_IT_HOME").map(String::as_str), Some("/srv/app"));
    assert_eq!(child.get("BLEND_IT_KEEP").map(String::as_str), Some("inherited"));
}

#[rstest]
#[serial]
fn process_environment_is_not_modified() {
    let _gone = env::remove_var("BLEND_IT_ONLY_CHILD");
    let settings = mapping(json!({"blend_it_only_child": 1}));

    let child = build_env(&settings, &Context::new());

    assert_eq!(child.get("BLEND_IT_ONLY_CHILD").map(String::as_str), Some("1"));
    assert!(std::env::var_os("BLEND_IT_ONLY_CHILD").is_none());
}

#[rstest]
#[serial]
fn composed_config_expands_against_context() -> Result<()> {
    let _region = env::set_var("BLEND_IT_REGION", "eu-west-1");
    let mut composer = LayerComposer::new();
    composer.push_defaults(json!({
        "bucket": {"url": "s3://${region}/${name}"},
        "name": "assets",
        "profiles": {"dev": {"name": "dev-assets"}}
    }));
    let config = composer
        .with_profile("dev")
        .compose()
        .map_err(|err| anyhow!("compose failed: {err}"))?;

    let mut context = Context::new();
    context.insert("region".into(), json!("eu-west-1"));
    context.insert("name".into(), json!("from-context"));
    let child = config.env(&context);

    ensure!(
        child.get("BUCKET_URL").map(String::as_str) == Some("s3://eu-west-1/from-context"),
        "unexpected BUCKET_URL {:?}",
        child.get("BUCKET_URL")
    );
    ensure!(child.get("NAME").map(String::as_str) == Some("dev-assets"));
    ensure!(child.get("PROFILE").map(String::as_str) == Some("dev"));
    ensure!(child.get("BLEND_IT_REGION").map(String::as_str) == Some("eu-west-1"));
    ensure!(
        !child.keys().any(|key| key.starts_with("PROFILES")),
        "profiles must not be flattened"
    );
    Ok(())
}
