//! Document loading tests.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, ensure};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tempfile::TempDir;

use super::load_document;
use crate::BlendError;

#[fixture]
fn dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("create temporary directory: {err}"),
    }
}

fn write(dir: &TempDir, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).with_context(|| format!("write {name}"))?;
    Ok(path)
}

#[rstest]
fn missing_documents_are_skipped(dir: TempDir) -> Result<()> {
    let loaded = load_document(&dir.path().join("absent.json"))
        .map_err(|err| anyhow!("unexpected error: {err}"))?;
    ensure!(loaded.is_none(), "absent file should yield None");
    Ok(())
}

#[rstest]
fn json_documents_keep_key_order(dir: TempDir) -> Result<()> {
    let path = write(&dir, "product.json", r#"{"zeta": 1, "+tags": ["a"], "alpha": {"b": 2}}"#)?;
    let doc = load_document(&path)
        .map_err(|err| anyhow!("load failed: {err}"))?
        .context("document should exist")?;
    let keys: Vec<_> = doc.keys().map(String::as_str).collect();
    ensure!(keys == ["zeta", "+tags", "alpha"], "unexpected key order {keys:?}");
    Ok(())
}

#[rstest]
fn toml_documents_keep_directive_keys(dir: TempDir) -> Result<()> {
    let path = write(
        &dir,
        "defaults.toml",
        "name = \"svc\"\n\"+tags\" = [\"x\"]\n\n[db]\nport = 5432\n",
    )?;
    let doc = load_document(&path)
        .map_err(|err| anyhow!("load failed: {err}"))?
        .context("document should exist")?;
    ensure!(
        Value::Object(doc.clone()) == json!({"name": "svc", "+tags": ["x"], "db": {"port": 5432}}),
        "unexpected document {doc:?}"
    );
    Ok(())
}

#[rstest]
#[case::json("broken.json", "{\"port\": ")]
#[case::toml("broken.toml", "port = ???")]
#[case::scalar_root("scalar.json", "42")]
#[case::sequence_root("list.json", "[1, 2]")]
fn malformed_documents_are_file_errors(
    dir: TempDir,
    #[case] name: &str,
    #[case] contents: &str,
) -> Result<()> {
    let path = write(&dir, name, contents)?;
    let Err(err) = load_document(&path) else {
        return Err(anyhow!("expected {name} to fail"));
    };
    match err.as_ref() {
        BlendError::File { path: reported, .. } => {
            ensure!(reported == &path, "error should name {}", path.display());
        }
        other => return Err(anyhow!("expected a file error, got {other:?}")),
    }
    Ok(())
}
