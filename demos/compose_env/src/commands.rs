//! Execution of `compose-env` workflows.
//!
//! Each command writes to a caller-supplied writer so tests can capture the
//! output; `main` passes a locked standard output.
use std::io::Write;

use blend_config::compose::{ComposedConfig, ComposerBuilder};
use blend_config::{Context, build_env_over, load_document};
use serde_json::Value;
use tracing::debug;

use crate::cli::{CommandLine, Commands, EnvArgs, ExpandArgs};
use crate::error::{ComposeEnvError, Result};

/// Profile tried when neither `--profile` nor `$PROFILE` names one.
const DEFAULT_PROFILE: &str = "dev";

/// Compose the configuration described by the global options.
///
/// # Errors
///
/// Returns [`ComposeEnvError::MissingDefaults`] when `--defaults` names an
/// absent file, or [`ComposeEnvError::Configuration`] when any document,
/// assignment, or profile cannot be applied.
pub fn compose(cli: &CommandLine) -> Result<ComposedConfig> {
    let mut builder = ComposerBuilder::new()
        .default_profile(DEFAULT_PROFILE)
        .candidates(&cli.configs)
        .flags(cli.assignments.iter().cloned());
    if let Some(path) = &cli.defaults {
        let defaults = load_document(path.as_std_path())?
            .ok_or_else(|| ComposeEnvError::MissingDefaults(path.clone()))?;
        builder = builder.defaults(Value::Object(defaults));
    }
    if let Some(path) = &cli.package {
        builder = builder.package_manifest(path);
    }
    if let Some(name) = &cli.profile {
        builder = builder.profile(name.clone());
    }
    let config = builder.compose()?;
    debug!(
        layers = config.applied().len(),
        profile = config.profile(),
        "configuration composed"
    );
    Ok(config)
}

/// Compose the configuration and run the selected command.
///
/// # Errors
///
/// Propagates composition failures and write errors on `out`.
pub fn run<W: Write>(cli: &CommandLine, out: &mut W) -> Result<()> {
    let config = compose(cli)?;
    match &cli.command {
        Commands::Show => show(&config, out),
        Commands::Env(args) => env(&config, args, out),
        Commands::Expand(args) => expand(&config, args, out),
    }
}

fn show<W: Write>(config: &ComposedConfig, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, config.as_map())?;
    writeln!(out)?;
    Ok(())
}

/// Values are expanded against the composed settings themselves, so one
/// setting can reference another.
fn env<W: Write>(config: &ComposedConfig, args: &EnvArgs, out: &mut W) -> Result<()> {
    let vars = if args.only_config {
        build_env_over(config.as_map(), config.as_map(), std::iter::empty::<(String, String)>())
    } else {
        config.env(config.as_map())
    };
    for (key, value) in vars {
        writeln!(out, "{key}={value}")?;
    }
    Ok(())
}

/// Placeholders resolve against the composed settings first, then the
/// process environment.
fn expand<W: Write>(config: &ComposedConfig, args: &ExpandArgs, out: &mut W) -> Result<()> {
    let process: Context = std::env::vars()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    for arg in config.expand_args(&args.args, &[&process]) {
        writeln!(out, "{arg}")?;
    }
    Ok(())
}
