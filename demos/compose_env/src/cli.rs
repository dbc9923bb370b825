//! Command-line surface of the `compose-env` demo.
use camino::Utf8PathBuf;
use clap::{ArgAction, Args, Parser, Subcommand};

/// Compose layered configuration documents and inspect the result.
#[derive(Debug, Parser)]
#[command(
    name = "compose-env",
    bin_name = "compose-env",
    about = "Compose layered configuration and export it to a child environment",
    version
)]
pub struct CommandLine {
    /// Built-in defaults document, applied first.
    #[arg(long, value_name = "PATH", global = true)]
    pub defaults: Option<Utf8PathBuf>,
    /// Package manifest, blended over the defaults.
    #[arg(long, value_name = "PATH", global = true)]
    pub package: Option<Utf8PathBuf>,
    /// Product override documents, applied in the order given.
    #[arg(
        long = "config",
        short = 'c',
        value_name = "PATH",
        action = ArgAction::Append,
        global = true
    )]
    pub configs: Vec<Utf8PathBuf>,
    /// Profile to apply from the `profiles` table. Without it, `$PROFILE`
    /// or `dev` applies when defined.
    #[arg(long, short = 'p', value_name = "NAME", global = true)]
    pub profile: Option<String>,
    /// `KEY=VALUE` assignments applied last; dotted keys reach nested settings.
    #[arg(
        long = "set",
        short = 's',
        value_name = "KEY=VALUE",
        action = ArgAction::Append,
        global = true
    )]
    pub assignments: Vec<String>,
    /// Selected workflow to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Workflows offered by the demo.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the composed configuration as JSON.
    Show,
    /// Print the child-process environment as `KEY=VALUE` lines.
    Env(EnvArgs),
    /// Expand `${name}` placeholders in each argument.
    Expand(ExpandArgs),
}

/// Options for the `env` command.
#[derive(Debug, Default, Args)]
pub struct EnvArgs {
    /// Omit variables inherited from the current process.
    #[arg(long)]
    pub only_config: bool,
}

/// Options for the `expand` command.
#[derive(Debug, Default, Args)]
pub struct ExpandArgs {
    /// Arguments to expand, usually given after `--`.
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
