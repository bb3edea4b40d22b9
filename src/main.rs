mod commands;
mod core;
mod manifest;
mod provision;
mod release;
mod relocate;
mod ui;
mod version;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use core::error::{ExitCode, RelverError, print_error};
use std::path::PathBuf;

/// Keep one version record and every manifest that depends on it in sync
#[derive(Parser)]
#[command(name = "relver")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Bump the version, stamp the build and sync dependent manifests
  Release {
    /// Bump kind: major, minor or patch
    #[arg(default_value = "patch")]
    kind: String,
    /// Show what would change without writing anything
    #[arg(long)]
    dry_run: bool,
  },

  /// Copy the version record next to a built binary
  CopyVersion {
    /// Version record to copy (default: the project's record)
    #[arg(long)]
    source: Option<PathBuf>,
    /// Binary the record belongs to; the record goes into its directory
    #[arg(long)]
    binary: Option<PathBuf>,
    /// Directory to copy the record into
    #[arg(long)]
    out_dir: Option<PathBuf>,
  },

  /// Download the prebuilt binary for this platform (run by install hooks)
  #[command(hide = true)]
  Postinstall {
    /// Install root holding the version record (default: current directory)
    #[arg(long)]
    root: Option<PathBuf>,
    /// Platform identifier (default: the running OS)
    #[arg(long)]
    platform: Option<String>,
  },

  /// Print the version this installation reports
  Show {
    /// Output the record in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(err) => {
      let code = match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => ExitCode::Failure.as_i32(),
      };
      // Printing only fails on a closed stdout/stderr
      let _ = err.print();
      std::process::exit(code);
    }
  };

  let result = match cli.command {
    Commands::Release { kind, dry_run } => commands::run_release(kind, dry_run),
    Commands::CopyVersion {
      source,
      binary,
      out_dir,
    } => commands::run_copy_version(source, binary, out_dir),
    Commands::Postinstall { root, platform } => commands::run_postinstall(root, platform),
    Commands::Show { json } => commands::run_show(json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: RelverError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
