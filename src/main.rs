mod commands;
mod core;
mod github;
mod release;
mod ui;
mod utils;

use clap::{CommandFactory, Parser, Subcommand};
use crate::core::config::PublishSettings;
use crate::core::error::{PublishError, ResultExt, print_error};

/// Publish staged prebuilt binaries to the matching GitHub release
#[derive(Parser)]
#[command(name = "prebuild-publish")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Publish the contents of ./build/stage/{tag} to the current version's GitHub release
  Publish {
    /// Publish immediately, do not create a draft release
    #[arg(short, long)]
    release: bool,
    /// Turn per-file messages off
    #[arg(short, long)]
    silent: bool,
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
  let cli = Cli::parse();

  // No subcommand: usage only
  let Some(command) = cli.command else {
    if let Err(e) = Cli::command().print_help() {
      eprintln!("Error: Failed to print help: {}", e);
      std::process::exit(1);
    }
    println!();
    return;
  };

  let result = match command {
    Commands::Publish { release, silent } => {
      let verbose = !silent;
      ui::logging::init(verbose);

      std::env::current_dir()
        .context("Failed to get current directory")
        .and_then(|root| commands::run_publish(PublishSettings::from_env(root, !release, verbose)))
    }
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: PublishError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
