//! Terminal logging setup
//!
//! Verbose runs log per-file progress and `[DEBUG]` request lines; silent
//! runs keep warnings and errors only. `RUST_LOG` overrides both.

use env_logger::{Builder, Env};
use log::{Level, LevelFilter};
use std::io::Write;

/// Install the global logger. Safe to call once per process.
pub fn init(verbose: bool) {
  let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

  let mut builder = Builder::new();
  builder
    .filter_level(LevelFilter::Warn)
    .filter_module(env!("CARGO_CRATE_NAME"), level)
    .format(|buf, record| match record.level() {
      Level::Info => writeln!(buf, "{}", record.args()),
      Level::Debug | Level::Trace => writeln!(buf, "[DEBUG] {}", record.args()),
      Level::Warn => writeln!(buf, "⚠️  {}", record.args()),
      Level::Error => writeln!(buf, "❌ {}", record.args()),
    })
    .parse_env(Env::new().filter("RUST_LOG"));

  // A logger installed earlier (tests) wins
  let _ = builder.try_init();
}
