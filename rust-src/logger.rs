//! Logger initialization.

use std::io::Write;

use anyhow::{Context, Result};
use log::LevelFilter;


/// Initialize `env_logger`.
///
/// `RUST_LOG` is honoured and defaults to `warn`. `verbose` turns on debug
/// output for this crate regardless of `RUST_LOG`.
pub fn init_logger(verbose: bool) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);

    if verbose {
        builder.filter_module(env!("CARGO_CRATE_NAME"), LevelFilter::Debug);
    }

    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{} {}] {}",
            record.level(),
            record.target(),
            record.args()
        )
    });

    builder.try_init().context("Failed to initialize logger")?;
    Ok(())
}
