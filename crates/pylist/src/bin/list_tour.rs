use std::io::{self, Write};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    pylist::tour::run(&mut out).context("list tour failed")?;
    out.flush().context("failed to flush stdout")?;
    Ok(())
}
