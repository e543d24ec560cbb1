// olumbe-terminal - The olumbe portfolio as a terminal app
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::Context as _;
use clap::Parser;
use olumbe_terminal::Cli;
use olumbe_terminal::error::AppError;
use std::fs::{File, OpenOptions};
use std::path::Path;

#[allow(clippy::exit)]
fn main() {
    let Err(err) = run() else { return };
    let code = match err.chain().find_map(|cause| cause.downcast_ref::<AppError>()) {
        Some(app_error) => {
            eprintln!("olumbe: {}", app_error.user_message());
            app_error.exit_code()
        }
        None => 1,
    };
    eprintln!("olumbe: {err:#}");
    std::process::exit(code);
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    // Everything lives on one thread: the chat transport spawns with `spawn_local`.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the tokio runtime")?;
    let local_set = tokio::task::LocalSet::new();

    rt.block_on(local_set.run_until(async move {
        let mut app = olumbe_terminal::app::create_app(&cli)?;
        olumbe_terminal::app::run_tui(&mut app).await
    }))
}

/// File logging only: the TUI owns stdout and stderr.
fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = cli.log_file.as_deref() else {
        if std::env::var_os("RUST_LOG").is_some() {
            eprintln!("olumbe: RUST_LOG has no effect without --log-file <PATH>");
        }
        return Ok(());
    };

    let directives = cli.log_directives();
    let filter = tracing_subscriber::EnvFilter::try_new(&directives)
        .with_context(|| format!("invalid --log-filter / RUST_LOG `{directives}`"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(open_log_file(path, cli.log_append)?)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install the log subscriber: {e}"))?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        start = ?cli.start,
        filter = %directives,
        "olumbe started"
    );
    Ok(())
}

fn open_log_file(path: &Path, append: bool) -> anyhow::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))
}
