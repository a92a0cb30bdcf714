mod app;
mod cli;
mod command;
mod config;
mod consts;
mod engine;
mod logging;
mod scores;
mod server;
mod ui;
mod util;
use crate::app::App;
use crate::cli::{Arguments, Cli, Mode, USAGE};
use crate::config::Config;
use crate::engine::GameLoop;
use crate::scores::{ScoreClient, ScoreFeed};
use crate::server::Database;
use crate::ui::{NameField, TerminalPresenter};
use anyhow::Context;
use std::io::{self, ErrorKind};
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing::info;

fn main() -> ExitCode {
    match Cli::from_env() {
        Ok(Cli::Run(args)) => exit_with(run(args)),
        Ok(Cli::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Cli::Version) => {
            println!("snakeboard {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("snakeboard: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn exit_with(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e.downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("snakeboard: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Arguments) -> anyhow::Result<()> {
    let config = match args.config {
        Some(path) => Config::load(&path, false),
        None => Config::load(&Config::default_path()?, true),
    }
    .context("failed to load configuration")?;
    let runtime = Runtime::new().context("failed to start async runtime")?;
    match args.mode {
        Mode::Play { server, name } => play(config, server, name, &runtime),
        Mode::Serve { bind, database } => {
            logging::init_stderr();
            let mut server_config = config.server;
            if let Some(bind) = bind {
                server_config.bind = bind;
            }
            if let Some(database) = database {
                server_config.database = Database::from(database);
            }
            runtime.block_on(server::serve(server_config))
        }
    }
}

fn play(
    config: Config,
    server: Option<String>,
    name: Option<String>,
    runtime: &Runtime,
) -> anyhow::Result<()> {
    if let Some(path) = config.client.log_file() {
        logging::init_file(&path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
    }
    let url = server.unwrap_or(config.client.server_url);
    let client = ScoreClient::new(&url, Some(config.client.request_timeout))?;
    let (feed, events) = ScoreFeed::new(client, runtime.handle().clone());
    info!(server = %url, "Starting game");
    let game = GameLoop::new(config.game, feed);
    let name = NameField::new(name.or(config.client.player));
    let terminal = ratatui::try_init().context("failed to set up terminal")?;
    let r = App::new(game, TerminalPresenter::new(terminal, name), events).run();
    ratatui::restore();
    info!("Exiting");
    Ok(r?)
}
