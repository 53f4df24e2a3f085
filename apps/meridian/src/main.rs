use clap::{Parser, Subcommand};
use meridian::state::AppState;
use meridian::{export, obs, server};
use meridian_application::config::{self, Config};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "meridian")]
#[command(about = "Meridian Quote: price table and monthly average charts.", version)]
#[command(
    after_help = "Examples:\n  meridian --config configs/sample.toml serve\n  meridian --config configs/sample.toml serve --port 8080\n  meridian --config configs/sample.toml export --out site/\n"
)]
struct Cli {
    /// Config file path (TOML). Built-in defaults apply when omitted.
    #[arg(long, global = true, env = "MERIDIAN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Serve the table and chart pages over HTTP (default).
    Serve {
        /// Override server.bind.
        #[arg(long)]
        bind: Option<String>,
        /// Override server.port.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Render every page to static HTML files.
    Export {
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = obs::init_tracing(&config.log) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
    if let Err(err) = obs::init_metrics(&config.metrics) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    let command = cli.command.unwrap_or(CliCommand::Serve {
        bind: None,
        port: None,
    });
    if let Err(err) = run(config, command) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config, String> {
    match path.filter(|p| !p.as_os_str().is_empty()) {
        Some(path) => config::load_config(path),
        None => Ok(Config::default()),
    }
}

fn run(config: Config, command: CliCommand) -> Result<(), String> {
    match command {
        CliCommand::Serve { bind, port } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let port = port.unwrap_or(config.server.port);
            let state = AppState::new(&config)?;
            tracing::info!(
                path = %state.source.path.display(),
                start = %state.window.start(),
                end = %state.window.end(),
                "serving price file"
            );

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(|err| format!("failed to init tokio runtime: {err}"))?;
            runtime.block_on(server::serve(state, &bind, port))
        }
        CliCommand::Export { out } => {
            let state = AppState::new(&config)?;
            let report = export::export_pages(&state, &out)?;
            for path in &report.written {
                println!("wrote {}", path.display());
            }
            for (column, reason) in &report.skipped {
                println!("skipped {column}: {reason}");
            }
            Ok(())
        }
    }
}
