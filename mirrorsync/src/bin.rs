use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use mirrorsync::Report;
use treemirror::{loc, Config};

#[derive(Parser)]
#[command(name = "mirrorsync")]
#[command(author, version, about, long_about=None)]
struct Cli {
    /// Listing URL of the remote root directory
    url: Option<String>,

    /// JSON config file (default: <config dir>/mirrorsync/config.json if present)
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Mirror into this directory instead of the platform application folder
    #[arg(long)]
    target_dir: Option<Utf8PathBuf>,

    /// Name of the application folder
    #[arg(long)]
    app_folder: Option<String>,

    /// Maximum nesting of remote directories
    #[arg(long)]
    max_depth: Option<usize>,
}

impl Cli {
    fn overrides(&self) -> Config {
        Config {
            root_url: self.url.clone(),
            app_folder: self.app_folder.clone(),
            target_dir: self.target_dir.clone(),
            user_agent: None,
            max_depth: self.max_depth,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build();
    let rt = match rt {
        Ok(rt) => rt,
        Err(err) => {
            log::error!("Can't start the runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    exit_program(rt.block_on(run(cli)))
}

async fn run(cli: Cli) -> anyhow::Result<Report> {
    let file_config = match &cli.config {
        Some(path) => Config::load_from_file(path).await?,
        None => match loc::user::config_file() {
            Ok(path) => Config::load_if_exists(&path).await?,
            Err(err) => {
                log::debug!("No default config location: {err}");
                Config::default()
            }
        },
    };
    let config = file_config.merge(cli.overrides());
    log::trace!("Loaded config: {config:?}");

    Ok(mirrorsync::mirror(&config).await?)
}

fn exit_program(res: anyhow::Result<Report>) -> ExitCode {
    match res {
        Ok(report) => {
            log::info!("Finished! {report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Exit status of a failed run: the code of the underlying mirror error, 1 otherwise.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<treemirror::Error>()
        .map(treemirror::Error::exit_code)
        .unwrap_or(1)
}
