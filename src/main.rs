use clap::{Parser, Subcommand};
use relm4::prelude::*;
use slide_confirm::config;
use slide_confirm::control::LabelText;
use slide_confirm::gui::app::AppModel;
use slide_confirm::sys::{SOCKET_PATH, runtime};
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slide-confirm", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read configuration from this file instead of the default location
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Text on the draggable panel (overrides the config file)
    #[arg(short = 'l', long)]
    label: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Slide a running instance back to rest
    Reset,
    /// Confirm a running instance as if the slider was dragged
    Confirm,
    /// Make a running instance re-read its configuration
    Reload,
    /// Write the default config file and print its path
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Reset) => send_command("reset"),
        Some(Commands::Confirm) => send_command("confirm"),
        Some(Commands::Reload) => send_command("reload"),
        Some(Commands::InitConfig) => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
        None => run(cli.config, cli.label),
    }
}

fn run(config_path: Option<PathBuf>, label: Option<String>) -> anyhow::Result<()> {
    let config_path = match config_path {
        Some(path) => Some(config::resolve_config_path(&path)?),
        None => config::get_config_path().ok(),
    };

    let mut config = config::load_or_default(config_path.as_deref());
    if let Some(label) = label {
        config.label = LabelText::new(label);
    }

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, config_path.clone());

    let app = RelmApp::new("org.slide.confirm");

    app.run::<AppModel>((config, config_path, rx));
    Ok(())
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to slide-confirm at {}: {}. Is it running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
