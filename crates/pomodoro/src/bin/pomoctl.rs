use clap::{Parser, Subcommand};
use pomodoro::events::ControlCommand;
use pomodoro::sys::server;
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "pomoctl", version, about = "Control a running pomodoro timer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Bring the timer window to the front
    Show,
    /// Start (or resume) the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Start if paused, pause if running
    Toggle,
    /// Refill the current phase and restart its countdown
    Reset,
    /// End the current phase and move to the next one
    Skip,
    /// Write the default config file if missing and print its path
    InitConfig,
}

impl Commands {
    fn control(self) -> Option<ControlCommand> {
        match self {
            Self::Show => Some(ControlCommand::Show),
            Self::Start => Some(ControlCommand::Start),
            Self::Pause => Some(ControlCommand::Pause),
            Self::Toggle => Some(ControlCommand::Toggle),
            Self::Reset => Some(ControlCommand::Reset),
            Self::Skip => Some(ControlCommand::Skip),
            Self::InitConfig => None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command.control() {
        Some(cmd) => send_command(cmd),
        None => {
            let path = pomodoro::config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn send_command(cmd: ControlCommand) -> anyhow::Result<()> {
    let path = server::socket_path();
    let mut stream = UnixStream::connect(&path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to pomodoro at {}: {}. Is it running?",
            path.display(),
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    log::debug!("Sent '{}' to {}", cmd, path.display());
    Ok(())
}
