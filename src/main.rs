use std::fs::File;
use std::io::{self, IsTerminal};
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use tempfile::NamedTempFile;

use fiddle::core::config;
use fiddle::core::program::{self, ProgramSpec};
use fiddle::core::runner::ShellRunner;
use fiddle::core::state::App;
use fiddle::tui::{self, theme};

#[derive(Parser)]
#[command(
    name = "fiddle",
    version,
    about = "Compose grep, sed, awk, jq and yq command lines interactively"
)]
struct Args {
    /// Program to compose a command line for
    #[arg(value_enum)]
    program: ProgramArg,

    /// Color theme (overrides config file and FIDDLE_THEME)
    #[arg(long)]
    theme: Option<String>,

    /// Shell the composed line is evaluated with (overrides config file and FIDDLE_SHELL)
    #[arg(long)]
    shell: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProgramArg {
    Grep,
    Sed,
    Awk,
    Jq,
    Yq,
}

impl ProgramArg {
    fn spec(self) -> ProgramSpec {
        match self {
            ProgramArg::Grep => program::GREP,
            ProgramArg::Sed => program::SED,
            ProgramArg::Awk => program::AWK,
            ProgramArg::Jq => program::JQ,
            ProgramArg::Yq => program::YQ,
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let config = config::load_config().unwrap_or_else(|e| {
        eprintln!("fiddle: {e}");
        std::process::exit(1);
    });
    let resolved = config::resolve(&config, args.theme.as_deref(), args.shell.as_deref());

    let Some(theme) = theme::lookup(&resolved.theme) else {
        eprintln!(
            "fiddle: unknown theme '{}' (available: {})",
            resolved.theme,
            theme::names().join(", ")
        );
        std::process::exit(1);
    };

    let spec = args.program.spec();
    if program::find_on_path(spec.name).is_none() {
        eprintln!("fiddle: '{}' not found on PATH", spec.name);
        std::process::exit(1);
    }

    init_logging();
    log::info!(
        "fiddle starting: program={}, theme={}, shell={}",
        spec.name,
        resolved.theme,
        resolved.shell
    );

    // Piped input must be drained before the terminal takes over stdin
    let captured = capture_stdin().unwrap_or_else(|e| {
        eprintln!("fiddle: failed to capture piped input: {e}");
        std::process::exit(1);
    });
    let stdin_path = captured.as_ref().map(|file| file.path().to_path_buf());

    // With stdin consumed by the pipe, interactive keys have to come from
    // the controlling terminal
    #[cfg(unix)]
    if captured.is_some() && File::open("/dev/tty").is_err() {
        eprintln!("fiddle: stdin is piped and no controlling terminal is available");
        std::process::exit(1);
    }

    let runner = Arc::new(ShellRunner::new(resolved.shell));
    let app = App::new(spec, stdin_path, runner, ".");

    let committed = tui::run(app, theme)?;
    if let Some(line) = committed {
        if let Some(file) = captured {
            // The printed line may redirect from the captured buffer, so it
            // has to outlive this process
            let _ = file.keep();
        }
        println!("{line}");
    }
    Ok(())
}

fn init_logging() {
    // File logger - writes to fiddle.log under the temp dir, away from the
    // directory the session is composing over
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(std::env::temp_dir().join("fiddle.log")) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }
}

/// When input is piped in, drain it to a temp file before the terminal
/// starts; the expression then references the buffer with a redirect.
/// An empty pipe is treated as no input at all.
fn capture_stdin() -> io::Result<Option<NamedTempFile>> {
    // No reliable tty handoff on Windows, input redirection is not offered
    if cfg!(windows) {
        return Ok(None);
    }
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut file = tempfile::Builder::new().prefix("fiddle-stdin-").tempfile()?;
    let bytes = io::copy(&mut stdin, &mut file)?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(file))
}
