mod runtime;
mod surfaces;

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use aster_core::bootstrap::{bootstrap, StartupError};
use aster_core::config::Config;
use aster_core::popup::SharedPopups;
use aster_core::style::SassCompiler;

use runtime::EventLoopRuntime;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

fn init_logging(verbose: bool) {
    use simplelog::*;

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aster")
        .join("aster.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path).or_else(|_| File::create("/tmp/aster.log")) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("aster: cannot create log file: {}", e);
            return;
        }
    };

    if let Err(e) = WriteLogger::init(log_level, simplelog::Config::default(), log_file) {
        eprintln!("aster: failed to initialize logger: {}", e);
        return;
    }

    log::info!("aster starting (log level: {:?})", log_level);
}

/// Command-line options.
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    verbose: bool,
    config_path: Option<PathBuf>,
    /// Words after `request`, if the first positional argument is `request`.
    request: Option<Vec<String>>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut positional = Vec::new();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-v" | "--verbose" => parsed.verbose = true,
            "--config" => match iter.next() {
                Some(path) => parsed.config_path = Some(PathBuf::from(path)),
                None => return Err("--config requires a path".to_string()),
            },
            other => positional.push(other.to_string()),
        }
    }
    if positional.first().map(String::as_str) == Some("request") {
        parsed.request = Some(positional.split_off(1));
    }
    Ok(parsed)
}

fn load_config(args: &Args) -> Config {
    match &args.config_path {
        Some(path) => Config::load_from(Some(path)),
        None => Config::load(),
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("aster: {}", e);
            std::process::exit(1);
        }
    };

    // `aster request <command> [args...]` talks to a running shell and must
    // not truncate its log.
    if let Some(words) = &args.request {
        let config = load_config(&args);
        std::process::exit(send(&config, &words.join(" ")));
    }

    init_logging(args.verbose);
    let config = load_config(&args);

    if let Err(e) = run(&config) {
        log::error!("startup failed: {}", e);
        eprintln!("aster: {}", e);
        std::process::exit(1);
    }
}

fn send(config: &Config, line: &str) -> i32 {
    let socket = config.socket_path();
    match aster_ipc::send_request(&socket, line, Some(REQUEST_TIMEOUT)) {
        Ok(response) => {
            if !response.is_empty() {
                println!("{}", response);
            }
            0
        }
        Err(e) => {
            eprintln!("aster: no shell answering on {}: {}", socket.display(), e);
            1
        }
    }
}

fn run(config: &Config) -> Result<(), StartupError> {
    let shell = config.shell_config();
    let compiler = SassCompiler::from_settings(&shell.compiler);
    let runtime = EventLoopRuntime::new(&shell.socket_path);
    let popups = SharedPopups::default();
    let surfaces = surfaces::all(&popups);

    let handle = bootstrap(&shell, &compiler, runtime, popups, surfaces)?;
    handle.run()
}
