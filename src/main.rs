use anyhow::Context;
use linea::logging::{self, Logger};
use linea::{error, App, EditorConfig};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    error::setup_panic_handler();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_options(&args);

    let mut logger = Logger::from_env();
    if let Some(path) = &options.log_file {
        logger = logger.with_file_output(path.clone());
    }
    logging::init(logger);

    let config = EditorConfig::discover(options.config.as_deref())
        .context("failed to load configuration")?;
    log::info!("starting linea {}", env!("CARGO_PKG_VERSION"));

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut app = App::new(config, stdin.lock(), stdout.lock());
    app.run().context("console session aborted")?;

    Ok(())
}

#[derive(Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();

    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                if let Some(next) = iter.peek() {
                    if !next.starts_with('-') {
                        options.config = Some(PathBuf::from((*next).clone()));
                        iter.next();
                    }
                }
            }
            "--log-file" => {
                if let Some(next) = iter.peek() {
                    if !next.starts_with('-') {
                        options.log_file = Some(PathBuf::from((*next).clone()));
                        iter.next();
                    }
                }
            }
            other => eprintln!("ignoring unknown argument: {}", other),
        }
    }

    options
}
