use std::path::PathBuf;
use std::process::ExitCode;

use dialoguer::{Input, Password};
use eyre::Result;
use log::{debug, info, warn};

use urlsum::config::{self, Config};
use urlsum::output::{self, TerminalReporter};
use urlsum::{Chunker, GroqClient, HttpLoader, Pipeline};

mod cli;

use cli::Cli;

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("urlsum.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("urlsum")
        .join("logs")
}

fn build_after_help() -> String {
    format!(
        "\nThe Groq API key is read from ${} or `groq_api_key` in {}.\n\nLogs are written to: {}",
        config::API_KEY_ENV,
        config::config_path().display(),
        log_dir().join("urlsum.log").display()
    )
}

/// Masked override prompt; an empty answer keeps the stored key
fn prompt_api_key() -> Result<Option<String>> {
    let key = Password::new()
        .with_prompt("Groq API key (optional override, Enter to skip)")
        .allow_empty_password(true)
        .interact()?;
    Ok(Some(key).filter(|k| !k.trim().is_empty()))
}

fn prompt_url() -> Result<Option<String>> {
    let url: String = match Input::new()
        .with_prompt("URL (empty to quit)")
        .allow_empty(true)
        .interact_text()
    {
        Ok(url) => url,
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(url).filter(|u| !u.trim().is_empty()))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Config file problems are non-fatal
    let config = Config::load().unwrap_or_else(|e| {
        warn!("Ignoring config file: {e}");
        Config::default()
    });

    let model = cli.model.clone().unwrap_or_else(|| config.model().to_string());
    let lang = cli.lang.clone().unwrap_or_else(|| config.lang().to_string());
    let max_chunks = cli.max_chunks.unwrap_or_else(|| config.max_chunks());

    if cli.verbose {
        let config_path = config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
        eprintln!("Model: {model}\nLanguage: {lang}\nMax chunks: {max_chunks}");
    }
    debug!("model={model} lang={lang} max_chunks={max_chunks}");

    let interactive = cli.url.is_none();
    let override_key = if interactive || cli.api_key_prompt {
        prompt_api_key()?
    } else {
        None
    };

    let env_key = std::env::var(config::API_KEY_ENV).ok();
    let api_key = match config::resolve_api_key(
        override_key.as_deref(),
        env_key.as_deref(),
        config.groq_api_key.as_deref(),
    ) {
        Ok(key) => key,
        Err(e) => {
            eprintln!("{}", output::render_error(&e));
            return Ok(ExitCode::FAILURE);
        }
    };

    let chunker = match Chunker::new(config.chunk_size(), config.chunk_overlap()) {
        Ok(chunker) => chunker,
        Err(e) => {
            eprintln!("{}", output::render_error(&e));
            return Ok(ExitCode::FAILURE);
        }
    };

    let loader = HttpLoader::new(lang).map_err(|e| eyre::eyre!("failed to build HTTP client: {e}"))?;
    let pipeline = Pipeline::new(loader, GroqClient::new(api_key, model))
        .with_chunker(chunker)
        .with_max_chunks(max_chunks)
        .with_warn_threshold(config.warn_chunk_threshold());

    let mut reporter = TerminalReporter { verbose: cli.verbose };

    if let Some(url) = cli.url {
        return Ok(match pipeline.run(&url, &mut reporter).await {
            Ok(report) => {
                println!("{}", output::render_report(&report));
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", output::render_error(&e));
                ExitCode::FAILURE
            }
        });
    }

    // Each entered URL is an independent run
    while let Some(url) = prompt_url()? {
        match pipeline.run(&url, &mut reporter).await {
            Ok(report) => println!("\n{}\n", output::render_report(&report)),
            Err(e) => eprintln!("\n{}\n", output::render_error(&e)),
        }
    }

    Ok(ExitCode::SUCCESS)
}
