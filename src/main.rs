// SPDX-License-Identifier: MPL-2.0
//! `lightbox-replay`: drives a controller over an in-memory page from a
//! scripted list of interactions and prints the resulting state trace.

use std::path::PathBuf;
use std::process::ExitCode;

use lightbox::config::{self, Options};
use lightbox::error::{Error, Result};
use lightbox::i18n::fluent::I18n;
use lightbox::replay::{self, Replay};
use tracing_subscriber::EnvFilter;

const DEFAULT_IMAGES: usize = 3;

const USAGE: &str = "\
Usage: lightbox-replay [--config PATH] [--lang LOCALE] [--images N] STEP...

Steps:
  click:<i>   click thumbnail i        key:<Name>  press a key
  wait:<ms>   advance the clock        frame       run the next frame
  image       click the shown image    backdrop    click the overlay
  close       click the close button   prev, next  click a nav button
  load        image finished loading   error       image failed to load
  destroy     tear the controller down";

struct Args {
    config: Option<PathBuf>,
    lang: Option<String>,
    images: usize,
    steps: Vec<String>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let config = args.opt_value_from_str("--config")?;
    let lang = args.opt_value_from_str("--lang")?;
    let images = args
        .opt_value_from_str("--images")?
        .unwrap_or(DEFAULT_IMAGES);
    let steps = args
        .finish()
        .into_iter()
        .filter_map(|s| s.into_string().ok())
        .collect();
    Ok(Some(Args {
        config,
        lang,
        images,
        steps,
    }))
}

fn load_options(path: Option<&PathBuf>) -> Result<Options> {
    match path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    }
}

fn run(args: Args) -> Result<()> {
    let options = load_options(args.config.as_ref())?;
    let i18n = I18n::new(args.lang, &options);
    tracing::info!(locale = %i18n.current_locale(), images = args.images, "Starting replay");

    let actions = replay::parse_script(&args.steps)?;
    let replay = Replay::new(args.images, options, i18n);
    replay.check(&actions)?;

    println!("{:<14} {}", "start", replay.snapshot());
    for action in &actions {
        let snapshot = replay.apply(action);
        println!("{:<14} {snapshot}", action.to_string());
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lightbox=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => return fail(&err),
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err),
    }
}

/// Reports `err` on stderr regardless of the log filter.
fn fail(err: &Error) -> ExitCode {
    tracing::debug!(error = ?err, "Replay failed");
    eprintln!("{}", failure_message(err));
    ExitCode::FAILURE
}

fn failure_message(err: &Error) -> String {
    match err {
        Error::Arguments(_) | Error::InvalidScript { .. } => format!("error: {err}\n\n{USAGE}"),
        _ => format!("error: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_errors_print_step_and_usage() {
        let message = failure_message(&Error::invalid_script("jump:1", "unknown step"));
        assert!(message.starts_with("error: invalid replay step `jump:1`: unknown step"));
        assert!(message.ends_with(USAGE));
    }

    #[test]
    fn argument_errors_print_usage() {
        let err = Error::from(pico_args::Error::MissingArgument);
        assert!(failure_message(&err).contains("Usage: lightbox-replay"));
    }

    #[test]
    fn io_errors_print_without_usage() {
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(failure_message(&err), "error: I/O error: gone");
    }
}
