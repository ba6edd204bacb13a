//! datefact - pick a date, get a fact
//!
//! A small controller that validates a (month, day) selection, fetches a
//! trivia fact for it and exposes the text to whatever renders it.

mod config;
mod facts;
mod runtime;
mod selection;
mod state_machine;

use config::FactConfig;
use facts::{LoggingService, NumbersApiService};
use runtime::{ControllerError, DateFactController, Snapshot};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: datefact [<month> <day> [--json]]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries only fact text
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "datefact=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = FactConfig::from_env()?;
    if config.api_key.is_none() {
        tracing::warn!(
            "No API key configured. Set DATEFACT_API_KEY; requests will fail authentication."
        );
    }
    tracing::info!(
        base_url = %config.base_url,
        error_policy = ?config.error_policy,
        "Configuration loaded"
    );

    let service = LoggingService::new(NumbersApiService::new(&config)?);
    let controller = DateFactController::spawn(config, service);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => {
            let stdin = BufReader::new(tokio::io::stdin());
            run_session(&controller, stdin, &mut std::io::stdout()).await?;
        }
        [month, day] => run_once(&controller, month, day, false).await?,
        [month, day, flag] if flag == "--json" => run_once(&controller, month, day, true).await?,
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }

    Ok(())
}

/// Drive one selection, wait for the fetch and print the result
async fn run_once(
    controller: &DateFactController,
    month: &str,
    day: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    controller.set_month(month).await?;
    controller.set_day(day).await?;
    let snapshot = controller.settled().await;
    print_snapshot(&snapshot, json)?;
    Ok(())
}

fn print_snapshot(snapshot: &Snapshot, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
    } else {
        println!("{}", snapshot.display_text);
    }
    Ok(())
}

/// Tell the user which days the picked month offers
fn print_day_hint(controller: &DateFactController) {
    let snapshot = controller.snapshot();
    if snapshot.selection.day.is_some() {
        return;
    }
    let choices = snapshot.selection.day_choices();
    match snapshot.month_name {
        Some(name) => eprintln!("{name}: pick a day {}-{}", choices.start(), choices.end()),
        None if snapshot.selection.month.is_some() => eprintln!("No such month; pick 1-12"),
        None => {}
    }
}

/// What a session line asked for
enum Flow {
    Continue,
    Quit,
}

/// Apply one session line to the controller
async fn handle_line(
    controller: &DateFactController,
    line: &str,
) -> Result<Flow, ControllerError> {
    let mut parts = line.split_whitespace();
    let result = match (parts.next(), parts.next()) {
        (Some("month" | "m"), value) => controller.set_month(value.unwrap_or("")).await,
        (Some("day" | "d"), value) => controller.set_day(value.unwrap_or("")).await,
        (Some("clear"), None) => controller.clear().await,
        (Some("quit" | "q"), None) => return Ok(Flow::Quit),
        (None, _) => return Ok(Flow::Continue),
        _ => {
            eprintln!("commands: month <n> | day <n> | clear | quit");
            return Ok(Flow::Continue);
        }
    };
    match result {
        Ok(()) => print_day_hint(controller),
        Err(ControllerError::Rejected(e)) => eprintln!("{e}"),
        Err(e @ ControllerError::Stopped) => return Err(e),
    }
    Ok(Flow::Continue)
}

/// Write the display text if it differs from what was last written
fn print_if_changed(
    updates: &mut watch::Receiver<Snapshot>,
    last: &mut String,
    out: &mut impl Write,
) -> std::io::Result<()> {
    let text = updates.borrow_and_update().display_text.clone();
    if text != *last {
        writeln!(out, "{text}")?;
        *last = text;
    }
    Ok(())
}

/// Line-driven session: `month <v>`, `day <v>`, `clear`, `quit`
///
/// Every change of the display text is written to `out` as it is
/// published. When input ends, the pending fetch is awaited so its result
/// still gets written; `quit` exits without waiting.
async fn run_session<R, W>(
    controller: &DateFactController,
    input: R,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut updates = controller.subscribe();
    let mut last = updates.borrow_and_update().display_text.clone();
    writeln!(out, "{last}")?;

    let mut lines = input.lines();
    loop {
        tokio::select! {
            biased;
            Ok(()) = updates.changed() => print_if_changed(&mut updates, &mut last, out)?,
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if let Flow::Quit = handle_line(controller, &line).await? {
                    return Ok(());
                }
            }
        }
    }

    controller.settled().await;
    print_if_changed(&mut updates, &mut last, out)?;
    Ok(())
}
