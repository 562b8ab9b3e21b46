//! Run command: the live ceremony.

use std::future::pending;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};
use veil_core::{Lexicon, VeilError};
use veil_session::{
    resolve_config, veil_home, Action, HeartbeatPresence, OfflinePresence, PresenceChannel,
    SessionController, TickOutcome,
};

use super::interactive::{self, Command};
use super::open_store;
use crate::config::{COMMANDS, LEXICON_ENV, PRESENCE_DIR};
use crate::output;

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Share link or query string to start from (e.g. "h=5&a=12&f=528")
    #[arg(short, long)]
    pub link: Option<String>,

    /// Ticks per second (1-30)
    #[arg(short, long)]
    pub rate: Option<u32>,

    /// Digits per veil (6-30)
    #[arg(short = 'a', long)]
    pub length: Option<usize>,

    /// Parallel veils per tick (1-30)
    #[arg(short = 'w', long)]
    pub channels: Option<usize>,

    /// Pattern that must appear in every veil (repeatable)
    #[arg(short, long = "pattern")]
    pub patterns: Vec<String>,

    /// Word list: one word per line, or a JSON array
    #[arg(long, env = "VEIL_LEXICON")]
    pub lexicon: Option<PathBuf>,

    /// Show every tick's veils with pattern hits highlighted
    #[arg(long)]
    pub veils: bool,

    /// Stop after this many seconds
    #[arg(long)]
    pub duration: Option<u64>,

    /// Do not read or write stored settings
    #[arg(long)]
    pub ephemeral: bool,

    /// Count other running sessions on this machine
    #[arg(long)]
    pub presence: bool,
}

pub async fn run(args: RunArgs) -> i32 {
    // 1. Resolve starting configuration
    let store = match open_store(args.ephemeral) {
        Ok(store) => store,
        Err(e) => {
            output::error(&format!("Cannot open settings: {}", e));
            return 1;
        }
    };
    let (config, source) = resolve_config(args.link.as_deref(), &store);
    info!("Starting from {:?}", source);

    let (tx, mut pulses) = mpsc::unbounded_channel();
    let mut session = SessionController::new(config, Lexicon::empty(), store, tx);

    // 2. Flag overrides behave exactly like typed controls
    let mut overrides = Vec::new();
    overrides.extend(args.length.map(Action::SetLength));
    overrides.extend(args.rate.map(Action::SetRate));
    overrides.extend(args.channels.map(Action::SetChannels));
    overrides.extend(args.patterns.iter().cloned().map(Action::AddPattern));
    for action in overrides {
        if let Err(e) = session.apply(action) {
            output::error(&e.to_string());
            return 1;
        }
    }

    // 3. Lexicon loads in the background; ticks stay silent until it lands
    let (lexicon_tx, mut lexicon_rx) = oneshot::channel::<Result<Lexicon, VeilError>>();
    let mut lexicon_pending = match args.lexicon.clone() {
        Some(path) => {
            tokio::task::spawn_blocking(move || {
                let _ = lexicon_tx.send(Lexicon::load(path));
            });
            true
        }
        None => {
            output::warn(&format!(
                "No word list given (--lexicon or {}); the ceremony will stay silent.",
                LEXICON_ENV
            ));
            false
        }
    };

    // 4. Presence
    let mut presence: Box<dyn PresenceChannel> = if args.presence {
        match veil_home() {
            Ok(home) => Box::new(HeartbeatPresence::spawn(home.join(PRESENCE_DIR))),
            Err(e) => {
                output::warn(&format!("Presence unavailable: {}", e));
                Box::new(OfflinePresence::new())
            }
        }
    } else {
        Box::new(OfflinePresence::new())
    };
    let mut presence_rx = presence.subscribe();

    print_status(&session);
    if session.config().patterns.is_empty() {
        output::hint("No patterns yet. Type +<digits> to add one.");
    }
    output::hint("Type 'help' for commands, 'quit' or Ctrl+C to leave.");
    println!();

    let _ = session.apply(Action::Start);

    let duration = args.duration;
    let deadline = async move {
        match duration {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => pending::<()>().await,
        }
    };
    tokio::pin!(deadline);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    // 5. Foreground loop: the only place the session is touched
    loop {
        tokio::select! {
            Some(pulse) = pulses.recv() => {
                if let Some(outcome) = session.handle_pulse(pulse) {
                    render_tick(&session, &outcome, args.veils);
                }
            }

            loaded = &mut lexicon_rx, if lexicon_pending => {
                lexicon_pending = false;
                match loaded {
                    Ok(Ok(lexicon)) => {
                        if lexicon.is_empty() {
                            output::warn("Word list is empty; the ceremony will stay silent.");
                        }
                        session.set_lexicon(lexicon);
                    }
                    Ok(Err(e)) => output::error(&e.to_string()),
                    Err(_) => output::error("Word list loader stopped unexpectedly"),
                }
            }

            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => {
                        if !handle_line(&mut session, &line) {
                            break;
                        }
                    }
                    Ok(None) | Err(_) => {
                        debug!("stdin closed");
                        stdin_open = false;
                    }
                }
            }

            Ok(()) = presence_rx.changed(), if args.presence => {
                output::presence(*presence_rx.borrow_and_update());
            }

            _ = &mut deadline => break,

            _ = tokio::signal::ctrl_c() => break,
        }
    }

    // 6. Teardown: no timer may outlive the session
    session.shutdown();
    presence.dispose();

    println!();
    output::success(&format!("{} utterance(s) in the log", session.config().log.len()));
    output::kv("Link", &format!("?{}", session.share_link()));
    0
}

/// Returns false when the user asked to leave.
fn handle_line(session: &mut SessionController, line: &str) -> bool {
    let command = match interactive::parse(line) {
        None => return true,
        Some(Err(msg)) => {
            output::error(&msg);
            return true;
        }
        Some(Ok(command)) => command,
    };

    match command {
        Command::Apply(action) => {
            let description = format!("{:?}", action);
            match session.apply(action) {
                Ok(()) => {
                    let state = running_label(session.is_running());
                    output::info(&format!("{} ({})", description, state));
                }
                Err(e) => output::error(&e.to_string()),
            }
        }
        Command::Words => {
            let words = session.utterances();
            if words.is_empty() {
                output::info("The log is empty.");
            } else {
                println!("{}", words.join(" "));
            }
        }
        Command::Link => output::kv("Link", &format!("?{}", session.share_link())),
        Command::Status => print_status(session),
        Command::Help => print_help(),
        Command::Quit => return false,
    }
    true
}

fn render_tick(session: &SessionController, outcome: &TickOutcome, show_veils: bool) {
    if show_veils && !outcome.result.is_skipped() {
        output::veils(
            &outcome.result.veils,
            &session.config().patterns,
            outcome.result.emitted.is_some(),
        );
    }
    if let Some(index) = outcome.result.emitted {
        let word = outcome.word.clone().unwrap_or_else(|| format!("#{}", index));
        output::utterance(&word, index);
    }
}

fn print_status(session: &SessionController) {
    let config = session.config();
    output::header("Veil Ceremony");
    output::kv("Rate", &format!("{} ticks/s", config.rate));
    output::kv("Aperture", &format!("{} digits", config.length));
    output::kv("Channels", &config.channels.to_string());
    let patterns = if config.patterns.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        config.patterns.join(", ").yellow().to_string()
    };
    output::kv("Patterns", &patterns);
    output::kv("Lexicon", &format!("{} words", session.lexicon().len()));
    output::kv("Log", &format!("{} utterance(s)", config.log.len()));
}

fn print_help() {
    output::header("Commands");
    for (command, meaning) in COMMANDS {
        println!("  {:<14} {}", command.green().bold(), meaning);
    }
}

fn running_label(running: bool) -> &'static str {
    if running {
        "running"
    } else {
        "paused"
    }
}
