//! Words command: read the utterance log back as words.

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use veil_core::Lexicon;
use veil_session::resolve_config;

use super::open_store;
use crate::output;

/// Arguments for the words command.
#[derive(Args)]
pub struct WordsArgs {
    /// Word list used to render the log
    #[arg(long, env = "VEIL_LEXICON")]
    pub lexicon: Option<PathBuf>,

    /// Read the log from this link instead of the stored settings
    #[arg(short, long)]
    pub link: Option<String>,
}

pub fn run(args: WordsArgs) -> i32 {
    let store = match open_store(false) {
        Ok(store) => store,
        Err(e) => {
            output::error(&format!("Cannot open settings: {}", e));
            return 1;
        }
    };
    let (config, _) = resolve_config(args.link.as_deref(), &store);

    let lexicon = match args.lexicon {
        Some(path) => match Lexicon::load(&path) {
            Ok(lexicon) => lexicon,
            Err(e) => {
                output::error(&e.to_string());
                return 1;
            }
        },
        None => {
            output::warn("No word list given; showing raw indices.");
            Lexicon::empty()
        }
    };

    if config.log.is_empty() {
        output::info("The log is empty.");
        return 0;
    }

    for (position, (index, word)) in config
        .log
        .iter()
        .zip(lexicon.render(&config.log))
        .enumerate()
    {
        println!(
            "{:>4} {} {}",
            (position + 1).to_string().dimmed(),
            word.magenta().bold(),
            format!("#{}", index).dimmed()
        );
    }
    0
}
