//! Share command: print the share link for the stored settings.

use clap::Args;
use veil_core::codec;
use veil_session::resolve_config;

use super::open_store;
use crate::output;

/// Arguments for the share command.
#[derive(Args)]
pub struct ShareArgs {
    /// Normalise this link instead of the stored settings
    #[arg(short, long)]
    pub link: Option<String>,

    /// Print only the query string
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: ShareArgs) -> i32 {
    let store = match open_store(false) {
        Ok(store) => store,
        Err(e) => {
            output::error(&format!("Cannot open settings: {}", e));
            return 1;
        }
    };

    let (config, source) = resolve_config(args.link.as_deref(), &store);
    let query = codec::encode(&config);

    if args.quiet {
        println!("?{}", query);
        return 0;
    }

    output::header("Share Link");
    output::kv("Source", &format!("{:?}", source));
    output::kv("Link", &format!("?{}", query));
    output::hint(&format!("Resume anywhere with: veil run --link '{}'", query));
    0
}
