//! Decode command: show what a share link carries.

use clap::Args;
use veil_core::codec;

use crate::output;

/// Arguments for the decode command.
#[derive(Args)]
pub struct DecodeArgs {
    /// Share link, query string or full URL
    pub link: String,
}

pub fn run(args: DecodeArgs) -> i32 {
    let partial = codec::decode(&args.link);
    if partial.is_empty() {
        output::warn("No recognised settings in this link.");
    }

    match serde_json::to_string_pretty(&partial) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            output::error(&format!("Failed to render settings: {}", e));
            1
        }
    }
}
