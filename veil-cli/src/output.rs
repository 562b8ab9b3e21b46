//! Terminal output formatting.

use colored::Colorize;
use veil_core::pattern::highlight;
use veil_session::Presence;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg.green());
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg.red());
}

/// Print an info message.
pub fn info(msg: &str) {
    println!("{} {}", "→".cyan(), msg);
}

/// Print a warning message.
pub fn warn(msg: &str) {
    println!("{} {}", "!".yellow().bold(), msg.yellow());
}

/// Print a header.
pub fn header(msg: &str) {
    println!("\n{}", msg.white().bold());
    println!("{}", "─".repeat(msg.chars().count()).dimmed());
}

/// Print a key-value pair.
pub fn kv(key: &str, value: &str) {
    println!("  {} {}", format!("{}:", key).dimmed(), value);
}

/// Print a helpful hint.
pub fn hint(msg: &str) {
    println!("{} {}", "💡".dimmed(), msg.dimmed());
}

/// Print one utterance.
pub fn utterance(word: &str, index: u16) {
    let time = chrono::Local::now().format("%H:%M:%S");
    println!(
        "{} {} {}",
        time.to_string().dimmed(),
        word.magenta().bold(),
        format!("#{}", index).dimmed()
    );
}

/// Print the veils of a tick with pattern occurrences highlighted.
pub fn veils(veils: &[String], patterns: &[String], aligned: bool) {
    for (channel, veil) in veils.iter().enumerate() {
        let rendered: String = highlight(veil, patterns)
            .into_iter()
            .map(|segment| {
                if segment.matched {
                    segment.text.yellow().bold().to_string()
                } else {
                    segment.text.dimmed().to_string()
                }
            })
            .collect();
        let marker = if aligned { "◆".green() } else { "·".dimmed() };
        println!("  {} {:>2} {}", marker, channel, rendered);
    }
}

/// Print a presence update.
pub fn presence(presence: Presence) {
    if presence.connected {
        info(&format!("{} present", presence.count));
    } else {
        warn("presence offline");
    }
}
