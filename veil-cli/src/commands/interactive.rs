//! Parsing of the commands typed while a ceremony runs.

use veil_session::Action;

/// One typed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Apply(Action),
    Words,
    Link,
    Status,
    Help,
    Quit,
}

/// Parse one input line. Blank lines parse to `None`.
pub fn parse(line: &str) -> Option<Result<Command, String>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(pattern) = line.strip_prefix('+') {
        return Some(Ok(Command::Apply(Action::AddPattern(pattern.trim().to_string()))));
    }
    if let Some(pattern) = line.strip_prefix('-') {
        return Some(Ok(Command::Apply(Action::RemovePattern(pattern.trim().to_string()))));
    }

    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.next();

    let command = match (verb.as_str(), arg) {
        ("add", Some(p)) => Ok(Command::Apply(Action::AddPattern(p.to_string()))),
        ("remove" | "rm", Some(p)) => Ok(Command::Apply(Action::RemovePattern(p.to_string()))),
        ("rate", Some(n)) => number(n).map(|n| Command::Apply(Action::SetRate(n))),
        ("length" | "aperture", Some(n)) => number(n).map(|n| Command::Apply(Action::SetLength(n))),
        ("channels" | "witnesses", Some(n)) => {
            number(n).map(|n| Command::Apply(Action::SetChannels(n)))
        }
        ("pause" | "stop", None) => Ok(Command::Apply(Action::Pause)),
        ("start" | "resume", None) => Ok(Command::Apply(Action::Start)),
        ("toggle", None) => Ok(Command::Apply(Action::Toggle)),
        ("clear", None) => Ok(Command::Apply(Action::ClearLog)),
        ("words" | "log", None) => Ok(Command::Words),
        ("link" | "share", None) => Ok(Command::Link),
        ("status", None) => Ok(Command::Status),
        ("help" | "?", None) => Ok(Command::Help),
        ("quit" | "exit" | "q", None) => Ok(Command::Quit),
        _ => Err(format!("Unknown command '{}'. Type 'help' for the list.", line)),
    };
    Some(command)
}

fn number<T: std::str::FromStr>(raw: &str) -> Result<T, String> {
    raw.parse().map_err(|_| format!("'{}' is not a number", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(line: &str) -> Command {
        parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_pattern_shorthands() {
        assert_eq!(ok("+528"), Command::Apply(Action::AddPattern("528".into())));
        assert_eq!(ok("- 528"), Command::Apply(Action::RemovePattern("528".into())));
        assert_eq!(ok("add 7"), Command::Apply(Action::AddPattern("7".into())));
    }

    #[test]
    fn test_numeric_controls() {
        assert_eq!(ok("rate 12"), Command::Apply(Action::SetRate(12)));
        assert_eq!(ok("Aperture 8"), Command::Apply(Action::SetLength(8)));
        assert_eq!(ok("channels 3"), Command::Apply(Action::SetChannels(3)));
        assert!(parse("rate fast").unwrap().is_err());
        assert!(parse("rate -1").unwrap().is_err());
    }

    #[test]
    fn test_plain_verbs() {
        assert_eq!(ok("pause"), Command::Apply(Action::Pause));
        assert_eq!(ok("clear"), Command::Apply(Action::ClearLog));
        assert_eq!(ok("link"), Command::Link);
        assert_eq!(ok("q"), Command::Quit);
    }

    #[test]
    fn test_blank_and_unknown() {
        assert!(parse("   ").is_none());
        assert!(parse("dance").unwrap().is_err());
        assert!(parse("pause now").unwrap().is_err());
    }
}
