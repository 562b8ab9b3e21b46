//! CLI-level configuration.

/// Environment variable naming the default word list.
pub const LEXICON_ENV: &str = "VEIL_LEXICON";

/// Presence beats live under `<veil home>/presence`.
pub const PRESENCE_DIR: &str = "presence";

/// Interactive commands understood while `veil run` is active.
pub const COMMANDS: &[(&str, &str)] = &[
    ("+<digits>", "Add a pattern (also: add <digits>)"),
    ("-<digits>", "Remove a pattern (also: remove <digits>)"),
    ("rate <n>", "Ticks per second (1-30)"),
    ("length <n>", "Digits per veil (6-30)"),
    ("channels <n>", "Parallel veils per tick (1-30)"),
    ("pause", "Stop ticking"),
    ("start", "Resume ticking"),
    ("toggle", "Pause or resume"),
    ("clear", "Clear the utterance log"),
    ("words", "Show the utterance log"),
    ("link", "Show the current share link"),
    ("status", "Show the current settings"),
    ("help", "Show this list"),
    ("quit", "Leave the ceremony"),
];
