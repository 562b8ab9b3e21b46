//! CLI command implementations.

pub mod decode;
pub mod interactive;
pub mod run;
pub mod share;
pub mod words;

use veil_session::{SettingsStore, SessionError};

/// The settings store, unless the caller asked for an ephemeral session.
pub(crate) fn open_store(ephemeral: bool) -> Result<SettingsStore, SessionError> {
    if ephemeral {
        Ok(SettingsStore::disabled())
    } else {
        SettingsStore::default_location()
    }
}
