//! Online presence: how many sessions are running right now.
//!
//! Presence is a display affordance only; the ceremony never reads it. Any
//! backend that can report `{count, connected}` plugs in behind
//! [`PresenceChannel`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

const BEAT_EXTENSION: &str = "beat";

/// Default time between heartbeats.
pub const DEFAULT_HEARTBEAT: Duration = Duration::from_secs(5);

/// A beat older than this no longer counts as present.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15);

/// Snapshot of the presence counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presence {
    pub count: usize,
    pub connected: bool,
}

/// A source of presence updates.
pub trait PresenceChannel: Send {
    /// A receiver that always holds the latest snapshot.
    fn subscribe(&mut self) -> watch::Receiver<Presence>;

    /// Leave: stop publishing and withdraw this session.
    fn dispose(&mut self);
}

/// Presence for sessions with no backend: never connected.
#[derive(Debug)]
pub struct OfflinePresence {
    tx: watch::Sender<Presence>,
}

impl OfflinePresence {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Presence::default());
        Self { tx }
    }
}

impl Default for OfflinePresence {
    fn default() -> Self {
        Self::new()
    }
}

impl PresenceChannel for OfflinePresence {
    fn subscribe(&mut self) -> watch::Receiver<Presence> {
        self.tx.subscribe()
    }

    fn dispose(&mut self) {}
}

/// File-based presence shared by every session on the machine.
///
/// Each session refreshes `<id>.beat` in a common directory and counts the
/// beat files touched within the TTL.
#[derive(Debug)]
pub struct HeartbeatPresence {
    beat_file: PathBuf,
    tx: Arc<watch::Sender<Presence>>,
    task: Option<JoinHandle<()>>,
}

impl HeartbeatPresence {
    /// Start beating in `dir` with the default interval and TTL.
    pub fn spawn(dir: impl Into<PathBuf>) -> Self {
        Self::spawn_with(dir, DEFAULT_HEARTBEAT, DEFAULT_TTL)
    }

    /// Start beating in `dir`. Must be called inside a tokio runtime.
    pub fn spawn_with(dir: impl Into<PathBuf>, heartbeat: Duration, ttl: Duration) -> Self {
        let dir = dir.into();
        let beat_file = dir.join(format!("{}.{}", Uuid::new_v4(), BEAT_EXTENSION));
        let (tx, _) = watch::channel(Presence::default());
        let tx = Arc::new(tx);

        let task = {
            let tx = Arc::clone(&tx);
            let beat_file = beat_file.clone();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(heartbeat);
                loop {
                    ticker.tick().await;
                    let connected = match beat(&dir, &beat_file) {
                        Ok(()) => true,
                        Err(e) => {
                            warn!("Presence heartbeat failed: {}", e);
                            false
                        }
                    };
                    let count = count_fresh_beats(&dir, ttl);
                    tx.send_if_modified(|current| {
                        let next = Presence { count, connected };
                        let changed = *current != next;
                        *current = next;
                        changed
                    });
                }
            })
        };

        debug!("Presence beating at {}", beat_file.display());
        Self {
            beat_file,
            tx,
            task: Some(task),
        }
    }
}

impl PresenceChannel for HeartbeatPresence {
    fn subscribe(&mut self) -> watch::Receiver<Presence> {
        self.tx.subscribe()
    }

    fn dispose(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = fs::remove_file(&self.beat_file);
            self.tx.send_replace(Presence::default());
        }
    }
}

impl Drop for HeartbeatPresence {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn beat(dir: &Path, beat_file: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    let stamp = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    fs::write(beat_file, stamp.to_string())
}

/// Number of beat files in `dir` modified within `ttl`.
pub fn count_fresh_beats(dir: &Path, ttl: Duration) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    let now = SystemTime::now();
    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.path().extension().map_or(false, |ext| ext == BEAT_EXTENSION)
        })
        .filter_map(|entry| entry.metadata().ok()?.modified().ok())
        .filter(|modified| now.duration_since(*modified).map_or(true, |age| age <= ttl))
        .count()
}
