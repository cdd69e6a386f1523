// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed state store with load/mutate/save as its only surface.
//!
//! No component touches the state file directly; everything goes through
//! [`StateStore`]. Reads never fail outward (a missing or corrupt file yields
//! the default record), writes are atomic-replace, and every mutation
//! re-derives from a fresh load so overlapping invocations degrade to
//! last-writer-wins rather than corruption.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use restock_core::{AvailabilityTransition, PhoneNumber};
use tracing::{debug, error, info, warn};

use crate::model::PersistedState;

/// Handle to the persisted state record at a fixed path.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Creates a store for the record at `path`. The file itself is created
    /// lazily on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the current record.
    ///
    /// Never fails outward: an absent file is the bootstrap case and any
    /// read or parse error is logged and replaced by the default record.
    /// State loss degrades to a possible duplicate notification or a missed
    /// subscriber change, which is the documented trade.
    pub fn load(&self) -> PersistedState {
        match fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str::<PersistedState>(&raw) {
                Ok(state) => {
                    debug!(path = %self.path.display(), "loaded state");
                    state
                }
                Err(e) => {
                    error!(path = %self.path.display(), error = %e, "state file unparsable, using defaults");
                    PersistedState::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no state file, using defaults");
                PersistedState::default()
            }
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "state file unreadable, using defaults");
                PersistedState::default()
            }
        }
    }

    /// Saves the full record, atomically from a concurrent reader's
    /// perspective: the serialized record lands in a sibling temp file which
    /// is then renamed over the target, so no reader ever sees a half-written
    /// file. Failure is logged, not raised.
    pub fn save(&self, state: &PersistedState) {
        let json = match serde_json::to_string(state) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "state record unserializable, not saved");
                return;
            }
        };

        let tmp = self.path.with_extension("tmp");
        if let Err(e) = fs::write(&tmp, &json) {
            error!(path = %tmp.display(), error = %e, "failed to write state temp file");
            return;
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            error!(path = %self.path.display(), error = %e, "failed to replace state file");
            return;
        }
        debug!(path = %self.path.display(), "saved state");
    }

    /// Records a fresh availability observation and returns the classified
    /// transition against the previously stored value.
    ///
    /// This is the single authoritative place the "did it change" decision
    /// is made; callers must never diff their own local copies.
    pub fn update_availability(&self, is_available: bool) -> AvailabilityTransition {
        let mut state = self.load();
        let transition = AvailabilityTransition::classify(state.available, is_available);
        state.available = is_available;
        self.save(&state);
        debug!(%transition, available = is_available, "availability recorded");
        transition
    }

    /// Adds a subscriber. Returns `true` if the number was newly added.
    pub fn add_subscriber(&self, number: &PhoneNumber) -> bool {
        let mut state = self.load();
        let added = state.subscribers.insert(number.clone());
        if added {
            self.save(&state);
            info!(%number, "added subscriber");
        } else {
            debug!(%number, "subscriber already present");
        }
        added
    }

    /// Removes a subscriber. Returns `true` if the number was present.
    pub fn remove_subscriber(&self, number: &PhoneNumber) -> bool {
        let mut state = self.load();
        let removed = state.subscribers.remove(number);
        if removed {
            self.save(&state);
            info!(%number, "removed subscriber");
        } else {
            debug!(%number, "subscriber not found");
        }
        removed
    }

    /// Snapshot of the current subscriber set.
    pub fn subscribers(&self) -> std::collections::BTreeSet<PhoneNumber> {
        self.load().subscribers
    }

    /// The newest inbound timestamp already processed, if any.
    pub fn cursor(&self) -> Option<DateTime<Utc>> {
        self.load().last_message_cursor
    }

    /// Advances the inbound watermark to `ts`.
    ///
    /// Once non-null the cursor is monotonically non-decreasing: a stale
    /// `ts` from an overlapping run is ignored rather than rewinding the
    /// watermark and re-processing commands.
    pub fn advance_cursor(&self, ts: DateTime<Utc>) {
        let mut state = self.load();
        if let Some(current) = state.last_message_cursor
            && ts < current
        {
            warn!(%ts, %current, "ignoring cursor rewind");
            return;
        }
        state.last_message_cursor = Some(ts);
        self.save(&state);
        debug!(%ts, "advanced inbound cursor");
    }
}
