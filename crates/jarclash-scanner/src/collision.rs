//! Collision detection
//!
//! The registry maps every tracked entry path to the archive that currently
//! owns it. Ownership ratchets forward: whenever a later archive presents the
//! same entry, it becomes the owner, so a third archive reusing the path is
//! paired with the second one, not the first.

use crate::types::ArchiveRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A single collision: two distinct archives providing the same entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionRecord {
    /// The colliding entry path
    pub entry: String,
    /// Owner before this observation
    pub previous: ArchiveRef,
    /// Archive whose scan triggered the detection
    pub current: ArchiveRef,
}

/// All collisions between one previous owner and one newly scanned archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionGroup {
    /// Owner of the colliding entries before the scan
    pub previous: ArchiveRef,
    /// Archive whose scan surfaced the collisions
    pub current: ArchiveRef,
    /// Colliding entry paths, in scan order
    pub entries: Vec<String>,
}

impl CollisionGroup {
    fn from_record(record: CollisionRecord) -> Self {
        Self {
            previous: record.previous,
            current: record.current,
            entries: vec![record.entry],
        }
    }

    /// The record surfaced for this archive pair: its first colliding entry
    #[must_use]
    pub fn first_record(&self) -> Option<CollisionRecord> {
        self.entries.first().map(|entry| CollisionRecord {
            entry: entry.clone(),
            previous: self.previous.clone(),
            current: self.current.clone(),
        })
    }

    /// Whether either side of the group is the archive at `path`
    #[must_use]
    pub fn involves(&self, path: &Path) -> bool {
        self.previous.path == path || self.current.path == path
    }
}

/// Entry path to owning archive
#[derive(Debug, Default)]
pub struct CollisionRegistry {
    owners: HashMap<String, ArchiveRef>,
}

impl CollisionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `archive` as the owner of `entry`
    ///
    /// Returns a record when a different archive owned the entry before.
    /// Ownership moves to `archive` whether or not a collision was found.
    pub fn observe(&mut self, entry: &str, archive: &ArchiveRef) -> Option<CollisionRecord> {
        match self.owners.get_mut(entry) {
            None => {
                self.owners.insert(entry.to_string(), archive.clone());
                None
            }
            Some(owner) if owner.path == archive.path => None,
            Some(owner) => {
                let previous = std::mem::replace(owner, archive.clone());
                Some(CollisionRecord {
                    entry: entry.to_string(),
                    previous,
                    current: archive.clone(),
                })
            }
        }
    }

    /// Current owner of `entry`
    #[must_use]
    pub fn owner(&self, entry: &str) -> Option<&ArchiveRef> {
        self.owners.get(entry)
    }

    /// Number of tracked entry paths
    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn clear(&mut self) {
        self.owners.clear();
    }
}

/// Groups the records produced while scanning a single archive by previous owner
#[derive(Debug, Default)]
pub(crate) struct GroupCollector {
    groups: Vec<CollisionGroup>,
}

impl GroupCollector {
    pub(crate) fn push(&mut self, record: CollisionRecord) {
        match self
            .groups
            .iter_mut()
            .find(|group| group.previous.path == record.previous.path)
        {
            Some(group) => group.entries.push(record.entry),
            None => self.groups.push(CollisionGroup::from_record(record)),
        }
    }

    pub(crate) fn finish(self) -> Vec<CollisionGroup> {
        self.groups
    }
}
