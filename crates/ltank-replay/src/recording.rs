//! The in-memory intent recording.

use crate::types::ReplayEntry;

/// Undo/redo-style stack of [`ReplayEntry`] values with a head cursor.
///
/// Entries before the head have been applied. Live play appends at the
/// head, discarding anything after it. Playback walks the head forward
/// with [`redo`](ReplayLog::redo).
///
/// Intents the five-symbol alphabet cannot express (boosts, magnets,
/// bombs, non-green shots) are not recorded; they mark the log tainted
/// instead, because replaying without them would diverge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplayLog {
    entries: Vec<ReplayEntry>,
    head: usize,
    tainted: bool,
}

impl ReplayLog {
    /// An empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// A recording loaded for playback: every entry pending, head at 0.
    pub fn from_entries(entries: Vec<ReplayEntry>) -> Self {
        Self {
            entries,
            head: 0,
            tainted: false,
        }
    }

    /// Record a successful live intent. Returns `false` and taints the
    /// log when the intent has no replay code.
    pub fn update_undo_history(&mut self, is_shoot: bool, dx: i32, dy: i32) -> bool {
        match ReplayEntry::from_intent(is_shoot, dx, dy) {
            Some(entry) => {
                self.record(entry);
                true
            }
            None => {
                log::debug!("intent ({dx}, {dy}) has no replay code; recording tainted");
                self.tainted = true;
                false
            }
        }
    }

    /// Append `entry` at the head, discarding any redo tail.
    pub fn record(&mut self, entry: ReplayEntry) {
        self.entries.truncate(self.head);
        self.entries.push(entry);
        self.head += 1;
    }

    /// Flag the recording as not faithfully replayable.
    pub fn taint(&mut self) {
        self.tainted = true;
    }

    /// Restore the taint flag captured with a history frame, so undoing
    /// the unrecordable move makes the log exportable again.
    pub fn set_tainted(&mut self, tainted: bool) {
        self.tainted = tainted;
    }

    /// `true` once an unrecordable intent was played.
    pub fn is_tainted(&self) -> bool {
        self.tainted
    }

    /// `true` when there is an applied entry to step back over.
    pub fn try_undo(&self) -> bool {
        self.head > 0
    }

    /// Step the head back, returning the entry un-applied.
    pub fn undo(&mut self) -> Option<ReplayEntry> {
        if self.head == 0 {
            return None;
        }
        self.head -= 1;
        Some(self.entries[self.head])
    }

    /// `true` when there is a pending entry ahead of the head.
    pub fn try_redo(&self) -> bool {
        self.head < self.entries.len()
    }

    /// Return the next pending entry and advance the head.
    pub fn redo(&mut self) -> Option<ReplayEntry> {
        let entry = *self.entries.get(self.head)?;
        self.head += 1;
        Some(entry)
    }

    /// Move the head to the start, keeping every entry pending.
    pub fn rewind(&mut self) {
        self.head = 0;
    }

    /// Forget everything, including the taint.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Entries applied so far, oldest first.
    pub fn applied(&self) -> &[ReplayEntry] {
        &self.entries[..self.head]
    }

    /// Every entry, applied or pending.
    pub fn entries(&self) -> &[ReplayEntry] {
        &self.entries
    }

    /// Head position.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Total entries, applied or pending.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
