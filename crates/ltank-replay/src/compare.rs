//! Trace comparison for replay verification.
//!
//! A trace is the sequence of `(status, digest)` pairs of the history
//! frames an action sequence produced. Replaying a recording against the
//! level's initial state must yield the same trace.

use std::fmt;

use ltank_core::HistoryStatus;

/// One history frame, reduced to what determinism checks compare.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEntry {
    /// What the frame consumed.
    pub status: HistoryStatus,
    /// Arena digest after the frame.
    pub digest: u64,
}

/// How two traces first differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DivergenceKind {
    /// Different ammunition classification.
    Status {
        /// From the original session.
        recorded: HistoryStatus,
        /// From the replay.
        replayed: HistoryStatus,
    },
    /// Same classification, different arena.
    Digest {
        /// From the original session.
        recorded: u64,
        /// From the replay.
        replayed: u64,
    },
    /// One trace ended early.
    Length {
        /// Frames in the original session.
        recorded: usize,
        /// Frames in the replay.
        replayed: usize,
    },
}

/// The first point at which two traces differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DivergenceReport {
    /// Frame index of the divergence.
    pub index: usize,
    /// What differs.
    pub kind: DivergenceKind,
}

impl fmt::Display for DivergenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DivergenceKind::Status { recorded, replayed } => write!(
                f,
                "frame {}: status {recorded} recorded, {replayed} replayed",
                self.index
            ),
            DivergenceKind::Digest { recorded, replayed } => write!(
                f,
                "frame {}: digest {recorded:#018x} recorded, {replayed:#018x} replayed",
                self.index
            ),
            DivergenceKind::Length { recorded, replayed } => write!(
                f,
                "frame {}: {recorded} frames recorded, {replayed} replayed",
                self.index
            ),
        }
    }
}

/// Find the first divergence between two traces, or `None` when they
/// are identical.
pub fn compare_traces(recorded: &[TraceEntry], replayed: &[TraceEntry]) -> Option<DivergenceReport> {
    for (index, (rec, rep)) in recorded.iter().zip(replayed).enumerate() {
        if rec.status != rep.status {
            return Some(DivergenceReport {
                index,
                kind: DivergenceKind::Status {
                    recorded: rec.status,
                    replayed: rep.status,
                },
            });
        }
        if rec.digest != rep.digest {
            return Some(DivergenceReport {
                index,
                kind: DivergenceKind::Digest {
                    recorded: rec.digest,
                    replayed: rep.digest,
                },
            });
        }
    }
    (recorded.len() != replayed.len()).then(|| DivergenceReport {
        index: recorded.len().min(replayed.len()),
        kind: DivergenceKind::Length {
            recorded: recorded.len(),
            replayed: replayed.len(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(status: HistoryStatus, digest: u64) -> TraceEntry {
        TraceEntry { status, digest }
    }

    #[test]
    fn identical_traces_match() {
        let t = [entry(HistoryStatus::plain(), 1), entry(HistoryStatus::laser(), 2)];
        assert_eq!(compare_traces(&t, &t), None);
    }

    #[test]
    fn status_checked_before_digest() {
        let a = [entry(HistoryStatus::plain(), 1)];
        let b = [entry(HistoryStatus::laser(), 9)];
        let report = compare_traces(&a, &b).unwrap();
        assert!(matches!(report.kind, DivergenceKind::Status { .. }));
        assert_eq!(report.index, 0);
    }

    #[test]
    fn length_mismatch_reported_at_end() {
        let a = [entry(HistoryStatus::plain(), 1), entry(HistoryStatus::plain(), 2)];
        let report = compare_traces(&a, &a[..1]).unwrap();
        assert_eq!(report.index, 1);
        assert_eq!(
            report.kind,
            DivergenceKind::Length {
                recorded: 2,
                replayed: 1
            }
        );
        assert!(report.to_string().contains("2 frames recorded"));
    }
}
