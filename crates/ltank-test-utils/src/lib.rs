//! Test fixtures and presenter doubles for ltank development.
//!
//! [`fixtures`] builds the standard scenario levels used across the
//! engine, replay and bench tests. [`RecordingPresenter`] captures every
//! presentation call behind a shared handle so tests can inspect what a
//! session emitted after handing the presenter away.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::{Arc, Mutex, MutexGuard};

use ltank_core::{Presenter, SoundEvent};

/// Everything a [`RecordingPresenter`] has seen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PresenterLog {
    pub sounds: Vec<SoundEvent>,
    pub dialogs: Vec<String>,
    pub dirty_floors: Vec<u8>,
}

/// A [`Presenter`] that records calls. Clones share one log.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    log: Arc<Mutex<PresenterLog>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A boxed clone sharing this presenter's log, ready for
    /// `GameSession::with_presenter`.
    pub fn boxed(&self) -> Box<dyn Presenter> {
        Box::new(self.clone())
    }

    fn lock(&self) -> MutexGuard<'_, PresenterLog> {
        // A panicking test thread must not hide what was recorded.
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of the log.
    pub fn snapshot(&self) -> PresenterLog {
        self.lock().clone()
    }

    pub fn sounds(&self) -> Vec<SoundEvent> {
        self.lock().sounds.clone()
    }

    pub fn dialogs(&self) -> Vec<String> {
        self.lock().dialogs.clone()
    }

    pub fn heard(&self, event: SoundEvent) -> bool {
        self.lock().sounds.contains(&event)
    }

    pub fn clear(&self) {
        *self.lock() = PresenterLog::default();
    }
}

impl Presenter for RecordingPresenter {
    fn play_sound(&mut self, event: SoundEvent) {
        self.lock().sounds.push(event);
    }

    fn show_dialog(&mut self, text: &str) {
        self.lock().dialogs.push(text.to_string());
    }

    fn mark_dirty(&mut self, floor: u8) {
        self.lock().dirty_floors.push(floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_log() {
        let presenter = RecordingPresenter::new();
        let mut boxed = presenter.boxed();
        boxed.play_sound(SoundEvent::Laser);
        boxed.show_dialog("hello");
        assert!(presenter.heard(SoundEvent::Laser));
        assert_eq!(presenter.dialogs(), vec!["hello".to_string()]);
        presenter.clear();
        assert!(presenter.sounds().is_empty());
    }
}
