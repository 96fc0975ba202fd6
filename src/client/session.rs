//! Session-local UI state: what is displayed, what is in flight, and the
//! capped gallery of past generations.
//!
//! Nothing here is persisted; a session's history dies with the process,
//! the same way the browser page loses its gallery on reload.

use crate::models::Animal;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use uuid::Uuid;

/// Most recent successful generations retained per session.
pub const HISTORY_CAP: usize = 10;

/// Single-flight state for the generate action.
///
/// This is a UI-level deterrent, not a lock: the API client underneath will
/// issue concurrent requests if driven directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    Idle,
    InFlight,
}

/// One successful generation. Entries are never mutated after creation.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub url: String,
    pub phrase: String,
    pub animal: Animal,
    pub created_at: DateTime<Local>,
}

#[derive(Debug)]
pub struct StudioSession {
    phase: GenerationPhase,
    displayed: Option<String>,
    history: VecDeque<HistoryEntry>,
}

impl StudioSession {
    pub fn new() -> Self {
        Self {
            phase: GenerationPhase::Idle,
            displayed: None,
            history: VecDeque::with_capacity(HISTORY_CAP),
        }
    }

    pub fn phase(&self) -> GenerationPhase {
        self.phase
    }

    pub fn displayed_url(&self) -> Option<&str> {
        self.displayed.as_deref()
    }

    /// History entries, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Entry at `index` counting from the most recent.
    pub fn entry(&self, index: usize) -> Option<&HistoryEntry> {
        self.history.get(index)
    }

    /// The history entry behind the currently displayed image, if any.
    pub fn displayed_entry(&self) -> Option<&HistoryEntry> {
        let displayed = self.displayed.as_deref()?;
        self.history.iter().find(|entry| entry.url == displayed)
    }

    /// Whether the generate action is currently allowed for this input.
    pub fn can_generate(&self, phrase: &str, animal: Option<Animal>) -> bool {
        self.phase == GenerationPhase::Idle && !phrase.trim().is_empty() && animal.is_some()
    }

    /// Enter the in-flight state, clearing any previously displayed image.
    /// Refuses while another generation is in flight.
    pub fn try_begin(&mut self) -> bool {
        if self.phase == GenerationPhase::InFlight {
            return false;
        }
        self.phase = GenerationPhase::InFlight;
        self.displayed = None;
        true
    }

    /// Record a successful generation: display it and prepend it to the
    /// history, evicting the oldest entry beyond [`HISTORY_CAP`].
    pub fn complete_success(&mut self, phrase: String, animal: Animal, url: String) -> Uuid {
        let id = Uuid::new_v4();
        self.phase = GenerationPhase::Idle;
        self.displayed = Some(url.clone());
        self.history.push_front(HistoryEntry {
            id,
            url,
            phrase,
            animal,
            created_at: Local::now(),
        });
        self.history.truncate(HISTORY_CAP);
        id
    }

    /// Return to idle after a failed generation. The display stays cleared
    /// and the history is untouched.
    pub fn complete_failure(&mut self) {
        self.phase = GenerationPhase::Idle;
    }

    /// Re-display a past entry without issuing any request.
    pub fn select(&mut self, id: Uuid) -> bool {
        match self.history.iter().find(|entry| entry.id == id) {
            Some(entry) => {
                self.displayed = Some(entry.url.clone());
                true
            }
            None => false,
        }
    }
}

impl Default for StudioSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Local filename for a downloaded image: the animal, a dash, and the
/// phrase with whitespace runs collapsed to dashes.
pub fn download_filename(animal: Animal, phrase: &str) -> String {
    let slug = phrase.split_whitespace().collect::<Vec<_>>().join("-");
    format!("{}-{}.jpg", animal, slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn success(session: &mut StudioSession, phrase: &str) -> Uuid {
        session.complete_success(
            phrase.to_string(),
            Animal::Cat,
            format!("https://img.test/{}.jpg", phrase),
        )
    }

    #[test]
    fn test_history_cap_and_order() {
        let mut session = StudioSession::new();

        for i in 0..11 {
            assert!(session.try_begin());
            success(&mut session, &format!("phrase-{}", i));
        }

        assert_eq!(session.history_len(), HISTORY_CAP);

        // Most-recent-first, and the first generation is gone.
        let phrases: Vec<&str> = session
            .history()
            .map(|entry| entry.phrase.as_str())
            .collect();
        assert_eq!(phrases[0], "phrase-10");
        assert_eq!(phrases[9], "phrase-1");
        assert!(!phrases.contains(&"phrase-0"));
    }

    #[test]
    fn test_try_begin_clears_display_and_refuses_second_flight() {
        let mut session = StudioSession::new();
        assert!(session.try_begin());
        success(&mut session, "hello");
        assert!(session.displayed_url().is_some());

        assert!(session.try_begin());
        assert_eq!(session.phase(), GenerationPhase::InFlight);
        assert_eq!(session.displayed_url(), None);

        // Guard refuses while in flight.
        assert!(!session.try_begin());
    }

    #[test]
    fn test_failure_keeps_display_cleared_and_history_intact() {
        let mut session = StudioSession::new();
        assert!(session.try_begin());
        success(&mut session, "hello");

        assert!(session.try_begin());
        session.complete_failure();

        assert_eq!(session.phase(), GenerationPhase::Idle);
        assert_eq!(session.displayed_url(), None);
        assert_eq!(session.history_len(), 1);
    }

    #[test]
    fn test_select_redisplays_without_touching_history() {
        let mut session = StudioSession::new();
        session.try_begin();
        let first = success(&mut session, "first");
        session.try_begin();
        success(&mut session, "second");

        assert!(session.select(first));
        assert_eq!(
            session.displayed_url(),
            Some("https://img.test/first.jpg")
        );
        assert_eq!(session.history_len(), 2);
        assert_eq!(session.displayed_entry().unwrap().phrase, "first");

        assert!(!session.select(Uuid::new_v4()));
    }

    #[test]
    fn test_can_generate_guard() {
        let mut session = StudioSession::new();

        assert!(session.can_generate("YOLO", Some(Animal::Cat)));
        assert!(!session.can_generate("", Some(Animal::Cat)));
        assert!(!session.can_generate("   ", Some(Animal::Cat)));
        assert!(!session.can_generate("YOLO", None));

        session.try_begin();
        assert!(!session.can_generate("YOLO", Some(Animal::Cat)));
    }

    #[test]
    fn test_download_filename_collapses_whitespace() {
        assert_eq!(
            download_filename(Animal::Cat, "hello  world again"),
            "cat-hello-world-again.jpg"
        );
        assert_eq!(download_filename(Animal::Wolf, "YOLO"), "wolf-YOLO.jpg");
    }
}
