//! Presentation session state machine.
//!
//! The form UI is a thin mirror of this machine: one phase, one result
//! slot, one copy-confirmation toggle. All transitions happen through a
//! single owner, so there is never more than one generation in flight.

use crate::ConceptBrief;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where the session currently is.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No result, nothing in flight.
    #[default]
    Idle,

    /// A generation request is outstanding.
    Generating,

    /// A brief is on screen.
    Displayed,
}

/// Single-user presentation state: phase, result slot, copied toggle.
#[derive(Debug, Clone, Default)]
pub struct Session {
    phase: Phase,
    brief: Option<ConceptBrief>,
    copied: bool,
}

impl Session {
    /// Create a fresh idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The most recent brief, if any.
    pub fn brief(&self) -> Option<&ConceptBrief> {
        self.brief.as_ref()
    }

    /// Whether the copy-confirmation flag is set.
    pub fn copied(&self) -> bool {
        self.copied
    }

    /// Accept a submission.
    ///
    /// Returns `false` without touching any state while a generation is
    /// already in flight; submissions are guarded by this single flag, not
    /// queued.
    pub fn begin(&mut self) -> bool {
        if self.phase == Phase::Generating {
            debug!("submission ignored: a generation is already in flight");
            return false;
        }
        self.phase = Phase::Generating;
        true
    }

    /// Store a freshly generated brief, replacing any prior one wholesale.
    pub fn complete(&mut self, brief: ConceptBrief) {
        debug!("generation complete: {}", brief.promotion_name);
        self.brief = Some(brief);
        self.phase = Phase::Displayed;
    }

    /// Discard the failed attempt.
    ///
    /// The result slot keeps its prior value, so a failed regeneration
    /// returns to `Displayed` with the old brief still available.
    pub fn fail(&mut self) {
        debug!("generation failed, returning to the prior phase");
        self.phase = if self.brief.is_some() {
            Phase::Displayed
        } else {
            Phase::Idle
        };
    }

    /// Flag that the brief was just copied to the clipboard.
    pub fn mark_copied(&mut self) {
        self.copied = true;
    }

    /// Clear the copy-confirmation flag.
    pub fn reset_copied(&mut self) {
        self.copied = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Copywriting, LayoutSection};

    fn sample_brief(name: &str) -> ConceptBrief {
        ConceptBrief {
            promotion_name: name.to_string(),
            concept_summary: "Clean and refreshing".to_string(),
            layout: vec![LayoutSection {
                section_name: "Hero".to_string(),
                visual_description: "blue gradient".to_string(),
                copy: "Feel Fresh".to_string(),
            }],
            copywriting: Copywriting {
                main_copy: "Feel the Splash".to_string(),
                sub_copy: "Cool water, every day".to_string(),
                keywords: vec!["clean".to_string(), "citrus".to_string()],
            },
            director_notes: "Use cool tones".to_string(),
        }
    }

    #[test]
    fn success_path_reaches_displayed() {
        let mut session = Session::new();
        assert_eq!(session.phase(), Phase::Idle);

        assert!(session.begin());
        assert_eq!(session.phase(), Phase::Generating);

        session.complete(sample_brief("Summer Splash"));
        assert_eq!(session.phase(), Phase::Displayed);
        assert_eq!(
            session.brief().map(|b| b.promotion_name.as_str()),
            Some("Summer Splash")
        );
    }

    #[test]
    fn first_failure_returns_to_idle_with_no_brief() {
        let mut session = Session::new();
        assert!(session.begin());
        session.fail();

        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.brief().is_none());
    }

    #[test]
    fn failed_regeneration_keeps_the_previous_brief() {
        let mut session = Session::new();
        assert!(session.begin());
        session.complete(sample_brief("Summer Splash"));

        assert!(session.begin());
        session.fail();

        assert_eq!(session.phase(), Phase::Displayed);
        assert_eq!(
            session.brief().map(|b| b.promotion_name.as_str()),
            Some("Summer Splash")
        );
    }

    #[test]
    fn resubmission_while_generating_is_refused() {
        let mut session = Session::new();
        assert!(session.begin());
        assert!(!session.begin());
        assert_eq!(session.phase(), Phase::Generating);
        assert!(session.brief().is_none());
    }

    #[test]
    fn a_new_success_replaces_the_old_brief() {
        let mut session = Session::new();
        assert!(session.begin());
        session.complete(sample_brief("Summer Splash"));

        assert!(session.begin());
        session.complete(sample_brief("Winter Warmth"));

        assert_eq!(
            session.brief().map(|b| b.promotion_name.as_str()),
            Some("Winter Warmth")
        );
    }

    #[test]
    fn copied_toggle_is_independent_of_phase() {
        let mut session = Session::new();
        session.mark_copied();
        assert!(session.copied());

        assert!(session.begin());
        assert!(session.copied());

        session.reset_copied();
        assert!(!session.copied());
        assert_eq!(session.phase(), Phase::Generating);
    }
}
