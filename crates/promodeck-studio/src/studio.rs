//! The single state owner behind the web API.
//!
//! Every handler goes through one `Studio`, which owns the session state
//! machine, the generation backend, and the copy-confirmation reset timer.

use promodeck_core::{
    BriefExporter, BriefGenerator, BriefRequest, ConceptBrief, Phase, Result, Session,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

/// Serializable snapshot of the session, as the UI sees it.
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    /// Current phase of the session.
    pub phase: Phase,
    /// The most recent brief, if any.
    pub brief: Option<ConceptBrief>,
    /// Whether the copy-confirmation flag is set.
    pub copied: bool,
}

/// Owns the session and coordinates the generation and copy flows.
pub struct Studio {
    generator: Arc<dyn BriefGenerator>,
    exporter: BriefExporter,
    session: Arc<RwLock<Session>>,
    copy_reset: Duration,
    copy_reset_task: Mutex<Option<JoinHandle<()>>>,
}

impl Studio {
    /// Create a studio around a generation backend.
    ///
    /// `copy_reset` is how long the copy-confirmation flag stays set.
    pub fn new(generator: Arc<dyn BriefGenerator>, copy_reset: Duration) -> Self {
        Self {
            generator,
            exporter: BriefExporter::new(),
            session: Arc::new(RwLock::new(Session::new())),
            copy_reset,
            copy_reset_task: Mutex::new(None),
        }
    }

    /// Current phase, result and copied flag.
    pub async fn snapshot(&self) -> StateSnapshot {
        let session = self.session.read().await;
        StateSnapshot {
            phase: session.phase(),
            brief: session.brief().cloned(),
            copied: session.copied(),
        }
    }

    /// Run one generation for an already validated request.
    ///
    /// Returns `Ok(None)` when the submission is refused because a
    /// generation is already in flight; no second request is issued.
    /// Failures restore the prior phase and keep the prior brief.
    pub async fn generate(&self, request: BriefRequest) -> Result<Option<ConceptBrief>> {
        {
            let mut session = self.session.write().await;
            if !session.begin() {
                return Ok(None);
            }
        }

        let attempt = Uuid::new_v4();
        info!(
            %attempt,
            backend = self.generator.name(),
            period = %request.period,
            creativity = request.creativity,
            "generation started"
        );

        match self.generator.generate(&request).await {
            Ok(brief) => {
                info!(%attempt, "generation succeeded: {}", brief.promotion_name);
                let mut session = self.session.write().await;
                session.complete(brief.clone());
                Ok(Some(brief))
            }
            Err(err) => {
                warn!(%attempt, "generation failed: {err}");
                let mut session = self.session.write().await;
                session.fail();
                Err(err)
            }
        }
    }

    /// Serialize the current brief for the clipboard and arm the reset timer.
    ///
    /// Returns `Ok(None)` when there is no brief to copy. The confirmation
    /// flag is set immediately and cleared again after the configured delay;
    /// re-copying restarts the delay.
    pub async fn copy_text(&self) -> Result<Option<String>> {
        let text = {
            let mut session = self.session.write().await;
            let Some(brief) = session.brief() else {
                return Ok(None);
            };
            let text = self.exporter.render(brief)?;
            session.mark_copied();
            text
        };

        self.arm_copy_reset().await;
        Ok(Some(text))
    }

    /// (Re)spawn the deferred reset of the copied flag.
    ///
    /// The task holds only a weak reference to the session, so a studio torn
    /// down before the delay elapses is never touched; the pending task is
    /// also aborted outright on drop and on re-copy.
    async fn arm_copy_reset(&self) {
        let mut slot = self.copy_reset_task.lock().await;
        if let Some(previous) = slot.take() {
            previous.abort();
        }

        let session = Arc::downgrade(&self.session);
        let delay = self.copy_reset;
        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(session) = session.upgrade() {
                session.write().await.reset_copied();
            }
        }));
    }
}

impl Drop for Studio {
    fn drop(&mut self) {
        // Nothing else can hold the lock during teardown.
        if let Ok(mut slot) = self.copy_reset_task.try_lock() {
            if let Some(task) = slot.take() {
                task.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use promodeck_core::{Copywriting, LayoutSection, MockGenerator, PromodeckError};
    use std::sync::atomic::{AtomicUsize, Ordering};

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

    fn request() -> BriefRequest {
        BriefRequest::new("summer", "fine bubbles", 5).unwrap()
    }

    fn studio_with(generator: impl BriefGenerator + 'static) -> Studio {
        Studio::new(Arc::new(generator), Duration::from_millis(25))
    }

    /// Counts calls and sleeps before answering, to keep a request in flight.
    struct SlowGenerator {
        brief: ConceptBrief,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl BriefGenerator for SlowGenerator {
        fn name(&self) -> &str {
            "slow"
        }

        async fn generate(&self, _request: &BriefRequest) -> Result<ConceptBrief> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(self.brief.clone())
        }
    }

    /// Succeeds on the first call, fails on every later one.
    struct OnceGenerator {
        brief: ConceptBrief,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl BriefGenerator for OnceGenerator {
        fn name(&self) -> &str {
            "once"
        }

        async fn generate(&self, _request: &BriefRequest) -> Result<ConceptBrief> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(self.brief.clone())
            } else {
                Err(PromodeckError::NetworkError("connection reset".to_string()))
            }
        }
    }

    #[tokio::test]
    async fn successful_generation_stores_the_brief() {
        let studio = studio_with(MockGenerator::with_brief(sample_brief("Summer Splash")));
        assert_eq!(studio.snapshot().await.phase, Phase::Idle);

        let brief = studio.generate(request()).await.unwrap().unwrap();
        assert_eq!(brief, sample_brief("Summer Splash"));

        let snapshot = studio.snapshot().await;
        assert_eq!(snapshot.phase, Phase::Displayed);
        assert_eq!(snapshot.brief, Some(sample_brief("Summer Splash")));
    }

    #[tokio::test]
    async fn failed_first_generation_returns_to_idle() {
        let studio = studio_with(MockGenerator::failing());

        let err = studio.generate(request()).await.unwrap_err();
        assert!(matches!(err, PromodeckError::ProviderError(_)));

        let snapshot = studio.snapshot().await;
        assert_eq!(snapshot.phase, Phase::Idle);
        assert!(snapshot.brief.is_none());
    }

    #[tokio::test]
    async fn failed_regeneration_keeps_the_previous_brief() {
        let studio = studio_with(OnceGenerator {
            brief: sample_brief("Summer Splash"),
            calls: AtomicUsize::new(0),
        });

        studio.generate(request()).await.unwrap();
        let err = studio.generate(request()).await.unwrap_err();
        assert!(matches!(err, PromodeckError::NetworkError(_)));

        let snapshot = studio.snapshot().await;
        assert_eq!(snapshot.phase, Phase::Displayed);
        assert_eq!(snapshot.brief, Some(sample_brief("Summer Splash")));
    }

    #[tokio::test]
    async fn resubmission_while_in_flight_issues_no_second_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let studio = Arc::new(studio_with(SlowGenerator {
            brief: sample_brief("Summer Splash"),
            calls: Arc::clone(&calls),
        }));

        let first = {
            let studio = Arc::clone(&studio);
            tokio::spawn(async move { studio.generate(request()).await })
        };

        // Let the first submission take the in-flight guard.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(studio.snapshot().await.phase, Phase::Generating);

        let second = studio.generate(request()).await.unwrap();
        assert!(second.is_none());

        let first = first.await.unwrap().unwrap();
        assert!(first.is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(studio.snapshot().await.phase, Phase::Displayed);
    }

    #[tokio::test]
    async fn copy_sets_the_flag_and_resets_after_the_delay() {
        let studio = studio_with(MockGenerator::with_brief(sample_brief("Summer Splash")));
        studio.generate(request()).await.unwrap();

        let text = studio.copy_text().await.unwrap().unwrap();
        assert!(text.contains("[Promotion] Summer Splash"));
        assert!(studio.snapshot().await.copied);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!studio.snapshot().await.copied);
    }

    #[tokio::test]
    async fn recopy_restarts_the_reset_delay() {
        let studio = Studio::new(
            Arc::new(MockGenerator::with_brief(sample_brief("Summer Splash"))),
            Duration::from_millis(80),
        );
        studio.generate(request()).await.unwrap();

        studio.copy_text().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        studio.copy_text().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        // 100ms after the first copy, but only 50ms after the second.
        assert!(studio.snapshot().await.copied);

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(!studio.snapshot().await.copied);
    }

    #[tokio::test]
    async fn copy_without_a_brief_is_refused() {
        let studio = studio_with(MockGenerator::failing());
        assert!(studio.copy_text().await.unwrap().is_none());
        assert!(!studio.snapshot().await.copied);
    }
}
