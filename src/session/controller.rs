//! Wizard controller — drives screen transitions for one kiosk session.

use std::sync::Arc;

use crate::error::SessionError;
use crate::gateway::GenerationGateway;

use super::model::{CapturedImage, Session};
use super::screen::{PendingJob, Screen};

/// Result of a controller event that involved a generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Screen the wizard landed on.
    pub screen: Screen,
    /// Diagnostic surfaced to the visitor when the call failed.
    pub error: Option<String>,
}

/// Drives the five-screen wizard for a single kiosk session.
///
/// Owns the [`Session`] record outright; all mutation happens through
/// these methods on one logical thread, so no locking is needed. The
/// only suspension points are the two generation calls, during which the
/// session sits on [`Screen::Pending`] and no other event can fire
/// (the async methods take `&mut self`).
///
/// Gateway failures are data, not errors: the wizard falls back to the
/// screen that initiated the call and the diagnostic is surfaced in the
/// [`StepOutcome`] and `session.last_error`. `Err` is returned only when
/// the caller fires an event the current screen does not accept.
pub struct WizardController {
    session: Session,
    gateway: Arc<dyn GenerationGateway>,
}

impl WizardController {
    pub fn new(gateway: Arc<dyn GenerationGateway>) -> Self {
        Self {
            session: Session::new(),
            gateway,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn screen(&self) -> Screen {
        self.session.screen
    }

    /// Grant or revoke the personal-data consent item.
    pub fn set_personal_data_consent(&mut self, granted: bool) {
        self.session.consent.personal_data = granted;
    }

    /// Grant or revoke the likeness-rights consent item.
    pub fn set_likeness_consent(&mut self, granted: bool) {
        self.session.consent.likeness_rights = granted;
    }

    /// Consent → Capture. Rejected unless both consent items are granted.
    pub fn agree(&mut self) -> Result<Screen, SessionError> {
        if self.session.screen != Screen::Consent {
            return Err(self.invalid_event("agree"));
        }
        if !self.session.consent.all_granted() {
            return Err(SessionError::ConsentRequired);
        }
        self.transition(Screen::Capture);
        Ok(self.session.screen)
    }

    /// Capture → Pending → ProfileResult, or back to Capture on failure.
    ///
    /// Stores the confirmed photo and awaits profile generation.
    pub async fn confirm_photo(
        &mut self,
        image: CapturedImage,
    ) -> Result<StepOutcome, SessionError> {
        if self.session.screen != Screen::Capture {
            return Err(self.invalid_event("confirm_photo"));
        }
        self.session.captured_image = Some(image);
        Ok(self.run_generation(PendingJob::ProfileGeneration).await)
    }

    /// ProfileResult → Pending → TalentResult, or back to ProfileResult
    /// on failure. Reuses the stored capture.
    pub async fn next_step(&mut self) -> Result<StepOutcome, SessionError> {
        if self.session.screen != Screen::ProfileResult {
            return Err(self.invalid_event("next_step"));
        }
        if self.session.captured_image.is_none() {
            return Err(SessionError::MissingCapture);
        }
        Ok(self.run_generation(PendingJob::TalentGeneration).await)
    }

    /// Return to the consent screen from anywhere, discarding all progress.
    pub fn reset(&mut self) {
        tracing::info!(session = %self.session.id, "Session reset");
        self.session.reset();
    }

    /// Run one generation call: enter Pending, await the gateway, then
    /// land on the job's success or fallback screen.
    ///
    /// Caller guarantees a captured photo is present. No retry and no
    /// cancellation: the call runs to completion or failure.
    async fn run_generation(&mut self, job: PendingJob) -> StepOutcome {
        // Cloned so the gateway call does not hold a borrow of the
        // session across the await.
        let photo = match self.session.captured_image.clone() {
            Some(photo) => photo,
            None => {
                return StepOutcome {
                    screen: self.session.screen,
                    error: Some(SessionError::MissingCapture.to_string()),
                };
            }
        };

        self.session.pending = Some(job);
        self.session.last_error = None;
        self.transition(Screen::Pending);

        let gateway = Arc::clone(&self.gateway);
        let result = match job {
            PendingJob::ProfileGeneration => gateway.generate_profile(&photo).await,
            PendingJob::TalentGeneration => gateway.generate_talent(&photo).await,
        };

        self.session.pending = None;
        match result {
            Ok(artifact) => {
                match job {
                    PendingJob::ProfileGeneration => {
                        self.session.profile_image = Some(artifact);
                    }
                    PendingJob::TalentGeneration => {
                        self.session.talent_image = Some(artifact);
                    }
                }
                self.transition(job.success_screen());
                StepOutcome {
                    screen: self.session.screen,
                    error: None,
                }
            }
            Err(e) => {
                let message = e.user_message();
                tracing::warn!(%job, %message, "Generation call failed");
                self.transition(job.fallback_screen());
                self.session.last_error = Some(message.clone());
                StepOutcome {
                    screen: self.session.screen,
                    error: Some(message),
                }
            }
        }
    }

    fn transition(&mut self, target: Screen) {
        debug_assert!(
            self.session.screen.can_transition_to(target),
            "invalid transition {} -> {target}",
            self.session.screen
        );
        tracing::info!(from = %self.session.screen, to = %target, "Screen transition");
        self.session.screen = target;
    }

    fn invalid_event(&self, event: &'static str) -> SessionError {
        SessionError::InvalidEvent {
            event,
            screen: self.session.screen,
        }
    }
}
