//! Wizard screen state machine — tracks which screen the visitor is on.

use serde::{Deserialize, Serialize};

/// The five screens of the kiosk wizard.
///
/// Progresses linearly: Consent → Capture → Pending → ProfileResult →
/// Pending → TalentResult. A failed generation call falls back from
/// Pending to the screen that initiated it, and reset returns to Consent
/// from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Consent,
    Capture,
    Pending,
    ProfileResult,
    TalentResult,
}

impl Screen {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: Screen) -> bool {
        use Screen::*;
        // Reset is allowed from any screen.
        if target == Consent {
            return true;
        }
        matches!(
            (self, target),
            (Consent, Capture)
                | (Capture, Pending)
                | (Pending, ProfileResult)
                | (Pending, Capture)
                | (ProfileResult, Pending)
                | (Pending, TalentResult)
        )
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::Consent
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Consent => "consent",
            Self::Capture => "capture",
            Self::Pending => "pending",
            Self::ProfileResult => "profile_result",
            Self::TalentResult => "talent_result",
        };
        write!(f, "{s}")
    }
}

/// Which generation call is in flight while the wizard sits on
/// [`Screen::Pending`].
///
/// Tracking this is what lets a failure return to the screen that
/// initiated the call instead of a fixed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingJob {
    ProfileGeneration,
    TalentGeneration,
}

impl PendingJob {
    /// Screen shown when the call succeeds.
    pub fn success_screen(&self) -> Screen {
        match self {
            Self::ProfileGeneration => Screen::ProfileResult,
            Self::TalentGeneration => Screen::TalentResult,
        }
    }

    /// Screen to fall back to when the call fails.
    pub fn fallback_screen(&self) -> Screen {
        match self {
            Self::ProfileGeneration => Screen::Capture,
            Self::TalentGeneration => Screen::ProfileResult,
        }
    }
}

impl std::fmt::Display for PendingJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ProfileGeneration => "profile_generation",
            Self::TalentGeneration => "talent_generation",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use Screen::*;
        let transitions = [
            (Consent, Capture),
            (Capture, Pending),
            (Pending, ProfileResult),
            (Pending, Capture),
            (ProfileResult, Pending),
            (Pending, TalentResult),
        ];
        for (from, to) in transitions {
            assert!(
                from.can_transition_to(to),
                "{from} should transition to {to}"
            );
        }
    }

    #[test]
    fn reset_allowed_from_any_screen() {
        use Screen::*;
        for from in [Consent, Capture, Pending, ProfileResult, TalentResult] {
            assert!(from.can_transition_to(Consent), "{from} should reset");
        }
    }

    #[test]
    fn invalid_transitions() {
        use Screen::*;
        // Skip screens
        assert!(!Consent.can_transition_to(Pending));
        assert!(!Consent.can_transition_to(ProfileResult));
        assert!(!Capture.can_transition_to(ProfileResult));
        assert!(!Capture.can_transition_to(TalentResult));
        assert!(!ProfileResult.can_transition_to(TalentResult));
        // Go backward (other than reset)
        assert!(!ProfileResult.can_transition_to(Capture));
        assert!(!TalentResult.can_transition_to(ProfileResult));
        assert!(!TalentResult.can_transition_to(Pending));
        // Self-transition
        assert!(!Capture.can_transition_to(Capture));
    }

    #[test]
    fn default_is_consent() {
        assert_eq!(Screen::default(), Screen::Consent);
    }

    #[test]
    fn display_matches_serde() {
        use Screen::*;
        for screen in [Consent, Capture, Pending, ProfileResult, TalentResult] {
            let display = format!("{screen}");
            let json = serde_json::to_string(&screen).unwrap();
            // JSON wraps in quotes
            assert_eq!(
                format!("\"{display}\""),
                json,
                "Display and serde should match for {screen:?}"
            );
        }
    }

    #[test]
    fn pending_job_screens() {
        assert_eq!(
            PendingJob::ProfileGeneration.success_screen(),
            Screen::ProfileResult
        );
        assert_eq!(
            PendingJob::ProfileGeneration.fallback_screen(),
            Screen::Capture
        );
        assert_eq!(
            PendingJob::TalentGeneration.success_screen(),
            Screen::TalentResult
        );
        assert_eq!(
            PendingJob::TalentGeneration.fallback_screen(),
            Screen::ProfileResult
        );
    }

    #[test]
    fn pending_transitions_cover_both_jobs() {
        for job in [PendingJob::ProfileGeneration, PendingJob::TalentGeneration] {
            assert!(Screen::Pending.can_transition_to(job.success_screen()));
            assert!(Screen::Pending.can_transition_to(job.fallback_screen()));
        }
    }
}
