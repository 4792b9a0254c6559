//! Wizard session core — screen state machine, session record, controller.

pub mod controller;
pub mod model;
pub mod screen;

pub use controller::{StepOutcome, WizardController};
pub use model::{CAPTURE_FILENAME, CapturedImage, ConsentForm, GeneratedImage, Session};
pub use screen::{PendingJob, Screen};
