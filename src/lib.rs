//! Photo Kiosk — core of a walk-up photo-booth experience.
//!
//! A visitor works through a linear wizard (consent → webcam capture →
//! submit-and-wait → two AI-generated result screens) driven by the
//! [`session::WizardController`], which talks to the image-generation
//! backend through the [`gateway::GenerationGateway`] boundary.

pub mod config;
pub mod error;
pub mod gateway;
pub mod session;
