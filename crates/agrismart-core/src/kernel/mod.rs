//! # AgriSmart Core Kernel
//!
//! The `kernel` module owns application startup and shutdown.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Bootstrap Orchestration**: [`BootstrapOrchestrator`](bootstrap::BootstrapOrchestrator)
//!   initializes every [`ServiceHandle`](service::ServiceHandle) once per mount, hides the
//!   splash when the attempt settled, and cleans up in reverse order on unmount.
//! - **Lifecycle Phase**: [`AppLifecyclePhase`](lifecycle::AppLifecyclePhase) and its legal transitions.
//! - **Application**: [`Application`](application::Application) wires the orchestrator, the
//!   persistence gate and the root view composition into one instance.
//! - **Splash**: the platform [`SplashScreen`](splash::SplashScreen) seam.
//! - **Error Handling**: kernel [`Error`](error::Error) and `Result` alias.
pub mod application;
pub mod bootstrap;
pub mod constants;
pub mod error;
pub mod lifecycle;
pub mod service;
pub mod splash;

pub use application::{Application, ApplicationBuilder, default_services};
pub use bootstrap::{BootstrapOrchestrator, BootstrapOptions, InitReport, InitStrategy, ServiceOutcome, TeardownReport};
pub use error::{Error, KernelLifecyclePhase, Result};
pub use lifecycle::AppLifecyclePhase;
pub use service::{ServiceHandle, ServiceRegistry};
pub use splash::{LoggingSplash, NoSplash, SplashScreen};

// Test module declaration
#[cfg(test)]
mod tests;
