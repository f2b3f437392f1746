use crate::kernel::lifecycle::AppLifecyclePhase;

/// Events published by the bootstrap orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The lifecycle phase changed
    PhaseChanged { from: AppLifecyclePhase, to: AppLifecyclePhase },
    /// A service finished initializing
    ServiceInitialized { service: String },
    /// A service failed to initialize (or timed out)
    ServiceInitializationFailed { service: String, error: String },
    /// The platform splash was dismissed
    SplashHidden,
    /// The platform splash refused to hide
    SplashHideFailed { error: String },
    /// A service cleaned up
    ServiceCleanedUp { service: String },
    /// A service cleanup failed; teardown continued
    ServiceCleanupFailed { service: String, error: String },
}

impl LifecycleEvent {
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleEvent::PhaseChanged { .. } => "lifecycle.phase_changed",
            LifecycleEvent::ServiceInitialized { .. } => "service.initialized",
            LifecycleEvent::ServiceInitializationFailed { .. } => "service.initialization_failed",
            LifecycleEvent::SplashHidden => "splash.hidden",
            LifecycleEvent::SplashHideFailed { .. } => "splash.hide_failed",
            LifecycleEvent::ServiceCleanedUp { .. } => "service.cleaned_up",
            LifecycleEvent::ServiceCleanupFailed { .. } => "service.cleanup_failed",
        }
    }

    /// Whether this event reports a contained failure.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            LifecycleEvent::ServiceInitializationFailed { .. }
                | LifecycleEvent::SplashHideFailed { .. }
                | LifecycleEvent::ServiceCleanupFailed { .. }
        )
    }
}
