use std::fmt;

/// Lifecycle phase of one application instance.
///
/// Owned by the [`BootstrapOrchestrator`](crate::kernel::bootstrap::BootstrapOrchestrator).
/// The only transitions are `Uninitialized → Initializing` on mount and
/// `Initializing → Ready | InitializationFailed` once every service settled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AppLifecyclePhase {
    /// Not mounted yet
    #[default]
    Uninitialized,
    /// Service initialization in flight
    Initializing,
    /// Every service initialized successfully
    Ready,
    /// At least one service failed; the app runs degraded
    InitializationFailed,
}

impl AppLifecyclePhase {
    /// Whether the initialization attempt has settled (either outcome).
    pub fn is_settled(&self) -> bool {
        matches!(self, AppLifecyclePhase::Ready | AppLifecyclePhase::InitializationFailed)
    }

    /// Whether `next` is a legal successor of this phase.
    pub fn can_transition_to(&self, next: AppLifecyclePhase) -> bool {
        use AppLifecyclePhase::*;
        matches!(
            (self, next),
            (Uninitialized, Initializing) | (Initializing, Ready) | (Initializing, InitializationFailed)
        )
    }
}

impl fmt::Display for AppLifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AppLifecyclePhase::Uninitialized => "Uninitialized",
            AppLifecyclePhase::Initializing => "Initializing",
            AppLifecyclePhase::Ready => "Ready",
            AppLifecyclePhase::InitializationFailed => "InitializationFailed",
        };
        f.write_str(name)
    }
}
