pub mod boundary;
pub mod event;
pub mod gate;
pub mod kernel;
pub mod services;
pub mod storage;
pub mod utils;
pub mod view;

// Re-export key public types/traits for easier use by the binary
pub use kernel::{Application, AppLifecyclePhase, BootstrapOrchestrator, ServiceHandle, ServiceRegistry};
pub use kernel::error::Error as KernelError;
pub use boundary::{ErrorBoundary, RenderError};
pub use event::{LifecycleEvent, SharedEventDispatcher};
pub use gate::{HydrationSource, PersistenceGate};
pub use storage::AppConfig;
pub use view::View;
