use std::fmt::Debug;

use crate::kernel::error::Result;

/// Platform launch placeholder that is dismissed once startup settles.
pub trait SplashScreen: Send + Sync + Debug {
    /// Dismiss the splash. Called at most once per mount.
    fn hide(&self) -> Result<()>;

    /// Whether the platform has a splash concept at all.
    fn is_supported(&self) -> bool {
        true
    }
}

/// Splash for platforms without one. Hiding is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSplash;

impl SplashScreen for NoSplash {
    fn hide(&self) -> Result<()> {
        Ok(())
    }

    fn is_supported(&self) -> bool {
        false
    }
}

/// Splash that only records the dismissal in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSplash;

impl SplashScreen for LoggingSplash {
    fn hide(&self) -> Result<()> {
        log::info!("Splash screen hidden");
        Ok(())
    }
}

/// Fire-and-forget dismissal. Returns whether the splash reported success;
/// a failure is logged and never surfaced further.
pub(crate) fn dismiss(splash: &dyn SplashScreen) -> std::result::Result<(), String> {
    if !splash.is_supported() {
        log::debug!("Platform has no splash screen; nothing to hide");
        return Ok(());
    }
    splash.hide().map_err(|e| {
        log::warn!("Failed to hide splash screen: {}", e);
        e.to_string()
    })
}
