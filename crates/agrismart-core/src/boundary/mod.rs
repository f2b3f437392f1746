//! # Error Boundary
//!
//! Containment wrapper around the whole view tree. The first failure while
//! rendering, whether a returned [`RenderError`] or a panic, is captured as
//! a [`RenderFallback`] and from then on only the fallback view is rendered
//! for the rest of the mount. Failures of the asynchronous service channel
//! never reach the boundary.
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

use crate::kernel::constants;
use crate::utils::panic_message;
use crate::view::View;

/// Failure raised while building or updating the view tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("component '{component}' failed to render: {message}")]
    ComponentFailed { component: String, message: String },

    #[error("route '{0}' is not registered")]
    UnknownRoute(String),

    #[error("render panicked: {0}")]
    Panicked(String),
}

impl RenderError {
    pub fn component(component: impl Into<String>, message: impl Into<String>) -> Self {
        RenderError::ComponentFailed { component: component.into(), message: message.into() }
    }

    /// Name of the offending subtree, when known.
    pub fn component_name(&self) -> Option<&str> {
        match self {
            RenderError::ComponentFailed { component, .. } => Some(component),
            RenderError::UnknownRoute(_) => Some("NavigationRoot"),
            RenderError::Panicked(_) => None,
        }
    }
}

/// Failure captured by the boundary. Kept until the app restarts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFallback {
    pub component: Option<String>,
    pub message: String,
}

impl From<&RenderError> for RenderFallback {
    fn from(error: &RenderError) -> Self {
        RenderFallback {
            component: error.component_name().map(str::to_string),
            message: error.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct ErrorBoundary {
    fallback_view: View,
    captured: Option<RenderFallback>,
}

impl Default for ErrorBoundary {
    fn default() -> Self {
        Self::new(View::Fallback {
            title: constants::FALLBACK_TITLE.to_string(),
            message: constants::FALLBACK_MESSAGE.to_string(),
        })
    }
}

impl ErrorBoundary {
    pub fn new(fallback_view: View) -> Self {
        Self { fallback_view, captured: None }
    }

    /// Render `subtree`, or the fallback if it (or an earlier render) failed.
    pub fn render<F>(&mut self, subtree: F) -> View
    where
        F: FnOnce() -> Result<View, RenderError>,
    {
        if self.captured.is_some() {
            return self.fallback_view.clone();
        }

        let error = match panic::catch_unwind(AssertUnwindSafe(subtree)) {
            Ok(Ok(view)) => return view,
            Ok(Err(error)) => error,
            Err(payload) => RenderError::Panicked(panic_message(&*payload)),
        };
        log::error!("Render failure contained by error boundary: {}", error);
        self.captured = Some(RenderFallback::from(&error));
        self.fallback_view.clone()
    }

    pub fn has_failed(&self) -> bool {
        self.captured.is_some()
    }

    pub fn captured(&self) -> Option<&RenderFallback> {
        self.captured.as_ref()
    }
}

#[cfg(test)]
mod tests;
