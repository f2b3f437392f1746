use std::fmt::Debug;
use std::sync::Arc;

use crate::boundary::RenderError;
use crate::gate::Store;
use crate::view::{Theme, View};

/// What a screen sees while rendering
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub store: &'a Store,
}

/// A top-level screen reachable from the navigation root
pub trait Screen: Send + Sync + Debug {
    /// Route name
    fn name(&self) -> &str;
    fn render(&self, ctx: &RenderContext<'_>) -> Result<View, RenderError>;
}

/// Navigation container that renders the current route's screen.
#[derive(Debug, Clone)]
pub struct NavigationRoot {
    routes: Vec<Arc<dyn Screen>>,
    current: String,
}

impl NavigationRoot {
    /// The first screen is also the initial route.
    pub fn new(initial: Arc<dyn Screen>) -> Self {
        let current = initial.name().to_string();
        Self { routes: vec![initial], current }
    }

    pub fn with_route(mut self, screen: Arc<dyn Screen>) -> Self {
        self.routes.push(screen);
        self
    }

    pub fn current_route(&self) -> &str {
        &self.current
    }

    pub fn route_names(&self) -> Vec<&str> {
        self.routes.iter().map(|s| s.name()).collect()
    }

    /// Switch routes. An unknown route fails at the next render.
    pub fn navigate(&mut self, route: impl Into<String>) {
        self.current = route.into();
    }

    pub fn render(&self, ctx: &RenderContext<'_>) -> Result<View, RenderError> {
        let screen = self
            .routes
            .iter()
            .find(|s| s.name() == self.current)
            .ok_or_else(|| RenderError::UnknownRoute(self.current.clone()))?;
        Ok(View::element(
            "NavigationRoot",
            vec![View::element("ScreenContainer", vec![screen.render(ctx)?])],
        ))
    }
}
