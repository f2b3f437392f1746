use std::sync::Arc;

use crate::boundary::ErrorBoundary;
use crate::gate::PersistenceGate;
use crate::view::{NavigationRoot, RenderContext, Theme, View};

/// Static nesting of the root tree:
/// error boundary → store provider → persistence gate → theme provider →
/// navigation root → screen container.
///
/// The real tree is shown only once the app mounted and the gate hydrated.
/// Service readiness plays no part here.
#[derive(Debug)]
pub struct RootComposition {
    boundary: ErrorBoundary,
    gate: Arc<PersistenceGate>,
    theme: Theme,
    navigation: NavigationRoot,
    mounted: bool,
}

impl RootComposition {
    pub fn new(gate: Arc<PersistenceGate>, navigation: NavigationRoot) -> Self {
        Self {
            boundary: ErrorBoundary::default(),
            gate,
            theme: Theme::default(),
            navigation,
            mounted: false,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_boundary(mut self, boundary: ErrorBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn mark_mounted(&mut self) {
        self.mounted = true;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn boundary(&self) -> &ErrorBoundary {
        &self.boundary
    }

    pub fn navigation_mut(&mut self) -> &mut NavigationRoot {
        &mut self.navigation
    }

    pub fn render(&mut self) -> View {
        let Self { boundary, gate, theme, navigation, mounted } = self;
        let gate: &PersistenceGate = gate;
        let theme: &Theme = theme;
        let navigation: &NavigationRoot = navigation;
        let mounted = *mounted;

        boundary.render(|| {
            let gated = if mounted {
                gate.render(|store| {
                    let ctx = RenderContext { theme, store };
                    Ok(theme.provide(navigation.render(&ctx)?))
                })?
            } else {
                gate.loading_view().clone()
            };
            Ok(View::element(
                "StoreProvider",
                vec![View::element("PersistGate", vec![gated])],
            ))
        })
    }
}
