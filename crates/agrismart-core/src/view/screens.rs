use crate::boundary::RenderError;
use crate::kernel::constants;
use crate::view::{RenderContext, Screen, View};

/// `(icon, title, description)` of each home screen feature card
pub const FEATURES: [(&str, &str, &str); 4] = [
    ("🔬", "Disease Detection", "AI-powered crop health monitoring"),
    ("💧", "Smart Irrigation", "Optimize water usage"),
    ("📊", "Market Intelligence", "Real-time price predictions"),
    ("🗣️", "Voice Interface", "Available in multiple languages"),
];

/// Landing screen with the feature overview.
#[derive(Debug, Default, Clone, Copy)]
pub struct HomeScreen;

impl HomeScreen {
    fn feature_card(icon: &str, title: &str, description: &str) -> View {
        View::element(
            "FeatureCard",
            vec![View::text(icon), View::text(title), View::text(description)],
        )
    }
}

impl Screen for HomeScreen {
    fn name(&self) -> &str {
        "Home"
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<View, RenderError> {
        // A restored profile name personalizes the greeting.
        let welcome = match ctx.store.get("profile").as_ref().and_then(|p| p.get("name")).and_then(|n| n.as_str()) {
            Some(name) => format!("Welcome back, {}", name),
            None => format!("Welcome to {}", constants::APP_NAME),
        };

        let header = View::element(
            "Header",
            vec![
                View::text(format!("🌾 {}", constants::APP_NAME)),
                View::text(constants::APP_TAGLINE),
            ],
        );
        let features = View::element(
            "Features",
            FEATURES.iter().map(|(icon, title, desc)| Self::feature_card(icon, title, desc)).collect(),
        );
        let content = View::element(
            "Content",
            vec![
                View::text(welcome),
                View::text("Empowering rural farmers through AI technology"),
                features,
                View::Button("Get Started".to_string()),
            ],
        );
        let footer = View::element(
            "Footer",
            vec![View::text(format!("Built with ❤️ by {}", constants::APP_AUTHOR))],
        );

        Ok(View::element(self.name(), vec![header, content, footer]))
    }
}
