use crate::boundary::{ErrorBoundary, RenderError, RenderFallback};
use crate::kernel::constants;
use crate::view::View;

#[test]
fn test_passes_through_successful_render() {
    let mut boundary = ErrorBoundary::default();
    let view = boundary.render(|| Ok(View::text("ok")));
    assert_eq!(view, View::text("ok"));
    assert!(!boundary.has_failed());
    assert!(boundary.captured().is_none());
}

#[test]
fn test_returned_error_renders_fallback() {
    let mut boundary = ErrorBoundary::default();
    let view = boundary.render(|| Err(RenderError::component("FeatureCard", "missing icon")));

    assert_eq!(
        view,
        View::Fallback {
            title: constants::FALLBACK_TITLE.to_string(),
            message: constants::FALLBACK_MESSAGE.to_string(),
        }
    );
    let captured = boundary.captured().unwrap();
    assert_eq!(captured.component.as_deref(), Some("FeatureCard"));
    assert!(captured.message.contains("missing icon"));
}

#[test]
fn test_panic_is_contained() {
    let mut boundary = ErrorBoundary::new(View::text("custom fallback"));
    let view = boundary.render(|| panic!("index out of bounds"));

    assert_eq!(view, View::text("custom fallback"));
    assert_eq!(
        boundary.captured(),
        Some(&RenderFallback { component: None, message: "render panicked: index out of bounds".to_string() })
    );
}

#[test]
fn test_fallback_persists_for_rest_of_mount() {
    let mut boundary = ErrorBoundary::default();
    boundary.render(|| Err(RenderError::UnknownRoute("Weather".to_string())));

    let mut called = false;
    let view = boundary.render(|| {
        called = true;
        Ok(View::text("recovered"))
    });
    assert!(view.is_fallback());
    assert!(!called, "subtree is not rendered again after a failure");
    assert_eq!(boundary.captured().unwrap().component.as_deref(), Some("NavigationRoot"));
}
