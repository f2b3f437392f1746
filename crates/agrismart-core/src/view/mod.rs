//! # Headless view tree
//!
//! Views are plain values produced by render functions. The bootstrap core
//! only cares about *which* subtree is shown (loading, content or fallback),
//! so a small element tree is enough to observe every gating rule.
pub mod composition;
pub mod navigation;
pub mod screens;
pub mod theme;

use std::fmt::Write;

pub use composition::RootComposition;
pub use navigation::{NavigationRoot, RenderContext, Screen};
pub use screens::HomeScreen;
pub use theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Named container with children
    Element { name: String, children: Vec<View> },
    Text(String),
    Button(String),
    /// Placeholder shown while the persistence gate is closed
    Loading(String),
    /// Static view substituted by the error boundary
    Fallback { title: String, message: String },
}

impl View {
    pub fn element(name: impl Into<String>, children: Vec<View>) -> Self {
        View::Element { name: name.into(), children }
    }

    pub fn text(text: impl Into<String>) -> Self {
        View::Text(text.into())
    }

    /// Visit this view and every descendant, depth first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a View)) {
        visit(self);
        if let View::Element { children, .. } = self {
            for child in children {
                child.walk(visit);
            }
        }
    }

    pub fn find_element(&self, element_name: &str) -> Option<&View> {
        let mut found = None;
        self.walk(&mut |view| {
            if found.is_none() && matches!(view, View::Element { name, .. } if name == element_name) {
                found = Some(view);
            }
        });
        found
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        let mut hit = false;
        self.walk(&mut |view| {
            hit |= match view {
                View::Text(t) | View::Button(t) | View::Loading(t) => t.contains(needle),
                View::Fallback { title, message } => title.contains(needle) || message.contains(needle),
                View::Element { .. } => false,
            };
        });
        hit
    }

    pub fn shows_loading(&self) -> bool {
        let mut hit = false;
        self.walk(&mut |view| hit |= matches!(view, View::Loading(_)));
        hit
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, View::Fallback { .. })
    }

    /// Indented outline, one node per line.
    pub fn render_to_string(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0);
        out
    }

    fn write_outline(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        // Writing to a String cannot fail.
        let _ = match self {
            View::Element { name, .. } => writeln!(out, "{}<{}>", indent, name),
            View::Text(text) => writeln!(out, "{}{}", indent, text),
            View::Button(label) => writeln!(out, "{}[{}]", indent, label),
            View::Loading(message) => writeln!(out, "{}(loading) {}", indent, message),
            View::Fallback { title, message } => writeln!(out, "{}!! {}: {}", indent, title, message),
        };
        if let View::Element { children, .. } = self {
            for child in children {
                child.write_outline(out, depth + 1);
            }
        }
    }
}
