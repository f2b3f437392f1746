use crate::view::View;

/// Colour palette handed to every screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub primary: &'static str,
    pub on_primary: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "agrismart-light",
            primary: "#4CAF50",
            on_primary: "#FFFFFF",
            background: "#F5F5F5",
            surface: "#FFFFFF",
            text_primary: "#333333",
            text_secondary: "#666666",
        }
    }
}

impl Theme {
    /// Wrap `child` in the theme provider node.
    pub fn provide(&self, child: View) -> View {
        View::element(format!("ThemeProvider({})", self.name), vec![child])
    }
}
