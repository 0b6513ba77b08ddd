use eframe::egui;

/// Color schemes the `colorscheme` command can switch to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// `None` for names without a built-in scheme
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn apply(self, ctx: &egui::Context) {
        let visuals = match self {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        };
        ctx.set_visuals(visuals);
    }

    pub fn dim_text(self) -> egui::Color32 {
        match self {
            Theme::Dark => egui::Color32::GRAY,
            Theme::Light => egui::Color32::DARK_GRAY,
        }
    }

    pub fn error_text(self) -> egui::Color32 {
        match self {
            Theme::Dark => egui::Color32::LIGHT_RED,
            Theme::Light => egui::Color32::RED,
        }
    }
}

// --- Sizing ---
pub const ICON_COL_WIDTH: f32 = 30.0;
pub const ROW_HEIGHT: f32 = 24.0;
pub const HEADER_HEIGHT: f32 = 20.0;
pub const PARENT_DEFAULT: f32 = 200.0;
pub const DETAILS_DEFAULT: f32 = 280.0;

// --- Timing ---
/// Window in which a second `D` confirms a removal
pub const CONFIRM_WINDOW_SECS: u64 = 3;

pub fn truncated_label(ui: &mut egui::Ui, text: impl Into<egui::WidgetText>) -> egui::Response {
    ui.add(egui::Label::new(text).truncate())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_names() {
        assert_eq!(Theme::from_name("dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_name("Light"), Some(Theme::Light));
        assert_eq!(Theme::from_name("solarized"), None);
    }
}
