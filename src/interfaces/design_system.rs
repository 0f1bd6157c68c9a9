use eframe::egui;

/// Dark design system with gold accents
pub struct DesignSystem;

impl DesignSystem {
    // --- Colors ---

    // Backgrounds
    pub const BG_WINDOW: egui::Color32 = egui::Color32::from_rgb(18, 16, 12); // #12100C
    pub const BG_PANEL: egui::Color32 = egui::Color32::from_rgb(18, 16, 12);
    pub const BG_CARD: egui::Color32 = egui::Color32::from_rgb(30, 27, 22); // #1E1B16
    pub const BG_INPUT: egui::Color32 = egui::Color32::from_rgb(24, 22, 18);

    // Accents
    pub const ACCENT_GOLD: egui::Color32 = egui::Color32::from_rgb(255, 215, 0); // #FFD700
    pub const ACCENT_GOLD_DARK: egui::Color32 = egui::Color32::from_rgb(218, 165, 32); // #DAA520

    // Status
    pub const SUCCESS: egui::Color32 = egui::Color32::from_rgb(0, 230, 118);
    pub const DANGER: egui::Color32 = egui::Color32::from_rgb(255, 23, 68);
    pub const WARNING: egui::Color32 = egui::Color32::from_rgb(255, 145, 0);

    // Text
    pub const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(245, 240, 230);
    pub const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_gray(160);
    pub const TEXT_MUTED: egui::Color32 = egui::Color32::from_gray(100);

    // Borders
    pub const BORDER_SUBTLE: egui::Color32 = egui::Color32::from_rgb(60, 54, 42);

    // --- Metrics ---

    pub const ROUNDING_MEDIUM: f32 = 8.0;

    pub const SPACING_SMALL: f32 = 8.0;
    pub const SPACING_MEDIUM: f32 = 16.0;
    pub const SPACING_LARGE: f32 = 24.0;

    // --- Styles ---

    /// Returns the standard visual style for the application
    pub fn theme() -> egui::Visuals {
        let mut visuals = egui::Visuals::dark();

        visuals.window_fill = Self::BG_WINDOW;
        visuals.panel_fill = Self::BG_PANEL;
        visuals.extreme_bg_color = Self::BG_INPUT;

        visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, Self::BORDER_SUBTLE);
        visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, Self::TEXT_PRIMARY);

        visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, Self::TEXT_SECONDARY);
        visuals.widgets.inactive.weak_bg_fill = Self::BG_CARD;
        visuals.widgets.inactive.bg_fill = Self::BG_CARD;

        visuals.widgets.active.bg_fill = Self::ACCENT_GOLD_DARK;

        visuals.selection.bg_fill = Self::ACCENT_GOLD.linear_multiply(0.3);
        visuals.selection.stroke = egui::Stroke::new(1.0, Self::ACCENT_GOLD);

        visuals
    }

    /// Standard Card Styling
    pub fn card_frame() -> egui::Frame {
        egui::Frame::NONE
            .fill(Self::BG_CARD)
            .corner_radius(Self::ROUNDING_MEDIUM)
            .stroke(egui::Stroke::new(1.0, Self::BORDER_SUBTLE))
            .inner_margin(Self::SPACING_MEDIUM as i8)
    }

    /// Gold call-to-action button
    pub fn primary_button(text: &str) -> egui::Button<'_> {
        egui::Button::new(
            egui::RichText::new(text)
                .size(16.0)
                .strong()
                .color(egui::Color32::BLACK),
        )
        .fill(Self::ACCENT_GOLD)
        .corner_radius(Self::ROUNDING_MEDIUM)
        .min_size(egui::vec2(160.0, 36.0))
    }
}
