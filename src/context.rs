use ratatui::style::Style;

/// Per-row data handed to the label builder.
#[derive(Clone, Copy)]
pub struct ItemRowContext<'a> {
    pub depth: u16,
    /// Glyph resolved from the icon's current source.
    pub icon: &'a str,
    pub icon_style: Style,
    /// Row holds the icon with keyboard focus.
    pub is_focused: bool,
}
