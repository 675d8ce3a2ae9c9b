use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Borders;

/// Scroll policy when the focused row changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollPolicy {
    KeepInView,
    CenterOnSelect,
}

/// Visual settings of the list widget.
#[derive(Clone)]
pub struct ExpandableListStyle<'a> {
    pub title: Option<Line<'a>>,
    pub block_style: Style,
    pub border_style: Style,
    pub highlight_style: Style,
    pub icon_style: Style,
    pub childless_style: Style,
    pub highlight_symbol: &'a str,
    pub borders: Borders,
    pub scroll_policy: ScrollPolicy,
}

impl Default for ExpandableListStyle<'_> {
    fn default() -> Self {
        Self {
            title: None,
            block_style: Style::default(),
            border_style: Style::default(),
            highlight_style: Style::default(),
            icon_style: Style::default(),
            childless_style: Style::default(),
            highlight_symbol: ">> ",
            borders: Borders::ALL,
            scroll_policy: ScrollPolicy::KeepInView,
        }
    }
}
