use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Cell;

use crate::config::StateIcons;
use crate::context::ItemRowContext;

/// Terminal stand-ins for the icon images.
#[derive(Clone, Copy)]
pub struct IconGlyphs<'a> {
    pub indent: &'a str,
    pub expanded: &'a str,
    pub contracted: &'a str,
    pub childless: &'a str,
    /// Shown when the icon source matches none of the configured icons.
    pub unknown: &'a str,
}

impl IconGlyphs<'static> {
    pub const fn unicode() -> Self {
        Self {
            indent: "  ",
            expanded: "⊟",
            contracted: "⊞",
            childless: "•",
            unknown: "?",
        }
    }

    pub const fn ascii() -> Self {
        Self {
            indent: "  ",
            expanded: "[-]",
            contracted: "[+]",
            childless: " * ",
            unknown: " ? ",
        }
    }
}

impl<'a> IconGlyphs<'a> {
    /// Picks the glyph for an icon from its `src` attribute.
    ///
    /// The icon is what the user sees, so the glyph follows `src` rather than the item class.
    pub fn for_source(&self, icons: &StateIcons, src: Option<&str>) -> &'a str {
        match src {
            Some(src) if src == icons.expanded => self.expanded,
            Some(src) if src == icons.contracted => self.contracted,
            Some(src) if src == icons.childless => self.childless,
            _ => self.unknown,
        }
    }
}

/// Builds one row: indentation, icon glyph, item text. A focused icon is drawn reversed.
pub fn item_label_line<'a>(
    ctx: &ItemRowContext<'a>,
    label: impl Into<Span<'a>>,
    glyphs: &IconGlyphs<'a>,
) -> Line<'a> {
    let mut spans = Vec::with_capacity(ctx.depth as usize + 3);
    for _ in 0..ctx.depth {
        spans.push(Span::raw(glyphs.indent));
    }
    if !ctx.icon.is_empty() {
        let icon_style = if ctx.is_focused {
            ctx.icon_style.add_modifier(Modifier::REVERSED)
        } else {
            ctx.icon_style
        };
        spans.push(Span::styled(ctx.icon, icon_style));
        spans.push(Span::raw(" "));
    }
    spans.push(label.into());
    Line::from(spans)
}

pub fn item_label_cell<'a>(
    ctx: &ItemRowContext<'a>,
    label: impl Into<Span<'a>>,
    glyphs: &IconGlyphs<'a>,
) -> Cell<'a> {
    Cell::from(item_label_line(ctx, label, glyphs))
}
