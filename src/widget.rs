use ratatui::layout::{Constraint, Rect};
use ratatui::prelude::Buffer;
use ratatui::widgets::{
    Block, Borders, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Table,
};

use crate::context::ItemRowContext;
use crate::dom::ListDocument;
use crate::glyphs::{IconGlyphs, item_label_cell};
use crate::list::ExpandableList;
use crate::node::NodeState;
use crate::state::ExpandableListViewState;
use crate::style::ExpandableListStyle;

/// Renders an attached list: one row per visible item, icon glyph first.
pub struct ExpandableListView<'a> {
    list: &'a ExpandableList,
    doc: &'a ListDocument,
    style: ExpandableListStyle<'a>,
    glyphs: IconGlyphs<'a>,
}

impl<'a> ExpandableListView<'a> {
    pub const fn new(
        list: &'a ExpandableList,
        doc: &'a ListDocument,
        style: ExpandableListStyle<'a>,
    ) -> Self {
        Self {
            list,
            doc,
            style,
            glyphs: IconGlyphs::unicode(),
        }
    }

    pub const fn glyphs(mut self, glyphs: IconGlyphs<'a>) -> Self {
        self.glyphs = glyphs;
        self
    }

    fn build_rows(&self, state: &ExpandableListViewState) -> Vec<Row<'a>> {
        let config = self.list.config();
        let mut rows = Vec::with_capacity(state.rows().len());
        for row in state.rows() {
            let icon = row.icon().map_or("", |icon| {
                self.glyphs
                    .for_source(&config.icons, self.doc.attr(icon, "src"))
            });
            let childless = NodeState::of(self.doc, row.item(), &config.class_names)
                == Some(NodeState::Childless);
            let ctx = ItemRowContext {
                depth: row.depth(),
                icon,
                icon_style: if childless {
                    self.style.childless_style
                } else {
                    self.style.icon_style
                },
                is_focused: row.icon().is_some() && row.icon() == state.focused(),
            };
            let label = self.doc.text_content(row.item());
            rows.push(Row::new([item_label_cell(&ctx, label, &self.glyphs)]));
        }
        rows
    }

    fn render_scrollbar(
        area: Rect,
        buf: &mut Buffer,
        state: &ExpandableListViewState,
        inner_height: usize,
        scroll_rows: usize,
    ) {
        let scroll_len = scroll_rows.saturating_add(1);
        let position = state
            .table_state()
            .offset()
            .min(scroll_len.saturating_sub(1));
        let mut scrollbar_state = ScrollbarState::new(scroll_len)
            .position(position)
            .viewport_content_length(inner_height);
        Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .render(area, buf, &mut scrollbar_state);
    }
}

impl StatefulWidget for ExpandableListView<'_> {
    type State = ExpandableListViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.refresh(self.list, self.doc);

        let mut block = Block::default().borders(self.style.borders);
        if let Some(title) = self.style.title.clone() {
            block = block.title(title);
        }
        block = block
            .style(self.style.block_style)
            .border_style(self.style.border_style);

        let inner_height = block.inner(area).height as usize;
        state.ensure_selection_visible_with_policy(inner_height, self.style.scroll_policy);

        let total_rows = state.rows().len();
        let scroll_rows = total_rows.saturating_sub(inner_height);
        let rows = self.build_rows(state);

        let (table_area, table_block, scrollbar_area) = if scroll_rows > 0 {
            let table_area = Rect {
                width: area.width.saturating_sub(1),
                ..area
            };
            let scrollbar_area = Rect {
                x: area.x + area.width.saturating_sub(1),
                y: area.y,
                width: 1,
                height: area.height,
            };
            let mut table_borders = self.style.borders;
            table_borders.remove(Borders::RIGHT);
            (table_area, block.borders(table_borders), Some(scrollbar_area))
        } else {
            (area, block, None)
        };
        state.set_rows_area(table_block.inner(table_area));

        let table = Table::new(rows, [Constraint::Fill(1)])
            .style(self.style.block_style)
            .block(table_block)
            .row_highlight_style(self.style.highlight_style)
            .highlight_symbol(self.style.highlight_symbol);
        table.render(table_area, buf, state.table_state_mut());

        if let Some(scrollbar_area) = scrollbar_area {
            Self::render_scrollbar(scrollbar_area, buf, state, inner_height, scroll_rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup;

    fn setup(markup: &str) -> (ListDocument, ExpandableList) {
        let mut doc = markup::parse(markup).unwrap();
        let container = doc.children(doc.root())[0];
        let list = ExpandableList::attach(&mut doc, container, Default::default());
        (doc, list)
    }

    fn line(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn renders_visible_items_with_icon_glyphs() {
        let (doc, list) = setup(
            r#"<ul><li class="expanded">Docs<ul><li>Guide</li></ul></li><li>Blog<ul><li>Post</li></ul></li></ul>"#,
        );
        let style = ExpandableListStyle {
            borders: Borders::NONE,
            ..ExpandableListStyle::default()
        };
        let widget = ExpandableListView::new(&list, &doc, style).glyphs(IconGlyphs::ascii());
        let mut state = ExpandableListViewState::new();

        let area = Rect::new(0, 0, 20, 4);
        let mut buffer = Buffer::empty(area);
        widget.render(area, &mut buffer, &mut state);

        assert_eq!(line(&buffer, 0), "[-] Docs");
        assert_eq!(line(&buffer, 1), "   *  Guide");
        assert_eq!(line(&buffer, 2), "[+] Blog");
        assert_eq!(line(&buffer, 3), "");
    }

    #[test]
    fn render_smoke_with_scrollbar() {
        let items: String = (0..12).map(|idx| format!("<li>node-{idx}</li>")).collect();
        let (doc, list) = setup(&format!(
            r#"<ul><li class="expanded">root<ul>{items}</ul></li></ul>"#
        ));
        let widget = ExpandableListView::new(&list, &doc, ExpandableListStyle::default());
        let mut state = ExpandableListViewState::new();
        state.refresh(&list, &doc);
        let root_icon = state.icon_at_row(0).unwrap();
        assert!(state.focus(&list, &doc, root_icon));

        let area = Rect::new(0, 0, 20, 6);
        let mut buffer = Buffer::empty(area);
        widget.render(area, &mut buffer, &mut state);

        assert_eq!(state.rows().len(), 13);
        assert_eq!(state.icon_at(1, 1), Some(root_icon));
    }
}
