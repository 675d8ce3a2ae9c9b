use ratatui::layout::{Position, Rect};
use ratatui::widgets::TableState;
use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::action::{IgnoreReason, ListEvent, Trigger};
use crate::dom::{ListDocument, NodeId};
use crate::list::ExpandableList;
use crate::style::ScrollPolicy;

#[cfg(feature = "keymap")]
use std::time::Instant;

#[cfg(feature = "keymap")]
use crate::keymap::{KeyInput, ListKeyBindings};
#[cfg(feature = "keymap")]
use crate::longpress::LongPressDetector;
#[cfg(feature = "keymap")]
use crossterm::event::{KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

/// A rendered item row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleItem {
    pub(crate) item: NodeId,
    pub(crate) icon: Option<NodeId>,
    pub(crate) depth: u16,
}

impl VisibleItem {
    pub const fn item(&self) -> NodeId {
        self.item
    }

    pub const fn icon(&self) -> Option<NodeId> {
        self.icon
    }

    pub const fn depth(&self) -> u16 {
        self.depth
    }
}

/// View state: rendered rows, keyboard focus and scroll position.
///
/// Expand/contract state lives in the document; this only caches what is on screen.
pub struct ExpandableListViewState {
    table_state: TableState,
    rows: Vec<VisibleItem>,
    // Icon -> row, for focus-to-selection sync.
    row_of_icon: FxHashMap<NodeId, usize>,
    focused: Option<NodeId>,
    // Row area of the last render, for hit testing.
    rows_area: Rect,
    #[cfg(feature = "keymap")]
    keymap: ListKeyBindings,
    #[cfg(feature = "keymap")]
    long_press: LongPressDetector,
}

impl Default for ExpandableListViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpandableListViewState {
    pub fn new() -> Self {
        Self {
            table_state: TableState::default(),
            rows: Vec::new(),
            row_of_icon: FxHashMap::with_hasher(FxBuildHasher),
            focused: None,
            rows_area: Rect::default(),
            #[cfg(feature = "keymap")]
            keymap: ListKeyBindings::new(),
            #[cfg(feature = "keymap")]
            long_press: LongPressDetector::default(),
        }
    }

    #[cfg(feature = "keymap")]
    /// Returns a mutable reference to the key binding set.
    pub const fn keymap_mut(&mut self) -> &mut ListKeyBindings {
        &mut self.keymap
    }

    #[cfg(feature = "keymap")]
    /// Returns a mutable reference to the long-press detector fed by mouse events.
    pub const fn long_press_mut(&mut self) -> &mut LongPressDetector {
        &mut self.long_press
    }

    pub(crate) const fn table_state(&self) -> &TableState {
        &self.table_state
    }

    pub(crate) const fn table_state_mut(&mut self) -> &mut TableState {
        &mut self.table_state
    }

    pub(crate) const fn set_rows_area(&mut self, area: Rect) {
        self.rows_area = area;
    }

    /// Rows from the last refresh, top to bottom.
    pub fn rows(&self) -> &[VisibleItem] {
        &self.rows
    }

    pub const fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Rebuilds the rendered rows from the document and repairs focus.
    pub fn refresh(&mut self, list: &ExpandableList, doc: &ListDocument) {
        self.rows.clear();
        self.row_of_icon.clear();

        let container = list.container();
        if doc.is_rendered(container) {
            let mut stack: Vec<(NodeId, u16)> =
                doc.children(container).iter().rev().map(|id| (*id, 0)).collect();
            while let Some((id, depth)) = stack.pop() {
                if doc.is_hidden(id) {
                    continue;
                }
                let is_item = doc.is_tag(id, "li");
                if is_item {
                    let icon = list.icon_of(doc, id);
                    if let Some(icon) = icon {
                        self.row_of_icon.insert(icon, self.rows.len());
                    }
                    self.rows.push(VisibleItem {
                        item: id,
                        icon,
                        depth,
                    });
                }
                let child_depth = if is_item { depth.saturating_add(1) } else { depth };
                stack.extend(doc.children(id).iter().rev().map(|child| (*child, child_depth)));
            }
        }

        self.repair_focus(list, doc);
        self.sync_selection();
    }

    // A focused icon that got hidden hands focus to the nearest visible ancestor icon.
    fn repair_focus(&mut self, list: &ExpandableList, doc: &ListDocument) {
        let Some(icon) = self.focused else {
            return;
        };
        if is_focusable(list, doc, icon) {
            return;
        }
        self.focused = None;
        let mut current = doc.parent(icon);
        while let Some(node) = current {
            if node == list.container() {
                break;
            }
            if let Some(candidate) = list.icon_of(doc, node)
                && is_focusable(list, doc, candidate)
            {
                self.focused = Some(candidate);
                break;
            }
            current = doc.parent(node);
        }
    }

    fn sync_selection(&mut self) {
        let row = self
            .focused
            .and_then(|icon| self.row_of_icon.get(&icon).copied());
        self.table_state.select(row);
    }

    /// Focuses an icon if it can take focus. Returns `true` on success.
    pub fn focus(&mut self, list: &ExpandableList, doc: &ListDocument, icon: NodeId) -> bool {
        if !is_focusable(list, doc, icon) {
            return false;
        }
        self.focused = Some(icon);
        self.sync_selection();
        true
    }

    pub fn blur(&mut self) {
        self.focused = None;
        self.table_state.select(None);
    }

    /// Moves focus to the next focusable icon, wrapping at the end.
    pub fn focus_next(&mut self, list: &ExpandableList, doc: &ListDocument) -> Option<NodeId> {
        self.step_focus(list, doc, true)
    }

    /// Moves focus to the previous focusable icon, wrapping at the start.
    pub fn focus_prev(&mut self, list: &ExpandableList, doc: &ListDocument) -> Option<NodeId> {
        self.step_focus(list, doc, false)
    }

    fn step_focus(
        &mut self,
        list: &ExpandableList,
        doc: &ListDocument,
        forward: bool,
    ) -> Option<NodeId> {
        let order = list.focusable_icons(doc);
        if order.is_empty() {
            self.blur();
            return None;
        }
        let current = self
            .focused
            .and_then(|icon| order.iter().position(|id| *id == icon));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => order.len() - 1,
            (Some(idx), true) => (idx + 1) % order.len(),
            (Some(idx), false) => idx.checked_sub(1).unwrap_or(order.len() - 1),
        };
        self.focused = Some(order[next]);
        self.sync_selection();
        self.focused
    }

    /// Delivers a trigger to the focused icon and refreshes the rows.
    pub fn activate(
        &mut self,
        list: &ExpandableList,
        doc: &mut ListDocument,
        trigger: Trigger,
    ) -> ListEvent {
        let Some(icon) = self.focused else {
            return ListEvent::Ignored(IgnoreReason::NoFocus);
        };
        let event = list.dispatch(doc, icon, trigger);
        self.refresh(list, doc);
        event
    }

    /// Icon on a row of the last refresh.
    pub fn icon_at_row(&self, row: usize) -> Option<NodeId> {
        self.rows.get(row).and_then(|row| row.icon)
    }

    /// Icon under a screen position of the last render.
    pub fn icon_at(&self, column: u16, row: u16) -> Option<NodeId> {
        if !self.rows_area.contains(Position::new(column, row)) {
            return None;
        }
        let index = self.table_state.offset() + usize::from(row - self.rows_area.y);
        self.icon_at_row(index)
    }

    /// Adjusts scroll offset so the focused row is within the viewport.
    pub fn ensure_selection_visible(&mut self, viewport_height: usize) {
        let Some(selected) = self.table_state.selected() else {
            return;
        };
        let viewport_height = viewport_height.max(1);
        let offset = self.table_state.offset();
        if selected < offset {
            *self.table_state.offset_mut() = selected;
        } else if selected >= offset + viewport_height {
            *self.table_state.offset_mut() = selected + 1 - viewport_height;
        }
    }

    /// Adjusts focused-row visibility according to the provided scroll policy.
    pub fn ensure_selection_visible_with_policy(
        &mut self,
        viewport_height: usize,
        policy: ScrollPolicy,
    ) {
        match policy {
            ScrollPolicy::KeepInView => self.ensure_selection_visible(viewport_height),
            ScrollPolicy::CenterOnSelect => self.ensure_selection_visible_centered(viewport_height),
        }
    }

    fn ensure_selection_visible_centered(&mut self, viewport_height: usize) {
        let Some(selected) = self.table_state.selected() else {
            return;
        };
        let viewport_height = viewport_height.max(1);
        let max_offset = self.rows.len().saturating_sub(viewport_height);
        let offset = selected.saturating_sub(viewport_height / 2).min(max_offset);
        *self.table_state.offset_mut() = offset;
    }

    #[cfg(feature = "keymap")]
    /// Resolves a key event: focus keys move focus, everything else is a key-up on the focused
    /// icon. Terminals without keyboard enhancement only report presses, so a press stands in
    /// for the key-up.
    pub fn handle_key(
        &mut self,
        list: &ExpandableList,
        doc: &mut ListDocument,
        key: KeyEvent,
    ) -> ListEvent {
        if key.kind != KeyEventKind::Press {
            return ListEvent::Ignored(IgnoreReason::UnmappedKey);
        }
        let Some(input) = self.keymap.resolve(key) else {
            return ListEvent::Ignored(IgnoreReason::UnmappedKey);
        };
        let moved = match input {
            KeyInput::FocusNext => self.focus_next(list, doc),
            KeyInput::FocusPrev => self.focus_prev(list, doc),
            KeyInput::Key(code) => return self.activate(list, doc, Trigger::KeyUp(code)),
        };
        moved.map_or(
            ListEvent::Ignored(IgnoreReason::NoFocus),
            ListEvent::FocusMoved,
        )
    }

    #[cfg(feature = "keymap")]
    /// Feeds left-button presses over icons to the long-press detector and dispatches the
    /// resolved click. A pressed icon also takes focus when it can.
    pub fn handle_mouse(
        &mut self,
        list: &ExpandableList,
        doc: &mut ListDocument,
        mouse: MouseEvent,
        now: Instant,
    ) -> Option<ListEvent> {
        let target = self.icon_at(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let icon = target?;
                self.focus(list, doc, icon);
                self.long_press.press(icon, now);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(icon) = target else {
                    self.long_press.cancel();
                    return None;
                };
                let press = self.long_press.release(icon, now)?;
                let event = list.dispatch(doc, press.target, press.trigger);
                self.refresh(list, doc);
                Some(event)
            }
            _ => None,
        }
    }

    #[cfg(feature = "keymap")]
    /// Emits a pending long click once the press has been held long enough.
    pub fn tick(
        &mut self,
        list: &ExpandableList,
        doc: &mut ListDocument,
        now: Instant,
    ) -> Option<ListEvent> {
        let press = self.long_press.poll(now)?;
        let event = list.dispatch(doc, press.target, press.trigger);
        self.refresh(list, doc);
        Some(event)
    }
}

fn is_focusable(list: &ExpandableList, doc: &ListDocument, icon: NodeId) -> bool {
    list.is_icon(doc, icon) && doc.attr(icon, "tabindex").is_some() && doc.is_rendered(icon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup;

    const MARKUP: &str = r#"<nav><ul>
        <li class="expanded">Docs<ul><li>Guide</li><li>Reference<ul><li>API</li></ul></li></ul></li>
        <li>Blog</li>
    </ul></nav>"#;

    fn setup() -> (ListDocument, ExpandableList, ExpandableListViewState) {
        let mut doc = markup::parse(MARKUP).unwrap();
        let container = doc.children(doc.root())[0];
        let list = ExpandableList::attach(&mut doc, container, Default::default());
        let mut state = ExpandableListViewState::new();
        state.refresh(&list, &doc);
        (doc, list, state)
    }

    fn labels(doc: &ListDocument, state: &ExpandableListViewState) -> Vec<(String, u16)> {
        state
            .rows()
            .iter()
            .map(|row| (doc.text_content(row.item()), row.depth()))
            .collect()
    }

    #[test]
    fn rows_skip_hidden_sublists() {
        let (doc, _, state) = setup();

        assert_eq!(
            labels(&doc, &state),
            vec![
                ("Docs".to_string(), 0),
                ("Guide".to_string(), 1),
                ("Reference".to_string(), 1),
                ("Blog".to_string(), 0),
            ]
        );
    }

    #[test]
    fn focus_cycles_through_branch_icons() {
        let (doc, list, mut state) = setup();

        let first = state.focus_next(&list, &doc).unwrap();
        assert_eq!(doc.text_content(doc.parent(first).unwrap()), "Docs");
        assert_eq!(state.table_state().selected(), Some(0));

        let second = state.focus_next(&list, &doc).unwrap();
        assert_eq!(doc.text_content(doc.parent(second).unwrap()), "Reference");
        assert_eq!(state.table_state().selected(), Some(2));

        assert_eq!(state.focus_next(&list, &doc), Some(first));
        assert_eq!(state.focus_prev(&list, &doc), Some(second));
    }

    #[test]
    fn activate_expands_and_shows_new_rows() {
        let (mut doc, list, mut state) = setup();
        state.focus_next(&list, &doc);
        state.focus_next(&list, &doc);

        let event = state.activate(&list, &mut doc, Trigger::KeyUp(crate::KeyCode::RIGHT));

        assert!(event.is_handled());
        assert_eq!(state.rows().len(), 5);
        assert_eq!(doc.text_content(state.rows()[3].item()), "API");
    }

    #[test]
    fn focus_moves_to_ancestor_when_hidden() {
        let (mut doc, list, mut state) = setup();
        let docs_icon = state.icon_at_row(0).unwrap();
        let reference_icon = state.icon_at_row(2).unwrap();
        assert!(state.focus(&list, &doc, reference_icon));

        list.dispatch(&mut doc, docs_icon, Trigger::Click);
        state.refresh(&list, &doc);

        assert_eq!(state.focused(), Some(docs_icon));
        assert_eq!(state.rows().len(), 2);
    }

    #[test]
    fn activate_without_focus_is_ignored() {
        let (mut doc, list, mut state) = setup();

        assert_eq!(
            state.activate(&list, &mut doc, Trigger::Click),
            ListEvent::Ignored(IgnoreReason::NoFocus)
        );
    }

    #[test]
    fn childless_icons_cannot_take_focus() {
        let (doc, list, mut state) = setup();
        let guide_icon = state.icon_at_row(1).unwrap();

        assert!(!state.focus(&list, &doc, guide_icon));
        assert_eq!(state.focused(), None);
    }

    #[test]
    fn icon_at_maps_screen_rows() {
        let (_, _, mut state) = setup();
        state.set_rows_area(Rect::new(1, 1, 20, 3));

        assert_eq!(state.icon_at(2, 1), state.icon_at_row(0));
        assert_eq!(state.icon_at(2, 3), state.icon_at_row(2));
        assert_eq!(state.icon_at(0, 1), None);
        assert_eq!(state.icon_at(2, 4), None);
    }

    #[cfg(feature = "keymap")]
    mod input {
        use std::time::Duration;

        use crossterm::event::{KeyCode as TermKey, KeyModifiers};

        use super::*;
        use crate::action::Transition;

        const MS: Duration = Duration::from_millis(1);

        fn setup_on_screen() -> (ListDocument, ExpandableList, ExpandableListViewState) {
            let (doc, list, mut state) = setup();
            state.set_rows_area(Rect::new(0, 0, 20, 4));
            (doc, list, state)
        }

        fn mouse(kind: MouseEventKind, row: u16) -> MouseEvent {
            MouseEvent {
                kind,
                column: 1,
                row,
                modifiers: KeyModifiers::NONE,
            }
        }

        fn key(code: TermKey) -> KeyEvent {
            KeyEvent::new(code, KeyModifiers::NONE)
        }

        #[test]
        fn holding_an_icon_focuses_it_and_folds_the_branch() {
            let (mut doc, list, mut state) = setup_on_screen();
            let start = Instant::now();
            let docs_icon = state.icon_at_row(0).unwrap();
            let docs = doc.parent(docs_icon).unwrap();

            let down = mouse(MouseEventKind::Down(MouseButton::Left), 0);
            assert_eq!(state.handle_mouse(&list, &mut doc, down, start), None);
            assert_eq!(state.focused(), Some(docs_icon));
            assert_eq!(state.tick(&list, &mut doc, start + 100 * MS), None);

            assert_eq!(
                state.tick(&list, &mut doc, start + 600 * MS),
                Some(ListEvent::Handled(Transition::Cascade {
                    root: docs,
                    count: 1
                }))
            );
            assert_eq!(state.rows().len(), 2);

            let up = mouse(MouseEventKind::Up(MouseButton::Left), 0);
            assert_eq!(state.handle_mouse(&list, &mut doc, up, start + 700 * MS), None);
            assert!(!state.long_press_mut().is_pressed());
        }

        #[test]
        fn short_press_clicks_the_icon() {
            let (mut doc, list, mut state) = setup_on_screen();
            let start = Instant::now();
            let reference_icon = state.icon_at_row(2).unwrap();
            let reference = doc.parent(reference_icon).unwrap();

            let down = mouse(MouseEventKind::Down(MouseButton::Left), 2);
            let up = mouse(MouseEventKind::Up(MouseButton::Left), 2);
            state.handle_mouse(&list, &mut doc, down, start);

            assert_eq!(
                state.handle_mouse(&list, &mut doc, up, start + 100 * MS),
                Some(ListEvent::Handled(Transition::Expanded(reference)))
            );
            assert_eq!(state.focused(), Some(reference_icon));
            assert_eq!(state.rows().len(), 5);
        }

        #[test]
        fn release_off_the_icons_cancels_the_press() {
            let (mut doc, list, mut state) = setup_on_screen();
            let start = Instant::now();
            let reference_icon = state.icon_at_row(2).unwrap();

            let down = mouse(MouseEventKind::Down(MouseButton::Left), 2);
            let up = mouse(MouseEventKind::Up(MouseButton::Left), 9);
            state.handle_mouse(&list, &mut doc, down, start);

            assert_eq!(state.handle_mouse(&list, &mut doc, up, start + 50 * MS), None);
            assert_eq!(state.tick(&list, &mut doc, start + 900 * MS), None);
            assert_eq!(
                list.state_of(&doc, reference_icon),
                Some(crate::NodeState::Contracted)
            );
        }

        #[test]
        fn tab_moves_focus_and_keys_reach_the_focused_icon() {
            let (mut doc, list, mut state) = setup_on_screen();
            let docs_icon = state.icon_at_row(0).unwrap();
            let docs = doc.parent(docs_icon).unwrap();

            assert_eq!(
                state.handle_key(&list, &mut doc, key(TermKey::Enter)),
                ListEvent::Ignored(IgnoreReason::NoFocus)
            );
            assert_eq!(
                state.handle_key(&list, &mut doc, key(TermKey::Tab)),
                ListEvent::FocusMoved(docs_icon)
            );
            assert_eq!(
                state.handle_key(&list, &mut doc, key(TermKey::Enter)),
                ListEvent::Handled(Transition::Contracted(docs))
            );
            assert_eq!(
                state.handle_key(&list, &mut doc, key(TermKey::Null)),
                ListEvent::Ignored(IgnoreReason::UnmappedKey)
            );
        }

        #[test]
        fn only_key_presses_are_delivered() {
            let (mut doc, list, mut state) = setup_on_screen();
            let docs_icon = state.icon_at_row(0).unwrap();
            assert!(state.focus(&list, &doc, docs_icon));

            for kind in [KeyEventKind::Release, KeyEventKind::Repeat] {
                let event = KeyEvent::new_with_kind(TermKey::Enter, KeyModifiers::NONE, kind);
                assert_eq!(
                    state.handle_key(&list, &mut doc, event),
                    ListEvent::Ignored(IgnoreReason::UnmappedKey)
                );
            }
            assert_eq!(
                list.state_of(&doc, docs_icon),
                Some(crate::NodeState::Expanded)
            );
        }
    }
}
