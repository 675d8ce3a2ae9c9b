use crossterm::event::{KeyCode as TermKey, KeyEvent, KeyModifiers};

use crate::config::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeymapProfile {
    /// Tab/BackTab move focus, every other key goes to the focused icon.
    #[default]
    Default,
    /// Adds `j`/`k` for focus and `h`/`l` as Left/Right.
    Vim,
}

/// What a terminal key means to the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    FocusNext,
    FocusPrev,
    /// Key-up delivered to the focused icon.
    Key(KeyCode),
}

#[derive(Clone, Copy, Debug)]
pub struct ListKeyBindings {
    profile: KeymapProfile,
}

impl Default for ListKeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl ListKeyBindings {
    pub const fn new() -> Self {
        Self {
            profile: KeymapProfile::Default,
        }
    }

    pub const fn with_profile(profile: KeymapProfile) -> Self {
        Self { profile }
    }

    pub const fn profile(&self) -> KeymapProfile {
        self.profile
    }

    pub const fn set_profile(&mut self, profile: KeymapProfile) {
        self.profile = profile;
    }

    pub fn resolve(&self, key: KeyEvent) -> Option<KeyInput> {
        match key.code {
            TermKey::BackTab => return Some(KeyInput::FocusPrev),
            TermKey::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                return Some(KeyInput::FocusPrev);
            }
            TermKey::Tab => return Some(KeyInput::FocusNext),
            _ => {}
        }

        if self.profile == KeymapProfile::Vim {
            match key.code {
                TermKey::Char('j') => return Some(KeyInput::FocusNext),
                TermKey::Char('k') => return Some(KeyInput::FocusPrev),
                TermKey::Char('h') => return Some(KeyInput::Key(KeyCode::LEFT)),
                TermKey::Char('l') => return Some(KeyInput::Key(KeyCode::RIGHT)),
                _ => {}
            }
        }

        key_code(key.code).map(KeyInput::Key)
    }
}

/// Maps a terminal key to the numeric key code keyboard events carry.
///
/// Letters map to their uppercase ASCII code, as browsers report them.
pub fn key_code(code: TermKey) -> Option<KeyCode> {
    let code = match code {
        TermKey::Backspace => KeyCode::BACKSPACE,
        TermKey::Tab | TermKey::BackTab => KeyCode::TAB,
        TermKey::Enter => KeyCode::ENTER,
        TermKey::Esc => KeyCode::ESCAPE,
        TermKey::Char(' ') => KeyCode::SPACE,
        TermKey::PageUp => KeyCode::PAGE_UP,
        TermKey::PageDown => KeyCode::PAGE_DOWN,
        TermKey::End => KeyCode::END,
        TermKey::Home => KeyCode::HOME,
        TermKey::Left => KeyCode::LEFT,
        TermKey::Up => KeyCode::UP,
        TermKey::Right => KeyCode::RIGHT,
        TermKey::Down => KeyCode::DOWN,
        TermKey::Insert => KeyCode::INSERT,
        TermKey::Delete => KeyCode::DELETE,
        TermKey::Char(ch) if ch.is_ascii_alphanumeric() => {
            KeyCode(u32::from(ch.to_ascii_uppercase()))
        }
        TermKey::F(n) if (1..=24).contains(&n) => KeyCode(111 + u32::from(n)),
        _ => return None,
    };
    Some(code)
}
