//! Key bindings for the showcase and their on-screen hints.

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Span;

const CTRL_PREFIX: &str = "ctrl + ";
const SHIFT_PREFIX: &str = "shift + ";

/// A keyboard binding with key and modifiers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct KeyBinding {
    key: KeyCode,
    modifiers: KeyModifiers,
}

impl KeyBinding {
    pub(crate) const fn new(key: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { key, modifiers }
    }

    /// Check if this binding matches the given key event (press or repeat).
    pub(crate) fn is_press(&self, event: KeyEvent) -> bool {
        self.key == event.code
            && self.modifiers == event.modifiers
            && (event.kind == KeyEventKind::Press || event.kind == KeyEventKind::Repeat)
    }
}

pub(crate) const fn plain(key: KeyCode) -> KeyBinding {
    KeyBinding::new(key, KeyModifiers::NONE)
}

pub(crate) const fn shift(key: KeyCode) -> KeyBinding {
    KeyBinding::new(key, KeyModifiers::SHIFT)
}

pub(crate) const fn ctrl(key: KeyCode) -> KeyBinding {
    KeyBinding::new(key, KeyModifiers::CONTROL)
}

/// What a key press asks the app to do.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Action {
    NextCategory,
    PreviousCategory,
    ScrollDown,
    ScrollUp,
    Retry,
    Quit,
}

/// All bindings, in the order hints are shown. The first binding listed for
/// an action is the one displayed.
const KEYMAP: &[(KeyBinding, Action)] = &[
    (plain(KeyCode::Left), Action::PreviousCategory),
    (plain(KeyCode::Char('h')), Action::PreviousCategory),
    (shift(KeyCode::BackTab), Action::PreviousCategory),
    (plain(KeyCode::BackTab), Action::PreviousCategory),
    (plain(KeyCode::Right), Action::NextCategory),
    (plain(KeyCode::Char('l')), Action::NextCategory),
    (plain(KeyCode::Tab), Action::NextCategory),
    (plain(KeyCode::Up), Action::ScrollUp),
    (plain(KeyCode::Char('k')), Action::ScrollUp),
    (plain(KeyCode::Down), Action::ScrollDown),
    (plain(KeyCode::Char('j')), Action::ScrollDown),
    (plain(KeyCode::Char('r')), Action::Retry),
    (plain(KeyCode::Enter), Action::Retry),
    (plain(KeyCode::Char('q')), Action::Quit),
    (plain(KeyCode::Esc), Action::Quit),
    (ctrl(KeyCode::Char('c')), Action::Quit),
];

pub(crate) fn action_for(event: KeyEvent) -> Option<Action> {
    KEYMAP
        .iter()
        .find(|(binding, _)| binding.is_press(event))
        .map(|(_, action)| *action)
}

fn primary_binding(action: Action) -> Option<KeyBinding> {
    KEYMAP
        .iter()
        .find(|(_, a)| *a == action)
        .map(|(binding, _)| *binding)
}

/// Spans like `←/→ category`, showing the primary binding of each action.
pub(crate) fn hint(actions: &[Action], label: &'static str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (idx, binding) in actions.iter().filter_map(|a| primary_binding(*a)).enumerate() {
        if idx > 0 {
            spans.push("/".dim());
        }
        spans.push(binding.into());
    }
    spans.push(Span::from(format!(" {label}")).dim());
    spans
}

fn modifiers_to_string(modifiers: KeyModifiers) -> String {
    let mut result = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        result.push_str(CTRL_PREFIX);
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        result.push_str(SHIFT_PREFIX);
    }
    result
}

impl From<KeyBinding> for Span<'static> {
    fn from(binding: KeyBinding) -> Self {
        let KeyBinding { key, modifiers } = binding;
        let modifiers = modifiers_to_string(modifiers);
        let key = match key {
            KeyCode::Enter => "enter".to_string(),
            KeyCode::Esc => "esc".to_string(),
            KeyCode::Tab => "tab".to_string(),
            KeyCode::BackTab => "tab".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            _ => format!("{key}").to_ascii_lowercase(),
        };
        Span::styled(format!("{modifiers}{key}"), Style::default().bold())
    }
}
