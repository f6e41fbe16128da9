//! Keyboard bindings
//!
//! Key presses set one-shot flags that last for a single tick. Held keys are
//! tracked individually, so a direction stays held while any key bound to it
//! is still down.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Keys the game distinguishes; everything else is `Other`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Escape,
    Char(char),
    Other,
}

/// What a key does in game terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Restart,
    ToggleGrid,
    Quit,
    /// No binding; still counts as "press any key"
    Unbound,
}

impl Action {
    pub fn from_key(key: Key) -> Self {
        match key {
            Key::Left => Action::MoveLeft,
            Key::Right => Action::MoveRight,
            Key::Up | Key::Space => Action::Jump,
            Key::Escape => Action::Quit,
            Key::Char(c) => match c.to_ascii_lowercase() {
                'a' => Action::MoveLeft,
                'd' => Action::MoveRight,
                'w' => Action::Jump,
                'r' => Action::Restart,
                'g' => Action::ToggleGrid,
                _ => Action::Unbound,
            },
            Key::Down | Key::Other => Action::Unbound,
        }
    }
}

impl Key {
    /// Letter keys ignore case
    fn normalized(self) -> Self {
        match self {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

/// Accumulates key events between ticks
#[derive(Debug, Clone, Default)]
pub struct Controls {
    held: HashSet<Key>,
    pending: TickInput,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        let key = key.normalized();
        match Action::from_key(key) {
            Action::MoveLeft | Action::MoveRight => {
                self.held.insert(key);
                self.pending.any_key = true;
            }
            Action::Jump => self.pending.jump = true,
            Action::Restart => self.pending.restart = true,
            Action::ToggleGrid => self.pending.toggle_grid = true,
            Action::Quit => self.pending.quit = true,
            Action::Unbound => self.pending.any_key = true,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key.normalized());
    }

    /// Window close request
    pub fn close_requested(&mut self) {
        self.pending.quit = true;
    }

    fn holding(&self, action: Action) -> bool {
        self.held.iter().any(|&k| Action::from_key(k) == action)
    }

    /// Input for the next tick; one-shot presses are consumed
    pub fn take_tick_input(&mut self) -> TickInput {
        let mut input = std::mem::take(&mut self.pending);
        input.left = self.holding(Action::MoveLeft);
        input.right = self.holding(Action::MoveRight);
        input
    }
}
