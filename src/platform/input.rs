//! Keyboard input queue
//!
//! Key-down events arrive whenever the host delivers them. They are decoded
//! into simulation commands and held until the next tick drains them, so a
//! tick always sees a fixed, ordered batch.

use std::collections::VecDeque;

use crate::sim::{Command, TickInput};

/// Decode one key press. Returns `None` for keys the game doesn't use.
pub fn decode_key(key: char) -> Option<Command> {
    match key {
        c if c.is_ascii_alphabetic() => Some(Command::Letter(c.to_ascii_uppercase())),
        c @ '0'..='9' => c.to_digit(10).map(|d| Command::ChooseUpgrade(d as u8)),
        ' ' => Some(Command::Start),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct InputQueue {
    pending: VecDeque<Command>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw key press
    pub fn push_key(&mut self, key: char) {
        if let Some(command) = decode_key(key) {
            self.pending.push_back(command);
        }
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Take everything queued so far as one tick's input
    pub fn drain(&mut self) -> TickInput {
        TickInput {
            commands: self.pending.drain(..).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_keys() {
        assert_eq!(decode_key('f'), Some(Command::Letter('F')));
        assert_eq!(decode_key('2'), Some(Command::ChooseUpgrade(2)));
        assert_eq!(decode_key(' '), Some(Command::Start));
        assert_eq!(decode_key('!'), None);
    }

    #[test]
    fn test_drain_keeps_order_and_empties() {
        let mut queue = InputQueue::new();
        queue.push_key('a');
        queue.push_key('#');
        queue.push_key('1');
        let input = queue.drain();
        assert_eq!(
            input.commands,
            vec![Command::Letter('A'), Command::ChooseUpgrade(1)]
        );
        assert!(queue.is_empty());
        assert!(queue.drain().commands.is_empty());
    }
}
