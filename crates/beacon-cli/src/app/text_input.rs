use super::event::Key;

const CHAR_LIMIT: usize = 256;

/// Single-line edit buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
}

impl TextInput {
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.chars().take(CHAR_LIMIT).collect(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Apply an editing key. Returns false for keys the buffer does not consume.
    pub fn handle(&mut self, key: Key) -> bool {
        match key {
            Key::Char(c) if !c.is_control() => {
                if self.value.chars().count() < CHAR_LIMIT {
                    self.value.push(c);
                }
                true
            }
            Key::Backspace | Key::Delete => {
                self.value.pop();
                true
            }
            _ => false,
        }
    }
}
