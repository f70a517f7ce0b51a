/// Rows visible at once in paginated lists.
pub const PAGE_SIZE: usize = 10;

/// Cursor plus scroll offset for a list of `len` rows.
///
/// The offset only moves as far as needed to keep the cursor visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursor {
    pub cursor: usize,
    pub offset: usize,
}

impl ListCursor {
    pub fn up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            if self.cursor < self.offset {
                self.offset = self.cursor;
            }
        }
    }

    pub fn down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
            if self.cursor >= self.offset + PAGE_SIZE {
                self.offset = self.cursor + 1 - PAGE_SIZE;
            }
        }
    }

    /// Pull the cursor back inside a list that shrank to `len` rows.
    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
        if self.cursor < self.offset {
            self.offset = self.cursor;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Index range of the visible page.
    pub fn visible(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.offset.min(len);
        start..(start + PAGE_SIZE).min(len)
    }
}
