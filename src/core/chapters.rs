/// Which chapter row is expanded, if any. At most one at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChapterSelection(Option<usize>);

impl ChapterSelection {
    pub fn new() -> Self {
        Self(None)
    }

    /// Selecting the open chapter collapses it; any other index replaces it.
    pub fn toggle(&mut self, index: usize) {
        self.0 = match self.0 {
            Some(open) if open == index => None,
            _ => Some(index),
        };
    }

    pub fn selected(&self) -> Option<usize> {
        self.0
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.0 == Some(index)
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}
