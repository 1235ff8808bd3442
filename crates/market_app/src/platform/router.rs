/// Browser-style history of locations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a location; pushing the current location again is ignored.
    pub fn push(&mut self, location: String) {
        if self.current() != Some(location.as_str()) {
            self.entries.push(location);
        }
    }

    /// Drops the current entry and returns the one before it.
    pub fn back(&mut self) -> Option<String> {
        if self.entries.len() < 2 {
            return None;
        }
        self.entries.pop();
        self.entries.last().cloned()
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }
}
