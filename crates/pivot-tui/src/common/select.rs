//! Cycling option selector for the category/role dropdowns.

/// A fixed list of options with one selected index.
///
/// Stands in for the original dropdown controls: Left/Right (or Up/Down)
/// cycle through the options with wrap-around. Empty until the career
/// catalog loads.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    options: Vec<String>,
    selected: usize,
}

impl Selector {
    /// Replaces the option list, resetting the selection to the first entry.
    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
        self.selected = 0;
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// The selected option, or None when the list is empty.
    pub fn selected(&self) -> Option<&str> {
        self.options.get(self.selected).map(String::as_str)
    }

    /// Advances the selection, wrapping at the end. Returns true if the
    /// selected value changed.
    pub fn next(&mut self) -> bool {
        if self.options.len() < 2 {
            return false;
        }
        self.selected = (self.selected + 1) % self.options.len();
        true
    }

    /// Moves the selection back, wrapping at the start. Returns true if the
    /// selected value changed.
    pub fn prev(&mut self) -> bool {
        if self.options.len() < 2 {
            return false;
        }
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(self.options.len() - 1);
        true
    }
}
