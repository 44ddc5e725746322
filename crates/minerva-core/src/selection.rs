//! Generic selection state utilities.
//!
//! Provides a reusable single-value selection holder. The flowchart view
//! uses it to track which task is currently selected; any other view can
//! reuse it for its own selection semantics.

/// State for single-item selection.
#[derive(Clone, Debug)]
pub struct SelectionState<T> {
    selected: Option<T>,
}

impl<T> Default for SelectionState<T> {
    fn default() -> Self {
        Self { selected: None }
    }
}

impl<T> SelectionState<T> {
    /// Create a new selection state with no selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently selected value.
    pub fn get(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    /// Set the selected value.
    pub fn set(&mut self, value: Option<T>) {
        self.selected = value;
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Take the selected value out, leaving no selection.
    pub fn take(&mut self) -> Option<T> {
        self.selected.take()
    }

    /// Check if anything is selected.
    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }
}

impl<T: PartialEq> SelectionState<T> {
    /// Check if a specific value is selected.
    pub fn is_selected(&self, value: &T) -> bool {
        self.selected.as_ref() == Some(value)
    }

    /// Toggle selection: selecting the current value clears it.
    pub fn toggle(&mut self, value: T) {
        if self.is_selected(&value) {
            self.selected = None;
        } else {
            self.selected = Some(value);
        }
    }
}
