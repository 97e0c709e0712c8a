//! Overlays drawn above the graph

/// A dialog shown over the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    QuitConfirm,
    /// Segment breakdown of one column
    ColumnDetail { column: usize },
    Help,
}

impl Modal {
    /// Column this overlay is about, if any
    pub fn column(&self) -> Option<usize> {
        match self {
            Modal::ColumnDetail { column } => Some(*column),
            Modal::QuitConfirm | Modal::Help => None,
        }
    }
}

/// Open overlays, bottom first
///
/// Only the top overlay receives input. Opening the overlay that is
/// already on top does nothing, so repeated key presses don't stack copies.
#[derive(Debug, Default)]
pub struct ModalStack {
    open: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `modal`; returns false when it was already on top
    pub fn push(&mut self, modal: Modal) -> bool {
        if self.top() == Some(&modal) {
            return false;
        }
        self.open.push(modal);
        true
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.open.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.open.last()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modal> {
        self.open.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_modal_gets_input() {
        let mut modals = ModalStack::new();
        assert!(modals.top().is_none());

        modals.push(Modal::ColumnDetail { column: 1 });
        modals.push(Modal::QuitConfirm);
        assert_eq!(modals.top(), Some(&Modal::QuitConfirm));

        assert_eq!(modals.pop(), Some(Modal::QuitConfirm));
        assert_eq!(modals.top().and_then(Modal::column), Some(1));
    }

    #[test]
    fn test_reopening_top_modal_is_ignored() {
        let mut modals = ModalStack::new();
        assert!(modals.push(Modal::Help));
        assert!(!modals.push(Modal::Help));
        assert_eq!(modals.len(), 1);

        // a different column is a different overlay
        assert!(modals.push(Modal::ColumnDetail { column: 0 }));
        assert!(modals.push(Modal::ColumnDetail { column: 2 }));
        assert_eq!(modals.len(), 3);
    }
}
