//! Explicit "current choice" for list-backed pickers.

/// What a picker currently points at.
///
/// The three cases are distinct on screen: `Loading` shows a placeholder,
/// `Empty` hides the picker trigger, and `Selected` shows the choice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    /// The backing list has not arrived yet.
    #[default]
    Loading,
    /// The backing list arrived and has no entries.
    Empty,
    /// An entry of the backing list is chosen.
    Selected(T),
}

impl<T: Clone> Selection<T> {
    /// Default selection for a freshly loaded list: the first entry.
    pub fn first_of(list: &[T]) -> Self {
        match list.first() {
            Some(first) => Self::Selected(first.clone()),
            None => Self::Empty,
        }
    }
}

impl<T> Selection<T> {
    pub fn selected(&self) -> Option<&T> {
        match self {
            Self::Selected(item) => Some(item),
            Self::Loading | Self::Empty => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected(_))
    }
}
