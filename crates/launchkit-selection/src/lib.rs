//! Single-choice selection over an ordered, non-owned candidate list.
//!
//! Used for persona choice and creative-variant choice. The selection never
//! mutates the candidates; confirming returns a reference to the chosen one
//! and the caller decides what to clone into its own state.

use launchkit_utils::error::ValidationError;

/// Cursor over `candidates` with a selected index.
///
/// The index starts at 0 and only ever holds an in-range value.
///
/// ```rust
/// use launchkit_selection::Selection;
///
/// let styles = ["Bold", "Professional", "Playful"];
/// let mut selection = Selection::new(&styles);
/// assert!(selection.select(2));
/// assert!(!selection.select(9));
/// assert_eq!(selection.confirm(), Some(&"Playful"));
/// ```
#[derive(Debug)]
pub struct Selection<'a, T> {
    candidates: &'a [T],
    selected_index: usize,
}

impl<'a, T> Selection<'a, T> {
    pub fn new(candidates: &'a [T]) -> Self {
        Self {
            candidates,
            selected_index: 0,
        }
    }

    /// Move the selection to `index`. Out-of-range indices leave the
    /// selection unchanged and return `false`.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.candidates.len() {
            self.selected_index = index;
            true
        } else {
            false
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// The selected candidate, or `None` when there are no candidates.
    pub fn confirm(&self) -> Option<&'a T> {
        self.candidates.get(self.selected_index)
    }

    pub fn candidates(&self) -> &'a [T] {
        self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Select `index` among `candidates` and confirm it in one step.
///
/// Unlike [`Selection::select`], an out-of-range index is an error naming
/// `what` was being chosen.
pub fn pick<'a, T>(candidates: &'a [T], index: usize, what: &str) -> Result<&'a T, ValidationError> {
    let mut selection = Selection::new(candidates);
    match selection.select(index).then(|| selection.confirm()).flatten() {
        Some(candidate) => Ok(candidate),
        None => Err(ValidationError::IndexOutOfRange {
            what: what.to_string(),
            index,
            len: candidates.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_selection_is_first() {
        let personas = ["Emma", "Felix", "Priya"];
        let selection = Selection::new(&personas);
        assert_eq!(selection.selected_index(), 0);
        assert_eq!(selection.confirm(), Some(&"Emma"));
    }

    #[test]
    fn test_empty_candidates_confirm_none() {
        let empty: [u8; 0] = [];
        let mut selection = Selection::new(&empty);
        assert!(selection.is_empty());
        assert!(!selection.select(0));
        assert_eq!(selection.confirm(), None);
    }

    #[test]
    fn test_pick_reports_out_of_range() {
        let personas = ["Emma", "Felix", "Priya"];
        assert_eq!(pick(&personas, 1, "persona"), Ok(&"Felix"));
        assert_eq!(
            pick(&personas, 3, "persona"),
            Err(ValidationError::IndexOutOfRange {
                what: "persona".to_string(),
                index: 3,
                len: 3,
            })
        );
    }

    proptest! {
        #[test]
        fn prop_selection_follows_last_valid_select(
            candidates in prop::collection::vec(any::<u16>(), 0..12),
            requests in prop::collection::vec(0usize..20, 0..30),
        ) {
            let mut selection = Selection::new(&candidates);
            let mut expected = 0usize;
            for index in requests {
                let applied = selection.select(index);
                prop_assert_eq!(applied, index < candidates.len());
                if applied {
                    expected = index;
                }
                prop_assert_eq!(selection.selected_index(), expected);
            }
            prop_assert_eq!(selection.confirm(), candidates.get(expected));
        }

        #[test]
        fn prop_selection_never_mutates_candidates(
            candidates in prop::collection::vec(".{0,8}", 1..8),
            index in 0usize..10,
        ) {
            let before = candidates.clone();
            let mut selection = Selection::new(&candidates);
            selection.select(index);
            let _ = selection.confirm();
            prop_assert_eq!(&candidates, &before);
        }
    }
}
