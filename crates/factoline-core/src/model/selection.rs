// ── Filter selection state ──
//
// Category id → set of checked option ids. A category that is missing
// means "nothing checked", never "everything checked".

use indexmap::{IndexMap, IndexSet};

/// Checked filter options, grouped by category.
///
/// Empty groups are dropped as soon as their last option is unchecked, so
/// every entry present is an *active* category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    categories: IndexMap<String, IndexSet<String>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check (`selected = true`) or uncheck an option. Returns `true` if the
    /// selection changed.
    pub fn set_option(&mut self, category: &str, option: &str, selected: bool) -> bool {
        if selected {
            return self
                .categories
                .entry(category.to_owned())
                .or_default()
                .insert(option.to_owned());
        }

        let Some(options) = self.categories.get_mut(category) else {
            return false;
        };
        let removed = options.shift_remove(option);
        if options.is_empty() {
            self.categories.shift_remove(category);
        }
        removed
    }

    /// Drop every checked option. The configured start-up selection is not
    /// restored.
    pub fn clear_all(&mut self) {
        self.categories.clear();
    }

    pub fn is_selected(&self, category: &str, option: &str) -> bool {
        self.categories
            .get(category)
            .is_some_and(|options| options.contains(option))
    }

    /// Checked option ids for one category, in the order they were checked.
    pub fn selected<'a>(&'a self, category: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.categories
            .get(category)
            .into_iter()
            .flat_map(|options| options.iter().map(String::as_str))
    }

    /// Categories with at least one checked option.
    pub fn active_categories(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> {
        self.categories
            .iter()
            .filter(|(_, options)| !options.is_empty())
            .map(|(id, options)| (id.as_str(), options))
    }

    /// Total number of checked options across all categories.
    pub fn active_count(&self) -> usize {
        self.categories.values().map(IndexSet::len).sum()
    }

    /// `true` when no category is active.
    pub fn is_empty(&self) -> bool {
        self.active_categories().next().is_none()
    }
}

impl<C, I, O> FromIterator<(C, I)> for Selection
where
    C: Into<String>,
    I: IntoIterator<Item = O>,
    O: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (C, I)>>(iter: T) -> Self {
        let mut selection = Self::new();
        for (category, options) in iter {
            let category = category.into();
            for option in options {
                selection.set_option(&category, &option.into(), true);
            }
        }
        selection
    }
}
