//! Page-level initialization.

use crate::element::find_by_attribute;
use crate::{
    ClickBinding, ElementHandle, HEADER_CLASS, Highlighter, MultiLangGroup, MultiLangOptions,
    Warning,
};

/// All switcher groups found below a root element.
///
/// Groups are independent: activating a language in one group never touches
/// another.
#[derive(Debug)]
pub struct MultiLangPage<E> {
    groups: Vec<MultiLangGroup<E>>,
    skipped: usize,
}

impl<E: ElementHandle> MultiLangPage<E> {
    /// Initialize every group marked with `options.marker_attribute`.
    ///
    /// Groups are processed in document order. A group whose first child is
    /// already a switcher header is left untouched, so running twice over the
    /// same tree is harmless.
    pub fn initialize(
        root: &E,
        options: &MultiLangOptions,
        highlighter: &dyn Highlighter<E>,
    ) -> Self {
        let mut groups = Vec::new();
        let mut skipped = 0;

        for element in find_by_attribute(root, &options.marker_attribute) {
            if is_initialized(&element) {
                skipped += 1;
                continue;
            }
            let index = groups.len();
            groups.push(MultiLangGroup::initialize(
                index,
                element,
                options,
                highlighter,
            ));
        }

        tracing::debug!(
            groups = groups.len(),
            skipped,
            "Initialized multilang page"
        );
        Self { groups, skipped }
    }

    pub fn groups(&self) -> &[MultiLangGroup<E>] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&MultiLangGroup<E>> {
        self.groups.get(index)
    }

    pub fn group_mut(&mut self, index: usize) -> Option<&mut MultiLangGroup<E>> {
        self.groups.get_mut(index)
    }

    /// Dispatch a click on button `control` of group `group`.
    ///
    /// Returns `false` if the group or button does not exist.
    pub fn click(&mut self, group: usize, control: usize) -> bool {
        self.groups
            .get_mut(group)
            .is_some_and(|g| g.click(control))
    }

    /// Run a bound activation directly.
    ///
    /// Returns `false` if the binding points at a missing group.
    pub fn dispatch(&mut self, binding: &ClickBinding) -> bool {
        let Some(group) = self.groups.get_mut(binding.group) else {
            return false;
        };
        group.dispatch(binding);
        true
    }

    /// Number of groups skipped because they were already initialized.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Defects across all groups, in group order.
    pub fn warnings(&self) -> impl Iterator<Item = &Warning> {
        self.groups.iter().flat_map(|g| g.warnings().iter())
    }
}

fn is_initialized<E: ElementHandle>(element: &E) -> bool {
    element
        .children()
        .first()
        .is_some_and(|first| first.has_class(HEADER_CLASS))
}
