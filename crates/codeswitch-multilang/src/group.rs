//! Per-group switcher state and the activation protocol.

use crate::element::code_blocks;
use crate::language::{is_valid_key, language_key, language_tag};
use crate::{
    ACTIVE_BUTTON_CLASS, BUTTON_GROUP_CLASS, DefaultActivation, ElementHandle, HEADER_CLASS,
    Highlighter, LANGUAGE_CLASS_PREFIX, MultiLangOptions, NEUTRAL_BUTTON_CLASS, TITLE_CLASS,
    Warning,
};

/// One language-specific code block of a group.
#[derive(Debug, Clone)]
pub struct Variant<E> {
    element: E,
    key: String,
}

impl<E> Variant<E> {
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Language key, empty if none could be derived.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Target of a button click: which group to update and which variant to show.
///
/// Bound once when the button is created. `position` is the button's
/// variant, used when `key` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickBinding {
    pub group: usize,
    pub position: usize,
    pub key: String,
}

/// Button that activates one language of a group.
#[derive(Debug, Clone)]
pub struct Control<E> {
    element: E,
    label: String,
    binding: ClickBinding,
}

impl<E> Control<E> {
    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn key(&self) -> &str {
        &self.binding.key
    }

    pub fn binding(&self) -> &ClickBinding {
        &self.binding
    }
}

/// What a group currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Nothing is shown.
    None,
    /// Every variant with this key is shown.
    Key(String),
    /// A single variant without a usable key is shown by position.
    Position(usize),
}

/// A group of code blocks with its generated switcher header.
#[derive(Debug)]
pub struct MultiLangGroup<E> {
    index: usize,
    element: E,
    header: E,
    title: String,
    variants: Vec<Variant<E>>,
    controls: Vec<Control<E>>,
    selection: Selection,
    default_activation: DefaultActivation,
    warnings: Vec<Warning>,
}

impl<E: ElementHandle> MultiLangGroup<E> {
    /// Build the switcher for `element` and show its default variant.
    pub(crate) fn initialize(
        index: usize,
        element: E,
        options: &MultiLangOptions,
        highlighter: &dyn Highlighter<E>,
    ) -> Self {
        let mut warnings = Vec::new();

        let title = take_title(&element, options);
        if title.is_empty() {
            record(&mut warnings, Warning::MissingTitle { group: index });
        }

        let header = element.create_element("div");
        header.add_class(HEADER_CLASS);
        let title_element = element.create_element("div");
        title_element.add_class(TITLE_CLASS);
        title_element.set_text(&title);
        header.append_child(&title_element);

        let mut variants: Vec<Variant<E>> = Vec::new();
        for (position, block) in code_blocks(&element).into_iter().enumerate() {
            if !block.has_class(&options.highlight_marker) {
                highlighter.highlight(&block);
            }

            let language_attribute = options.language_attribute.as_deref();
            if let Some(tag) = language_tag(&block, language_attribute)
                && !is_valid_key(&tag)
            {
                record(
                    &mut warnings,
                    Warning::InvalidLanguageTag {
                        group: index,
                        variant: position,
                        tag,
                    },
                );
            }

            let key = language_key(&block, language_attribute, &options.highlight_marker);
            if key.is_empty() {
                record(
                    &mut warnings,
                    Warning::EmptyLanguageKey {
                        group: index,
                        variant: position,
                    },
                );
            } else if variants.iter().filter(|v| v.key == key).count() == 1 {
                record(
                    &mut warnings,
                    Warning::DuplicateLanguageKey {
                        group: index,
                        key: key.clone(),
                    },
                );
            }

            variants.push(Variant {
                element: block,
                key,
            });
        }
        if variants.is_empty() {
            record(&mut warnings, Warning::NoVariants { group: index });
        }

        let button_group = element.create_element("div");
        button_group.add_class(BUTTON_GROUP_CLASS);
        let controls = variants
            .iter()
            .enumerate()
            .map(|(position, variant)| {
                let button = element.create_element("button");
                let mut classes = vec![
                    "btn".to_owned(),
                    "btn-small".to_owned(),
                    NEUTRAL_BUTTON_CLASS.to_owned(),
                ];
                if !variant.key.is_empty() {
                    classes.push(language_class(&variant.key));
                }
                button.set_class_list(&classes);

                let label = options.label_for(&variant.key);
                button.set_text(&label);
                button_group.append_child(&button);

                Control {
                    element: button,
                    label,
                    binding: ClickBinding {
                        group: index,
                        position,
                        key: variant.key.clone(),
                    },
                }
            })
            .collect();

        let mut group = Self {
            index,
            element,
            header,
            title,
            variants,
            controls,
            selection: Selection::None,
            default_activation: options.default_activation,
            warnings,
        };
        group.activate_default();

        group.header.append_child(&button_group);
        group.element.prepend_child(&group.header);

        tracing::debug!(
            group = index,
            title = %group.title,
            variants = group.variants.len(),
            "Initialized multilang group"
        );
        group
    }

    /// Show every variant whose key equals `key` and mark its button active.
    ///
    /// All other variants are hidden and all other buttons set to neutral.
    /// An empty or unknown key hides every variant and leaves no button
    /// active.
    pub fn activate(&mut self, key: &str) {
        let mut shown = 0;
        for variant in &self.variants {
            let visible = !key.is_empty() && variant.key == key;
            variant.element.set_visible(visible);
            shown += usize::from(visible);
        }

        for control in &self.controls {
            let active = !key.is_empty() && control.binding.key == key;
            set_button_state(&control.element, active);
        }

        if shown == 0 {
            self.selection = Selection::None;
            let warning = Warning::UnmatchedKey {
                group: self.index,
                key: key.to_owned(),
            };
            // Repeated clicks on the same dead button report it once
            if !self.warnings.contains(&warning) {
                record(&mut self.warnings, warning);
            }
        } else {
            self.selection = Selection::Key(key.to_owned());
        }
    }

    /// Show only the variant at `position` and mark only its button active.
    ///
    /// Out-of-range positions leave the group unchanged.
    pub fn activate_position(&mut self, position: usize) {
        if position >= self.variants.len() {
            return;
        }
        for (i, variant) in self.variants.iter().enumerate() {
            variant.element.set_visible(i == position);
        }
        for (i, control) in self.controls.iter().enumerate() {
            set_button_state(&control.element, i == position);
        }
        self.selection = Selection::Position(position);
    }

    /// Run the activation bound to the button at `control`.
    ///
    /// Returns `false` if there is no such button.
    pub fn click(&mut self, control: usize) -> bool {
        let Some(binding) = self.controls.get(control).map(|c| c.binding.clone()) else {
            return false;
        };
        self.dispatch(&binding);
        true
    }

    /// Run a bound activation.
    ///
    /// A keyless binding shows its own variant under
    /// [`DefaultActivation::FirstVariant`] and matches nothing otherwise.
    pub fn dispatch(&mut self, binding: &ClickBinding) {
        if binding.key.is_empty() && self.default_activation == DefaultActivation::FirstVariant {
            self.activate_position(binding.position);
        } else {
            self.activate(&binding.key);
        }
    }

    fn activate_default(&mut self) {
        let Some(first) = self.variants.first() else {
            return;
        };
        let key = first.key.clone();
        match self.default_activation {
            DefaultActivation::FirstVariant if key.is_empty() => self.activate_position(0),
            DefaultActivation::FirstVariant | DefaultActivation::FirstKey => self.activate(&key),
        }
    }

    /// Position of this group on the page.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn header(&self) -> &E {
        &self.header
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn variants(&self) -> &[Variant<E>] {
        &self.variants
    }

    pub fn controls(&self) -> &[Control<E>] {
        &self.controls
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Key of the language currently shown, if any.
    pub fn active_key(&self) -> Option<&str> {
        match &self.selection {
            Selection::None => None,
            Selection::Key(key) => Some(key.as_str()),
            Selection::Position(position) => self.variants.get(*position).map(Variant::key),
        }
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

/// Read the group title and remove its source attribute.
///
/// Falls back to the marker attribute value when no title attribute exists.
fn take_title<E: ElementHandle>(element: &E, options: &MultiLangOptions) -> String {
    if let Some(title) = element.attribute(&options.title_attribute) {
        element.remove_attribute(&options.title_attribute);
        return title;
    }
    element
        .attribute(&options.marker_attribute)
        .unwrap_or_default()
}

fn language_class(key: &str) -> String {
    format!("{LANGUAGE_CLASS_PREFIX}{key}")
}

fn set_button_state<E: ElementHandle>(button: &E, active: bool) {
    let mut classes = button.class_list();
    classes.retain(|c| c != ACTIVE_BUTTON_CLASS && c != NEUTRAL_BUTTON_CLASS);
    classes.push(
        if active {
            ACTIVE_BUTTON_CLASS
        } else {
            NEUTRAL_BUTTON_CLASS
        }
        .to_owned(),
    );
    button.set_class_list(&classes);
}

fn record(warnings: &mut Vec<Warning>, warning: Warning) {
    tracing::warn!("{warning}");
    warnings.push(warning);
}
