use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, KeyboardEvent};

use crate::dom;
use crate::error::BindError;

pub const ACTIVE_CLASS: &str = "active";
pub const HIDDEN_CLASS: &str = "hidden";

/// Class markers that make up one accordion group in the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccordionMarkup {
    pub name: &'static str,
    pub item: &'static str,
    pub header: &'static str,
    pub content: &'static str,
}

/// The "what's inside each week" section.
pub const WEEKS: AccordionMarkup = AccordionMarkup {
    name: "weeks",
    item: ".week-accordion",
    header: ".week-header",
    content: ".week-content",
};

pub const FAQ: AccordionMarkup = AccordionMarkup {
    name: "faq",
    item: ".faq-item",
    header: ".faq-question",
    content: ".faq-answer",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Collapsed,
    Expanded,
}

/// At most one expanded item once any item has been activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccordionGroup {
    items: Vec<ItemState>,
}

impl AccordionGroup {
    pub fn new(items: Vec<ItemState>) -> Self {
        Self { items }
    }

    pub fn collapsed(len: usize) -> Self {
        Self::new(vec![ItemState::Collapsed; len])
    }

    /// Header click: close every sibling, then flip the activated item.
    pub fn activate(&mut self, index: usize) {
        let Some(&was) = self.items.get(index) else {
            return;
        };
        for (i, item) in self.items.iter_mut().enumerate() {
            if i != index {
                *item = ItemState::Collapsed;
            }
        }
        self.items[index] = match was {
            ItemState::Collapsed => ItemState::Expanded,
            ItemState::Expanded => ItemState::Collapsed,
        };
    }

    pub fn expanded(&self) -> Option<usize> {
        self.items.iter().position(|s| *s == ItemState::Expanded)
    }

    pub fn expanded_count(&self) -> usize {
        self.items.iter().filter(|s| **s == ItemState::Expanded).count()
    }

    pub fn states(&self) -> &[ItemState] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Enter and Space act like a click on a focused header.
pub fn is_activation_key(key: &str) -> bool {
    key == "Enter" || key == " "
}

struct BoundGroup {
    markup: AccordionMarkup,
    items: Vec<Element>,
    group: RefCell<AccordionGroup>,
}

impl BoundGroup {
    fn activate(&self, index: usize) {
        self.group.borrow_mut().activate(index);
        if let Err(e) = self.render() {
            warn!("Accordion `{}` render failed: {}", self.markup.name, e);
        }
    }

    fn render(&self) -> Result<(), BindError> {
        let group = self.group.borrow();
        for (item, state) in self.items.iter().zip(group.states()) {
            let expanded = *state == ItemState::Expanded;
            dom::set_class(item, ACTIVE_CLASS, expanded)?;
            if let Some(content) = item.query_selector(self.markup.content)? {
                dom::set_class(&content, HIDDEN_CLASS, !expanded)?;
            }
        }
        Ok(())
    }
}

pub fn init(document: &Document, markup: AccordionMarkup) -> Result<(), BindError> {
    let items = dom::query_all(document, markup.item)?;
    if items.is_empty() {
        return Err(BindError::missing(markup.item));
    }
    let initial = items
        .iter()
        .map(|item| {
            if item.class_list().contains(ACTIVE_CLASS) {
                ItemState::Expanded
            } else {
                ItemState::Collapsed
            }
        })
        .collect();
    let bound = Rc::new(BoundGroup {
        markup,
        items,
        group: RefCell::new(AccordionGroup::new(initial)),
    });

    let mut headers = 0;
    for header in dom::query_all(document, markup.header)? {
        // Headers outside an item have nothing to open
        let Ok(Some(owner)) = header.closest(markup.item) else {
            continue;
        };
        let Some(index) = bound.items.iter().position(|item| *item == owner) else {
            continue;
        };

        {
            let bound = bound.clone();
            dom::listen(&header, "click", move |_| bound.activate(index))?;
        }
        {
            let bound = bound.clone();
            dom::listen(&header, "keydown", move |e| {
                let Some(key) = e.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if is_activation_key(&key.key()) {
                    e.prevent_default();
                    bound.activate(index);
                }
            })?;
        }
        headers += 1;
    }

    debug!(
        "Accordion `{}` bound: {} items, {} headers",
        markup.name,
        bound.items.len(),
        headers
    );
    Ok(())
}
