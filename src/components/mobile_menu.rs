use std::cell::Cell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent};

use crate::dom;
use crate::error::BindError;

pub const BUTTON_ID: &str = "mobile-menu-btn";
pub const MENU_ID: &str = "mobile-menu";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    Toggle,
    LinkClicked,
    Escape,
}

impl MenuState {
    pub fn next(self, event: MenuEvent) -> MenuState {
        match (self, event) {
            (MenuState::Closed, MenuEvent::Toggle) => MenuState::Open,
            (MenuState::Open, MenuEvent::Toggle) => MenuState::Closed,
            (_, MenuEvent::LinkClicked) | (_, MenuEvent::Escape) => MenuState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }
}

struct MobileMenu {
    button: Element,
    menu: Element,
    body: Option<HtmlElement>,
    state: Cell<MenuState>,
}

impl MobileMenu {
    fn handle(&self, event: MenuEvent) {
        let current = self.state.get();
        let next = current.next(event);
        if next == current {
            return;
        }
        self.state.set(next);
        if let Err(e) = self.render() {
            warn!("Mobile menu render failed: {}", e);
        }
    }

    fn render(&self) -> Result<(), BindError> {
        let open = self.state.get().is_open();
        dom::set_class(&self.menu, "hidden", !open)?;
        self.button
            .set_attribute("aria-expanded", if open { "true" } else { "false" })?;
        if let Some(body) = &self.body {
            // Background stays still while the menu covers it
            dom::set_class(body, "no-scroll", open)?;
        }
        Ok(())
    }
}

pub fn init(document: &Document) -> Result<(), BindError> {
    let button: Element = dom::by_id(document, BUTTON_ID)?;
    let menu: Element = dom::by_id(document, MENU_ID)?;

    let initial = if menu.class_list().contains("hidden") {
        MenuState::Closed
    } else {
        MenuState::Open
    };
    let links = dom::query_all_within(&menu, "a")?;
    let state = Rc::new(MobileMenu {
        button: button.clone(),
        menu,
        body: document.body(),
        state: Cell::new(initial),
    });

    {
        let state = state.clone();
        dom::listen(&button, "click", move |_| state.handle(MenuEvent::Toggle))?;
    }

    for link in &links {
        let state = state.clone();
        dom::listen(link, "click", move |_| state.handle(MenuEvent::LinkClicked))?;
    }

    dom::listen(document, "keydown", move |e| {
        let is_escape = e
            .dyn_ref::<KeyboardEvent>()
            .map(|key| key.key() == "Escape")
            .unwrap_or(false);
        if is_escape {
            state.handle(MenuEvent::Escape);
        }
    })?;

    debug!("Mobile menu bound with {} links", links.len());
    Ok(())
}
