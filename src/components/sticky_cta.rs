use std::cell::Cell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::dom;
use crate::error::BindError;

pub const CTA_ID: &str = "sticky-cta";
pub const HERO_ID: &str = "hero";
pub const FOOTER_SELECTOR: &str = "footer";
pub const VISIBLE_CLASS: &str = "visible";

/// Stretch of the page between the end of the hero and the footer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollWindow {
    pub hero_bottom: f64,
    /// `None` when the page has no footer.
    pub footer_top: Option<f64>,
}

impl ScrollWindow {
    pub fn shows_at(&self, scroll_y: f64, viewport_height: f64) -> bool {
        let footer_top = self.footer_top.unwrap_or(f64::INFINITY);
        scroll_y > self.hero_bottom && scroll_y + viewport_height < footer_top
    }
}

/// A wide viewport never shows the bar, whatever the scroll position.
pub fn is_visible(eligible: bool, window: &ScrollWindow, scroll_y: f64, viewport_height: f64) -> bool {
    eligible && window.shows_at(scroll_y, viewport_height)
}

pub struct StickyCta {
    window: Window,
    cta: HtmlElement,
    hero: HtmlElement,
    footer: Option<HtmlElement>,
    breakpoint: f64,
    eligible: Cell<bool>,
    hero_bottom: Cell<f64>,
}

impl StickyCta {
    fn measure_hero(&self) {
        self.hero_bottom
            .set((self.hero.offset_top() + self.hero.offset_height()) as f64);
    }

    pub fn is_eligible(&self) -> bool {
        self.eligible.get()
    }

    fn apply_layout(&self) -> Result<(), BindError> {
        self.layout_for(dom::viewport_width(&self.window))
    }

    /// Wide viewports take the bar out of layout entirely.
    pub fn layout_for(&self, viewport_width: f64) -> Result<(), BindError> {
        let narrow = viewport_width < self.breakpoint;
        self.eligible.set(narrow);
        let style = self.cta.style();
        if narrow {
            style.remove_property("display")?;
            self.measure_hero();
        } else {
            style.set_property("display", "none")?;
            dom::set_class(&self.cta, VISIBLE_CLASS, false)?;
        }
        Ok(())
    }

    pub fn on_scroll(&self) -> Result<(), BindError> {
        let window = ScrollWindow {
            hero_bottom: self.hero_bottom.get(),
            footer_top: self.footer.as_ref().map(|f| f.offset_top() as f64),
        };
        let visible = is_visible(
            self.eligible.get(),
            &window,
            dom::scroll_y(&self.window),
            dom::viewport_height(&self.window),
        );
        dom::set_class(&self.cta, VISIBLE_CLASS, visible)
    }
}

pub fn init(window: &Window, document: &Document, breakpoint: f64) -> Result<Rc<StickyCta>, BindError> {
    let cta: HtmlElement = dom::by_id(document, CTA_ID)?;
    let hero: HtmlElement = dom::by_id(document, HERO_ID)?;
    let footer = dom::query(document, FOOTER_SELECTOR)?.and_then(|f| f.dyn_into::<HtmlElement>().ok());

    let sticky = Rc::new(StickyCta {
        window: window.clone(),
        cta,
        hero,
        footer,
        breakpoint,
        eligible: Cell::new(false),
        hero_bottom: Cell::new(0.0),
    });
    sticky.apply_layout()?;

    {
        let sticky = sticky.clone();
        dom::listen_passive(window, "scroll", move |_| {
            if let Err(e) = sticky.on_scroll() {
                warn!("Sticky CTA scroll update failed: {}", e);
            }
        })?;
    }
    {
        let sticky = sticky.clone();
        dom::listen_passive(window, "resize", move |_| {
            if let Err(e) = sticky.apply_layout() {
                warn!("Sticky CTA layout update failed: {}", e);
            }
        })?;
    }

    debug!(
        "Sticky CTA bound (mobile: {}, footer: {})",
        sticky.eligible.get(),
        sticky.footer.is_some()
    );
    Ok(sticky)
}
