use log::{debug, warn};
use web_sys::{Document, Element, Window};

use crate::dom;
use crate::error::BindError;

pub const HEADER_ID: &str = "header";
pub const SCROLLED_CLASS: &str = "header-scrolled";

/// Strictly above the threshold; sitting exactly on it is still the top of the page.
pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn init(window: &Window, document: &Document, threshold: f64) -> Result<(), BindError> {
    let header: Element = dom::by_id(document, HEADER_ID)?;

    let scroll_window = window.clone();
    dom::listen_passive(window, "scroll", move |_| {
        let scrolled = is_scrolled(dom::scroll_y(&scroll_window), threshold);
        if let Err(e) = dom::set_class(&header, SCROLLED_CLASS, scrolled) {
            warn!("Header shadow update failed: {}", e);
        }
    })?;

    debug!("Header shadow bound at {}px", threshold);
    Ok(())
}
