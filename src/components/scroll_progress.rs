use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::dom;
use crate::error::BindError;

pub const BAR_ID: &str = "scroll-progress";

const BAR_STYLE: &str = "position: fixed; top: 0; left: 0; height: 3px; \
    background: linear-gradient(90deg, #d69e2e, #319795); z-index: 9999; \
    width: 0%; transition: width 0.1s ease-out;";

/// How far down the page the reader is, 0 to 100.
pub fn progress_percent(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

/// Off unless the page config turns it on.
pub fn init(window: &Window, document: &Document) -> Result<(), BindError> {
    let body = document.body().ok_or_else(|| BindError::missing("body"))?;
    let root = document
        .document_element()
        .ok_or_else(|| BindError::missing("html"))?;

    let bar = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| BindError::WrongType(BAR_ID.to_string(), "HtmlElement"))?;
    bar.set_id(BAR_ID);
    bar.set_attribute("style", BAR_STYLE)?;
    body.append_child(&bar)?;

    let scroll_window = window.clone();
    dom::listen_passive(window, "scroll", move |_| {
        let percent = progress_percent(
            dom::scroll_y(&scroll_window),
            root.scroll_height() as f64,
            dom::viewport_height(&scroll_window),
        );
        if let Err(e) = bar.style().set_property("width", &format!("{}%", percent)) {
            warn!("Scroll progress update failed: {:?}", e);
        }
    })?;

    debug!("Scroll progress bar enabled");
    Ok(())
}
