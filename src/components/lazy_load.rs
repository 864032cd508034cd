use log::debug;
use web_sys::js_sys::Reflect;
use web_sys::{Document, Window};

use crate::dom;
use crate::error::BindError;

pub const LAZY_SELECTOR: &str = "img[loading=\"lazy\"]";

/// `"loading" in HTMLImageElement.prototype`
fn supports_native_lazy(window: &Window) -> bool {
    dom::global(window, "HTMLImageElement")
        .and_then(|class| Reflect::get(&class, &"prototype".into()).ok())
        .and_then(|proto| Reflect::has(&proto, &"loading".into()).ok())
        .unwrap_or(false)
}

/// The deferred source to promote, if the image carries one.
pub fn deferred_source(data_src: Option<String>) -> Option<String> {
    data_src.filter(|src| !src.is_empty())
}

pub fn init(window: &Window, document: &Document, polyfill_src: &str) -> Result<(), BindError> {
    if supports_native_lazy(window) {
        let images = dom::query_all(document, LAZY_SELECTOR)?;
        let mut promoted = 0;
        for img in &images {
            if let Some(src) = deferred_source(img.get_attribute("data-src")) {
                img.set_attribute("src", &src)?;
                promoted += 1;
            }
        }
        debug!("Native lazy loading: {} of {} images promoted", promoted, images.len());
        return Ok(());
    }

    let body = document.body().ok_or_else(|| BindError::missing("body"))?;
    let script = document.create_element("script")?;
    script.set_attribute("src", polyfill_src)?;
    body.append_child(&script)?;
    debug!("Native lazy loading unsupported, loading {}", polyfill_src);
    Ok(())
}
