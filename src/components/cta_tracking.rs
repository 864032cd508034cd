use std::rc::Rc;

use log::debug;
use web_sys::{Document, Window};

use crate::analytics::{self, AnalyticsSink};
use crate::config::CheckoutPixel;
use crate::dom;
use crate::error::BindError;

/// Everything that leads to the offer or the payment page.
pub const CHECKOUT_SELECTOR: &str = "a[href=\"#offre\"], a[href*=\"checkout\"], .offer-cta";

pub fn init(
    window: &Window,
    document: &Document,
    sink: Rc<dyn AnalyticsSink>,
    pixel: &CheckoutPixel,
) -> Result<(), BindError> {
    let controls = dom::query_all(document, CHECKOUT_SELECTOR)?;

    for control in &controls {
        let window = window.clone();
        let sink = sink.clone();
        let pixel = pixel.clone();
        let label = control.clone();
        dom::listen(control, "click", move |_| {
            let name = label.text_content().unwrap_or_default();
            let location = window.location().href().unwrap_or_default();
            for call in analytics::checkout_intent(&name, &location, &pixel) {
                sink.emit(&call);
            }
        })?;
    }

    debug!("Tracking {} checkout controls", controls.len());
    Ok(())
}
