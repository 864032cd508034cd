use log::warn;
use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::Window;

use crate::config::CheckoutPixel;
use crate::dom;

pub const GTAG_GLOBAL: &str = "gtag";
pub const PIXEL_GLOBAL: &str = "fbq";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CtaClick {
    pub cta_name: String,
    pub page_location: String,
}

/// One call into an analytics collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingCall {
    /// `gtag('event', 'cta_click', {...})`
    CtaClick(CtaClick),
    /// `fbq('track', 'InitiateCheckout', {...})`
    InitiateCheckout(CheckoutPixel),
}

impl TrackingCall {
    pub fn global(&self) -> &'static str {
        match self {
            TrackingCall::CtaClick(_) => GTAG_GLOBAL,
            TrackingCall::InitiateCheckout(_) => PIXEL_GLOBAL,
        }
    }

    pub fn command(&self) -> &'static str {
        match self {
            TrackingCall::CtaClick(_) => "event",
            TrackingCall::InitiateCheckout(_) => "track",
        }
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            TrackingCall::CtaClick(_) => "cta_click",
            TrackingCall::InitiateCheckout(_) => "InitiateCheckout",
        }
    }

    fn params(&self) -> Result<JsValue, serde_wasm_bindgen::Error> {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        match self {
            TrackingCall::CtaClick(params) => params.serialize(&serializer),
            TrackingCall::InitiateCheckout(params) => params.serialize(&serializer),
        }
    }
}

/// Calls emitted for one click on a checkout control, in dispatch order.
pub fn checkout_intent(cta_name: &str, page_location: &str, pixel: &CheckoutPixel) -> Vec<TrackingCall> {
    vec![
        TrackingCall::CtaClick(CtaClick {
            cta_name: cta_name.trim().to_string(),
            page_location: page_location.to_string(),
        }),
        TrackingCall::InitiateCheckout(pixel.clone()),
    ]
}

pub trait AnalyticsSink {
    fn emit(&self, call: &TrackingCall);
}

/// Forwards to whatever `gtag` / `fbq` globals are loaded at the time of the call.
pub struct PageGlobals {
    window: Window,
}

impl PageGlobals {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl AnalyticsSink for PageGlobals {
    fn emit(&self, call: &TrackingCall) {
        // Blocked or not yet loaded trackers are normal
        let Some(function) = dom::global_function(&self.window, call.global()) else {
            return;
        };
        let params = match call.params() {
            Ok(params) => params,
            Err(e) => {
                warn!("Could not encode {} payload: {}", call.event_name(), e);
                return;
            }
        };
        if let Err(e) = function.call3(
            &JsValue::NULL,
            &JsValue::from_str(call.command()),
            &JsValue::from_str(call.event_name()),
            &params,
        ) {
            warn!("{} rejected {}: {:?}", call.global(), call.event_name(), e);
        }
    }
}
