use log::{debug, warn};
use serde::Serialize;
use wasm_bindgen::JsCast;
use web_sys::js_sys::{Function, Reflect};
use web_sys::Window;

use crate::config::AnimationSettings;
use crate::dom;
use crate::error::BindError;

pub const AOS_GLOBAL: &str = "AOS";

/// `disable` option: the string `"mobile"` or `false`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Disable {
    Device(&'static str),
    Never(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AosOptions {
    pub duration: u32,
    pub easing: String,
    pub once: bool,
    pub offset: u32,
    pub delay: u32,
    pub disable: Disable,
}

impl AosOptions {
    pub fn for_viewport(settings: &AnimationSettings, mobile: bool) -> Self {
        Self {
            duration: settings.duration,
            easing: settings.easing.clone(),
            once: settings.once,
            offset: settings.offset,
            delay: settings.delay,
            disable: if mobile {
                Disable::Device("mobile")
            } else {
                Disable::Never(false)
            },
        }
    }
}

/// Calls `AOS.init` when the library is on the page; otherwise nothing animates.
pub fn init(window: &Window, options: &AosOptions) -> Result<(), BindError> {
    let Some(aos) = dom::global(window, AOS_GLOBAL) else {
        debug!("AOS not loaded, skipping scroll animations");
        return Ok(());
    };
    let Some(aos_init) = Reflect::get(&aos, &"init".into())
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
    else {
        warn!("AOS present without an init function");
        return Ok(());
    };

    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let config = options
        .serialize(&serializer)
        .map_err(|e| BindError::Js(e.to_string()))?;
    aos_init.call1(&aos, &config)?;
    debug!("AOS initialised (disable: {:?})", options.disable);
    Ok(())
}
