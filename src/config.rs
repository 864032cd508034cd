use log::{warn, Level};
use serde::{Deserialize, Serialize};
use web_sys::Document;

/// Id of the optional inline JSON block a page can use to override defaults.
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose when served by `trunk serve`
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Viewports narrower than this count as mobile.
    pub mobile_breakpoint: f64,
    pub header_scroll_threshold: f64,
    pub fallback_header_height: f64,
    pub cookie_banner_delay_ms: u32,
    pub consent_key: String,
    pub privacy_policy_href: String,
    pub lazysizes_src: String,
    pub scroll_progress: bool,
    pub animation: AnimationSettings,
    pub checkout: CheckoutPixel,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768.0,
            header_scroll_threshold: 10.0,
            fallback_header_height: 80.0,
            cookie_banner_delay_ms: 2000,
            consent_key: "cookieConsent".to_string(),
            privacy_policy_href: "politique-confidentialite.html".to_string(),
            lazysizes_src: "https://cdnjs.cloudflare.com/ajax/libs/lazysizes/5.3.2/lazysizes.min.js"
                .to_string(),
            scroll_progress: false,
            animation: AnimationSettings::default(),
            checkout: CheckoutPixel::default(),
        }
    }
}

/// Options handed to `AOS.init`, minus `disable` which depends on the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub duration: u32,
    pub easing: String,
    pub once: bool,
    pub offset: u32,
    pub delay: u32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration: 800,
            easing: "ease-out-cubic".to_string(),
            once: true,
            offset: 50,
            delay: 0,
        }
    }
}

/// Product description sent with every pixel event, whichever button was clicked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutPixel {
    pub content_name: String,
    pub content_category: String,
    pub value: f64,
    pub currency: String,
}

impl Default for CheckoutPixel {
    fn default() -> Self {
        Self {
            content_name: "21 Jours de Prière".to_string(),
            content_category: "Digital Product".to_string(),
            value: 17.00,
            currency: "EUR".to_string(),
        }
    }
}

impl PageConfig {
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Defaults, overridden by `<script type="application/json" id="landing-config">` when present.
    pub fn from_document(document: &Document) -> Self {
        let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
            return Self::default();
        };
        let raw = element.text_content().unwrap_or_default();
        match Self::parse(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }

    pub fn is_mobile(&self, viewport_width: f64) -> bool {
        viewport_width < self.mobile_breakpoint
    }
}
