use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use log::{debug, info, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Window};

pub mod analytics;
pub mod config;
pub mod consent;
pub mod dom;
pub mod error;
pub mod greeting;
pub mod rate_limit;

pub mod components {
    pub mod accordion;
    pub mod animate_on_scroll;
    pub mod cookie_banner;
    pub mod cta_tracking;
    pub mod header;
    pub mod lazy_load;
    pub mod mobile_menu;
    pub mod preload;
    pub mod scroll_progress;
    pub mod smooth_scroll;
    pub mod sticky_cta;
}

use components::{
    accordion, animate_on_scroll, cookie_banner, cta_tracking, header, lazy_load, mobile_menu,
    preload, scroll_progress, smooth_scroll, sticky_cta,
};
use config::PageConfig;
use error::BindError;

/// Logs the outcome of one component; a failure never stops the others.
pub fn report<T>(component: &str, result: Result<T, BindError>) {
    match result {
        Ok(_) => debug!("{}: ready", component),
        Err(e) if e.is_missing_markup() => debug!("{}: skipped, {}", component, e),
        Err(e) => warn!("{}: disabled, {}", component, e),
    }
}

/// Everything that waits for the document to be parsed, in page order.
pub fn init_components(window: &Window, document: &Document, config: &PageConfig) {
    let mobile = config.is_mobile(dom::viewport_width(window));
    let aos = animate_on_scroll::AosOptions::for_viewport(&config.animation, mobile);
    report("animate on scroll", animate_on_scroll::init(window, &aos));
    report("mobile menu", mobile_menu::init(document));
    report(
        "header shadow",
        header::init(window, document, config.header_scroll_threshold),
    );
    report("week accordion", accordion::init(document, accordion::WEEKS));
    report("faq accordion", accordion::init(document, accordion::FAQ));
    report(
        "smooth scroll",
        smooth_scroll::init(window, document, config.fallback_header_height),
    );
    report(
        "sticky cta",
        sticky_cta::init(window, document, config.mobile_breakpoint),
    );
    report(
        "lazy images",
        lazy_load::init(window, document, &config.lazysizes_src),
    );
    if config.scroll_progress {
        report("scroll progress", scroll_progress::init(window, document));
    }
}

fn show_cookie_banner(document: &Document, config: &PageConfig) -> Result<bool, BindError> {
    let store = Rc::new(consent::BrowserStorage::local()?);
    cookie_banner::init(
        document,
        store,
        &config.consent_key,
        &config.privacy_policy_href,
    )
}

/// Shows the consent banner once `cookie_banner_delay_ms` has passed, keeping
/// it off the first paint.
pub fn schedule_cookie_banner(document: Document, config: Rc<PageConfig>) {
    spawn_local(async move {
        TimeoutFuture::new(config.cookie_banner_delay_ms).await;
        report("cookie banner", show_cookie_banner(&document, &config));
    });
}

fn when_ready(document: &Document, ready: impl FnOnce() + 'static) -> Result<(), BindError> {
    if document.ready_state() == "loading" {
        dom::listen_once(document, "DOMContentLoaded", ready)
    } else {
        // The module usually loads after parsing has finished
        ready();
        Ok(())
    }
}

fn page() -> Result<(Window, Document), BindError> {
    let window = dom::window()?;
    let document = window.document().ok_or(BindError::NoDocument)?;
    Ok((window, document))
}

/// Entry point: wires every page behavior to the current document.
pub fn start() {
    let (window, document) = match page() {
        Ok(page) => page,
        Err(e) => {
            warn!("Landing page behaviors unavailable: {}", e);
            return;
        }
    };
    // `#landing-config` may sit after the module script; ready-time components read it again
    let config = Rc::new(PageConfig::from_document(&document));
    greeting::print();

    report("preload hint", preload::init(&document));
    report(
        "cta tracking",
        cta_tracking::init(
            &window,
            &document,
            Rc::new(analytics::PageGlobals::new(window.clone())),
            &config.checkout,
        ),
    );

    schedule_cookie_banner(document.clone(), config);

    {
        let window = window.clone();
        let ready_document = document.clone();
        let result = when_ready(&document, move || {
            let config = PageConfig::from_document(&ready_document);
            init_components(&window, &ready_document, &config);
            info!("Landing page behaviors ready");
        });
        report("document ready", result);
    }
}
