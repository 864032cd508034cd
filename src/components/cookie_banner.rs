use std::rc::Rc;

use log::{debug, warn};
use web_sys::{Document, MouseEvent};
use yew::prelude::*;

use crate::consent::{self, ConsentStore};
use crate::error::BindError;

pub const BANNER_CLASS: &str = "cookie-banner";
pub const ACCEPT_BUTTON_ID: &str = "accept-cookies";

#[derive(Properties, PartialEq)]
pub struct CookieBannerProps {
    pub privacy_href: AttrValue,
    pub on_accept: Callback<()>,
}

#[function_component(CookieBanner)]
pub fn cookie_banner(props: &CookieBannerProps) -> Html {
    let onclick = {
        let on_accept = props.on_accept.clone();
        Callback::from(move |_: MouseEvent| on_accept.emit(()))
    };

    html! {
        <>
            <p>
                {"Nous utilisons des cookies pour améliorer votre expérience. En continuant à naviguer, vous acceptez notre "}
                <a href={props.privacy_href.clone()} style="color: #d69e2e; text-decoration: underline;">
                    {"politique de confidentialité"}
                </a>
                {"."}
            </p>
            <button id={ACCEPT_BUTTON_ID} {onclick}>{"Accepter"}</button>
        </>
    }
}

/// Whether a banner should go up: no stored decision and none already on screen.
pub fn should_show(store: &dyn ConsentStore, key: &str, banner_present: bool) -> bool {
    !banner_present && !consent::has_decided(store, key)
}

/// Inserts the banner unless the visitor already accepted. Returns whether it was inserted.
pub fn init(
    document: &Document,
    store: Rc<dyn ConsentStore>,
    consent_key: &str,
    privacy_href: &str,
) -> Result<bool, BindError> {
    let present = document
        .query_selector(&format!(".{}", BANNER_CLASS))?
        .is_some();
    if !should_show(store.as_ref(), consent_key, present) {
        debug!("Cookie banner not needed");
        return Ok(false);
    }

    let body = document.body().ok_or_else(|| BindError::missing("body"))?;
    let host = document.create_element("div")?;
    host.set_class_name(BANNER_CLASS);
    body.append_child(&host)?;

    let on_accept = {
        let host = host.clone();
        let key = consent_key.to_string();
        Callback::from(move |_| {
            if let Err(e) = consent::accept(store.as_ref(), &key) {
                warn!("Could not store cookie consent: {}", e);
            }
            host.remove();
        })
    };

    yew::Renderer::<CookieBanner>::with_root_and_props(
        host,
        CookieBannerProps {
            privacy_href: AttrValue::from(privacy_href.to_string()),
            on_accept,
        },
    )
    .render();

    debug!("Cookie banner shown");
    Ok(true)
}
