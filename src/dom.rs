use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, NodeList, Window};

use crate::error::BindError;

pub fn window() -> Result<Window, BindError> {
    web_sys::window().ok_or(BindError::NoWindow)
}

pub fn document() -> Result<Document, BindError> {
    window()?.document().ok_or(BindError::NoDocument)
}

/// Looks up `#id` and casts it, failing with the selector so the log says what was missing.
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, BindError> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| BindError::MissingElement(format!("#{}", id)))?;
    element
        .dyn_into::<T>()
        .map_err(|_| BindError::WrongType(format!("#{}", id), std::any::type_name::<T>()))
}

pub fn query(document: &Document, selector: &str) -> Result<Option<Element>, BindError> {
    Ok(document.query_selector(selector)?)
}

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, BindError> {
    Ok(elements(&document.query_selector_all(selector)?))
}

pub fn query_all_within(parent: &Element, selector: &str) -> Result<Vec<Element>, BindError> {
    Ok(elements(&parent.query_selector_all(selector)?))
}

pub fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Viewport width in CSS pixels; 0 when the browser refuses to say.
pub fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

pub fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn set_class(element: &Element, class: &str, on: bool) -> Result<(), BindError> {
    element.class_list().toggle_with_force(class, on)?;
    Ok(())
}

/// Attaches `handler` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, kind: &str, handler: F) -> Result<(), BindError>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Same as [`listen`] but registered `{ passive: true }`. Handlers passed here
/// must never call `prevent_default`.
pub fn listen_passive<F>(target: &EventTarget, kind: &str, handler: F) -> Result<(), BindError>
where
    F: FnMut(Event) + 'static,
{
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        callback.as_ref().unchecked_ref(),
        &options,
    )?;
    callback.forget();
    Ok(())
}

/// Runs `handler` once, after the listener fires.
pub fn listen_once<F>(target: &EventTarget, kind: &str, handler: F) -> Result<(), BindError>
where
    F: FnOnce() + 'static,
{
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    let mut handler = Some(handler);
    let callback = Closure::wrap(Box::new(move |_: Event| {
        if let Some(handler) = handler.take() {
            handler();
        }
    }) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        callback.as_ref().unchecked_ref(),
        &options,
    )?;
    callback.forget();
    Ok(())
}

/// Reads a global such as `window.gtag`, treating `undefined` and `null` as absent.
pub fn global(window: &Window, name: &str) -> Option<wasm_bindgen::JsValue> {
    let value = web_sys::js_sys::Reflect::get(window, &name.into()).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

pub fn global_function(window: &Window, name: &str) -> Option<web_sys::js_sys::Function> {
    global(window, name)?.dyn_into().ok()
}
