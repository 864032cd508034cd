use thiserror::Error;
use wasm_bindgen::JsValue;

/// Why a component could not be activated.
///
/// None of these reach the visitor: the start-up sequence logs them and
/// moves on to the next component.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("required element `{0}` is missing")]
    MissingElement(String),
    #[error("element `{0}` is not a {1}")]
    WrongType(String, &'static str),
    #[error("local storage is unavailable")]
    NoStorage,
    #[error("javascript call failed: {0}")]
    Js(String),
}

impl BindError {
    pub fn missing(selector: &str) -> Self {
        BindError::MissingElement(selector.to_string())
    }

    /// Missing markup is the expected way for a page to opt out of a feature.
    pub fn is_missing_markup(&self) -> bool {
        matches!(self, BindError::MissingElement(_))
    }
}

impl From<JsValue> for BindError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        BindError::Js(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_elements_count_as_missing_markup() {
        assert!(BindError::missing("#hero").is_missing_markup());
        assert!(!BindError::NoStorage.is_missing_markup());
        assert!(!BindError::Js("boom".into()).is_missing_markup());
    }

    #[test]
    fn messages_name_the_selector() {
        assert_eq!(
            BindError::missing("#sticky-cta").to_string(),
            "required element `#sticky-cta` is missing"
        );
        assert_eq!(
            BindError::WrongType("#hero img".into(), "HtmlImageElement").to_string(),
            "element `#hero img` is not a HtmlImageElement"
        );
    }
}
