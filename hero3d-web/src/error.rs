/// Errors raised while booting or drawing the hero page
use hero3d_core::HeroError;
use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("required element `{selector}` is missing")]
    MissingElement { selector: String },
    #[error("element `{selector}` is not a {expected}")]
    WrongElementType {
        selector: String,
        expected: &'static str,
    },
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("WebGL2 is not available")]
    WebGlUnavailable,
    #[error("shader error: {0}")]
    Shader(String),
    #[error("javascript error: {0}")]
    Js(String),
    #[error(transparent)]
    Config(#[from] HeroError),
}

pub type WebResult<T> = Result<T, WebError>;

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        WebError::Js(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_selector() {
        let err = WebError::MissingElement {
            selector: "#hero-canvas".to_string(),
        };
        assert_eq!(err.to_string(), "required element `#hero-canvas` is missing");

        let err = WebError::WrongElementType {
            selector: ".hero".to_string(),
            expected: "HTMLElement",
        };
        assert!(err.to_string().contains("HTMLElement"));
    }

    #[test]
    fn config_errors_convert() {
        let err: WebError = HeroError::InvalidConfig("easing must be in (0, 1]".to_string()).into();
        assert!(matches!(err, WebError::Config(_)));
        assert!(err.to_string().contains("easing"));
    }
}
