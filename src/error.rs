use thiserror::Error;

/// Everything that can go wrong while setting up or driving the gallery.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("element #{0} is not a canvas")]
    NotACanvas(String),
    #[error("WebGL2 not supported")]
    WebGl2Unsupported,
    #[error("shader compile failed: {0}")]
    ShaderCompile(String),
    #[error("program link failed: {0}")]
    ProgramLink(String),
    #[error("failed to allocate {0}")]
    Resource(&'static str),
    #[error("attribute {0} not found in program")]
    MissingAttribute(&'static str),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("js error: {0}")]
    Js(String),
}

pub type Result<T, E = GalleryError> = std::result::Result<T, E>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for GalleryError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        match value.as_string() {
            Some(s) => GalleryError::Js(s),
            None => GalleryError::Js(format!("{value:?}")),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GalleryError> for wasm_bindgen::JsValue {
    fn from(err: GalleryError) -> Self {
        wasm_bindgen::JsError::new(&err.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_detail() {
        let err = GalleryError::ShaderCompile("ERROR: 0:3 'foo' undeclared".into());
        assert_eq!(err.to_string(), "shader compile failed: ERROR: 0:3 'foo' undeclared");
        assert_eq!(GalleryError::NotACanvas("canvas".into()).to_string(), "element #canvas is not a canvas");
    }

    #[test]
    fn missing_attribute_is_not_an_allocation_failure() {
        let err = GalleryError::MissingAttribute("aUv");
        assert_eq!(err.to_string(), "attribute aUv not found in program");
        assert!(!matches!(err, GalleryError::Resource(_)));
    }

    #[test]
    fn json_errors_convert() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: GalleryError = parse.unwrap_err().into();
        assert!(matches!(err, GalleryError::ConfigParse(_)));
    }
}
