use serde::de::DeserializeOwned;

use crate::error::{DecodeError, DecodeResult};

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> DecodeResult<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    let value = serde_path_to_error::deserialize::<_, T>(&mut *de).map_err(into_decode_error)?;
    de.end().map_err(trailing_input_error)?;
    Ok(value)
}

pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> DecodeResult<T> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize::<_, T>(&mut *de).map_err(into_decode_error)?;
    de.end().map_err(trailing_input_error)?;
    Ok(value)
}

/// Same as [`from_str_with_path`] for a document that was already parsed
/// (e.g. after a JSON pointer selected a sub-node).
pub fn from_value_with_path<T: DeserializeOwned>(value: serde_json::Value) -> DecodeResult<T> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(into_decode_error)
}

fn into_decode_error(err: serde_path_to_error::Error<serde_json::Error>) -> DecodeError {
    let path = err.path().to_string();
    DecodeError::Json { path, source: err.into_inner() }
}

/// Anything but whitespace after the document; reported at the root path.
fn trailing_input_error(source: serde_json::Error) -> DecodeError {
    DecodeError::Json { path: ".".to_string(), source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::TypeProperty;

    #[test]
    fn missing_name_reports_the_field() {
        let err = from_str_with_path::<TypeProperty>(r#"{"type":{"scalar":"int"}}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `name`"), "{err}");
    }

    #[test]
    fn nested_type_failure_carries_its_path() {
        let src = r#"{
            "name": "user",
            "type": {"object": {"name": "User", "properties": [
                {"name": "age", "type": {"scalar": "integer"}}
            ]}}
        }"#;
        let err = from_str_with_path::<TypeProperty>(src).unwrap_err();
        let path = err.path().expect("structural error");
        assert!(path.starts_with("type") && path.contains("properties[0]"), "{path}");
        assert!(err.to_string().contains("unknown variant `integer`"), "{err}");
    }

    #[test]
    fn slice_and_value_variants_agree() {
        let src = r#"{"name":"age","type":{"scalar":"int"},"annotation":null}"#;
        let a: TypeProperty = from_slice_with_path(src.as_bytes()).unwrap();
        let b: TypeProperty = from_value_with_path(serde_json::from_str(src).unwrap()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.annotation(), None);
    }

    #[test]
    fn trailing_input_is_rejected() {
        let src = r#"{"name":"age","type":{"scalar":"int"}} {"name":"oops"} trailing"#;
        assert!(serde_json::from_str::<TypeProperty>(src).is_err());

        let err = from_str_with_path::<TypeProperty>(src).unwrap_err();
        assert_eq!(err.path(), Some("."));
        assert!(err.to_string().contains("trailing characters"), "{err}");
        assert!(from_slice_with_path::<TypeProperty>(src.as_bytes()).is_err());

        let padded = "  {\"name\":\"age\",\"type\":{\"scalar\":\"int\"}}\n\t ";
        let p: TypeProperty = from_str_with_path(padded).unwrap();
        assert_eq!(p.name(), "age");
    }
}
