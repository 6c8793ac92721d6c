//! Parameter transport location.

use crate::model::ParameterLocation;

/// Media types whose parameters travel as form fields.
pub const FORM_MEDIA_TYPES: &[&str] = &["multipart/form-data", "application/x-www-form-urlencoded"];

/// HTTP methods whose un-pathed parameters default to the request body.
pub const BODY_METHODS: &[&str] = &["put", "post"];

/// Decide where a documented parameter travels.
///
/// First match wins:
/// 1. form `consumes` → `path` if bound by the handler signature, else `formData`
/// 2. `put`/`post` → `path` if `{name}` is in the template, else `body`
/// 3. anything else → `path` if templated, else `query` if bound, else `header`
pub fn classify_location(
    name: &str,
    method: &str,
    consumes: &str,
    path: &str,
    in_signature: bool,
) -> ParameterLocation {
    if FORM_MEDIA_TYPES.contains(&consumes) {
        return if in_signature {
            ParameterLocation::Path
        } else {
            ParameterLocation::FormData
        };
    }

    if is_path_parameter(name, path) {
        ParameterLocation::Path
    } else if BODY_METHODS.contains(&method) {
        ParameterLocation::Body
    } else if in_signature {
        ParameterLocation::Query
    } else {
        ParameterLocation::Header
    }
}

/// Whether `{name}` occurs in the path template.
pub fn is_path_parameter(name: &str, path: &str) -> bool {
    path.contains(&format!("{{{}}}", name))
}
