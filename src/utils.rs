//! Content-type inference for uploaded assets

use mime_guess::mime;

/// Content type used when the extension is unknown
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Infer the `Content-Type` of an asset from its file name
///
/// Text types carry `; charset=utf-8`, matching what GitHub serves back for
/// them. Unknown or missing extensions fall back to `application/octet-stream`.
pub fn content_type_for(file_name: &str) -> String {
  match mime_guess::from_path(file_name).first() {
    Some(guess) if guess.type_() == mime::TEXT => format!("{}; charset=utf-8", guess.essence_str()),
    Some(guess) => guess.essence_str().to_string(),
    None => DEFAULT_CONTENT_TYPE.to_string(),
  }
}
