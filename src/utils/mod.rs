//! Project-specific utilities live here.

/// Presence check shared by request validation and the repository layer:
/// a text field counts as present when it has a non-whitespace character.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Same check for optional text, as it arrives from a request body.
pub fn is_present_opt(value: Option<&str>) -> bool {
    value.is_some_and(is_present)
}
