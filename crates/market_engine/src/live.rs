//! Event names carried by the real-time socket.
//!
//! Frames arrive as a bare name (`new_bid`), a JSON array whose first element
//! is the name (`["new_bid", {...}]`), or the same array behind a numeric
//! packet prefix (`42["new_bid"]`). Payloads are ignored.

/// Extracts the event name from a socket frame; `None` for control frames.
pub fn event_name(frame: &str) -> Option<String> {
    let frame = frame.trim();
    let body = frame.trim_start_matches(|c: char| c.is_ascii_digit());

    if body.starts_with('[') {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        return value
            .as_array()?
            .first()?
            .as_str()
            .map(ToOwned::to_owned);
    }

    // A bare packet type such as "2" (ping) leaves nothing behind.
    let is_name = !body.is_empty()
        && body.len() == frame.len()
        && body
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    is_name.then(|| body.to_string())
}
