//! `data:` URI construction

/// Build `data:<media_type>;base64,<payload>` from an already encoded payload
#[must_use]
pub fn data_url(media_type: &str, base64_payload: &str) -> String {
    let mut encoded = String::with_capacity(base64_payload.len() + media_type.len() + 13);

    encoded.push_str("data:");
    encoded.push_str(media_type);
    encoded.push_str(";base64,");
    encoded.push_str(base64_payload);

    encoded
}
