use serde_json::Value;

use crate::{models::envelope::Envelope, providers::ProviderError};

/// Expected JSON type of an envelope's `data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    Array,
    Object,
}

/// Decodes a 2xx body into an envelope.
pub fn decode_envelope(body: &[u8]) -> Result<Envelope<Value>, ProviderError> {
    serde_json::from_slice(body).map_err(|e| ProviderError::Decode(e.to_string()))
}

/// Unwraps a decoded envelope into its payload.
///
/// `success: false` becomes [`ProviderError::Unsuccessful`] carrying the
/// server's message; missing or wrongly-typed `data` becomes
/// [`ProviderError::Decode`].
pub fn into_payload(
    envelope: Envelope<Value>,
    shape: PayloadShape,
) -> Result<Envelope<Value>, ProviderError> {
    if !envelope.success {
        let message = envelope
            .message
            .clone()
            .unwrap_or_else(|| "request was not successful".to_string());
        return Err(ProviderError::Unsuccessful(message));
    }
    let ok = match (&envelope.data, shape) {
        (Some(Value::Array(_)), PayloadShape::Array) => true,
        (Some(Value::Object(_)), PayloadShape::Object) => true,
        _ => false,
    };
    if !ok {
        return Err(ProviderError::Decode(format!(
            "expected `data` to be an {}",
            match shape {
                PayloadShape::Array => "array",
                PayloadShape::Object => "object",
            }
        )));
    }
    Ok(envelope)
}

/// Builds the error for a non-2xx answer, preferring the envelope's message.
pub fn status_error(status: u16, body: &[u8]) -> ProviderError {
    let message = serde_json::from_slice::<Envelope<Value>>(body)
        .ok()
        .and_then(|env| env.message)
        .or_else(|| {
            let text = String::from_utf8_lossy(body).trim().to_string();
            (!text.is_empty()).then_some(text)
        })
        .unwrap_or_else(|| "Unknown API error".to_string());
    ProviderError::Api { status, message }
}
