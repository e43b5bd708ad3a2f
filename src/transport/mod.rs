//! Transport layer: query encoding and SMSC reply decoding.

mod account;
mod reply;
mod send_sms;

pub use account::{decode_balance_json_response, encode_balance_query};
pub use reply::GatewayReply;
pub use send_sms::{decode_send_json_response, encode_send_query};

/// Append form-encoded `params` to `endpoint`.
pub fn build_url(endpoint: &str, params: &[(String, String)]) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{endpoint}{separator}{query}")
}
