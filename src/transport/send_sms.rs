use serde::Deserialize;

use super::reply::{GatewayReply, JSON_FORMAT, TransportError, probe_and_decode};
use crate::domain::{Charset, ClientConfig, Login, MessageQueue, Password, SenderId};

const SUCCESS_MARKER: &str = "\"cnt\"";

/// Success payload. A missing `id` decodes as `0`; `cnt` is signed so that any
/// integer the gateway reports can be compared against the queue length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SendJsonResponse {
    #[serde(default)]
    pub id: i64,
    pub cnt: i64,
}

/// Build the `list` payload: one `<phone>:<prefix><text>` line per message.
///
/// Newlines inside a text are escaped as the two characters `\n` so that each
/// message stays on its own line.
pub fn encode_message_list(prefix: &str, queue: &MessageQueue) -> String {
    queue
        .messages()
        .iter()
        .map(|message| {
            format!(
                "{}:{}{}",
                message.phone(),
                prefix,
                message.text().replace('\n', "\\n")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn encode_send_query(config: &ClientConfig, queue: &MessageQueue) -> Vec<(String, String)> {
    let translit = if config.translit() { "1" } else { "0" };

    vec![
        (Login::FIELD.to_owned(), config.login().as_str().to_owned()),
        (
            Password::FIELD.to_owned(),
            config.password().as_str().to_owned(),
        ),
        (
            SenderId::FIELD.to_owned(),
            config.sender().as_str().to_owned(),
        ),
        (
            "list".to_owned(),
            encode_message_list(config.message_prefix(), queue),
        ),
        ("translit".to_owned(), translit.to_owned()),
        (
            Charset::FIELD.to_owned(),
            config.charset().as_str().to_owned(),
        ),
        (JSON_FORMAT.0.to_owned(), JSON_FORMAT.1.to_owned()),
    ]
}

pub fn decode_send_json_response(
    body: &str,
) -> Result<GatewayReply<SendJsonResponse>, TransportError> {
    probe_and_decode(body, SUCCESS_MARKER)
}

#[cfg(test)]
mod tests {
    use crate::domain::ErrorCode;

    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::new("", "user", "secret", "SMSC")
    }

    #[test]
    fn encode_query_in_stable_order() {
        let mut queue = MessageQueue::new();
        queue.enqueue("79251234567", "hello");

        let params = encode_send_query(&config(), &queue);
        assert_eq!(
            params,
            vec![
                ("login".to_owned(), "user".to_owned()),
                ("psw".to_owned(), "secret".to_owned()),
                ("sender".to_owned(), "SMSC".to_owned()),
                ("list".to_owned(), "79251234567:hello".to_owned()),
                ("translit".to_owned(), "0".to_owned()),
                ("charset".to_owned(), "utf-8".to_owned()),
                ("fmt".to_owned(), "3".to_owned()),
            ]
        );
    }

    #[test]
    fn list_has_one_line_per_message_with_prefix_and_escaped_newlines() {
        let mut queue = MessageQueue::new();
        queue
            .enqueue("79250000001", "first\nsecond")
            .enqueue("79250000002", "plain")
            .enqueue("79250000003", "a\n\nb");

        let list = encode_message_list("[shop] ", &queue);
        assert_eq!(
            list,
            "79250000001:[shop] first\\nsecond\n79250000002:[shop] plain\n79250000003:[shop] a\\n\\nb"
        );
        assert_eq!(list.lines().count(), queue.len());
    }

    #[test]
    fn empty_queue_encodes_empty_list() {
        assert_eq!(encode_message_list("prefix", &MessageQueue::new()), "");
    }

    #[test]
    fn translit_flag_follows_last_setting() {
        let queue = MessageQueue::new();
        let mut config = config();

        config.set_transliteration(true);
        let params = encode_send_query(&config, &queue);
        assert!(params.contains(&("translit".to_owned(), "1".to_owned())));

        config.set_transliteration(false);
        let params = encode_send_query(&config, &queue);
        assert!(params.contains(&("translit".to_owned(), "0".to_owned())));
    }

    #[test]
    fn decode_success_shape_in_any_field_order() {
        let reply = decode_send_json_response(r#"{"cnt": 2, "id": 123}"#).unwrap();
        assert_eq!(
            reply,
            GatewayReply::Success(SendJsonResponse { id: 123, cnt: 2 })
        );
    }

    #[test]
    fn decode_error_shape() {
        let reply =
            decode_send_json_response(r#"{"error": "bad sender", "error_code": 5}"#).unwrap();
        assert_eq!(
            reply,
            GatewayReply::Rejected {
                message: "bad sender".to_owned(),
                code: ErrorCode::new(5),
            }
        );
    }

    #[test]
    fn decode_success_defaults_missing_id_and_keeps_signed_count() {
        let reply = decode_send_json_response(r#"{"cnt": 1}"#).unwrap();
        assert_eq!(reply, GatewayReply::Success(SendJsonResponse { id: 0, cnt: 1 }));

        let reply = decode_send_json_response(r#"{"id": 9, "cnt": -3}"#).unwrap();
        assert_eq!(reply, GatewayReply::Success(SendJsonResponse { id: 9, cnt: -3 }));
    }

    #[test]
    fn decode_success_marker_with_broken_payload_fails() {
        assert!(decode_send_json_response(r#"{"cnt": "two"}"#).is_err());
        assert!(decode_send_json_response(r#"{"id": 1, "cnt": 1"#).is_err());
    }
}
