use serde::Deserialize;
use serde::de::Error as DeError;

use super::reply::{GatewayReply, JSON_FORMAT, TransportError, probe_and_decode};
use crate::domain::{Balance, ClientConfig, Login, Password};

const SUCCESS_MARKER: &str = "\"balance\"";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct BalanceJsonResponse {
    balance: BalanceAmount,
    #[serde(default)]
    currency: Option<String>,
}

/// Balance sent either as a JSON string or a JSON number.
///
/// Numbers keep their raw token so `10.50` stays `"10.50"`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BalanceAmount(String);

impl<'de> Deserialize<'de> for BalanceAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        match token.as_bytes().first().copied() {
            Some(b'"') => serde_json::from_str::<String>(token)
                .map(|value| Self(value.trim().to_owned()))
                .map_err(D::Error::custom),
            Some(b'-' | b'0'..=b'9') => Ok(Self(token.to_owned())),
            _ => Err(D::Error::custom("balance must be a JSON string or number")),
        }
    }
}

pub fn encode_balance_query(config: &ClientConfig) -> Vec<(String, String)> {
    vec![
        (Login::FIELD.to_owned(), config.login().as_str().to_owned()),
        (
            Password::FIELD.to_owned(),
            config.password().as_str().to_owned(),
        ),
        (JSON_FORMAT.0.to_owned(), JSON_FORMAT.1.to_owned()),
        ("cur".to_owned(), "1".to_owned()),
    ]
}

pub fn decode_balance_json_response(body: &str) -> Result<GatewayReply<Balance>, TransportError> {
    let reply = probe_and_decode::<BalanceJsonResponse>(body, SUCCESS_MARKER)?;
    Ok(match reply {
        GatewayReply::Success(parsed) => GatewayReply::Success(Balance {
            amount: parsed.balance.0,
            currency: parsed.currency,
        }),
        GatewayReply::Rejected { message, code } => GatewayReply::Rejected { message, code },
        GatewayReply::Unrecognized => GatewayReply::Unrecognized,
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::ErrorCode;

    use super::*;

    #[test]
    fn encode_balance_query_carries_credentials_only() {
        let config = ClientConfig::new("ignored", "user", "secret", "SMSC");
        assert_eq!(
            encode_balance_query(&config),
            vec![
                ("login".to_owned(), "user".to_owned()),
                ("psw".to_owned(), "secret".to_owned()),
                ("fmt".to_owned(), "3".to_owned()),
                ("cur".to_owned(), "1".to_owned()),
            ]
        );
    }

    #[test]
    fn decode_balance_supports_numeric_and_string_amounts() {
        let reply = decode_balance_json_response(r#"{"balance": "10.50", "currency": "RUR"}"#)
            .unwrap();
        assert_eq!(
            reply,
            GatewayReply::Success(Balance {
                amount: "10.50".to_owned(),
                currency: Some("RUR".to_owned()),
            })
        );

        let reply = decode_balance_json_response(r#"{"balance": 10.50}"#).unwrap();
        assert_eq!(
            reply,
            GatewayReply::Success(Balance {
                amount: "10.50".to_owned(),
                currency: None,
            })
        );
    }

    #[test]
    fn decode_balance_error_shape() {
        let reply =
            decode_balance_json_response(r#"{"error": "authorise error", "error_code": 2}"#)
                .unwrap();
        assert_eq!(
            reply,
            GatewayReply::Rejected {
                message: "authorise error".to_owned(),
                code: ErrorCode::new(2),
            }
        );
    }

    #[test]
    fn decode_balance_rejects_non_scalar_amount() {
        assert!(decode_balance_json_response(r#"{"balance": [1]}"#).is_err());
    }
}
