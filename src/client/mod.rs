//! Client layer: owns configuration and the queue, orchestrates transport calls.

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{Balance, ClientConfig, ErrorCode, MessageQueue, SendResult};
use crate::transport::GatewayReply;

const DEFAULT_SEND_ENDPOINT: &str = "http://smsc.ru/sys/send.php";
const DEFAULT_BALANCE_ENDPOINT: &str = "http://smsc.ru/sys/balance.php";

/// Raw HTTP reply handed back by an [`HttpTransport`].
///
/// The body is left as bytes; the client decodes it as UTF-8.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Blocking HTTP GET seam used by [`SmscClient`].
///
/// Implementations must read the whole body before returning and release the
/// connection on every path. Timeouts and cancellation are the transport's concern.
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>> {
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmscClient`].
///
/// Callers should branch on the variant; only [`SmscError::Rejected`] carries
/// gateway text, and it is preserved verbatim.
pub enum SmscError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, body not readable as UTF-8).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The reply had a recognized shape but could not be decoded.
    #[error("encoding error: {0}")]
    Encoding(#[source] Box<dyn StdError + Send + Sync>),

    /// SMSC answered with an `error` / `error_code` payload.
    #[error("gateway rejected request: {message} (code {code})")]
    Rejected { message: String, code: ErrorCode },

    /// SMSC accepted a different number of messages than were queued.
    #[error("gateway accepted {actual} messages, expected {expected}")]
    CountMismatch { expected: usize, actual: i64 },

    /// The reply matched neither the success nor the error shape.
    #[error("unrecognized gateway response: {body}")]
    UnrecognizedResponse { body: String },
}

impl SmscError {
    /// The gateway error code, if SMSC rejected the request.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Rejected { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[derive(Clone)]
/// Builder for [`SmscClient`].
///
/// Use this when you need custom endpoints, a timeout, a user-agent, or your own
/// [`HttpTransport`].
pub struct SmscClientBuilder {
    config: ClientConfig,
    send_endpoint: String,
    balance_endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl SmscClientBuilder {
    /// Create a builder with the default endpoints and the default reqwest transport.
    pub fn new(
        message_prefix: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            config: ClientConfig::new(message_prefix, login, password, sender),
            send_endpoint: DEFAULT_SEND_ENDPOINT.to_owned(),
            balance_endpoint: DEFAULT_BALANCE_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
            transport: None,
        }
    }

    /// Point both endpoints at another host, e.g. `https://smsc.kz`.
    pub fn endpoint_base(mut self, base: impl AsRef<str>) -> Self {
        let base = base.as_ref().trim_end_matches('/');
        self.send_endpoint = format!("{base}/sys/send.php");
        self.balance_endpoint = format!("{base}/sys/balance.php");
        self
    }

    /// Override the URL used for `send.php`.
    pub fn send_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.send_endpoint = endpoint.into();
        self
    }

    /// Override the URL used for `balance.php`.
    pub fn balance_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.balance_endpoint = endpoint.into();
        self
    }

    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.config.set_charset(charset);
        self
    }

    pub fn transliteration(mut self, enable: bool) -> Self {
        self.config.set_transliteration(enable);
        self
    }

    /// Set a timeout for the whole request. Ignored when a custom transport is set.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header. Ignored when a custom transport is set.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use `transport` instead of the built-in reqwest client.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build a [`SmscClient`].
    pub fn build(self) -> Result<SmscClient, SmscError> {
        let http = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::blocking::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder
                    .build()
                    .map_err(|err| SmscError::Transport(Box::new(err)))?;
                Arc::new(ReqwestTransport { client })
            }
        };

        Ok(SmscClient {
            config: self.config,
            queue: MessageQueue::new(),
            send_endpoint: self.send_endpoint,
            balance_endpoint: self.balance_endpoint,
            http,
        })
    }
}

#[derive(Clone)]
/// Blocking SMSC client with its own message queue.
///
/// Queue messages with [`SmscClient::enqueue`], then dispatch them all in one
/// `send.php` request with [`SmscClient::send`]. The queue survives `send`, on
/// success and on failure; call [`SmscClient::clear`] to drop it.
///
/// Mutation needs `&mut self`. Wrap the client in a `Mutex` to share it
/// between threads.
pub struct SmscClient {
    config: ClientConfig,
    queue: MessageQueue,
    send_endpoint: String,
    balance_endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl SmscClient {
    /// Create a client using the default endpoints and transport.
    ///
    /// `message_prefix` is prepended to every message text.
    pub fn new(
        message_prefix: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            config: ClientConfig::new(message_prefix, login, password, sender),
            queue: MessageQueue::new(),
            send_endpoint: DEFAULT_SEND_ENDPOINT.to_owned(),
            balance_endpoint: DEFAULT_BALANCE_ENDPOINT.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::blocking::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(
        message_prefix: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
        sender: impl Into<String>,
    ) -> SmscClientBuilder {
        SmscClientBuilder::new(message_prefix, login, password, sender)
    }

    pub fn enqueue(&mut self, phone: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.queue.enqueue(phone, text);
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.queue.clear();
        self
    }

    pub fn set_sender(&mut self, sender: impl Into<String>) -> &mut Self {
        self.config.set_sender(sender);
        self
    }

    pub fn set_transliteration(&mut self, enable: bool) -> &mut Self {
        self.config.set_transliteration(enable);
        self
    }

    /// Set the request charset (default `utf-8`).
    pub fn set_charset(&mut self, charset: impl Into<String>) -> &mut Self {
        self.config.set_charset(charset);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn queue(&self) -> &MessageQueue {
        &self.queue
    }

    /// The exact URL [`SmscClient::send`] would request right now.
    ///
    /// Contains the password; do not log it.
    pub fn send_url(&self) -> String {
        let params = crate::transport::encode_send_query(&self.config, &self.queue);
        crate::transport::build_url(&self.send_endpoint, &params)
    }

    /// Send every queued message in a single request.
    ///
    /// Errors:
    /// - [`SmscError::Transport`] when the request or body read fails,
    /// - [`SmscError::Rejected`] when SMSC returns an error payload,
    /// - [`SmscError::CountMismatch`] when SMSC accepted a different number of messages,
    /// - [`SmscError::Encoding`] / [`SmscError::UnrecognizedResponse`] for unusable replies.
    pub fn send(&self) -> Result<SendResult, SmscError> {
        let expected = self.queue.len();
        tracing::debug!(
            messages = expected,
            endpoint = %self.send_endpoint,
            "dispatching SMS batch"
        );

        let body = self.get(&self.send_url())?;
        let reply = crate::transport::decode_send_json_response(&body)
            .map_err(|err| SmscError::Encoding(Box::new(err)))?;

        match reply {
            GatewayReply::Success(parsed) if usize::try_from(parsed.cnt) == Ok(expected) => {
                Ok(SendResult {
                    batch_id: parsed.id,
                    accepted_count: expected,
                })
            }
            GatewayReply::Success(parsed) => {
                tracing::warn!(
                    batch_id = parsed.id,
                    expected,
                    actual = parsed.cnt,
                    "gateway accepted a different number of messages"
                );
                Err(SmscError::CountMismatch {
                    expected,
                    actual: parsed.cnt,
                })
            }
            other => Err(reply_error(other, body)),
        }
    }

    /// Fetch the account balance from `balance.php`.
    pub fn balance(&self) -> Result<Balance, SmscError> {
        let params = crate::transport::encode_balance_query(&self.config);
        let body = self.get(&crate::transport::build_url(&self.balance_endpoint, &params))?;
        let reply = crate::transport::decode_balance_json_response(&body)
            .map_err(|err| SmscError::Encoding(Box::new(err)))?;

        match reply {
            GatewayReply::Success(balance) => Ok(balance),
            other => Err(reply_error(other, body)),
        }
    }

    fn get(&self, url: &str) -> Result<String, SmscError> {
        let response = self.http.get(url).map_err(SmscError::Transport)?;
        if !(200..=299).contains(&response.status) {
            // SMSC reports failures in the body; keep going and let the shape decide.
            tracing::warn!(status = response.status, "unexpected HTTP status from gateway");
        }
        String::from_utf8(response.body).map_err(|err| SmscError::Transport(Box::new(err)))
    }
}

fn reply_error<T>(reply: GatewayReply<T>, body: String) -> SmscError {
    match reply {
        GatewayReply::Rejected { message, code } => {
            tracing::warn!(code = code.as_i32(), %message, "gateway rejected request");
            SmscError::Rejected { message, code }
        }
        GatewayReply::Success(_) | GatewayReply::Unrecognized => {
            tracing::warn!("gateway response matched no known shape");
            SmscError::UnrecognizedResponse { body }
        }
    }
}
