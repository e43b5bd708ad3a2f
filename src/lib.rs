//! Typed blocking Rust client for the SMSC (`smsc.ru`) batch SMS HTTP API.
//!
//! The crate is split into a domain layer (configuration, the message queue, and
//! result types), a transport layer for wire-format quirks, and a small client
//! layer that owns a queue and performs exactly one HTTP request per call.
//!
//! ```rust,no_run
//! use smsc::SmscClient;
//!
//! fn main() -> Result<(), smsc::SmscError> {
//!     let mut client = SmscClient::new("", "login", "password", "SENDER");
//!     client
//!         .set_transliteration(true)
//!         .enqueue("79251234567", "hello")
//!         .enqueue("79257654321", "hello again");
//!
//!     let result = client.send()?;
//!     println!("batch {} accepted {}", result.batch_id, result.accepted_count);
//!     client.clear();
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{HttpResponse, HttpTransport, SmscClient, SmscClientBuilder, SmscError};
pub use domain::{
    Balance, Charset, ClientConfig, ErrorCode, KnownErrorCode, Login, MessageQueue, Password,
    PendingMessage, PhoneNumber, SendResult, SenderId, ValidationError,
};
