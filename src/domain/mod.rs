//! Domain layer: configuration, the message queue, and result types (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{ClientConfig, MessageQueue, PendingMessage};
pub use response::{Balance, SendResult};
pub use validation::ValidationError;
pub use value::{Charset, ErrorCode, KnownErrorCode, Login, Password, PhoneNumber, SenderId};
