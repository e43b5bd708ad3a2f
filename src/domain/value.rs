use std::fmt;

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMSC account login (`login`).
///
/// Passed through as provided; the gateway is the authority on what is valid.
pub struct Login(String);

impl Login {
    /// Query parameter name used by SMSC (`login`).
    pub const FIELD: &'static str = "login";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the login.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// SMSC account password (`psw`).
///
/// `Debug` output is redacted.
pub struct Password(String);

impl Password {
    /// Query parameter name used by SMSC (`psw`).
    pub const FIELD: &'static str = "psw";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender name shown to recipients (`sender`).
///
/// The value must be registered in your SMSC account.
pub struct SenderId(String);

impl SenderId {
    /// Query parameter name used by SMSC (`sender`).
    pub const FIELD: &'static str = "sender";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Character set the gateway should assume for request text (`charset`).
pub struct Charset(String);

impl Charset {
    /// Query parameter name used by SMSC (`charset`).
    pub const FIELD: &'static str = "charset";

    /// Charset used when none is configured.
    pub const DEFAULT: &'static str = "utf-8";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the charset name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// The message queue accepts any string as a phone; this type is an opt-in way to
/// normalize user input before enqueueing it. Equality is based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
}

impl PhoneNumber {
    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: "phone" });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164 })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.e164
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// SMSC `error_code` value.
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct ErrorCode(i32);

impl ErrorCode {
    /// Construct an error code from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by SMSC.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Map this code to a known error code variant, if one exists.
    pub fn known(self) -> Option<KnownErrorCode> {
        KnownErrorCode::from_code(self.0)
    }

    /// Returns `true` if this code is considered transient by the crate.
    pub fn is_retryable(self) -> bool {
        matches!(self.known(), Some(kind) if kind.is_retryable())
    }

    /// Returns `true` if this code means the credentials were rejected.
    pub fn is_auth_error(self) -> bool {
        matches!(self.known(), Some(kind) if kind.is_auth_error())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Error codes documented for the SMSC `send.php` and `balance.php` endpoints.
pub enum KnownErrorCode {
    InvalidParameters,
    InvalidCredentials,
    InsufficientFunds,
    IpTemporarilyBlocked,
    InvalidDateFormat,
    MessageForbidden,
    InvalidPhoneFormat,
    Undeliverable,
    DuplicateRequest,
}

impl KnownErrorCode {
    /// Convert a raw SMSC integer code into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            1 => Self::InvalidParameters,
            2 => Self::InvalidCredentials,
            3 => Self::InsufficientFunds,
            4 => Self::IpTemporarilyBlocked,
            5 => Self::InvalidDateFormat,
            6 => Self::MessageForbidden,
            7 => Self::InvalidPhoneFormat,
            8 => Self::Undeliverable,
            9 => Self::DuplicateRequest,
            _ => return None,
        })
    }

    /// Whether waiting and sending the same batch again may succeed.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::IpTemporarilyBlocked | Self::DuplicateRequest)
    }

    pub fn is_auth_error(self) -> bool {
        matches!(self, Self::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_keep_values_verbatim() {
        assert_eq!(Login::new(" user ").as_str(), " user ");
        assert_eq!(Password::new("").as_str(), "");
        assert_eq!(SenderId::new("SMSC").as_str(), "SMSC");
        assert_eq!(Charset::new("koi8-r").as_str(), "koi8-r");
    }

    #[test]
    fn charset_defaults_to_utf8() {
        assert_eq!(Charset::default().as_str(), "utf-8");
    }

    #[test]
    fn password_debug_is_redacted() {
        let rendered = format!("{:?}", Password::new("hunter2"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn phone_number_parsing_and_equality_use_e164() {
        let p1 = PhoneNumber::parse(None, "+79251234567").unwrap();
        let p2 = PhoneNumber::parse(None, "+7 925 123-45-67").unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.e164(), "+79251234567");
        assert_eq!(p2.raw(), "+7 925 123-45-67");

        let as_string: String = p2.into();
        assert_eq!(as_string, "+79251234567");
        assert!(PhoneNumber::parse(None, "not-a-number").is_err());
        assert!(matches!(
            PhoneNumber::parse(None, "   "),
            Err(ValidationError::Empty { field: "phone" })
        ));
    }

    #[test]
    fn error_code_classification() {
        let auth = ErrorCode::new(2);
        assert_eq!(auth.known(), Some(KnownErrorCode::InvalidCredentials));
        assert!(auth.is_auth_error());
        assert!(!auth.is_retryable());

        let duplicate = ErrorCode::new(9);
        assert!(duplicate.is_retryable());

        let unknown = ErrorCode::new(999);
        assert_eq!(unknown.known(), None);
        assert!(!unknown.is_retryable());
        assert!(!unknown.is_auth_error());
        assert_eq!(unknown.to_string(), "999");
    }
}
