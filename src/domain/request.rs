use crate::domain::value::{Charset, Login, Password, SenderId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMessage {
    phone: String,
    text: String,
}

impl PendingMessage {
    pub fn new(phone: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            text: text.into(),
        }
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered batch of messages waiting to be sent.
///
/// Insertion order is send order. Phones and texts are opaque: nothing is
/// validated or normalized here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageQueue {
    messages: Vec<PendingMessage>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, phone: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.messages.push(PendingMessage::new(phone, text));
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.messages.clear();
        self
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[PendingMessage] {
        &self.messages
    }
}

/// Per-client settings shared by every send.
///
/// `message_prefix` is prepended to the body of every queued message.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    message_prefix: String,
    login: Login,
    password: Password,
    sender: SenderId,
    charset: Charset,
    translit: bool,
}

impl ClientConfig {
    /// Create a config with the `utf-8` charset and transliteration disabled.
    pub fn new(
        message_prefix: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            message_prefix: message_prefix.into(),
            login: Login::new(login),
            password: Password::new(password),
            sender: SenderId::new(sender),
            charset: Charset::default(),
            translit: false,
        }
    }

    pub fn message_prefix(&self) -> &str {
        &self.message_prefix
    }

    pub fn login(&self) -> &Login {
        &self.login
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn sender(&self) -> &SenderId {
        &self.sender
    }

    pub fn charset(&self) -> &Charset {
        &self.charset
    }

    pub fn translit(&self) -> bool {
        self.translit
    }

    pub fn set_sender(&mut self, sender: impl Into<String>) -> &mut Self {
        self.sender = SenderId::new(sender);
        self
    }

    pub fn set_charset(&mut self, charset: impl Into<String>) -> &mut Self {
        self.charset = Charset::new(charset);
        self
    }

    pub fn set_transliteration(&mut self, enable: bool) -> &mut Self {
        self.translit = enable;
        self
    }
}
