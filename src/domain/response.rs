#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Outcome of a batch the gateway accepted in full.
pub struct SendResult {
    /// Identifier the gateway assigned to the batch.
    pub batch_id: i64,
    /// Number of messages accepted; always equals the queue length at send time.
    pub accepted_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Account balance as reported by `balance.php`.
pub struct Balance {
    /// Amount exactly as the gateway formatted it (e.g. `"10.50"`).
    pub amount: String,
    pub currency: Option<String>,
}
