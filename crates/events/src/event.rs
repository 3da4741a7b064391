use chrono::{DateTime, Utc};

/// A domain-agnostic event.
///
/// Events are facts: immutable, versioned, named by a stable type string
/// (e.g. `"records.paddy_receipt.inserted"`).
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier.
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred.
    fn occurred_at(&self) -> DateTime<Utc>;
}
