//! Mill records: what was received, delivered, sold, paid and metered.
//!
//! Records are plain values with their own small arithmetic (amounts, power
//! factor). Storage goes through the [`RecordStore`] trait, which the
//! application constructs and injects; every mutation is announced on an
//! event bus as a [`RecordChange`].

pub mod change;
pub mod record;
pub mod store;
pub mod summary;

pub use change::{ChangeKind, RecordChange};
pub use record::{
    ByProductSale, CmrDelivery, FreightEntry, PaddyReceipt, PowerReading, Record, RecordKind,
    StockDirection, StockMovement, WageCategory, WageEntry,
};
pub use store::{InMemoryRecordStore, RecordStore, StoreError, StoredRecord};
pub use summary::MillSummary;
