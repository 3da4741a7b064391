//! Change notifications for stored records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use millbook_core::{OwnerId, RecordId};
use millbook_events::{Event, Topic};

use crate::record::RecordKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A row was inserted, updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordChange {
    pub change: ChangeKind,
    pub kind: RecordKind,
    pub record_id: RecordId,
    pub owner: OwnerId,
    pub occurred_at: DateTime<Utc>,
}

macro_rules! change_event_types {
    ($kind:expr, $change:expr; $($variant:ident => $name:literal),* $(,)?) => {
        match ($kind, $change) {
            $(
                (RecordKind::$variant, ChangeKind::Insert) => concat!("records.", $name, ".inserted"),
                (RecordKind::$variant, ChangeKind::Update) => concat!("records.", $name, ".updated"),
                (RecordKind::$variant, ChangeKind::Delete) => concat!("records.", $name, ".deleted"),
            )*
        }
    };
}

impl RecordChange {
    /// Event type string for a table/change pair, e.g. `"records.wage.deleted"`.
    pub fn event_type_for(kind: RecordKind, change: ChangeKind) -> &'static str {
        change_event_types!(kind, change;
            PaddyReceipt => "paddy_receipt",
            CmrDelivery => "cmr_delivery",
            ByProductSale => "by_product_sale",
            StockMovement => "stock_movement",
            Wage => "wage",
            Freight => "freight",
            PowerReading => "power_reading",
        )
    }

    /// Subscription topic for one kind of change on one table.
    pub fn topic(kind: RecordKind, change: ChangeKind) -> Topic {
        Topic::EventType(Self::event_type_for(kind, change))
    }
}

impl Event for RecordChange {
    fn event_type(&self) -> &'static str {
        Self::event_type_for(self.kind, self.change)
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_types_name_table_and_change() {
        assert_eq!(
            RecordChange::event_type_for(RecordKind::PaddyReceipt, ChangeKind::Insert),
            "records.paddy_receipt.inserted"
        );
        assert_eq!(
            RecordChange::event_type_for(RecordKind::Wage, ChangeKind::Delete),
            "records.wage.deleted"
        );
    }

    #[test]
    fn event_types_follow_record_kind_names() {
        let kinds = [
            RecordKind::PaddyReceipt,
            RecordKind::CmrDelivery,
            RecordKind::ByProductSale,
            RecordKind::StockMovement,
            RecordKind::Wage,
            RecordKind::Freight,
            RecordKind::PowerReading,
        ];
        for kind in kinds {
            let t = RecordChange::event_type_for(kind, ChangeKind::Update);
            assert_eq!(t, format!("records.{}.updated", kind.as_str()));
        }
    }
}
