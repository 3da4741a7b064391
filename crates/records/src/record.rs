use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use millbook_milling::{ByProductKind, RiceType};

/// Paddy brought in against the CMR programme. Quantities are standard quintals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaddyReceipt {
    pub received_on: NaiveDate,
    pub party: String,
    pub vehicle_number: Option<String>,
    pub bags: u32,
    pub quantity: f64,
    pub rice_type: RiceType,
}

/// Rice delivered against one ACK.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmrDelivery {
    pub delivered_on: NaiveDate,
    pub ack_number: String,
    pub quantity: f64,
    pub rice_type: RiceType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ByProductSale {
    pub sold_on: NaiveDate,
    pub product: ByProductKind,
    pub buyer: String,
    pub quantity: f64,
    /// ₹/quintal.
    pub rate: f64,
}

impl ByProductSale {
    pub fn amount(&self) -> f64 {
        self.quantity * self.rate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockDirection {
    In,
    Out,
}

/// Movement of a stocked item (gunny bags, rice, bran, ...), quintals or units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub moved_on: NaiveDate,
    pub item: String,
    pub direction: StockDirection,
    pub quantity: f64,
}

impl StockMovement {
    /// Quantity with sign: inflows positive, outflows negative.
    pub fn signed_quantity(&self) -> f64 {
        match self.direction {
            StockDirection::In => self.quantity,
            StockDirection::Out => -self.quantity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WageCategory {
    /// Loading/unloading, paid per bag.
    Hamali,
    /// Paid per day.
    Labour,
    /// Paid per month.
    Salary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageEntry {
    pub paid_on: NaiveDate,
    pub worker: String,
    pub category: WageCategory,
    /// Bags, days or months depending on `category`.
    pub units: f64,
    pub rate: f64,
}

impl WageEntry {
    pub fn amount(&self) -> f64 {
        self.units * self.rate
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreightEntry {
    pub dispatched_on: NaiveDate,
    pub vehicle_number: String,
    pub destination: String,
    pub quantity: f64,
    pub rate_per_quintal: f64,
    /// Paid to the transporter up front.
    pub advance: f64,
}

impl FreightEntry {
    pub fn amount(&self) -> f64 {
        self.quantity * self.rate_per_quintal
    }

    /// What is still owed to the transporter; an overpaid advance is not a credit.
    pub fn balance_due(&self) -> f64 {
        (self.amount() - self.advance).max(0.0)
    }
}

/// Electricity meter reading for one billing period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerReading {
    pub read_on: NaiveDate,
    /// Active energy.
    pub kwh: f64,
    /// Apparent energy.
    pub kvah: f64,
}

impl PowerReading {
    /// `kwh / kvah`, or 0 for a reading with no apparent energy.
    pub fn power_factor(&self) -> f64 {
        if self.kvah == 0.0 {
            0.0
        } else {
            self.kwh / self.kvah
        }
    }
}

/// Any record the mill keeps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    PaddyReceipt(PaddyReceipt),
    CmrDelivery(CmrDelivery),
    ByProductSale(ByProductSale),
    StockMovement(StockMovement),
    Wage(WageEntry),
    Freight(FreightEntry),
    PowerReading(PowerReading),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::PaddyReceipt(_) => RecordKind::PaddyReceipt,
            Record::CmrDelivery(_) => RecordKind::CmrDelivery,
            Record::ByProductSale(_) => RecordKind::ByProductSale,
            Record::StockMovement(_) => RecordKind::StockMovement,
            Record::Wage(_) => RecordKind::Wage,
            Record::Freight(_) => RecordKind::Freight,
            Record::PowerReading(_) => RecordKind::PowerReading,
        }
    }
}

/// Record discriminant, one per stored table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    PaddyReceipt,
    CmrDelivery,
    ByProductSale,
    StockMovement,
    Wage,
    Freight,
    PowerReading,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::PaddyReceipt => "paddy_receipt",
            RecordKind::CmrDelivery => "cmr_delivery",
            RecordKind::ByProductSale => "by_product_sale",
            RecordKind::StockMovement => "stock_movement",
            RecordKind::Wage => "wage",
            RecordKind::Freight => "freight",
            RecordKind::PowerReading => "power_reading",
        }
    }
}

impl core::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
