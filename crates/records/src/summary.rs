//! Dashboard totals over a set of records.

use std::collections::BTreeMap;

use serde::Serialize;

use millbook_milling::{acks_for_rice, out_turn_rate};

use crate::record::Record;

/// Running position of the mill.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MillSummary {
    /// Standard quintals received.
    pub paddy_received: f64,
    pub paddy_bags: u64,
    /// Rice owed under CMR for the paddy received.
    pub cmr_obligation: f64,
    pub cmr_delivered: f64,
    /// Obligation not yet delivered; over-delivery does not go negative.
    pub cmr_outstanding: f64,
    pub acks_delivered: f64,
    pub acks_outstanding: f64,
    pub by_product_sales: f64,
    pub wages: f64,
    pub freight: f64,
    pub freight_balance_due: f64,
    /// Closing balance per stocked item.
    pub stock: BTreeMap<String, f64>,
    /// Consumption-weighted power factor (total kWh / total kVAh).
    pub power_factor: f64,
}

impl MillSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut summary = MillSummary::default();
        let mut kwh = 0.0;
        let mut kvah = 0.0;

        for record in records {
            match record {
                Record::PaddyReceipt(r) => {
                    summary.paddy_received += r.quantity;
                    summary.paddy_bags += u64::from(r.bags);
                    summary.cmr_obligation += r.quantity * out_turn_rate(r.rice_type);
                }
                Record::CmrDelivery(d) => summary.cmr_delivered += d.quantity,
                Record::ByProductSale(s) => summary.by_product_sales += s.amount(),
                Record::StockMovement(m) => {
                    *summary.stock.entry(m.item.clone()).or_insert(0.0) += m.signed_quantity();
                }
                Record::Wage(w) => summary.wages += w.amount(),
                Record::Freight(f) => {
                    summary.freight += f.amount();
                    summary.freight_balance_due += f.balance_due();
                }
                Record::PowerReading(p) => {
                    kwh += p.kwh;
                    kvah += p.kvah;
                }
            }
        }

        summary.cmr_outstanding = (summary.cmr_obligation - summary.cmr_delivered).max(0.0);
        summary.acks_delivered = acks_for_rice(summary.cmr_delivered);
        summary.acks_outstanding = acks_for_rice(summary.cmr_outstanding);
        summary.power_factor = if kvah == 0.0 { 0.0 } else { kwh / kvah };

        tracing::debug!(
            paddy_received = summary.paddy_received,
            cmr_outstanding = summary.cmr_outstanding,
            "summarised mill records"
        );
        summary
    }
}
