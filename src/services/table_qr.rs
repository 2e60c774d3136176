use std::collections::HashMap;

use crate::types::{DiningTable, QrCode, TableQr};

/// Creation date shown for a QR code whose record carries none
pub const PLACEHOLDER_CREATED_AT: &str = "1970-01-01T00:00:00Z";

/// Left outer join of tables to QR codes on the table id.
///
/// One entry per table, in table-list order. Tables without a QR code keep
/// their QR fields empty. If the backend lists several QR records for the same
/// table the first one wins. Ids are compared by value, so a numeric id in
/// one list matches the same id sent as a string in the other.
pub fn join_tables_with_qr(tables: Vec<DiningTable>, qr_codes: Vec<QrCode>) -> Vec<TableQr> {
    let mut by_table: HashMap<String, QrCode> = HashMap::with_capacity(qr_codes.len());
    for qr in qr_codes {
        by_table.entry(qr.table_id.join_key()).or_insert(qr);
    }

    tables
        .into_iter()
        .map(|table| {
            let qr = by_table.get(&table.table_id.join_key());
            TableQr {
                qr_id: qr.and_then(|q| q.qr_id.clone()),
                qr_code_url: qr.and_then(|q| q.qr_code_url.clone()),
                created_at: qr.map(|q| {
                    q.created_at
                        .clone()
                        .unwrap_or_else(|| PLACEHOLDER_CREATED_AT.to_string())
                }),
                table_id: table.table_id,
                extra: table.extra,
            }
        })
        .collect()
}
