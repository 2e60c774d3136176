pub mod table_qr;

pub use table_qr::{join_tables_with_qr, PLACEHOLDER_CREATED_AT};
