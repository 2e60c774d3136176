// handlers/protected/merchant/mod.rs - Merchant profile, tables and QR codes

pub mod image;
pub mod info;
pub mod qr;
pub mod tables;

pub use image::image_post;
pub use info::info_get;
pub use qr::{qr_get, qr_post};
pub use tables::{table_put, tables_get};
