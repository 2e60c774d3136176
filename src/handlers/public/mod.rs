// handlers/public/mod.rs - Public handlers (no auth cookie required)
//
// Security Level: None
// Route Prefix: /api/auth/*
// Upstream calls carry no Authorization header.

pub mod auth;
