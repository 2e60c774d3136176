// handlers/mod.rs - Two-tier handler layout
//
// Public (no cookie) -> Protected (auth cookie forwarded as bearer token)

pub mod public;    // /api/auth/*
pub mod protected; // /api/merchant/*, /api/dashboard/*
