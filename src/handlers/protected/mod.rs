// handlers/protected/mod.rs - Protected handlers (auth cookie required)
//
// Security Level: bearer token from the auth cookie
// Route Prefix: /api/merchant/*, /api/dashboard/*
//
// Every handler here checks its input first, then calls SessionToken::require,
// and only then talks to the backend with `Authorization: Bearer <token>`.
// A request without the cookie never leaves the gateway.

pub mod dashboard; // Paginated views: login history, orders
pub mod merchant;  // Profile, image, tables, QR codes
