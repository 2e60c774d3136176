// handlers/public/auth/mod.rs - Public authentication handlers
//
// Everything a merchant needs before holding a token: login, signup with the
// OCR pre-fill step, the account-id availability check, and logout.

pub mod check_id; // GET  /api/auth/check-id - account id availability
pub mod login;    // POST /api/auth/login    - credentials -> token + cookie
pub mod logout;   // POST /api/auth/logout   - clear the auth cookie
pub mod ocr;      // POST /api/auth/ocr      - business licence extraction
pub mod register; // POST /api/auth/signup   - create merchant account

pub use check_id::check_id_get;
pub use login::login_post;
pub use logout::logout_post;
pub use ocr::ocr_post;
pub use register::register_post;
