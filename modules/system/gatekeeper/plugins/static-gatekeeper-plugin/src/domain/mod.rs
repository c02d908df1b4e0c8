pub mod assertion;
pub mod bearer;
pub mod directory;
pub mod session;

pub use assertion::JwtAssertionVerifier;
pub use bearer::StaticBearerTokens;
pub use directory::StaticDirectory;
pub use session::CookieSessionGate;
