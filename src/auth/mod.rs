//! Authentication module
//!
//! OAuth2 client-credentials flow against the region's login endpoint
//! (`https://login.<region>/oauth/token`). The `Authenticator` caches the
//! access token and refreshes it transparently when it nears expiry.

mod token;

pub use token::{Authenticator, CachedToken};
