//! OAuth2 identity providers for the Warden authenticating proxy.
//!
//! Given the JSON result of an authorization-code exchange, each provider
//! resolves a single normalized email identity.
//!
//! # Components
//!
//! - [`provider`] — the [`Provider`] contract, [`ProviderData`], and the factory
//! - [`google`] — email from the `id_token` claims
//! - [`myusa`] — email from the profile endpoint
//! - [`transport`] — blocking HTTP transport used for profile fetches

pub mod error;
pub mod google;
pub mod myusa;
pub mod provider;
pub mod transport;

pub use error::{ProviderError, Result};
pub use google::GoogleProvider;
pub use myusa::MyUsaProvider;
pub use provider::{Provider, ProviderData, new_provider, new_provider_with_transport};
pub use transport::{HttpTransport, ReqwestTransport};
