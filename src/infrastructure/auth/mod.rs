mod oidc_identity_provider;

pub use oidc_identity_provider::OidcIdentityProvider;
