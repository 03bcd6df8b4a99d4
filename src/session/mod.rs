pub mod identity;
pub mod jwt;

pub use identity::{
    Identity, IdentityProvider, JwtIdentityProvider, SharedIdentityProvider, StaticIdentityProvider,
};
pub use jwt::{JwtManager, SessionClaims};
