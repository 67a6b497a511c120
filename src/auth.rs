pub mod extractor;
pub mod gate;
pub mod jwt;
pub mod keys;

pub use extractor::{AdminOnly, ApplicantOnly, Authenticated};
pub use gate::require_role;
pub use jwt::{IssuedToken, TokenInfo, TokenService};
pub use keys::KeyMaterial;
