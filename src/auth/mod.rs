pub mod extractors;

pub use extractors::{AuthError, AuthenticatedUser};
