pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::Claims;
pub use claims::TokenPurpose;
pub use codec::TokenCodec;
pub use errors::ConfigError;
pub use errors::TokenError;
