pub mod claims;
pub mod codec;
pub mod errors;
pub mod purpose;
pub mod validator;

pub use claims::Claims;
pub use codec::TokenCodec;
pub use errors::TokenError;
pub use purpose::TokenPurpose;
pub use validator::TokenValidator;
