pub mod digest;
pub mod error;

pub use digest::sha256_hex;
pub use error::ExtractError;
