pub mod audio;
pub mod cli;
pub mod codec;
pub mod error;
pub mod image;
pub mod types;

// Re-export commonly used items
pub use codec::{CodecConfig, NumeralMode, Scheme, decode, encode, normalize};
pub use error::CodecError;
pub use types::{Dimensions, Pixel};
