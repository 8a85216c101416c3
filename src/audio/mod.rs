//! Audio block types and sources.

pub mod block;
pub mod source;
pub mod wav;

pub use block::AudioBlock;
pub use source::{BlockSource, MockBlockSource};
pub use wav::WavBlockSource;
