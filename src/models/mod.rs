pub mod describe;
pub mod prompt;

pub use describe::*;
pub use prompt::*;
