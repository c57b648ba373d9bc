pub mod advisory;
pub mod risk;
pub mod weather;

pub use advisory::*;
pub use risk::*;
pub use weather::*;
