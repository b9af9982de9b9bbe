#[cfg(feature = "stm32f1xx")]
mod f1xx;
#[cfg(feature = "stm32f1xx")]
pub use f1xx::*;
