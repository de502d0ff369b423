//! Domain models for the Climate Monitor platform

mod alert;
mod climate;
mod crop;
mod farm;
mod prediction;
mod soil;
mod weather;

pub use alert::*;
pub use climate::*;
pub use crop::*;
pub use farm::*;
pub use prediction::*;
pub use soil::*;
pub use weather::*;
