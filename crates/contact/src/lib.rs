mod controller;
mod error;
mod input;
mod sessions;
mod sink;
mod types;

pub use controller::*;
pub use error::*;
pub use input::*;
pub use sessions::*;
pub use sink::*;
pub use types::*;
