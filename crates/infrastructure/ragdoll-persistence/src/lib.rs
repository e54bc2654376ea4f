mod codec;
mod error;
mod store;

pub use error::*;
pub use store::ConfigStore;
