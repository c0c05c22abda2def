// Edison Core - Domain, Ports & Async Client
// NO HTTP dependency: transports plug in through port::TaskTransport

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::PlatformClient;
pub use error::{ClientError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
