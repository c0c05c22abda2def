// Edison Infra HTTP - REST adapters for the core ports
// Depends ONLY on edison-core (plus the HTTP stack)

pub mod config;
pub mod probe;
pub mod transport;

mod response;

pub use config::HttpTransportConfig;
pub use probe::{CheckOutcome, ConnectivityProbe, ProbeReport};
pub use transport::HttpTaskTransport;
