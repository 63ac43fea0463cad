mod error;
mod normalizer;
mod observer;
mod provider;
mod types;

pub use error::{MalformedPassError, ProviderError};
pub use normalizer::{normalize, normalize_entry};
pub use observer::ObserverLocation;
pub use provider::{parse_response, N2yoClient, PassProvider, PredictionRequest, DEFAULT_BASE_URL};
pub use types::{PassRecord, TrackedSatellite};
