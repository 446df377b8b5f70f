pub mod batch;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod normalize;
pub mod pair;
pub mod render;
pub mod results;
pub mod search;
pub mod validation;

pub use batch::{check_batch, check_batch_with_metrics};
pub use config::{ConfigOverrides, DetectorConfig};
pub use errors::{DupError, DupResult, ValidationError};
pub use normalize::{normalize, normalize_with_map, NormalizedText};
pub use pair::{evaluate_pair, Sentence};
pub use results::{BatchReport, MatchOutcome, PairOutcome, PairRecord, PairStatus};
pub use search::{Algorithm, Fidelity, SearchMode};
