pub mod error;
pub mod normalizer;
pub mod registry;
pub mod validation;

pub mod momentum;
pub mod trend;
pub mod volatility;

pub use error::IndicatorError;
pub use normalizer::*;
pub use registry::*;
pub use validation::*;
