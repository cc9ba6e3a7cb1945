mod domain;
pub use domain::constants;
pub use domain::{Env, EnvSource, EnvVar, Flag, SubnetId};

mod error;
pub use error::{ModelError, ModelResult};

mod config;
pub use config::{StackConfig, Target};

mod placement;
pub use placement::SubnetPlacement;

mod retention;
pub use retention::{ALLOWED_RETENTION_DAYS, LogRetention};

mod settings;
pub use settings::{CorsMethod, CorsPolicy, HealthCheck, StackSettings};

mod sizing;
pub use sizing::TaskSize;
