mod var;
pub use var::{EnvSource, EnvVar};

mod env;
pub use env::Env;

mod flag;
pub use flag::Flag;

pub mod constants;

/// Identifier of an existing EC2 subnet (e.g. `subnet-0abc`).
pub type SubnetId = String;
