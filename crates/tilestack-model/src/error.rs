use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("missing required variable: {0}")]
    MissingVar(String),

    #[error("invalid value for {key}: {value:?} is not a valid {expected}")]
    InvalidNumber {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("invalid fargate task size: cpu={cpu} memory={memory}MiB ({reason})")]
    InvalidTaskSize {
        cpu: u32,
        memory: u32,
        reason: String,
    },

    #[error("invalid log retention: {0} days is not accepted by CloudWatch Logs")]
    InvalidRetention(u32),

    #[error("unknown CORS method: {0}")]
    UnknownCorsMethod(String),

    #[error(
        "subnet id is required when PRIVATE_WITH_NAT is disabled: \
         set SUBNET_ID or enable PRIVATE_WITH_NAT"
    )]
    SubnetRequired,

    #[error("failed to read env file {path}: {reason}")]
    EnvFile { path: String, reason: String },

    #[error("invalid setting: {0}")]
    Invalid(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
