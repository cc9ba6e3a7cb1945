use thiserror::Error;

use tilestack_model::ModelError;

use crate::lookup::SubnetKind;

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("configuration error: {0}")]
    Model(#[from] ModelError),

    #[error("vpc {vpc_id} not found in lookup context {source_name}")]
    UnknownVpc { vpc_id: String, source_name: String },

    #[error("vpc {vpc_id} has no {kind} subnets")]
    NoSubnets { vpc_id: String, kind: SubnetKind },

    #[error("invalid lookup context {path}: {reason}")]
    Context { path: String, reason: String },

    #[error("invalid role arn: {0:?}")]
    InvalidArn(String),

    #[error("invalid {what} name {name:?}: {reason}")]
    InvalidName {
        what: &'static str,
        name: String,
        reason: &'static str,
    },

    #[error("step '{step}' requires '{needs}' to run first")]
    StepOrder {
        step: &'static str,
        needs: &'static str,
    },

    #[error("duplicate logical id: {0}")]
    DuplicateLogicalId(String),

    #[error("resource {0} is missing or has an unexpected type")]
    UnexpectedResource(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SynthResult<T> = Result<T, SynthError>;
