//! Well-known environment keys and defaults.
//!
//! Every variable the stack reads is named here, so the config loader, the CLI
//! and the tests agree on a single spelling.

/// Pre-existing VPC the stack attaches to.
pub const VPC_ID: &str = "VPC_ID";
/// Container image reference of the tile server.
pub const IMAGE_URI: &str = "IMAGE_URI";
pub const CLUSTER_NAME: &str = "CLUSTER_NAME";
pub const SERVICE_NAME: &str = "SERVICE_NAME";
pub const LOAD_BALANCER_NAME: &str = "LOAD_BALANCER_NAME";
pub const API_NAME: &str = "API_NAME";
/// Role assumed by the task, used both as task role and execution role.
pub const EXECUTION_ROLE_ARN: &str = "EXECUTION_ROLE_ARN";
pub const ECS_CPU: &str = "ECS_CPU";
pub const ECS_MEMORY: &str = "ECS_MEMORY";
pub const ASSIGN_PUBLIC_IP: &str = "ASSIGN_PUBLIC_IP";
pub const PRIVATE_WITH_NAT: &str = "PRIVATE_WITH_NAT";
pub const SUBNET_ID: &str = "SUBNET_ID";
pub const STACK_NAME: &str = "STACK_NAME";
pub const AWS_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
pub const AWS_ACCOUNT_ID: &str = "AWS_ACCOUNT_ID";

/// Overrides the dotenv file layered under the process environment.
pub const ENV_FILE_PATH: &str = "ENV_FILE_PATH";

/// Dotenv file read when [`ENV_FILE_PATH`] is not set.
pub const DEFAULT_ENV_FILE: &str = ".cdk-stack-dev.env";
/// Stack name used when [`STACK_NAME`] is not set.
pub const DEFAULT_STACK_NAME: &str = "MartinEoapiStack";

pub const CONTAINER_NAME: &str = "CONTAINER_NAME";
pub const CONTAINER_PORT: &str = "CONTAINER_PORT";
pub const LISTENER_PORT: &str = "LISTENER_PORT";
pub const HEALTH_CHECK_PATH: &str = "HEALTH_CHECK_PATH";
pub const HEALTH_CHECK_INTERVAL_SECS: &str = "HEALTH_CHECK_INTERVAL_SECS";
pub const HEALTH_CHECK_TIMEOUT_SECS: &str = "HEALTH_CHECK_TIMEOUT_SECS";
pub const HEALTHY_THRESHOLD: &str = "HEALTHY_THRESHOLD";
pub const UNHEALTHY_THRESHOLD: &str = "UNHEALTHY_THRESHOLD";
pub const DESIRED_COUNT: &str = "DESIRED_COUNT";
pub const LOG_RETENTION_DAYS: &str = "LOG_RETENTION_DAYS";
pub const LOG_STREAM_PREFIX: &str = "LOG_STREAM_PREFIX";
pub const TARGET_GROUP_NAME: &str = "TARGET_GROUP_NAME";
pub const CORS_MAX_AGE_DAYS: &str = "CORS_MAX_AGE_DAYS";
