use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Env, Flag, SubnetPlacement, TaskSize,
    domain::{SubnetId, constants as keys},
    error::ModelResult,
    settings::StackSettings,
};

/// Deployment target of the stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

/// Everything the stack needs, read once from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackConfig {
    pub stack_name: String,
    pub target: Target,
    pub vpc_id: String,
    pub image_uri: String,
    pub cluster_name: String,
    pub service_name: String,
    pub load_balancer_name: String,
    pub api_name: String,
    pub execution_role_arn: String,
    pub size: TaskSize,
    pub assign_public_ip: Flag,
    pub private_with_nat: Flag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<SubnetId>,
    pub settings: StackSettings,
}

impl StackConfig {
    /// Read and validate the configuration.
    ///
    /// The subnet policy is deliberately not evaluated here, see [`StackConfig::placement`].
    pub fn from_env(env: &Env) -> ModelResult<Self> {
        let cpu = env.parse_required(keys::ECS_CPU, "integer")?;
        let memory = env.parse_required(keys::ECS_MEMORY, "integer")?;

        let cfg = Self {
            stack_name: env
                .optional(keys::STACK_NAME)
                .unwrap_or(keys::DEFAULT_STACK_NAME)
                .to_string(),
            target: Target {
                region: env.optional(keys::AWS_DEFAULT_REGION).map(str::to_string),
                account: env.optional(keys::AWS_ACCOUNT_ID).map(str::to_string),
            },
            vpc_id: env.require(keys::VPC_ID)?.to_string(),
            image_uri: env.require(keys::IMAGE_URI)?.to_string(),
            cluster_name: env.require(keys::CLUSTER_NAME)?.to_string(),
            service_name: env.require(keys::SERVICE_NAME)?.to_string(),
            load_balancer_name: env.require(keys::LOAD_BALANCER_NAME)?.to_string(),
            api_name: env.require(keys::API_NAME)?.to_string(),
            execution_role_arn: env.require(keys::EXECUTION_ROLE_ARN)?.to_string(),
            size: TaskSize::new(cpu, memory)?,
            assign_public_ip: env.flag(keys::ASSIGN_PUBLIC_IP, "False"),
            private_with_nat: env.flag(keys::PRIVATE_WITH_NAT, "True"),
            subnet_id: env.optional(keys::SUBNET_ID).map(str::to_string),
            settings: StackSettings::from_env(env)?,
        };

        debug!(
            stack = %cfg.stack_name,
            vpc = %cfg.vpc_id,
            cpu = cfg.size.cpu(),
            memory = cfg.size.memory(),
            assign_public_ip = cfg.assign_public_ip.is_enabled(),
            private_with_nat = cfg.private_with_nat.is_enabled(),
            "stack config loaded"
        );
        Ok(cfg)
    }

    /// Evaluate the subnet selection policy for the service.
    pub fn placement(&self) -> ModelResult<SubnetPlacement> {
        SubnetPlacement::select(
            self.assign_public_ip,
            self.private_with_nat,
            self.subnet_id.as_deref(),
        )
    }
}
