//! The Martin tile server stack.
//!
//! [`MartinStack`] declares resources in seven ordered steps. Each step reads
//! the references earlier steps left in [`StackState`] and fails with
//! [`SynthError::StepOrder`] if one is missing.
mod balancer;
mod cluster;
mod gateway;
mod network;
mod role;
mod service;
mod task;

pub use gateway::{PROXY_PATH, ROUTE_METHOD};
pub use role::RoleRef;

use tracing::{info, instrument};

use tilestack_model::StackConfig;

use crate::{
    error::{SynthError, SynthResult},
    lookup::{VpcContext, VpcLookup},
    template::{Expr, Template},
};

/// Logical ids of the declared resources.
pub mod ids {
    pub const SECURITY_GROUP: &str = "MartinSecurityGroup";
    pub const CLUSTER: &str = "MartinEcsCluster";
    pub const LOG_GROUP: &str = "LogGroup";
    pub const TASK_DEFINITION: &str = "TaskDefinition";
    pub const SERVICE: &str = "MartinFargateService";
    pub const ALB_SECURITY_GROUP: &str = "AlbMartinSecurityGroup";
    pub const ALB: &str = "AlbMartin";
    pub const TARGET_GROUP: &str = "TargetsMartin";
    pub const LISTENER: &str = "ListenerMartin";
    pub const HTTP_API: &str = "HttpApiVector";
    pub const STAGE: &str = "HttpApiVectorDefaultStage";
    pub const VPC_LINK: &str = "HttpApiVectorVpcLink";
    pub const INTEGRATION: &str = "DefaultIntegration";
    pub const ROUTE: &str = "HttpApiVectorProxyRoute";
}

/// References handed from one step to the next.
#[derive(Debug, Default)]
struct StackState {
    vpc: Option<VpcContext>,
    security_group: Option<&'static str>,
    role: Option<RoleRef>,
    cluster: Option<&'static str>,
    task_definition: Option<&'static str>,
    service: Option<&'static str>,
    load_balancer: Option<&'static str>,
    listener: Option<&'static str>,
    api: Option<&'static str>,
}

fn need<'s, T>(slot: &'s Option<T>, step: &'static str, needs: &'static str) -> SynthResult<&'s T> {
    slot.as_ref().ok_or(SynthError::StepOrder { step, needs })
}

/// Builder of the stack's template.
pub struct MartinStack<'a> {
    config: &'a StackConfig,
    lookup: &'a dyn VpcLookup,
    template: Template,
    state: StackState,
}

impl<'a> MartinStack<'a> {
    pub fn new(config: &'a StackConfig, lookup: &'a dyn VpcLookup) -> Self {
        let description = format!(
            "Martin vector tile server on ECS Fargate behind an ALB and HTTP API ({})",
            config.stack_name
        );
        Self {
            config,
            lookup,
            template: Template::new(description),
            state: StackState::default(),
        }
    }

    /// Run all steps in order and return the finished template.
    #[instrument(level = "info", skip_all, fields(stack = %config.stack_name))]
    pub fn synth(config: &'a StackConfig, lookup: &'a dyn VpcLookup) -> SynthResult<Template> {
        let mut stack = Self::new(config, lookup);
        stack.network_configuration()?;
        stack.iam_role()?;
        stack.cluster_configuration()?;
        stack.task_configuration()?;
        stack.fargate_service_configuration()?;
        stack.load_balancer_configuration()?;
        stack.api_gateway_configuration()?;
        stack.finish()
    }

    /// Template as declared so far.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Attach outputs and metadata, then validate cross references.
    pub fn finish(mut self) -> SynthResult<Template> {
        let cfg = self.config;

        if let Some(cluster) = self.state.cluster {
            self.template
                .add_output("ClusterName", "ECS cluster name", Expr::reference(cluster))?;
        }
        if let Some(alb) = self.state.load_balancer {
            self.template.add_output(
                "LoadBalancerDnsName",
                "DNS name of the application load balancer",
                Expr::get_att(alb, "DNSName"),
            )?;
        }
        if let Some(api) = self.state.api {
            self.template.add_output(
                "ApiEndpoint",
                "Public URL of the HTTP API",
                Expr::get_att(api, "ApiEndpoint"),
            )?;
        }

        self.template
            .set_metadata("tilestack:stackName", cfg.stack_name.as_str());
        if let Some(region) = &cfg.target.region {
            self.template.set_metadata("tilestack:region", region.as_str());
        }
        if let Some(account) = &cfg.target.account {
            self.template.set_metadata("tilestack:account", account.as_str());
        }

        self.template.validate()?;
        info!(
            resources = self.template.resources().count(),
            "template synthesized"
        );
        Ok(self.template)
    }
}

/// Check a physical resource name against AWS naming rules.
fn validate_name(
    what: &'static str,
    name: &str,
    max_len: usize,
    allow_underscore: bool,
) -> SynthResult<()> {
    validate_length(what, name, max_len)?;

    let ok_char = |c: char| c.is_ascii_alphanumeric() || c == '-' || (allow_underscore && c == '_');
    if !name.chars().all(ok_char) {
        return Err(invalid_name(what, name, "contains characters outside [A-Za-z0-9-_]"));
    }
    Ok(())
}

/// Check only that a name has between 1 and `max_len` characters.
fn validate_length(what: &'static str, name: &str, max_len: usize) -> SynthResult<()> {
    let len = name.chars().count();
    if len == 0 || len > max_len {
        return Err(invalid_name(what, name, "length out of range"));
    }
    Ok(())
}

fn invalid_name(what: &'static str, name: &str, reason: &'static str) -> SynthError {
    SynthError::InvalidName {
        what,
        name: name.to_string(),
        reason,
    }
}
