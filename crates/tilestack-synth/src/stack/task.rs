use tracing::{info, instrument};

use crate::{
    error::SynthResult,
    stack::{MartinStack, ids, need},
    template::{
        RemovalPolicy,
        resources::{
            ecs::{ContainerDefinition, LogConfiguration, PortMapping, TaskDefinition},
            logs::LogGroup,
        },
    },
};

impl MartinStack<'_> {
    /// Step 4: declare the log group and the Fargate task definition.
    ///
    /// The task runs a single essential container exposing the container port
    /// over TCP and shipping stdout/stderr to the log group via `awslogs`.
    /// The imported role serves as both task role and execution role.
    #[instrument(level = "debug", skip(self))]
    pub fn task_configuration(&mut self) -> SynthResult<()> {
        let role = need(&self.state.role, "task", "iam role")?.arn().to_string();
        let cfg = self.config;
        let settings = &cfg.settings;

        self.template
            .add(
                ids::LOG_GROUP,
                LogGroup {
                    retention_in_days: settings.log_retention.days(),
                },
            )?
            .with_removal_policy(RemovalPolicy::Retain);

        let container = ContainerDefinition {
            name: settings.container_name.clone(),
            image: cfg.image_uri.clone(),
            essential: true,
            port_mappings: vec![PortMapping {
                container_port: settings.container_port,
                protocol: "tcp".into(),
            }],
            log_configuration: LogConfiguration::awslogs(ids::LOG_GROUP, &settings.log_stream_prefix),
        };

        self.template.add(
            ids::TASK_DEFINITION,
            TaskDefinition {
                family: task_family(&cfg.stack_name),
                cpu: cfg.size.cpu().to_string(),
                memory: cfg.size.memory().to_string(),
                network_mode: "awsvpc".into(),
                requires_compatibilities: vec!["FARGATE".into()],
                execution_role_arn: role.clone(),
                task_role_arn: role,
                container_definitions: vec![container],
            },
        )?;
        info!(
            image = %cfg.image_uri,
            cpu = cfg.size.cpu(),
            memory = cfg.size.memory(),
            port = settings.container_port,
            retention = %settings.log_retention,
            "task definition declared"
        );

        self.state.task_definition = Some(ids::TASK_DEFINITION);
        Ok(())
    }
}

/// Task family derived from the stack name, restricted to the characters ECS accepts.
fn task_family(stack_name: &str) -> String {
    let base: String = stack_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    let mut family = format!("{base}{}", ids::TASK_DEFINITION);
    family.truncate(255);
    family
}
