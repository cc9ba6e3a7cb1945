use indexmap::IndexMap;
use serde::Serialize;

use crate::template::Expr;

/// `AWS::ECS::Cluster`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Cluster {
    pub cluster_name: String,
}

/// `AWS::ECS::TaskDefinition` for Fargate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskDefinition {
    pub family: String,
    /// CPU units, serialized as a string as CloudFormation expects.
    pub cpu: String,
    /// Memory in MiB, serialized as a string.
    pub memory: String,
    pub network_mode: String,
    pub requires_compatibilities: Vec<String>,
    pub execution_role_arn: String,
    pub task_role_arn: String,
    pub container_definitions: Vec<ContainerDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerDefinition {
    pub name: String,
    pub image: String,
    pub essential: bool,
    pub port_mappings: Vec<PortMapping>,
    pub log_configuration: LogConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PortMapping {
    pub container_port: u16,
    pub protocol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogConfiguration {
    pub log_driver: String,
    pub options: IndexMap<String, Expr>,
}

impl LogConfiguration {
    /// `awslogs` driver writing to a log group of the same template.
    pub fn awslogs(log_group_id: &str, stream_prefix: &str) -> Self {
        let mut options = IndexMap::new();
        options.insert("awslogs-group".to_string(), Expr::reference(log_group_id));
        options.insert("awslogs-stream-prefix".to_string(), Expr::lit(stream_prefix));
        options.insert("awslogs-region".to_string(), Expr::region());
        Self {
            log_driver: "awslogs".into(),
            options,
        }
    }
}

/// `AWS::ECS::Service` on Fargate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Service {
    pub cluster: Expr,
    pub task_definition: Expr,
    pub service_name: String,
    pub launch_type: String,
    pub platform_version: String,
    pub desired_count: u32,
    pub deployment_configuration: DeploymentConfiguration,
    pub enable_ecs_managed_tags: bool,
    pub network_configuration: NetworkConfiguration,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub load_balancers: Vec<ServiceLoadBalancer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_grace_period_seconds: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentConfiguration {
    pub maximum_percent: u32,
    pub minimum_healthy_percent: u32,
}

impl Default for DeploymentConfiguration {
    fn default() -> Self {
        Self {
            maximum_percent: 200,
            minimum_healthy_percent: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkConfiguration {
    pub awsvpc_configuration: AwsvpcConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AwsvpcConfiguration {
    /// `ENABLED` or `DISABLED`.
    pub assign_public_ip: String,
    pub security_groups: Vec<Expr>,
    pub subnets: Vec<String>,
}

/// Registration of the service's container in a target group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceLoadBalancer {
    pub container_name: String,
    pub container_port: u16,
    pub target_group_arn: Expr,
}
