use serde::Serialize;

use crate::template::Expr;

/// `AWS::ElasticLoadBalancingV2::LoadBalancer` of type `application`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoadBalancer {
    pub name: String,
    /// `internet-facing` or `internal`.
    pub scheme: String,
    #[serde(rename = "Type")]
    pub lb_type: String,
    pub subnets: Vec<String>,
    pub security_groups: Vec<Expr>,
    pub load_balancer_attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

/// `AWS::ElasticLoadBalancingV2::TargetGroup` with IP targets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetGroup {
    pub name: String,
    pub port: u16,
    pub protocol: String,
    pub target_type: String,
    pub vpc_id: String,
    pub health_check_enabled: bool,
    pub health_check_path: String,
    pub health_check_interval_seconds: u32,
    pub health_check_timeout_seconds: u32,
    pub healthy_threshold_count: u32,
    pub unhealthy_threshold_count: u32,
}

/// `AWS::ElasticLoadBalancingV2::Listener`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Listener {
    pub load_balancer_arn: Expr,
    pub port: u16,
    pub protocol: String,
    pub default_actions: Vec<ListenerAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListenerAction {
    #[serde(rename = "Type")]
    pub action_type: String,
    pub target_group_arn: Expr,
}

impl ListenerAction {
    pub fn forward(target_group_id: &str) -> Self {
        Self {
            action_type: "forward".into(),
            target_group_arn: Expr::reference(target_group_id),
        }
    }
}
