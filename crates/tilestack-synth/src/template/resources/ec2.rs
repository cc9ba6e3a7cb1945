use serde::Serialize;

use crate::template::Expr;

pub const ANY_IPV4: &str = "0.0.0.0/0";

/// `AWS::EC2::SecurityGroup`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecurityGroup {
    pub group_description: String,
    pub vpc_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security_group_ingress: Vec<IngressRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security_group_egress: Vec<EgressRule>,
}

/// Inline ingress rule of a [`SecurityGroup`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IngressRule {
    pub cidr_ip: String,
    pub description: String,
    pub from_port: u16,
    pub ip_protocol: String,
    pub to_port: u16,
}

impl IngressRule {
    /// TCP on a single port from any IPv4 address.
    pub fn tcp_from_anywhere(port: u16, description: impl Into<String>) -> Self {
        Self {
            cidr_ip: ANY_IPV4.into(),
            description: description.into(),
            from_port: port,
            ip_protocol: "tcp".into(),
            to_port: port,
        }
    }
}

/// Inline egress rule of a [`SecurityGroup`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EgressRule {
    pub cidr_ip: String,
    pub description: String,
    pub ip_protocol: String,
}

impl EgressRule {
    pub fn allow_all() -> Self {
        Self {
            cidr_ip: ANY_IPV4.into(),
            description: "Allow all outbound traffic by default".into(),
            ip_protocol: "-1".into(),
        }
    }
}

/// `GroupId` of a security group declared in the same template.
pub fn group_id(logical_id: &str) -> Expr {
    Expr::get_att(logical_id, "GroupId")
}
