use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Flag,
    domain::SubnetId,
    error::{ModelError, ModelResult},
};

/// Where the Fargate service's network interfaces are placed.
///
/// Outcomes of [`SubnetPlacement::select`]:
/// - `PrivateWithNat`: the VPC's private subnets with NAT egress.
/// - `Explicit`: one named subnet, no NAT assumed.
/// - `Public`: the VPC's public subnets, with a public IP on the task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "subnetId")]
pub enum SubnetPlacement {
    PrivateWithNat,
    Explicit(SubnetId),
    Public,
}

impl SubnetPlacement {
    /// Apply the subnet selection policy.
    ///
    /// Rules, first match wins:
    /// 1. NAT disabled and no subnet id: error, regardless of `assign_public_ip`.
    /// 2. No public IP: NAT-backed private subnets if NAT is enabled, else the explicit subnet.
    /// 3. Public IP: public subnets; `private_with_nat` and `subnet_id` are ignored.
    ///
    /// An empty `subnet_id` counts as absent.
    pub fn select(
        assign_public_ip: Flag,
        private_with_nat: Flag,
        subnet_id: Option<&str>,
    ) -> ModelResult<Self> {
        let subnet_id = subnet_id.filter(|s| !s.is_empty());

        if private_with_nat.is_disabled() && subnet_id.is_none() {
            return Err(ModelError::SubnetRequired);
        }

        if assign_public_ip.is_enabled() {
            return Ok(Self::Public);
        }
        if private_with_nat.is_enabled() {
            return Ok(Self::PrivateWithNat);
        }
        subnet_id
            .map(|id| Self::Explicit(id.to_string()))
            .ok_or(ModelError::SubnetRequired)
    }

    /// Whether tasks in this placement need a public IP.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }
}

impl fmt::Display for SubnetPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrivateWithNat => f.write_str("private-with-nat"),
            Self::Explicit(id) => write!(f, "explicit({id})"),
            Self::Public => f.write_str("public"),
        }
    }
}
