//! Resolution of an existing VPC into its subnets.
//!
//! Synthesis never talks to AWS. A [`VpcLookup`] answers from data gathered
//! ahead of time, the way a CDK app answers `Vpc.from_lookup` from its context
//! cache.
mod context;
pub use context::{ContextFile, DEFAULT_CONTEXT_FILE};

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{SynthError, SynthResult};

/// Subnet class, as the VPC's route tables define it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubnetKind {
    /// Routes to an internet gateway.
    Public,
    /// Private, with outbound access through a NAT gateway.
    PrivateWithEgress,
    /// Private, no internet route.
    Isolated,
}

impl fmt::Display for SubnetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SubnetKind::Public => "public",
            SubnetKind::PrivateWithEgress => "private-with-egress",
            SubnetKind::Isolated => "isolated",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetInfo {
    pub subnet_id: String,
    pub kind: SubnetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
}

/// Looked-up description of an existing VPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpcContext {
    pub vpc_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr_block: Option<String>,
    #[serde(default)]
    pub subnets: Vec<SubnetInfo>,
}

impl VpcContext {
    /// Ids of all subnets of one kind, in context order.
    pub fn subnet_ids(&self, kind: SubnetKind) -> Vec<String> {
        self.subnets
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.subnet_id.clone())
            .collect()
    }

    /// Subnets of `kind`, or [`SynthError::NoSubnets`] if there are none.
    pub fn require_subnets(&self, kind: SubnetKind) -> SynthResult<Vec<String>> {
        let ids = self.subnet_ids(kind);
        if ids.is_empty() {
            return Err(SynthError::NoSubnets {
                vpc_id: self.vpc_id.clone(),
                kind,
            });
        }
        Ok(ids)
    }

    /// Default selection for internal resources: private-with-egress, then
    /// isolated, then public subnets.
    pub fn default_private(&self) -> SynthResult<Vec<String>> {
        [
            SubnetKind::PrivateWithEgress,
            SubnetKind::Isolated,
            SubnetKind::Public,
        ]
        .into_iter()
        .map(|kind| self.subnet_ids(kind))
        .find(|ids| !ids.is_empty())
        .ok_or_else(|| SynthError::NoSubnets {
            vpc_id: self.vpc_id.clone(),
            kind: SubnetKind::PrivateWithEgress,
        })
    }

    /// Whether the subnet id belongs to this VPC's known subnets.
    pub fn contains(&self, subnet_id: &str) -> bool {
        self.subnets.iter().any(|s| s.subnet_id == subnet_id)
    }

    /// Number of distinct availability zones among `ids`.
    ///
    /// Subnets without a recorded zone are not counted.
    pub fn zone_count(&self, ids: &[String]) -> usize {
        let mut zones: Vec<&str> = self
            .subnets
            .iter()
            .filter(|s| ids.contains(&s.subnet_id))
            .filter_map(|s| s.availability_zone.as_deref())
            .collect();
        zones.sort_unstable();
        zones.dedup();
        zones.len()
    }

    /// Log if a load balancer placed on `ids` would span fewer than two zones.
    pub(crate) fn warn_single_zone(&self, what: &str, ids: &[String]) {
        let zones = self.zone_count(ids);
        if zones == 1 {
            warn!(
                vpc = %self.vpc_id,
                what,
                "subnets span a single availability zone; an application load balancer needs two"
            );
        }
    }
}

/// Source of [`VpcContext`]s.
pub trait VpcLookup {
    /// Name used in logs and errors (e.g. the context file path).
    fn name(&self) -> String;

    /// Resolve a VPC by id.
    fn lookup(&self, vpc_id: &str) -> SynthResult<VpcContext>;
}

/// A single context answers lookups for its own id.
impl VpcLookup for VpcContext {
    fn name(&self) -> String {
        format!("inline:{}", self.vpc_id)
    }

    fn lookup(&self, vpc_id: &str) -> SynthResult<VpcContext> {
        if vpc_id == self.vpc_id {
            Ok(self.clone())
        } else {
            Err(SynthError::UnknownVpc {
                vpc_id: vpc_id.to_string(),
                source_name: self.name(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subnet(id: &str, kind: SubnetKind, az: &str) -> SubnetInfo {
        SubnetInfo {
            subnet_id: id.into(),
            kind,
            availability_zone: Some(az.into()),
        }
    }

    fn vpc() -> VpcContext {
        VpcContext {
            vpc_id: "vpc-1".into(),
            cidr_block: Some("10.0.0.0/16".into()),
            subnets: vec![
                subnet("subnet-pub-a", SubnetKind::Public, "eu-west-1a"),
                subnet("subnet-pub-b", SubnetKind::Public, "eu-west-1b"),
                subnet("subnet-priv-a", SubnetKind::PrivateWithEgress, "eu-west-1a"),
                subnet("subnet-iso-a", SubnetKind::Isolated, "eu-west-1a"),
            ],
        }
    }

    #[test]
    fn selects_by_kind() {
        let v = vpc();
        assert_eq!(v.subnet_ids(SubnetKind::Public), ["subnet-pub-a", "subnet-pub-b"]);
        assert_eq!(v.require_subnets(SubnetKind::Isolated).unwrap(), ["subnet-iso-a"]);
        assert!(v.contains("subnet-priv-a"));
        assert!(!v.contains("subnet-other"));
    }

    #[test]
    fn default_private_falls_back() {
        let mut v = vpc();
        assert_eq!(v.default_private().unwrap(), ["subnet-priv-a"]);

        v.subnets.retain(|s| s.kind != SubnetKind::PrivateWithEgress);
        assert_eq!(v.default_private().unwrap(), ["subnet-iso-a"]);

        v.subnets.retain(|s| s.kind != SubnetKind::Isolated);
        assert_eq!(v.default_private().unwrap().len(), 2);

        v.subnets.clear();
        assert!(matches!(v.default_private(), Err(SynthError::NoSubnets { .. })));
    }

    #[test]
    fn missing_kind_is_an_error() {
        let mut v = vpc();
        v.subnets.retain(|s| s.kind == SubnetKind::Public);
        let err = v.require_subnets(SubnetKind::PrivateWithEgress).unwrap_err();
        assert_eq!(err.to_string(), "vpc vpc-1 has no private-with-egress subnets");
    }

    #[test]
    fn zone_count_ignores_unknown_zones() {
        let v = vpc();
        let ids: Vec<String> = vec!["subnet-pub-a".into(), "subnet-pub-b".into()];
        assert_eq!(v.zone_count(&ids), 2);
        assert_eq!(v.zone_count(&["subnet-priv-a".into(), "subnet-iso-a".into()]), 1);
        assert_eq!(v.zone_count(&["subnet-x".into()]), 0);
    }

    #[test]
    fn inline_context_only_knows_itself() {
        let v = vpc();
        assert!(v.lookup("vpc-1").is_ok());
        assert!(matches!(v.lookup("vpc-2"), Err(SynthError::UnknownVpc { .. })));
    }
}
