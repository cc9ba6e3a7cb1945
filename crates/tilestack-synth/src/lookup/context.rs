use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{SynthError, SynthResult},
    lookup::{SubnetInfo, VpcContext, VpcLookup},
};

/// Default location of the lookup context, relative to the working directory.
pub const DEFAULT_CONTEXT_FILE: &str = "tilestack.context.json";

/// On-disk shape:
///
/// ```json
/// {
///   "vpcs": {
///     "vpc-0123": {
///       "cidrBlock": "10.0.0.0/16",
///       "subnets": [
///         { "subnetId": "subnet-a", "kind": "public", "availabilityZone": "eu-west-1a" }
///       ]
///     }
///   }
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContextDoc {
    #[serde(default)]
    vpcs: IndexMap<String, VpcEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VpcEntry {
    #[serde(default)]
    cidr_block: Option<String>,
    #[serde(default)]
    subnets: Vec<SubnetInfo>,
}

/// VPC lookups answered from a JSON context file.
#[derive(Debug, Clone)]
pub struct ContextFile {
    path: PathBuf,
    vpcs: IndexMap<String, VpcContext>,
}

impl ContextFile {
    /// Load and parse a context file.
    pub fn load(path: &Path) -> SynthResult<Self> {
        let body = fs::read_to_string(path).map_err(|e| SynthError::Context {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let ctx = Self::parse(path, &body)?;
        debug!(path = %path.display(), vpcs = ctx.vpcs.len(), "lookup context loaded");
        Ok(ctx)
    }

    /// Parse context JSON; `path` is used for diagnostics only.
    pub fn parse(path: &Path, body: &str) -> SynthResult<Self> {
        let doc: ContextDoc = serde_json::from_str(body).map_err(|e| SynthError::Context {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let vpcs = doc
            .vpcs
            .into_iter()
            .map(|(vpc_id, entry)| {
                let ctx = VpcContext {
                    vpc_id: vpc_id.clone(),
                    cidr_block: entry.cidr_block,
                    subnets: entry.subnets,
                };
                (vpc_id, ctx)
            })
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            vpcs,
        })
    }
}

impl VpcLookup for ContextFile {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn lookup(&self, vpc_id: &str) -> SynthResult<VpcContext> {
        self.vpcs
            .get(vpc_id)
            .cloned()
            .ok_or_else(|| SynthError::UnknownVpc {
                vpc_id: vpc_id.to_string(),
                source_name: self.name(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::lookup::SubnetKind;

    const DOC: &str = r#"{
        "vpcs": {
            "vpc-0123": {
                "cidrBlock": "10.0.0.0/16",
                "subnets": [
                    { "subnetId": "subnet-a", "kind": "public", "availabilityZone": "eu-west-1a" },
                    { "subnetId": "subnet-b", "kind": "privateWithEgress" }
                ]
            },
            "vpc-empty": {}
        }
    }"#;

    #[test]
    fn parses_vpcs_and_subnets() {
        let ctx = ContextFile::parse(Path::new("ctx.json"), DOC).unwrap();

        let vpc = ctx.lookup("vpc-0123").unwrap();
        assert_eq!(vpc.cidr_block.as_deref(), Some("10.0.0.0/16"));
        assert_eq!(vpc.subnet_ids(SubnetKind::PrivateWithEgress), ["subnet-b"]);
        assert!(ctx.lookup("vpc-empty").unwrap().subnets.is_empty());
    }

    #[test]
    fn unknown_vpc_names_the_file() {
        let ctx = ContextFile::parse(Path::new("ctx.json"), DOC).unwrap();
        let err = ctx.lookup("vpc-nope").unwrap_err();
        assert_eq!(err.to_string(), "vpc vpc-nope not found in lookup context ctx.json");
    }

    #[test]
    fn rejects_unknown_subnet_kind() {
        let bad = r#"{"vpcs":{"v":{"subnets":[{"subnetId":"s","kind":"dmz"}]}}}"#;
        assert!(matches!(
            ContextFile::parse(Path::new("bad.json"), bad),
            Err(SynthError::Context { .. })
        ));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOC.as_bytes()).unwrap();

        let ctx = ContextFile::load(file.path()).unwrap();
        assert_eq!(ctx.name(), file.path().display().to_string());
        assert!(ctx.lookup("vpc-0123").is_ok());

        let missing = ContextFile::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(missing, Err(SynthError::Context { .. })));
    }
}
