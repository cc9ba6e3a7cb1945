//! In-memory CloudFormation template.
//!
//! Resources keep their insertion order so the emitted JSON follows the order
//! in which the stack steps declared them.
mod expr;
pub use expr::Expr;

pub mod resources;
pub use resources::Properties;

use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{SynthError, SynthResult};

pub const FORMAT_VERSION: &str = "2010-09-09";

/// What CloudFormation does with a resource's physical counterpart when the
/// resource leaves the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RemovalPolicy {
    Retain,
}

/// One entry of the `Resources` section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    #[serde(rename = "Type")]
    resource_type: &'static str,
    #[serde(rename = "Properties")]
    properties: Properties,
    #[serde(rename = "DependsOn", skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<String>,
    #[serde(rename = "UpdateReplacePolicy", skip_serializing_if = "Option::is_none")]
    update_replace_policy: Option<RemovalPolicy>,
    #[serde(rename = "DeletionPolicy", skip_serializing_if = "Option::is_none")]
    deletion_policy: Option<RemovalPolicy>,
}

impl Resource {
    pub fn new(properties: impl Into<Properties>) -> Self {
        let properties = properties.into();
        Self {
            resource_type: properties.resource_type(),
            properties,
            depends_on: Vec::new(),
            update_replace_policy: None,
            deletion_policy: None,
        }
    }

    pub fn resource_type(&self) -> &'static str {
        self.resource_type
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }

    /// Add an explicit dependency; duplicates are ignored.
    pub fn add_dependency(&mut self, logical_id: impl Into<String>) -> &mut Self {
        let id = logical_id.into();
        if !self.depends_on.contains(&id) {
            self.depends_on.push(id);
        }
        self
    }

    /// Apply the same policy on deletion and on replacement.
    pub fn with_removal_policy(&mut self, policy: RemovalPolicy) -> &mut Self {
        self.update_replace_policy = Some(policy);
        self.deletion_policy = Some(policy);
        self
    }
}

/// One entry of the `Outputs` section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    pub description: String,
    pub value: Expr,
}

/// A complete, serializable CloudFormation template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    format_version: &'static str,
    description: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    metadata: IndexMap<String, serde_json::Value>,
    resources: IndexMap<String, Resource>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    outputs: IndexMap<String, Output>,
}

impl Template {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            description: description.into(),
            metadata: IndexMap::new(),
            resources: IndexMap::new(),
            outputs: IndexMap::new(),
        }
    }

    /// Declare a resource under `logical_id`.
    ///
    /// Logical ids must be alphanumeric and unique within the template.
    pub fn add(
        &mut self,
        logical_id: &str,
        properties: impl Into<Properties>,
    ) -> SynthResult<&mut Resource> {
        validate_logical_id(logical_id)?;
        if self.resources.contains_key(logical_id) {
            return Err(SynthError::DuplicateLogicalId(logical_id.to_string()));
        }

        let resource = Resource::new(properties);
        trace!(logical_id, kind = resource.resource_type(), "resource declared");
        Ok(self
            .resources
            .entry(logical_id.to_string())
            .or_insert(resource))
    }

    pub fn resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.get(logical_id)
    }

    pub fn resource_mut(&mut self, logical_id: &str) -> Option<&mut Resource> {
        self.resources.get_mut(logical_id)
    }

    /// Iterate over `(logical_id, resource)` in declaration order.
    pub fn resources(&self) -> impl Iterator<Item = (&str, &Resource)> {
        self.resources.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn add_output(
        &mut self,
        name: &str,
        description: impl Into<String>,
        value: Expr,
    ) -> SynthResult<()> {
        validate_logical_id(name)?;
        self.outputs.insert(
            name.to_string(),
            Output {
                description: description.into(),
                value,
            },
        );
        Ok(())
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Check that every `DependsOn` entry names a declared resource.
    pub fn validate(&self) -> SynthResult<()> {
        for (id, resource) in self.resources() {
            for dep in resource.depends_on() {
                if !self.resources.contains_key(dep) {
                    return Err(SynthError::UnexpectedResource(format!("{id} -> {dep}")));
                }
            }
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> SynthResult<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    /// Write `<dir>/<stack_name>.template.json`, creating `dir` if needed.
    pub fn write_to_dir(&self, dir: &Path, stack_name: &str) -> SynthResult<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{stack_name}.template.json"));
        fs::write(&path, self.to_json_pretty()?)?;
        debug!(path = %path.display(), resources = self.resources.len(), "template written");
        Ok(path)
    }
}

fn validate_logical_id(id: &str) -> SynthResult<()> {
    if id.is_empty() || id.len() > 255 || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(SynthError::InvalidName {
            what: "logical id",
            name: id.to_string(),
            reason: "must be 1-255 ASCII alphanumerics",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::template::resources::{ecs, logs};

    #[test]
    fn serializes_sections_in_order() {
        let mut tpl = Template::new("demo");
        tpl.add("Logs", logs::LogGroup { retention_in_days: 7 })
            .unwrap()
            .with_removal_policy(RemovalPolicy::Retain);
        tpl.add(
            "Cluster",
            ecs::Cluster {
                cluster_name: "tiles".into(),
            },
        )
        .unwrap()
        .add_dependency("Logs");
        tpl.add_output("ClusterName", "cluster", Expr::reference("Cluster"))
            .unwrap();

        let v = serde_json::to_value(&tpl).unwrap();
        assert_eq!(v["AWSTemplateFormatVersion"], json!("2010-09-09"));
        assert_eq!(
            v["Resources"]["Logs"],
            json!({
                "Type": "AWS::Logs::LogGroup",
                "Properties": {"RetentionInDays": 7},
                "UpdateReplacePolicy": "Retain",
                "DeletionPolicy": "Retain"
            })
        );
        assert_eq!(v["Resources"]["Cluster"]["DependsOn"], json!(["Logs"]));
        assert_eq!(v["Outputs"]["ClusterName"]["Value"], json!({"Ref": "Cluster"}));
        assert!(v.get("Metadata").is_none());

        let keys: Vec<_> = tpl.resources().map(|(id, _)| id).collect();
        assert_eq!(keys, ["Logs", "Cluster"]);
        assert!(tpl.validate().is_ok());
    }

    #[test]
    fn rejects_duplicate_and_malformed_ids() {
        let mut tpl = Template::new("demo");
        tpl.add("A", logs::LogGroup { retention_in_days: 1 }).unwrap();
        assert!(matches!(
            tpl.add("A", logs::LogGroup { retention_in_days: 1 }),
            Err(SynthError::DuplicateLogicalId(_))
        ));
        assert!(matches!(
            tpl.add("has-dash", logs::LogGroup { retention_in_days: 1 }),
            Err(SynthError::InvalidName { .. })
        ));
    }

    #[test]
    fn dangling_dependency_fails_validation() {
        let mut tpl = Template::new("demo");
        tpl.add("A", logs::LogGroup { retention_in_days: 1 })
            .unwrap()
            .add_dependency("Missing");
        assert!(tpl.validate().is_err());
    }

    #[test]
    fn writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let tpl = Template::new("demo");
        let path = tpl.write_to_dir(&dir.path().join("cdk.out"), "TilesStack").unwrap();

        assert!(path.ends_with("cdk.out/TilesStack.template.json"));
        let body = std::fs::read_to_string(path).unwrap();
        let v: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(v["Description"], json!("demo"));
    }
}
