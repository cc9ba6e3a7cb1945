use std::{
    io::Write,
    path::{Path, PathBuf},
};

use serde_json::{Value, json};
use tracing::info;

use tilestack_model::StackConfig;
use tilestack_synth::{lookup::ContextFile, stack::MartinStack};

/// Synthesize the template.
///
/// With `out` set, writes `<out>/<stack>.template.json` and returns its path;
/// otherwise writes the template to `writer`.
pub fn synth(
    config: &StackConfig,
    context: &Path,
    out: Option<&Path>,
    writer: &mut impl Write,
) -> anyhow::Result<Option<PathBuf>> {
    let lookup = ContextFile::load(context)?;
    let template = MartinStack::synth(config, &lookup)?;

    let Some(dir) = out else {
        writer.write_all(template.to_json_pretty()?.as_bytes())?;
        return Ok(None);
    };

    let path = template.write_to_dir(dir, &config.stack_name)?;
    info!(path = %path.display(), "template written");
    Ok(Some(path))
}

/// Resolved configuration and subnet placement, without a VPC lookup.
pub fn check(config: &StackConfig) -> anyhow::Result<Value> {
    let placement = config.placement()?;
    Ok(json!({
        "config": config,
        "placement": placement,
        "logRetention": config.settings.log_retention.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use tilestack_model::{Env, ModelError};
    use tilestack_synth::error::SynthError;

    use super::*;

    fn demo(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos").join(name)
    }

    fn demo_env(extra: &[(&str, &str)]) -> StackConfig {
        let mut env = Env::layered(Env::new(), Some(&demo("dev.env"))).unwrap();
        for (k, v) in extra {
            env.push(*k, *v);
        }
        StackConfig::from_env(&env).unwrap()
    }

    #[test]
    fn synth_writes_named_template() {
        let dir = tempfile::tempdir().unwrap();
        let config = demo_env(&[]);
        let mut sink = Vec::new();

        let path = synth(&config, &demo("tilestack.context.json"), Some(dir.path()), &mut sink)
            .unwrap()
            .unwrap();

        assert_eq!(path, dir.path().join("MartinEoapiStack.template.json"));
        assert!(sink.is_empty());
        let body: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(body["AWSTemplateFormatVersion"], json!("2010-09-09"));
        assert_eq!(
            body["Resources"]["MartinFargateService"]["Properties"]["ServiceName"],
            json!("martin-service")
        );
    }

    #[test]
    fn synth_without_out_dir_writes_to_writer() {
        let config = demo_env(&[]);
        let mut sink = Vec::new();

        let path = synth(&config, &demo("tilestack.context.json"), None, &mut sink).unwrap();

        assert!(path.is_none());
        let body: Value = serde_json::from_slice(&sink).unwrap();
        assert!(body["Resources"]["HttpApiVectorProxyRoute"].is_object());
    }

    #[test]
    fn subnet_policy_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = demo_env(&[("PRIVATE_WITH_NAT", "false")]);

        let err = synth(&config, &demo("tilestack.context.json"), Some(dir.path()), &mut Vec::new())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SynthError>(),
            Some(SynthError::Model(ModelError::SubnetRequired))
        ));
        assert!(!dir.path().join("MartinEoapiStack.template.json").exists());

        let err = check(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ModelError>(),
            Some(ModelError::SubnetRequired)
        ));
    }

    #[test]
    fn missing_context_file_is_an_error() {
        let config = demo_env(&[]);
        let res = synth(&config, &demo("absent.context.json"), None, &mut Vec::new());
        assert!(matches!(
            res.unwrap_err().downcast_ref::<SynthError>(),
            Some(SynthError::Context { .. })
        ));
    }

    #[test]
    fn check_reports_placement_and_settings() {
        let report = check(&demo_env(&[("SUBNET_ID", "subnet-0prv1a"), ("PRIVATE_WITH_NAT", "no")])).unwrap();
        assert_eq!(
            report["placement"],
            json!({"kind": "explicit", "subnetId": "subnet-0prv1a"})
        );
        assert_eq!(report["logRetention"], json!("7d"));
        assert_eq!(report["config"]["stackName"], json!("MartinEoapiStack"));
    }
}
