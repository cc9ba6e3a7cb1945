//! Operational parameters of the stack.
//!
//! Every field has a default matching the stack's historical behavior, and
//! every field can be overridden through the environment (see
//! [`crate::constants`]).
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Env, LogRetention,
    domain::constants as keys,
    error::{ModelError, ModelResult},
};

/// Target group health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    /// HTTP path probed on each target.
    pub path: String,
    pub interval_secs: u32,
    pub timeout_secs: u32,
    pub healthy_threshold: u32,
    pub unhealthy_threshold: u32,
}

impl Default for HealthCheck {
    fn default() -> Self {
        Self {
            path: "/health".into(),
            interval_secs: 30,
            timeout_secs: 5,
            healthy_threshold: 3,
            unhealthy_threshold: 3,
        }
    }
}

impl HealthCheck {
    /// Check the limits the load balancer enforces on target group health checks.
    pub fn validate(&self) -> ModelResult<()> {
        if !self.path.starts_with('/') {
            return Err(ModelError::Invalid(format!(
                "health check path must start with '/': {:?}",
                self.path
            )));
        }
        if !(5..=300).contains(&self.interval_secs) {
            return Err(ModelError::Invalid(format!(
                "health check interval must be 5..=300 seconds, got {}",
                self.interval_secs
            )));
        }
        if !(2..=120).contains(&self.timeout_secs) || self.timeout_secs >= self.interval_secs {
            return Err(ModelError::Invalid(format!(
                "health check timeout must be 2..=120 seconds and below the interval, got {}",
                self.timeout_secs
            )));
        }
        for (name, v) in [
            ("healthy", self.healthy_threshold),
            ("unhealthy", self.unhealthy_threshold),
        ] {
            if !(2..=10).contains(&v) {
                return Err(ModelError::Invalid(format!(
                    "{name} threshold must be 2..=10, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// HTTP methods allowed by the gateway's CORS preflight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CorsMethod {
    Get,
    Head,
    Options,
    Post,
    Put,
    Patch,
    Delete,
    /// Wildcard `*`.
    Any,
}

impl CorsMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorsMethod::Get => "GET",
            CorsMethod::Head => "HEAD",
            CorsMethod::Options => "OPTIONS",
            CorsMethod::Post => "POST",
            CorsMethod::Put => "PUT",
            CorsMethod::Patch => "PATCH",
            CorsMethod::Delete => "DELETE",
            CorsMethod::Any => "*",
        }
    }
}

impl FromStr for CorsMethod {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(CorsMethod::Get),
            "HEAD" => Ok(CorsMethod::Head),
            "OPTIONS" => Ok(CorsMethod::Options),
            "POST" => Ok(CorsMethod::Post),
            "PUT" => Ok(CorsMethod::Put),
            "PATCH" => Ok(CorsMethod::Patch),
            "DELETE" => Ok(CorsMethod::Delete),
            "*" | "ANY" => Ok(CorsMethod::Any),
            _ => Err(ModelError::UnknownCorsMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for CorsMethod {
    type Error = ModelError;
    fn try_from(s: String) -> ModelResult<Self> {
        s.parse()
    }
}

impl From<CorsMethod> for String {
    fn from(m: CorsMethod) -> Self {
        m.as_str().to_string()
    }
}

impl fmt::Display for CorsMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CORS preflight policy of the HTTP gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsPolicy {
    pub allow_origins: Vec<String>,
    pub allow_headers: Vec<String>,
    pub allow_methods: Vec<CorsMethod>,
    /// How long browsers may cache a preflight response.
    pub max_age_days: u32,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allow_origins: vec!["*".into()],
            allow_headers: vec!["*".into()],
            allow_methods: vec![
                CorsMethod::Get,
                CorsMethod::Head,
                CorsMethod::Options,
                CorsMethod::Post,
                CorsMethod::Any,
            ],
            max_age_days: 10,
        }
    }
}

impl CorsPolicy {
    pub fn max_age_secs(&self) -> u64 {
        u64::from(self.max_age_days) * 86_400
    }
}

/// Named operational parameters, formerly literals in the stack definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackSettings {
    /// Name of the single container in the task.
    pub container_name: String,
    /// Port the tile server listens on inside the container.
    pub container_port: u16,
    /// Port of the load balancer listener.
    pub listener_port: u16,
    pub health_check: HealthCheck,
    /// Number of tasks the service keeps running.
    pub desired_count: u32,
    pub log_retention: LogRetention,
    /// Prefix of the `awslogs` stream names.
    pub log_stream_prefix: String,
    pub target_group_name: String,
    /// Fargate platform version pinned on the service.
    pub platform_version: String,
    pub cors: CorsPolicy,
}

impl Default for StackSettings {
    fn default() -> Self {
        Self {
            container_name: "martin-vector-container".into(),
            container_port: 3000,
            listener_port: 80,
            health_check: HealthCheck::default(),
            desired_count: 1,
            log_retention: LogRetention::ONE_WEEK,
            log_stream_prefix: "ContainerLogs".into(),
            target_group_name: "MartinEoAPITargetGroup".into(),
            platform_version: "1.3.0".into(),
            cors: CorsPolicy::default(),
        }
    }
}

impl StackSettings {
    /// Defaults with environment overrides applied, validated.
    pub fn from_env(env: &Env) -> ModelResult<Self> {
        let d = Self::default();

        let retention_days = env.parse_or(keys::LOG_RETENTION_DAYS, d.log_retention.days(), "number of days")?;
        let settings = Self {
            container_name: env
                .optional(keys::CONTAINER_NAME)
                .map(str::to_string)
                .unwrap_or(d.container_name),
            container_port: non_zero_port(env, keys::CONTAINER_PORT, d.container_port)?,
            listener_port: non_zero_port(env, keys::LISTENER_PORT, d.listener_port)?,
            health_check: HealthCheck {
                path: env
                    .optional(keys::HEALTH_CHECK_PATH)
                    .map(str::to_string)
                    .unwrap_or(d.health_check.path),
                interval_secs: env.parse_or(
                    keys::HEALTH_CHECK_INTERVAL_SECS,
                    d.health_check.interval_secs,
                    "number of seconds",
                )?,
                timeout_secs: env.parse_or(
                    keys::HEALTH_CHECK_TIMEOUT_SECS,
                    d.health_check.timeout_secs,
                    "number of seconds",
                )?,
                healthy_threshold: env.parse_or(
                    keys::HEALTHY_THRESHOLD,
                    d.health_check.healthy_threshold,
                    "count",
                )?,
                unhealthy_threshold: env.parse_or(
                    keys::UNHEALTHY_THRESHOLD,
                    d.health_check.unhealthy_threshold,
                    "count",
                )?,
            },
            desired_count: env.parse_or(keys::DESIRED_COUNT, d.desired_count, "count")?,
            log_retention: LogRetention::new(retention_days)?,
            log_stream_prefix: env
                .optional(keys::LOG_STREAM_PREFIX)
                .map(str::to_string)
                .unwrap_or(d.log_stream_prefix),
            target_group_name: env
                .optional(keys::TARGET_GROUP_NAME)
                .map(str::to_string)
                .unwrap_or(d.target_group_name),
            platform_version: d.platform_version,
            cors: CorsPolicy {
                max_age_days: env.parse_or(keys::CORS_MAX_AGE_DAYS, d.cors.max_age_days, "number of days")?,
                ..d.cors
            },
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> ModelResult<()> {
        self.health_check.validate()?;
        // Target group names are limited to 32 alphanumerics and hyphens.
        let tg = &self.target_group_name;
        if tg.is_empty()
            || tg.len() > 32
            || tg.starts_with('-')
            || tg.ends_with('-')
            || !tg.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(ModelError::Invalid(format!("target group name: {tg:?}")));
        }
        Ok(())
    }
}

fn non_zero_port(env: &Env, key: &str, default: u16) -> ModelResult<u16> {
    let port = env.parse_or(key, default, "port")?;
    if port == 0 {
        return Err(ModelError::InvalidNumber {
            key: key.to_string(),
            value: "0".into(),
            expected: "port",
        });
    }
    Ok(port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_historical_literals() {
        let s = StackSettings::default();
        assert_eq!(s.container_port, 3000);
        assert_eq!(s.listener_port, 80);
        assert_eq!(s.health_check.path, "/health");
        assert_eq!(s.health_check.interval_secs, 30);
        assert_eq!(s.health_check.timeout_secs, 5);
        assert_eq!(s.health_check.healthy_threshold, 3);
        assert_eq!(s.health_check.unhealthy_threshold, 3);
        assert_eq!(s.desired_count, 1);
        assert_eq!(s.log_retention.days(), 7);
        assert_eq!(s.cors.max_age_secs(), 864_000);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn empty_env_yields_defaults() {
        let s = StackSettings::from_env(&Env::new()).unwrap();
        assert_eq!(s, StackSettings::default());
    }

    #[test]
    fn env_overrides_apply() {
        let env: Env = [
            ("CONTAINER_PORT", "8080"),
            ("HEALTH_CHECK_PATH", "/catalog"),
            ("LOG_RETENTION_DAYS", "30"),
            ("DESIRED_COUNT", "2"),
            ("CORS_MAX_AGE_DAYS", "1"),
        ]
        .into_iter()
        .collect();

        let s = StackSettings::from_env(&env).unwrap();
        assert_eq!(s.container_port, 8080);
        assert_eq!(s.health_check.path, "/catalog");
        assert_eq!(s.log_retention.days(), 30);
        assert_eq!(s.desired_count, 2);
        assert_eq!(s.cors.max_age_secs(), 86_400);
        assert_eq!(s.cors.allow_methods.len(), 5);
    }

    #[test]
    fn rejects_bad_overrides() {
        let cases = [
            ("LOG_RETENTION_DAYS", "8"),
            ("CONTAINER_PORT", "0"),
            ("LISTENER_PORT", "70000"),
            ("HEALTH_CHECK_PATH", "health"),
            ("HEALTH_CHECK_TIMEOUT_SECS", "30"),
            ("HEALTHY_THRESHOLD", "1"),
            ("TARGET_GROUP_NAME", "has_underscore"),
        ];
        for (key, value) in cases {
            let env: Env = [(key, value)].into_iter().collect();
            assert!(
                StackSettings::from_env(&env).is_err(),
                "{key}={value} should be rejected"
            );
        }
    }

    #[test]
    fn cors_methods_parse_and_serialize() {
        assert_eq!("get".parse::<CorsMethod>().unwrap(), CorsMethod::Get);
        assert_eq!("*".parse::<CorsMethod>().unwrap(), CorsMethod::Any);
        assert!("TRACE".parse::<CorsMethod>().is_err());

        let json = serde_json::to_string(&CorsPolicy::default().allow_methods).unwrap();
        assert_eq!(json, r#"["GET","HEAD","OPTIONS","POST","*"]"#);
    }
}
