use std::str::FromStr;

use tracing::{info, instrument, warn};

use crate::{
    error::{SynthError, SynthResult},
    stack::MartinStack,
};

/// Reference to an existing IAM role, imported by ARN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRef {
    arn: String,
    account: String,
    name: String,
}

impl RoleRef {
    pub fn arn(&self) -> &str {
        &self.arn
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// Role name without its path.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RoleRef {
    type Err = SynthError;

    /// Accepts `arn:<partition>:iam::<account>:role/[<path>/]<name>`.
    fn from_str(s: &str) -> SynthResult<Self> {
        let invalid = || SynthError::InvalidArn(s.to_string());

        let parts: Vec<&str> = s.splitn(6, ':').collect();
        let [prefix, partition, service, region, account, resource] = parts[..] else {
            return Err(invalid());
        };
        if prefix != "arn" || partition.is_empty() || service != "iam" || !region.is_empty() {
            return Err(invalid());
        }
        if account.len() != 12 || !account.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let name = resource
            .strip_prefix("role/")
            .and_then(|rest| rest.rsplit('/').next())
            .filter(|n| !n.is_empty())
            .ok_or_else(invalid)?;

        Ok(Self {
            arn: s.to_string(),
            account: account.to_string(),
            name: name.to_string(),
        })
    }
}

impl MartinStack<'_> {
    /// Step 2: import the execution role by ARN.
    ///
    /// Nothing is declared; the role is referenced by the task definition.
    #[instrument(level = "debug", skip(self))]
    pub fn iam_role(&mut self) -> SynthResult<()> {
        let role: RoleRef = self.config.execution_role_arn.parse()?;
        info!(role = role.name(), account = role.account(), "execution role imported");

        if let Some(target) = self.config.target.account.as_deref() {
            if target != role.account() {
                warn!(
                    role_account = role.account(),
                    stack_account = target,
                    "execution role belongs to a different account than the stack"
                );
            }
        }

        self.state.role = Some(role);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::RoleRef;

    #[test]
    fn parses_role_arns() {
        let role: RoleRef = "arn:aws:iam::123456789012:role/ecsTaskExecutionRole"
            .parse()
            .unwrap();
        assert_eq!(role.name(), "ecsTaskExecutionRole");
        assert_eq!(role.account(), "123456789012");

        let with_path: RoleRef = "arn:aws-cn:iam::123456789012:role/service/tiles/exec"
            .parse()
            .unwrap();
        assert_eq!(with_path.name(), "exec");
    }

    #[test]
    fn rejects_non_role_arns() {
        for bad in [
            "",
            "ecsTaskExecutionRole",
            "arn:aws:iam::123456789012:user/alice",
            "arn:aws:s3:::bucket",
            "arn:aws:iam::12345:role/x",
            "arn:aws:iam:eu-west-1:123456789012:role/x",
            "arn:aws:iam::123456789012:role/",
        ] {
            assert!(bad.parse::<RoleRef>().is_err(), "{bad:?} should be rejected");
        }
    }
}
