use tracing::{info, instrument};

use crate::{
    error::{SynthError, SynthResult},
    lookup::SubnetKind,
    stack::{MartinStack, ids, invalid_name, need, validate_name},
    template::{
        Expr, Properties,
        resources::{
            ec2::{self, EgressRule, IngressRule, SecurityGroup},
            ecs::ServiceLoadBalancer,
            elbv2::{Attribute, Listener, ListenerAction, LoadBalancer, TargetGroup},
        },
    },
};

const ALB_SG_DESCRIPTION: &str = "Security group for the Martin load balancer";
const HEALTH_CHECK_GRACE_SECS: u32 = 60;
const RESERVED_PREFIX: &str = "internal-";

impl MartinStack<'_> {
    /// Step 6: declare the application load balancer, its target group and
    /// listener, and register the service as the listener's target.
    ///
    /// The load balancer is internet-facing only when the service gets a
    /// public IP; otherwise it is internal and sits in the private subnets.
    #[instrument(level = "debug", skip(self))]
    pub fn load_balancer_configuration(&mut self) -> SynthResult<()> {
        let service = *need(&self.state.service, "load balancer", "service")?;
        let vpc = need(&self.state.vpc, "load balancer", "network")?;
        let cfg = self.config;
        let settings = &cfg.settings;

        validate_load_balancer_name(&cfg.load_balancer_name)?;

        let public = cfg.assign_public_ip.is_enabled();
        let subnets = if public {
            vpc.require_subnets(SubnetKind::Public)?
        } else {
            vpc.default_private()?
        };
        vpc.warn_single_zone("load balancer", &subnets);
        let vpc_id = vpc.vpc_id.clone();

        self.template.add(
            ids::ALB_SECURITY_GROUP,
            SecurityGroup {
                group_description: ALB_SG_DESCRIPTION.into(),
                vpc_id: vpc_id.clone(),
                security_group_ingress: vec![IngressRule::tcp_from_anywhere(
                    settings.listener_port,
                    format!("Allow from anyone on port {}", settings.listener_port),
                )],
                security_group_egress: vec![EgressRule::allow_all()],
            },
        )?;

        let scheme = if public { "internet-facing" } else { "internal" };
        self.template.add(
            ids::ALB,
            LoadBalancer {
                name: cfg.load_balancer_name.clone(),
                scheme: scheme.into(),
                lb_type: "application".into(),
                subnets,
                security_groups: vec![ec2::group_id(ids::ALB_SECURITY_GROUP)],
                load_balancer_attributes: vec![Attribute {
                    key: "deletion_protection.enabled".into(),
                    value: "false".into(),
                }],
            },
        )?;

        let hc = &settings.health_check;
        self.template.add(
            ids::TARGET_GROUP,
            TargetGroup {
                name: settings.target_group_name.clone(),
                port: settings.listener_port,
                protocol: "HTTP".into(),
                target_type: "ip".into(),
                vpc_id,
                health_check_enabled: true,
                health_check_path: hc.path.clone(),
                health_check_interval_seconds: hc.interval_secs,
                health_check_timeout_seconds: hc.timeout_secs,
                healthy_threshold_count: hc.healthy_threshold,
                unhealthy_threshold_count: hc.unhealthy_threshold,
            },
        )?;

        self.template.add(
            ids::LISTENER,
            Listener {
                load_balancer_arn: Expr::reference(ids::ALB),
                port: settings.listener_port,
                protocol: "HTTP".into(),
                default_actions: vec![ListenerAction::forward(ids::TARGET_GROUP)],
            },
        )?;

        self.register_service_target(service)?;
        info!(
            alb = %cfg.load_balancer_name,
            scheme,
            port = settings.listener_port,
            health_check = %hc.path,
            "load balancer declared"
        );

        self.state.load_balancer = Some(ids::ALB);
        self.state.listener = Some(ids::LISTENER);
        Ok(())
    }

    /// Attach the target group to the already declared service.
    ///
    /// The service must wait for the listener, since ECS refuses target groups
    /// that are not yet associated with a load balancer.
    fn register_service_target(&mut self, service: &str) -> SynthResult<()> {
        let settings = &self.config.settings;
        let resource = self
            .template
            .resource_mut(service)
            .ok_or_else(|| SynthError::UnexpectedResource(service.to_string()))?;

        let Properties::Service(svc) = resource.properties_mut() else {
            return Err(SynthError::UnexpectedResource(service.to_string()));
        };
        svc.load_balancers.push(ServiceLoadBalancer {
            container_name: settings.container_name.clone(),
            container_port: settings.container_port,
            target_group_arn: Expr::reference(ids::TARGET_GROUP),
        });
        svc.health_check_grace_period_seconds = Some(HEALTH_CHECK_GRACE_SECS);

        resource.add_dependency(ids::LISTENER);
        Ok(())
    }
}

/// ALB names: 1-32 alphanumerics or hyphens, no hyphen at either end and no
/// `internal-` prefix.
fn validate_load_balancer_name(name: &str) -> SynthResult<()> {
    const WHAT: &str = "load balancer";
    validate_name(WHAT, name, 32, false)?;
    if name.starts_with('-') || name.ends_with('-') {
        return Err(invalid_name(WHAT, name, "must not begin or end with a hyphen"));
    }
    if name.starts_with(RESERVED_PREFIX) {
        return Err(invalid_name(WHAT, name, "must not begin with \"internal-\""));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_load_balancer_name;

    #[test]
    fn load_balancer_names() {
        for ok in ["martin-alb", "MartinAlb1", "a", "internalalb", "my-internal-alb"] {
            assert!(validate_load_balancer_name(ok).is_ok(), "{ok:?}");
        }
        let too_long = "a".repeat(33);
        for bad in ["", "-alb", "alb-", "internal-alb", "martin_alb", too_long.as_str()] {
            assert!(validate_load_balancer_name(bad).is_err(), "{bad:?}");
        }
    }
}
