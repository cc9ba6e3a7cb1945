use tracing::{info, instrument, warn};

use tilestack_model::SubnetPlacement;

use crate::{
    error::SynthResult,
    lookup::SubnetKind,
    stack::{MartinStack, ids, need, validate_name},
    template::{
        Expr,
        resources::{
            ec2,
            ecs::{AwsvpcConfiguration, DeploymentConfiguration, NetworkConfiguration, Service},
        },
    },
};

impl MartinStack<'_> {
    /// Step 5: declare the Fargate service.
    ///
    /// Subnet placement is decided before anything is declared, so a
    /// configuration without NAT and without a subnet id leaves the template
    /// without a service.
    #[instrument(level = "debug", skip(self))]
    pub fn fargate_service_configuration(&mut self) -> SynthResult<()> {
        let placement = self.config.placement()?;

        let cluster = *need(&self.state.cluster, "service", "cluster")?;
        let task = *need(&self.state.task_definition, "service", "task")?;
        let sg = *need(&self.state.security_group, "service", "network")?;
        let vpc = need(&self.state.vpc, "service", "network")?;

        let subnets = match &placement {
            SubnetPlacement::PrivateWithNat => vpc.require_subnets(SubnetKind::PrivateWithEgress)?,
            SubnetPlacement::Explicit(id) => {
                if !vpc.contains(id) {
                    warn!(subnet = %id, vpc = %vpc.vpc_id, "subnet is not listed for the vpc");
                }
                vec![id.clone()]
            }
            SubnetPlacement::Public => vpc.require_subnets(SubnetKind::Public)?,
        };

        let cfg = self.config;
        validate_name("service", &cfg.service_name, 255, true)?;

        let assign_public_ip = if cfg.assign_public_ip.is_enabled() {
            "ENABLED"
        } else {
            "DISABLED"
        };

        info!(
            service = %cfg.service_name,
            %placement,
            subnets = subnets.len(),
            public_ip = assign_public_ip,
            "fargate service declared"
        );
        self.template.add(
            ids::SERVICE,
            Service {
                cluster: Expr::reference(cluster),
                task_definition: Expr::reference(task),
                service_name: cfg.service_name.clone(),
                launch_type: "FARGATE".into(),
                platform_version: cfg.settings.platform_version.clone(),
                desired_count: cfg.settings.desired_count,
                deployment_configuration: DeploymentConfiguration::default(),
                enable_ecs_managed_tags: false,
                network_configuration: NetworkConfiguration {
                    awsvpc_configuration: AwsvpcConfiguration {
                        assign_public_ip: assign_public_ip.into(),
                        security_groups: vec![ec2::group_id(sg)],
                        subnets,
                    },
                },
                load_balancers: Vec::new(),
                health_check_grace_period_seconds: None,
            },
        )?;

        self.state.service = Some(ids::SERVICE);
        Ok(())
    }
}
