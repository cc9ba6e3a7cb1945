use tracing::{info, instrument};

use crate::{
    error::SynthResult,
    stack::{MartinStack, ids},
    template::resources::ec2::{EgressRule, IngressRule, SecurityGroup},
};

const DESCRIPTION: &str = "Allow http access to martin service";

impl MartinStack<'_> {
    /// Step 1: resolve the VPC and declare the service security group.
    ///
    /// The group admits TCP on the container port from any IPv4 address and
    /// allows all outbound traffic.
    #[instrument(level = "debug", skip(self), fields(vpc = %self.config.vpc_id))]
    pub fn network_configuration(&mut self) -> SynthResult<()> {
        let vpc = self.lookup.lookup(&self.config.vpc_id)?;
        info!(
            vpc = %vpc.vpc_id,
            subnets = vpc.subnets.len(),
            source = %self.lookup.name(),
            "vpc resolved"
        );

        let port = self.config.settings.container_port;
        self.template.add(
            ids::SECURITY_GROUP,
            SecurityGroup {
                group_description: DESCRIPTION.into(),
                vpc_id: vpc.vpc_id.clone(),
                security_group_ingress: vec![IngressRule::tcp_from_anywhere(port, DESCRIPTION)],
                security_group_egress: vec![EgressRule::allow_all()],
            },
        )?;

        self.state.vpc = Some(vpc);
        self.state.security_group = Some(ids::SECURITY_GROUP);
        Ok(())
    }
}
