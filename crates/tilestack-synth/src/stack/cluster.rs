use tracing::{info, instrument};

use crate::{
    error::SynthResult,
    stack::{MartinStack, ids, need, validate_name},
    template::resources::ecs::Cluster,
};

impl MartinStack<'_> {
    /// Step 3: declare the ECS cluster in the looked-up VPC.
    #[instrument(level = "debug", skip(self))]
    pub fn cluster_configuration(&mut self) -> SynthResult<()> {
        need(&self.state.vpc, "cluster", "network")?;

        let name = &self.config.cluster_name;
        validate_name("cluster", name, 255, true)?;

        self.template.add(
            ids::CLUSTER,
            Cluster {
                cluster_name: name.clone(),
            },
        )?;
        info!(cluster = %name, "cluster declared");

        self.state.cluster = Some(ids::CLUSTER);
        Ok(())
    }
}
