use tracing::{info, instrument};

use crate::{
    error::SynthResult,
    stack::{MartinStack, ids, need, validate_length},
    template::{
        Expr,
        resources::apigw::{Api, Cors, Integration, Route, Stage, VpcLink},
    },
};

/// Greedy path matched by the gateway route.
pub const PROXY_PATH: &str = "/{proxy+}";
/// Method of the gateway route; `ANY` forwards every HTTP method.
pub const ROUTE_METHOD: &str = "ANY";

const DEFAULT_STAGE: &str = "$default";
const PAYLOAD_FORMAT_VERSION: &str = "1.0";
const API_NAME_MAX: usize = 128;
const VPC_LINK_NAME_MAX: usize = 128;
const VPC_LINK_SUFFIX: &str = "VpcLink";

impl MartinStack<'_> {
    /// Step 7: declare the HTTP API and route every path to the listener
    /// through a VPC link.
    #[instrument(level = "debug", skip(self))]
    pub fn api_gateway_configuration(&mut self) -> SynthResult<()> {
        let listener = *need(&self.state.listener, "api gateway", "load balancer")?;
        let vpc = need(&self.state.vpc, "api gateway", "network")?;
        let cfg = self.config;
        let cors = &cfg.settings.cors;

        validate_length("api", &cfg.api_name, API_NAME_MAX)?;
        let link_subnets = vpc.default_private()?;

        self.template.add(
            ids::HTTP_API,
            Api {
                name: cfg.api_name.clone(),
                protocol_type: "HTTP".into(),
                cors_configuration: Some(Cors {
                    allow_origins: cors.allow_origins.clone(),
                    allow_headers: cors.allow_headers.clone(),
                    allow_methods: cors.allow_methods.clone(),
                    max_age: cors.max_age_secs(),
                }),
            },
        )?;

        self.template.add(
            ids::STAGE,
            Stage {
                api_id: Expr::reference(ids::HTTP_API),
                stage_name: DEFAULT_STAGE.into(),
                auto_deploy: true,
            },
        )?;

        self.template.add(
            ids::VPC_LINK,
            VpcLink {
                name: vpc_link_name(&cfg.api_name),
                subnet_ids: link_subnets,
                security_group_ids: Vec::new(),
            },
        )?;

        self.template.add(
            ids::INTEGRATION,
            Integration {
                api_id: Expr::reference(ids::HTTP_API),
                integration_type: "HTTP_PROXY".into(),
                integration_uri: Expr::reference(listener),
                integration_method: ROUTE_METHOD.into(),
                connection_type: "VPC_LINK".into(),
                connection_id: Expr::reference(ids::VPC_LINK),
                payload_format_version: PAYLOAD_FORMAT_VERSION.into(),
            },
        )?;

        let route_key = format!("{ROUTE_METHOD} {PROXY_PATH}");
        self.template.add(
            ids::ROUTE,
            Route {
                api_id: Expr::reference(ids::HTTP_API),
                route_key: route_key.clone(),
                target: Expr::join(
                    "",
                    vec![Expr::lit("integrations/"), Expr::reference(ids::INTEGRATION)],
                ),
                authorization_type: "NONE".into(),
            },
        )?;
        info!(api = %cfg.api_name, route = %route_key, "http api declared");

        self.state.api = Some(ids::HTTP_API);
        Ok(())
    }
}

/// VPC link name derived from the API name, cut to fit the 128 character limit.
fn vpc_link_name(api_name: &str) -> String {
    let base: String = api_name
        .chars()
        .take(VPC_LINK_NAME_MAX - VPC_LINK_SUFFIX.len())
        .collect();
    format!("{base}{VPC_LINK_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vpc_link_name_is_bounded() {
        assert_eq!(vpc_link_name("martin-api"), "martin-apiVpcLink");
        assert_eq!(vpc_link_name("Martin Tiles API"), "Martin Tiles APIVpcLink");

        let long = vpc_link_name(&"a".repeat(128));
        assert_eq!(long.chars().count(), VPC_LINK_NAME_MAX);
        assert!(long.ends_with(VPC_LINK_SUFFIX));

        let wide = vpc_link_name(&"ü".repeat(128));
        assert_eq!(wide.chars().count(), VPC_LINK_NAME_MAX);
    }
}
