use serde::Serialize;

use tilestack_model::CorsMethod;

use crate::template::Expr;

/// `AWS::ApiGatewayV2::Api` with `ProtocolType: HTTP`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Api {
    pub name: String,
    pub protocol_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_configuration: Option<Cors>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Cors {
    pub allow_origins: Vec<String>,
    pub allow_headers: Vec<String>,
    pub allow_methods: Vec<CorsMethod>,
    /// Seconds.
    pub max_age: u64,
}

/// `AWS::ApiGatewayV2::Stage`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Stage {
    pub api_id: Expr,
    pub stage_name: String,
    pub auto_deploy: bool,
}

/// `AWS::ApiGatewayV2::VpcLink`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VpcLink {
    pub name: String,
    pub subnet_ids: Vec<String>,
    pub security_group_ids: Vec<Expr>,
}

/// `AWS::ApiGatewayV2::Integration`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Integration {
    pub api_id: Expr,
    pub integration_type: String,
    pub integration_uri: Expr,
    pub integration_method: String,
    pub connection_type: String,
    pub connection_id: Expr,
    pub payload_format_version: String,
}

/// `AWS::ApiGatewayV2::Route`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Route {
    pub api_id: Expr,
    pub route_key: String,
    pub target: Expr,
    pub authorization_type: String,
}
