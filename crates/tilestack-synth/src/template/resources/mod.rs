//! Typed properties of the CloudFormation resource types the stack declares.
pub mod apigw;
pub mod ec2;
pub mod ecs;
pub mod elbv2;
pub mod logs;

use serde::Serialize;

/// Properties of one resource, tagged by CloudFormation type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Properties {
    SecurityGroup(ec2::SecurityGroup),
    LogGroup(logs::LogGroup),
    Cluster(ecs::Cluster),
    TaskDefinition(ecs::TaskDefinition),
    Service(ecs::Service),
    LoadBalancer(elbv2::LoadBalancer),
    TargetGroup(elbv2::TargetGroup),
    Listener(elbv2::Listener),
    Api(apigw::Api),
    Stage(apigw::Stage),
    VpcLink(apigw::VpcLink),
    Integration(apigw::Integration),
    Route(apigw::Route),
}

impl Properties {
    /// CloudFormation resource type name.
    pub fn resource_type(&self) -> &'static str {
        match self {
            Properties::SecurityGroup(_) => "AWS::EC2::SecurityGroup",
            Properties::LogGroup(_) => "AWS::Logs::LogGroup",
            Properties::Cluster(_) => "AWS::ECS::Cluster",
            Properties::TaskDefinition(_) => "AWS::ECS::TaskDefinition",
            Properties::Service(_) => "AWS::ECS::Service",
            Properties::LoadBalancer(_) => "AWS::ElasticLoadBalancingV2::LoadBalancer",
            Properties::TargetGroup(_) => "AWS::ElasticLoadBalancingV2::TargetGroup",
            Properties::Listener(_) => "AWS::ElasticLoadBalancingV2::Listener",
            Properties::Api(_) => "AWS::ApiGatewayV2::Api",
            Properties::Stage(_) => "AWS::ApiGatewayV2::Stage",
            Properties::VpcLink(_) => "AWS::ApiGatewayV2::VpcLink",
            Properties::Integration(_) => "AWS::ApiGatewayV2::Integration",
            Properties::Route(_) => "AWS::ApiGatewayV2::Route",
        }
    }
}

macro_rules! impl_from_props {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Properties {
                fn from(p: $ty) -> Self {
                    Properties::$variant(p)
                }
            }
        )*
    };
}

impl_from_props! {
    SecurityGroup => ec2::SecurityGroup,
    LogGroup => logs::LogGroup,
    Cluster => ecs::Cluster,
    TaskDefinition => ecs::TaskDefinition,
    Service => ecs::Service,
    LoadBalancer => elbv2::LoadBalancer,
    TargetGroup => elbv2::TargetGroup,
    Listener => elbv2::Listener,
    Api => apigw::Api,
    Stage => apigw::Stage,
    VpcLink => apigw::VpcLink,
    Integration => apigw::Integration,
    Route => apigw::Route,
}
