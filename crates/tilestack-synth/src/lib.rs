pub mod error;
pub mod lookup;
pub mod stack;
pub mod template;

pub mod prelude {
    pub use crate::error::{SynthError, SynthResult};
    pub use crate::lookup::{ContextFile, DEFAULT_CONTEXT_FILE, SubnetInfo, SubnetKind, VpcContext, VpcLookup};
    pub use crate::stack::{MartinStack, PROXY_PATH, ROUTE_METHOD, RoleRef, ids};
    pub use crate::template::{Expr, Output, Properties, RemovalPolicy, Resource, Template};
}
