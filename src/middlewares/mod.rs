pub mod require_tenant;

pub use require_tenant::{RequireTenant, TenantContext};
