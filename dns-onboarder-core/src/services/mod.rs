//! 业务逻辑服务层

mod provisioning;
mod reconciler;
mod record_table;
mod registry;
mod status;
mod submission;
mod verification;

pub use provisioning::ProvisioningService;
pub use reconciler::{ReconcileIntervals, Reconciler};
pub use record_table::RecordTable;
pub use registry::{DomainRegistry, RegistryStores};
pub use status::StatusService;
pub use submission::SubmissionService;
pub use verification::NameserverVerifier;
