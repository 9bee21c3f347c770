//! Instance pools and the upload hand-off to the rendering subsystem

pub mod instance_pool;
pub mod upload;

pub use instance_pool::{capacity_for_angle, InstanceData, InstancePool};
pub use upload::{collect_uploads, UploadBatch};
