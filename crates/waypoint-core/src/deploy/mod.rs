//! Deployment selection: environment filtering, dispatch targeting,
//! build matrices and rollback selection.

pub mod matrix;
pub mod rollback;
pub mod selector;

pub use matrix::{BuildContext, BuildMatrix, build_matrix, needs_utils};
pub use rollback::{ResetSelector, select_for_reset};
pub use selector::{DispatchInput, resolve_namespace, select_deployments};
