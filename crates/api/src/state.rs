//! Application state

use std::sync::Arc;

use tipjar_billing::PlanProvisioner;
use tipjar_shared::ConfigStore;

use crate::config::Config;

/// Shared application state.
///
/// The store and the provisioner are injected handles, so tests substitute
/// in-memory fakes without process-global state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ConfigStore>,
    pub provisioner: Arc<PlanProvisioner>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn ConfigStore>,
        provisioner: Arc<PlanProvisioner>,
    ) -> Self {
        Self {
            config,
            store,
            provisioner,
        }
    }
}
