//! Shared application state for axum handlers.

use std::sync::Arc;

use growbox_app::ports::{Clock, ControlRepository, SensorReadingRepository};
use growbox_app::services::control_service::ControlService;
use growbox_app::services::sensor_service::SensorService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types and the clock to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<CR, SR, C> {
    /// Control record service.
    pub control_service: Arc<ControlService<CR, C>>,
    /// Sensor reading service.
    pub sensor_service: Arc<SensorService<SR, C>>,
}

impl<CR, SR, C> Clone for AppState<CR, SR, C> {
    fn clone(&self) -> Self {
        Self {
            control_service: Arc::clone(&self.control_service),
            sensor_service: Arc::clone(&self.sensor_service),
        }
    }
}

impl<CR, SR, C> AppState<CR, SR, C>
where
    CR: ControlRepository + Send + Sync + 'static,
    SR: SensorReadingRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(control_service: ControlService<CR, C>, sensor_service: SensorService<SR, C>) -> Self {
        Self {
            control_service: Arc::new(control_service),
            sensor_service: Arc::new(sensor_service),
        }
    }
}
