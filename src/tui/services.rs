use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::catalog::{Catalog, CatalogError};

use super::events::{AppEvent, Notification, NotificationLevel};

/// Shared handles the views draw their data from.
///
/// Created once at startup, then passed by reference to views that need
/// catalog data or configuration.
pub struct Services {
    pub config: AppConfig,
    pub catalog: Arc<Catalog>,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    /// Load the configured catalog.
    ///
    /// Failures here are fatal: the console has nothing to show without one.
    pub fn init(
        config: &AppConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<Self, CatalogError> {
        let source = config.catalog_source();
        let _span = tracing::info_span!("catalog_load", source = %source.describe()).entered();
        log::info!("Loading catalog from {}", source.describe());
        let catalog = source.load()?;
        log::info!(
            "Catalog loaded: {} templates, {} variables, {} segments, {} contacts, {} campaigns",
            catalog.templates.len(),
            catalog.variables.len(),
            catalog.segments.len(),
            catalog.contacts.len(),
            catalog.campaigns.len()
        );
        let services = Self::new(config.clone(), catalog, event_tx);
        services.notify(
            format!("Catalog loaded from {}", source.describe()),
            NotificationLevel::Info,
        );
        Ok(services)
    }

    pub fn new(
        config: AppConfig,
        catalog: Catalog,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            config,
            catalog: Arc::new(catalog),
            event_tx,
        }
    }

    pub fn cost_per_message(&self) -> f64 {
        self.config.schedule.cost_per_message
    }

    /// Queue a notification for the next loop turn.
    pub fn notify(&self, message: impl Into<String>, level: NotificationLevel) {
        let _ = self.event_tx.send(AppEvent::Notification(Notification {
            id: 0, // Assigned by AppState
            message: message.into(),
            level,
            ttl_ticks: 60,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_with_seed_catalog() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let services = Services::init(&AppConfig::default(), tx).unwrap();
        assert_eq!(services.catalog.templates.len(), 3);
        assert!((services.cost_per_message() - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_init_fails_on_missing_catalog_file() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut config = AppConfig::default();
        config.catalog.path = Some("/nonexistent/autoblitz/catalog.toml".into());
        let err = Services::init(&config, tx).err().unwrap();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_notify_reaches_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let services = Services::new(AppConfig::default(), Catalog::seed(), tx);
        services.notify("hello", NotificationLevel::Success);
        match rx.try_recv() {
            Ok(AppEvent::Notification(n)) => {
                assert_eq!(n.message, "hello");
                assert_eq!(n.level, NotificationLevel::Success);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
