//! Provider data structure passed to resources and data sources

use crate::api::Client;
use std::any::Any;
use std::sync::Arc;
use tfkit::types::Diagnostic;

#[derive(Clone)]
pub struct PangolinProviderData {
    pub client: Arc<Client>,
}

impl PangolinProviderData {
    pub fn new(client: Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Downcast the opaque provider data handed over by the host.
    /// A missing or foreign payload is a configuration error.
    pub fn from_provider_data(
        data: Option<Arc<dyn Any + Send + Sync>>,
    ) -> Result<Self, Diagnostic> {
        match data {
            Some(data) => match data.downcast_ref::<PangolinProviderData>() {
                Some(provider_data) => Ok(provider_data.clone()),
                None => Err(Diagnostic::error(
                    "Unexpected Configure Type",
                    "Expected PangolinProviderData, got an unexpected provider data type",
                )),
            },
            None => Err(Diagnostic::error(
                "No provider data",
                "No provider data was provided; the provider must be configured first",
            )),
        }
    }
}
