use std::sync::Arc;

use super::ViewController;
use crate::bus::{MessageContext, Publisher};
use crate::commit::RecordUpdateService;
use crate::config::GridConfig;
use crate::error::ConfigError;
use crate::query::RecordQueryService;
use crate::toast::{ToastSink, TracingToasts};

/// Collects the collaborators a [`ViewController`] needs.
///
/// The query service, update service and bus publisher are required. The
/// message context defaults to the configured channel and origin; toasts go
/// to the tracing log unless a sink is given.
pub struct ViewControllerBuilder {
    config: GridConfig,
    query: Option<Arc<dyn RecordQueryService>>,
    update: Option<Arc<dyn RecordUpdateService>>,
    publisher: Option<Arc<dyn Publisher>>,
    context: Option<MessageContext>,
    toasts: Option<Arc<dyn ToastSink>>,
}

impl ViewControllerBuilder {
    pub(crate) fn new(config: GridConfig) -> Self {
        Self {
            config,
            query: None,
            update: None,
            publisher: None,
            context: None,
            toasts: None,
        }
    }

    pub fn query_service(mut self, service: Arc<dyn RecordQueryService>) -> Self {
        self.query = Some(service);
        self
    }

    pub fn update_service(mut self, service: Arc<dyn RecordUpdateService>) -> Self {
        self.update = Some(service);
        self
    }

    /// Use one service for both queries and updates.
    pub fn record_service<S>(self, service: Arc<S>) -> Self
    where
        S: RecordQueryService + RecordUpdateService + 'static,
    {
        let update: Arc<dyn RecordUpdateService> = service.clone();
        self.query_service(service).update_service(update)
    }

    pub fn publisher(mut self, publisher: Arc<dyn Publisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn message_context(mut self, context: MessageContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn toasts(mut self, sink: Arc<dyn ToastSink>) -> Self {
        self.toasts = Some(sink);
        self
    }

    pub fn build(self) -> Result<ViewController, ConfigError> {
        let query = self
            .query
            .ok_or(ConfigError::MissingCollaborator("query service"))?;
        let update = self
            .update
            .ok_or(ConfigError::MissingCollaborator("update service"))?;
        let publisher = self
            .publisher
            .ok_or(ConfigError::MissingCollaborator("bus publisher"))?;

        let context = self.context.unwrap_or_else(|| {
            let context = MessageContext::new(self.config.channel.as_str());
            match &self.config.origin {
                Some(origin) => context.with_origin(origin.as_str()),
                None => context,
            }
        });
        let toasts = self.toasts.unwrap_or_else(|| Arc::new(TracingToasts));

        Ok(ViewController::assemble(
            self.config,
            query,
            update,
            publisher,
            context,
            toasts,
        ))
    }
}
