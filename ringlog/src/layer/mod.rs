
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use crate::level::Level;
use crate::logger::Logger;

/// Bridges `tracing` events into the cell pipeline.
///
/// Register it when the host application already speaks `tracing`; the
/// events come out in the same record format as the native macros. Events
/// arriving before `Logger::init` are dropped.
///
/// ```rust,ignore
/// use tracing_subscriber::layer::SubscriberExt;
///
/// let subscriber = tracing_subscriber::registry().with(RingLayer::new());
/// tracing::subscriber::set_global_default(subscriber)?;
/// ```
#[derive(Debug, Default, Clone)]
pub struct RingLayer;

impl RingLayer {
  pub fn new() -> Self {
    Self
  }
}

/// Pulls the `message` field out of a tracing event, preferring the string
/// form over the debug rendering.
#[derive(Default)]
struct MessageVisitor {
  message: Option<String>,
}

impl Visit for MessageVisitor {
  fn record_str(&mut self, field: &Field, value: &str) {
    if field.name() == "message" {
      self.message = Some(value.to_string());
    }
  }

  fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
    if field.name() == "message" && self.message.is_none() {
      self.message = Some(format!("{:?}", value));
    }
  }
}

impl<S> Layer<S> for RingLayer
where
  S: Subscriber + for<'a> LookupSpan<'a>,
{
  fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
    let Some(logger) = Logger::handle() else {
      return;
    };
    let level = Level::from_tracing(event.metadata().level());
    if !logger.enabled(level) {
      return;
    }

    let mut visitor = MessageVisitor::default();
    event.record(&mut visitor);
    let message = visitor.message.as_deref().unwrap_or("");

    let meta = event.metadata();
    logger.try_append(
      level,
      format_args!("{}", message),
      meta.file().unwrap_or_else(|| meta.target()),
      meta.line().unwrap_or(0),
      meta.target(),
    );
  }
}
