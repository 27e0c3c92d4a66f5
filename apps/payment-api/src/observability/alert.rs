//! Alerting layer for tracing.
//!
//! Intercepts events at or above the configured level (ERROR by default) and
//! dispatches them to an [`AlertSender`]. Error-severity records written by
//! the translator carry `error_id` and `code` fields, which are lifted onto
//! the alert so an on-call engineer can find the matching client report.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{Event, Subscriber};
use tracing_subscriber::{Layer, layer::Context};

/// Alert message containing error details.
#[derive(Debug, Clone)]
pub struct AlertMessage {
    pub level: String,
    pub message: String,
    pub target: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub error_id: Option<String>,
    pub code: Option<String>,
    pub fields: Vec<(String, String)>,
}

/// Configuration for the alert layer.
#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// Least severe level that triggers an alert.
    pub min_level: tracing::Level,
    /// Channel buffer size. Alerts beyond it are dropped.
    pub buffer_size: usize,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            min_level: tracing::Level::ERROR,
            buffer_size: 100,
        }
    }
}

/// Implement this for each alert backend.
#[async_trait::async_trait]
pub trait AlertSender: Send + Sync {
    async fn send(&self, alert: AlertMessage) -> Result<(), AlertError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("Failed to send alert: {0}")]
    SendError(String),
}

/// Writes alerts to stderr (for development).
pub struct ConsoleAlertSender;

#[async_trait::async_trait]
impl AlertSender for ConsoleAlertSender {
    async fn send(&self, alert: AlertMessage) -> Result<(), AlertError> {
        let fields: Vec<String> = alert
            .fields
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        eprintln!(
            "\n[ALERT] {} {}\n  code: {}\n  error id: {}\n  message: {}\n  \
             fields: {}\n  time: {}\n",
            alert.level,
            alert.target,
            alert.code.as_deref().unwrap_or("-"),
            alert.error_id.as_deref().unwrap_or("-"),
            alert.message,
            fields.join(" "),
            alert.timestamp
        );
        Ok(())
    }
}

/// Posts alerts to a chat webhook (Slack, Discord, etc.).
pub struct WebhookAlertSender {
    url: String,
    client: reqwest::Client,
}

impl WebhookAlertSender {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

fn webhook_payload(alert: &AlertMessage) -> serde_json::Value {
    serde_json::json!({
        "text": format!(
            "*Payment service error*\n*Code:* {}\n*Error ID:* {}\n*Message:* {}\n*Time:* {}",
            alert.code.as_deref().unwrap_or("unknown"),
            alert.error_id.as_deref().unwrap_or("n/a"),
            alert.message,
            alert.timestamp.to_rfc3339()
        ),
        "code": alert.code,
        "errorId": alert.error_id,
        "target": alert.target,
    })
}

#[async_trait::async_trait]
impl AlertSender for WebhookAlertSender {
    async fn send(&self, alert: AlertMessage) -> Result<(), AlertError> {
        self.client
            .post(&self.url)
            .json(&webhook_payload(&alert))
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| AlertError::SendError(e.to_string()))?;

        Ok(())
    }
}

/// Tracing layer that forwards severe events to an [`AlertSender`].
///
/// Must be created inside a Tokio runtime; delivery runs on a spawned task.
pub struct AlertLayer {
    sender: mpsc::Sender<AlertMessage>,
    min_level: tracing::Level,
}

impl AlertLayer {
    pub fn new(alert_sender: Arc<dyn AlertSender>) -> Self {
        Self::with_config(alert_sender, AlertConfig::default())
    }

    pub fn with_config(alert_sender: Arc<dyn AlertSender>, config: AlertConfig) -> Self {
        let (tx, mut rx) = mpsc::channel::<AlertMessage>(config.buffer_size);

        tokio::spawn(async move {
            while let Some(alert) = rx.recv().await {
                if let Err(e) = alert_sender.send(alert).await {
                    eprintln!("{e}");
                }
            }
        });

        Self {
            sender: tx,
            min_level: config.min_level,
        }
    }

    pub fn console() -> Self {
        Self::new(Arc::new(ConsoleAlertSender))
    }

    pub fn webhook(url: String) -> Self {
        Self::new(Arc::new(WebhookAlertSender::new(url)))
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    error_id: Option<String>,
    code: Option<String>,
    fields: Vec<(String, String)>,
}

impl FieldVisitor {
    fn put(&mut self, name: &str, value: String) {
        match name {
            "message" => self.message = value,
            "error_id" => self.error_id = Some(value),
            "code" => self.code = Some(value),
            _ => self.fields.push((name.to_string(), value)),
        }
    }
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.put(field.name(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.put(field.name(), value.to_string());
    }
}

impl<S> Layer<S> for AlertLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        // More verbose levels compare greater.
        if *event.metadata().level() > self.min_level {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let alert = AlertMessage {
            level: event.metadata().level().to_string(),
            message: visitor.message,
            target: event.metadata().target().to_string(),
            timestamp: chrono::Utc::now(),
            error_id: visitor.error_id,
            code: visitor.code,
            fields: visitor.fields,
        };

        // Never block the logging call site.
        let _ = self.sender.try_send(alert);
    }
}
