//! Notificaciones para el operador
//!
//! Cada mutación termina en una notificación de éxito o de error. Los errores
//! de validación no notifican: se muestran sobre el campo.

use std::sync::Mutex;

use tracing::{error, info};

/// Canal de notificaciones transitorias
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notificador por defecto: eventos de tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!("✅ {}", message);
    }

    fn error(&self, message: &str) {
        error!("❌ {}", message);
    }
}

/// Notificación registrada
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// Guarda las notificaciones en memoria, en orden de emisión
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        match self.notifications.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last(&self) -> Option<Notification> {
        self.notifications().pop()
    }

    fn push(&self, notification: Notification) {
        match self.notifications.lock() {
            Ok(mut guard) => guard.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.push(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Notification::Error(message.to_string()));
    }
}
