//! Fleet Console
//!
//! Núcleo de administración de flotas del storefront de llantas: citas de
//! servicio, cola de soporte, noticias, ofertas y catálogo sobre el backend REST.

pub mod cache;
pub mod clients;
pub mod config;
pub mod dto;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod views;

pub use state::AppState;
pub use utils::errors::{AppError, AppResult};
