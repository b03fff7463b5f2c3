//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! a los documentos JSON del backend REST.

pub mod appointment;
pub mod blog;
pub mod catalog;
pub mod deal;
pub mod fleet_appointment;
pub mod fleet_news;
pub mod support_request;
pub mod tire;
pub mod vehicle;

pub use appointment::Appointment;
pub use blog::Blog;
pub use catalog::{CatalogEntry, CatalogResource, CatalogValue};
pub use deal::Deal;
pub use fleet_appointment::{AppointmentStatus, FleetAppointment, FleetRef};
pub use fleet_news::FleetNews;
pub use support_request::{SupportRequest, SupportStatus};
pub use tire::{CatalogRef, Tire};
pub use vehicle::FleetVehicle;
