//! DTOs
//!
//! Esquemas cerrados de request/response por recurso. Todo lo que llega del
//! backend se parsea aquí en el borde del gateway.

pub mod appointment_dto;
pub mod blog_dto;
pub mod envelope;
pub mod fleet_appointment_dto;
pub mod fleet_news_dto;
pub mod query_params;
pub mod tire_dto;

pub use appointment_dto::{CreateAppointmentRequest, UpdateAppointmentRequest};
pub use blog_dto::CreateBlogRequest;
pub use envelope::{ApiResponse, ErrorBody, PageMeta};
pub use fleet_appointment_dto::{
    AssignFleetRefBody, AssignFleetRefRequest, CreateFleetAppointmentRequest,
    UpdateFleetAppointmentRequest, UpdateStatusRequest,
};
pub use fleet_news_dto::{CreateFleetNewsRequest, UpdateFleetNewsRequest};
pub use query_params::QueryParams;
pub use tire_dto::{TireFormOptions, TireRequest, TIRE_RANGE_FIELDS};
