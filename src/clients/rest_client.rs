//! Gateway REST del storefront
//!
//! Emite las llamadas GET/POST/PATCH/DELETE contra el conjunto fijo de
//! recursos y parsea el envoltorio `{ data, message? }`. Cualquier respuesta
//! no-2xx se convierte en `AppError::Http` con un mensaje legible. No reintenta.

use std::sync::Arc;

use http::Method;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use tracing::{debug, warn};

use super::transport::{HttpRequest, Transport};
use crate::dto::{ApiResponse, ErrorBody, QueryParams};
use crate::models::CatalogResource;
use crate::utils::errors::{http_error, http_status_error, AppResult};

const EMPTY_ENVELOPE: &str = r#"{"data":null}"#;

/// Recursos REST consumidos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    FleetAppointments,
    Appointments,
    FleetNews,
    Deals,
    Tires,
    Blogs,
    Users,
    Catalog(CatalogResource),
}

impl Resource {
    pub fn base_path(&self) -> &'static str {
        match self {
            Resource::FleetAppointments => "/fleet-appointments",
            Resource::Appointments => "/appointments",
            Resource::FleetNews => "/fleet-news",
            Resource::Deals => "/deals",
            Resource::Tires => "/tires",
            Resource::Blogs => "/blogs",
            Resource::Users => "/users",
            Resource::Catalog(catalog) => catalog.path(),
        }
    }

    /// Nombre legible para los mensajes de error por defecto
    pub fn label(&self) -> &'static str {
        match self {
            Resource::FleetAppointments => "fleet appointments",
            Resource::Appointments => "appointments",
            Resource::FleetNews => "fleet news",
            Resource::Deals => "deals",
            Resource::Tires => "tires",
            Resource::Blogs => "blogs",
            Resource::Users => "users",
            Resource::Catalog(catalog) => catalog.name(),
        }
    }

    /// Ruta con segmentos adicionales escapados: `/fleet-appointments/vehicle/abc`
    pub fn path(&self, segments: &[&str]) -> String {
        let mut path = self.base_path().to_string();
        for segment in segments {
            path.push('/');
            path.push_str(&urlencoding::encode(segment));
        }
        path
    }
}

/// Gateway hacia el backend REST
#[derive(Clone)]
pub struct RestGateway {
    transport: Arc<dyn Transport>,
}

impl RestGateway {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// `GET /resource?params`
    pub async fn list<T: DeserializeOwned>(
        &self,
        resource: Resource,
        params: &QueryParams,
    ) -> AppResult<ApiResponse<Vec<T>>> {
        self.list_at(resource, &[], params).await
    }

    /// `GET /resource/<segments>?params`
    pub async fn list_at<T: DeserializeOwned>(
        &self,
        resource: Resource,
        segments: &[&str],
        params: &QueryParams,
    ) -> AppResult<ApiResponse<Vec<T>>> {
        let request = HttpRequest {
            method: Method::GET,
            path: resource.path(segments),
            query: params.pairs(),
            body: None,
        };
        self.execute(request, &format!("Error fetching {}", resource.label()))
            .await
    }

    /// `GET /resource/:id`
    pub async fn get<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: &str,
    ) -> AppResult<ApiResponse<T>> {
        let request = HttpRequest {
            method: Method::GET,
            path: resource.path(&[id]),
            query: Vec::new(),
            body: None,
        };
        self.execute(request, &format!("Error fetching {}", resource.label()))
            .await
    }

    /// `POST /resource`
    pub async fn create<B: Serialize, T: DeserializeOwned>(
        &self,
        resource: Resource,
        body: &B,
    ) -> AppResult<ApiResponse<T>> {
        self.post_at(resource, &[], body).await
    }

    /// `POST /resource/<segments>`
    pub async fn post_at<B: Serialize, T: DeserializeOwned>(
        &self,
        resource: Resource,
        segments: &[&str],
        body: &B,
    ) -> AppResult<ApiResponse<T>> {
        let request = HttpRequest {
            method: Method::POST,
            path: resource.path(segments),
            query: Vec::new(),
            body: Some(serde_json::to_value(body)?),
        };
        self.execute(request, &format!("Error creating {}", resource.label()))
            .await
    }

    /// `PATCH /resource/:id`
    pub async fn update<B: Serialize, T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: &str,
        body: &B,
    ) -> AppResult<ApiResponse<T>> {
        self.patch_at(resource, &[id], body).await
    }

    /// `PATCH /resource/<segments>`
    pub async fn patch_at<B: Serialize, T: DeserializeOwned>(
        &self,
        resource: Resource,
        segments: &[&str],
        body: &B,
    ) -> AppResult<ApiResponse<T>> {
        let request = HttpRequest {
            method: Method::PATCH,
            path: resource.path(segments),
            query: Vec::new(),
            body: Some(serde_json::to_value(body)?),
        };
        self.execute(request, &format!("Error updating {}", resource.label()))
            .await
    }

    /// `DELETE /resource/:id`; el contenido de `data` (si llega) se descarta
    pub async fn remove(
        &self,
        resource: Resource,
        id: &str,
    ) -> AppResult<ApiResponse<Option<IgnoredAny>>> {
        let request = HttpRequest {
            method: Method::DELETE,
            path: resource.path(&[id]),
            query: Vec::new(),
            body: None,
        };
        self.execute(request, &format!("Error deleting {}", resource.label()))
            .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        fallback: &str,
    ) -> AppResult<ApiResponse<T>> {
        let method = request.method.clone();
        let path = request.path.clone();
        let response = self.transport.send(request).await?;

        if !response.status.is_success() {
            let server_message = serde_json::from_str::<ErrorBody>(&response.body)
                .ok()
                .and_then(|body| body.message)
                .filter(|message| !message.trim().is_empty());
            let status = response.status.as_u16();
            let error = match server_message {
                Some(message) => http_error(status, &message),
                None => http_status_error(status, fallback),
            };
            warn!("⚠️ {} {} respondió {}: {}", method, path, response.status, error);
            return Err(error);
        }

        debug!("📥 {} {} -> {}", method, path, response.status);
        // 204 o cuerpo vacío: éxito sin `data`
        let body = if response.body.trim().is_empty() {
            EMPTY_ENVELOPE
        } else {
            response.body.as_str()
        };
        let envelope: ApiResponse<T> = serde_json::from_str(body)?;
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::transport::HttpResponse;
    use crate::utils::errors::AppError;
    use async_trait::async_trait;
    use http::StatusCode;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    struct CannedTransport {
        status: StatusCode,
        body: String,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl CannedTransport {
        fn new(status: StatusCode, body: Value) -> Arc<Self> {
            Arc::new(Self {
                status,
                body: body.to_string(),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn send(&self, request: HttpRequest) -> AppResult<HttpResponse> {
            self.seen.lock().unwrap().push(request);
            Ok(HttpResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    #[test]
    fn test_path_escapes_segments() {
        assert_eq!(
            Resource::FleetAppointments.path(&["fleet-ref", "a b/c"]),
            "/fleet-appointments/fleet-ref/a%20b%2Fc"
        );
        assert_eq!(Resource::Catalog(CatalogResource::TireWidths).path(&[]), "/tire-width");
    }

    #[tokio::test]
    async fn test_list_parses_envelope_and_sends_params() {
        let transport = CannedTransport::new(StatusCode::OK, json!({ "data": [1, 2, 3] }));
        let gateway = RestGateway::new(transport.clone());

        let params = QueryParams::new().with("limit", 3);
        let response: ApiResponse<Vec<u32>> = gateway.list(Resource::Deals, &params).await.unwrap();
        assert_eq!(response.data, vec![1, 2, 3]);

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].method, Method::GET);
        assert_eq!(seen[0].path, "/deals");
        assert_eq!(seen[0].query, vec![("limit".to_string(), "3".to_string())]);
    }

    #[tokio::test]
    async fn test_non_success_uses_server_message() {
        let transport = CannedTransport::new(
            StatusCode::NOT_FOUND,
            json!({ "success": false, "message": "Appointment not found" }),
        );
        let gateway = RestGateway::new(transport);

        let err = gateway
            .get::<Value>(Resource::FleetAppointments, "missing")
            .await
            .unwrap_err();
        match err {
            AppError::Http {
                status,
                message,
                from_server,
            } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Appointment not found");
                assert!(from_server);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_success_without_body_uses_static_message() {
        let transport = Arc::new(CannedTransport {
            status: StatusCode::BAD_GATEWAY,
            body: "<html>bad gateway</html>".to_string(),
            seen: Mutex::new(Vec::new()),
        });
        let gateway = RestGateway::new(transport);

        let err = gateway.remove(Resource::FleetNews, "n1").await.unwrap_err();
        assert_eq!(err.to_string(), "Error deleting fleet news");
    }

    #[tokio::test]
    async fn test_no_content_is_a_successful_mutation() {
        let transport = Arc::new(CannedTransport {
            status: StatusCode::NO_CONTENT,
            body: String::new(),
            seen: Mutex::new(Vec::new()),
        });
        let gateway = RestGateway::new(transport);

        let response = gateway.remove(Resource::FleetAppointments, "a1").await.unwrap();
        assert!(response.data.is_none());
        assert!(response.message.is_none());

        let item = gateway
            .get::<Value>(Resource::FleetAppointments, "a1")
            .await
            .unwrap();
        assert_eq!(item.data, Value::Null);

        let err = gateway
            .list::<Value>(Resource::FleetAppointments, &QueryParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[tokio::test]
    async fn test_missing_data_is_a_decode_error() {
        let transport = CannedTransport::new(StatusCode::OK, json!({ "message": "ok" }));
        let gateway = RestGateway::new(transport);

        let err = gateway
            .list::<Value>(Resource::FleetAppointments, &QueryParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }
}
