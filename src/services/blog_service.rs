//! Servicio de blogs

use std::sync::Arc;

use serde::de::IgnoredAny;
use tracing::info;

use super::notifier::Notifier;
use super::settle_mutation;
use crate::cache::{Mutation, QueryCache, QueryFamily, QueryKey};
use crate::clients::{Resource, RestGateway};
use crate::dto::{CreateBlogRequest, QueryParams};
use crate::models::Blog;
use crate::utils::errors::{require_id, AppResult};

#[derive(Clone)]
pub struct BlogService {
    gateway: RestGateway,
    cache: Arc<QueryCache>,
    notifier: Arc<dyn Notifier>,
}

impl BlogService {
    pub fn new(gateway: RestGateway, cache: Arc<QueryCache>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            cache,
            notifier,
        }
    }

    pub async fn list(&self, params: &QueryParams) -> AppResult<Vec<Blog>> {
        let gateway = &self.gateway;
        let key = QueryKey::new(QueryFamily::Blogs, params.to_string());
        self.cache
            .fetch(key, || async move {
                gateway
                    .list::<Blog>(Resource::Blogs, params)
                    .await
                    .map(|response| response.data)
            })
            .await
    }

    /// La imagen es obligatoria; sin ella no hay llamada de red
    pub async fn create(&self, request: &CreateBlogRequest) -> AppResult<Blog> {
        request.check()?;
        info!("✍️ Publicando blog: {}", request.title);

        let result = self.gateway.create::<_, Blog>(Resource::Blogs, request).await;
        settle_mutation(
            &self.cache,
            self.notifier.as_ref(),
            result,
            Mutation::CreateBlog,
            "Blog created successfully",
            "Failed to create blog",
        )
        .await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        require_id(id, "Blog ID is required")?;
        info!("🗑️ Eliminando blog {}", id);

        let result = self.gateway.remove(Resource::Blogs, id).await;
        settle_mutation(
            &self.cache,
            self.notifier.as_ref(),
            result,
            Mutation::DeleteBlog { id: id.to_string() },
            "Blog deleted successfully",
            "Failed to delete blog",
        )
        .await
        .map(|_: Option<IgnoredAny>| ())
    }
}
