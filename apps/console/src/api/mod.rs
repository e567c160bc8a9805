//! Resource APIs, one thin function set per entity type.
//!
//! Every call delegates straight to `HttpClient` with the entity's REST
//! prefix and returns whatever the backend returns.

pub mod candidates;

use std::marker::PhantomData;

use crate::errors::ApiError;
use crate::http_client::HttpClient;
use crate::models::{Application, Candidate, Job, Resource};

pub struct ResourceApi<R: Resource> {
    http: HttpClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceApi<R> {
    fn clone(&self) -> Self {
        Self::new(self.http.clone())
    }
}

impl<R: Resource> ResourceApi<R> {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            _resource: PhantomData,
        }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    fn collection_path() -> String {
        format!("/{}/", R::COLLECTION)
    }

    fn item_path(id: i64) -> String {
        format!("/{}/{id}", R::COLLECTION)
    }

    /// GET /{collection}/
    pub async fn list(&self) -> Result<Vec<R>, ApiError> {
        self.http.get(&Self::collection_path()).await
    }

    /// GET /{collection}/{id}
    pub async fn get_by_id(&self, id: i64) -> Result<R, ApiError> {
        self.http.get(&Self::item_path(id)).await
    }

    /// POST /{collection}/
    pub async fn create(&self, payload: &R::Payload) -> Result<R, ApiError> {
        self.http.post(&Self::collection_path(), payload).await
    }

    /// PUT /{collection}/{id}
    pub async fn update(&self, id: i64, payload: &R::Payload) -> Result<R, ApiError> {
        self.http.put(&Self::item_path(id), payload).await
    }

    /// DELETE /{collection}/{id}
    pub async fn remove(&self, id: i64) -> Result<bool, ApiError> {
        self.http.delete(&Self::item_path(id)).await
    }
}

/// The three resource APIs over one shared client.
#[derive(Clone)]
pub struct Api {
    pub candidates: ResourceApi<Candidate>,
    pub jobs: ResourceApi<Job>,
    pub applications: ResourceApi<Application>,
}

impl Api {
    pub fn new(http: HttpClient) -> Self {
        Self {
            candidates: ResourceApi::new(http.clone()),
            jobs: ResourceApi::new(http.clone()),
            applications: ResourceApi::new(http),
        }
    }
}
