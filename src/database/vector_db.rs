use anyhow::Result;
use qdrant_client::{
    qdrant::{
        point_id::PointIdOptions, vectors_config::Config, with_payload_selector::SelectorOptions,
        CreateCollection, Distance, PointId, PointStruct, SearchPoints, UpsertPoints, Value,
        VectorParams, VectorsConfig, WithPayloadSelector,
    },
    Qdrant,
};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::database::qdrant_config::create_qdrant_client;

#[derive(Error, Debug)]
pub enum VectorDBError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Operation failed: {0}")]
    Operation(String),
}

/// Thin wrapper around the Qdrant client for the operations this service
/// actually performs: create a collection, bulk-upsert points, search.
#[derive(Clone)]
pub struct VectorDB {
    client: Arc<Qdrant>,
}

impl VectorDB {
    pub async fn new(url: &str, api_key: Option<&str>) -> Result<Self> {
        let client = create_qdrant_client(url, api_key).await?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Create a cosine-distance collection. An already-existing collection
    /// of the same name is logged and skipped, so re-running ingestion is
    /// safe.
    pub async fn create_collection(&self, name: &str, vector_size: u64) -> Result<(), VectorDBError> {
        let create_collection = CreateCollection {
            collection_name: name.to_string(),
            vectors_config: Some(VectorsConfig {
                config: Some(Config::Params(VectorParams {
                    size: vector_size,
                    distance: Distance::Cosine.into(),
                    ..Default::default()
                })),
            }),
            ..Default::default()
        };

        match self.client.create_collection(create_collection).await {
            Ok(_) => Ok(()),
            Err(e) if e.to_string().contains("AlreadyExists") => {
                log::info!("Collection {} already exists, skipping creation", name);
                Ok(())
            }
            Err(e) => Err(VectorDBError::Operation(e.to_string())),
        }
    }

    /// Upsert a batch of (vector, payload) records, each under a fresh UUID.
    /// Returns the number of points written.
    pub async fn upsert_vectors(
        &self,
        collection: &str,
        records: Vec<(Vec<f32>, HashMap<String, serde_json::Value>)>,
    ) -> Result<usize, VectorDBError> {
        if records.is_empty() {
            return Ok(0);
        }

        let points: Vec<PointStruct> = records
            .into_iter()
            .map(|(vector, payload)| {
                let payload: HashMap<String, Value> = payload
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect();

                PointStruct {
                    id: Some(PointId {
                        point_id_options: Some(PointIdOptions::Uuid(Uuid::new_v4().to_string())),
                    }),
                    vectors: Some(vector.into()),
                    payload,
                }
            })
            .collect();

        let count = points.len();
        let upsert_points = UpsertPoints {
            collection_name: collection.to_string(),
            points,
            ..Default::default()
        };

        self.client
            .upsert_points(upsert_points)
            .await
            .map_err(|e| VectorDBError::Operation(e.to_string()))?;

        Ok(count)
    }

    /// Top-`limit` similarity search, returning (id, score, payload) tuples.
    pub async fn search_vectors(
        &self,
        collection: &str,
        query_vector: Vec<f32>,
        limit: u64,
    ) -> Result<Vec<(String, f32, HashMap<String, serde_json::Value>)>, VectorDBError> {
        let request = SearchPoints {
            collection_name: collection.to_string(),
            vector: query_vector,
            limit,
            with_payload: Some(WithPayloadSelector {
                selector_options: Some(SelectorOptions::Enable(true)),
            }),
            ..Default::default()
        };

        let results = self
            .client
            .search_points(request)
            .await
            .map_err(|e| VectorDBError::Operation(e.to_string()))?;

        let points = results
            .result
            .into_iter()
            .map(|point| {
                let id = match point.id.and_then(|id| id.point_id_options) {
                    Some(PointIdOptions::Uuid(uuid)) => uuid,
                    _ => String::new(),
                };
                let payload = point
                    .payload
                    .into_iter()
                    .map(|(k, v)| {
                        (
                            k,
                            serde_json::Value::try_from(v).unwrap_or(serde_json::Value::Null),
                        )
                    })
                    .collect();
                (id, point.score, payload)
            })
            .collect();

        Ok(points)
    }
}
