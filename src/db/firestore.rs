// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore-backed activity store.
//!
//! One document per activity in `things_to_do`, keyed by NPS id. Coordinates
//! are stored as plain numbers next to a `has_location` flag so located
//! activities can be selected with a single equality filter.

use super::{collections, ActivityStore};
use crate::error::{AppError, Result};
use crate::models::{GeoPoint, ThingToDo};
use serde::{Deserialize, Serialize};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id).await.map_err(|e| {
            AppError::StoreUnavailable(format!("Failed to connect to Firestore: {}", e))
        })?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::StoreUnavailable(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create an offline client for testing.
    ///
    /// Every operation fails with `StoreUnavailable`.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb> {
        self.client.as_ref().ok_or_else(|| {
            AppError::StoreUnavailable("Database not connected (offline mode)".to_string())
        })
    }

    async fn query_documents(&self, located_only: bool) -> Result<Vec<ThingToDo>> {
        let select = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::THINGS_TO_DO);

        let result = if located_only {
            select
                .filter(|q| q.for_all([q.field("has_location").eq(true)]))
                .obj::<ThingToDoDocument>()
                .query()
                .await
        } else {
            select.obj::<ThingToDoDocument>().query().await
        };
        let documents = result.map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        // Sorted here rather than in the query to avoid a composite index.
        let mut activities: Vec<ThingToDo> =
            documents.into_iter().map(ThingToDo::from).collect();
        activities.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(activities)
    }
}

#[async_trait::async_trait]
impl ActivityStore for FirestoreDb {
    async fn list_activities_with_location(&self) -> Result<Vec<ThingToDo>> {
        let activities = self.query_documents(true).await?;
        // A stored flag can disagree with unparseable coordinates.
        Ok(activities.into_iter().filter(ThingToDo::has_location).collect())
    }

    async fn list_all_activities(&self) -> Result<Vec<ThingToDo>> {
        self.query_documents(false).await
    }

    async fn count(&self) -> Result<u64> {
        // TODO: switch to a Firestore aggregation query once the collection
        // outgrows a full read.
        Ok(self.query_documents(false).await?.len() as u64)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<ThingToDo>> {
        let document: Option<ThingToDoDocument> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::THINGS_TO_DO)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        Ok(document.map(ThingToDo::from))
    }

    async fn upsert_activity(&self, activity: &ThingToDo) -> Result<()> {
        let document = ThingToDoDocument::from(activity);
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::THINGS_TO_DO)
            .document_id(&activity.id)
            .object(&document)
            .execute()
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "firestore"
    }
}

/// Stored activity document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThingToDoDocument {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub location_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub has_location: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    pub season: Option<String>,
    pub age_recommendation: Option<String>,
    pub accessibility: Option<String>,
    #[serde(default)]
    pub pets_allowed: bool,
    /// When this document was last written by ingestion
    pub updated_at: String,
}

impl From<&ThingToDo> for ThingToDoDocument {
    fn from(activity: &ThingToDo) -> Self {
        Self {
            id: activity.id.clone(),
            title: activity.title.clone(),
            description: activity.description.clone(),
            url: activity.url.clone(),
            image_url: activity.image_url.clone(),
            location_name: activity.location_name.clone(),
            latitude: activity.location.map(|p| p.latitude()),
            longitude: activity.location.map(|p| p.longitude()),
            has_location: activity.has_location(),
            tags: activity.tags.clone(),
            topics: activity.topics.clone(),
            activities: activity.activities.clone(),
            season: activity.season.clone(),
            age_recommendation: activity.age_recommendation.clone(),
            accessibility: activity.accessibility.clone(),
            pets_allowed: activity.pets_allowed,
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl From<ThingToDoDocument> for ThingToDo {
    fn from(doc: ThingToDoDocument) -> Self {
        let location = match (doc.latitude, doc.longitude) {
            (Some(lat), Some(lon)) => GeoPoint::new(lat, lon)
                .map_err(|e| {
                    tracing::warn!(id = %doc.id, error = %e, "Stored coordinates are invalid");
                })
                .ok(),
            _ => None,
        };

        Self {
            id: doc.id,
            title: doc.title,
            description: doc.description,
            url: doc.url,
            image_url: doc.image_url,
            location_name: doc.location_name,
            location,
            tags: doc.tags,
            topics: doc.topics,
            activities: doc.activities,
            season: doc.season,
            age_recommendation: doc.age_recommendation,
            accessibility: doc.accessibility,
            pets_allowed: doc.pets_allowed,
        }
    }
}
