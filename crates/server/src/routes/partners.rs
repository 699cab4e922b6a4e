use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use wingman_core::domain::partner::{PartnerInfo, PartnerProfile, PartnerProfileId};
use wingman_core::errors::DomainError;
use wingman_core::partner::PartnerContextBuilder;

use crate::error::ApiError;
use crate::routes::UserQuery;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreatePartnerRequest {
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub info: PartnerInfo,
}

#[derive(Debug, Serialize)]
pub struct PartnerCreated {
    pub profile_id: PartnerProfileId,
    pub profile: PartnerProfile,
}

#[derive(Debug, Serialize)]
pub struct PartnerList {
    pub profiles: Vec<PartnerProfile>,
}

/// Patch semantics: absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdatePartnerRequest {
    pub name: Option<String>,
    pub relationship: Option<String>,
    pub description: Option<String>,
    pub interests: Option<String>,
    pub communication_style: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreatePartnerRequest>,
) -> Result<(StatusCode, Json<PartnerCreated>), ApiError> {
    let user_id = DomainError::require("user_id", body.user_id.as_deref())?.to_string();
    DomainError::require("name", body.info.name.as_deref())?;
    DomainError::require("relationship", body.info.relationship.as_deref())?;

    let now = Utc::now();
    let profile = PartnerProfile {
        id: PartnerProfileId::generate(&user_id),
        analysis: PartnerContextBuilder::new().build(&body.info),
        user_id,
        info: body.info,
        created_at: now,
        updated_at: now,
    };
    state.partners.create(profile.clone()).await?;

    info!(
        event_name = "server.partners.created",
        profile_id = %profile.id.0,
        compatibility_score = profile.analysis.compatibility_score,
        "partner profile created"
    );

    Ok((StatusCode::CREATED, Json(PartnerCreated { profile_id: profile.id.clone(), profile })))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<PartnerList>, ApiError> {
    let user_id = DomainError::require("user_id", query.user_id.as_deref())?;
    let profiles = state.partners.list_for_user(user_id).await?;
    Ok(Json(PartnerList { profiles }))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PartnerProfile>, ApiError> {
    state
        .partners
        .find_by_id(&PartnerProfileId(id.clone()))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("partner profile `{id}`")))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdatePartnerRequest>,
) -> Result<Json<PartnerProfile>, ApiError> {
    let mut profile = state
        .partners
        .find_by_id(&PartnerProfileId(id.clone()))
        .await?
        .ok_or_else(|| ApiError::not_found(format!("partner profile `{id}`")))?;

    let info = &mut profile.info;
    for (slot, value) in [
        (&mut info.name, body.name),
        (&mut info.relationship, body.relationship),
        (&mut info.description, body.description),
        (&mut info.interests, body.interests),
        (&mut info.communication_style, body.communication_style),
    ] {
        if value.is_some() {
            *slot = value;
        }
    }
    DomainError::require("name", profile.info.name.as_deref())?;
    DomainError::require("relationship", profile.info.relationship.as_deref())?;

    profile.analysis = PartnerContextBuilder::new().build(&profile.info);
    profile.updated_at = Utc::now();
    state.partners.update(profile.clone()).await?;

    Ok(Json(profile))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.partners.delete(&PartnerProfileId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
