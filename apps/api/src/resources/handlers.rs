use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::models::Resource;
use crate::resources::{featured, filter_resources, ResourceFilter};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResourceListResponse {
    pub featured: Vec<Resource>,
    pub total: usize,
    pub resources: Vec<Resource>,
}

/// GET /api/v1/resources?search=&category=&level=
pub async fn handle_list_resources(
    State(state): State<AppState>,
    Query(filter): Query<ResourceFilter>,
) -> Json<ResourceListResponse> {
    let resources: Vec<Resource> = filter_resources(&state.catalog.resources, &filter)
        .into_iter()
        .cloned()
        .collect();
    Json(ResourceListResponse {
        featured: featured(&state.catalog.resources).to_vec(),
        total: resources.len(),
        resources,
    })
}
