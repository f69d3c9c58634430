//! Media catalog handlers

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    response::IntoResponse,
};

use crate::{
    error::ApiResult,
    models::{MediaId, media::MediaQuery},
    state::AppState,
};

/// Search media by type and/or name
pub async fn search_media(
    State(state): State<AppState>,
    query: Result<Query<MediaQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(query) = query?;
    let items = state.services.media.search(query).await?;

    Ok(Json(items))
}

/// Get a specific media item by ID
pub async fn get_media_item(
    State(state): State<AppState>,
    id: Result<Path<MediaId>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = id?;
    let item = state.services.media.get(id).await?;

    Ok(Json(item))
}

#[cfg(test)]
mod tests {
    use crate::models::media::MediaType;
    use crate::routes::test_support::TestApp;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn media_search_filters_by_type_and_name() {
        let app = TestApp::new();
        let viewer = app.store.add_user("viewer");
        app.store.add_media_of(MediaType::Film, "Spirited Away");
        app.store.add_media_of(MediaType::Anime, "Spirit Chronicles");
        app.store.add_media_of(MediaType::Film, "Alien");

        let (status, body) = app
            .send("GET", "/media?type=film&name=SPIRIT", Some(viewer), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "Spirited Away");

        let (_, body) = app.send("GET", "/media?name=spirit", Some(viewer), None).await;
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, _) = app.send("GET", "/media", Some(viewer), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app.send("GET", "/media?type=podcast", Some(viewer), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn media_lookup_by_id() {
        let app = TestApp::new();
        let viewer = app.store.add_user("viewer");
        let id = app.store.add_media("Dune");

        let (status, body) = app.send("GET", &format!("/media/{id}"), Some(viewer), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Dune");

        let (status, body) = app.send("GET", "/media/4242", Some(viewer), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Media not found");
    }
}
