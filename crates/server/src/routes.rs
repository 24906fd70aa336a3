//! Route handlers.

use axum::{Json, extract::State};
use precis_core::{ArticleOutcome, run_batch};
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::form::ArticleUrls;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SummariesResponse {
    pub summaries: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct OutcomesResponse {
    pub outcomes: Vec<ArticleOutcome>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// `POST /summarize`: one summary or error string per URL, in input order.
pub async fn summarize(
    State(state): State<AppState>, ArticleUrls(urls): ArticleUrls,
) -> Result<Json<SummariesResponse>, ApiError> {
    let outcomes = process(&state, &urls).await?;
    let summaries = outcomes.iter().map(ToString::to_string).collect();
    Ok(Json(SummariesResponse { summaries }))
}

/// `POST /summarize/outcomes`: same batch, tagged per-article results.
pub async fn summarize_outcomes(
    State(state): State<AppState>, ArticleUrls(urls): ArticleUrls,
) -> Result<Json<OutcomesResponse>, ApiError> {
    let outcomes = process(&state, &urls).await?;
    Ok(Json(OutcomesResponse { outcomes }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn process(state: &AppState, urls: &[String]) -> Result<Vec<ArticleOutcome>, ApiError> {
    let span = tracing::info_span!("batch", batch_id = %Uuid::new_v4(), urls = urls.len());

    async {
        let outcomes = run_batch(&state.service, urls, &state.batch).await?;
        let failed = outcomes.iter().filter(|o| !o.is_summary()).count();
        tracing::info!(failed, "batch complete");
        Ok::<_, ApiError>(outcomes)
    }
    .instrument(span)
    .await
}
