use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use cinerank_core::{ModelKind, RecommendationRequest};
use cinerank_storage::title_list;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_TOP_N: usize = 10;
const DEFAULT_TITLE_PAGE: usize = 100;

#[derive(Deserialize)]
struct RecommendBody {
    titles: Vec<String>,
    #[serde(default = "default_top_n")]
    top_n: usize,
    #[serde(default)]
    model: Option<String>,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

#[derive(Serialize)]
struct RecommendResponse {
    model: ModelKind,
    result: Vec<String>,
}

#[derive(Deserialize)]
struct TitlesQuery {
    offset: Option<usize>,
    limit: Option<usize>,
}

#[derive(Serialize)]
struct TitlesResponse {
    total: usize,
    result: Vec<String>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: Arc<AppState>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .configure(configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Register all routes; shared by the server and the tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/titles", web::get().to(list_titles))
        .route("/recommend", web::post().to(recommend))
        .route("/reload", web::post().to(reload));
}

async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}

async fn list_titles(
    state: web::Data<Arc<AppState>>,
    query: web::Query<TitlesQuery>,
) -> ActixResult<HttpResponse> {
    let engines = state.engines();
    let titles = title_list(engines.content.catalog());
    let total = titles.len();
    let result = titles
        .into_iter()
        .skip(query.offset.unwrap_or(0))
        .take(query.limit.unwrap_or(DEFAULT_TITLE_PAGE))
        .collect();

    Ok(HttpResponse::Ok().json(TitlesResponse { total, result }))
}

async fn recommend(
    state: web::Data<Arc<AppState>>,
    body: web::Json<RecommendBody>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let model = match body.model.as_deref() {
        Some(name) => name.parse::<ModelKind>()?,
        None => ModelKind::default(),
    };
    let request = RecommendationRequest::new(body.titles.as_slice(), body.top_n)?;
    let recommender = state.engines().recommender(model)?;

    // Ranking is CPU-bound; keep it off the async workers
    let outcome = web::block(move || recommender.recommend(&request))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    match outcome {
        Ok(result) => {
            info!(%model, results = result.len(), "Recommendation served");
            Ok(HttpResponse::Ok().json(RecommendResponse { model, result }))
        }
        Err(e) => {
            warn!(%model, error = %e, "Recommendation failed");
            Err(e.into())
        }
    }
}

async fn reload(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, ApiError> {
    let state = state.get_ref().clone();
    let engines = web::block(move || state.reload())
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": {
            "items": engines.content.catalog().len(),
            "collaborative": engines.collaborative.is_some(),
        }
    })))
}
