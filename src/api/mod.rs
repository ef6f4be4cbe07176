use crate::chunker::{self, ChunkerConfig};
use crate::config::ApiConfig;
use crate::extractor::{self, ExtractionError};
use crate::monitoring::chunking_stats::{self, ChunkingSnapshot};
use crate::security::api_key::ApiKeyGuard;
use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::http::header::{HeaderName, CONTENT_TYPE};
use actix_web::{web, App, Error, HttpResponse, HttpServer};
use chrono::Utc;
use futures_util::stream::StreamExt;
use serde_json::json;
use std::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

fn generate_request_id() -> String {
    Uuid::new_v4().to_string()[..8].to_string()
}

async fn root_handler() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("✅ pdf-sectioner is running (Actix Web)\n\nPOST /parse with a multipart file\n"))
}

async fn health_check(started: web::Data<Instant>) -> Result<HttpResponse, Error> {
    let request_id = generate_request_id();
    Ok(HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "uptime_seconds": started.elapsed().as_secs_f64(),
        "request_id": request_id
    })))
}

#[derive(serde::Deserialize)]
struct ChunkingQuery {
    limit: Option<usize>,
}

async fn get_chunking_stats(query: web::Query<ChunkingQuery>) -> Result<HttpResponse, Error> {
    let request_id = generate_request_id();
    let snapshots = chunking_stats::snapshot_history(query.limit.unwrap_or(1));
    Ok(HttpResponse::Ok().json(json!({
        "request_id": request_id,
        "snapshots": snapshots
    })))
}

/// Accepts a multipart upload, extracts its text and returns the sections.
/// Only the first file part is processed; the shape of the success body is
/// `{"sections": [{"content": "..."}, ...]}`.
async fn parse_document(
    config: web::Data<ApiConfig>,
    mut payload: Multipart,
) -> Result<HttpResponse, Error> {
    let request_id = generate_request_id();
    let started = Instant::now();

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let filename = match field
            .content_disposition()
            .as_ref()
            .and_then(|cd| cd.get_filename())
        {
            Some(name) => name.to_string(),
            // Not a file part (e.g. a plain form value); look at the next one.
            None => continue,
        };

        let Some(text_extractor) = extractor::for_filename(&filename) else {
            return Ok(HttpResponse::BadRequest().json(json!({
                "error": "Only .pdf/.txt files are supported"
            })));
        };

        let mut bytes = web::BytesMut::new();
        while let Some(chunk) = field.next().await {
            bytes.extend_from_slice(&chunk?);
        }
        let input_bytes = bytes.len();

        // Extraction and segmentation are CPU-bound; keep them off the
        // actix workers.
        let chunker_config: ChunkerConfig = config.chunker.clone();
        let result = web::block(move || {
            let raw = text_extractor.extract(&bytes)?;
            Ok::<_, ExtractionError>(chunker::process_text(&raw, &chunker_config))
        })
        .await?;

        return match result {
            Ok(document) => {
                info!(
                    request_id = %request_id,
                    file = %filename,
                    input_bytes,
                    sections = document.sections.len(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    "document parsed"
                );
                chunking_stats::record_snapshot(ChunkingSnapshot::new(
                    &request_id,
                    &filename,
                    input_bytes,
                    document.sections.len(),
                    started.elapsed().as_millis() as u64,
                ));
                Ok(HttpResponse::Ok().json(document))
            }
            Err(e) => {
                error!(request_id = %request_id, file = %filename, error = %e, "extraction failed");
                Ok(HttpResponse::InternalServerError().json(json!({
                    "error": format!("Failed to process document: {}", e)
                })))
            }
        };
    }

    Ok(HttpResponse::BadRequest().json(json!({
        "error": "No file uploaded"
    })))
}

fn build_cors(config: &ApiConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![CONTENT_TYPE, HeaderName::from_static("x-api-key")])
        .max_age(3600);

    if config.allow_any_origin() {
        cors.allow_any_origin()
    } else {
        config
            .allowed_origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

pub async fn start_api_server(config: &ApiConfig) -> std::io::Result<()> {
    let bind_addr = config.bind_addr();
    let started = Instant::now();
    let config = config.clone();

    info!(
        addr = %bind_addr,
        chunk_size = config.chunker.chunk_size,
        overlap = config.chunker.overlap,
        "starting API server"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(started))
            .wrap(build_cors(&config))
            .wrap(ApiKeyGuard::new(config.api_key.clone()))
            .route("/", web::get().to(root_handler))
            .route("/health", web::get().to(health_check))
            .route("/parse", web::post().to(parse_document))
            .service(
                web::scope("/monitoring")
                    .route("/chunking/latest", web::get().to(get_chunking_stats)),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
