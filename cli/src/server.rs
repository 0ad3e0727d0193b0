#![deny(missing_docs)]

//! # Tagging Server
//!
//! Serves `POST /tag_struct`: the request body carries Go declarations and
//! the settings to tag them with; the response is the rewritten source.
//! Every request builds its own policy.

use actix_web::{post, web, App, HttpResponse, HttpServer, Responder};
use serde::{Deserialize, Serialize};
use std::net::TcpListener;
use structtag_core::config::split_list;
use structtag_core::{
    ensure_package_clause, rewrite_source, AppError, AppResult, Case, Mode, RewritePolicy,
};

/// Package name used when the submitted text has none.
const DEFAULT_PACKAGE: &str = "st";

/// Body of a tagging request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StructTagRequest {
    /// Go source, with or without a package clause.
    pub message: String,
    /// `skip-existing`, `append` or `overwrite`; empty for the default.
    pub append_mode: String,
    /// Tag key; empty for `json`.
    pub tag_name: String,
    /// `snake`, `camel` or `none`; empty keeps the identifier.
    pub case: String,
    /// Comma separated fields that get `-`.
    pub ignored_fields: String,
    /// Comma separated types left untouched.
    pub ignored_structs: String,
}

impl StructTagRequest {
    /// Builds the policy for this request.
    pub fn policy(&self) -> AppResult<RewritePolicy> {
        let mode = if self.append_mode.is_empty() {
            Mode::default()
        } else {
            self.append_mode.parse::<Mode>().map_err(AppError::General)?
        };
        let case = self.case.parse::<Case>().map_err(AppError::General)?;
        let tag = if self.tag_name.is_empty() {
            structtag_core::DEFAULT_TAG
        } else {
            &self.tag_name
        };

        Ok(RewritePolicy::for_tag(tag)
            .with_case(case)
            .with_mode(mode)
            .ignore_fields(split_list(&self.ignored_fields))
            .ignore_types(split_list(&self.ignored_structs)))
    }
}

/// Error body returned with status 400.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpError {
    /// HTTP status code.
    pub code: u16,
    /// What went wrong.
    pub message: String,
}

impl HttpError {
    fn bad_request(message: impl Into<String>) -> HttpResponse {
        HttpResponse::BadRequest().json(HttpError {
            code: 400,
            message: message.into(),
        })
    }
}

fn tag_request(body: &[u8]) -> AppResult<String> {
    if body.is_empty() {
        return Err(AppError::General(
            "Empty request body. Must send request as json.".into(),
        ));
    }
    let request: StructTagRequest = serde_json::from_slice(body)
        .map_err(|e| AppError::General(format!("Invalid request: {}", e)))?;

    let policy = request.policy()?;
    let source = ensure_package_clause(&request.message, DEFAULT_PACKAGE)?;
    rewrite_source(&source, "st.go", &policy)
}

/// Tags the structs in the submitted source.
#[post("/tag_struct")]
pub async fn tag_struct(body: web::Bytes) -> impl Responder {
    match tag_request(&body) {
        Ok(source) => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(source),
        Err(e) => {
            tracing::warn!(error = %e, "tag request rejected");
            HttpError::bad_request(e.to_string())
        }
    }
}

fn build_server(listener: TcpListener) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(|| App::new().service(tag_struct))
        .listen(listener)?
        .run())
}

/// Serves requests on `bind_addr` until the process is stopped.
pub fn serve(bind_addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    actix_web::rt::System::new().block_on(async move { build_server(listener)?.await })
}
