use crate::api::context::ApiContext;
use axum::{
    Extension,
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use chrono::Utc;
use document_filters::{DocumentFilters, Sort, SortKey, SortOrder, parse_list};
use model::document::response::{DocumentListResponse, DocumentView};
use model::response::{GenericErrorResponse, GenericResponse};
use model::user::UserContext;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Deserialize, Default, Debug)]
pub struct ListParams {
    /// Comma-separated document kinds
    pub kind: Option<String>,
    /// Comma-separated derived statuses
    pub status: Option<String>,
    /// Free-text search over title and notes
    pub search: Option<String>,
    /// Sort key (title, expires_at, created_at)
    pub sort: Option<String>,
    /// Sort order (asc, desc)
    pub order: Option<String>,
}

impl ListParams {
    fn filters(&self) -> DocumentFilters {
        DocumentFilters {
            kinds: parse_list(self.kind.as_deref()),
            statuses: parse_list(self.status.as_deref()),
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    fn sort(&self) -> Sort {
        Sort {
            key: self
                .sort
                .as_deref()
                .and_then(|s| SortKey::from_str(s).ok())
                .unwrap_or_default(),
            order: self
                .order
                .as_deref()
                .and_then(|s| SortOrder::from_str(s).ok())
                .unwrap_or_default(),
        }
    }
}

/// Lists the caller's documents, filtered and sorted.
#[utoipa::path(
        tag = "document",
        get,
        path = "/documents",
        params(
            ("kind" = Option<String>, Query, description = "Comma-separated kinds"),
            ("status" = Option<String>, Query, description = "Comma-separated statuses"),
            ("search" = Option<String>, Query, description = "Text search over title and notes"),
            ("sort" = Option<String>, Query, description = "title | expires_at | created_at"),
            ("order" = Option<String>, Query, description = "asc | desc"),
        ),
        responses(
            (status = 200, body=DocumentListResponse),
            (status = 401, body=GenericErrorResponse),
            (status = 500, body=GenericErrorResponse),
        )
    )]
#[tracing::instrument(skip(state, user_context), fields(user_id=?user_context.user_id))]
pub async fn get_user_documents_handler(
    State(state): State<ApiContext>,
    user_context: Extension<UserContext>,
    Query(params): Query<ListParams>,
) -> Response {
    let documents =
        match doctrack_db_client::document::get_user_documents(&state.db, &user_context.user_id)
            .await
        {
            Ok(documents) => documents,
            Err(e) => {
                tracing::error!(error=?e, "unable to list documents");
                return GenericResponse::builder()
                    .message("unable to list documents")
                    .is_error(true)
                    .send(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };

    let today = Utc::now().date_naive();
    let total = documents.len() as i64;

    let documents = document_filters::apply(documents, &params.filters(), params.sort(), today)
        .into_iter()
        .map(|document| DocumentView::new(document, today))
        .collect::<Vec<DocumentView>>();

    let response = DocumentListResponse { documents, total };

    GenericResponse::builder()
        .data(&response)
        .send(StatusCode::OK)
}
