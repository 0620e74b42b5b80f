use crate::api::context::ApiContext;
use crate::config::DASHBOARD_UPCOMING_LIMIT;
use axum::{Extension, extract::State, http::StatusCode, response::Response};
use chrono::Utc;
use model::document::response::{DashboardStats, UpcomingExpiration};
use model::response::{GenericErrorResponse, GenericResponse};
use model::user::UserContext;

/// Dashboard numbers: counts by status plus the next expirations.
#[utoipa::path(
        tag = "document",
        get,
        path = "/documents/stats",
        responses(
            (status = 200, body=DashboardStats),
            (status = 401, body=GenericErrorResponse),
            (status = 500, body=GenericErrorResponse),
        )
    )]
#[tracing::instrument(skip(state, user_context), fields(user_id=?user_context.user_id))]
pub async fn get_stats_handler(
    State(state): State<ApiContext>,
    user_context: Extension<UserContext>,
) -> Response {
    let today = Utc::now().date_naive();

    let counts = match doctrack_db_client::document::get_status_counts(
        &state.db,
        &user_context.user_id,
        today,
    )
    .await
    {
        Ok(counts) => counts,
        Err(e) => {
            tracing::error!(error=?e, "unable to count documents");
            return GenericResponse::builder()
                .message("unable to load dashboard stats")
                .is_error(true)
                .send(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let upcoming = match doctrack_db_client::document::get_upcoming_expirations(
        &state.db,
        &user_context.user_id,
        today,
        DASHBOARD_UPCOMING_LIMIT,
    )
    .await
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error=?e, "unable to load upcoming expirations");
            return GenericResponse::builder()
                .message("unable to load dashboard stats")
                .is_error(true)
                .send(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let stats = DashboardStats {
        total: counts.total,
        valid: counts.valid,
        expiring_soon: counts.expiring_soon,
        expired: counts.expired,
        no_expiry: counts.no_expiry,
        upcoming: upcoming
            .into_iter()
            .map(|row| UpcomingExpiration {
                days_left: (row.expires_at - today).num_days(),
                id: row.id,
                title: row.title,
                kind: row.kind,
                expires_at: row.expires_at,
            })
            .collect(),
    };

    GenericResponse::builder().data(&stats).send(StatusCode::OK)
}
