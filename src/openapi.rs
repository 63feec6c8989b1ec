//! OpenAPI 3.0 documentation assembly
//!
//! Aggregates all handler path annotations and domain schemas into a single
//! document served at `/api-docs/openapi.json`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lunchvote Core API",
        version = "0.3.0",
        description = "Daily lunch menu voting service",
        license(name = "Proprietary")
    ),
    tags(
        (name = "System", description = "Health checks and metrics"),
        (name = "Votes", description = "Vote submission, management and daily results"),
        (name = "Menus", description = "Restaurant menus by date"),
        (name = "Restaurants", description = "Restaurant registry"),
        (name = "Employees", description = "Employee profiles"),
    ),
    security(
        ("bearer_jwt" = [])
    ),
    components(
        schemas(
            crate::api::PaginationQuery,
            crate::api::PaginationMeta,
            crate::api::MessageResponse,
            crate::api::health::HealthResponse,

            crate::domain::UserId,
            crate::domain::RestaurantId,
            crate::domain::MenuId,
            crate::domain::EmployeeId,
            crate::domain::VoteId,

            crate::domain::Restaurant,
            crate::domain::CreateRestaurantInput,
            crate::domain::UpdateRestaurantInput,
            crate::domain::Menu,
            crate::domain::CreateMenuInput,
            crate::domain::UpdateMenuInput,
            crate::domain::Employee,
            crate::domain::CreateEmployeeInput,
            crate::domain::UpdateEmployeeInput,
            crate::domain::Vote,
            crate::domain::UpdateVoteInput,
            crate::domain::LegacyVotePayload,
            crate::domain::BatchVotePayload,
            crate::domain::BatchVoteEntry,
        )
    ),
    paths(
        crate::api::health::health,
        crate::api::health::ready,

        crate::api::vote::submit,
        crate::api::vote::list,
        crate::api::vote::get,
        crate::api::vote::update,
        crate::api::vote::delete,
        crate::api::vote::results_today,
        crate::api::vote::results_for_date,

        crate::api::menu::list,
        crate::api::menu::today,
        crate::api::menu::get,
        crate::api::menu::create,
        crate::api::menu::update,
        crate::api::menu::delete,

        crate::api::restaurant::list,
        crate::api::restaurant::get,
        crate::api::restaurant::create,
        crate::api::restaurant::update,
        crate::api::restaurant::delete,

        crate::api::employee::list,
        crate::api::employee::get,
        crate::api::employee::create,
        crate::api::employee::update,
        crate::api::employee::delete,
    ),
)]
pub struct ApiDoc;

/// Security scheme definition added after derive
impl ApiDoc {
    pub fn build() -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        if let Some(c) = doc.components.as_mut() {
            c.security_schemes.insert(
                "bearer_jwt".to_string(),
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            );
        }
        doc
    }
}
