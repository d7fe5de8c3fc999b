use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::properties::list,
        crate::routes::properties::get,
        crate::routes::properties::create,
        crate::routes::properties::update,
        crate::routes::properties::delete,
    ),
    components(
        schemas(
            HealthResponse,
            crate::routes::properties::PropertyDto,
            crate::errors::ErrorBody,
        )
    ),
    tags(
        (name = "health"),
        (name = "properties")
    )
)]
pub struct ApiDoc;
