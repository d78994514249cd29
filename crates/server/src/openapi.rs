use utoipa::OpenApi;

use crate::api::handlers::ImdbProxyRequest;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marquee API",
        version = "1.0.0"
    ),
    tags(
        (name = "imdb", description = "Rating source proxy"),
        (name = "ratings", description = "IMDb rating resolution")
    ),
    paths(
        crate::api::handlers::proxy::proxy_imdb,
        crate::api::handlers::rating::get_rating_by_tmdb,
        crate::api::handlers::rating::get_rating_by_imdb
    ),
    components(schemas(
        ImdbProxyRequest,
        ratings::ExternalRating,
        ratings::ImdbType,
        ratings::MediaType
    ))
)]
pub struct ApiDoc;
