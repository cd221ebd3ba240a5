//! HTTP handlers and route configuration.

mod auth;
mod frontend;
mod health;
mod posts;
mod users;

use actix_web::web;

/// Configure all application routes.
///
/// Everything except the health check lives under a `{version}` path
/// segment; handlers gate on it before touching anything else.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/{version}")
                    .service(
                        web::scope("/auth")
                            .route("/login", web::post().to(auth::login))
                            .route("/logout", web::post().to(auth::logout)),
                    )
                    .service(
                        web::scope("/frontend")
                            .route("/posts", web::get().to(frontend::index))
                            .route("/posts/like/{post_id}", web::post().to(frontend::like_post))
                            .route(
                                "/posts/comment/{post_id}",
                                web::post().to(frontend::comment_post),
                            ),
                    )
                    .service(
                        web::scope("/users")
                            .route("", web::get().to(users::index))
                            .route("", web::post().to(users::store))
                            .route("/{id}", web::get().to(users::show))
                            .route("/{id}", web::patch().to(users::update))
                            .route("/{id}", web::delete().to(users::destroy)),
                    )
                    .service(
                        web::scope("/posts")
                            .route("", web::get().to(posts::index))
                            .route("", web::post().to(posts::store))
                            .route("/{id}", web::get().to(posts::show))
                            .route("/{id}", web::patch().to(posts::update))
                            .route("/{id}", web::delete().to(posts::destroy)),
                    ),
            ),
    );
}

#[cfg(test)]
mod tests;
