use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use std::io;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookverse_api::handlers::{admin, auth, books, home, reviews};
use bookverse_api::middleware::JwtAuthMiddleware;
use bookverse_api::security::TokenCodec;
use bookverse_api::services::{seed, SessionService};
use bookverse_api::Settings;

#[actix_web::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = match Settings::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting bookverse-api v{}", env!("CARGO_PKG_VERSION"));

    let pool = match PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .acquire_timeout(Duration::from_secs(settings.database.acquire_timeout))
        .connect(&settings.database.url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {:#}", e);
            eprintln!("ERROR: Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Migration failed: {}", e)))?;
    tracing::info!("Database migrations applied");

    if let Err(e) = seed::run(&pool).await {
        tracing::warn!(error = %e, "Seed data population failed");
    }

    let codec = TokenCodec::new(&settings.jwt);
    let sessions = SessionService::new(pool.clone(), settings.session.refresh_ttl_days);

    tokio::spawn(bookverse_api::jobs::start_token_purge(
        sessions.clone(),
        Duration::from_secs(settings.session.purge_interval_secs),
    ));

    let bind_address = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let allowed_origins = settings.cors.allowed_origins.clone();

    HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(codec.clone()))
            .app_data(web::Data::new(sessions.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(JwtAuthMiddleware)
            .route("/", web::get().to(home::index))
            .route("/api/health", web::get().to(home::health))
            .route("/api/test/db-status", web::get().to(home::db_status))
            .service(
                web::scope("/api/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/refresh", web::post().to(auth::refresh))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/me", web::get().to(auth::me)),
            )
            .service(
                web::scope("/api/books")
                    .route("/simple", web::get().to(books::list_books_simple))
                    .route("/search", web::get().to(books::search_books))
                    .route("/top-rated", web::get().to(books::top_rated))
                    .route("/genres", web::get().to(books::genres))
                    .service(
                        web::resource("")
                            .route(web::get().to(books::list_books))
                            .route(web::post().to(books::create_book)),
                    )
                    .service(
                        web::resource("/{book_id}")
                            .route(web::get().to(books::get_book))
                            .route(web::put().to(books::update_book))
                            .route(web::delete().to(books::delete_book)),
                    ),
            )
            .service(
                web::scope("/api/reviews")
                    .route("/book/{book_id}", web::get().to(reviews::reviews_for_book))
                    .service(
                        web::resource("")
                            .route(web::get().to(reviews::list_reviews))
                            .route(web::post().to(reviews::add_review)),
                    )
                    .route("/{review_id}", web::delete().to(reviews::delete_review)),
            )
            .service(
                web::scope("/api/admin")
                    .route("/users", web::get().to(admin::list_users))
                    .route("/users/search", web::get().to(admin::search_users))
                    .route("/users/{user_id}/ban", web::put().to(admin::ban_user))
                    .route("/users/{user_id}/unban", web::put().to(admin::unban_user))
                    .route("/users/{user_id}/role", web::put().to(admin::update_user_role))
                    .route("/users/{user_id}/details", web::get().to(admin::user_details))
                    .route("/users/{user_id}", web::delete().to(admin::delete_user))
                    .route("/stats", web::get().to(admin::stats)),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
