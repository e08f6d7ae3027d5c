//! Bearer-token authentication gate
//!
//! The middleware extracts and verifies the `Authorization: Bearer` token
//! on every request. A valid token binds [`AuthUser`] into the request
//! extensions; a missing or invalid token leaves the request anonymous and
//! the route's extractors decide whether that is acceptable. Public
//! endpoints therefore pass through untouched, while endpoints that declare
//! `AuthUser` reject anonymous callers with 401 and `AdminUser` adds the
//! role check on top (403).

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorForbidden, ErrorUnauthorized},
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use crate::models::Role;
use crate::security::TokenCodec;

/// Caller identity established from a verified access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// JWT Authentication Middleware
pub struct JwtAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = JwtAuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        if let Some(token) = bearer_token(&req) {
            if let Some(codec) = req.app_data::<web::Data<TokenCodec>>() {
                match codec.verify(&token) {
                    Ok(claims) => {
                        req.extensions_mut().insert(AuthUser {
                            username: claims.sub,
                            role: claims.role,
                        });
                    }
                    Err(_) => {
                        tracing::debug!(path = %req.path(), "Rejected bearer token");
                    }
                }
            }
        }

        Box::pin(async move { service.call(req).await })
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

impl FromRequest for AuthUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(ErrorUnauthorized("User not authenticated"))),
        }
    }
}

/// Extractor for admin-only endpoints
pub struct AdminUser(pub AuthUser);

impl FromRequest for AdminUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(user) = req.extensions().get::<AuthUser>().cloned() else {
            return ready(Err(ErrorUnauthorized("User not authenticated")));
        };

        match user.role {
            Role::Admin => ready(Ok(AdminUser(user))),
            Role::User => ready(Err(ErrorForbidden("Administrator role required"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtSettings;
    use actix_web::{http::StatusCode, test, App, HttpResponse};

    fn codec() -> TokenCodec {
        TokenCodec::new(&JwtSettings {
            secret: "middleware-test-secret".to_string(),
            expiry_seconds: 3600,
        })
    }

    async fn whoami(user: AuthUser) -> HttpResponse {
        HttpResponse::Ok().body(user.username)
    }

    async fn admin_only(_admin: AdminUser) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    async fn public() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(codec()))
                    .wrap(JwtAuthMiddleware)
                    .route("/whoami", web::get().to(whoami))
                    .route("/admin", web::get().to(admin_only))
                    .route("/public", web::get().to(public)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_anonymous_passes_public_endpoint() {
        let app = test_app!();
        let resp = test::call_service(&app, test::TestRequest::get().uri("/public").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_anonymous_rejected_on_protected_endpoint() {
        let app = test_app!();
        let resp = test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_invalid_token_rejected_on_protected_endpoint() {
        let app = test_app!();
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", "Bearer garbage.token.here"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_invalid_token_still_anonymous_on_public_endpoint() {
        let app = test_app!();
        let req = test::TestRequest::get()
            .uri("/public")
            .insert_header(("Authorization", "Bearer garbage.token.here"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_valid_token_binds_identity() {
        let app = test_app!();
        let token = codec().issue("alice", Role::User).unwrap();
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(body, "alice");
    }

    #[actix_web::test]
    async fn test_user_role_forbidden_on_admin_endpoint() {
        let app = test_app!();
        let token = codec().issue("alice", Role::User).unwrap();
        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_admin_role_allowed_on_admin_endpoint() {
        let app = test_app!();
        let token = codec().issue("root", Role::Admin).unwrap();
        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
