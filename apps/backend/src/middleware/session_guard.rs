//! Session guard middleware
//!
//! Wraps the owner-scoped routes. It reads the session cookie, verifies the
//! token and stores the identity claim in request extensions. Requests
//! without a valid session are answered with 401 here; the wrapped handler
//! never runs.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::auth::cookie::extract_session_token;
use crate::auth::jwt::verify_session_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct SessionGuard;

impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardMiddleware { service }))
    }
}

pub struct SessionGuardMiddleware<S> {
    service: S,
}

/// Answer the request with a Problem Details response. Rendering happens
/// inside the returned future so the task-local trace id is in scope.
fn reject<B: 'static>(
    req: ServiceRequest,
    err: AppError,
) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
    Box::pin(async move {
        let response = err.error_response();
        Ok(req.into_response(response).map_into_right_body())
    })
}

impl<S, B> Service<ServiceRequest> for SessionGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(token) = extract_session_token(req.request()) else {
            debug!(path = %req.path(), "session cookie missing");
            return reject(req, AppError::unauthorized_missing_session());
        };

        let Some(app_state) = req.app_data::<web::Data<AppState>>().cloned() else {
            return reject(req, AppError::internal("AppState not available"));
        };

        match verify_session_token(&token, &app_state.security) {
            Ok(identity) => {
                req.extensions_mut().insert(identity);
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(err) => {
                debug!(path = %req.path(), code = err.code(), "session token rejected");
                reject(req, err)
            }
        }
    }
}
