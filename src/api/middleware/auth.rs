use actix_session::SessionExt;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpResponse,
};
use std::{
    future::{ready, Future, Ready},
    pin::Pin,
    rc::Rc,
};
use tracing::debug;

/// Session key holding the flag set by a successful login.
pub const AUTH_FLAG: &str = "authenticated";

/// Paths reachable without a session: the login form itself and the
/// orchestrator health probe.
const OPEN_PATHS: &[&str] = &["/login", "/health"];

pub struct SessionGate;

impl<S, B> Transform<S, ServiceRequest> for SessionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionGateMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        // Skip auth for the login form, the health probe, and OPTIONS requests
        if req.method() == actix_web::http::Method::OPTIONS
            || OPEN_PATHS.contains(&req.path())
        {
            return Box::pin(async move {
                srv.call(req).await.map(|res| res.map_into_left_body())
            });
        }

        let authenticated = req
            .get_session()
            .get::<bool>(AUTH_FLAG)
            .ok()
            .flatten()
            .unwrap_or(false);

        if !authenticated {
            debug!("redirecting anonymous request for {} to the login form", req.path());
            let (request, _) = req.into_parts();
            let response = HttpResponse::Found()
                .insert_header((header::LOCATION, "/login"))
                .finish()
                .map_into_right_body();
            return Box::pin(async move { Ok(ServiceResponse::new(request, response)) });
        }

        Box::pin(async move {
            srv.call(req).await.map(|res| res.map_into_left_body())
        })
    }
}
