//! Security middleware for Actix Web.
//!
//! # Spring Equivalent
//! `FilterChainProxy` running `BasicAuthenticationFilter`,
//! `ExceptionTranslationFilter`, `FilterSecurityInterceptor` and
//! `HeaderWriterFilter`

use std::rc::Rc;
use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{LOCATION, WWW_AUTHENTICATE};
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::{ok, LocalBoxFuture, Ready};

use crate::http::error::AuthenticationError;
use crate::http::security::authorizer::Decision;
use crate::http::security::filter_chain::{ChainFilters, FilterChainProxy, SecurityFilterChain};
use crate::http::security::http_basic::extract_basic_credentials;
use crate::http::security::User;

/// Security middleware factory.
///
/// # Example
/// ```ignore
/// let proxy = web_security.build()?;
/// HttpServer::new(move || {
///     App::new()
///         .wrap(SecurityTransform::new(proxy.clone()))
///         .service(index)
/// })
/// ```
#[derive(Clone)]
pub struct SecurityTransform {
    proxy: Arc<FilterChainProxy>,
}

impl SecurityTransform {
    pub fn new(proxy: Arc<FilterChainProxy>) -> Self {
        SecurityTransform { proxy }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityTransform
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SecurityService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(SecurityService {
            proxy: Arc::clone(&self.proxy),
            service: Rc::new(service),
        })
    }
}

/// Security middleware service.
pub struct SecurityService<S> {
    proxy: Arc<FilterChainProxy>,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SecurityService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let proxy = Arc::clone(&self.proxy);

        Box::pin(async move {
            let path = req.path().to_string();
            let Some(filters) = proxy.chain_for(&path).and_then(SecurityFilterChain::filters) else {
                log::trace!("No secured chain for {}, forwarding", path);
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            };

            // Step 1: HTTP Basic authentication. A rejected attempt goes straight to the entry point.
            let user = match authenticate_basic(&req, filters).await {
                Ok(user) => user,
                Err(_) => return Ok(with_headers(entry_point(req, filters), filters)),
            };

            // Step 2: URL rules
            let login_page_request = path == filters.login_page();
            let res = match filters.authorizer().decide(&path, user.as_ref()) {
                Decision::Forbidden => {
                    log::debug!("Access denied to {} for {:?}", path, user.as_ref().map(User::get_username));
                    req.into_response(HttpResponse::Forbidden().finish().map_into_right_body())
                }
                Decision::Unauthenticated if !login_page_request => entry_point(req, filters),
                _ => {
                    // Step 3: expose the user to handlers
                    if let Some(user) = user {
                        req.extensions_mut().insert(user);
                    }
                    service.call(req).await?.map_into_left_body()
                }
            };

            Ok(with_headers(res, filters))
        })
    }
}

/// Authenticates the request's Basic credentials, if the chain accepts them and they are present.
async fn authenticate_basic(
    req: &ServiceRequest,
    filters: &ChainFilters,
) -> Result<Option<User>, AuthenticationError> {
    if filters.http_basic().is_none() {
        return Ok(None);
    }
    let Some(credentials) = extract_basic_credentials(req.headers()) else {
        return Ok(None);
    };

    match filters.authentication_manager().authenticate(&credentials).await {
        Ok(user) => {
            log::trace!("Authenticated {} with HTTP Basic", user.get_username());
            Ok(Some(user))
        }
        Err(e) => {
            log::debug!("HTTP Basic authentication failed for {}: {}", credentials.username(), e);
            Err(e)
        }
    }
}

/// Starts authentication: a Basic challenge, or a redirect to the login page.
fn entry_point<B>(req: ServiceRequest, filters: &ChainFilters) -> ServiceResponse<EitherBody<B>> {
    let response = match filters.http_basic() {
        Some(basic) => HttpResponse::Unauthorized()
            .append_header((WWW_AUTHENTICATE, basic.www_authenticate_header()))
            .finish(),
        None => HttpResponse::Found()
            .append_header((LOCATION, filters.login_page()))
            .finish(),
    };
    req.into_response(response.map_into_right_body())
}

fn with_headers<B>(mut res: ServiceResponse<B>, filters: &ChainFilters) -> ServiceResponse<B> {
    if let Some(headers) = filters.headers() {
        headers.write_to(res.headers_mut());
    }
    res
}
