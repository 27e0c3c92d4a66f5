//! Middleware that renders every failed response through the translator.

use actix_web::{
    Error,
    body::{EitherBody, MessageBody},
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    error::InternalError,
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::sync::Arc;

use super::error::AppError;
use super::translator::{ErrorTranslator, Translation};

/// Replaces the body of any response that carries an error with the
/// translated envelope, using the request path.
///
/// `AppError`s are translated by variant. Any other `actix_web::Error` is
/// translated as an unclassified failure. When an inner service fails with
/// `Err`, the error is passed on carrying the translated response.
pub struct ErrorTranslation {
    translator: Arc<ErrorTranslator>,
}

impl ErrorTranslation {
    pub fn new(translator: Arc<ErrorTranslator>) -> Self {
        Self { translator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ErrorTranslation
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = ErrorTranslationService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorTranslationService {
            service,
            translator: Arc::clone(&self.translator),
        }))
    }
}

pub struct ErrorTranslationService<S> {
    service: S,
    translator: Arc<ErrorTranslator>,
}

impl<S, B> Service<ServiceRequest> for ErrorTranslationService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Routing needs sole ownership of the request; keep only the path.
        let path = req.path().to_owned();
        let translator = Arc::clone(&self.translator);

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = match fut.await {
                Ok(res) => res,
                Err(err) => {
                    let translation = translate_error(&translator, &err, &path);
                    return Err(
                        InternalError::from_response(err.to_string(), translation.into_response())
                            .into(),
                    );
                }
            };

            let translation = res
                .response()
                .error()
                .map(|err| translate_error(&translator, err, &path));

            match translation {
                None => Ok(res.map_into_left_body()),
                Some(translation) => Ok(res
                    .into_response(translation.into_response())
                    .map_into_right_body()),
            }
        })
    }
}

fn translate_error(translator: &ErrorTranslator, err: &Error, path: &str) -> Translation {
    match err.as_error::<AppError>() {
        Some(app_err) => translator.translate(app_err, path),
        None => translator.translate(&AppError::unclassified(err), path),
    }
}
