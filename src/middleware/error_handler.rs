use actix_web::{
    dev::ServiceResponse,
    http::header,
    middleware::{ErrorHandlerResponse, ErrorHandlers},
    HttpResponse, Result,
};

/// Renders every 4xx/5xx response as `{"error": message}`, keeping the status.
pub fn json_errors<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().default_handler(render_json_error)
}

fn render_json_error<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    let status = res.status();
    let message = match res.response().error() {
        Some(err) => err.to_string(),
        None => status.canonical_reason().unwrap_or("Unknown error").to_string(),
    };

    let (req, original) = res.into_parts();
    let mut response = HttpResponse::build(status).json(serde_json::json!({ "error": message }));

    // Keep headers such as Allow or WWW-Authenticate; the body framing is ours
    for (name, value) in original.headers().iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            response.headers_mut().append(name.clone(), value.clone());
        }
    }

    let res = ServiceResponse::new(req, response).map_into_right_body();

    Ok(ErrorHandlerResponse::Response(res))
}
