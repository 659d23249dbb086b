use axum::{
    Json,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON body with a status code and optional extra headers.
///
/// ```rust,ignore
/// AppResponse::ok(page)
/// AppResponse::created(user)
/// AppResponse::ok(action).with_headers(clear_refresh_cookie())
/// AppResponse::no_content()
/// ```
pub struct AppResponse<T> {
    status: StatusCode,
    data: Option<T>,
    headers: Option<HeaderMap>,
}

impl<T> AppResponse<T>
where
    T: Serialize,
{
    fn with_status(status: StatusCode, data: Option<T>) -> Self {
        Self {
            status,
            data,
            headers: None,
        }
    }

    /// Adds HTTP headers to the response
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers
            .get_or_insert_with(HeaderMap::new)
            .extend(headers);
        self
    }

    /// 200 OK with data
    pub fn ok(data: T) -> Self {
        Self::with_status(StatusCode::OK, Some(data))
    }

    /// 201 Created with data
    pub fn created(data: T) -> Self {
        Self::with_status(StatusCode::CREATED, Some(data))
    }
}

impl AppResponse<()> {
    /// 204 No Content
    pub fn no_content() -> Self {
        Self::with_status(StatusCode::NO_CONTENT, None)
    }
}

impl<T> IntoResponse for AppResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let mut response = match self.data {
            Some(data) => (self.status, Json(data)).into_response(),
            None => self.status.into_response(),
        };

        if let Some(headers) = self.headers {
            response.headers_mut().extend(headers);
        }

        response
    }
}
