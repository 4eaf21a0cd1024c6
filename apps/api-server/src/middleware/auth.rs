//! Token extraction.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header};
use std::future::{Ready, ready};

/// Raw token from the `Authorization` header, with or without a `Bearer ` prefix.
///
/// Never rejects: a missing header becomes `None` and the services decide
/// what that means.
#[derive(Debug, Clone, Default)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    pub fn into_inner(self) -> Option<String> {
        self.0
    }
}

impl FromRequest for BearerToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.strip_prefix("Bearer ").unwrap_or(value).trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        ready(Ok(BearerToken(token)))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    fn extract(req: TestRequest) -> Option<String> {
        let (req, mut payload) = req.to_http_parts();
        BearerToken::from_request(&req, &mut payload)
            .into_inner()
            .unwrap()
            .into_inner()
    }

    #[test]
    fn test_bearer_prefix_is_optional() {
        let with_prefix =
            TestRequest::default().insert_header((header::AUTHORIZATION, "Bearer abc"));
        let raw = TestRequest::default().insert_header((header::AUTHORIZATION, "abc"));

        assert_eq!(extract(with_prefix), Some("abc".to_string()));
        assert_eq!(extract(raw), Some("abc".to_string()));
    }

    #[test]
    fn test_missing_header_is_none() {
        assert_eq!(extract(TestRequest::default()), None);
    }
}
