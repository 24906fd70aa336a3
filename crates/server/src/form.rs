//! Article URL extraction from form bodies.
//!
//! URLs arrive as a repeated `article_urls[]` field (the bare `article_urls`
//! name is accepted too). Both `application/x-www-form-urlencoded` and
//! `multipart/form-data` bodies are read; any other body carries no URLs.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
};
use axum_extra::extract::Multipart;

use crate::error::ApiError;

/// Field names that carry an article URL.
pub const URL_FIELDS: [&str; 2] = ["article_urls[]", "article_urls"];

/// The article URLs of a request, in the order they were sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleUrls(pub Vec<String>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    UrlEncoded,
    Multipart,
    Other,
}

fn body_kind(content_type: Option<&str>) -> BodyKind {
    let Some(content_type) = content_type else {
        return BodyKind::Other;
    };
    let mime = content_type.split(';').next().unwrap_or_default().trim();

    if mime.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
        BodyKind::UrlEncoded
    } else if mime.eq_ignore_ascii_case("multipart/form-data") {
        BodyKind::Multipart
    } else {
        BodyKind::Other
    }
}

fn invalid(err: impl std::fmt::Display) -> ApiError {
    ApiError::InvalidForm(err.to_string())
}

fn is_url_field(name: &str) -> bool {
    URL_FIELDS.contains(&name)
}

/// Collects URL field values from an urlencoded body, in body order.
pub fn parse_urlencoded(body: &[u8]) -> Vec<String> {
    url::form_urlencoded::parse(body)
        .filter(|(name, _)| is_url_field(name))
        .map(|(_, value)| value.into_owned())
        .collect()
}

impl<S> FromRequest<S> for ArticleUrls
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok());

        match body_kind(content_type) {
            BodyKind::UrlEncoded => {
                let body = Bytes::from_request(req, state).await.map_err(invalid)?;
                Ok(Self(parse_urlencoded(&body)))
            }
            BodyKind::Multipart => {
                let mut multipart = Multipart::from_request(req, state).await.map_err(invalid)?;

                let mut urls = Vec::new();
                while let Some(field) = multipart.next_field().await.map_err(invalid)? {
                    if field.name().is_some_and(is_url_field) {
                        urls.push(field.text().await.map_err(invalid)?);
                    }
                }
                Ok(Self(urls))
            }
            BodyKind::Other => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_kind() {
        assert_eq!(body_kind(Some("application/x-www-form-urlencoded")), BodyKind::UrlEncoded);
        assert_eq!(
            body_kind(Some("application/x-www-form-urlencoded; charset=UTF-8")),
            BodyKind::UrlEncoded
        );
        assert_eq!(body_kind(Some("multipart/form-data; boundary=xyz")), BodyKind::Multipart);
        assert_eq!(body_kind(Some("application/json")), BodyKind::Other);
        assert_eq!(body_kind(None), BodyKind::Other);
    }

    #[test]
    fn test_parse_urlencoded_keeps_order_across_names() {
        let body = b"article_urls%5B%5D=http%3A%2F%2Fa.test%2F1&article_urls=http://a.test/2&other=x&article_urls[]=http://a.test/3";
        assert_eq!(parse_urlencoded(body), ["http://a.test/1", "http://a.test/2", "http://a.test/3"]);
    }

    #[test]
    fn test_parse_urlencoded_without_url_fields() {
        assert!(parse_urlencoded(b"").is_empty());
        assert!(parse_urlencoded(b"q=rust").is_empty());
    }
}
