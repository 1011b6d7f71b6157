//! Form body extraction
//!
//! Decodes `application/x-www-form-urlencoded` and `multipart/form-data`
//! bodies into a [`FormData`]. A multipart part that carries a filename is
//! recorded as a file value; its bytes are read and dropped.

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header,
    Form,
};

use crate::api::middleware::ApiError;
use crate::models::{FormData, FormValue};

/// Submitted form, whatever its encoding
#[derive(Debug, Clone)]
pub struct SubmittedForm(pub FormData);

impl<S> FromRequest<S> for SubmittedForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_ascii_lowercase().starts_with("multipart/form-data"))
            .unwrap_or(false);

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            return read_multipart(multipart).await.map(Self);
        }

        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|e| {
                if e.status() == axum::http::StatusCode::UNSUPPORTED_MEDIA_TYPE {
                    ApiError::unsupported_media_type(e.body_text())
                } else {
                    ApiError::bad_request(e.body_text())
                }
            })?;

        Ok(Self(pairs.into_iter().collect()))
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<FormData, ApiError> {
    let mut form = FormData::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        let value = match field.file_name().map(str::to_string) {
            Some(filename) => {
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
                FormValue::File {
                    filename,
                    content_type,
                    size: data.len(),
                }
            }
            None => FormValue::Text(
                field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?,
            ),
        };

        form.append(name, value);
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{post_form, post_multipart};
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    #[tokio::test]
    async fn test_urlencoded_form() {
        let request = post_form("/", None, "title=Hello+world&content=a%26b&published=on");

        let SubmittedForm(form) = SubmittedForm::from_request(request, &()).await.unwrap();

        assert_eq!(form.text("title"), Some("Hello world"));
        assert_eq!(form.text("content"), Some("a&b"));
        assert_eq!(form.text("published"), Some("on"));
    }

    #[tokio::test]
    async fn test_multipart_form_with_file() {
        let request = post_multipart(
            "/",
            None,
            &[("title", None, "Hello"), ("content", Some("notes.txt"), "file body")],
        );

        let SubmittedForm(form) = SubmittedForm::from_request(request, &()).await.unwrap();

        assert_eq!(form.text("title"), Some("Hello"));
        assert_eq!(
            form.get("content"),
            Some(&FormValue::File {
                filename: "notes.txt".to_string(),
                content_type: Some("text/plain".to_string()),
                size: "file body".len(),
            })
        );
    }

    #[tokio::test]
    async fn test_unsupported_content_type() {
        let request = HttpRequest::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let error = SubmittedForm::from_request(request, &()).await.unwrap_err();
        assert_eq!(error.error.code, "UNSUPPORTED_MEDIA_TYPE");
    }
}
