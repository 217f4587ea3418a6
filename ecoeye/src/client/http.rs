//! HTTP implementation of the backend API client.

use std::time::Duration;

use tracing::{debug, warn};

use super::types::{
    ErrorBody, GenerateRequest, GenerateResponse, ModelsResponse, StatusResponse,
    RATE_LIMIT_MESSAGE,
};
use super::{ApiError, BoxFuture, ReportApi};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Backend API client over HTTP using reqwest.
pub struct HttpReportApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpReportApi {
    /// Creates a client for the given base URL with the default timeout.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Backend root, e.g. `https://api.eco-eye.example`
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ApiError::Unreachable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => match body.details {
                Some(details) => format!("{}: {}", body.error, details),
                None => body.error,
            },
            Err(_) => "no error detail".to_string(),
        };

        if status == 429 {
            ApiError::RateLimited {
                message: if message == "no error detail" {
                    RATE_LIMIT_MESSAGE.to_string()
                } else {
                    message
                },
            }
        } else {
            ApiError::Status { status, message }
        }
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    ApiError::Unreachable(e.to_string())
}

impl ReportApi for HttpReportApi {
    fn status(&self) -> BoxFuture<'_, Result<StatusResponse, ApiError>> {
        Box::pin(async move {
            let response = self
                .client
                .get(self.url("/status"))
                .send()
                .await
                .map_err(transport_error)?;

            if !response.status().is_success() {
                return Err(Self::decode_error(response).await);
            }

            response
                .json::<StatusResponse>()
                .await
                .map_err(|e| ApiError::MalformedResponse(e.to_string()))
        })
    }

    fn generate(
        &self,
        request: &GenerateRequest,
    ) -> BoxFuture<'_, Result<GenerateResponse, ApiError>> {
        let request = request.clone();
        Box::pin(async move {
            debug!(model = %request.model, year = request.year, "Requesting report generation");

            let response = self
                .client
                .post(self.url("/generate"))
                .json(&request)
                .send()
                .await
                .map_err(transport_error)?;

            if !response.status().is_success() {
                let err = Self::decode_error(response).await;
                warn!(error = %err, "Generate request failed");
                return Err(err);
            }

            response
                .json::<GenerateResponse>()
                .await
                .map_err(|e| ApiError::MalformedResponse(e.to_string()))
        })
    }

    fn models(&self) -> BoxFuture<'_, Result<ModelsResponse, ApiError>> {
        Box::pin(async move {
            let response = self
                .client
                .get(self.url("/models"))
                .send()
                .await
                .map_err(transport_error)?;

            if !response.status().is_success() {
                return Err(Self::decode_error(response).await);
            }

            response
                .json::<ModelsResponse>()
                .await
                .map_err(|e| ApiError::MalformedResponse(e.to_string()))
        })
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Mock backend API for testing orchestration logic.
    pub struct MockReportApi {
        pub status: Result<StatusResponse, ApiError>,
        pub generate: Result<GenerateResponse, ApiError>,
        pub models: Result<ModelsResponse, ApiError>,
    }

    impl Default for MockReportApi {
        fn default() -> Self {
            Self {
                status: Ok(StatusResponse::ok()),
                generate: Ok(GenerateResponse::default()),
                models: Ok(ModelsResponse::new()),
            }
        }
    }

    impl ReportApi for MockReportApi {
        fn status(&self) -> BoxFuture<'_, Result<StatusResponse, ApiError>> {
            let result = self.status.clone();
            Box::pin(async move { result })
        }

        fn generate(
            &self,
            _request: &GenerateRequest,
        ) -> BoxFuture<'_, Result<GenerateResponse, ApiError>> {
            let result = self.generate.clone();
            Box::pin(async move { result })
        }

        fn models(&self) -> BoxFuture<'_, Result<ModelsResponse, ApiError>> {
            let result = self.models.clone();
            Box::pin(async move { result })
        }
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpReportApi::new("http://localhost:8080/").unwrap();
        assert_eq!(api.url("/status"), "http://localhost:8080/status");
    }

    #[tokio::test]
    async fn test_mock_api_rate_limited() {
        let api = MockReportApi {
            generate: Err(ApiError::RateLimited {
                message: RATE_LIMIT_MESSAGE.to_string(),
            }),
            ..Default::default()
        };

        let request = GenerateRequest {
            model: "Tesla Model Y".to_string(),
            year: 2024,
        };
        let result = api.generate(&request).await;
        assert!(matches!(result, Err(ApiError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Port 9 (discard) is almost certainly closed; short timeout keeps
        // the test fast either way
        let api = HttpReportApi::with_timeout("http://127.0.0.1:9", 1).unwrap();
        let result = api.status().await;
        assert!(matches!(result, Err(ApiError::Unreachable(_))));
    }
}
