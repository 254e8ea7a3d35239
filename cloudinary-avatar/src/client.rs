use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    domain::{ApiErrorResponse, AvatarUpload, DestroyOutcome, DestroyResponse, UploadResult},
    CloudinaryConfig, MissingCredentialError, SignedParams,
};

/// Client for the avatar endpoints of the Cloudinary upload API.
///
/// Cheap to clone; every clone shares the same connection pool.
#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    http: reqwest::Client,
    config: CloudinaryConfig,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CloudinaryError {
    #[error("Cloudinary upload failed: {0}")]
    Upload(String),
    #[error("Failed to delete avatar: {0}")]
    Deletion(String),
}

impl CloudinaryError {
    /// The underlying cause, without the operation prefix.
    pub fn message(&self) -> &str {
        match self {
            CloudinaryError::Upload(message) | CloudinaryError::Deletion(message) => message,
        }
    }
}

/// A failed request before it is attributed to an operation.
#[derive(Debug)]
struct RequestFailure {
    message: String,
    status: Option<StatusCode>,
}

impl RequestFailure {
    fn new(message: impl Into<String>, status: Option<StatusCode>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

impl From<MissingCredentialError> for RequestFailure {
    fn from(err: MissingCredentialError) -> Self {
        Self::new(err.to_string(), None)
    }
}

impl From<reqwest::Error> for RequestFailure {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string(), err.status())
    }
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Use a preconfigured HTTP client, e.g. one with a request timeout.
    pub fn with_http_client(config: CloudinaryConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &CloudinaryConfig {
        &self.config
    }

    /// Uploads an avatar image as `avatars/<user_id>_<unix millis>`, resized to
    /// 200x200 around the detected face.
    #[instrument(skip(self, image), fields(size = image.len()))]
    pub async fn upload_avatar(
        &self,
        image: Vec<u8>,
        user_id: &str,
    ) -> Result<UploadResult, CloudinaryError> {
        if user_id.trim().is_empty() {
            return Err(CloudinaryError::Upload(
                "user id must not be empty".to_string(),
            ));
        }

        let now = OffsetDateTime::now_utc();
        let upload = AvatarUpload::for_user(user_id, now);

        match self.send_upload(image, &upload, now).await {
            Ok(result) => {
                debug!(
                    public_id = %result.public_id,
                    secure_url = %result.secure_url,
                    width = result.width,
                    height = result.height,
                    "cloudinary upload succeeded"
                );
                Ok(result)
            }
            Err(failure) => {
                error!(
                    cause = %failure.message,
                    http_code = failure.status.map(|s| s.as_u16()),
                    user_id,
                    filename = %upload.filename,
                    "cloudinary upload error"
                );
                Err(CloudinaryError::Upload(failure.message))
            }
        }
    }

    /// Deletes a stored avatar. A missing object is logged and treated as success.
    #[instrument(skip(self))]
    pub async fn delete_avatar(&self, public_id: &str) -> Result<(), CloudinaryError> {
        match self.destroy(public_id).await? {
            DestroyOutcome::Ok => info!(public_id, "avatar deleted"),
            outcome => warn!(public_id, ?outcome, "avatar deletion failed"),
        }

        Ok(())
    }

    /// Issues the destroy call and reports what the service did.
    pub async fn destroy(&self, public_id: &str) -> Result<DestroyOutcome, CloudinaryError> {
        self.send_destroy(public_id).await.map_err(|failure| {
            error!(
                cause = %failure.message,
                http_code = failure.status.map(|s| s.as_u16()),
                public_id,
                "avatar deletion error"
            );
            CloudinaryError::Deletion(failure.message)
        })
    }

    async fn send_upload(
        &self,
        image: Vec<u8>,
        upload: &AvatarUpload,
        now: OffsetDateTime,
    ) -> Result<UploadResult, RequestFailure> {
        let credentials = self.config.credentials.resolve()?;
        let url = self
            .config
            .api_base_url
            .image_action(credentials.cloud_name, "upload");

        let fields = upload
            .params()
            .with_timestamp(now.unix_timestamp())
            .into_form(credentials.api_key, credentials.api_secret);

        let form = fields
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value))
            .part("file", Part::bytes(image).file_name(upload.filename.clone()));

        let resp = self.http.post(url.as_ref()).multipart(form).send().await?;

        read_response(resp).await
    }

    async fn send_destroy(&self, public_id: &str) -> Result<DestroyOutcome, RequestFailure> {
        let credentials = self.config.credentials.resolve()?;
        let url = self
            .config
            .api_base_url
            .image_action(credentials.cloud_name, "destroy");

        let fields = SignedParams::new()
            .with("public_id", public_id)
            .with_timestamp(OffsetDateTime::now_utc().unix_timestamp())
            .into_form(credentials.api_key, credentials.api_secret);

        let resp = self.http.post(url.as_ref()).form(&fields).send().await?;

        let response: DestroyResponse = read_response(resp).await?;
        Ok(response.into())
    }
}

async fn read_response<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, RequestFailure> {
    let status = resp.status();
    let body = resp.text().await?;

    parse_response(status, &body)
}

/// An error payload always wins; otherwise a successful status must carry a
/// non-null body.
fn parse_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<T, RequestFailure> {
    if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(body) {
        return Err(RequestFailure::new(api_error.error.message, Some(status)));
    }

    if !status.is_success() {
        return Err(RequestFailure::new(
            format!("unexpected response status {status}"),
            Some(status),
        ));
    }

    if body.trim().is_empty() {
        return Err(RequestFailure::new("No result returned", Some(status)));
    }

    serde_json::from_str::<Option<T>>(body)
        .map_err(|e| {
            RequestFailure::new(
                format!("Failed to parse response as JSON: {}", e),
                Some(status),
            )
        })?
        .ok_or_else(|| RequestFailure::new("No result returned", Some(status)))
}
