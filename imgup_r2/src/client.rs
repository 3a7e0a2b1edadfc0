use std::time::Duration;

use anyhow::Context as _;
use reqwest::Client;
use rusty_s3::{Bucket, Credentials, S3Action as _, UrlStyle};

use imgup::{PutObject, StorageClient};

/// Storage client that issues presigned S3 PUT requests.
///
/// The region is fixed to `auto` (the value R2 expects). Bucket and
/// credentials are rebuilt from the request on every call, so settings or
/// credential changes never require a new client.
#[derive(Clone, Debug)]
pub struct S3StorageClient {
    client: Client,
}

impl S3StorageClient {
    const REGION: &'static str = "auto";
    const SIGN_DURATION: Duration = Duration::from_secs(180);

    fn default_client() -> Client {
        Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build reqwest client")
    }

    pub fn new() -> Self {
        Self {
            client: Self::default_client(),
        }
    }

    pub fn new_with_client(client: Client) -> Self {
        Self { client }
    }

    async fn error_for_status(res: reqwest::Response) -> Result<reqwest::Response, anyhow::Error> {
        if res.status().is_success() {
            Ok(res)
        } else {
            let status = res.status();
            let body = res.text().await.context("failed to read response body")?;
            Err(anyhow::anyhow!("S3 request failed: {}: {}", status, body))
        }
    }
}

impl Default for S3StorageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl StorageClient for S3StorageClient {
    async fn put_object(&self, put: PutObject) -> Result<(), anyhow::Error> {
        let bucket = Bucket::new(
            put.endpoint.clone(),
            UrlStyle::Path,
            put.bucket.clone(),
            Self::REGION,
        )
        .context("could not build the S3 bucket")?;
        let creds = Credentials::new(
            &put.credentials.access_key_id,
            &put.credentials.secret_access_key,
        );

        let url = bucket
            .put_object(Some(&creds), &put.key)
            .sign(Self::SIGN_DURATION);
        tracing::trace!(bucket = %put.bucket, key = %put.key, "sending put_object request to s3");

        let res = self
            .client
            .put(url)
            .header(http::header::CONTENT_TYPE, &put.content_type)
            .body(put.body)
            .send()
            .await?;
        Self::error_for_status(res).await?;

        Ok(())
    }
}
