//! HTTP upload implementation.
//!
//! Talks to an upload service exposing `/api/json` for metadata documents
//! and `/api/web3Storage` for files.

use crate::{parse_receipt, UploadError, UploadInterface, UploadReceipt};
use async_trait::async_trait;
use profile_types::ProfileMetadata;
use reqwest::{
	header::{HeaderMap, HeaderValue, ACCEPT},
	multipart::{Form, Part},
	Client, Response,
};
use std::time::Duration;
use tracing::debug;

const JSON_ENDPOINT: &str = "api/json";
const FILE_ENDPOINT: &str = "api/web3Storage";

/// Upload client backed by an HTTP service.
pub struct HttpUploader {
	/// HTTP client for API requests
	client: Client,
	/// Base URL of the upload API, without a trailing slash
	api_url: String,
}

impl HttpUploader {
	/// Creates an uploader for the service at `api_url`.
	pub fn new(api_url: &str, timeout: Duration) -> Result<Self, UploadError> {
		url::Url::parse(api_url)
			.map_err(|e| UploadError::Configuration(format!("Invalid API URL: {}", e)))?;

		let mut headers = HeaderMap::new();
		headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

		let client = Client::builder()
			.default_headers(headers)
			.timeout(timeout)
			.build()
			.map_err(|e| {
				UploadError::Configuration(format!("Failed to create HTTP client: {}", e))
			})?;

		let api_url = api_url.trim_end_matches('/').to_string();
		debug!("Upload client initialized - API URL: {}, timeout: {:?}", api_url, timeout);

		Ok(Self { client, api_url })
	}

	fn endpoint(&self, path: &str) -> String {
		format!("{}/{}", self.api_url, path)
	}

	/// Turns a non-success response into [`UploadError::Status`] carrying
	/// the status reason phrase.
	fn check_status(response: Response) -> Result<Response, UploadError> {
		let status = response.status();
		if status.is_success() {
			return Ok(response);
		}
		let reason = status
			.canonical_reason()
			.map(String::from)
			.unwrap_or_else(|| status.as_str().to_string());
		Err(UploadError::Status(reason))
	}

	async fn read_receipt(response: Response) -> Result<UploadReceipt, UploadError> {
		let body = Self::check_status(response)?
			.text()
			.await
			.map_err(|_| UploadError::JsonParse)?;
		parse_receipt(&body)
	}
}

#[async_trait]
impl UploadInterface for HttpUploader {
	async fn upload_json(&self, metadata: &ProfileMetadata) -> Result<UploadReceipt, UploadError> {
		let url = self.endpoint(JSON_ENDPOINT);
		debug!("Uploading metadata JSON to {}", url);

		let response = self
			.client
			.post(&url)
			.json(metadata)
			.send()
			.await
			.map_err(|e| UploadError::JsonUpload(e.to_string()))?;

		let receipt = Self::read_receipt(response).await?;
		debug!("Metadata uploaded with CID {}", receipt.cid);
		Ok(receipt)
	}

	async fn download_json(&self, uri: &str) -> Result<ProfileMetadata, UploadError> {
		let url = self.endpoint(JSON_ENDPOINT);
		debug!("Downloading metadata JSON for {}", uri);

		let response = self
			.client
			.get(&url)
			.query(&[("body", uri)])
			.send()
			.await
			.map_err(|e| UploadError::JsonDownload(e.to_string()))?;

		Self::check_status(response)?
			.json::<ProfileMetadata>()
			.await
			.map_err(|_| UploadError::JsonParse)
	}

	async fn upload_file(&self, name: &str, bytes: Vec<u8>) -> Result<UploadReceipt, UploadError> {
		let url = self.endpoint(FILE_ENDPOINT);
		debug!("Uploading file {} ({} bytes) to {}", name, bytes.len(), url);

		let form = Form::new()
			.part("file", Part::bytes(bytes).file_name(name.to_string()))
			.text("name", name.to_string());

		let response = self
			.client
			.post(&url)
			.multipart(form)
			.send()
			.await
			.map_err(|e| UploadError::FileUpload(e.to_string()))?;

		let receipt = Self::read_receipt(response).await?;
		debug!("File {} uploaded with CID {}", name, receipt.cid);
		Ok(receipt)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use wiremock::matchers::{body_string_contains, header_regex, method, path, query_param};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	#[test]
	fn test_endpoints_strip_trailing_slash() {
		let uploader = HttpUploader::new("http://localhost:3000/", Duration::from_secs(5)).unwrap();
		assert_eq!(uploader.endpoint(JSON_ENDPOINT), "http://localhost:3000/api/json");
		assert_eq!(
			uploader.endpoint(FILE_ENDPOINT),
			"http://localhost:3000/api/web3Storage"
		);
	}

	#[test]
	fn test_invalid_api_url() {
		let result = HttpUploader::new("localhost without scheme", Duration::from_secs(5));
		assert!(matches!(result, Err(UploadError::Configuration(_))));
	}

	fn uploader(server: &MockServer) -> HttpUploader {
		HttpUploader::new(&server.uri(), Duration::from_secs(5)).unwrap()
	}

	fn metadata() -> ProfileMetadata {
		ProfileMetadata {
			name: "alice".to_string(),
			..Default::default()
		}
	}

	#[tokio::test]
	async fn upload_json_posts_document_and_reads_cid() {
		let mock_server = MockServer::start().await;

		Mock::given(method("POST"))
			.and(path("/api/json"))
			.and(body_string_contains("\"name\":\"alice\""))
			.respond_with(
				ResponseTemplate::new(200).set_body_json(serde_json::json!({"CID": "bafymetadata"})),
			)
			.expect(1)
			.mount(&mock_server)
			.await;

		let receipt = uploader(&mock_server).upload_json(&metadata()).await.unwrap();
		assert_eq!(receipt.metadata_uri(), "ipfs://bafymetadata");
	}

	#[tokio::test]
	async fn upload_json_accepts_pin_response() {
		let mock_server = MockServer::start().await;

		Mock::given(method("POST"))
			.and(path("/api/json"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"IpfsHash": "QmHash",
				"PinSize": 42,
			})))
			.mount(&mock_server)
			.await;

		let receipt = uploader(&mock_server).upload_json(&metadata()).await.unwrap();
		assert_eq!(receipt.cid, "QmHash");
	}

	#[tokio::test]
	async fn upload_json_maps_error_status_to_reason() {
		let mock_server = MockServer::start().await;

		Mock::given(method("POST"))
			.and(path("/api/json"))
			.respond_with(ResponseTemplate::new(502))
			.mount(&mock_server)
			.await;

		let result = uploader(&mock_server).upload_json(&metadata()).await;
		assert!(matches!(result, Err(UploadError::Status(reason)) if reason == "Bad Gateway"));
	}

	#[tokio::test]
	async fn upload_json_rejects_unparseable_body() {
		let mock_server = MockServer::start().await;

		Mock::given(method("POST"))
			.and(path("/api/json"))
			.respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
			.mount(&mock_server)
			.await;

		let result = uploader(&mock_server).upload_json(&metadata()).await;
		assert!(matches!(result, Err(UploadError::JsonParse)));
	}

	#[tokio::test]
	async fn download_json_sends_uri_as_body_query() {
		let mock_server = MockServer::start().await;

		Mock::given(method("GET"))
			.and(path("/api/json"))
			.and(query_param("body", "ipfs://bafy metadata?x=1&y=2"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"name": "alice",
				"description": "builder",
			})))
			.expect(1)
			.mount(&mock_server)
			.await;

		let metadata = uploader(&mock_server)
			.download_json("ipfs://bafy metadata?x=1&y=2")
			.await
			.unwrap();
		assert_eq!(metadata.name, "alice");
		assert_eq!(metadata.description, "builder");
	}

	#[tokio::test]
	async fn download_json_maps_status_and_parse_failures() {
		let mock_server = MockServer::start().await;

		Mock::given(method("GET"))
			.and(path("/api/json"))
			.and(query_param("body", "ipfs://missing"))
			.respond_with(ResponseTemplate::new(404))
			.mount(&mock_server)
			.await;
		Mock::given(method("GET"))
			.and(path("/api/json"))
			.and(query_param("body", "ipfs://garbage"))
			.respond_with(ResponseTemplate::new(200).set_body_string("not json"))
			.mount(&mock_server)
			.await;

		let client = uploader(&mock_server);
		assert!(matches!(
			client.download_json("ipfs://missing").await,
			Err(UploadError::Status(reason)) if reason == "Not Found"
		));
		assert!(matches!(
			client.download_json("ipfs://garbage").await,
			Err(UploadError::JsonParse)
		));
	}

	#[tokio::test]
	async fn upload_file_sends_file_and_name_fields() {
		let mock_server = MockServer::start().await;

		Mock::given(method("POST"))
			.and(path("/api/web3Storage"))
			.and(header_regex("content-type", "^multipart/form-data"))
			.and(body_string_contains("name=\"file\"; filename=\"avatar.png\""))
			.and(body_string_contains("name=\"name\""))
			.and(body_string_contains("png-bytes"))
			.respond_with(
				ResponseTemplate::new(200).set_body_json(serde_json::json!({"CID": {"/": "bafyimage"}})),
			)
			.expect(1)
			.mount(&mock_server)
			.await;

		let receipt = uploader(&mock_server)
			.upload_file("avatar.png", b"png-bytes".to_vec())
			.await
			.unwrap();
		assert_eq!(receipt.cid, "bafyimage");
	}

	#[tokio::test]
	async fn upload_file_maps_error_status() {
		let mock_server = MockServer::start().await;

		Mock::given(method("POST"))
			.and(path("/api/web3Storage"))
			.respond_with(ResponseTemplate::new(500))
			.mount(&mock_server)
			.await;

		let result = uploader(&mock_server)
			.upload_file("avatar.png", vec![1, 2, 3])
			.await;
		assert!(matches!(
			result,
			Err(UploadError::Status(reason)) if reason == "Internal Server Error"
		));
	}
}
