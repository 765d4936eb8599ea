use serde::de::DeserializeOwned;
use serde::Serialize;
use shieldcore::model::{
    AckEnvelope, AnalysisResult, AuthRequest, AuthResponse, FeedbackRequest, FrameRecord,
    FramesEnvelope, HealthEnvelope, HeatmapEnvelope, HeatmapImage, HistoryEntry, HistoryEnvelope,
    ResultEnvelope,
};
use shieldcore::prelude::{DataError, DataResult};
use std::fs;
use std::path::PathBuf;

/// HTTP client for the VisionShield backend.
///
/// One fire-and-forget request per call: no retry, no caching, no
/// backpressure. The bearer token, when present, rides on every request;
/// fallback on failure is the caller's business.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

fn token_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".visionshield").join("token"))
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let token = token_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());
        Self {
            base_url: base_url.into(),
            token,
            http: reqwest::Client::new(),
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Persists the bearer token under the user's home directory, the
    /// desktop analogue of the web client's local storage entry.
    pub fn store_token(&mut self, token: String) -> DataResult<()> {
        let path = token_path().ok_or_else(|| DataError::Storage("no home directory".into()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|error| DataError::Storage(error.to_string()))?;
        }
        fs::write(&path, &token).map_err(|error| DataError::Storage(error.to_string()))?;
        self.token = Some(token);
        Ok(())
    }

    pub fn clear_token(&mut self) {
        self.token = None;
        if let Some(path) = token_path() {
            let _ = fs::remove_file(path);
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let mut request = self.http.get(self.url(path));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> DataResult<T> {
        let response = self
            .get(path)
            .send()
            .await
            .map_err(|error| DataError::Network(error.to_string()))?;
        if !response.status().is_success() {
            return Err(DataError::Http(response.status().as_u16()));
        }
        response
            .json::<T>()
            .await
            .map_err(|error| DataError::Malformed(error.to_string()))
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> DataResult<T> {
        let mut request = self.http.post(self.url(path)).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|error| DataError::Network(error.to_string()))?;
        if !response.status().is_success() {
            return Err(DataError::Http(response.status().as_u16()));
        }
        response
            .json::<T>()
            .await
            .map_err(|error| DataError::Malformed(error.to_string()))
    }

    pub async fn health(self) -> DataResult<HealthEnvelope> {
        self.get_json("health").await
    }

    pub async fn analysis_result(self, video_id: String) -> DataResult<AnalysisResult> {
        self.get_json::<ResultEnvelope>(&format!("results/{video_id}"))
            .await?
            .into_result()
    }

    pub async fn frame_records(self, video_id: String) -> DataResult<Vec<FrameRecord>> {
        self.get_json::<FramesEnvelope>(&format!("frame-analysis/{video_id}"))
            .await?
            .into_frames()
    }

    pub async fn heatmap_images(self, video_id: String) -> DataResult<Vec<HeatmapImage>> {
        self.get_json::<HeatmapEnvelope>(&format!("heatmap/{video_id}"))
            .await?
            .into_images()
    }

    pub async fn history(self) -> DataResult<Vec<HistoryEntry>> {
        self.get_json::<HistoryEnvelope>("history")
            .await?
            .into_history()
    }

    pub async fn authenticate(self, email: String, password: String) -> DataResult<String> {
        let response: AuthResponse = self.post_json("auth", &AuthRequest { email, password }).await?;
        response
            .token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| DataError::Malformed("token field missing".into()))
    }

    pub async fn submit_feedback(self, request: FeedbackRequest) -> DataResult<String> {
        self.post_json::<_, AckEnvelope>("feedback/submit", &request)
            .await?
            .into_message()
    }

    /// Fetches the PDF report and writes it beside the working directory.
    pub async fn download_report(self, video_id: String) -> DataResult<PathBuf> {
        let response = self
            .get(&format!("download-report/{video_id}"))
            .send()
            .await
            .map_err(|error| DataError::Network(error.to_string()))?;
        if !response.status().is_success() {
            return Err(DataError::Http(response.status().as_u16()));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|error| DataError::Network(error.to_string()))?;
        let path = PathBuf::from(format!("VisionShield_Report_{video_id}.pdf"));
        fs::write(&path, &bytes).map_err(|error| DataError::Storage(error.to_string()))?;
        Ok(path)
    }

    /// Uploads a video for analysis as a multipart `video` field.
    pub async fn analyze(self, path: PathBuf) -> DataResult<AnalysisResult> {
        let bytes = fs::read(&path).map_err(|error| DataError::MediaLoad(error.to_string()))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.mp4".into());
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename);
        let form = reqwest::multipart::Form::new().part("video", part);

        let mut request = self.http.post(self.url("analyze")).multipart(form);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|error| DataError::Network(error.to_string()))?;
        if !response.status().is_success() {
            return Err(DataError::Http(response.status().as_u16()));
        }
        response
            .json::<ResultEnvelope>()
            .await
            .map_err(|error| DataError::Malformed(error.to_string()))?
            .into_result()
    }

    /// Stream URL handed to an external player; nothing here decodes video.
    pub fn video_url(&self, video_id: &str) -> String {
        self.url(&format!("video/{video_id}"))
    }
}
