#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use brevik::application::ports::{
    ContentPart, ExtractorError, IdentityError, IdentityProvider, ModelClient, ModelClientError,
    PageRenderer, RendererError, RepositoryError, SummaryRepository, TextExtractor,
    UserRepository,
};
use brevik::domain::{EncodedImage, Identity, Summary, SummaryId, User};

pub const DEFAULT_MODEL_REPLY: &str =
    r#"{"title":"Test Title","summary":"A test summary.","keywords":["alpha","beta"]}"#;

/// What one `generate` call carried, for asserting on strategy decisions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub texts: Vec<String>,
    pub image_count: usize,
}

/// Model stub: replays queued responses in order (falling back to
/// [`DEFAULT_MODEL_REPLY`]) and records every call.
pub struct MockModelClient {
    responses: Mutex<VecDeque<Result<String, ModelClientError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockModelClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_responses(responses: Vec<&str>) -> Self {
        let client = Self::new();
        {
            let mut queue = client.responses.lock().unwrap();
            for response in responses {
                queue.push_back(Ok(response.to_string()));
            }
        }
        client
    }

    pub fn failing_with(error: ModelClientError) -> Self {
        let client = Self::new();
        client.responses.lock().unwrap().push_back(Err(error));
        client
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn generate(&self, parts: &[ContentPart]) -> Result<String, ModelClientError> {
        let mut texts = Vec::new();
        let mut image_count = 0;
        for part in parts {
            match part {
                ContentPart::Text(text) => texts.push(text.clone()),
                ContentPart::InlineImage(_) => image_count += 1,
            }
        }
        self.calls.lock().unwrap().push(RecordedCall {
            texts,
            image_count,
        });

        match self.responses.lock().unwrap().pop_front() {
            Some(result) => result,
            None => Ok(DEFAULT_MODEL_REPLY.to_string()),
        }
    }
}

/// Extractor stub returning a fixed text regardless of input bytes.
pub struct StaticTextExtractor(pub String);

#[async_trait]
impl TextExtractor for StaticTextExtractor {
    async fn extract_text(&self, _data: &[u8]) -> Result<String, ExtractorError> {
        Ok(self.0.clone())
    }
}

/// Renderer stub returning fixed pages, counting invocations.
pub struct StaticPageRenderer {
    pages: Vec<EncodedImage>,
    calls: AtomicUsize,
}

impl StaticPageRenderer {
    pub fn new(pages: Vec<EncodedImage>) -> Self {
        Self {
            pages,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageRenderer for StaticPageRenderer {
    async fn render_pages(
        &self,
        _data: &[u8],
        max_pages: usize,
    ) -> Result<Vec<EncodedImage>, RendererError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pages.iter().take(max_pages).cloned().collect())
    }
}

/// Identity stub: `token-<subject>` resolves to that subject, anything
/// else resolves to no identity.
pub struct MockIdentityProvider;

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn resolve(&self, token: &str) -> Result<Option<Identity>, IdentityError> {
        match token.strip_prefix("token-") {
            Some(subject) if !subject.is_empty() => Ok(Some(Identity {
                subject: subject.to_string(),
                email: Some(format!("{subject}@example.test")),
                name: Some(subject.to_string()),
            })),
            _ => Ok(None),
        }
    }
}

/// In-memory summary store honoring the ownership and ordering contracts.
pub struct InMemorySummaryRepository {
    rows: Mutex<Vec<Summary>>,
}

impl InMemorySummaryRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn rows(&self) -> Vec<Summary> {
        self.rows.lock().unwrap().clone()
    }

    pub fn seed(&self, summary: Summary) {
        self.rows.lock().unwrap().push(summary);
    }
}

#[async_trait]
impl SummaryRepository for InMemorySummaryRepository {
    async fn insert(&self, summary: &Summary) -> Result<(), RepositoryError> {
        self.rows.lock().unwrap().push(summary.clone());
        Ok(())
    }

    async fn list_recent(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<Summary>, RepositoryError> {
        let mut matching: Vec<Summary> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit as usize);
        Ok(matching)
    }

    async fn delete_owned(
        &self,
        id: SummaryId,
        user_id: &str,
    ) -> Result<bool, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| !(row.id == id && row.user_id == user_id));
        Ok(rows.len() < before)
    }
}

/// User store recording upserts.
pub struct RecordingUserRepository {
    pub upserted: Mutex<Vec<String>>,
}

impl RecordingUserRepository {
    pub fn new() -> Self {
        Self {
            upserted: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl UserRepository for RecordingUserRepository {
    async fn upsert(&self, user: &User) -> Result<(), RepositoryError> {
        self.upserted.lock().unwrap().push(user.id.clone());
        Ok(())
    }
}

pub fn sample_page(label: u8) -> EncodedImage {
    EncodedImage::new("image/jpeg", vec![label; 16])
}

/// A tiny valid PNG, for endpoints that decode uploaded images for real.
pub fn tiny_png() -> Vec<u8> {
    let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        8,
        8,
        image::Rgba([200, 60, 60, 255]),
    ));
    let mut buf = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut buf),
        image::ImageFormat::Png,
    )
    .unwrap();
    buf
}

pub type SharedModel = Arc<MockModelClient>;
