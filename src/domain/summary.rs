use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Persisted result of one summarization request.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub id: SummaryId,
    pub user_id: String,
    pub source: SourceKind,
    pub title: String,
    pub body: String,
    pub keywords: Vec<String>,
    pub input_text: Option<String>,
    pub pdf_name: Option<String>,
    pub image_count: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Summary {
    pub fn new(
        user_id: String,
        source: SourceKind,
        title: String,
        body: String,
        keywords: Vec<String>,
        input_text: Option<String>,
        pdf_name: Option<String>,
        image_count: Option<i32>,
    ) -> Self {
        Self {
            id: SummaryId::new(),
            user_id,
            source,
            title,
            body,
            keywords,
            input_text,
            pdf_name,
            image_count,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SummaryId(Uuid);

impl SummaryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SummaryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SummaryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which input modalities contributed to a summary.
///
/// The storage form (`as_str`) and the user-facing label (`as_label`)
/// differ only for the combined variant: `pdf_image` vs `pdf+image`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Pdf,
    Image,
    PdfImage,
}

impl SourceKind {
    /// Storage form, written to and read from the database verbatim.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::PdfImage => "pdf_image",
        }
    }

    /// User-facing label used in API responses.
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::PdfImage => "pdf+image",
        }
    }

    /// Classify by which inputs contributed. `None` when nothing did.
    pub fn classify(pdf_present: bool, images_used: usize) -> Option<Self> {
        match (pdf_present, images_used > 0) {
            (true, true) => Some(Self::PdfImage),
            (true, false) => Some(Self::Pdf),
            (false, true) => Some(Self::Image),
            (false, false) => None,
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(Self::Pdf),
            "image" => Ok(Self::Image),
            "pdf_image" | "pdf+image" => Ok(Self::PdfImage),
            other => Err(format!("unknown source kind: {other}")),
        }
    }
}
