use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A soft-deletable catalog record handled by the generic repository/service stack.
pub trait CatalogEntity: Clone + Send + Sync + Unpin + 'static {
    /// Validated, normalized input for create and full-field update.
    type Draft: Clone + Send + Sync + 'static;

    /// Label used in user-facing messages, e.g. "Product".
    const LABEL: &'static str;
    /// Plural noun used in failure messages, e.g. "products".
    const PLURAL: &'static str;

    fn id(&self) -> &str;
    fn from_draft(id: String, draft: Self::Draft, now: DateTime<Utc>) -> Self;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub category: String,
    /// Display string, e.g. "₹4,500".
    pub price_inr: String,
    /// Display string, e.g. "£45".
    pub price_gbp: String,
    pub short: String,
    pub description: Option<String>,
    #[sqlx(json)]
    pub materials: Vec<String>,
    #[sqlx(json)]
    pub images: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub title: String,
    pub category: String,
    pub price_inr: String,
    pub price_gbp: String,
    pub short: String,
    pub description: Option<String>,
    pub materials: Vec<String>,
    pub images: Vec<String>,
}

impl CatalogEntity for Product {
    type Draft = ProductDraft;
    const LABEL: &'static str = "Product";
    const PLURAL: &'static str = "products";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: ProductDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            category: draft.category,
            price_inr: draft.price_inr,
            price_gbp: draft.price_gbp,
            short: draft.short,
            description: draft.description,
            materials: draft.materials,
            images: draft.images,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AboutSection {
    pub id: String,
    pub title: String,
    pub content: String,
    pub order: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AboutSectionDraft {
    pub title: String,
    pub content: String,
    pub order: i64,
}

impl CatalogEntity for AboutSection {
    type Draft = AboutSectionDraft;
    const LABEL: &'static str = "About section";
    const PLURAL: &'static str = "about sections";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: AboutSectionDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
            order: draft.order,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStep {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub order: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessStepDraft {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub order: i64,
}

impl CatalogEntity for ProcessStep {
    type Draft = ProcessStepDraft;
    const LABEL: &'static str = "Process step";
    const PLURAL: &'static str = "process steps";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: ProcessStepDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            image_url: draft.image_url,
            order: draft.order,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub content: String,
    pub author: String,
    pub order: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestimonialDraft {
    pub content: String,
    pub author: String,
    pub order: i64,
    /// `None` keeps the stored flag on update and means "active" on create.
    pub is_active: Option<bool>,
}

impl CatalogEntity for Testimonial {
    type Draft = TestimonialDraft;
    const LABEL: &'static str = "Testimonial";
    const PLURAL: &'static str = "testimonials";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: TestimonialDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            content: draft.content,
            author: draft.author,
            order: draft.order,
            is_active: draft.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }
}
