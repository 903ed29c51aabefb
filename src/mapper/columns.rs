use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::{
    AboutSection, AboutSectionDraft, AdminCredential, AdminUser, CatalogEntity, NewAdminUser,
    ProcessStep, ProcessStepDraft, Product, ProductDraft, SettingEntry, Testimonial,
    TestimonialDraft,
};

/// How a catalog record is laid out in the secondary store's snake_case tables.
pub trait ColumnMapping: CatalogEntity {
    type Row: Serialize + DeserializeOwned + Send + Sync + 'static;
    type Patch: Serialize + Send + Sync + 'static;

    const TABLE: &'static str;
    /// `order` query parameter used by list reads.
    const LIST_ORDER: &'static str;

    fn to_row(&self) -> Self::Row;
    fn from_row(row: Self::Row) -> Self;
    fn to_patch(draft: &Self::Draft, updated_at: DateTime<Utc>) -> Self::Patch;
}

/// Body of a soft-delete request.
#[derive(Debug, Clone, Serialize)]
pub struct ActivationPatch {
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    /// Accepts RFC 3339 values as well as zone-less timestamps (read as UTC).
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(Some(parsed.with_timezone(&Utc)));
        }

        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(&raw, format).ok())
            .map(|naive| Some(naive.and_utc()))
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}

fn created_or_now(created_at: Option<DateTime<Utc>>) -> DateTime<Utc> {
    created_at.unwrap_or_else(Utc::now)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: String,
    pub title: String,
    pub category: String,
    pub price_inr: String,
    pub price_gbp: String,
    pub short: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub materials: Option<Vec<String>>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductPatch {
    pub title: String,
    pub category: String,
    pub price_inr: String,
    pub price_gbp: String,
    pub short: String,
    pub description: Option<String>,
    pub materials: Vec<String>,
    pub images: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl ColumnMapping for Product {
    type Row = ProductRow;
    type Patch = ProductPatch;

    const TABLE: &'static str = "products";
    const LIST_ORDER: &'static str = "created_at.desc";

    fn to_row(&self) -> ProductRow {
        ProductRow {
            id: self.id.clone(),
            title: self.title.clone(),
            category: self.category.clone(),
            price_inr: self.price_inr.clone(),
            price_gbp: self.price_gbp.clone(),
            short: self.short.clone(),
            description: self.description.clone(),
            materials: Some(self.materials.clone()),
            images: Some(self.images.clone()),
            is_active: Some(self.is_active),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    fn from_row(row: ProductRow) -> Self {
        let created_at = created_or_now(row.created_at);
        Product {
            id: row.id,
            title: row.title,
            category: row.category,
            price_inr: row.price_inr,
            price_gbp: row.price_gbp,
            short: row.short,
            description: row.description,
            materials: row.materials.unwrap_or_default(),
            images: row.images.unwrap_or_default(),
            is_active: row.is_active.unwrap_or(true),
            created_at,
            updated_at: row.updated_at.unwrap_or(created_at),
        }
    }

    fn to_patch(draft: &ProductDraft, updated_at: DateTime<Utc>) -> ProductPatch {
        ProductPatch {
            title: draft.title.clone(),
            category: draft.category.clone(),
            price_inr: draft.price_inr.clone(),
            price_gbp: draft.price_gbp.clone(),
            short: draft.short.clone(),
            description: draft.description.clone(),
            materials: draft.materials.clone(),
            images: draft.images.clone(),
            updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutSectionRow {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutSectionPatch {
    pub title: String,
    pub content: String,
    pub order: i64,
    pub updated_at: DateTime<Utc>,
}

impl ColumnMapping for AboutSection {
    type Row = AboutSectionRow;
    type Patch = AboutSectionPatch;

    const TABLE: &'static str = "about_sections";
    const LIST_ORDER: &'static str = "order.asc,created_at.asc";

    fn to_row(&self) -> AboutSectionRow {
        AboutSectionRow {
            id: self.id.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
            order: self.order,
            is_active: Some(self.is_active),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    fn from_row(row: AboutSectionRow) -> Self {
        let created_at = created_or_now(row.created_at);
        AboutSection {
            id: row.id,
            title: row.title,
            content: row.content,
            order: row.order,
            is_active: row.is_active.unwrap_or(true),
            created_at,
            updated_at: row.updated_at.unwrap_or(created_at),
        }
    }

    fn to_patch(draft: &AboutSectionDraft, updated_at: DateTime<Utc>) -> AboutSectionPatch {
        AboutSectionPatch {
            title: draft.title.clone(),
            content: draft.content.clone(),
            order: draft.order,
            updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStepRow {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessStepPatch {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub order: i64,
    pub updated_at: DateTime<Utc>,
}

impl ColumnMapping for ProcessStep {
    type Row = ProcessStepRow;
    type Patch = ProcessStepPatch;

    const TABLE: &'static str = "process_steps";
    const LIST_ORDER: &'static str = "order.asc,created_at.asc";

    fn to_row(&self) -> ProcessStepRow {
        ProcessStepRow {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            image_url: Some(self.image_url.clone()),
            order: self.order,
            is_active: Some(self.is_active),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    fn from_row(row: ProcessStepRow) -> Self {
        let created_at = created_or_now(row.created_at);
        ProcessStep {
            id: row.id,
            title: row.title,
            description: row.description,
            image_url: row.image_url.unwrap_or_default(),
            order: row.order,
            is_active: row.is_active.unwrap_or(true),
            created_at,
            updated_at: row.updated_at.unwrap_or(created_at),
        }
    }

    fn to_patch(draft: &ProcessStepDraft, updated_at: DateTime<Utc>) -> ProcessStepPatch {
        ProcessStepPatch {
            title: draft.title.clone(),
            description: draft.description.clone(),
            image_url: draft.image_url.clone(),
            order: draft.order,
            updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestimonialRow {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestimonialPatch {
    pub content: String,
    pub author: String,
    pub order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl ColumnMapping for Testimonial {
    type Row = TestimonialRow;
    type Patch = TestimonialPatch;

    const TABLE: &'static str = "testimonials";
    const LIST_ORDER: &'static str = "order.asc,created_at.asc";

    fn to_row(&self) -> TestimonialRow {
        TestimonialRow {
            id: self.id.clone(),
            content: self.content.clone(),
            author: Some(self.author.clone()),
            order: self.order,
            is_active: Some(self.is_active),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    fn from_row(row: TestimonialRow) -> Self {
        let created_at = created_or_now(row.created_at);
        Testimonial {
            id: row.id,
            content: row.content,
            author: row
                .author
                .filter(|author| !author.trim().is_empty())
                .unwrap_or_else(|| "Anonymous".to_string()),
            order: row.order,
            is_active: row.is_active.unwrap_or(true),
            created_at,
            updated_at: row.updated_at.unwrap_or(created_at),
        }
    }

    fn to_patch(draft: &TestimonialDraft, updated_at: DateTime<Utc>) -> TestimonialPatch {
        TestimonialPatch {
            content: draft.content.clone(),
            author: draft.author.clone(),
            order: draft.order,
            is_active: draft.is_active,
            updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingRow {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl From<SettingRow> for SettingEntry {
    fn from(row: SettingRow) -> Self {
        SettingEntry::new(row.key, row.value.unwrap_or_default())
    }
}

impl From<&SettingEntry> for SettingRow {
    fn from(entry: &SettingEntry) -> Self {
        SettingRow {
            key: entry.key.clone(),
            value: Some(entry.value.clone()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminUserRow {
    pub id: String,
    pub email: String,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<AdminUserRow> for AdminUser {
    fn from(row: AdminUserRow) -> Self {
        AdminUser {
            id: row.id,
            email: row.email,
            created_at: created_or_now(row.created_at),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminCredentialRow {
    pub id: String,
    pub email: String,
    pub password_hash: String,
}

impl From<AdminCredentialRow> for AdminCredential {
    fn from(row: AdminCredentialRow) -> Self {
        AdminCredential {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAdminUserRow {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&NewAdminUser> for NewAdminUserRow {
    fn from(user: &NewAdminUser) -> Self {
        NewAdminUserRow {
            id: user.id.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: user.created_at,
            updated_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordPatch {
    pub password_hash: String,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_row_uses_storage_column_names() {
        let now = Utc::now();
        let product = Product::from_draft(
            "p-1".to_string(),
            ProductDraft {
                title: "Shawl".to_string(),
                category: "Wraps".to_string(),
                price_inr: "₹4,500".to_string(),
                price_gbp: "£45".to_string(),
                short: "Hand woven".to_string(),
                description: Some("Long".to_string()),
                materials: vec!["Alpaca".to_string()],
                images: vec!["https://cdn.example.com/a.png".to_string()],
            },
            now,
        );

        let value = serde_json::to_value(product.to_row()).unwrap();
        assert_eq!(value["price_inr"], "₹4,500");
        assert_eq!(value["is_active"], true);
        assert!(value.get("priceInr").is_none());
        assert!(value.get("createdAt").is_none());
    }

    #[test]
    fn sparse_rows_get_defaults() {
        let row: TestimonialRow = serde_json::from_value(json!({
            "id": "t-1",
            "content": "Beautiful work",
            "author": null,
            "order": 2
        }))
        .unwrap();

        let testimonial = Testimonial::from_row(row);
        assert_eq!(testimonial.author, "Anonymous");
        assert!(testimonial.is_active);
        assert_eq!(testimonial.updated_at, testimonial.created_at);

        let row: ProductRow = serde_json::from_value(json!({
            "id": "p-1",
            "title": "Shawl",
            "category": "Wraps",
            "price_inr": "1",
            "price_gbp": "2",
            "short": "s",
            "materials": null
        }))
        .unwrap();
        let product = Product::from_row(row);
        assert!(product.materials.is_empty());
        assert!(product.images.is_empty());
        assert_eq!(product.description, None);
    }

    #[test]
    fn zone_less_timestamps_are_read_as_utc() {
        let row: AboutSectionRow = serde_json::from_value(json!({
            "id": "a-1",
            "title": "Story",
            "content": "Since 2019",
            "order": 1,
            "is_active": false,
            "created_at": "2024-06-01T10:15:30.123",
            "updated_at": "2024-06-02T08:00:00+00:00"
        }))
        .unwrap();

        let section = AboutSection::from_row(row);
        assert!(!section.is_active);
        assert_eq!(section.created_at.to_rfc3339(), "2024-06-01T10:15:30.123+00:00");
        assert_eq!(section.updated_at.to_rfc3339(), "2024-06-02T08:00:00+00:00");
    }

    #[test]
    fn testimonial_patch_omits_unset_activity() {
        let patch = Testimonial::to_patch(
            &TestimonialDraft {
                content: "Lovely".to_string(),
                author: "Asha".to_string(),
                order: 1,
                is_active: None,
            },
            Utc::now(),
        );
        let value = serde_json::to_value(patch).unwrap();
        assert!(value.get("is_active").is_none());
        assert_eq!(value["author"], "Asha");
    }
}
