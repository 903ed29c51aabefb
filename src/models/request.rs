use serde::Deserialize;
use utoipa::ToSchema;

use crate::mapper::coerce::{
    non_blank, normalize_categories, to_image_urls, to_list, to_order, ListInput, OrderInput,
};
use crate::models::{
    AboutSectionDraft, ProcessStepDraft, ProductDraft, ServiceError, SettingEntry,
    TestimonialDraft,
};

/// Collects required text fields, reporting every blank one at once.
struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    fn new() -> Self {
        Self {
            missing: Vec::new(),
        }
    }

    fn take(&mut self, name: &'static str, value: Option<String>) -> String {
        match non_blank(value) {
            Some(value) => value,
            None => {
                self.missing.push(name);
                String::new()
            }
        }
    }

    fn finish(self) -> Result<(), ServiceError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::ValidationError(format!(
                "Missing required fields: {}",
                self.missing.join(", ")
            )))
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub price_inr: Option<String>,
    pub price_gbp: Option<String>,
    pub short: Option<String>,
    pub description: Option<String>,
    /// Array of strings or a comma-separated string.
    #[schema(value_type = Option<Vec<String>>)]
    pub materials: Option<ListInput>,
    /// Array of http(s) URLs or a comma-separated string; other entries are dropped.
    #[schema(value_type = Option<Vec<String>>)]
    pub images: Option<ListInput>,
}

impl TryFrom<ProductRequest> for ProductDraft {
    type Error = ServiceError;

    fn try_from(request: ProductRequest) -> Result<Self, Self::Error> {
        let mut required = Required::new();
        let title = required.take("title", request.title);
        let category = required.take("category", request.category);
        let price_inr = required.take("priceInr", request.price_inr);
        let price_gbp = required.take("priceGbp", request.price_gbp);
        let short = required.take("short", request.short);
        required.finish()?;

        Ok(ProductDraft {
            title,
            category,
            price_inr,
            price_gbp,
            short,
            description: non_blank(request.description),
            materials: to_list(request.materials),
            images: to_image_urls(request.images),
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AboutSectionRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[schema(value_type = Option<i64>)]
    pub order: Option<OrderInput>,
}

impl TryFrom<AboutSectionRequest> for AboutSectionDraft {
    type Error = ServiceError;

    fn try_from(request: AboutSectionRequest) -> Result<Self, Self::Error> {
        let mut required = Required::new();
        let title = required.take("title", request.title);
        let content = required.take("content", request.content);
        required.finish()?;

        Ok(AboutSectionDraft {
            title,
            content,
            order: to_order(request.order),
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStepRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[schema(value_type = Option<i64>)]
    pub order: Option<OrderInput>,
}

impl TryFrom<ProcessStepRequest> for ProcessStepDraft {
    type Error = ServiceError;

    fn try_from(request: ProcessStepRequest) -> Result<Self, Self::Error> {
        let mut required = Required::new();
        let title = required.take("title", request.title);
        let description = required.take("description", request.description);
        let image_url = required.take("imageUrl", request.image_url);
        required.finish()?;

        Ok(ProcessStepDraft {
            title,
            description,
            image_url,
            order: to_order(request.order),
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialRequest {
    pub content: Option<String>,
    /// Defaults to "Anonymous".
    pub author: Option<String>,
    #[schema(value_type = Option<i64>)]
    pub order: Option<OrderInput>,
    pub is_active: Option<bool>,
}

impl TryFrom<TestimonialRequest> for TestimonialDraft {
    type Error = ServiceError;

    fn try_from(request: TestimonialRequest) -> Result<Self, Self::Error> {
        let mut required = Required::new();
        let content = required.take("content", request.content);
        required.finish()?;

        Ok(TestimonialDraft {
            content,
            author: non_blank(request.author).unwrap_or_else(|| "Anonymous".to_string()),
            order: to_order(request.order),
            is_active: request.is_active,
        })
    }
}

/// Partial settings update. Only keys present in the body are written.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdateRequest {
    pub site_title: Option<String>,
    pub site_description: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub whatsapp_number: Option<String>,
    pub logo_url: Option<String>,
    pub made_in_location: Option<String>,
    pub materials_line: Option<String>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    #[schema(value_type = Option<Vec<String>>)]
    pub product_categories: Option<ListInput>,
}

impl SettingsUpdateRequest {
    /// Rows to upsert. Categories are normalized and stored as a JSON array string.
    pub fn into_entries(self) -> Result<Vec<SettingEntry>, ServiceError> {
        let text_fields = [
            (SettingEntry::SITE_TITLE, self.site_title),
            (SettingEntry::SITE_DESCRIPTION, self.site_description),
            (SettingEntry::HERO_TITLE, self.hero_title),
            (SettingEntry::HERO_SUBTITLE, self.hero_subtitle),
            (SettingEntry::WHATSAPP_NUMBER, self.whatsapp_number),
            (SettingEntry::LOGO_URL, self.logo_url),
            (SettingEntry::MADE_IN_LOCATION, self.made_in_location),
            (SettingEntry::MATERIALS_LINE, self.materials_line),
            (SettingEntry::INSTAGRAM_URL, self.instagram_url),
            (SettingEntry::FACEBOOK_URL, self.facebook_url),
        ];

        let mut entries: Vec<SettingEntry> = text_fields
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| SettingEntry::new(key, value)))
            .collect();

        if let Some(categories) = self.product_categories {
            let normalized = normalize_categories(to_list(Some(categories)));
            let encoded = serde_json::to_string(&normalized)
                .map_err(|e| ServiceError::InternalError(e.to_string()))?;
            entries.push(SettingEntry::new(SettingEntry::PRODUCT_CATEGORIES, encoded));
        }

        Ok(entries)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl CredentialsRequest {
    /// Trimmed email and raw password, or the shared "required" validation error.
    pub fn into_parts(self) -> Result<(String, String), ServiceError> {
        let email = non_blank(self.email);
        let password = self.password.filter(|password| !password.is_empty());
        match (email, password) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(ServiceError::ValidationError(
                "Email and password required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Raw base64 or a `data:<mime>;base64,` URL.
    pub file_base64: Option<String>,
    pub filename: Option<String>,
}
