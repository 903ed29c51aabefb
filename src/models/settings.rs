use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One stored settings row (`key` → opaque string value).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct SettingEntry {
    pub key: String,
    pub value: String,
}

impl SettingEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Helper constants for the supported setting keys
impl SettingEntry {
    pub const SITE_TITLE: &'static str = "siteTitle";
    pub const SITE_DESCRIPTION: &'static str = "siteDescription";
    pub const HERO_TITLE: &'static str = "heroTitle";
    pub const HERO_SUBTITLE: &'static str = "heroSubtitle";
    pub const WHATSAPP_NUMBER: &'static str = "whatsappNumber";
    pub const LOGO_URL: &'static str = "logoUrl";
    pub const MADE_IN_LOCATION: &'static str = "madeInLocation";
    pub const MATERIALS_LINE: &'static str = "materialsLine";
    pub const INSTAGRAM_URL: &'static str = "instagramUrl";
    pub const FACEBOOK_URL: &'static str = "facebookUrl";
    pub const PRODUCT_CATEGORIES: &'static str = "productCategories";

    pub const SUPPORTED_KEYS: [&'static str; 11] = [
        Self::SITE_TITLE,
        Self::SITE_DESCRIPTION,
        Self::HERO_TITLE,
        Self::HERO_SUBTITLE,
        Self::WHATSAPP_NUMBER,
        Self::LOGO_URL,
        Self::MADE_IN_LOCATION,
        Self::MATERIALS_LINE,
        Self::INSTAGRAM_URL,
        Self::FACEBOOK_URL,
        Self::PRODUCT_CATEGORIES,
    ];
}

/// The public site settings, with defaults for every unset key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub site_title: String,
    pub site_description: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub whatsapp_number: String,
    pub logo_url: String,
    pub made_in_location: String,
    pub materials_line: String,
    pub instagram_url: String,
    pub facebook_url: String,
    pub product_categories: Vec<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_title: String::new(),
            site_description: String::new(),
            hero_title: String::new(),
            hero_subtitle: String::new(),
            whatsapp_number: String::new(),
            logo_url: String::new(),
            made_in_location: "Goa, India".to_string(),
            materials_line: "Alpaca · Merino · Cotton blends".to_string(),
            instagram_url: String::new(),
            facebook_url: String::new(),
            product_categories: Vec::new(),
        }
    }
}

impl SiteSettings {
    /// Overlays stored rows on top of the defaults. Unknown keys are ignored.
    pub fn from_entries(entries: &[SettingEntry]) -> Self {
        let mut settings = Self::default();
        for entry in entries {
            settings.apply(&entry.key, &entry.value);
        }
        settings
    }

    fn apply(&mut self, key: &str, value: &str) {
        let slot = match key {
            SettingEntry::SITE_TITLE => &mut self.site_title,
            SettingEntry::SITE_DESCRIPTION => &mut self.site_description,
            SettingEntry::HERO_TITLE => &mut self.hero_title,
            SettingEntry::HERO_SUBTITLE => &mut self.hero_subtitle,
            SettingEntry::WHATSAPP_NUMBER => &mut self.whatsapp_number,
            SettingEntry::LOGO_URL => &mut self.logo_url,
            SettingEntry::MADE_IN_LOCATION => &mut self.made_in_location,
            SettingEntry::MATERIALS_LINE => &mut self.materials_line,
            SettingEntry::INSTAGRAM_URL => &mut self.instagram_url,
            SettingEntry::FACEBOOK_URL => &mut self.facebook_url,
            SettingEntry::PRODUCT_CATEGORIES => {
                self.product_categories = serde_json::from_str(value).unwrap_or_default();
                return;
            }
            _ => return,
        };
        *slot = value.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let settings = SiteSettings::from_entries(&[SettingEntry::new("siteTitle", "Jaycina")]);
        assert_eq!(settings.site_title, "Jaycina");
        assert_eq!(settings.made_in_location, "Goa, India");
        assert_eq!(settings.materials_line, "Alpaca · Merino · Cotton blends");
        assert!(settings.product_categories.is_empty());
    }

    #[test]
    fn unparseable_categories_read_as_empty() {
        let settings =
            SiteSettings::from_entries(&[SettingEntry::new("productCategories", "not json")]);
        assert!(settings.product_categories.is_empty());

        let settings = SiteSettings::from_entries(&[SettingEntry::new(
            "productCategories",
            r#"["Shawls","Scarves"]"#,
        )]);
        assert_eq!(settings.product_categories, vec!["Shawls", "Scarves"]);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let settings = SiteSettings::from_entries(&[SettingEntry::new("legacyBanner", "x")]);
        assert_eq!(settings, SiteSettings::default());
    }
}
