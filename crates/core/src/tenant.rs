use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::vertical::TradeVertical;

/// Complete business configuration for one tenant.
///
/// Instances reachable through the registry or a derived build are always
/// fully populated; partial data only exists as a [`crate::TenantOverride`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantConfig {
    pub id: String,
    pub slug: String,
    pub subscription_tier: SubscriptionTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_vertical: Option<TradeVertical>,
    pub branding: Branding,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub social: Social,
    pub services: BTreeMap<String, bool>,
    pub pricing: BTreeMap<String, f64>,
    pub seo: Seo,
    pub features: Features,
    pub credentials: Credentials,
}

impl TenantConfig {
    /// Returns `true` when the named service is offered.
    pub fn offers(&self, service: &str) -> bool {
        self.services.get(service).copied().unwrap_or(false)
    }

    /// Returns the named pricing rate, if the tenant defines one.
    pub fn rate(&self, name: &str) -> Option<f64> {
        self.pricing.get(name).copied()
    }
}

/// Plan the tenant is subscribed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    EstimatorOnly,
    FullSuite,
}

impl SubscriptionTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EstimatorOnly => "estimator_only",
            Self::FullSuite => "full_suite",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    pub name: String,
    pub tagline: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub primary_color: String,
    pub accent_color: String,
    pub dark_mode: ColorScheme,
    pub light_mode: ColorScheme,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub background: String,
    pub foreground: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    pub city: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_reviews: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub service_areas: Vec<String>,
}

/// Storefront capabilities toggled per tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    pub estimator: bool,
    pub portfolio: bool,
    pub reviews: bool,
    pub blog: bool,
    pub online_booking: bool,
    pub ai_assistant: bool,
}

impl Features {
    /// Names of the enabled features in a stable order.
    pub fn enabled(&self) -> Vec<&'static str> {
        [
            ("estimator", self.estimator),
            ("portfolio", self.portfolio),
            ("reviews", self.reviews),
            ("blog", self.blog),
            ("onlineBooking", self.online_booking),
            ("aiAssistant", self.ai_assistant),
        ]
        .into_iter()
        .filter_map(|(name, on)| on.then_some(name))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_in_business: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_years: Option<u32>,
    pub licensed: bool,
    pub insured: bool,
    pub bonded: bool,
}
