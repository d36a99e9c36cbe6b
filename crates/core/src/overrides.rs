use std::collections::BTreeMap;

use serde::Deserialize;

use crate::tenant::{
    Address, Branding, ColorScheme, Contact, Credentials, Features, Seo, Social, SubscriptionTier,
    TenantConfig, Theme,
};
use crate::vertical::TradeVertical;

/// Partial tenant configuration merged onto a base by [`build_derived`].
///
/// Every field is optional. Nested records merge field by field, `services`
/// and `pricing` merge key by key, and lists replace the base list wholesale.
/// Identity (`id`, `slug`) always comes from the base, so `id` and `slug` are
/// rejected as unknown keys along with any other unrecognised field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TenantOverride {
    pub subscription_tier: Option<SubscriptionTier>,
    pub trade_vertical: Option<TradeVertical>,
    pub branding: Option<BrandingOverride>,
    pub contact: Option<ContactOverride>,
    pub social: Option<SocialOverride>,
    pub services: Option<BTreeMap<String, bool>>,
    pub pricing: Option<BTreeMap<String, f64>>,
    pub seo: Option<SeoOverride>,
    pub features: Option<FeaturesOverride>,
    pub credentials: Option<CredentialsOverride>,
}

impl TenantOverride {
    /// Restricts a base template to the estimator-only plan: the estimator
    /// stays on and every other storefront feature is switched off.
    pub fn estimator_only() -> Self {
        Self {
            subscription_tier: Some(SubscriptionTier::EstimatorOnly),
            features: Some(FeaturesOverride {
                estimator: Some(true),
                portfolio: Some(false),
                reviews: Some(false),
                blog: Some(false),
                online_booking: Some(false),
                ai_assistant: Some(false),
            }),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BrandingOverride {
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub theme: Option<ThemeOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemeOverride {
    pub primary_color: Option<String>,
    pub accent_color: Option<String>,
    pub dark_mode: Option<ColorSchemeOverride>,
    pub light_mode: Option<ColorSchemeOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorSchemeOverride {
    pub background: Option<String>,
    pub foreground: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactOverride {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SocialOverride {
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub google: Option<String>,
    pub google_reviews: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SeoOverride {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub service_areas: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FeaturesOverride {
    pub estimator: Option<bool>,
    pub portfolio: Option<bool>,
    pub reviews: Option<bool>,
    pub blog: Option<bool>,
    pub online_booking: Option<bool>,
    pub ai_assistant: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CredentialsOverride {
    pub google_rating: Option<f32>,
    pub review_count: Option<u32>,
    pub years_in_business: Option<u32>,
    pub warranty_years: Option<u32>,
    pub licensed: Option<bool>,
    pub insured: Option<bool>,
    pub bonded: Option<bool>,
}

/// Deep-merges `overrides` onto `base` and returns a new configuration.
///
/// The base is never modified and the result is never registered anywhere.
pub fn build_derived(base: &TenantConfig, overrides: &TenantOverride) -> TenantConfig {
    TenantConfig {
        id: base.id.clone(),
        slug: base.slug.clone(),
        subscription_tier: overrides
            .subscription_tier
            .unwrap_or(base.subscription_tier),
        trade_vertical: overrides.trade_vertical.or(base.trade_vertical),
        branding: merge_with(&overrides.branding, &base.branding, BrandingOverride::apply),
        contact: merge_with(&overrides.contact, &base.contact, ContactOverride::apply),
        social: merge_with(&overrides.social, &base.social, SocialOverride::apply),
        services: merge_map(&overrides.services, &base.services),
        pricing: merge_map(&overrides.pricing, &base.pricing),
        seo: merge_with(&overrides.seo, &base.seo, SeoOverride::apply),
        features: merge_with(&overrides.features, &base.features, FeaturesOverride::apply),
        credentials: merge_with(
            &overrides.credentials,
            &base.credentials,
            CredentialsOverride::apply,
        ),
    }
}

impl BrandingOverride {
    fn apply(&self, base: &Branding) -> Branding {
        Branding {
            name: pick(&self.name, &base.name),
            tagline: pick(&self.tagline, &base.tagline),
            description: pick(&self.description, &base.description),
            logo: pick_opt(&self.logo, &base.logo),
            theme: merge_with(&self.theme, &base.theme, ThemeOverride::apply),
        }
    }
}

impl ThemeOverride {
    fn apply(&self, base: &Theme) -> Theme {
        Theme {
            primary_color: pick(&self.primary_color, &base.primary_color),
            accent_color: pick(&self.accent_color, &base.accent_color),
            dark_mode: merge_with(&self.dark_mode, &base.dark_mode, ColorSchemeOverride::apply),
            light_mode: merge_with(&self.light_mode, &base.light_mode, ColorSchemeOverride::apply),
        }
    }
}

impl ColorSchemeOverride {
    fn apply(&self, base: &ColorScheme) -> ColorScheme {
        ColorScheme {
            background: pick(&self.background, &base.background),
            foreground: pick(&self.foreground, &base.foreground),
        }
    }
}

impl ContactOverride {
    fn apply(&self, base: &Contact) -> Contact {
        Contact {
            phone: pick_opt(&self.phone, &base.phone),
            email: pick_opt(&self.email, &base.email),
            address: pick_opt(&self.address, &base.address),
        }
    }
}

impl SocialOverride {
    fn apply(&self, base: &Social) -> Social {
        Social {
            facebook: pick_opt(&self.facebook, &base.facebook),
            instagram: pick_opt(&self.instagram, &base.instagram),
            twitter: pick_opt(&self.twitter, &base.twitter),
            linkedin: pick_opt(&self.linkedin, &base.linkedin),
            google: pick_opt(&self.google, &base.google),
            google_reviews: pick_opt(&self.google_reviews, &base.google_reviews),
        }
    }
}

impl SeoOverride {
    fn apply(&self, base: &Seo) -> Seo {
        Seo {
            title: pick(&self.title, &base.title),
            description: pick(&self.description, &base.description),
            keywords: pick(&self.keywords, &base.keywords),
            service_areas: pick(&self.service_areas, &base.service_areas),
        }
    }
}

impl FeaturesOverride {
    fn apply(&self, base: &Features) -> Features {
        Features {
            estimator: self.estimator.unwrap_or(base.estimator),
            portfolio: self.portfolio.unwrap_or(base.portfolio),
            reviews: self.reviews.unwrap_or(base.reviews),
            blog: self.blog.unwrap_or(base.blog),
            online_booking: self.online_booking.unwrap_or(base.online_booking),
            ai_assistant: self.ai_assistant.unwrap_or(base.ai_assistant),
        }
    }
}

impl CredentialsOverride {
    fn apply(&self, base: &Credentials) -> Credentials {
        Credentials {
            google_rating: self.google_rating.or(base.google_rating),
            review_count: self.review_count.or(base.review_count),
            years_in_business: self.years_in_business.or(base.years_in_business),
            warranty_years: self.warranty_years.or(base.warranty_years),
            licensed: self.licensed.unwrap_or(base.licensed),
            insured: self.insured.unwrap_or(base.insured),
            bonded: self.bonded.unwrap_or(base.bonded),
        }
    }
}

fn pick<T: Clone>(value: &Option<T>, base: &T) -> T {
    value.as_ref().unwrap_or(base).clone()
}

fn pick_opt<T: Clone>(value: &Option<T>, base: &Option<T>) -> Option<T> {
    value.as_ref().or(base.as_ref()).cloned()
}

fn merge_with<O, T: Clone>(value: &Option<O>, base: &T, apply: fn(&O, &T) -> T) -> T {
    match value {
        Some(overrides) => apply(overrides, base),
        None => base.clone(),
    }
}

fn merge_map<V: Copy>(
    value: &Option<BTreeMap<String, V>>,
    base: &BTreeMap<String, V>,
) -> BTreeMap<String, V> {
    let mut merged = base.clone();
    if let Some(entries) = value {
        merged.extend(entries.iter().map(|(key, v)| (key.clone(), *v)));
    }
    merged
}
