//! Tenant records shipped with the deployment.

use std::collections::BTreeMap;

use crate::tenant::{
    Address, Branding, ColorScheme, Contact, Credentials, Features, Seo, Social, SubscriptionTier,
    TenantConfig, Theme,
};
use crate::vertical::TradeVertical;

/// Nashville Painting Professionals, the beta tenant and the default.
pub fn nashville_painting_professionals() -> TenantConfig {
    TenantConfig {
        id: "npp".to_string(),
        slug: "nashville-painting-professionals".to_string(),
        subscription_tier: SubscriptionTier::FullSuite,
        trade_vertical: Some(TradeVertical::Painting),
        branding: Branding {
            name: "Nashville Painting Professionals".to_string(),
            tagline: "Exceptional Painters. Extraordinary Service.".to_string(),
            description: "Nashville's premier painting company offering professional interior and exterior painting services for residential and commercial properties.".to_string(),
            logo: None,
            theme: sage_theme(),
        },
        contact: Contact {
            phone: None,
            email: None,
            address: Some(Address {
                street: None,
                city: "Nashville".to_string(),
                state: "TN".to_string(),
                zip: None,
            }),
        },
        social: Social {
            google_reviews: Some(
                "https://www.google.com/maps/place/Nashville+Painting+Professionals".to_string(),
            ),
            ..Social::default()
        },
        services: painting_services(&["cabinetPainting", "deckStaining", "pressureWashing"]),
        pricing: rates(&[
            ("doorsPerUnit", 150.0),
            ("wallsPerSqFt", 2.5),
            ("fullJobPerSqFt", 5.0),
        ]),
        seo: Seo {
            title: "Nashville Painting Professionals | Premium Interior & Exterior Painters"
                .to_string(),
            description: "Nashville's premier painting company. Professional interior and exterior painting services with a 3-year warranty. Free estimates, 4.9 Google rating.".to_string(),
            keywords: strings(&[
                "Nashville painters",
                "painting company Nashville",
                "interior painting",
                "exterior painting",
                "house painters Nashville",
                "commercial painting",
                "residential painting",
            ]),
            service_areas: strings(&[
                "Nashville",
                "Franklin",
                "Brentwood",
                "Murfreesboro",
                "Hendersonville",
            ]),
        },
        features: Features {
            estimator: true,
            portfolio: true,
            reviews: true,
            blog: false,
            online_booking: false,
            ai_assistant: false,
        },
        credentials: Credentials {
            google_rating: Some(4.9),
            review_count: Some(100),
            years_in_business: None,
            warranty_years: Some(3),
            licensed: true,
            insured: true,
            bonded: false,
        },
    }
}

/// White-label demo storefront used in sales presentations.
pub fn paint_pros_demo() -> TenantConfig {
    TenantConfig {
        id: "demo".to_string(),
        slug: "demo".to_string(),
        subscription_tier: SubscriptionTier::FullSuite,
        trade_vertical: Some(TradeVertical::Painting),
        branding: Branding {
            name: "Your Painting Company".to_string(),
            tagline: "Your Tagline Here".to_string(),
            description: "Professional painting services for your home or business.".to_string(),
            logo: None,
            theme: sage_theme(),
        },
        contact: Contact::default(),
        social: Social::default(),
        services: painting_services(&[]),
        pricing: rates(&[
            ("doorsPerUnit", 150.0),
            ("wallsPerSqFt", 2.5),
            ("fullJobPerSqFt", 5.0),
        ]),
        seo: Seo {
            title: "Your Painting Company | Professional Painters".to_string(),
            description:
                "Professional painting services for residential and commercial properties."
                    .to_string(),
            keywords: strings(&[
                "painters",
                "painting company",
                "interior painting",
                "exterior painting",
            ]),
            service_areas: Vec::new(),
        },
        features: Features {
            estimator: true,
            portfolio: true,
            reviews: true,
            blog: true,
            online_booking: true,
            ai_assistant: true,
        },
        credentials: Credentials {
            google_rating: Some(5.0),
            review_count: Some(0),
            years_in_business: None,
            warranty_years: None,
            licensed: true,
            insured: true,
            bonded: true,
        },
    }
}

/// RoofPros storefront on the estimator-only plan.
pub fn roof_pros() -> TenantConfig {
    let profile = TradeVertical::Roofing.profile();
    TenantConfig {
        id: "roofpros".to_string(),
        slug: "roofpros".to_string(),
        subscription_tier: SubscriptionTier::EstimatorOnly,
        trade_vertical: Some(TradeVertical::Roofing),
        branding: Branding {
            name: profile.name.to_string(),
            tagline: profile.tagline.to_string(),
            description: "AI-powered roofing estimates for residential and commercial roofs."
                .to_string(),
            logo: None,
            theme: Theme {
                primary_color: profile.primary_color.to_string(),
                accent_color: profile.accent_color.to_string(),
                dark_mode: ColorScheme {
                    background: "hsl(213, 50%, 8%)".to_string(),
                    foreground: "hsl(45, 30%, 95%)".to_string(),
                },
                light_mode: ColorScheme {
                    background: "hsl(210, 30%, 97%)".to_string(),
                    foreground: "hsl(213, 52%, 15%)".to_string(),
                },
            },
        },
        contact: Contact::default(),
        social: Social::default(),
        services: flags(&[
            ("shingleRoofing", true),
            ("metalRoofing", true),
            ("flatRoofing", true),
            ("roofRepairs", true),
            ("gutters", true),
            ("roofInspection", true),
        ]),
        pricing: rates(&[
            ("shinglePerSqFt", 4.5),
            ("metalPerSqFt", 9.0),
            ("flatPerSqFt", 6.0),
            ("guttersPerLinearFt", 8.0),
            ("inspectionPerJob", 250.0),
        ]),
        seo: Seo {
            title: "RoofPros | AI-Powered Roofing Estimates".to_string(),
            description: "Accurate roofing estimates in minutes. Shingle, metal, and flat roofs."
                .to_string(),
            keywords: strings(&["roofing estimates", "roofers", "roof replacement"]),
            service_areas: Vec::new(),
        },
        features: Features {
            estimator: true,
            portfolio: false,
            reviews: false,
            blog: false,
            online_booking: false,
            ai_assistant: false,
        },
        credentials: Credentials {
            google_rating: None,
            review_count: None,
            years_in_business: None,
            warranty_years: None,
            licensed: true,
            insured: true,
            bonded: false,
        },
    }
}

fn sage_theme() -> Theme {
    Theme {
        primary_color: "hsl(85, 20%, 35%)".to_string(),
        accent_color: "hsl(85, 25%, 45%)".to_string(),
        dark_mode: ColorScheme {
            background: "hsl(85, 15%, 8%)".to_string(),
            foreground: "hsl(45, 30%, 95%)".to_string(),
        },
        light_mode: ColorScheme {
            background: "hsl(45, 30%, 97%)".to_string(),
            foreground: "hsl(85, 20%, 15%)".to_string(),
        },
    }
}

const PAINTING_SERVICES: [&str; 11] = [
    "interiorPainting",
    "exteriorPainting",
    "commercialPainting",
    "residentialPainting",
    "trimAndMolding",
    "ceilings",
    "doors",
    "drywallRepair",
    "cabinetPainting",
    "deckStaining",
    "pressureWashing",
];

/// Every painting service enabled except the ones listed in `disabled`.
fn painting_services(disabled: &[&str]) -> BTreeMap<String, bool> {
    PAINTING_SERVICES
        .iter()
        .map(|name| (name.to_string(), !disabled.contains(name)))
        .collect()
}

fn flags(entries: &[(&str, bool)]) -> BTreeMap<String, bool> {
    entries
        .iter()
        .map(|(name, on)| (name.to_string(), *on))
        .collect()
}

fn rates(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(name, rate)| (name.to_string(), *rate))
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
