use std::fmt;

use serde::{Deserialize, Serialize};

/// Trade a tenant operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeVertical {
    Painting,
    Roofing,
    Hvac,
    Electrical,
    Plumbing,
    Landscaping,
    GeneralContracting,
}

impl TradeVertical {
    pub const ALL: [TradeVertical; 7] = [
        Self::Painting,
        Self::Roofing,
        Self::Hvac,
        Self::Electrical,
        Self::Plumbing,
        Self::Landscaping,
        Self::GeneralContracting,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Painting => "painting",
            Self::Roofing => "roofing",
            Self::Hvac => "hvac",
            Self::Electrical => "electrical",
            Self::Plumbing => "plumbing",
            Self::Landscaping => "landscaping",
            Self::GeneralContracting => "general_contracting",
        }
    }

    /// Looks a vertical up by its canonical name.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|vertical| vertical.as_str() == value)
    }

    /// Returns the product-line profile for the trade.
    pub fn profile(self) -> VerticalProfile {
        match self {
            Self::Painting => VerticalProfile {
                vertical: self,
                name: "PaintPros",
                tagline: "Nashville's Most Trusted Painters",
                placeholder_domain: "paintpros.io",
                primary_color: "#2D5A27",
                accent_color: "#C4A052",
                terminology: Terminology::new("Paint Job", "Estimate", "Paint Crew", "Property"),
            },
            Self::Roofing => VerticalProfile {
                vertical: self,
                name: "RoofPros",
                tagline: "Trusted Roofing Experts",
                placeholder_domain: "roofpros.io",
                primary_color: "#1E3A5F",
                accent_color: "#D4AF37",
                terminology: Terminology::new("Roofing Job", "Quote", "Roofing Crew", "Property"),
            },
            Self::Hvac => VerticalProfile {
                vertical: self,
                name: "HVACPros",
                tagline: "Heating & Cooling Specialists",
                placeholder_domain: "hvacpros.io",
                primary_color: "#0D47A1",
                accent_color: "#FF6B35",
                terminology: Terminology::new("HVAC Job", "Quote", "HVAC Tech", "Property"),
            },
            Self::Electrical => VerticalProfile {
                vertical: self,
                name: "ElectricPros",
                tagline: "Licensed Electrical Experts",
                placeholder_domain: "electricpros.io",
                primary_color: "#FFC107",
                accent_color: "#212121",
                terminology: Terminology::new("Electrical Job", "Quote", "Electrician", "Property"),
            },
            Self::Plumbing => VerticalProfile {
                vertical: self,
                name: "PlumbPros",
                tagline: "Professional Plumbing Services",
                placeholder_domain: "plumbpros.io",
                primary_color: "#00695C",
                accent_color: "#0288D1",
                terminology: Terminology::new("Plumbing Job", "Quote", "Plumber", "Property"),
            },
            Self::Landscaping => VerticalProfile {
                vertical: self,
                name: "LandscapePros",
                tagline: "Professional Landscaping Services",
                placeholder_domain: "landscapepros.io",
                primary_color: "#388E3C",
                accent_color: "#8D6E63",
                terminology: Terminology::new(
                    "Landscape Project",
                    "Quote",
                    "Landscape Crew",
                    "Property",
                ),
            },
            Self::GeneralContracting => VerticalProfile {
                vertical: self,
                name: "BuildPros",
                tagline: "Licensed General Contractors",
                placeholder_domain: "buildpros.io",
                primary_color: "#5D4037",
                accent_color: "#FF9800",
                terminology: Terminology::new(
                    "Construction Project",
                    "Quote",
                    "Construction Crew",
                    "Job Site",
                ),
            },
        }
    }
}

impl fmt::Display for TradeVertical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static product-line metadata for a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerticalProfile {
    pub vertical: TradeVertical,
    pub name: &'static str,
    pub tagline: &'static str,
    pub placeholder_domain: &'static str,
    pub primary_color: &'static str,
    pub accent_color: &'static str,
    pub terminology: Terminology,
}

/// Words a trade uses for the same concepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Terminology {
    pub project: &'static str,
    pub estimate: &'static str,
    pub crew: &'static str,
    pub job_site: &'static str,
}

impl Terminology {
    const fn new(
        project: &'static str,
        estimate: &'static str,
        crew: &'static str,
        job_site: &'static str,
    ) -> Self {
        Self {
            project,
            estimate,
            crew,
            job_site,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_matches_canonical_names() {
        for vertical in TradeVertical::ALL {
            assert_eq!(TradeVertical::parse(vertical.as_str()), Some(vertical));
        }
        assert_eq!(TradeVertical::parse("Roofing"), None);
    }

    #[test]
    fn profiles_point_back_to_their_vertical() {
        for vertical in TradeVertical::ALL {
            assert_eq!(vertical.profile().vertical, vertical);
        }
        assert_eq!(
            TradeVertical::Roofing.profile().placeholder_domain,
            "roofpros.io"
        );
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&TradeVertical::GeneralContracting).expect("serialize");
        assert_eq!(json, "\"general_contracting\"");
    }
}
