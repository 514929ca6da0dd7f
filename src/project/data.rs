//! Project data structures matching the calculator input record

use serde::{Deserialize, Serialize};
use std::fmt;

/// Client category used to select the upfront fee discount
///
/// Unknown labels are kept as `Unrecognized` and price at the full rate
/// instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClientType {
    /// Public sector (15% discount)
    Government,
    /// Non-profit (25% discount)
    Ngo,
    /// Private developer (full rate)
    #[default]
    Developer,
    /// Any other label, priced as a developer
    Unrecognized(String),
}

impl ClientType {
    /// Parse a client label. Never fails.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "government" => ClientType::Government,
            "ngo" => ClientType::Ngo,
            "developer" | "private developer" | "private_developer" => ClientType::Developer,
            _ => ClientType::Unrecognized(label.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ClientType::Government => "government",
            ClientType::Ngo => "ngo",
            ClientType::Developer => "developer",
            ClientType::Unrecognized(label) => label,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ClientType::Unrecognized(_))
    }
}

impl From<String> for ClientType {
    fn from(label: String) -> Self {
        ClientType::parse(&label)
    }
}

impl From<ClientType> for String {
    fn from(client: ClientType) -> Self {
        client.as_str().to_string()
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Jurisdiction of the project site
///
/// Carried through to the result for display. It does not enter the fee formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Jurisdiction {
    EuCsrd,
    UnitedKingdom,
    Mexico,
    Kenya,
    Morocco,
    Portugal,
    Brazil,
    Indonesia,
    India,
    UnitedStates,
    Other,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 11] = [
        Jurisdiction::EuCsrd,
        Jurisdiction::UnitedKingdom,
        Jurisdiction::Mexico,
        Jurisdiction::Kenya,
        Jurisdiction::Morocco,
        Jurisdiction::Portugal,
        Jurisdiction::Brazil,
        Jurisdiction::Indonesia,
        Jurisdiction::India,
        Jurisdiction::UnitedStates,
        Jurisdiction::Other,
    ];

    /// Display label as offered in the site selector
    pub fn label(&self) -> &'static str {
        match self {
            Jurisdiction::EuCsrd => "EU (CSRD Region)",
            Jurisdiction::UnitedKingdom => "United Kingdom",
            Jurisdiction::Mexico => "Mexico",
            Jurisdiction::Kenya => "Kenya",
            Jurisdiction::Morocco => "Morocco",
            Jurisdiction::Portugal => "Portugal",
            Jurisdiction::Brazil => "Brazil",
            Jurisdiction::Indonesia => "Indonesia",
            Jurisdiction::India => "India",
            Jurisdiction::UnitedStates => "United States",
            Jurisdiction::Other => "Other",
        }
    }

    /// Match a label case-insensitively; unknown labels map to `Other`
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|j| j.label().eq_ignore_ascii_case(label))
            .unwrap_or(Jurisdiction::Other)
    }
}

impl From<String> for Jurisdiction {
    fn from(label: String) -> Self {
        Jurisdiction::from_label(&label)
    }
}

impl From<Jurisdiction> for String {
    fn from(jurisdiction: Jurisdiction) -> Self {
        jurisdiction.label().to_string()
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Site and project parameters for a single quote
///
/// The numeric fields are optional so that an incomplete form or CSV row can be
/// represented; the engine rejects missing values with a `ValidationError`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    /// Site area in hectares
    #[serde(default)]
    pub hectares: Option<f64>,

    /// Total project capital expenditure (USD)
    #[serde(default)]
    pub capex_usd: Option<f64>,

    #[serde(default)]
    pub client_type: ClientType,

    #[serde(default)]
    pub jurisdiction: Option<Jurisdiction>,
}

impl ProjectInput {
    pub fn new(hectares: f64, capex_usd: f64, client_type: ClientType) -> Self {
        Self {
            hectares: Some(hectares),
            capex_usd: Some(capex_usd),
            client_type,
            jurisdiction: None,
        }
    }

    pub fn with_jurisdiction(mut self, jurisdiction: Jurisdiction) -> Self {
        self.jurisdiction = Some(jurisdiction);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_type_parse() {
        assert_eq!(ClientType::parse("government"), ClientType::Government);
        assert_eq!(ClientType::parse(" Government "), ClientType::Government);
        assert_eq!(ClientType::parse("NGO"), ClientType::Ngo);
        assert_eq!(ClientType::parse("Private Developer"), ClientType::Developer);
        assert_eq!(
            ClientType::parse("utility"),
            ClientType::Unrecognized("utility".to_string())
        );
        assert!(!ClientType::parse("utility").is_recognized());
    }

    #[test]
    fn test_jurisdiction_labels() {
        assert_eq!(Jurisdiction::from_label("EU (CSRD Region)"), Jurisdiction::EuCsrd);
        assert_eq!(Jurisdiction::from_label("mexico"), Jurisdiction::Mexico);
        assert_eq!(Jurisdiction::from_label("Atlantis"), Jurisdiction::Other);
        for j in Jurisdiction::ALL {
            assert_eq!(Jurisdiction::from_label(j.label()), j);
        }
    }

    #[test]
    fn test_input_from_json() {
        let input: ProjectInput = serde_json::from_str(
            r#"{"hectares": 10, "capexUsd": 40000000, "clientType": "government", "jurisdiction": "Mexico"}"#,
        )
        .unwrap();

        assert_eq!(input.hectares, Some(10.0));
        assert_eq!(input.capex_usd, Some(40_000_000.0));
        assert_eq!(input.client_type, ClientType::Government);
        assert_eq!(input.jurisdiction, Some(Jurisdiction::Mexico));
    }

    #[test]
    fn test_input_from_json_missing_fields() {
        let input: ProjectInput = serde_json::from_str(r#"{"hectares": 5}"#).unwrap();
        assert_eq!(input.capex_usd, None);
        assert_eq!(input.client_type, ClientType::Developer);
        assert_eq!(input.jurisdiction, None);
    }
}
