//! Load project portfolios from CSV
//!
//! Expected columns: `project_id,hectares,capex_usd,client_type,jurisdiction`.
//! Empty numeric cells load as missing and are rejected later by the engine,
//! so one incomplete row does not prevent the rest of a portfolio from pricing.

use super::{ClientType, Jurisdiction, ProjectInput};
use csv::Reader;
use std::path::Path;

/// Errors raised while reading a portfolio file
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read portfolio CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Raw CSV row matching the portfolio columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    project_id: String,
    hectares: Option<f64>,
    capex_usd: Option<f64>,
    #[serde(default)]
    client_type: Option<String>,
    #[serde(default)]
    jurisdiction: Option<String>,
}

impl CsvRow {
    fn into_record(self) -> ProjectRecord {
        let client_type = match self.client_type.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => ClientType::parse(label),
            _ => ClientType::default(),
        };

        let jurisdiction = self
            .jurisdiction
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(Jurisdiction::from_label);

        ProjectRecord {
            project_id: self.project_id,
            input: ProjectInput {
                hectares: self.hectares,
                capex_usd: self.capex_usd,
                client_type,
                jurisdiction,
            },
        }
    }
}

/// A named project in a portfolio
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    pub project_id: String,
    pub input: ProjectInput,
}

/// Load all projects from a CSV file
pub fn load_projects<P: AsRef<Path>>(path: P) -> Result<Vec<ProjectRecord>, LoadError> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load projects from any reader (e.g., string buffer, request body)
pub fn load_projects_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<ProjectRecord>, LoadError> {
    collect_rows(Reader::from_reader(reader))
}

fn collect_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<ProjectRecord>, LoadError> {
    let mut projects = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        projects.push(row.into_record());
    }

    log::debug!("Loaded {} projects", projects.len());
    Ok(projects)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PORTFOLIO: &str = "\
project_id,hectares,capex_usd,client_type,jurisdiction
culiacan,10,40000000,government,Mexico
delta,25000,,ngo,Kenya
coast,1200,8000000,,
";

    #[test]
    fn test_load_projects() {
        let projects = load_projects_from_reader(PORTFOLIO.as_bytes()).expect("Failed to load projects");
        assert_eq!(projects.len(), 3);

        let p1 = &projects[0];
        assert_eq!(p1.project_id, "culiacan");
        assert_eq!(p1.input.hectares, Some(10.0));
        assert_eq!(p1.input.capex_usd, Some(40_000_000.0));
        assert_eq!(p1.input.client_type, ClientType::Government);
        assert_eq!(p1.input.jurisdiction, Some(Jurisdiction::Mexico));
    }

    #[test]
    fn test_empty_cells_load_as_missing() {
        let projects = load_projects_from_reader(PORTFOLIO.as_bytes()).unwrap();

        assert_eq!(projects[1].input.capex_usd, None);
        assert_eq!(projects[2].input.client_type, ClientType::Developer);
        assert_eq!(projects[2].input.jurisdiction, None);
    }

    #[test]
    fn test_malformed_number_is_an_error() {
        let data = "project_id,hectares,capex_usd,client_type,jurisdiction\nx,ten,100,ngo,Kenya\n";
        assert!(load_projects_from_reader(data.as_bytes()).is_err());
    }
}
