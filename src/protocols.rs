//! Active protocol list loading and validation.
//!
//! The set of protocols to generate daemon packages for comes from a JSON
//! file of the form `{"active": ["008-PtEdo2Zk"]}`. Identifiers are checked
//! against the `NNN-XXXXXXXX` shape before any package construction happens,
//! so a typo in a hand-edited list fails the run instead of producing a
//! misnamed package set.

use color_eyre::eyre::WrapErr;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::LazyLock;

/// Matches protocol identifiers like `008-PtEdo2Zk`: a three-digit ordinal,
/// a dash, and the eight-character hash prefix.
static PROTOCOL_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{3}-[A-Za-z0-9]{8}$").expect("Invalid protocol identifier regex")
});

/// Contents of the protocols JSON file. Unknown fields are ignored.
#[derive(Deserialize, Debug, Clone)]
pub struct ActiveProtocols {
    /// Protocols the generated package set targets
    pub active: Vec<String>,
}

/// Validation failures for the active protocol list
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Active protocol list is empty")]
    EmptyList,

    #[error("Malformed protocol identifier '{0}' (expected NNN-XXXXXXXX, e.g. 008-PtEdo2Zk)")]
    MalformedIdentifier(String),

    #[error("Duplicate protocol identifier '{0}'")]
    DuplicateIdentifier(String),
}

impl ActiveProtocols {
    /// Validate the protocol list
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.active.is_empty() {
            return Err(ProtocolError::EmptyList);
        }

        let mut seen = std::collections::HashSet::new();
        for proto in &self.active {
            if !PROTOCOL_ID.is_match(proto) {
                return Err(ProtocolError::MalformedIdentifier(proto.clone()));
            }
            if !seen.insert(proto.as_str()) {
                return Err(ProtocolError::DuplicateIdentifier(proto.clone()));
            }
        }

        Ok(())
    }
}

/// Load and validate the active protocol list from a JSON file.
pub fn load_protocols(path: &Path) -> color_eyre::Result<ActiveProtocols> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read protocol list '{}'", path.display()))?;

    let protocols: ActiveProtocols = serde_json::from_str(&content)
        .wrap_err_with(|| format!("Failed to parse protocol list '{}'", path.display()))?;

    protocols.validate()?;

    log::info!(
        "Loaded {} active protocol(s): {}",
        protocols.active.len(),
        protocols.active.join(", ")
    );

    Ok(protocols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_protocol_list() {
        let json = r#"{"active": ["008-PtEdo2Zk", "007-PsDELPH1"]}"#;
        let protocols: ActiveProtocols = serde_json::from_str(json).unwrap();
        assert_eq!(protocols.active.len(), 2);
        assert!(protocols.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"{"active": ["008-PtEdo2Zk"], "frozen": ["001-PtCJ7pwo"]}"#;
        let protocols: ActiveProtocols = serde_json::from_str(json).unwrap();
        assert_eq!(protocols.active, vec!["008-PtEdo2Zk"]);
    }

    #[test]
    fn test_empty_list_rejected() {
        let protocols = ActiveProtocols { active: vec![] };
        assert!(matches!(protocols.validate(), Err(ProtocolError::EmptyList)));
    }

    #[test]
    fn test_malformed_identifier_rejected() {
        for bad in ["PtEdo2Zk", "08-PtEdo2Zk", "008-PtEdo2", "008_PtEdo2Zk", ""] {
            let protocols = ActiveProtocols {
                active: vec![bad.to_string()],
            };
            let result = protocols.validate();
            assert!(
                matches!(result, Err(ProtocolError::MalformedIdentifier(_))),
                "identifier '{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let protocols = ActiveProtocols {
            active: vec!["008-PtEdo2Zk".to_string(), "008-PtEdo2Zk".to_string()],
        };
        let result = protocols.validate();
        assert!(matches!(result, Err(ProtocolError::DuplicateIdentifier(_))));
        assert!(result.unwrap_err().to_string().contains("008-PtEdo2Zk"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"active": ["008-PtEdo2Zk"]}}"#).unwrap();

        let protocols = load_protocols(file.path()).unwrap();
        assert_eq!(protocols.active, vec!["008-PtEdo2Zk"]);
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let result = load_protocols(Path::new("/nonexistent/protocols.json"));
        let message = format!("{:?}", result.unwrap_err());
        assert!(message.contains("/nonexistent/protocols.json"));
    }
}
