use std::fmt;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    MissingCredential,
    IssueNotFound,
    InvalidEnumValue,
    MissingRequiredParam,
    InvalidParamType,
    UnknownTool,
    EmptyTitle,
    ReplicaBlobMalformed,
    ReplicaWriteFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::MissingCredential => "E1003",
            Self::IssueNotFound => "E2001",
            Self::InvalidEnumValue => "E2002",
            Self::MissingRequiredParam => "E2003",
            Self::InvalidParamType => "E2004",
            Self::UnknownTool => "E2005",
            Self::EmptyTitle => "E2006",
            Self::ReplicaBlobMalformed => "E3001",
            Self::ReplicaWriteFailed => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::MissingCredential => "Model credential missing",
            Self::IssueNotFound => "Issue not found",
            Self::InvalidEnumValue => "Invalid status/priority value",
            Self::MissingRequiredParam => "Required tool parameter missing",
            Self::InvalidParamType => "Tool parameter has wrong type",
            Self::UnknownTool => "Unknown tool name",
            Self::EmptyTitle => "Issue title must not be empty",
            Self::ReplicaBlobMalformed => "Persisted replica blob malformed",
            Self::ReplicaWriteFailed => "Replica write failed",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .pasithea/config.toml and retry."),
            Self::MissingCredential => {
                Some("Set PASITHEA_MODEL_TOKEN or MODEL_TOKEN in the environment.")
            }
            Self::IssueNotFound => Some("Call get_issues to see current issue ids."),
            Self::InvalidEnumValue => {
                Some("Use one of the documented status/priority values.")
            }
            Self::MissingRequiredParam | Self::InvalidParamType => {
                Some("Consult the tool schema for parameter names and types.")
            }
            Self::UnknownTool => Some("Consult the tool schema for available operations."),
            Self::EmptyTitle => Some("Provide a non-empty title."),
            Self::ReplicaBlobMalformed => None,
            Self::ReplicaWriteFailed => Some("Check disk space and write permissions."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
