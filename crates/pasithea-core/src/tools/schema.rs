//! Statically declared tool schemas, serializable for the reasoning engine.

use serde::Serialize;

use crate::model::{Priority, Status};

/// Value types a tool parameter may take on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParamType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "string[]")]
    StringList,
}

/// One declared parameter: name, type, required flag, and (for enum-typed
/// parameters) the accepted values.
#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub description: &'static str,
    pub required: bool,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed: Option<&'static [&'static str]>,
}

/// A named operation with its parameter schema.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: &'static [ParamSpec],
}

const STATUS_VALUES: &[&str] = &Status::NAMES;
const PRIORITY_VALUES: &[&str] = &Priority::NAMES;

const fn required_str(name: &'static str, description: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        param_type: ParamType::String,
        description,
        required: true,
        allowed: None,
    }
}

const fn optional_str(name: &'static str, description: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        param_type: ParamType::String,
        description,
        required: false,
        allowed: None,
    }
}

/// The five operations of the tool contract, in declaration order.
pub const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "get_issues",
        description: "Get all issues on the board.",
        parameters: &[],
    },
    ToolSpec {
        name: "create_issue",
        description: "Create a new issue on the board.",
        parameters: &[
            required_str("title", "Title of the issue"),
            optional_str("description", "Description of the issue"),
            ParamSpec {
                name: "status",
                param_type: ParamType::String,
                description: "Status column",
                required: false,
                allowed: Some(STATUS_VALUES),
            },
            ParamSpec {
                name: "priority",
                param_type: ParamType::String,
                description: "Priority level",
                required: false,
                allowed: Some(PRIORITY_VALUES),
            },
            optional_str("assignee", "Person assigned to this issue"),
            ParamSpec {
                name: "labels",
                param_type: ParamType::StringList,
                description: "Labels/tags for the issue",
                required: false,
                allowed: None,
            },
        ],
    },
    ToolSpec {
        name: "update_issue",
        description: "Update an existing issue's fields.",
        parameters: &[
            required_str("id", "ID of the issue to update"),
            optional_str("title", "New title"),
            optional_str("description", "New description"),
            ParamSpec {
                name: "status",
                param_type: ParamType::String,
                description: "New status",
                required: false,
                allowed: Some(STATUS_VALUES),
            },
            ParamSpec {
                name: "priority",
                param_type: ParamType::String,
                description: "New priority",
                required: false,
                allowed: Some(PRIORITY_VALUES),
            },
            optional_str("assignee", "New assignee"),
            ParamSpec {
                name: "labels",
                param_type: ParamType::StringList,
                description: "New labels",
                required: false,
                allowed: None,
            },
        ],
    },
    ToolSpec {
        name: "delete_issue",
        description: "Delete an issue from the board.",
        parameters: &[required_str("id", "ID of the issue to delete")],
    },
    ToolSpec {
        name: "move_issue",
        description: "Move an issue to a different status column.",
        parameters: &[
            required_str("id", "ID of the issue to move"),
            ParamSpec {
                name: "status",
                param_type: ParamType::String,
                description: "New status column",
                required: true,
                allowed: Some(STATUS_VALUES),
            },
        ],
    },
];

/// Look up a tool's schema by name.
#[must_use]
pub fn find_tool(name: &str) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|spec| spec.name == name)
}
