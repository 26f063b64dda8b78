//! The tool contract: the fixed set of named operations an agent may invoke.
//!
//! Dispatch is driven by an explicit registry pairing each operation name with
//! a handler and a statically declared parameter schema ([`schema`]), checked
//! before the handler runs. The dispatch surface is infallible by contract:
//! every call — including domain errors and rejected input — produces a reply
//! the reasoning loop can read. Nothing here panics or raises through the
//! tool boundary, and a rejected call mutates nothing.

pub mod schema;

pub use schema::{find_tool, ParamSpec, ParamType, ToolSpec, TOOLS};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::{info, warn};

use crate::error::ErrorCode;
use crate::model::{Issue, IssueDraft, Priority, Status};
use crate::store::{IssueChanges, IssueStore};

/// System-prompt preamble shipped to the reasoning engine alongside the
/// schemas. The read-fresh discipline lives here: the agent must call
/// `get_issues` before discussing board contents.
pub const INSTRUCTIONS: &str = "You are a project management assistant for a kanban \
board with four columns: Backlog, To Do, In Progress, and Done. You have tools to \
get, create, update, delete, and move issues. When discussing the board, ALWAYS use \
the get_issues tool to see the current state before responding.";

/// One structured request from the agent: operation name plus JSON arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, args: Value) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// A call with no arguments (`get_issues`).
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, Value::Null)
    }
}

/// What a tool call hands back to the reasoning loop: the issue list, one
/// created issue, or a short confirmation/rejection sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ToolReply {
    Issues(Vec<Issue>),
    Issue(Box<Issue>),
    Text(String),
}

impl ToolReply {
    /// One-line rendering for logs and terminal output.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Issues(issues) => format!("{} issues", issues.len()),
            Self::Issue(issue) => format!("Created issue {}", issue.id),
            Self::Text(text) => text.clone(),
        }
    }

    /// The confirmation string, when the reply is textual.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// A reply plus whether the store was mutated (drives snapshot broadcast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    pub reply: ToolReply,
    pub mutated: bool,
}

impl ToolOutcome {
    const fn read(reply: ToolReply) -> Self {
        Self {
            reply,
            mutated: false,
        }
    }

    const fn wrote(reply: ToolReply) -> Self {
        Self {
            reply,
            mutated: true,
        }
    }

    fn rejected(message: String, code: ErrorCode) -> Self {
        warn!(code = %code.code(), %message, "tool call rejected");
        Self::read(ToolReply::Text(message))
    }
}

type Handler = fn(&mut IssueStore, &Map<String, Value>) -> ToolOutcome;

/// Explicit name → handler mapping over the declared schemas.
#[derive(Debug)]
pub struct ToolRegistry {
    entries: Vec<(&'static str, Handler)>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![
                ("get_issues", handle_get_issues as Handler),
                ("create_issue", handle_create_issue),
                ("update_issue", handle_update_issue),
                ("delete_issue", handle_delete_issue),
                ("move_issue", handle_move_issue),
            ],
        }
    }

    /// The declared schemas, for transmission to the reasoning engine.
    #[must_use]
    pub const fn specs(&self) -> &'static [ToolSpec] {
        TOOLS
    }

    /// Validate and run one call against `store`.
    ///
    /// Unknown tools, malformed arguments, and domain errors all come back as
    /// textual replies with `mutated == false`.
    pub fn dispatch(&self, store: &mut IssueStore, call: &ToolCall) -> ToolOutcome {
        let (Some(spec), Some((_, handler))) = (
            find_tool(&call.name),
            self.entries.iter().find(|(name, _)| *name == call.name),
        ) else {
            let available: Vec<&str> = TOOLS.iter().map(|t| t.name).collect();
            return ToolOutcome::rejected(
                format!(
                    "Unknown tool '{}'. Available tools: {}.",
                    call.name,
                    available.join(", ")
                ),
                ErrorCode::UnknownTool,
            );
        };

        let empty = Map::new();
        let args = match &call.args {
            Value::Null => &empty,
            Value::Object(map) => map,
            _ => {
                return ToolOutcome::rejected(
                    format!("Arguments for {} must be a JSON object.", spec.name),
                    ErrorCode::InvalidParamType,
                );
            }
        };

        if let Err((message, code)) = validate_args(spec, args) {
            return ToolOutcome::rejected(message, code);
        }

        handler(store, args)
    }
}

/// Check `args` against the declared parameter schema. An empty string for an
/// optional parameter counts as absent ("do not change"), never as a value.
fn validate_args(
    spec: &ToolSpec,
    args: &Map<String, Value>,
) -> Result<(), (String, ErrorCode)> {
    for param in spec.parameters {
        match args.get(param.name) {
            None | Some(Value::Null) => {
                if param.required {
                    return Err((
                        format!(
                            "Missing required parameter '{}' for {}.",
                            param.name, spec.name
                        ),
                        ErrorCode::MissingRequiredParam,
                    ));
                }
            }
            Some(value) => validate_value(spec, param, value)?,
        }
    }
    Ok(())
}

fn validate_value(
    spec: &ToolSpec,
    param: &ParamSpec,
    value: &Value,
) -> Result<(), (String, ErrorCode)> {
    match param.param_type {
        ParamType::String => {
            let Some(text) = value.as_str() else {
                return Err((
                    format!(
                        "Parameter '{}' for {} must be a string.",
                        param.name, spec.name
                    ),
                    ErrorCode::InvalidParamType,
                ));
            };
            let trimmed = text.trim();
            if trimmed.is_empty() {
                if param.required {
                    let code = if param.name == "title" {
                        ErrorCode::EmptyTitle
                    } else {
                        ErrorCode::MissingRequiredParam
                    };
                    return Err((
                        format!(
                            "Parameter '{}' for {} must not be empty.",
                            param.name, spec.name
                        ),
                        code,
                    ));
                }
                return Ok(());
            }
            if let Some(allowed) = param.allowed {
                let normalized = trimmed.to_ascii_lowercase();
                if !allowed.contains(&normalized.as_str()) {
                    return Err((
                        format!(
                            "Invalid value '{}' for '{}'. Expected one of: {}.",
                            text,
                            param.name,
                            allowed.join(", ")
                        ),
                        ErrorCode::InvalidEnumValue,
                    ));
                }
            }
        }
        ParamType::StringList => {
            let is_string_array = value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string));
            if !is_string_array {
                return Err((
                    format!(
                        "Parameter '{}' for {} must be an array of strings.",
                        param.name, spec.name
                    ),
                    ErrorCode::InvalidParamType,
                ));
            }
        }
    }
    Ok(())
}

// -- argument extraction (post-validation) ----------------------------------

fn arg_str<'a>(args: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    args.get(name)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn arg_list(args: &Map<String, Value>, name: &str) -> Option<Vec<String>> {
    args.get(name).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}

fn arg_status(args: &Map<String, Value>) -> Option<Status> {
    arg_str(args, "status").and_then(|s| Status::from_str(s).ok())
}

fn arg_priority(args: &Map<String, Value>) -> Option<Priority> {
    arg_str(args, "priority").and_then(|p| Priority::from_str(p).ok())
}

// -- handlers ---------------------------------------------------------------

fn handle_get_issues(store: &mut IssueStore, _args: &Map<String, Value>) -> ToolOutcome {
    info!(count = store.len(), "get_issues");
    ToolOutcome::read(ToolReply::Issues(store.list().to_vec()))
}

fn handle_create_issue(store: &mut IssueStore, args: &Map<String, Value>) -> ToolOutcome {
    let draft = IssueDraft {
        title: arg_str(args, "title").unwrap_or_default().to_string(),
        description: arg_str(args, "description").map(str::to_string),
        status: arg_status(args),
        priority: arg_priority(args),
        assignee: arg_str(args, "assignee").map(str::to_string),
        labels: arg_list(args, "labels"),
    };
    let id = store.next_id();
    let issue = draft.into_issue(id);
    store.insert(issue.clone());
    info!(id = %issue.id, title = %issue.title, "created issue");
    ToolOutcome::wrote(ToolReply::Issue(Box::new(issue)))
}

fn handle_update_issue(store: &mut IssueStore, args: &Map<String, Value>) -> ToolOutcome {
    let id = arg_str(args, "id").unwrap_or_default();
    let changes = IssueChanges {
        title: arg_str(args, "title").map(str::to_string),
        description: arg_str(args, "description").map(str::to_string),
        status: arg_status(args),
        priority: arg_priority(args),
        assignee: arg_str(args, "assignee").map(str::to_string),
        labels: arg_list(args, "labels"),
    };
    if store.update(id, &changes) {
        info!(id, "updated issue");
        ToolOutcome::wrote(ToolReply::Text(format!("Updated issue {id}")))
    } else {
        not_found(id)
    }
}

fn handle_delete_issue(store: &mut IssueStore, args: &Map<String, Value>) -> ToolOutcome {
    let id = arg_str(args, "id").unwrap_or_default();
    let removed = store.remove(id);
    if removed > 0 {
        info!(id, removed, "deleted issue");
        ToolOutcome::wrote(ToolReply::Text(format!("Deleted issue {id}")))
    } else {
        not_found(id)
    }
}

fn handle_move_issue(store: &mut IssueStore, args: &Map<String, Value>) -> ToolOutcome {
    let id = arg_str(args, "id").unwrap_or_default();
    let Some(status) = arg_status(args) else {
        return ToolOutcome::rejected(
            "Missing required parameter 'status' for move_issue.".to_string(),
            ErrorCode::MissingRequiredParam,
        );
    };
    let changes = IssueChanges {
        status: Some(status),
        ..IssueChanges::default()
    };
    if store.update(id, &changes) {
        info!(id, %status, "moved issue");
        ToolOutcome::wrote(ToolReply::Text(format!("Moved issue {id} to {status}")))
    } else {
        not_found(id)
    }
}

fn not_found(id: &str) -> ToolOutcome {
    warn!(code = %ErrorCode::IssueNotFound.code(), id, "issue not found");
    ToolOutcome::read(ToolReply::Text(format!("Issue {id} not found.")))
}
