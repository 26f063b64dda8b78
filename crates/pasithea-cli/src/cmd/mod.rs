pub mod call;
pub mod create;
pub mod delete;
pub mod init;
pub mod list;
pub mod move_cmd;
pub mod schema;
pub mod show;
pub mod status;
pub mod update;

use crate::output::{render_error, CliError, OutputMode};

/// Parse an optional status/priority flag, rendering a structured error and
/// failing the command on an out-of-enum value.
pub(crate) fn parse_enum<T: std::str::FromStr>(
    raw: Option<&str>,
    output: OutputMode,
    accepted: &[&str],
) -> anyhow::Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.parse::<T>() {
        Ok(value) => Ok(Some(value)),
        Err(error) => {
            render_error(
                output,
                &CliError::with_details(
                    error.to_string(),
                    format!("Use one of: {}", accepted.join(", ")),
                    "invalid_enum_value",
                ),
            )?;
            anyhow::bail!("{error}")
        }
    }
}
