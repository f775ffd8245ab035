use std::collections::HashSet;
use std::fmt::Write;

use crate::error::ExportError;
use crate::registry::ArgInfo;

/// Roxygen comment marker prepended to every documentation line.
pub const ROXYGEN_PREFIX: &str = "#' ";

/// Compose `@param` entries from argument metadata given as parallel slices.
///
/// Underscores in argument names become periods. With `remove_dup`, a name
/// seen earlier is skipped entirely and the first occurrence wins.
pub fn make_doc_string(
    names: &[&str],
    type_infos: &[&str],
    descriptions: &[&str],
    remove_dup: bool,
) -> Result<String, ExportError> {
    if names.len() != type_infos.len() || names.len() != descriptions.len() {
        return Err(ExportError::ArgumentMismatch {
            names: names.len(),
            type_infos: type_infos.len(),
            descriptions: descriptions.len(),
        });
    }

    let entries = names
        .iter()
        .zip(type_infos)
        .zip(descriptions)
        .map(|((name, type_info), description)| (*name, *type_info, *description));
    Ok(compose(entries, remove_dup))
}

/// Same as [`make_doc_string`] for already-paired metadata.
pub fn param_block(args: &[ArgInfo], remove_dup: bool) -> String {
    compose(
        args.iter().map(|arg| {
            (
                arg.name.as_str(),
                arg.type_info.as_str(),
                arg.description.as_str(),
            )
        }),
        remove_dup,
    )
}

fn compose<'a>(
    entries: impl Iterator<Item = (&'a str, &'a str, &'a str)>,
    remove_dup: bool,
) -> String {
    let mut visited = HashSet::new();
    let mut out = String::new();

    for (name, type_info, description) in entries {
        if !visited.insert(name) && remove_dup {
            continue;
        }
        let name = name.replace('_', ".");
        // Writing into a String cannot fail.
        let _ = write!(out, "@param {name}  {type_info}\n    {description}\n");
    }

    out
}

/// Prefix every line of `docstring` with the roxygen marker.
pub fn roxygen_block(docstring: &str) -> String {
    docstring
        .lines()
        .map(|line| format!("{ROXYGEN_PREFIX}{line}\n"))
        .collect()
}
