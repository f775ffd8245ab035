use crate::export::docstring::{param_block, roxygen_block};
use crate::registry::FunctionInfo;

pub const HEADER: &str = "######\n# Generated by mxnet.export, do not edit by hand.\n######\n";

/// Docstring text followed by the `@param` block for the function's arguments.
pub fn documentation(info: &FunctionInfo, remove_dup: bool) -> String {
    let mut text = info.docstring.clone();
    let params = param_block(&info.args, remove_dup);

    if !params.is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&params);
    }

    roxygen_block(&text)
}

/// Documentation-only block: the roxygen comment is bound to `name` and
/// followed by a `NULL` placeholder.
pub fn normal_function(out: &mut String, name: &str, doc: &str) {
    out.push('\n');
    out.push_str(doc);
    out.push_str(&format!("#' @name {name}\nNULL\n"));
}

pub fn variadic_function(out: &mut String, name: &str, public_name: &str, doc: &str) {
    out.push('\n');
    out.push_str(doc);
    out.push_str(&format!(
        "{public_name} <- function(...) {{\n  {name}(list(...))\n}}\n"
    ));
}
