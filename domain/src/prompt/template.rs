//! `{placeholder}` substitution for task descriptions

use crate::orchestration::value_objects::PipelineInputs;

/// Substitute `{key}` placeholders with values from `inputs`.
///
/// A placeholder is replaced only when its key exactly matches an input.
/// Anything else between braces (unknown keys, JSON snippets, empty `{}`) is
/// left verbatim. Substituted values are not scanned again, so a value that
/// itself contains `{key}` is inserted literally.
pub fn render_template(template: &str, inputs: &PipelineInputs) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        // The nearest closing brace, as long as no other opening brace comes first
        let close = after_open
            .find(['{', '}'])
            .filter(|&i| after_open.as_bytes()[i] == b'}');

        match close {
            Some(close) => {
                let key = &after_open[..close];
                match inputs.get(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after_open[close + 1..];
            }
            None => {
                out.push('{');
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}
