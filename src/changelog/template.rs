//! changelog::template
//!
//! Template loading and rendering.

use minijinja::Environment;
use std::fs;
use std::path::Path;

use super::{ChangelogContext, ChangelogError};

/// Built-in Markdown changelog template.
pub const DEFAULT_TEMPLATE: &str = "\
## {{ current_tag }}

Changes in {{ owner }}/{{ repo }} since {{ previous_tag }}.

{% for pr in pull_requests -%}
- {{ pr.title }} (#{{ pr.number }}){% if pr.author %} by @{{ pr.author }}{% endif %}
{% else -%}
No pull requests.
{% endfor -%}
";

/// Read a template file.
pub fn load_template(path: &Path) -> Result<String, ChangelogError> {
    fs::read_to_string(path).map_err(|source| ChangelogError::ReadTemplate {
        path: path.to_path_buf(),
        source,
    })
}

/// Render a changelog with `template`, or the built-in one when `None`.
pub fn render_changelog(
    context: &ChangelogContext,
    template: Option<&str>,
) -> Result<String, ChangelogError> {
    let environment = Environment::new();
    environment
        .render_str(template.unwrap_or(DEFAULT_TEMPLATE), context)
        .map_err(|error| ChangelogError::Template(error.to_string()))
}
