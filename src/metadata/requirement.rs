//! Requirement specifier rendering.

use super::loader::StubMetadata;

impl StubMetadata {
    /// Render the installable requirement for this package.
    ///
    /// With `include_python_version`, a `python_version` environment marker
    /// built from `requires_python` is appended. Installing into a venv of
    /// an already matching interpreter does not need it.
    pub fn make_requirement(&self, include_python_version: bool) -> String {
        let mut req = self.name.clone();

        if !self.extras.is_empty() {
            req.push('[');
            req.push_str(&self.extras.join(","));
            req.push(']');
        }

        req.push_str(&self.version.to_string());

        if include_python_version {
            if let Some(rp) = &self.requires_python {
                req.push_str(&format!(
                    "; python_version{}'{}'",
                    rp.operator(),
                    rp.version()
                ));
            }
        }

        req
    }
}
