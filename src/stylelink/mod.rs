//! Style-link transform
//!
//! After a bundling pass, each component's stylesheet sits next to its script
//! chunk (`button/style/index.css` beside `button/index.mjs`), but nothing
//! imports it. This transform prepends a side-effect import/require for the
//! stylesheet to the sibling chunk so consumers get styles by importing the
//! component.

use anyhow::Result;
use tracing::debug;

use crate::bundle::{Bundle, BundlePlugin, EntryKind, OutputFormat};
use crate::config::StyleLinkConfig;

/// The style-link transform for one bundling pass
#[derive(Debug, Clone)]
pub struct StyleLink {
    /// Suffix identifying a stylesheet entry, e.g. `style/index.css`
    marker: String,

    /// Sibling chunk file name in ESM output, e.g. `index.mjs`
    esm_chunk: String,

    /// Sibling chunk file name in CommonJS output, e.g. `index.js`
    cjs_chunk: String,
}

impl Default for StyleLink {
    fn default() -> Self {
        Self {
            marker: "style/index.css".to_string(),
            esm_chunk: "index.mjs".to_string(),
            cjs_chunk: "index.js".to_string(),
        }
    }
}

impl StyleLink {
    pub fn new(marker: impl Into<String>, esm_chunk: impl Into<String>, cjs_chunk: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            esm_chunk: esm_chunk.into(),
            cjs_chunk: cjs_chunk.into(),
        }
    }

    pub fn from_config(config: &StyleLinkConfig) -> Self {
        Self::new(&config.style_marker, &config.esm_chunk, &config.cjs_chunk)
    }

    /// Sibling chunk file name for the pass's format
    fn chunk_name(&self, format: OutputFormat) -> &str {
        match format {
            OutputFormat::Esm => &self.esm_chunk,
            OutputFormat::Cjs => &self.cjs_chunk,
        }
    }

    /// Link every stylesheet entry to its sibling chunk
    ///
    /// The format comes from the pass, not from individual entries. Stylesheets
    /// without a sibling chunk are skipped silently; no entry is added or
    /// removed. Applied to a single end-of-generation snapshot, so no chunk is
    /// ever prepended twice.
    pub fn link(&self, format: OutputFormat, mut bundle: Bundle) -> Bundle {
        // The chunk and its stylesheet share a directory, so the specifier in
        // the emitted statement is always the marker itself.
        let statement = format.style_statement(&format!("./{}", self.marker));

        let stylesheets: Vec<String> = bundle
            .entries()
            .filter(|entry| entry.is_stylesheet(&self.marker))
            .map(|entry| entry.file_name.clone())
            .collect();

        for style_name in stylesheets {
            let sibling = format!(
                "{}{}",
                &style_name[..style_name.len() - self.marker.len()],
                self.chunk_name(format)
            );

            let Some(entry) = bundle.get_mut(&sibling) else {
                debug!("No sibling chunk for {}, skipping", style_name);
                continue;
            };
            if let EntryKind::Chunk { code } = &mut entry.kind {
                debug!("Linking {} into {}", style_name, sibling);
                *code = format!("{}\n{}", statement, code);
            }
        }

        bundle
    }
}

impl BundlePlugin for StyleLink {
    fn name(&self) -> &str {
        "style-link"
    }

    fn generate_bundle(&self, format: OutputFormat, bundle: Bundle) -> Result<Bundle> {
        Ok(self.link(format, bundle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::BundleEntry;
    use pretty_assertions::assert_eq;

    fn fixture() -> Bundle {
        let mut bundle = Bundle::new();
        bundle.insert(BundleEntry::chunk("button/index.mjs", "export default Button;\n"));
        bundle.insert(BundleEntry::asset("button/style/index.css"));
        bundle.insert(BundleEntry::chunk("icon/index.mjs", "export default Icon;\n"));
        bundle
    }

    #[test]
    fn test_esm_prepends_import() {
        let linked = StyleLink::default().link(OutputFormat::Esm, fixture());
        assert_eq!(
            linked.get("button/index.mjs").unwrap().code().unwrap(),
            "import \"./style/index.css\";\nexport default Button;\n"
        );
    }

    #[test]
    fn test_cjs_prepends_require() {
        let mut bundle = Bundle::new();
        bundle.insert(BundleEntry::chunk("button/index.js", "module.exports = Button;\n"));
        bundle.insert(BundleEntry::asset("button/style/index.css"));

        let linked = StyleLink::default().link(OutputFormat::Cjs, bundle);
        assert_eq!(
            linked.get("button/index.js").unwrap().code().unwrap(),
            "require(\"./style/index.css\");\nmodule.exports = Button;\n"
        );
    }

    #[test]
    fn test_chunk_without_stylesheet_untouched() {
        let linked = StyleLink::default().link(OutputFormat::Esm, fixture());
        assert_eq!(
            linked.get("icon/index.mjs").unwrap().code().unwrap(),
            "export default Icon;\n"
        );
    }

    #[test]
    fn test_stylesheet_without_sibling_is_skipped() {
        let mut bundle = Bundle::new();
        bundle.insert(BundleEntry::asset("orphan/style/index.css"));

        let linked = StyleLink::default().link(OutputFormat::Esm, bundle.clone());
        assert_eq!(linked, bundle);
    }

    #[test]
    fn test_bundle_without_stylesheets_unchanged() {
        let mut bundle = Bundle::new();
        bundle.insert(BundleEntry::chunk("button/index.mjs", "export default Button;\n"));
        bundle.insert(BundleEntry::chunk("icon/index.mjs", "export default Icon;\n"));

        let linked = StyleLink::default().link(OutputFormat::Esm, bundle.clone());
        assert_eq!(linked, bundle);
    }

    #[test]
    fn test_no_entries_added_or_removed() {
        let before = fixture();
        let linked = StyleLink::default().link(OutputFormat::Esm, before.clone());

        let before_names: Vec<&str> = before.file_names().collect();
        let after_names: Vec<&str> = linked.file_names().collect();
        assert_eq!(before_names, after_names);
    }

    #[test]
    fn test_custom_marker_and_chunk_names() {
        let mut bundle = Bundle::new();
        bundle.insert(BundleEntry::chunk("button/index.vue.mjs", "export default Button;\n"));
        bundle.insert(BundleEntry::asset("button/style/index.css"));

        let link = StyleLink::new("style/index.css", "index.vue.mjs", "index.vue.js");
        let linked = link.link(OutputFormat::Esm, bundle);
        assert_eq!(
            linked.get("button/index.vue.mjs").unwrap().code().unwrap(),
            "import \"./style/index.css\";\nexport default Button;\n"
        );
    }
}
