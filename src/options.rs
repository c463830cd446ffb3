//! Conversion options
//!
//! The defaults produce the Mako the `hdf` runtime shim expects. Changing
//! them is only useful when templates are rendered against a different shim or include
//! lookup root.

/// Knobs for the parts of the generated Mako that depend on the rendering environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Function called for `set` assignments to dotted paths.
    pub setter: String,
    /// Inserted in front of every included template path.
    pub include_root: String,
    /// One level of indentation for nested control lines.
    pub indent: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            setter: "hdf.set_value".to_string(),
            include_root: "/".to_string(),
            indent: "  ".to_string(),
        }
    }
}
