//! Language complexity weights keyed by file extension.
//!
//! A file's weight scales its line churn before it is converted to time:
//! markup and data files count for less than a line of C or assembly.

use std::collections::HashMap;

/// Weight used for files with no extension or an extension not in the table.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Built-in extension weights. Keys are lowercase and carry no dot.
const BUILTIN_WEIGHTS: &[(&str, f64)] = &[
    ("html", 0.5),
    ("css", 0.7),
    ("js", 1.0),
    ("php", 1.2),
    ("py", 1.1),
    ("java", 1.3),
    ("c", 1.5),
    ("cpp", 1.6),
    ("h", 1.4),
    ("hpp", 1.5),
    ("cs", 1.3),
    ("go", 1.2),
    ("rb", 1.1),
    ("swift", 1.4),
    ("kt", 1.3),
    ("scala", 1.4),
    ("rs", 1.5),
    ("asm", 2.0),
    ("sql", 0.9),
    ("yaml", 0.6),
    ("json", 0.5),
    ("xml", 0.7),
    ("md", 0.3),
    ("txt", 0.2),
];

/// Immutable mapping from file extension to complexity weight.
///
/// Lookup is case-sensitive against lowercase keys, so `Makefile` or
/// `README.MD` fall back to [`DEFAULT_WEIGHT`].
///
/// # Examples
///
/// ```
/// use hourglass_estimate::weights::WeightTable;
///
/// let table = WeightTable::default();
/// assert_eq!(table.weight_for("src/main.rs"), 1.5);
/// assert_eq!(table.weight_for("docs/README.md"), 0.3);
/// assert_eq!(table.weight_for("Dockerfile"), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct WeightTable {
    weights: HashMap<String, f64>,
}

impl Default for WeightTable {
    fn default() -> Self {
        let weights = BUILTIN_WEIGHTS
            .iter()
            .map(|(ext, w)| ((*ext).to_string(), *w))
            .collect();
        Self { weights }
    }
}

impl WeightTable {
    /// Build the table with `overrides` merged over the built-in entries.
    ///
    /// Override keys are taken verbatim; an entry for an existing extension
    /// replaces the built-in weight, a new key extends the table.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use hourglass_estimate::weights::WeightTable;
    ///
    /// let mut overrides = HashMap::new();
    /// overrides.insert("md".to_string(), 0.5);
    /// overrides.insert("proto".to_string(), 1.1);
    ///
    /// let table = WeightTable::with_overrides(&overrides);
    /// assert_eq!(table.weight_for("a.md"), 0.5);
    /// assert_eq!(table.weight_for("api.proto"), 1.1);
    /// assert_eq!(table.weight_for("a.rs"), 1.5);
    /// ```
    pub fn with_overrides(overrides: &HashMap<String, f64>) -> Self {
        let mut table = Self::default();
        for (ext, weight) in overrides {
            table.weights.insert(ext.clone(), *weight);
        }
        table
    }

    /// Weight for `filename`, which may contain path separators and
    /// multiple dots. The extension is the substring after the final dot;
    /// unknown or missing extensions resolve to [`DEFAULT_WEIGHT`].
    pub fn weight_for(&self, filename: &str) -> f64 {
        match extension(filename) {
            Some(ext) => self.weights.get(ext).copied().unwrap_or(DEFAULT_WEIGHT),
            None => DEFAULT_WEIGHT,
        }
    }
}

/// Extension of `filename`: everything after the final dot of the last path
/// component, or `None` if there is no dot.
fn extension(filename: &str) -> Option<&str> {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    basename.rsplit_once('.').map(|(_, ext)| ext)
}
