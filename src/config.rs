//! Per-run translator configuration.

use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Settings injected into every mapper invocation of one translation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Language of the exported `elementProperties` keys.
    pub locale: Locale,
    /// Category allow-list; `None` means every mapped category in the schema document.
    pub categories: Option<Vec<String>>,
    /// Rescale curved slab/roof outline segments to millimetres.
    ///
    /// Compensates for the exchange server failing to convert units of arc
    /// segments; disable once the upstream conversion is fixed.
    pub curved_unit_fix: bool,
    /// Abort the run on the first element that fails to map.
    pub strict: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            categories: None,
            curved_unit_fix: true,
            strict: false,
        }
    }
}
