// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Processing options.
#[derive(Debug)]
pub struct Options {
    /// The fallback font family.
    ///
    /// Used when a text's font index cannot be resolved against the
    /// document's font tables, or when the document has no font tables
    /// at all.
    ///
    /// Default: `Helvetica`
    pub default_font_family: String,

    /// An optional abort flag.
    ///
    /// The import checks the flag before plotting each shape. Once it is
    /// set, no further objects are produced and the import finishes with
    /// whatever was emitted so far. The import itself never sets it.
    ///
    /// Default: `None`
    pub abort: Option<Arc<AtomicBool>>,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            default_font_family: "Helvetica".to_string(),
            abort: None,
        }
    }
}
