//! Text normalization shared by every extractor.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Strip diacritics and lower-case.
///
/// Lower-cases, decomposes to NFD and drops combining marks, so
/// "Almoço no SALÃO" and "almoco no salao" normalize identically.
/// Case folding runs first because some lower-case forms decompose
/// into a base letter plus a mark (`İ` becomes `i` + U+0307).
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}
