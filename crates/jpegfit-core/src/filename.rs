//! Suggested output filenames.

/// Suffix appended to the stem of the input filename.
pub const SUFFIX: &str = "_compressed";
/// Extension of every output file.
pub const EXTENSION: &str = "jpg";

/// Derive the output filename from the input filename.
///
/// Everything after the final `.` is dropped; a name without a `.` is used
/// whole as the stem.
///
/// ```ignore
/// assert_eq!(derive_filename("holiday.photo.png"), "holiday.photo_compressed.jpg");
/// assert_eq!(derive_filename("scan"), "scan_compressed.jpg");
/// ```
pub fn derive_filename(original: &str) -> String {
    let stem = original
        .rsplit_once('.')
        .map_or(original, |(stem, _extension)| stem);
    format!("{stem}{SUFFIX}.{EXTENSION}")
}
