//! File naming for downloads and photo uploads.

/// Name used when the report response carries no usable filename
pub const DEFAULT_REPORT_FILENAME: &str = "medical_workers_report.xlsx";

/// Multipart field the image endpoint reads
pub const IMAGE_FIELD: &str = "image";

/// Filename from a `Content-Disposition` header
///
/// Takes everything between `filename="` and the last quote, falling back to
/// the default report name.
pub fn report_filename(content_disposition: Option<&str>) -> String {
    content_disposition
        .and_then(|header| {
            let start = header.find("filename=\"")? + "filename=\"".len();
            let rest = &header[start..];
            let end = rest.rfind('"')?;
            let name = &rest[..end];
            (!name.is_empty()).then(|| name.to_string())
        })
        .unwrap_or_else(|| DEFAULT_REPORT_FILENAME.to_string())
}

/// Filename for an annotated photo upload
pub fn edited_image_filename(worker_id: i64) -> String {
    format!("worker_{worker_id}_edited.png")
}
