//! Saving the downloaded staff report

use std::path::{Path, PathBuf};

use medstaff_api::DEFAULT_REPORT_FILENAME;
use medstaff_client::DirectoryClient;
use tracing::info;

use crate::error::AppError;

/// Download the report into `dir` under the server-provided name
pub async fn download(client: &DirectoryClient, dir: &Path) -> Result<PathBuf, AppError> {
    let report = client.download_report().await?;
    let path = report_path(dir, &report.filename);
    std::fs::create_dir_all(dir)?;
    std::fs::write(&path, &report.bytes)?;
    info!("Saved report to {}", path.display());
    Ok(path)
}

/// Only the final component of the server's filename is used
fn report_path(dir: &Path, filename: &str) -> PathBuf {
    let name = Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_REPORT_FILENAME);
    dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_path_stays_in_dir() {
        let dir = Path::new("/tmp/reports");
        assert_eq!(
            report_path(dir, "medical_workers_2024.xlsx"),
            dir.join("medical_workers_2024.xlsx")
        );
        assert_eq!(report_path(dir, "../../etc/passwd"), dir.join("passwd"));
        assert_eq!(report_path(dir, ".."), dir.join(DEFAULT_REPORT_FILENAME));
    }
}
