//! Inputs and side steps around the core: fetching sources, fetching the
//! feed, and the optional external analysis.
//!
//! None of these transform data. They hand already-materialized bytes to the
//! collectors, or run a program over a finished artifact.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::NamedTempFile;

use crate::config::{AnalysisConfig, FeedLocation};
use crate::error::{AcquireError, AcquireResult, IconsetResult, SourceError};

/// Whether the artifact at `path` has to be (re)produced. Nothing is removed:
/// renders replace the old artifact only once the new one is complete.
pub fn is_stale(path: &Path, refresh: bool) -> bool {
    refresh || !path.exists()
}

/// Decide whether `path` has to be (re)produced, clearing it for a refresh.
///
/// With `refresh` set an existing file or directory is deleted first. Returns
/// `true` when the path is absent or was just removed.
pub fn needs_rebuild(path: &Path, refresh: bool) -> AcquireResult<bool> {
    if !path.exists() {
        return Ok(true);
    }
    if !refresh {
        return Ok(false);
    }

    let removed = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    removed.map_err(|e| AcquireError::Remove {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(true)
}

/// `git clone <repository> <destination>`
pub fn clone_source(repository: &str, destination: &Path) -> AcquireResult<()> {
    tracing::info!(repository, destination = %destination.display(), "cloning icon sources");

    let clone_error = |message: String| AcquireError::Clone {
        repository: repository.to_string(),
        path: destination.display().to_string(),
        message,
    };

    let status = Command::new("git")
        .arg("clone")
        .arg(repository)
        .arg(destination)
        .stdin(Stdio::null())
        .status()
        .map_err(|e| clone_error(format!("failed to spawn git: {e}")))?;
    if !status.success() {
        return Err(clone_error(format!("git exited with {status}")));
    }

    tracing::info!("icon sources cloned");
    Ok(())
}

/// Load the feed's raw bytes from a URL or a local file.
pub fn load_feed(location: &FeedLocation) -> IconsetResult<Vec<u8>> {
    match location {
        FeedLocation::Url(url) => Ok(fetch_url(url)?),
        FeedLocation::File(path) => {
            let bytes = std::fs::read(path).map_err(|e| SourceError::Read {
                path: path.display().to_string(),
                source: e,
            })?;
            Ok(bytes)
        }
    }
}

/// HTTP GET `url` and return the body.
pub fn fetch_url(url: &str) -> AcquireResult<Vec<u8>> {
    tracing::info!(url, "downloading emoji feed");

    let response = ureq::get(url).call().map_err(|e| AcquireError::Fetch {
        url: url.into(),
        message: e.to_string(),
    })?;

    let mut data = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut data)
        .map_err(|e| AcquireError::Fetch {
            url: url.into(),
            message: format!("read body: {e}"),
        })?;

    tracing::info!(bytes = data.len(), "emoji feed downloaded");
    Ok(data)
}

/// Run the analysis program over `artifact`, capturing its stdout into
/// `analysis.output` inside `workdir`. Returns the capture's path.
pub fn run_analysis(
    analysis: &AnalysisConfig,
    workdir: &Path,
    artifact: &str,
) -> AcquireResult<PathBuf> {
    let analysis_error = |message: String| AcquireError::Analysis {
        program: analysis.program.clone(),
        message,
    };

    let output = workdir.join(&analysis.output);
    tracing::info!(
        program = %analysis.program,
        artifact,
        output = %output.display(),
        "running analysis"
    );

    // Stdout is staged next to the target and only kept on success.
    let staged = NamedTempFile::new_in(workdir)
        .map_err(|e| analysis_error(format!("stage capture in {}: {e}", workdir.display())))?;
    let capture = staged
        .reopen()
        .map_err(|e| analysis_error(format!("open staged capture: {e}")))?;

    let status = Command::new(&analysis.program)
        .args(&analysis.args)
        .arg(artifact)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::from(capture))
        .status()
        .map_err(|e| analysis_error(format!("failed to spawn: {e}")))?;
    if !status.success() {
        return Err(analysis_error(format!("exited with {status}")));
    }
    staged
        .persist(&output)
        .map_err(|e| analysis_error(format!("write {}: {}", output.display(), e.error)))?;

    tracing::info!(output = %output.display(), "analysis written");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_path_needs_rebuild() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(needs_rebuild(&dir.path().join("missing.html"), false).unwrap());
    }

    #[test]
    fn existing_path_is_kept_without_refresh() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("emoji-dictionary.html");
        std::fs::write(&file, "old").unwrap();
        assert!(!needs_rebuild(&file, false).unwrap());
        assert!(file.exists());
    }

    #[test]
    fn staleness_never_touches_the_artifact() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("emoji-dictionary.html");
        assert!(is_stale(&file, false));

        std::fs::write(&file, "old").unwrap();
        assert!(!is_stale(&file, false));
        assert!(is_stale(&file, true));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "old");
    }

    #[test]
    fn refresh_removes_files_and_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("emoji-dictionary.html");
        std::fs::write(&file, "old").unwrap();
        assert!(needs_rebuild(&file, true).unwrap());
        assert!(!file.exists());

        let checkout = dir.path().join("noto-emoji");
        std::fs::create_dir_all(checkout.join("svg")).unwrap();
        std::fs::write(checkout.join("svg/emoji_u1f600.svg"), "<svg/>").unwrap();
        assert!(needs_rebuild(&checkout, true).unwrap());
        assert!(!checkout.exists());
    }

    #[test]
    fn feed_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("emoji.json");
        std::fs::write(&path, b"{}").unwrap();
        assert_eq!(load_feed(&FeedLocation::File(path)).unwrap(), b"{}");
    }

    #[test]
    fn missing_feed_file_is_read_error() {
        let err = load_feed(&FeedLocation::File("/nonexistent/emoji.json".into())).unwrap_err();
        assert!(matches!(
            err,
            crate::error::IconsetError::Source(SourceError::Read { .. })
        ));
    }

    #[test]
    fn missing_analysis_program_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let analysis = AnalysisConfig {
            program: "definitely-not-an-installed-analyzer".into(),
            ..Default::default()
        };
        assert!(matches!(
            run_analysis(&analysis, dir.path(), "noto-emoji-iconset.html"),
            Err(AcquireError::Analysis { .. })
        ));
        assert!(!dir.path().join("analysis.json").exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn failed_analysis_keeps_previous_capture() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("analysis.json"), "previous").unwrap();
        let analysis = AnalysisConfig {
            program: "false".into(),
            args: Vec::new(),
            output: "analysis.json".into(),
        };
        assert!(matches!(
            run_analysis(&analysis, dir.path(), "noto-emoji-iconset.html"),
            Err(AcquireError::Analysis { .. })
        ));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("analysis.json")).unwrap(),
            "previous"
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn analysis_stdout_is_captured() {
        let dir = tempfile::TempDir::new().unwrap();
        let analysis = AnalysisConfig {
            program: "echo".into(),
            args: vec!["analyzed".into()],
            output: "analysis.json".into(),
        };
        let output = run_analysis(&analysis, dir.path(), "noto-emoji-iconset.html").unwrap();
        assert_eq!(
            std::fs::read_to_string(output).unwrap(),
            "analyzed noto-emoji-iconset.html\n"
        );
    }
}
