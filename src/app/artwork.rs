//! Cover art pipeline: copy or download the image into the cache slot, then
//! turn it into terminal rows with an external renderer.

use std::env;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};
use std::time::Duration;

use thiserror::Error;

use crate::app::error::StartupError;

/// The one reusable file holding the current artwork
pub const CACHE_FILE_NAME: &str = "current_artwork.png";

const USER_AGENT: &str = concat!("spotify-display/", env!("CARGO_PKG_VERSION"));
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Output profile passed to the renderer: 18x18 cells, block symbols, 256 colors
const RENDERER_ARGS: [&str; 5] = [
    "--format=symbols",
    "--size=18x18",
    "--symbols=block",
    "--colors=256",
    "--animate=off",
];

const CACHE_DIR_NAME: &str = "spotify-display";

/// Renderer diagnostics kept in a log line
const STDERR_LIMIT: usize = 512;

/// Create the artwork cache directory under the user's cache root
pub fn ensure_cache_dir() -> Result<PathBuf, StartupError> {
    let root = dirs::cache_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".cache")))
        .ok_or(StartupError::NoCacheDir)?;
    let dir = root.join(CACHE_DIR_NAME);

    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|source| StartupError::CacheDir {
            path: dir.clone(),
            source,
        })?;
        log::info!("Created cache directory: {}", dir.display());
    }
    Ok(dir)
}

/// Fetched artwork ready to be painted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artwork {
    pub file: PathBuf,
    /// Renderer output, one entry per terminal row
    pub rows: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ArtworkError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write cache slot {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("artwork request failed: {0}")]
    Http(#[source] ureq::Error),
    #[error("artwork server responded with status {0}")]
    HttpStatus(u16),
    #[error("renderer '{0}' not found in PATH")]
    RendererUnavailable(String),
    #[error("failed to run renderer: {0}")]
    RendererSpawn(#[source] io::Error),
    #[error("artwork task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Renderer failures are logged only; the previous artwork stays on screen.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{renderer} exited with {status}: {stderr}")]
    NonZeroExit {
        renderer: String,
        status: ExitStatus,
        stderr: String,
    },
}

impl RenderError {
    fn from_output(renderer: &str, output: &Output) -> Self {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        let stderr = if stderr.is_empty() {
            "no diagnostics".to_string()
        } else {
            stderr.chars().take(STDERR_LIMIT).collect()
        };
        RenderError::NonZeroExit {
            renderer: renderer.to_string(),
            status: output.status,
            stderr,
        }
    }
}

/// Produces renderable artwork for an art reference
pub trait ArtworkSource {
    async fn load(&self, reference: &str) -> Result<Artwork, ArtworkError>;
}

#[derive(Clone)]
pub struct ChafaArtwork {
    cache_file: PathBuf,
    renderer: String,
    agent: ureq::Agent,
}

impl ChafaArtwork {
    pub fn new(cache_dir: &Path, renderer: impl Into<String>) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(FETCH_TIMEOUT))
            .build()
            .into();

        Self {
            cache_file: cache_dir.join(CACHE_FILE_NAME),
            renderer: renderer.into(),
            agent,
        }
    }

    /// Copy a local file or download a remote one into the cache slot.
    ///
    /// Bytes land in a sibling `.part` file first and are renamed over the
    /// slot, so the renderer never reads a partial image.
    pub fn fetch(&self, reference: &str) -> Result<PathBuf, ArtworkError> {
        let partial = self.cache_file.with_extension("png.part");

        let result = self
            .stream_into(reference, &partial)
            .and_then(|()| {
                fs::rename(&partial, &self.cache_file).map_err(|source| ArtworkError::Write {
                    path: self.cache_file.clone(),
                    source,
                })
            });

        if result.is_err() {
            let _ = fs::remove_file(&partial);
        }
        result?;

        log::debug!("Cached artwork {} at {}", reference, self.cache_file.display());
        Ok(self.cache_file.clone())
    }

    fn stream_into(&self, reference: &str, destination: &Path) -> Result<(), ArtworkError> {
        let write_error = |source| ArtworkError::Write {
            path: destination.to_path_buf(),
            source,
        };
        let mut output = File::create(destination).map_err(write_error)?;

        if reference.starts_with('/') {
            let read_error = |source| ArtworkError::Read {
                path: PathBuf::from(reference),
                source,
            };
            let mut input = File::open(reference).map_err(read_error)?;
            io::copy(&mut input, &mut output).map_err(read_error)?;
        } else {
            let mut response = self
                .agent
                .get(reference)
                .header("User-Agent", USER_AGENT)
                .call()
                .map_err(|e| match e {
                    ureq::Error::StatusCode(code) => ArtworkError::HttpStatus(code),
                    other => ArtworkError::Http(other),
                })?;
            io::copy(&mut response.body_mut().as_reader(), &mut output).map_err(write_error)?;
        }

        Ok(())
    }

    /// Run the renderer against an image and collect its rows.
    ///
    /// A non-zero exit is logged and yields no rows.
    pub fn rasterize(&self, image: &Path) -> Result<Vec<String>, ArtworkError> {
        let renderer = find_renderer(&self.renderer)
            .ok_or_else(|| ArtworkError::RendererUnavailable(self.renderer.clone()))?;

        let output = Command::new(&renderer)
            .args(RENDERER_ARGS)
            .arg(image)
            .stdin(Stdio::null())
            .output()
            .map_err(ArtworkError::RendererSpawn)?;

        if !output.status.success() {
            let err = RenderError::from_output(&self.renderer, &output);
            log::warn!("Artwork render failed: {}", err);
            return Ok(Vec::new());
        }

        Ok(split_rows(&output.stdout))
    }
}

impl ArtworkSource for ChafaArtwork {
    async fn load(&self, reference: &str) -> Result<Artwork, ArtworkError> {
        let pipeline = self.clone();
        let reference = reference.to_string();

        tokio::task::spawn_blocking(move || -> Result<Artwork, ArtworkError> {
            let file = pipeline.fetch(&reference)?;
            let rows = pipeline.rasterize(&file)?;
            Ok(Artwork { file, rows })
        })
        .await?
    }
}

/// Locate an executable by name in `PATH`, or accept an explicit path
pub fn find_renderer(name: &str) -> Option<PathBuf> {
    if name.contains('/') {
        let path = PathBuf::from(name);
        return is_executable(&path).then_some(path);
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

fn split_rows(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_local_copies_into_slot() {
        let source_dir = tempfile::tempdir().unwrap();
        let cache_dir = tempfile::tempdir().unwrap();
        let cover = source_dir.path().join("cover.jpg");
        fs::write(&cover, b"first image").unwrap();

        let pipeline = ChafaArtwork::new(cache_dir.path(), "chafa");
        let cached = pipeline.fetch(cover.to_str().unwrap()).unwrap();

        assert_eq!(cached, cache_dir.path().join(CACHE_FILE_NAME));
        assert_eq!(fs::read(&cached).unwrap(), b"first image");
    }

    #[test]
    fn test_fetch_overwrites_single_slot() {
        let source_dir = tempfile::tempdir().unwrap();
        let cache_dir = tempfile::tempdir().unwrap();
        let first = source_dir.path().join("a.png");
        let second = source_dir.path().join("b.png");
        fs::write(&first, b"aaaa").unwrap();
        fs::write(&second, b"bb").unwrap();

        let pipeline = ChafaArtwork::new(cache_dir.path(), "chafa");
        pipeline.fetch(first.to_str().unwrap()).unwrap();
        let cached = pipeline.fetch(second.to_str().unwrap()).unwrap();

        assert_eq!(fs::read(&cached).unwrap(), b"bb");
        assert_eq!(fs::read_dir(cache_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_fetch_missing_local_file_fails_cleanly() {
        let cache_dir = tempfile::tempdir().unwrap();
        let pipeline = ChafaArtwork::new(cache_dir.path(), "chafa");

        let err = pipeline.fetch("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, ArtworkError::Read { .. }));
        assert_eq!(fs::read_dir(cache_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_renderer_fails_fast() {
        let cache_dir = tempfile::tempdir().unwrap();
        let pipeline = ChafaArtwork::new(cache_dir.path(), "no-such-renderer-binary");

        let err = pipeline.rasterize(Path::new("/tmp/whatever.png")).unwrap_err();
        assert!(matches!(err, ArtworkError::RendererUnavailable(name) if name == "no-such-renderer-binary"));
    }

    #[test]
    fn test_split_rows() {
        assert_eq!(split_rows(b"ab\r\ncd\n"), vec!["ab".to_string(), "cd".to_string()]);
        assert!(split_rows(b"").is_empty());
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("renderer.sh");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_rasterize_collects_rows() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "printf 'row one\\nrow two\\n'");
        let pipeline = ChafaArtwork::new(dir.path(), script.to_str().unwrap());

        let rows = pipeline.rasterize(Path::new("/tmp/whatever.png")).unwrap();
        assert_eq!(rows, vec!["row one".to_string(), "row two".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_rasterize_nonzero_exit_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "echo partial; echo 'bad image' >&2; exit 3");
        let pipeline = ChafaArtwork::new(dir.path(), script.to_str().unwrap());

        let rows = pipeline.rasterize(Path::new("/tmp/whatever.png")).unwrap();
        assert!(rows.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_render_error_carries_trimmed_stderr() {
        let output = Command::new("sh")
            .args(["-c", "printf '\\n  chafa: unknown format  \\n\\n' >&2; exit 3"])
            .output()
            .unwrap();
        let message = RenderError::from_output("chafa", &output).to_string();
        assert_eq!(message, "chafa exited with exit status: 3: chafa: unknown format");

        let silent = Command::new("sh").args(["-c", "exit 1"]).output().unwrap();
        let message = RenderError::from_output("chafa", &silent).to_string();
        assert!(message.ends_with(": no diagnostics"));

        let noisy = Command::new("sh")
            .args(["-c", "yes x | head -c 4000 >&2; exit 1"])
            .output()
            .unwrap();
        let RenderError::NonZeroExit { stderr, .. } = RenderError::from_output("chafa", &noisy);
        assert_eq!(stderr.chars().count(), STDERR_LIMIT);
    }

    /// Serve one canned HTTP response on localhost; the thread returns the request it saw
    fn serve_once(response: &'static str) -> (String, std::thread::JoinHandle<String>) {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (base, handle)
    }

    #[test]
    fn test_fetch_remote_error_status_leaves_no_partial_file() {
        let (base, server) =
            serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        let cache_dir = tempfile::tempdir().unwrap();
        let pipeline = ChafaArtwork::new(cache_dir.path(), "chafa");

        let err = pipeline.fetch(&format!("{}/image/missing", base)).unwrap_err();
        assert!(matches!(err, ArtworkError::HttpStatus(404)), "got {err:?}");
        assert_eq!(fs::read_dir(cache_dir.path()).unwrap().count(), 0);

        let request = server.join().unwrap().to_lowercase();
        assert!(request.starts_with("get /image/missing http/1.1"));
        assert!(request.contains(&format!("user-agent: {}", USER_AGENT.to_lowercase())));
        assert!(request.contains("user-agent: spotify-display/"));
    }

    #[test]
    fn test_fetch_remote_writes_body_into_slot() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: image/jpeg\r\nContent-Length: 10\r\nConnection: close\r\n\r\njpeg bytes",
        );
        let cache_dir = tempfile::tempdir().unwrap();
        let pipeline = ChafaArtwork::new(cache_dir.path(), "chafa");

        let cached = pipeline.fetch(&format!("{}/image/cover", base)).unwrap();
        server.join().unwrap();

        assert_eq!(cached, cache_dir.path().join(CACHE_FILE_NAME));
        assert_eq!(fs::read(&cached).unwrap(), b"jpeg bytes");
        assert_eq!(fs::read_dir(cache_dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_load_missing_renderer_reports_error() {
        let source_dir = tempfile::tempdir().unwrap();
        let cache_dir = tempfile::tempdir().unwrap();
        let cover = source_dir.path().join("cover.png");
        fs::write(&cover, b"png").unwrap();

        let pipeline = ChafaArtwork::new(cache_dir.path(), "no-such-renderer-binary");
        let err = pipeline.load(cover.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, ArtworkError::RendererUnavailable(_)));
    }
}
