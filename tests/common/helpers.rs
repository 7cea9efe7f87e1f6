use std::fs;
use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};

use mlutilz::fs::{FileSystem, RemoteUri};
use mlutilz::progress::ProgressBarOpts;
use mlutilz::{Download, HttpClientConfig, UrlDownloaderBuilder};
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tempfile::TempDir;
use tokio::net::TcpListener;

// Common test constants
pub const TEST_DOMAIN: &str = "http://domain.com/file.zip";
pub const TEST_UNREACHABLE_URL: &str = "http://mlutilz.invalid/file.zip";
pub const TEST_HTTPBIN_URL: &str = "https://httpbin.org/bytes/1024";
pub const TEST_USER_AGENT: &str = "mlutilz-test-agent";
pub const TEST_BUCKET: &str = "gs://test-bucket";
pub const TEST_SERVED_BODY: &[u8] = b"payload";

/// Install a tracing subscriber once per test binary.
///
/// Set `RUST_LOG=mlutilz=debug` to see the crate's logs.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Creates a test URL for download testing
pub fn create_test_url(filename: &str) -> String {
    format!("https://example.com/{}", filename)
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// Asserts that a file exists at the given path
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File should exist at path: {:?}", path);
}

/// Asserts that a file has the expected content
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let content = fs::read(path).expect("Failed to read file");
    assert_eq!(content, expected, "Content mismatch at path: {:?}", path);
}

// === Dataset Layout Helpers ===

/// Lays out a small dataset directory:
///
/// ```text
/// root/
///   _MANIFEST.json
///   part-0.parquet
///   part-1.parquet
///   notes.txt
///   nested/part-2.parquet
/// ```
pub fn create_dataset_layout(root: &Path) {
    create_temp_file(root, "_MANIFEST.json", b"{}");
    create_temp_file(root, "part-0.parquet", b"shard-0");
    create_temp_file(root, "part-1.parquet", b"shard-1");
    create_temp_file(root, "notes.txt", b"notes");
    create_temp_file(root, "nested/part-2.parquet", b"shard-2");
}

// === Object Store Helpers ===

/// Parses a remote URI, panicking on malformed test input.
pub fn remote(uri: &str) -> RemoteUri {
    RemoteUri::parse(uri).expect("Invalid remote URI")
}

/// A filesystem whose `TEST_BUCKET` is backed by an in-memory store.
pub fn create_memory_fs() -> (FileSystem, Arc<InMemory>) {
    let store = Arc::new(InMemory::new());
    let fs = FileSystem::default().with_store(&remote(TEST_BUCKET), store.clone());
    (fs, store)
}

/// Writes `content` to `key` inside the in-memory bucket.
pub async fn put_object(store: &InMemory, key: &str, content: &[u8]) {
    store
        .put(&ObjectPath::from(key), PutPayload::from(content.to_vec()))
        .await
        .expect("Failed to put object");
}

/// Reads the object at `key` from the in-memory bucket.
pub async fn get_object(store: &InMemory, key: &str) -> Vec<u8> {
    store
        .get(&ObjectPath::from(key))
        .await
        .expect("Failed to get object")
        .bytes()
        .await
        .expect("Failed to read object")
        .to_vec()
}

/// Puts the same layout as [`create_dataset_layout`] under `prefix`.
pub async fn put_dataset_layout(store: &InMemory, prefix: &str) {
    for (name, content) in [
        ("_MANIFEST.json", "{}"),
        ("part-0.parquet", "shard-0"),
        ("part-1.parquet", "shard-1"),
        ("notes.txt", "notes"),
        ("nested/part-2.parquet", "shard-2"),
    ] {
        put_object(store, &format!("{}/{}", prefix, name), content.as_bytes()).await;
    }
}

// === Archive Helpers ===

/// Entries used by the archive builders, as (path, content) pairs.
pub fn archive_entries() -> Vec<(&'static str, &'static [u8])> {
    vec![
        ("cora/cora.content", &b"paper features"[..]),
        ("cora/cora.cites", &b"citations"[..]),
        ("README", &b"readme"[..]),
    ]
}

fn tar_bytes() -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, content) in archive_entries() {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, name, content)
            .expect("Failed to append tar entry");
    }
    builder.into_inner().expect("Failed to finish tar archive")
}

/// Writes a plain tar archive with [`archive_entries`].
pub fn create_tar(dir: &Path, filename: &str) -> PathBuf {
    create_temp_file(dir, filename, &tar_bytes())
}

/// Writes a gzip-compressed tar archive with [`archive_entries`].
pub fn create_tar_gz(dir: &Path, filename: &str) -> PathBuf {
    create_temp_file(dir, filename, &gzip(&tar_bytes()))
}

/// Writes a bzip2-compressed tar archive with [`archive_entries`].
pub fn create_tar_bz2(dir: &Path, filename: &str) -> PathBuf {
    create_temp_file(dir, filename, &bzip(&tar_bytes()))
}

/// Builds an in-memory ZIP archive with [`archive_entries`].
pub fn zip_bytes() -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);
    for (name, content) in archive_entries() {
        writer.start_file(name, options).expect("Failed to start zip entry");
        writer.write_all(content).expect("Failed to write zip entry");
    }
    writer.finish().expect("Failed to finish zip archive").into_inner()
}

/// Writes a ZIP archive with [`archive_entries`].
pub fn create_zip(dir: &Path, filename: &str) -> PathBuf {
    create_temp_file(dir, filename, &zip_bytes())
}

/// A tar archive with one entry whose header name is written verbatim.
///
/// `tar::Builder` refuses names containing `..`, so the name bytes are placed
/// in the GNU header directly.
pub fn tar_with_raw_entry(name: &str, content: &[u8]) -> Vec<u8> {
    let mut header = tar::Header::new_gnu();
    {
        let gnu = header.as_gnu_mut().expect("GNU header");
        gnu.name[..name.len()].copy_from_slice(name.as_bytes());
    }
    header.set_entry_type(tar::EntryType::Regular);
    header.set_size(content.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();

    let mut builder = tar::Builder::new(Vec::new());
    builder
        .append(&header, content)
        .expect("Failed to append tar entry");
    builder.into_inner().expect("Failed to finish tar archive")
}

/// A ZIP archive with one entry named `name`.
pub fn zip_with_entry(name: &str, content: &[u8]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    writer
        .start_file(name, zip::write::SimpleFileOptions::default())
        .expect("Failed to start zip entry");
    writer.write_all(content).expect("Failed to write zip entry");
    writer.finish().expect("Failed to finish zip archive").into_inner()
}

/// Gzip-compresses `content`.
pub fn gzip(content: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(content).expect("Failed to gzip");
    encoder.finish().expect("Failed to finish gzip")
}

/// Bzip2-compresses `content`.
pub fn bzip(content: &[u8]) -> Vec<u8> {
    let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
    encoder.write_all(content).expect("Failed to bzip2");
    encoder.finish().expect("Failed to finish bzip2")
}

/// Asserts that `folder` holds the extracted [`archive_entries`].
pub fn assert_archive_extracted(folder: &Path) {
    for (name, content) in archive_entries() {
        assert_file_content(&folder.join(name), content);
    }
}

// === Download Creation Helpers ===

/// Creates a test download from the common test domain
pub fn create_test_download() -> Download {
    Download::try_from(TEST_DOMAIN).expect("Failed to create test download")
}

// === Local HTTP Server ===

/// Serves `TEST_SERVED_BODY` at `/data/file.bin` on a random local port.
///
/// Every other path answers 404.
pub async fn start_test_server() -> SocketAddr {
    use axum::routing::get;
    use axum::Router;

    let app = Router::new().route("/data/file.bin", get(|| async { TEST_SERVED_BODY }));
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read server address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    addr
}

/// A download for `path` on the local test server.
pub fn create_served_download(addr: SocketAddr, path: &str) -> Download {
    Download::try_from(format!("http://{}{}", addr, path).as_str())
        .expect("Failed to create served download")
}

// === HTTP Configuration Helpers ===

/// Creates test headers with common user agent
pub fn create_test_headers() -> HeaderMap {
    create_test_headers_with_agent(TEST_USER_AGENT)
}

/// Creates test headers with custom user agent
pub fn create_test_headers_with_agent(agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_str(agent).expect("Invalid header value"));
    headers
}

/// Creates a test HTTP client configuration with custom retries
pub fn create_test_http_config_with_retries(retries: u32) -> HttpClientConfig {
    HttpClientConfig {
        retries,
        headers: Some(create_test_headers()),
        ..HttpClientConfig::default()
    }
}

// === Progress Bar Helpers ===

/// Creates custom progress bar options with template and chars
pub fn create_custom_progress_opts(template: &str, chars: &str) -> ProgressBarOpts {
    ProgressBarOpts::new(Some(template.to_string()), Some(chars.to_string()), true, false)
}

/// Asserts that progress bar options are configured correctly
pub fn assert_progress_opts_enabled(opts: &ProgressBarOpts) {
    assert!(opts.is_enabled(), "Progress bar should be enabled");
}

/// Asserts that progress bar options are disabled
pub fn assert_progress_opts_disabled(opts: &ProgressBarOpts) {
    let pb = opts.clone().to_progress_bar(100);
    assert!(pb.is_hidden(), "Progress bar should be disabled");
}

// === Downloader Builder Helpers ===

/// Creates a quiet downloader builder with test headers and few retries
pub fn create_test_downloader_builder() -> UrlDownloaderBuilder {
    UrlDownloaderBuilder::hidden()
        .retries(1)
        .headers(create_test_headers())
}
