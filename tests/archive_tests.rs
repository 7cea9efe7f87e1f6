//! Tests for archive extraction.

use mlutilz::archive::{
    extract_bz2, extract_gz, extract_tar, extract_zip, extract_zip_with, TarCompression,
};
use mlutilz::Error;

mod common;
use common::helpers::*;

#[tokio::test]
async fn test_extract_tar_gz() {
    init_tracing();
    let temp_dir = create_temp_dir();
    let archive = create_tar_gz(temp_dir.path(), "cora.tgz");
    let folder = temp_dir.path().join("out");

    extract_tar(&archive, &folder, "r:gz").await.unwrap();
    assert_archive_extracted(&folder);
}

#[tokio::test]
async fn test_extract_tar_bz2() {
    let temp_dir = create_temp_dir();
    let archive = create_tar_bz2(temp_dir.path(), "cora.tar.bz2");
    let folder = temp_dir.path().join("out");

    extract_tar(&archive, &folder, "r:bz2").await.unwrap();
    assert_archive_extracted(&folder);
}

#[tokio::test]
async fn test_extract_tar_auto_detect() {
    let temp_dir = create_temp_dir();
    let gz = create_tar_gz(temp_dir.path(), "a.tgz");
    let bz = create_tar_bz2(temp_dir.path(), "b.tbz");
    let plain = create_tar(temp_dir.path(), "c.tar");

    for (archive, out) in [(gz, "gz"), (bz, "bz"), (plain, "plain")] {
        let folder = temp_dir.path().join(out);
        extract_tar(&archive, &folder, "r").await.unwrap();
        assert_archive_extracted(&folder);
    }
}

#[tokio::test]
async fn test_extract_tar_wrong_mode_fails() {
    let temp_dir = create_temp_dir();
    let archive = create_tar_gz(temp_dir.path(), "cora.tgz");

    // A gzip stream read as a plain tar does not parse.
    let result = extract_tar(&archive, temp_dir.path().join("out"), "r:").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_extract_tar_unsupported_mode() {
    let temp_dir = create_temp_dir();
    let archive = create_tar_gz(temp_dir.path(), "cora.tgz");

    let err = extract_tar(&archive, temp_dir.path(), "r:xz").await.unwrap_err();
    assert!(matches!(err, Error::UnsupportedArchive(_)));
    assert!("w:gz".parse::<TarCompression>().is_err());
}

#[tokio::test]
async fn test_extract_zip_local() {
    let temp_dir = create_temp_dir();
    let archive = create_zip(temp_dir.path(), "cora.zip");
    let folder = temp_dir.path().join("out");

    extract_zip(&archive, &folder).await.unwrap();
    assert_archive_extracted(&folder);
}

#[tokio::test]
async fn test_extract_zip_corrupt() {
    let temp_dir = create_temp_dir();
    let archive = create_temp_file(temp_dir.path(), "broken.zip", b"not a zip archive");

    let err = extract_zip(&archive, temp_dir.path().join("out")).await.unwrap_err();
    assert!(matches!(err, Error::Archive { .. }));
}

#[tokio::test]
async fn test_extract_zip_from_remote() {
    let (fs, store) = create_memory_fs();
    put_object(&store, "raw/cora.zip", &zip_bytes()).await;
    let temp_dir = create_temp_dir();
    let folder = temp_dir.path().join("out");

    extract_zip_with(&fs, "gs://test-bucket/raw/cora.zip", &folder)
        .await
        .unwrap();
    assert_archive_extracted(&folder);
}

#[tokio::test]
async fn test_extract_zip_to_remote() {
    let (fs, store) = create_memory_fs();
    let temp_dir = create_temp_dir();
    let archive = create_zip(temp_dir.path(), "cora.zip");

    extract_zip_with(&fs, &archive, "gs://test-bucket/extracted")
        .await
        .unwrap();
    for (name, content) in archive_entries() {
        let key = format!("extracted/{}", name);
        assert_eq!(get_object(&store, &key).await, content);
    }
}

#[tokio::test]
async fn test_extract_gz() {
    let temp_dir = create_temp_dir();
    let content = create_test_content(10_000);
    let archive = create_temp_file(temp_dir.path(), "edges.csv.gz", &gzip(&content));
    let folder = temp_dir.path().join("out");

    let output = extract_gz(&archive, &folder).await.unwrap();
    assert_eq!(output, folder.join("edges.csv"));
    assert_file_content(&output, &content);
}

#[tokio::test]
async fn test_extract_bz2() {
    let temp_dir = create_temp_dir();
    let content = create_test_content(10_000);
    let archive = create_temp_file(temp_dir.path(), "edges.csv.bz2", &bzip(&content));

    let output = extract_bz2(&archive, temp_dir.path()).await.unwrap();
    assert_eq!(output, temp_dir.path().join("edges.csv"));
    assert_file_content(&output, &content);
}

#[tokio::test]
async fn test_extract_gz_without_extension() {
    let temp_dir = create_temp_dir();
    let archive = create_temp_file(temp_dir.path(), "edges", &gzip(b"a,b"));

    let err = extract_gz(&archive, temp_dir.path()).await.unwrap_err();
    assert!(matches!(err, Error::UnsupportedArchive(_)));
}

#[tokio::test]
async fn test_extract_gz_corrupt() {
    let temp_dir = create_temp_dir();
    let archive = create_temp_file(temp_dir.path(), "edges.csv.gz", b"plain text");

    let result = extract_gz(&archive, temp_dir.path().join("out")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_tar_entry_cannot_escape_folder() {
    let temp_dir = create_temp_dir();
    let archive = create_temp_file(
        temp_dir.path(),
        "evil.tar",
        &tar_with_raw_entry("../escape.txt", b"outside"),
    );
    let folder = temp_dir.path().join("out");

    // The unsafe entry is skipped.
    extract_tar(&archive, &folder, "r:").await.unwrap();
    assert!(!temp_dir.path().join("escape.txt").exists());
}

#[tokio::test]
async fn test_zip_entry_cannot_escape_folder() {
    let temp_dir = create_temp_dir();
    let archive = create_temp_file(
        temp_dir.path(),
        "evil.zip",
        &zip_with_entry("../escape.txt", b"outside"),
    );
    let folder = temp_dir.path().join("out");

    // Rejected or skipped, never written beside the folder.
    let _ = extract_zip(&archive, &folder).await;
    assert!(!temp_dir.path().join("escape.txt").exists());
}
