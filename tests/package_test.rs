use astra::assets::{AssetGroup, Downloader, InlineText};
use astra::error::{Error, Result};
use astra::package::{package, PackagePlan, PackageReport};
use std::fs::{self, File};
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

struct BundleDownloader(Vec<u8>);

impl Downloader for BundleDownloader {
    fn download(&self, _url: &str) -> Result<Vec<u8>> {
        Ok(self.0.clone())
    }
}

struct OfflineDownloader;

impl Downloader for OfflineDownloader {
    fn download(&self, url: &str) -> Result<Vec<u8>> {
        Err(Error::DownloadStatusError { url: url.to_string(), status: 502 })
    }
}

fn bundle() -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer.start_file("fonts/a.ttf", zip::write::SimpleFileOptions::default()).unwrap();
    writer.write_all(b"font").unwrap();
    writer.finish().unwrap().into_inner()
}

fn project(root: &Path) -> PackagePlan {
    write(&root.join("README.md"), "# Demo\n## Change Log\n- **v1.0.0**\n  - First release\n");
    write(&root.join("LICENSE"), "MIT");
    write(&root.join("docs/guide.md"), "guide");
    write(&root.join("build/Effect.anm2"), "--@Effect");

    let directory = root.join("package");
    let staging = directory.join("tmp");
    PackagePlan {
        clean: true,
        directory,
        archive_name: "Demo".to_string(),
        files: vec![
            root.join("README.md"),
            root.join("LICENSE"),
            root.join("docs"),
            root.join("CHANGELOG.md"),
            root.join("build/Effect.anm2"),
        ],
        asset_groups: vec![AssetGroup {
            staging_dir: staging.join("assets"),
            remote_url: Some("https://example.com/assets.zip".to_string()),
            inline_texts: vec![InlineText {
                file: PathBuf::from("credits.txt"),
                content: "Thanks".to_string(),
            }],
        }],
        notes_document: root.join("README.md"),
    }
}

fn read_entry(archive: &Path, name: &str) -> String {
    let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
    let mut content = String::new();
    zip.by_name(name).unwrap().read_to_string(&mut content).unwrap();
    content
}

#[test_log::test]
fn test_package_layout() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let plan = project(root);
    write(&plan.directory.join("old.zip"), "stale");

    let report = package(&plan, &BundleDownloader(bundle())).unwrap();
    assert_eq!(
        report,
        PackageReport {
            archive: Some(plan.directory.join("Demo.zip")),
            notes: Some(plan.directory.join("release_notes.txt")),
        }
    );
    assert_eq!(entries(&plan.directory), vec!["Demo.zip", "release_notes.txt"]);
    assert_eq!(
        fs::read_to_string(plan.directory.join("release_notes.txt")).unwrap(),
        "## What's Changed\n- First release\n"
    );

    let zip = zip::ZipArchive::new(File::open(plan.directory.join("Demo.zip")).unwrap()).unwrap();
    let mut names: Vec<&str> = zip.file_names().collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "Demo/Effect.anm2",
            "Demo/LICENSE",
            "Demo/README.md",
            "Demo/assets/credits.txt",
            "Demo/assets/fonts/a.ttf",
            "Demo/docs/guide.md",
        ]
    );
    let archive = plan.directory.join("Demo.zip");
    assert_eq!(read_entry(&archive, "Demo/assets/credits.txt"), "Thanks");
    assert_eq!(read_entry(&archive, "Demo/docs/guide.md"), "guide");
}

#[test]
fn test_package_without_changes_writes_no_notes() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let mut plan = project(root);
    plan.notes_document = root.join("missing.md");
    plan.asset_groups.clear();

    let report = package(&plan, &OfflineDownloader).unwrap();
    assert_eq!(report.notes, None);
    assert_eq!(entries(&plan.directory), vec!["Demo.zip"]);
}

#[test]
fn test_package_keeps_existing_directory_without_clean() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let mut plan = project(root);
    plan.clean = false;
    plan.asset_groups.clear();
    write(&plan.directory.join("keep.txt"), "keep");

    package(&plan, &OfflineDownloader).unwrap();
    assert_eq!(entries(&plan.directory), vec!["Demo.zip", "keep.txt", "release_notes.txt"]);
}

#[test]
fn test_download_failure_aborts_before_archiving() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let plan = project(root);

    let result = package(&plan, &OfflineDownloader);
    assert!(matches!(result, Err(Error::DownloadStatusError { status: 502, .. })));
    assert!(!plan.directory.join("Demo.zip").exists());
}

#[test]
fn test_missing_changelog_section_aborts() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let mut plan = project(root);
    plan.asset_groups.clear();
    write(&root.join("README.md"), "# Demo\n");

    let result = package(&plan, &OfflineDownloader);
    assert!(matches!(result, Err(Error::MissingSectionError { .. })));
}
