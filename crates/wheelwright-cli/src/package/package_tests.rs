#![allow(non_snake_case)]

use super::*;
use std::fs;
use tempfile::TempDir;

const METADATA: &str = "Metadata-Version: 2.1\nName: mini_leo\nVersion: 0.1.0\n";

/// Create a project whose compiler output already exists for both OS families.
fn create_project(temp_dir: &TempDir, config: &str) -> ProjectConfig {
    let root = temp_dir.path();
    let release = root.join("rust/target/release");
    fs::create_dir_all(&release).unwrap();
    fs::write(release.join("libmini_leo.so"), b"fake shared object").unwrap();
    fs::write(release.join("mini_leo.dll"), b"fake dll").unwrap();
    fs::create_dir_all(root.join("mini_leo")).unwrap();
    fs::write(root.join("mini_leo/__init__.py"), b"from ._minileo import *\n").unwrap();
    fs::write(root.join("METADATA"), METADATA).unwrap();

    let path = root.join(CONFIG_FILE);
    fs::write(&path, config).unwrap();
    ProjectConfig::from_file(&path).unwrap()
}

const CONFIG: &str = r#"
[package]
name = "mini_leo"

[native]
module = "_minileo"
"#;

#[test]
fn package___linux_host___creates_output_dir_and_wheel() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_project(&temp_dir, CONFIG);
    let host = HostPlatform::from_parts("linux", "x86_64");

    let wheel = package(&config, &host, BuildProfile::Release).unwrap();

    assert_eq!(
        wheel,
        temp_dir
            .path()
            .join("dist/mini_leo-0.1.0-py3-none-linux_x86_64.whl")
    );
    let loader = WheelLoader::open(&wheel).unwrap();
    assert!(loader.list_files().contains(&"mini_leo/_minileo.so".to_string()));
}

#[test]
fn package___windows_host___embeds_pyd() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_project(&temp_dir, CONFIG);
    let host = HostPlatform::from_parts("windows", "x86_64");

    let wheel = package(&config, &host, BuildProfile::Release).unwrap();

    assert!(wheel.ends_with("mini_leo-0.1.0-py3-none-win_amd64.whl"));
    let loader = WheelLoader::open(&wheel).unwrap();
    assert!(loader.list_files().contains(&"mini_leo/_minileo.pyd".to_string()));
}

#[test]
fn package___unsupported_host___fails_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_project(&temp_dir, CONFIG);
    let host = HostPlatform::from_parts("macos", "aarch64");

    let result = package(&config, &host, BuildProfile::Release);

    assert!(result.is_err());
    assert!(!temp_dir.path().join("dist").exists());
}

#[test]
fn package___missing_debug_build___fails_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_project(&temp_dir, CONFIG);
    let host = HostPlatform::from_parts("linux", "x86_64");

    let result = package(&config, &host, BuildProfile::Debug);

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("Library not found"));
    assert!(!temp_dir.path().join("dist").exists());
}

#[test]
fn package___extra_files___are_recorded() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_project(
        &temp_dir,
        r#"
[package]
name = "mini_leo"
files = [{ source = "LICENSE", path = "mini_leo-0.1.0.dist-info/LICENSE" }]

[native]
module = "_minileo"
"#,
    );
    fs::write(temp_dir.path().join("LICENSE"), b"MIT").unwrap();
    let host = HostPlatform::from_parts("linux", "x86_64");

    let wheel = package(&config, &host, BuildProfile::Release).unwrap();

    let mut loader = WheelLoader::open(&wheel).unwrap();
    assert!(loader.verify().unwrap().is_ok());
    assert!(
        loader
            .record()
            .iter()
            .any(|e| e.path == "mini_leo-0.1.0.dist-info/LICENSE")
    );
}

#[test]
fn run___skip_compile___packages_existing_library() {
    let temp_dir = TempDir::new().unwrap();
    create_project(&temp_dir, CONFIG);
    let out = temp_dir.path().join("wheels");

    let host = HostPlatform::current();
    let supported = matches!(host.os(), "linux" | "windows");

    let result = run(BuildOptions {
        config: Some(temp_dir.path().join(CONFIG_FILE).to_string_lossy().to_string()),
        debug: false,
        skip_compile: true,
        output: Some(out.to_string_lossy().to_string()),
    });

    assert_eq!(result.is_ok(), supported);
    if supported {
        assert!(result.unwrap().starts_with(&out));
    }
}

#[test]
fn list___shows_wheel_contents() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_project(&temp_dir, CONFIG);
    let host = HostPlatform::from_parts("linux", "x86_64");
    let wheel = package(&config, &host, BuildProfile::Release).unwrap();

    list(&wheel.to_string_lossy()).unwrap();
}

#[test]
fn verify___valid_wheel___succeeds_in_both_formats() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_project(&temp_dir, CONFIG);
    let host = HostPlatform::from_parts("linux", "x86_64");
    let wheel = package(&config, &host, BuildProfile::Release).unwrap();

    verify(&wheel.to_string_lossy(), false).unwrap();
    verify(&wheel.to_string_lossy(), true).unwrap();
}

#[test]
fn verify___not_a_wheel___fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bogus.whl");
    fs::write(&path, b"not a zip").unwrap();

    assert!(verify(&path.to_string_lossy(), false).is_err());
}

#[test]
fn package___hyphenated_name___uses_underscored_paths() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_project(&temp_dir, "[package]\nname = \"mini-leo\"\n");
    let host = HostPlatform::from_parts("linux", "x86_64");

    let wheel = package(&config, &host, BuildProfile::Release).unwrap();

    assert!(wheel.ends_with("mini_leo-0.1.0-py3-none-linux_x86_64.whl"));
    let files = WheelLoader::open(&wheel).unwrap().list_files();
    assert!(files.contains(&"mini_leo/_mini_leo.so".to_string()));
    assert!(files.contains(&"mini_leo/__init__.py".to_string()));
    assert!(files.iter().all(|f| !f.contains("mini-leo")));
}
