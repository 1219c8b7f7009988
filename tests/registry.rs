use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Barrier};
use std::thread;

use moosefs_volume_plugin::error::VolumeError;
use moosefs_volume_plugin::storage::DEFAULT_MARKER;
use moosefs_volume_plugin::volume::{ROOT_OPTION, Scope};
use moosefs_volume_plugin::{MooseFsProbe, VolumeRegistry};
use tempfile::TempDir;

// Helper to build a registry over a scratch root
fn setup() -> (TempDir, Arc<VolumeRegistry>) {
    let tmp = TempDir::new().unwrap();
    let registry = VolumeRegistry::new(tmp.path(), Arc::new(MooseFsProbe::default()));
    (tmp, Arc::new(registry))
}

// Pre-create a backing directory that looks like a MooseFS mount
fn fake_mount(path: &Path) {
    fs::create_dir_all(path).unwrap();
    fs::write(path.join(DEFAULT_MARKER), b"").unwrap();
}

fn no_opts() -> HashMap<String, String> {
    HashMap::new()
}

#[test]
fn concurrent_creates_of_distinct_names() {
    let (tmp, registry) = setup();
    let names: Vec<String> = (0..8).map(|i| format!("vol{i}")).collect();
    for name in &names {
        fake_mount(&tmp.path().join(name));
    }

    let barrier = Arc::new(Barrier::new(names.len()));
    let handles: Vec<_> = names
        .iter()
        .cloned()
        .map(|name| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.create(&name, &no_opts())
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }
    assert_eq!(registry.len(), names.len());
    for name in &names {
        assert!(registry.get(name).is_ok());
    }
}

#[test]
fn concurrent_creates_of_same_name() {
    let (tmp, registry) = setup();
    fake_mount(&tmp.path().join("shared"));

    for _ in 0..20 {
        registry.remove("shared");

        let barrier = Arc::new(Barrier::new(2));
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    registry.create("shared", &no_opts())
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let successes = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(VolumeError::AlreadyExists(_))))
            .count();

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.path("shared").unwrap(), tmp.path().join("shared"));
    }
}

#[test]
fn remove_forgets_volume_but_keeps_directory() {
    let (tmp, registry) = setup();
    let backing = tmp.path().join("data");
    fake_mount(&backing);
    fs::write(backing.join("payload"), b"keep me").unwrap();

    registry.create("data", &no_opts()).unwrap();
    registry.remove("data");

    assert!(matches!(
        registry.get("data"),
        Err(VolumeError::UnknownVolume(_))
    ));
    assert!(backing.is_dir());
    assert_eq!(fs::read(backing.join("payload")).unwrap(), b"keep me");
}

#[test]
fn create_without_marker_is_rejected() {
    let (tmp, registry) = setup();

    let err = registry.create("plain", &no_opts()).unwrap_err();

    assert!(matches!(err, VolumeError::InvalidMount(ref p) if *p == tmp.path().join("plain")));
    assert!(registry.get("plain").is_err());
    assert!(registry.list().is_empty());
}

#[test]
fn mount_fails_after_filesystem_goes_away() {
    let (tmp, registry) = setup();
    let backing = tmp.path().join("data");
    fake_mount(&backing);

    registry.create("data", &no_opts()).unwrap();
    assert_eq!(registry.mount("data").unwrap(), backing);

    fs::remove_file(backing.join(DEFAULT_MARKER)).unwrap();

    let err = registry.mount("data").unwrap_err();
    assert!(matches!(err, VolumeError::InvalidMount(_)));
    let volume = registry.get("data").unwrap();
    assert_eq!(volume.path(), backing.as_path());
}

#[test]
fn list_returns_exactly_registered_volumes() {
    let (tmp, registry) = setup();
    fake_mount(&tmp.path().join("a"));
    fake_mount(&tmp.path().join("b"));

    registry.create("a", &no_opts()).unwrap();
    registry.create("b", &no_opts()).unwrap();
    let _ = registry.create("c", &no_opts());

    let listed: HashSet<(String, PathBuf)> = registry
        .list()
        .iter()
        .map(|v| (v.name().to_string(), v.path().to_path_buf()))
        .collect();
    let expected: HashSet<(String, PathBuf)> = [
        ("a".to_string(), tmp.path().join("a")),
        ("b".to_string(), tmp.path().join("b")),
    ]
    .into_iter()
    .collect();

    assert_eq!(listed, expected);
}

#[test]
fn root_option_places_volume_elsewhere() {
    let (_tmp, registry) = setup();
    let other = TempDir::new().unwrap();
    fake_mount(&other.path().join("data"));

    let mut opts = HashMap::new();
    opts.insert(
        ROOT_OPTION.to_string(),
        other.path().to_string_lossy().to_string(),
    );
    registry.create("data", &opts).unwrap();

    let volume = registry.get("data").unwrap();
    assert_eq!(volume.root(), other.path());
    assert_eq!(volume.path(), other.path().join("data"));
}

#[test]
fn unmount_has_no_effect() {
    let (tmp, registry) = setup();
    let backing = tmp.path().join("data");
    fake_mount(&backing);
    registry.create("data", &no_opts()).unwrap();

    registry.unmount("data").unwrap();
    registry.unmount("never-created").unwrap();

    assert_eq!(registry.len(), 1);
    assert!(backing.join(DEFAULT_MARKER).exists());
    assert!(registry.mount("data").is_ok());
}

#[test]
fn capabilities_ignore_contents() {
    let (tmp, registry) = setup();
    assert_eq!(registry.capabilities().scope, Scope::Global);

    fake_mount(&tmp.path().join("data"));
    registry.create("data", &no_opts()).unwrap();
    assert_eq!(registry.capabilities().scope, Scope::Global);
}
