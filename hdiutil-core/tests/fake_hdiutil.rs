// hdiutil-core/tests/fake_hdiutil.rs
//
// End-to-end tests against a stand-in hdiutil: a shell script that records
// the argument vector it was handed and prints whatever output the test
// calls for. Exercises composition, execution and extraction together
// without touching the real tool.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use hdiutil_core::attach::{AutoFsck, MountPoint, Verify};
use hdiutil_core::create::ImageType;
use hdiutil_core::detach::Force;
use hdiutil_core::options::Quiet;
use hdiutil_core::{Error, FileSystem, Hdiutil, SizeSpec, Verb};

fn fake_tool(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("hdiutil");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();

    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

#[test]
fn attach_extracts_the_assigned_device_node() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(
        dir.path(),
        "printf '/dev/disk4\\n/dev/disk4s1\\tApple_HFS\\t/Volumes/test\\n'",
    );

    let node = Hdiutil::with_binary(tool)
        .attach("test.sparsebundle", &[])
        .unwrap();

    assert_eq!(node.as_str(), "/dev/disk4");
    assert_eq!(node.raw_device_node(), "/dev/rdisk4");
    assert_eq!(node.device_number(), 4);
}

#[test]
fn attach_passes_the_composed_argument_vector() {
    let dir = tempfile::tempdir().unwrap();
    let record = dir.path().join("argv");
    let tool = fake_tool(
        dir.path(),
        &format!("printf '%s' \"$*\" > '{}'\necho /dev/disk5", record.display()),
    );

    let node = Hdiutil::with_binary(tool)
        .attach(
            "test.sparsebundle",
            &[
                &Verify(false),
                &AutoFsck(false),
                &MountPoint("./test".to_string()),
            ],
        )
        .unwrap();

    assert_eq!(node.device_number(), 5);
    assert_eq!(
        fs::read_to_string(&record).unwrap(),
        "attach test.sparsebundle -noverify -noautofsck -mountpoint ./test"
    );
}

#[test]
fn quiet_attach_yields_an_empty_node() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(dir.path(), "exit 0");

    let node = Hdiutil::with_binary(tool)
        .attach("test.sparsebundle", &[&Quiet(true)])
        .unwrap();

    assert!(node.is_empty());
    assert_eq!(node.device_number(), 0);
}

#[test]
fn failed_commands_surface_the_tool_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(
        dir.path(),
        "echo 'hdiutil: attach failed - no mountable file systems' >&2\nexit 1",
    );

    let err = Hdiutil::with_binary(tool)
        .attach("broken.dmg", &[])
        .unwrap_err();

    match err {
        Error::CommandFailed { verb, status, stderr } => {
            assert_eq!(verb, Verb::Attach);
            assert_eq!(status.code(), Some(1));
            assert!(stderr.contains("no mountable file systems"));
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[test]
fn create_and_detach_pass_their_argument_vectors() {
    let dir = tempfile::tempdir().unwrap();
    let record = dir.path().join("argv");
    let tool = fake_tool(
        dir.path(),
        &format!("printf '%s' \"$*\" > '{}'", record.display()),
    );
    let hdiutil = Hdiutil::with_binary(tool);

    hdiutil
        .create(
            "test",
            &SizeSpec::Megabytes(20),
            &[&FileSystem::HfsPlus, &ImageType::SparseBundle],
        )
        .unwrap();
    assert_eq!(
        fs::read_to_string(&record).unwrap(),
        "create -megabytes 20 -fs HFS+ -type SPARSEBUNDLE test"
    );

    hdiutil.detach("/dev/disk5", &[&Force(true)]).unwrap();
    assert_eq!(
        fs::read_to_string(&record).unwrap(),
        "detach /dev/disk5 -force"
    );
}

#[test]
fn handles_are_reusable_across_operations() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(dir.path(), "echo /dev/disk7");
    let hdiutil = Hdiutil::with_binary(tool);

    let first = hdiutil.attach("a.dmg", &[]).unwrap();
    let second = hdiutil.attach("b.dmg", &[]).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.as_str(), "/dev/disk7");
}
