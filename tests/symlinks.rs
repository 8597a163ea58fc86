#![cfg(unix)]

use std::fs;

use pretty_assertions::assert_eq;
use testdirectory::{LinkOptions, Result, TestDirectory};

fn testdirectory() -> (tempfile::TempDir, TestDirectory) {
    let tmpdir = tempfile::tempdir().expect("temporary directory");
    let testdirectory = TestDirectory::from_path(tmpdir.path()).expect("existing directory");
    (tmpdir, testdirectory)
}

#[test]
fn symlink_file_resolves_to_source_content() -> Result<()> {
    let (_tmpdir, testdirectory) = testdirectory();
    let sub1 = testdirectory.mkdir("sub1")?;
    let sub2 = testdirectory.mkdir("sub2")?;

    let ok_path = sub1.write_text("ok.txt", "hello_world")?;
    let link_path = sub2.symlink_file(&ok_path)?;

    assert!(sub2.contains_file("ok.txt")?);
    assert!(link_path.is_file());
    assert!(fs::symlink_metadata(&link_path)?.file_type().is_symlink());
    assert_eq!(fs::read_to_string(&link_path)?, "hello_world");
    Ok(())
}

#[test]
fn symlink_dir_resolves_to_source_tree() -> Result<()> {
    let (_tmpdir, testdirectory) = testdirectory();
    let sub1 = testdirectory.mkdir("sub1")?;
    let sub2 = testdirectory.mkdir("sub2")?;
    sub1.write_text("inside.txt", "inside")?;

    let link_path = sub2.symlink_dir(sub1.path()?)?;

    assert!(sub2.contains_dir(["sub1"])?);
    assert!(link_path.is_dir());
    assert!(sub2.contains_file("sub1/inside.txt")?);
    assert_eq!(fs::read_to_string(link_path.join("inside.txt"))?, "inside");
    Ok(())
}

#[test]
fn symlink_with_rename_and_absolute_target() -> Result<()> {
    let (_tmpdir, testdirectory) = testdirectory();
    let bin = testdirectory.mkdir("bin")?;
    let tool = bin.write_text("tool-0.3.1", "#!/bin/sh\n")?;

    let options = LinkOptions::new().rename_as("tool").absolute();
    let link = testdirectory.symlink_file_with(bin.path()?.join("tool-*"), &options)?;

    assert_eq!(link, testdirectory.path()?.join("tool"));
    assert_eq!(fs::read_link(&link)?, tool);
    Ok(())
}

#[test]
fn relative_links_survive_moving_the_tree() -> Result<()> {
    let (_tmpdir, testdirectory) = testdirectory();
    let tree = testdirectory.mkdir("tree")?;
    let data = tree.mkdir("data")?;
    let links = tree.mkdir("links")?;
    data.write_text("value.txt", "42")?;
    links.symlink_file(data.path()?.join("value.txt"))?;

    fs::rename(tree.path()?, testdirectory.path()?.join("moved"))?;

    let moved = testdirectory.join(["moved", "links"])?;
    assert_eq!(fs::read_to_string(moved.path()?.join("value.txt"))?, "42");
    Ok(())
}

#[test]
fn ambiguous_symlink_source_fails() -> Result<()> {
    let (_tmpdir, testdirectory) = testdirectory();
    let sub1 = testdirectory.mkdir("sub1")?;
    sub1.write_text("a.txt", "a")?;
    sub1.write_text("b.txt", "b")?;

    let error = testdirectory
        .symlink_file(sub1.path()?.join("*.txt"))
        .unwrap_err();
    assert!(error.is_ambiguous());
    Ok(())
}

#[test]
fn contains_dir_is_false_for_dangling_link() -> Result<()> {
    let (_tmpdir, testdirectory) = testdirectory();
    let mut target = testdirectory.mkdir("target")?;
    testdirectory.symlink_dir_with(target.path()?, &LinkOptions::new().rename_as("alias"))?;
    assert!(testdirectory.contains_dir(["alias"])?);

    target.rmdir()?;
    assert!(!testdirectory.contains_dir(["alias"])?);
    Ok(())
}
