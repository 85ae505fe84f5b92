use crate::common::{Broken, Project, Upper};
use assetpack::{AssetKind, BuildOptions, CompressError, Group};
use std::fs;
use std::sync::Arc;

#[tokio::test]
async fn test_first_build_then_touch_one_file() {
    let project = Project::new();
    project.write_source("a.js", "var a = 1;", 1_000);
    project.write_source("b.js", "var b = 2;", 1_000);

    let config = project.config().with_group("all", Group::new("all.js", &["a.js", "b.js"]));
    let compressor = project.compressor(AssetKind::Script, config, Vec::new());

    let first = compressor.build(BuildOptions::default()).await;
    assert!(first.success());
    assert_eq!(project.cached("a.js"), "var a = 1;");
    assert_eq!(project.cached("b.js"), "var b = 2;");
    assert_eq!(project.artifact("all.js"), "var a = 1;\n\nvar b = 2;");

    let b_written = fs::metadata(project.cache_entry("b.js")).unwrap().modified().unwrap();

    project.write_source("a.js", "var a = 10;", 1_000);
    project.touch("a.js");

    let second = compressor.build(BuildOptions::default()).await;
    let report = second.group("all").unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.reused, 1);
    assert!(report.artifact_written);
    assert_eq!(project.cached("a.js"), "var a = 10;");
    assert_eq!(
        fs::metadata(project.cache_entry("b.js")).unwrap().modified().unwrap(),
        b_written
    );
    assert_eq!(project.artifact("all.js"), "var a = 10;\n\nvar b = 2;");
}

#[tokio::test]
async fn test_second_build_is_a_no_op() {
    let project = Project::new();
    project.write_source("a.css", "a { color: red }", 1_000);
    project.write_source("b.css", "b { color: blue }", 1_000);

    let upper = Arc::new(Upper::default());
    let config = project.config().with_group("site", Group::new("site.css", &["a.css", "b.css"]));
    let compressor = project.compressor(AssetKind::Stylesheet, config, vec![upper.clone()]);

    compressor.build(BuildOptions::default()).await;
    let artifact = project.dist().join("site.css");
    let before = fs::read(&artifact).unwrap();
    let written_at = fs::metadata(&artifact).unwrap().modified().unwrap();

    let summary = compressor.build(BuildOptions::default()).await;
    let report = summary.group("site").unwrap();

    assert_eq!(upper.calls(), 2);
    assert_eq!(report.processed, 0);
    assert_eq!(report.reused, 2);
    assert!(!report.artifact_written);
    assert_eq!(fs::read(&artifact).unwrap(), before);
    assert_eq!(fs::metadata(&artifact).unwrap().modified().unwrap(), written_at);
}

#[tokio::test]
async fn test_artifact_keeps_declared_order_across_hits_and_misses() {
    let project = Project::new();
    for (file, body) in [("one.js", "one"), ("two.js", "two"), ("three.js", "three")] {
        project.write_source(file, body, 1_000);
    }

    let config = project
        .config()
        .with_group("ordered", Group::new("ordered.js", &["three.js", "one.js", "two.js"]));
    let compressor = project.compressor(AssetKind::Script, config, vec![Arc::new(Upper::default())]);

    compressor.build(BuildOptions::default()).await;
    project.write_source("one.js", "uno", 1_000);
    project.touch("one.js");
    compressor.build(BuildOptions::default()).await;

    assert_eq!(project.artifact("ordered.js"), "THREE\n\nUNO\n\nTWO");
}

#[tokio::test]
async fn test_skip_files_are_cached_and_bundled_raw() {
    let project = Project::new();
    project.write_source("vendor/lib.js", "keep me", 1_000);
    project.write_source("app.js", "shout", 1_000);

    let config = project.config().with_group(
        "app",
        Group::new("app.js", &["vendor/lib.js", "app.js"]).with_skip_files(&["vendor/lib.js"]),
    );
    let upper = Arc::new(Upper::default());
    let compressor = project.compressor(AssetKind::Script, config, vec![upper.clone()]);

    compressor.build(BuildOptions::forced()).await;

    assert_eq!(upper.calls(), 1);
    assert_eq!(project.cached("vendor/lib.js"), "keep me");
    assert_eq!(project.artifact("app.js"), "keep me\n\nSHOUT");
}

#[tokio::test]
async fn test_failing_filter_degrades_to_identity() {
    let project = Project::new();
    project.write_source("a.js", "function a() {}", 1_000);
    project.write_source("b.js", "function b() {}", 1_000);

    let config = project.config().with_group("all", Group::new("all.js", &["a.js", "b.js"]));
    let compressor = project.compressor(AssetKind::Script, config, vec![Arc::new(Broken)]);

    let summary = compressor.build(BuildOptions::default()).await;

    assert!(summary.success());
    assert_eq!(project.artifact("all.js"), "function a() {}\n\nfunction b() {}");
}

#[tokio::test]
async fn test_missing_source_only_fails_its_own_group() {
    let project = Project::new();
    project.write_source("ok.js", "ok", 1_000);
    fs::create_dir_all(project.dist()).unwrap();
    fs::write(project.dist().join("broken.js"), "previous").unwrap();

    let config = project
        .config()
        .with_group("broken", Group::new("broken.js", &["gone.js"]))
        .with_group("working", Group::new("working.js", &["ok.js"]));
    let compressor = project.compressor(AssetKind::Script, config, Vec::new());

    let summary = compressor.build(BuildOptions::default()).await;

    assert_eq!(summary.failed(), 1);
    let broken = summary.group("broken").unwrap();
    assert!(matches!(broken.errors[0], CompressError::SourceUnreadable { .. }));
    assert!(!summary.group("working").unwrap().has_error());
    assert_eq!(project.artifact("broken.js"), "previous");
    assert_eq!(project.artifact("working.js"), "ok");
}

#[tokio::test]
async fn test_force_rewrites_everything() {
    let project = Project::new();
    project.write_source("a.js", "a", 1_000);

    let upper = Arc::new(Upper::default());
    let config = project.config().with_group("all", Group::new("all.js", &["a.js"]));
    let compressor = project.compressor(AssetKind::Script, config, vec![upper.clone()]);

    compressor.build(BuildOptions::default()).await;
    let summary = compressor.build(BuildOptions::forced()).await;

    assert_eq!(upper.calls(), 2);
    assert!(summary.group("all").unwrap().artifact_written);
    assert_eq!(project.artifact("all.js"), "A");
}

#[tokio::test]
async fn test_skip_mode_bypasses_filters() {
    let project = Project::new();
    project.write_source("a.js", "raw", 1_000);

    let upper = Arc::new(Upper::default());
    let config = project.config().with_group("all", Group::new("all.js", &["a.js"]));
    let compressor = project.compressor(AssetKind::Script, config, vec![upper.clone()]);

    let summary = compressor.build(BuildOptions::skipping()).await;

    assert!(summary.success());
    assert_eq!(upper.calls(), 0);
    assert_eq!(project.cached("a.js"), "raw");
    assert_eq!(project.artifact("all.js"), "raw");
}
