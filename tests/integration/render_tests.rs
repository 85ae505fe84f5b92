use crate::common::{set_mtime, Project};
use assetpack::{AssetKind, BuildOptions, Group};

#[tokio::test]
async fn test_production_markup_is_cached_for_the_process() {
    let project = Project::new();
    project.write_source("a.js", "var a;", 1_000);

    let config = project
        .config()
        .with_urls("js", "dist")
        .with_group("all", Group::new("all.min.js", &["a.js"]));
    let compressor = project.compressor(AssetKind::Script, config, Vec::new());
    compressor.build(BuildOptions::default()).await;

    let artifact = project.dist().join("all.min.js");
    set_mtime(&artifact, 5_000);

    compressor.set_production_mode(true);
    let first = compressor.render("all");
    set_mtime(&artifact, 6_000);
    let second = compressor.render("all");

    assert_eq!(first, second);
    assert!(first.contains("dist/all.min.js?ver=5000"));
}

#[tokio::test]
async fn test_development_markup_tracks_sources() {
    let project = Project::new();
    project.write_source("a.css", "a{}", 1_000);
    project.write_source("b.css", "b{}", 2_000);

    let config = project
        .config()
        .with_urls("css", "dist")
        .with_group("site", Group::new("site.css", &["a.css", "b.css"]));
    let compressor = project.compressor(AssetKind::Stylesheet, config, Vec::new());

    let markup = compressor.render("site");
    assert_eq!(
        markup,
        "<!-- assetpack group `site` begin -->\n\t\
         <link rel=\"stylesheet\" href=\"/css/a.css?ver=1000\" />\n\t\
         <link rel=\"stylesheet\" href=\"/css/b.css?ver=2000\" />\n\t\
         <!-- assetpack group `site` end -->"
    );

    set_mtime(&project.src().join("b.css"), 3_000);
    assert!(compressor.render("site").contains("b.css?ver=3000"));
}

#[test]
fn test_unknown_group_renders_a_comment() {
    let project = Project::new();
    let compressor = project.compressor(AssetKind::Script, project.config(), Vec::new());

    assert_eq!(
        compressor.render("missing"),
        "<!-- assetpack: not found compress group `missing` -->"
    );
}
