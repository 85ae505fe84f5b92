use crate::common::Project;
use assetpack::{AssetKind, BuildOptions, ConfigLoader};

fn settings_for(project: &Project, js_filters: &str) -> assetpack::Settings {
    let config = serde_json::json!({
        "Js": {
            "SrcPath": project.src(),
            "DistPath": project.dist(),
            "SrcURL": "js",
            "DistURL": "dist",
            "FilterList": serde_json::from_str::<serde_json::Value>(js_filters).unwrap(),
            "Groups": {"app": {"DistFile": "app.min.js", "SourceFiles": ["app.js"]}}
        },
        "Css": {
            "SrcPath": project.src(),
            "DistPath": project.dist(),
            "Groups": {"site": {"DistFile": "site.min.css", "SourceFiles": ["site.css"]}}
        },
        "CacheDir": project.cache(),
        "MaxParallelGroups": 2,
    });

    ConfigLoader::into_settings(ConfigLoader::parse(&config.to_string()).unwrap())
}

#[tokio::test]
async fn test_builtin_minifiers_from_config() {
    let project = Project::new();
    project.write_source("app.js", "// greeting\nvar   answer   =   42;\n", 1_000);
    project.write_source("site.css", "body {\n  color: #ff0000;\n}\n", 1_000);

    let settings = settings_for(&project, r#"["JsFilter"]"#);
    let summaries = settings.build_all(BuildOptions::default()).await;

    assert!(summaries.iter().all(|s| s.success()));
    assert_eq!(summaries[0].kind, AssetKind::Script);

    let js = project.artifact("app.min.js");
    assert!(!js.contains("greeting"));
    assert!(js.contains("42"));
    assert!(js.len() < "// greeting\nvar   answer   =   42;\n".len());

    assert_eq!(project.artifact("site.min.css"), "body{color:red}");
}

#[tokio::test]
async fn test_empty_filter_list_uses_kind_defaults() {
    let project = Project::new();
    project.write_source("app.js", "var x = 1;", 1_000);
    project.write_source("site.css", "a{}", 1_000);

    let settings = settings_for(&project, "[]");

    assert_eq!(settings.get(AssetKind::Script).chain().names(), vec!["JsFilter"]);
    assert_eq!(settings.get(AssetKind::Stylesheet).chain().names(), vec!["CssFilter"]);
}

#[tokio::test]
async fn test_skip_build_from_config_keeps_sources_verbatim() {
    let project = Project::new();
    let source = "// keep\nvar   answer   =   42;\n";
    project.write_source("app.js", source, 1_000);
    project.write_source("site.css", "body {\n  color: #ff0000;\n}\n", 1_000);

    let settings = settings_for(&project, r#"["JsFilter"]"#);
    settings.get(AssetKind::Script).build(BuildOptions::skipping()).await;

    assert_eq!(project.artifact("app.min.js"), source);
    assert_eq!(project.cached("app.js"), source);
}
