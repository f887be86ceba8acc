use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use trellis_core::TrellisConfig;

use super::templates;

pub fn run(name: &str, identifier: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let config = TrellisConfig::load("trellis.yaml")?;
    generate_blueprint(&config, name, identifier)
}

pub fn generate_blueprint(
    config: &TrellisConfig,
    name: &str,
    identifier: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (shards, type_name) = split_name(name);
    if type_name.is_empty() {
        return Err("blueprint name must not be empty".into());
    }

    let ident = match identifier {
        Some(explicit) => explicit.to_string(),
        None => default_identifier(&type_name),
    };

    let file_name = templates::to_snake_case(&type_name);
    let mut dir = PathBuf::from(&config.blueprint_dir);
    for shard in &shards {
        dir.push(templates::to_snake_case(shard));
    }
    let path = dir.join(format!("{file_name}.rs"));

    if path.exists() {
        return Err(format!("Blueprint file '{}' already exists", path.display()).into());
    }

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }

    let content = templates::blueprint(&type_name, &ident);
    fs::write(&path, content)?;

    println!(
        "{} Generated blueprint: {}",
        "✓".green(),
        path.display().to_string().cyan()
    );

    // Update mod.rs
    let mod_path = dir.join("mod.rs");
    if mod_path.exists() {
        let existing = fs::read_to_string(&mod_path)?;
        let mod_line = format!("pub mod {file_name};\n");
        if !existing.contains(&mod_line) {
            fs::write(&mod_path, format!("{existing}{mod_line}"))?;
            println!("{} Updated {}", "✓".green(), mod_path.display());
        }
    }

    Ok(())
}

/// Split a generator argument into directory shards and the type name.
///
/// `admin/DashboardBlueprint` becomes `(["admin"], "DashboardBlueprint")`.
pub fn split_name(name: &str) -> (Vec<String>, String) {
    let mut parts: Vec<&str> = name.split(['/', '\\']).collect();
    let type_name = parts.pop().unwrap_or_default().to_string();
    let shards = parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();
    (shards, type_name)
}

/// Derive the route identifier from the generated type name.
///
/// Strips a trailing `Blueprint` and snake_cases the rest, so
/// `BlogPostsBlueprint` yields `blog_posts`.
pub fn default_identifier(type_name: &str) -> String {
    let base = type_name.strip_suffix("Blueprint").unwrap_or(type_name);
    let base = if base.is_empty() { type_name } else { base };
    templates::to_snake_case(base)
}
