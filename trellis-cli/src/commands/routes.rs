use colored::Colorize;
use std::fs;
use std::path::Path;

use trellis_core::TrellisConfig;

/// One declared blueprint, as read from source.
#[derive(Debug)]
pub struct BlueprintRow {
    pub name: String,
    pub ident: String,
    pub verb: String,
    pub action: String,
    pub is_group: bool,
    pub file: String,
    pub line: usize,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = TrellisConfig::load("trellis.yaml")?;
    list(&config)
}

pub fn list(config: &TrellisConfig) -> Result<(), Box<dyn std::error::Error>> {
    let blueprints_dir = Path::new(&config.blueprint_dir);
    if !blueprints_dir.exists() {
        return Err(format!("{} directory not found", config.blueprint_dir).into());
    }

    let mut rows = Vec::new();
    collect_dir(blueprints_dir, &mut rows)?;

    if rows.is_empty() {
        println!("{}", "No blueprints found.".dimmed());
        return Ok(());
    }

    rows.sort_by(|a, b| a.ident.cmp(&b.ident).then_with(|| a.name.cmp(&b.name)));

    println!("{}", "Declared blueprints:".bold());
    println!();
    println!(
        "  {:<8} {:<25} {:<30} {}",
        "VERB".dimmed(),
        "IDENT".dimmed(),
        "ACTION".dimmed(),
        "FILE".dimmed()
    );
    println!("  {}", "-".repeat(80).dimmed());

    for row in &rows {
        let verb_colored = match row.verb.as_str() {
            "GET" => row.verb.green(),
            "POST" => row.verb.blue(),
            "PUT" => row.verb.yellow(),
            "DELETE" => row.verb.red(),
            "PATCH" => row.verb.magenta(),
            _ => row.verb.normal(),
        };

        let ident_str = if row.is_group {
            format!("{} [group]", row.ident)
        } else {
            row.ident.clone()
        };

        let action_str = if row.action.is_empty() {
            "-".to_string()
        } else {
            row.action.clone()
        };

        println!(
            "  {:<8} {:<25} {:<30} {}:{}",
            verb_colored, ident_str, action_str, row.file, row.line,
        );
    }

    println!();
    println!("  {} blueprints total", rows.len());

    Ok(())
}

pub fn collect_dir(
    dir: &Path,
    rows: &mut Vec<BlueprintRow>,
) -> Result<(), Box<dyn std::error::Error>> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_dir(&path, rows)?;
        } else if path.extension().map_or(false, |ext| ext == "rs")
            && path.file_name() != Some("mod.rs".as_ref())
        {
            parse_blueprints_from_file(&path, rows)?;
        }
    }
    Ok(())
}

/// Scan one source file for `impl Blueprint for ...` blocks.
pub fn parse_blueprints_from_file(
    path: &Path,
    rows: &mut Vec<BlueprintRow>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let filename = path.file_name().unwrap().to_string_lossy().to_string();
    let lines: Vec<&str> = content.lines().collect();

    let mut current: Option<BlueprintRow> = None;

    for (line_num, line) in lines.iter().enumerate() {
        if let Some(target) = extract_impl_target(line) {
            if let Some(row) = current.take() {
                rows.push(row);
            }
            current = Some(BlueprintRow {
                name: target.clone(),
                ident: target,
                verb: "GET".to_string(),
                action: String::new(),
                is_group: false,
                file: filename.clone(),
                line: line_num + 1,
            });
            continue;
        }

        let Some(row) = current.as_mut() else {
            continue;
        };

        let trimmed = line.trim();
        if trimmed.starts_with("fn ident") {
            if let Some(ident) = find_next_string(&lines, line_num) {
                row.ident = ident;
            }
        } else if trimmed.starts_with("fn children") {
            row.is_group = true;
        } else if trimmed.starts_with("fn endpoint") {
            if row.action.is_empty() {
                row.action = "<inline>".to_string();
            }
        } else if trimmed.contains("Action::controller(") {
            if let Some((controller, method)) = extract_quoted_pair(trimmed) {
                row.action = format!("{controller}::{method}");
            }
        } else if trimmed.contains("Action::named(") {
            if let Some(action) = extract_quoted(trimmed) {
                row.action = action;
            }
        } else if trimmed.contains("Verb::") {
            if let Some(verb) = extract_verb(trimmed) {
                row.verb = verb;
            }
        }
    }

    if let Some(row) = current.take() {
        rows.push(row);
    }

    Ok(())
}

pub fn extract_impl_target(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if !trimmed.starts_with("impl") || !trimmed.contains("Blueprint") {
        return None;
    }
    let target = trimmed.split(" for ").nth(1)?;
    let name: String = target
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

pub fn find_next_string(lines: &[&str], from_line: usize) -> Option<String> {
    lines
        .iter()
        .skip(from_line)
        .take(4)
        .find_map(|line| extract_quoted(line))
}

pub fn extract_quoted(text: &str) -> Option<String> {
    let start = text.find('"')?;
    let after = &text[start + 1..];
    let end = after.find('"')?;
    Some(after[..end].to_string())
}

pub fn extract_quoted_pair(line: &str) -> Option<(String, String)> {
    let first = extract_quoted(line)?;
    let after = &line[line.find('"')? + first.len() + 2..];
    let second = extract_quoted(after)?;
    Some((first, second))
}

pub fn extract_verb(line: &str) -> Option<String> {
    let start = line.find("Verb::")? + 6;
    let rest = &line[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    Some(rest[..end].to_uppercase())
}
