const BLUEPRINT_TEMPLATE: &str = r#"use trellis::prelude::*;

/// Route blueprint: {{name}}
pub struct {{name}};

impl Blueprint for {{name}} {
    fn ident(&self) -> &str {
        "{{ident}}"
    }

    fn action(&self) -> Option<Action> {
        Some(Action::named("{{action}}"))
    }
}
"#;

/// Render the scaffold for a leaf blueprint type.
pub fn blueprint(name: &str, ident: &str) -> String {
    let action = to_snake_case(ident);
    render(
        BLUEPRINT_TEMPLATE,
        &[("name", name), ("ident", ident), ("action", &action)],
    )
}

/// Simple template rendering: replaces {{key}} with value.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut output = template.to_string();
    for (key, value) in vars {
        output = output.replace(&format!("{{{{{}}}}}", key), value);
    }
    output
}

/// Convert PascalCase to snake_case.
pub fn to_snake_case(name: &str) -> String {
    let mut result = String::new();
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_lowercase().next().unwrap());
        } else {
            result.push(c);
        }
    }
    result
}

/// Convert snake_case to PascalCase.
#[allow(dead_code)]
pub fn to_pascal_case(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
