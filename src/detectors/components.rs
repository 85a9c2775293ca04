//! UI component detection.
//!
//! A capitalized function is a functional component; a class is a class
//! component when it extends a known base or declares a render method.
//! Capitalized utility functions are false positives.
//!
//! Each component also gets a role from its file path: `app/**/page.tsx` is
//! a page, any `layout.*` is a layout, everything else is a plain component.

use crate::config::ComponentConfig;
use crate::core::{
    ClassRecord, ComponentKind, ComponentRecord, ComponentRole, FunctionRecord, ParsedFile,
};

/// Detect components across all files, in file order.
pub fn detect_components(files: &[ParsedFile], config: &ComponentConfig) -> Vec<ComponentRecord> {
    files
        .iter()
        .flat_map(|file| detect_in_file(file, config))
        .collect()
}

fn detect_in_file<'a>(
    file: &'a ParsedFile,
    config: &'a ComponentConfig,
) -> impl Iterator<Item = ComponentRecord> + 'a {
    let role = component_role(&file.path);

    let functional = file
        .functions
        .iter()
        .filter(|function| is_functional_component(function))
        .map(move |function| {
            component(&function.name, ComponentKind::Functional, role, &file.path)
        });

    let classes = file
        .classes
        .iter()
        .filter(move |class| is_class_component(class, config))
        .map(move |class| component(&class.name, ComponentKind::Class, role, &file.path));

    functional.chain(classes)
}

fn component(name: &str, kind: ComponentKind, role: ComponentRole, file: &str) -> ComponentRecord {
    ComponentRecord {
        name: name.to_string(),
        kind,
        role,
        file: file.to_string(),
    }
}

fn is_functional_component(function: &FunctionRecord) -> bool {
    function
        .name
        .chars()
        .next()
        .is_some_and(|first| first.is_ascii_uppercase())
}

/// Role from the file stem and, for pages, an `app` directory above it
pub fn component_role(path: &str) -> ComponentRole {
    let normalized = path.replace('\\', "/");
    let (dir, file_name) = normalized.rsplit_once('/').unwrap_or(("", normalized.as_str()));
    let stem = file_name.split('.').next().unwrap_or(file_name);

    match stem {
        "page" if dir.split('/').any(|segment| segment == "app") => ComponentRole::Page,
        "layout" => ComponentRole::Layout,
        _ => ComponentRole::Component,
    }
}

fn is_class_component(class: &ClassRecord, config: &ComponentConfig) -> bool {
    let extends_base = class
        .superclass_name
        .as_ref()
        .is_some_and(|base| config.base_classes.iter().any(|known| known == base));

    extends_base || class.method_names.iter().any(|m| *m == config.render_method)
}
