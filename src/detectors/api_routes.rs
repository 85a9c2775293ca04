//! API endpoint detection from file-system routing conventions.
//!
//! Two layouts are recognized. An App Router file lives under an `/api/`
//! directory and is named after a configured entry stem (`route.ts`). A
//! Pages Router file is any file with a route extension below
//! `<pages_dir>/api/`, where the file stem is the last path segment and
//! `index` maps to its directory. Every export named exactly after an HTTP
//! verb becomes an endpoint:
//!
//! ```text
//! app/api/users/[id]/route.ts          -> /api/users/:id
//! app/(admin)/api/reports/route.js     -> /api/reports
//! app/api/files/[...path]/route.ts     -> /api/files/:path*
//! app/api/route.ts                     -> /api
//! pages/api/users/[id].ts              -> /api/users/:id
//! src/pages/api/auth/index.js          -> /api/auth
//! ```

use crate::config::RouteConfig;
use crate::core::{ApiEndpointRecord, ExportKind, HttpMethod, ParsedFile};
use once_cell::sync::Lazy;
use regex::Regex;

const API_MARKER: &str = "/api/";

// [...slug] and [[...slug]]
static CATCH_ALL_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\[?\.\.\.([^\[\]]+)\]\]?$").unwrap());
// [id]
static DYNAMIC_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[([^\[\]]+)\]$").unwrap());
// (group)
static ROUTE_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\([^()]*\)$").unwrap());

/// Detect endpoints across all files, in file then export order.
pub fn detect_api_endpoints(files: &[ParsedFile], routes: &RouteConfig) -> Vec<ApiEndpointRecord> {
    files
        .iter()
        .filter_map(|file| route_path_for(&file.path, routes).map(|route| (file, route)))
        .flat_map(|(file, route)| {
            file.exports
                .iter()
                .filter(|export| export.kind == ExportKind::Named)
                .filter_map(|export| {
                    HttpMethod::from_export_name(&export.name).map(|method| (method, export.line))
                })
                .map(move |(http_method, line_number)| ApiEndpointRecord {
                    http_method,
                    route_path: route.clone(),
                    source_file: file.path.clone(),
                    line_number,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// The URL path served by a route file, or `None` when `path` is not one.
pub fn route_path_for(path: &str, routes: &RouteConfig) -> Option<String> {
    let normalized = path.replace('\\', "/");
    pages_route_path(&normalized, routes).or_else(|| app_route_path(&normalized, routes))
}

/// `pages/api/**/<stem>.<ext>`; an empty `pages_dir` turns this layout off
fn pages_route_path(normalized: &str, routes: &RouteConfig) -> Option<String> {
    if routes.pages_dir.is_empty() {
        return None;
    }

    let marker = format!("{}{}", routes.pages_dir, API_MARKER);
    let start = if normalized.starts_with(&marker) {
        0
    } else {
        normalized.rfind(&format!("/{marker}"))? + 1
    };
    let below_api = &normalized[start + marker.len()..];

    let (dir, file_name) = below_api.rsplit_once('/').unwrap_or(("", below_api));
    let (stem, extension) = file_name.rsplit_once('.')?;
    if stem.is_empty() || !routes.extensions.iter().any(|ext| ext == extension) {
        return None;
    }

    let mut segments: Vec<String> = dir
        .split('/')
        .filter(|segment| !segment.is_empty())
        .filter_map(rewrite_segment)
        .collect();
    if stem != "index" {
        segments.extend(rewrite_segment(stem));
    }

    Some(api_path(&segments))
}

/// `**/api/**/<entry>.<ext>` with `entry` one of the configured names
fn app_route_path(normalized: &str, routes: &RouteConfig) -> Option<String> {
    let marker = normalized.rfind(API_MARKER)?;

    let (dir, file_name) = normalized.rsplit_once('/')?;
    if !is_route_entry(file_name, routes) {
        return None;
    }

    // Directory part after the last "/api"
    let below_api = dir.get(marker + API_MARKER.len() - 1..).unwrap_or("");

    let segments: Vec<String> = below_api
        .split('/')
        .filter(|segment| !segment.is_empty())
        .filter_map(rewrite_segment)
        .collect();

    Some(api_path(&segments))
}

fn api_path(segments: &[String]) -> String {
    if segments.is_empty() {
        "/api".to_string()
    } else {
        format!("/api/{}", segments.join("/"))
    }
}

fn is_route_entry(file_name: &str, routes: &RouteConfig) -> bool {
    let Some((stem, extension)) = file_name.rsplit_once('.') else {
        return false;
    };
    routes.entry_names.iter().any(|entry| entry == stem)
        && routes.extensions.iter().any(|ext| ext == extension)
}

/// Rewrite one directory segment; route groups disappear.
fn rewrite_segment(segment: &str) -> Option<String> {
    if ROUTE_GROUP.is_match(segment) {
        return None;
    }
    if let Some(caps) = CATCH_ALL_SEGMENT.captures(segment) {
        return Some(format!(":{}*", &caps[1]));
    }
    if let Some(caps) = DYNAMIC_SEGMENT.captures(segment) {
        return Some(format!(":{}", &caps[1]));
    }
    Some(segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExportRecord, Language};
    use pretty_assertions::assert_eq;

    fn route(path: &str) -> Option<String> {
        route_path_for(path, &RouteConfig::default())
    }

    fn route_file(path: &str, exports: &[(&str, ExportKind, usize)]) -> ParsedFile {
        ParsedFile::new(
            path.to_string(),
            Language::TypeScript,
            10,
            vec![],
            vec![],
            vec![],
            exports
                .iter()
                .map(|(name, kind, line)| ExportRecord {
                    name: name.to_string(),
                    kind: *kind,
                    line: *line,
                })
                .collect(),
        )
    }

    #[test]
    fn test_static_route() {
        assert_eq!(route("app/api/users/route.ts").as_deref(), Some("/api/users"));
        assert_eq!(route("src/app/api/health/route.js").as_deref(), Some("/api/health"));
    }

    #[test]
    fn test_dynamic_segments() {
        assert_eq!(route("app/api/users/[id]/route.ts").as_deref(), Some("/api/users/:id"));
        assert_eq!(
            route("app/api/orgs/[org]/members/[member]/route.tsx").as_deref(),
            Some("/api/orgs/:org/members/:member")
        );
    }

    #[test]
    fn test_catch_all_segments() {
        assert_eq!(route("app/api/files/[...path]/route.ts").as_deref(), Some("/api/files/:path*"));
        assert_eq!(route("app/api/docs/[[...slug]]/route.ts").as_deref(), Some("/api/docs/:slug*"));
    }

    #[test]
    fn test_route_groups_are_dropped() {
        assert_eq!(route("app/api/(internal)/jobs/route.ts").as_deref(), Some("/api/jobs"));
    }

    #[test]
    fn test_api_root() {
        assert_eq!(route("app/api/route.ts").as_deref(), Some("/api"));
    }

    #[test]
    fn test_last_api_marker_wins() {
        assert_eq!(route("apps/api/app/api/ping/route.ts").as_deref(), Some("/api/ping"));
    }

    #[test]
    fn test_windows_separators() {
        assert_eq!(route("app\\api\\users\\[id]\\route.ts").as_deref(), Some("/api/users/:id"));
    }

    #[test]
    fn test_non_route_files() {
        assert_eq!(route("app/api/users/handler.ts"), None);
        assert_eq!(route("app/users/route.ts"), None);
        assert_eq!(route("app/api/users/route.py"), None);
        assert_eq!(route("app/api/users/route.test.ts"), None);
    }

    #[test]
    fn test_custom_entry_names() {
        let routes = RouteConfig {
            entry_names: vec!["route".into(), "handler".into()],
            ..Default::default()
        };
        assert_eq!(
            route_path_for("app/api/users/handler.ts", &routes).as_deref(),
            Some("/api/users")
        );
    }

    #[test]
    fn test_one_endpoint_per_verb_export() {
        let files = vec![
            route_file(
                "app/api/users/[id]/route.ts",
                &[
                    ("GET", ExportKind::Named, 3),
                    ("DELETE", ExportKind::Named, 9),
                    ("helper", ExportKind::Named, 14),
                    ("get", ExportKind::Named, 20),
                ],
            ),
            route_file("lib/api.ts", &[("GET", ExportKind::Named, 1)]),
        ];

        let endpoints = detect_api_endpoints(&files, &RouteConfig::default());

        assert_eq!(
            endpoints,
            vec![
                ApiEndpointRecord {
                    http_method: HttpMethod::Get,
                    route_path: "/api/users/:id".into(),
                    source_file: "app/api/users/[id]/route.ts".into(),
                    line_number: 3,
                },
                ApiEndpointRecord {
                    http_method: HttpMethod::Delete,
                    route_path: "/api/users/:id".into(),
                    source_file: "app/api/users/[id]/route.ts".into(),
                    line_number: 9,
                },
            ]
        );
    }

    #[test]
    fn test_default_export_is_not_a_handler() {
        let files = vec![route_file("app/api/x/route.ts", &[("GET", ExportKind::Default, 1)])];
        assert!(detect_api_endpoints(&files, &RouteConfig::default()).is_empty());
    }

    #[test]
    fn test_pages_router_files() {
        assert_eq!(route("pages/api/hello.ts").as_deref(), Some("/api/hello"));
        assert_eq!(route("src/pages/api/users/[id].js").as_deref(), Some("/api/users/:id"));
        assert_eq!(route("pages/api/auth/[...nextauth].ts").as_deref(), Some("/api/auth/:nextauth*"));
    }

    #[test]
    fn test_pages_router_index_maps_to_directory() {
        assert_eq!(route("pages/api/index.ts").as_deref(), Some("/api"));
        assert_eq!(route("pages/api/users/index.tsx").as_deref(), Some("/api/users"));
    }

    #[test]
    fn test_pages_router_rejects_other_files() {
        assert_eq!(route("pages/api/notes.md"), None);
        assert_eq!(route("pages/users/[id].tsx"), None);
        assert_eq!(route("mypages/api/hello.ts"), None);
    }

    #[test]
    fn test_pages_router_can_be_disabled() {
        let routes = RouteConfig {
            pages_dir: String::new(),
            ..Default::default()
        };
        assert_eq!(route_path_for("pages/api/hello.ts", &routes), None);
        assert_eq!(
            route_path_for("app/api/hello/route.ts", &routes).as_deref(),
            Some("/api/hello")
        );
    }

    #[test]
    fn test_pages_router_endpoints() {
        let files = vec![route_file(
            "pages/api/users/[id].ts",
            &[("GET", ExportKind::Named, 2), ("PUT", ExportKind::Named, 8)],
        )];

        let endpoints: Vec<_> = detect_api_endpoints(&files, &RouteConfig::default())
            .into_iter()
            .map(|e| (e.http_method, e.route_path))
            .collect();
        assert_eq!(
            endpoints,
            vec![
                (HttpMethod::Get, "/api/users/:id".to_string()),
                (HttpMethod::Put, "/api/users/:id".to_string()),
            ]
        );
    }
}
