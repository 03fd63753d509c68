use serde::Serialize;
use std::collections::BTreeMap;

use super::access::{route_config, Access};

/// Text shown while a lazily loaded view is fetched.
pub const LOADING_FALLBACK: &str = "Loading.....";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum View {
    Root,
    Layout,
    Home,
    Jobs,
    JobDetail,
    Employers,
    PostJob,
    EmployerDashboard,
    About,
    Contact,
    NotFound,
    Login,
    Signup,
    Callback,
    ErrorPage,
    ResetPassword,
    PromptPassword,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub view: View,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<&'static str>,
}

impl Element {
    /// A page loaded on demand behind the loading fallback.
    pub fn lazy(view: View) -> Self {
        Self {
            view,
            fallback: Some(LOADING_FALLBACK),
        }
    }

    pub fn shell(view: View) -> Self {
        Self {
            view,
            fallback: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteHandle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
}

/// Input to [`create_route`].
#[derive(Debug, Clone, Default)]
pub struct RouteDef {
    pub path: &'static str,
    pub index: bool,
    pub view: Option<View>,
    pub access: Option<Access>,
    pub children: Vec<RouteNode>,
}

impl RouteDef {
    pub fn page(path: &'static str, view: View) -> Self {
        Self {
            path,
            view: Some(view),
            ..Self::default()
        }
    }

    pub fn index(view: View) -> Self {
        Self {
            index: true,
            view: Some(view),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteNode {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub index: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub element: Option<Element>,
    pub handle: RouteHandle,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteNode>,
}

/// Leading-slash form of a route path.
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Builds a route node. Index routes look up access under `/`; an explicit
/// access tag overrides the static table.
pub fn create_route(def: RouteDef) -> RouteNode {
    let config_path = if def.index {
        "/".to_string()
    } else {
        normalize_path(def.path)
    };
    let access = def
        .access
        .or_else(|| route_config(&config_path).map(|config| config.allow));

    RouteNode {
        index: def.index,
        path: (!def.index).then(|| def.path.to_string()),
        element: def.view.map(Element::lazy),
        handle: RouteHandle { access },
        children: def.children,
    }
}

fn main_routes() -> Vec<RouteNode> {
    vec![
        create_route(RouteDef::index(View::Home)),
        create_route(RouteDef::page("jobs", View::Jobs)),
        create_route(RouteDef::page("job/:id", View::JobDetail)),
        create_route(RouteDef::page("employers", View::Employers)),
        create_route(RouteDef::page("employers/post-job", View::PostJob)),
        create_route(RouteDef::page("employers/dashboard", View::EmployerDashboard)),
        create_route(RouteDef::page("about", View::About)),
        create_route(RouteDef::page("contact", View::Contact)),
        create_route(RouteDef::page("*", View::NotFound)),
    ]
}

fn auth_routes() -> Vec<RouteNode> {
    vec![
        create_route(RouteDef::page("login", View::Login)),
        create_route(RouteDef::page("signup", View::Signup)),
        create_route(RouteDef::page("callback", View::Callback)),
        create_route(RouteDef::page("error", View::ErrorPage)),
        create_route(RouteDef::page(
            "reset-password/:appId/:fields",
            View::ResetPassword,
        )),
        create_route(RouteDef::page(
            "prompt-password/:appId/:emailAddress/:provider",
            View::PromptPassword,
        )),
    ]
}

fn shell(view: View, children: Vec<RouteNode>) -> RouteNode {
    RouteNode {
        index: false,
        path: Some("/".to_string()),
        element: Some(Element::shell(view)),
        handle: RouteHandle::default(),
        children,
    }
}

/// Outcome of resolving a concrete path against the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMatch {
    pub pattern: String,
    pub view: View,
    pub params: BTreeMap<String, String>,
    pub access: Option<Access>,
    pub in_layout: bool,
}

struct Leaf<'a> {
    segments: Vec<String>,
    node: &'a RouteNode,
    in_layout: bool,
}

/// Ranks candidate matches: any non-splat match beats the catch-all, then
/// more static segments win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Specificity {
    exact: bool,
    statics: usize,
}

#[derive(Debug, Clone)]
pub struct RouteTree {
    root: RouteNode,
}

impl RouteTree {
    /// Root shell holding the layout shell (main pages) and the auth pages.
    pub fn build() -> Self {
        let mut children = vec![shell(View::Layout, main_routes())];
        children.extend(auth_routes());
        Self {
            root: shell(View::Root, children),
        }
    }

    pub fn root(&self) -> &RouteNode {
        &self.root
    }

    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let wanted: Vec<&str> = path
            .split(&['?', '#'][..])
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let mut leaves = Vec::new();
        collect_leaves(&self.root, &[], false, &mut leaves);

        let mut best: Option<(Specificity, RouteMatch)> = None;
        for leaf in &leaves {
            let Some((rank, params)) = match_segments(&leaf.segments, &wanted) else {
                continue;
            };
            if best.as_ref().map_or(true, |(current, _)| rank > *current) {
                let Some(element) = &leaf.node.element else {
                    continue;
                };
                best = Some((
                    rank,
                    RouteMatch {
                        pattern: format!("/{}", leaf.segments.join("/")),
                        view: element.view,
                        params,
                        access: leaf.node.handle.access,
                        in_layout: leaf.in_layout,
                    },
                ));
            }
        }

        best.map(|(_, found)| found)
    }
}

impl Default for RouteTree {
    fn default() -> Self {
        Self::build()
    }
}

fn collect_leaves<'a>(
    node: &'a RouteNode,
    prefix: &[String],
    in_layout: bool,
    out: &mut Vec<Leaf<'a>>,
) {
    let mut segments = prefix.to_vec();
    if let Some(path) = &node.path {
        segments.extend(path.split('/').filter(|s| !s.is_empty()).map(str::to_string));
    }

    if node.children.is_empty() {
        out.push(Leaf {
            segments,
            node,
            in_layout,
        });
        return;
    }

    let is_layout = matches!(&node.element, Some(e) if e.view == View::Layout);
    for child in &node.children {
        collect_leaves(child, &segments, in_layout || is_layout, out);
    }
}

fn match_segments(
    pattern: &[String],
    wanted: &[&str],
) -> Option<(Specificity, BTreeMap<String, String>)> {
    let mut params = BTreeMap::new();
    let mut statics = 0;

    for (i, expected) in pattern.iter().enumerate() {
        if expected == "*" {
            params.insert("*".to_string(), wanted[i.min(wanted.len())..].join("/"));
            return Some((
                Specificity {
                    exact: false,
                    statics,
                },
                params,
            ));
        }
        let actual = wanted.get(i)?;
        if let Some(name) = expected.strip_prefix(':') {
            params.insert(name.to_string(), actual.to_string());
        } else if expected == actual {
            statics += 1;
        } else {
            return None;
        }
    }

    (pattern.len() == wanted.len()).then_some((
        Specificity {
            exact: true,
            statics,
        },
        params,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_detail_resolves_with_id_param() {
        let found = RouteTree::build().resolve("/job/42").unwrap();
        assert_eq!(found.view, View::JobDetail);
        assert_eq!(found.pattern, "/job/:id");
        assert_eq!(found.params.get("id").map(String::as_str), Some("42"));
        assert_eq!(found.access, Some(Access::Public));
        assert!(found.in_layout);
    }

    #[test]
    fn static_segments_beat_params_and_splat() {
        let tree = RouteTree::build();
        let found = tree.resolve("/employers/post-job").unwrap();
        assert_eq!(found.view, View::PostJob);
        assert_eq!(found.access, Some(Access::Authenticated));

        assert_eq!(tree.resolve("/").unwrap().view, View::Home);
        assert_eq!(tree.resolve("/jobs/").unwrap().view, View::Jobs);
    }

    #[test]
    fn unknown_paths_fall_through_to_not_found() {
        let found = RouteTree::build().resolve("/nope/at/all").unwrap();
        assert_eq!(found.view, View::NotFound);
        assert_eq!(found.params.get("*").map(String::as_str), Some("nope/at/all"));
        assert_eq!(found.access, None);
        assert!(found.in_layout);
    }

    #[test]
    fn auth_routes_sit_outside_the_layout() {
        let found = RouteTree::build()
            .resolve("/prompt-password/app1/a@b.co/google?next=/jobs")
            .unwrap();
        assert_eq!(found.view, View::PromptPassword);
        assert_eq!(found.params.len(), 3);
        assert_eq!(found.params["emailAddress"], "a@b.co");
        assert_eq!(found.access, Some(Access::Public));
        assert!(!found.in_layout);
    }

    #[test]
    fn create_route_normalizes_and_wraps() {
        let node = create_route(RouteDef::page("about", View::About));
        assert_eq!(node.path.as_deref(), Some("about"));
        assert_eq!(node.element, Some(Element::lazy(View::About)));
        assert_eq!(node.element.unwrap().fallback, Some("Loading....."));
        assert_eq!(node.handle.access, Some(Access::Public));
        assert!(node.children.is_empty());

        let index = create_route(RouteDef::index(View::Home));
        assert!(index.index);
        assert!(index.path.is_none());
        assert_eq!(index.handle.access, Some(Access::Public));
    }

    #[test]
    fn explicit_access_overrides_table() {
        let node = create_route(RouteDef {
            access: Some(Access::Authenticated),
            ..RouteDef::page("jobs", View::Jobs)
        });
        assert_eq!(node.handle.access, Some(Access::Authenticated));
        assert_eq!(normalize_path("/jobs"), "/jobs");
        assert_eq!(normalize_path("jobs"), "/jobs");
    }

    #[test]
    fn tree_serializes_shells_without_fallback() {
        let wire = serde_json::to_value(RouteTree::build().root()).unwrap();
        assert_eq!(wire["element"]["view"], "Root");
        assert!(wire["element"].get("fallback").is_none());
        assert_eq!(wire["children"][0]["element"]["view"], "Layout");
        assert_eq!(wire["children"][0]["children"][0]["index"], true);
        assert_eq!(wire["children"].as_array().unwrap().len(), 7);
    }
}
