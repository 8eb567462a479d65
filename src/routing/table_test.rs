use super::*;

fn default_table() -> RouteTable {
    RouteTable::portal_default(&GuardConfig::default()).unwrap()
}

fn route_at(table: &RouteTable, path: &str) -> RouteDescriptor {
    match table.resolve(path) {
        Resolution::Route(route) => route.clone(),
        other => panic!("expected a route for {path}, got {other:?}"),
    }
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn login_must_be_declared() {
    let err = RouteTable::new("/login", vec![RouteDescriptor::protected("/clients")]).unwrap_err();
    assert_eq!(err, RouteTableError::MissingLoginRoute("/login".to_owned()));
}

#[test]
fn login_must_be_public() {
    let err = RouteTable::new("/login", vec![RouteDescriptor::protected("/login")]).unwrap_err();
    assert_eq!(err, RouteTableError::LoginRequiresAuth("/login".to_owned()));
}

#[test]
fn only_login_may_be_public() {
    let err = RouteTable::new(
        "/login",
        vec![RouteDescriptor::public("/login"), RouteDescriptor::public("/about")],
    )
    .unwrap_err();
    assert_eq!(err, RouteTableError::ExtraPublicRoute("/about".to_owned()));
}

#[test]
fn role_requirement_implies_auth() {
    let mut admin_only = RouteDescriptor::for_role("/reports", Role::Admin);
    admin_only.requires_auth = false;

    let err = RouteTable::new("/login", vec![RouteDescriptor::public("/login"), admin_only]).unwrap_err();

    assert_eq!(err, RouteTableError::RoleWithoutAuth("/reports".to_owned()));
}

#[test]
fn unrecognized_role_requirement_is_rejected() {
    let err = RouteTable::new(
        "/login",
        vec![
            RouteDescriptor::public("/login"),
            RouteDescriptor::for_role("/audit", Role::parse("Auditor")),
        ],
    )
    .unwrap_err();
    assert_eq!(
        err,
        RouteTableError::UnrecognizedRole { path: "/audit".to_owned(), role: "Auditor".to_owned() }
    );
}

#[test]
fn duplicate_paths_are_rejected_after_flattening() {
    let err = RouteTable::new(
        "/login",
        vec![
            RouteDescriptor::public("/login"),
            RouteDescriptor::protected("/logs").with_children(vec![RouteDescriptor::protected("client")]),
            RouteDescriptor::protected("/logs/client"),
        ],
    )
    .unwrap_err();
    assert_eq!(err, RouteTableError::DuplicatePath("/logs/client".to_owned()));
}

#[test]
fn top_level_paths_must_be_absolute() {
    let err = RouteTable::new("/login", vec![RouteDescriptor::public("login")]).unwrap_err();
    assert_eq!(err, RouteTableError::RelativePath("login".to_owned()));
}

#[test]
fn redirect_must_point_at_a_declared_route() {
    let table = RouteTable::new("/login", vec![RouteDescriptor::public("/login")]).unwrap();
    let err = table.with_redirect("/", "/home").unwrap_err();
    assert_eq!(err, RouteTableError::DanglingRedirect { from: "/".to_owned(), to: "/home".to_owned() });
}

#[test]
fn redirect_cannot_shadow_a_route() {
    let table = RouteTable::new(
        "/login",
        vec![RouteDescriptor::public("/login"), RouteDescriptor::protected("/clients")],
    )
    .unwrap();
    let err = table.with_redirect("/clients", "/login").unwrap_err();
    assert_eq!(err, RouteTableError::DuplicatePath("/clients".to_owned()));
}

#[test]
fn default_table_has_exactly_one_public_route() {
    let table = default_table();
    let public: Vec<_> = table.routes().iter().filter(|r| !r.requires_auth).collect();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].path, table.login_path());
}

#[test]
fn default_table_respects_custom_paths() {
    let config = GuardConfig { login_path: "/signin".to_owned(), ..GuardConfig::default() };
    let table = RouteTable::portal_default(&config).unwrap();

    assert_eq!(table.login_path(), "/signin");
    assert_eq!(table.resolve("/"), Resolution::Redirect("/signin"));
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn root_alias_redirects_to_login() {
    assert_eq!(default_table().resolve("/"), Resolution::Redirect("/login"));
}

#[test]
fn static_route_resolves_with_its_role() {
    let route = route_at(&default_table(), "/admin-dashboard");
    assert!(route.requires_auth);
    assert_eq!(route.required_role, Some(Role::Admin));
}

#[test]
fn param_route_matches_any_segment() {
    let route = route_at(&default_table(), "/clients/42/edit");
    assert_eq!(route.path, "/clients/:id/edit");
    assert_eq!(route.required_role, Some(Role::Agent));
}

#[test]
fn static_route_beats_param_route() {
    let route = route_at(&default_table(), "/clients/new");
    assert_eq!(route.path, "/clients/new");
    assert_eq!(route.required_role, None);
}

#[test]
fn param_segment_requires_a_value() {
    assert_eq!(default_table().resolve("/clients//edit"), Resolution::Unknown);
}

#[test]
fn children_inherit_parent_protection() {
    let route = route_at(&default_table(), "/logs/client");
    assert!(route.requires_auth);
    assert_eq!(route.required_role, None);
}

#[test]
fn children_inherit_parent_role_unless_overridden() {
    let table = RouteTable::new(
        "/login",
        vec![
            RouteDescriptor::public("/login"),
            RouteDescriptor::for_role("/admin", Role::Admin).with_children(vec![
                RouteDescriptor::protected("users"),
                RouteDescriptor::for_role("handoff", Role::Agent),
            ]),
        ],
    )
    .unwrap();

    assert_eq!(route_at(&table, "/admin/users").required_role, Some(Role::Admin));
    assert_eq!(route_at(&table, "/admin/handoff").required_role, Some(Role::Agent));
}

#[test]
fn query_fragment_and_trailing_slash_are_ignored() {
    let table = default_table();
    assert_eq!(route_at(&table, "/accounts/?page=2").path, "/accounts");
    assert_eq!(route_at(&table, "/transactions#recent").path, "/transactions");
    assert_eq!(table.resolve("/?next=/clients"), Resolution::Redirect("/login"));
}

#[test]
fn unlisted_path_is_unknown() {
    assert_eq!(default_table().resolve("/settings"), Resolution::Unknown);
}

#[test]
fn normalize_keeps_root() {
    assert_eq!(normalize_path(""), "/");
    assert_eq!(normalize_path("///"), "/");
    assert_eq!(normalize_path("/clients/"), "/clients");
}
