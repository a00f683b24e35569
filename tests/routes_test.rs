use clusterdash::{DashboardRoute, DashboardRouter};

const BASES: [&str; 4] = ["", "/cluster-dashboard", "/projects/3/dash", "/cluster-dashboard/"];

#[test]
fn every_mount_dispatches_the_three_views() {
    for base in BASES {
        let router = DashboardRouter::new(base);
        let mount = router.base().to_string();

        assert_eq!(
            router.resolve(&format!("{}/node-view/X", mount)),
            Some(DashboardRoute::NodeView {
                node_id: "X".to_string()
            }),
            "base {:?}",
            base
        );
        assert_eq!(
            router.resolve(&format!("{}/pr-env-detail/Y", mount)),
            Some(DashboardRoute::EnvironmentDetail {
                repo_id: "Y".to_string()
            }),
            "base {:?}",
            base
        );
        for other in ["/", "/settings", "/node-views/X", "/env/Y"] {
            assert_eq!(
                router.resolve(&format!("{}{}", mount, other)),
                Some(DashboardRoute::Dashboard),
                "base {:?} path {:?}",
                base,
                other
            );
        }
    }
}

#[test]
fn node_view_takes_priority_over_catch_all() {
    let router = DashboardRouter::new("/cluster-dashboard");
    let route = router
        .resolve("/cluster-dashboard/node-view/pr-env-detail")
        .unwrap();
    assert_eq!(route.view_name(), "expanded-node-view");
}

#[test]
fn params_are_passed_through_uninterpreted() {
    let router = DashboardRouter::new("/cluster-dashboard");
    assert_eq!(
        router.resolve("/cluster-dashboard/pr-env-detail/org%2Frepo"),
        Some(DashboardRoute::EnvironmentDetail {
            repo_id: "org%2Frepo".to_string()
        })
    );
}
