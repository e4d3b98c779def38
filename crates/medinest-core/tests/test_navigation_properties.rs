use medinest_core::navigation::{AuthStatus, NavigationController, View};
use medinest_core::session::UserType;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Navigate(View),
    Back,
    Auth(AuthStatus),
}

fn any_view() -> impl Strategy<Value = View> {
    let views: Vec<View> = View::all().collect();
    proptest::sample::select(views)
}

fn any_auth() -> impl Strategy<Value = AuthStatus> {
    prop_oneof![
        Just(AuthStatus::Anonymous),
        Just(AuthStatus::SignedIn(UserType::Patient)),
        Just(AuthStatus::SignedIn(UserType::Doctor)),
    ]
}

fn any_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => any_view().prop_map(Step::Navigate),
        3 => Just(Step::Back),
        1 => any_auth().prop_map(Step::Auth),
    ]
}

proptest! {
    #[test]
    fn history_top_never_equals_current_view(steps in prop::collection::vec(any_step(), 0..64)) {
        let mut nav = NavigationController::new();
        let mut auth = AuthStatus::Anonymous;

        for step in steps {
            match step {
                Step::Navigate(view) => { nav.navigate_to(view, auth); }
                Step::Back => { nav.go_back(auth); }
                Step::Auth(next) => {
                    auth = next;
                    nav.reconcile(auth);
                }
            }
            prop_assert_ne!(nav.history().last().copied(), Some(nav.current_view()));
        }
    }

    #[test]
    fn settled_view_always_matches_auth(steps in prop::collection::vec(any_step(), 0..64)) {
        let mut nav = NavigationController::new();
        let mut auth = AuthStatus::Anonymous;

        for step in steps {
            match step {
                Step::Navigate(view) => { nav.navigate_to(view, auth); }
                Step::Back => { nav.go_back(auth); }
                Step::Auth(next) => {
                    auth = next;
                    nav.reconcile(auth);
                }
            }

            let view = nav.current_view();
            if auth.is_authenticated() {
                prop_assert!(!view.is_entry(), "signed in but on {}", view);
            } else {
                prop_assert!(!view.is_protected(), "anonymous but on {}", view);
            }
        }
    }
}
