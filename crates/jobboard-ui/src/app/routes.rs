//! Routing definitions for the job board.
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/jobs")]
    Jobs,
    #[at("/jobs/:id")]
    JobDetail { id: i64 },
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/dashboard")]
    Dashboard,
    #[at("/post-job")]
    PostJob,
    #[at("/edit-job/:id")]
    EditJob { id: i64 },
    #[not_found]
    #[at("/404")]
    NotFound,
}
