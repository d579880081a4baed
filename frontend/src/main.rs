use yew::prelude::*;
use yew_router::prelude::*;

mod browser;
mod config;
mod home;
mod logging;
mod notice;
mod results_page;
mod styles;
mod upload_page;
mod vote_page;

use crate::{
    config::CONFIG,
    home::Home,
    results_page::ResultsPage,
    upload_page::UploadPage,
    vote_page::VotePage,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")] Home,
    #[at("/upload")] Upload,
    #[at("/vote")] Vote,
    #[at("/results")] Results,
    #[at("/:contest/upload")] ContestUpload { contest: String },
    #[at("/:contest/vote")] ContestVote { contest: String },
    #[at("/:contest/results")] ContestResults { contest: String },
    #[not_found]
    #[at("/404")] NotFound,
}

impl Route {
    /// The contest a page route refers to; bare paths mean the default one.
    pub fn contest(&self) -> Option<&str> {
        match self {
            Route::Upload | Route::Vote | Route::Results => Some(CONFIG.default_contest),
            Route::ContestUpload { contest }
            | Route::ContestVote { contest }
            | Route::ContestResults { contest } => Some(contest),
            Route::Home | Route::NotFound => None,
        }
    }

    pub fn upload(contest: &str) -> Self {
        Route::ContestUpload { contest: contest.to_string() }
    }

    pub fn vote(contest: &str) -> Self {
        Route::ContestVote { contest: contest.to_string() }
    }

    pub fn results(contest: &str) -> Self {
        Route::ContestResults { contest: contest.to_string() }
    }
}

fn nav_classes(active: bool) -> Classes {
    classes!(
        "text-base", "md:text-lg", "font-medium", "px-4", "py-2", "rounded-md",
        "transition-colors", "duration-200", "ease-in-out",
        "text-gray-200", "border", "border-transparent", "hover:border-orange-400", "hover:text-orange-400",
        if active {
            "text-orange-400 border-orange-400 ring-2 ring-orange-500 ring-offset-1 ring-offset-gray-900"
        } else {
            ""
        }
    )
}

#[function_component(Navigation)]
fn navigation() -> Html {
    let current_route = use_route::<Route>();
    let contest = current_route.as_ref()
        .and_then(Route::contest)
        .unwrap_or(CONFIG.default_contest)
        .to_string();
    let is = |pred: fn(&Route) -> bool| current_route.as_ref().map_or(false, pred);

    html! {
        <nav class="bg-gray-900 shadow-lg fixed top-0 w-full z-50">
            <div class="container mx-auto px-6 py-4 flex justify-center space-x-8">
                <Link<Route> to={Route::Home} classes={nav_classes(is(|r| matches!(r, Route::Home)))}>
                    {"Home"}
                </Link<Route>>
                <Link<Route> to={Route::upload(&contest)}
                    classes={nav_classes(is(|r| matches!(r, Route::Upload | Route::ContestUpload { .. })))}>
                    {"Upload"}
                </Link<Route>>
                <Link<Route> to={Route::vote(&contest)}
                    classes={nav_classes(is(|r| matches!(r, Route::Vote | Route::ContestVote { .. })))}>
                    {"Vote"}
                </Link<Route>>
                <Link<Route> to={Route::results(&contest)}
                    classes={nav_classes(is(|r| matches!(r, Route::Results | Route::ContestResults { .. })))}>
                    {"Results"}
                </Link<Route>>
            </div>
        </nav>
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <div class="min-h-screen bg-gray-900">
                <Navigation />
                <div class="pt-16">
                    <Switch<Route> render={switch} />
                </div>
            </div>
        </BrowserRouter>
    }
}

fn switch(route: Route) -> Html {
    let contest = route.contest().map(str::to_string);
    match (route, contest) {
        (Route::Upload | Route::ContestUpload { .. }, Some(contest)) => {
            html! { <UploadPage key={contest.clone()} contest={contest.clone()} /> }
        }
        (Route::Vote | Route::ContestVote { .. }, Some(contest)) => {
            html! { <VotePage key={contest.clone()} contest={contest.clone()} /> }
        }
        (Route::Results | Route::ContestResults { .. }, Some(contest)) => {
            html! { <ResultsPage key={contest.clone()} contest={contest.clone()} /> }
        }
        _ => html! { <Home /> },
    }
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
    logging::init();
    yew::Renderer::<App>::new().render();
}
