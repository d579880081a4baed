use yew::prelude::*;
use yew_router::prelude::*;
use crate::config::CONTESTS;
use crate::{Route, styles::*};

#[function_component]
pub fn Home() -> Html {
    html! {
        <div class={CONTAINER}>
            <h1 class={combine_classes(HEADING_LG, "text-white")}>{"Halloween Photo Contest"}</h1>
            <p class="text-gray-300 text-center mb-8">
                {"Upload your entry, pick a favorite in every superlative, and watch the leaderboard fill up."}
            </p>

            <div class="grid gap-6 md:grid-cols-2">
                {CONTESTS.iter().map(|contest| html! {
                    <div class={CARD_HOVER_SCALE} key={contest.slug}>
                        <h2 class={HEADING_MD}>{contest.name}</h2>
                        <p class={combine_classes(TEXT_MUTED, "mb-4")}>{contest.tagline}</p>
                        <div class="flex flex-wrap gap-3">
                            <Link<Route> to={Route::upload(contest.slug)} classes={classes!(button_primary(false))}>
                                {"Upload"}
                            </Link<Route>>
                            <Link<Route> to={Route::vote(contest.slug)} classes={classes!(button_secondary())}>
                                {"Vote"}
                            </Link<Route>>
                            <Link<Route> to={Route::results(contest.slug)} classes={classes!(button_secondary())}>
                                {"Results"}
                            </Link<Route>>
                        </div>
                    </div>
                }).collect::<Html>()}
            </div>
        </div>
    }
}
