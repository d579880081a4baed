use std::rc::Rc;
use client::{ClientError, Gateway, ResultRow, ResultsSession, Runtime, Tone};
use shared::Category;
use yew::prelude::*;
use yew_router::prelude::*;
use crate::browser::{self, BrowserTransport};
use crate::config::{contest_name, CONFIG};
use crate::notice::{category_body, loading};
use crate::styles::*;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub contest: String,
}

#[derive(Default)]
enum State {
    #[default]
    Loading,
    Ready(Rc<ResultsSession<BrowserTransport>>),
    Error(String),
}

pub enum Msg {
    CategoriesLoaded(Result<Vec<Category>, ClientError>),
    Changed,
}

pub struct ResultsPage {
    runtime: Runtime,
    gateway: Rc<Gateway<BrowserTransport>>,
    state: State,
}

impl Component for ResultsPage {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let runtime = browser::runtime();
        let gateway = browser::gateway(&runtime);

        let categories = Rc::clone(&gateway);
        let contest = ctx.props().contest.clone();
        ctx.link().send_future(async move {
            Msg::CategoriesLoaded(categories.list_categories(&contest).await)
        });

        Self { runtime, gateway, state: State::default() }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::CategoriesLoaded(Ok(categories)) => {
                let session = ResultsSession::new(
                    Rc::clone(&self.gateway),
                    ctx.props().contest.clone(),
                    categories,
                    self.runtime.clone(),
                    &CONFIG,
                    browser::renderer(),
                );
                let link = ctx.link().clone();
                session.listen(move |_| link.send_message(Msg::Changed));
                session.start();
                self.state = State::Ready(session);
            }
            Msg::CategoriesLoaded(Err(error)) => {
                self.state = State::Error(error.to_string());
            }
            Msg::Changed => {}
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let contest = &ctx.props().contest;
        html! {
            <div class={CONTAINER}>
                <h1 class={HEADING_LG}>{format!("{} Leaderboard", contest_name(contest))}</h1>
                {match &self.state {
                    State::Loading => loading(),
                    State::Error(error) => html! {
                        <div class={alert_style(Tone::Error)}>
                            <p>{error}</p>
                            <Link<Route> to={Route::Home} classes={classes!(button_primary(false), "mt-4")}>
                                {"Return Home"}
                            </Link<Route>>
                        </div>
                    },
                    State::Ready(session) => html! {
                        <div class={SPACE_Y_LG}>
                            <p class={combine_classes(TEXT_MUTED, "text-center")}>
                                {format!("Tallies refresh every {} seconds.", CONFIG.results_poll_interval.as_secs())}
                            </p>
                            {session.render_all().into_iter().map(|(category, view)| html! {
                                <section class={CARD_SECTION} key={category.id.to_string()}
                                    data-contest={session.contest().to_string()} data-category={category.id.to_string()}>
                                    <h2 class={HEADING_SM}>{&category.label}</h2>
                                    <ol class={SPACE_Y_BASE}>
                                        {category_body(&view, result_row_view)}
                                    </ol>
                                </section>
                            }).collect::<Html>()}
                        </div>
                    },
                }}
            </div>
        }
    }

    fn destroy(&mut self, _: &Context<Self>) {
        if let State::Ready(session) = &self.state {
            session.stop();
        }
    }
}

fn result_row_view(row: &ResultRow) -> Html {
    html! {
        <li class="flex items-center gap-4" key={row.photo_id.to_string()}>
            <img class="w-20 h-20 object-cover rounded-md" src={row.image_url.clone()} alt={row.caption.clone()} />
            <div class="flex-1">
                <p class="font-semibold text-gray-100">{&row.uploader_name}</p>
                <p class={TEXT_MUTED}>{&row.caption}</p>
            </div>
            <span class="text-orange-300 font-semibold">{&row.vote_label}</span>
        </li>
    }
}
