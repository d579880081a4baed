use std::rc::Rc;
use client::{ClientError, EntryCard, Gateway, Runtime, VotingSession};
use shared::{Category, CategoryId, PhotoId};
use yew::prelude::*;
use yew_router::prelude::*;
use crate::browser::{self, BrowserTransport};
use crate::config::{contest_name, CONFIG};
use crate::notice::{category_body, loading, notice};
use crate::styles::*;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub contest: String,
}

enum State {
    Loading,
    Ready(Rc<VotingSession<BrowserTransport>>),
    Error(String),
}

pub enum Msg {
    CategoriesLoaded(Result<Vec<Category>, ClientError>),
    Changed,
    Select(CategoryId, PhotoId),
    Submit(CategoryId),
    Refresh,
}

pub struct VotePage {
    runtime: Runtime,
    gateway: Rc<Gateway<BrowserTransport>>,
    state: State,
}

impl Component for VotePage {
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

        Self { runtime, gateway, state: State::Loading }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::CategoriesLoaded(Ok(categories)) => {
                let session = VotingSession::new(
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
                true
            }
            Msg::CategoriesLoaded(Err(error)) => {
                self.state = State::Error(error.to_string());
                true
            }
            Msg::Changed => true,
            Msg::Select(category, photo_id) => {
                if let State::Ready(session) = &self.state {
                    session.select(&category, photo_id);
                }
                false
            }
            Msg::Submit(category) => {
                if let State::Ready(session) = &self.state {
                    let session = Rc::clone(session);
                    ctx.link().send_future(async move {
                        // The outcome is already on the notification line.
                        let _ = session.submit_vote(&category).await;
                        Msg::Changed
                    });
                }
                false
            }
            Msg::Refresh => {
                if let State::Ready(session) = &self.state {
                    let session = Rc::clone(session);
                    ctx.link().send_future(async move {
                        session.refresh().await;
                        Msg::Changed
                    });
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let contest = &ctx.props().contest;
        html! {
            <div class={CONTAINER}>
                <h1 class={HEADING_LG}>{contest_name(contest)}</h1>
                {match &self.state {
                    State::Loading => loading(),
                    State::Error(error) => html! {
                        <div class={alert_style(client::Tone::Error)}>
                            <p>{error}</p>
                            <Link<Route> to={Route::Home} classes={classes!(button_primary(false), "mt-4")}>
                                {"Return Home"}
                            </Link<Route>>
                        </div>
                    },
                    State::Ready(session) => self.render_session(ctx, session),
                }}
            </div>
        }
    }

    fn destroy(&mut self, _: &Context<Self>) {
        if let State::Ready(session) = &self.state {
            session.close();
        }
    }
}

impl VotePage {
    fn render_session(&self, ctx: &Context<Self>, session: &VotingSession<BrowserTransport>) -> Html {
        let onrefresh = ctx.link().callback(|_: MouseEvent| Msg::Refresh);

        html! {
            <div class={SPACE_Y_LG}>
                {notice(session.notification())}
                <div class={FLEX_BETWEEN}>
                    <p class={TEXT_MUTED}>{"Pick one favorite per superlative and submit each ballot separately."}</p>
                    <button class={button_secondary()} onclick={onrefresh} disabled={session.scheduler().is_polling()}>
                        {"Refresh"}
                    </button>
                </div>
                {if session.categories().is_empty() {
                    html! { <p class={TEXT_MUTED}>{"This contest has no superlatives yet."}</p> }
                } else { html! {} }}
                {session.render_all().into_iter().map(|(category, view)| {
                    let form = session.form(&category.id);
                    let onsubmit = {
                        let id = category.id.clone();
                        ctx.link().callback(move |e: SubmitEvent| {
                            e.prevent_default();
                            Msg::Submit(id.clone())
                        })
                    };
                    html! {
                        <section class={CARD_SECTION} key={category.id.to_string()}
                            data-contest={session.contest().to_string()} data-category={category.id.to_string()}>
                            <h2 class={HEADING_SM}>{&category.label}</h2>
                            <form onsubmit={onsubmit}>
                                <div class={ENTRY_GRID}>
                                    {category_body(&view, |card| {
                                        entry_card_view(ctx, &category.id, card, form.is_submitting())
                                    })}
                                </div>
                                <button type="submit" class={button_primary(true)} disabled={form.is_submitting()}>
                                    {form.submit_label()}
                                </button>
                            </form>
                        </section>
                    }
                }).collect::<Html>()}
            </div>
        }
    }
}

fn entry_card_view(ctx: &Context<VotePage>, category: &CategoryId, card: &EntryCard, locked: bool) -> Html {
    let onchange = {
        let category = category.clone();
        let photo_id = card.photo_id;
        ctx.link().callback(move |_: Event| Msg::Select(category.clone(), photo_id))
    };

    html! {
        <label class={entry_card(card.selected)} key={card.photo_id.to_string()}>
            <img class={ENTRY_IMAGE} src={card.image_url.clone()} alt={card.image_alt.clone()} loading="lazy" />
            <div class={FLEX_BETWEEN}>
                <span class="font-semibold text-gray-100">{&card.uploader_name}</span>
                <span class="text-orange-300 text-sm">{&card.vote_label}</span>
            </div>
            {match &card.caption {
                Some(caption) => html! { <p class="text-gray-300">{caption}</p> },
                None => html! {},
            }}
            {match &card.submitted {
                Some(submitted) => html! { <p class={TEXT_MUTED}>{submitted}</p> },
                None => html! {},
            }}
            <input
                type="radio"
                name={card.control_name.clone()}
                value={card.photo_id.to_string()}
                checked={card.selected}
                disabled={locked}
                onchange={onchange}
            />
        </label>
    }
}
