use std::rc::Rc;
use client::{ChangeNotifier, ClientError, Gateway, Notifications, Tone, UploadController};
use shared::{Category, CategoryId, ALLOWED_EXTENSIONS};
use web_sys::{HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;
use crate::browser::{self, BrowserFile, BrowserTransport};
use crate::config::contest_name;
use crate::notice::{loading, notice};
use crate::styles::*;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub contest: String,
}

enum State {
    Loading,
    Ready { controller: Rc<UploadController<BrowserTransport>>, categories: Vec<Category> },
    Error(String),
}

pub enum Msg {
    CategoriesLoaded(Result<Vec<Category>, ClientError>),
    Changed,
    UpdateName(String),
    UpdateEmail(String),
    UpdateCaption(String),
    ToggleCategory(CategoryId),
    PickPhoto(Option<BrowserFile>),
    Submit,
    Submitted(bool),
}

pub struct UploadPage {
    gateway: Rc<Gateway<BrowserTransport>>,
    notifier: ChangeNotifier,
    form: NodeRef,
    state: State,
}

impl Component for UploadPage {
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

        let notifier = ChangeNotifier::new();
        let link = ctx.link().clone();
        notifier.listen(move |_| link.send_message(Msg::Changed));

        Self { gateway, notifier, form: NodeRef::default(), state: State::Loading }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::CategoriesLoaded(Ok(categories)) => {
                let controller = UploadController::new(
                    Rc::clone(&self.gateway),
                    ctx.props().contest.clone(),
                    Rc::new(Notifications::new(self.notifier.clone())),
                    self.notifier.clone(),
                );
                self.state = State::Ready { controller: Rc::new(controller), categories };
                true
            }
            Msg::CategoriesLoaded(Err(error)) => {
                self.state = State::Error(error.to_string());
                true
            }
            Msg::Changed => true,
            Msg::Submitted(uploaded) => {
                if let Some(form) = self.form.cast::<HtmlFormElement>().filter(|_| uploaded) {
                    form.reset();
                }
                false
            }
            msg => {
                if let State::Ready { controller, .. } = &self.state {
                    Self::apply(ctx, Rc::clone(controller), msg);
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let contest = &ctx.props().contest;
        html! {
            <div class={BG_PAGE}>
                <div class={CONTAINER_SM}>
                    <h1 class={HEADING_LG}>{format!("Enter the {}", contest_name(contest))}</h1>
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
                        State::Ready { controller, categories } => self.render_form(ctx, controller, categories),
                    }}
                </div>
            </div>
        }
    }

    fn destroy(&mut self, _: &Context<Self>) {
        self.notifier.unlisten();
    }
}

impl UploadPage {
    /// Draft edits re-render through the controller's change events.
    fn apply(ctx: &Context<Self>, controller: Rc<UploadController<BrowserTransport>>, msg: Msg) {
        match msg {
            Msg::UpdateName(name) => controller.edit(|draft| draft.uploader_name = name),
            Msg::UpdateEmail(email) => controller.edit(|draft| draft.email = email),
            Msg::UpdateCaption(caption) => controller.edit(|draft| draft.caption = caption),
            Msg::ToggleCategory(category) => controller.toggle_category(&category),
            Msg::PickPhoto(photo) => controller.edit(|draft| draft.photo = photo),
            Msg::Submit => ctx.link().send_future(async move {
                Msg::Submitted(controller.submit().await.is_ok())
            }),
            _ => {}
        }
    }

    fn render_form(
        &self,
        ctx: &Context<Self>,
        controller: &UploadController<BrowserTransport>,
        categories: &[Category],
    ) -> Html {
        let link = ctx.link();
        let draft = controller.draft();
        let busy = controller.is_submitting();

        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });
        let onname = link.callback(|e: InputEvent| Msg::UpdateName(e.target_unchecked_into::<HtmlInputElement>().value()));
        let onemail = link.callback(|e: InputEvent| Msg::UpdateEmail(e.target_unchecked_into::<HtmlInputElement>().value()));
        let oncaption = link.callback(|e: InputEvent| {
            Msg::UpdateCaption(e.target_unchecked_into::<HtmlTextAreaElement>().value())
        });
        let onphoto = link.callback(|e: Event| {
            let input = e.target_unchecked_into::<HtmlInputElement>();
            Msg::PickPhoto(input.files().and_then(|files| files.get(0)).map(BrowserFile))
        });
        let accept = ALLOWED_EXTENSIONS.iter().map(|ext| format!(".{}", ext)).collect::<Vec<_>>().join(",");

        html! {
            <div class={CARD}>
                {notice(controller.notifications().visible())}
                <form ref={self.form.clone()} class={SPACE_Y_LG} onsubmit={onsubmit}>
                    <div class={INPUT_GROUP}>
                        <label class={TEXT_LABEL} for="uploader_name">{"Your name"}</label>
                        <input id="uploader_name" class={INPUT_BASE} type="text" value={draft.uploader_name.clone()}
                            oninput={onname} disabled={busy} />
                    </div>
                    <div class={INPUT_GROUP}>
                        <label class={TEXT_LABEL} for="email">{"Email (optional)"}</label>
                        <input id="email" class={INPUT_BASE} type="email" value={draft.email.clone()}
                            oninput={onemail} disabled={busy} />
                    </div>
                    <div class={INPUT_GROUP}>
                        <label class={TEXT_LABEL} for="caption">{"Caption"}</label>
                        <textarea id="caption" class={INPUT_BASE} rows="3" value={draft.caption.clone()}
                            oninput={oncaption} disabled={busy} />
                    </div>
                    <fieldset class={SPACE_Y_BASE}>
                        <legend class={TEXT_LABEL}>{"Superlatives"}</legend>
                        {categories.iter().map(|category| {
                            let id = category.id.clone();
                            let onchange = link.callback(move |_: Event| Msg::ToggleCategory(id.clone()));
                            html! {
                                <label class="flex items-center gap-2 text-gray-200" key={category.id.to_string()}>
                                    <input type="checkbox" name="categories" value={category.id.to_string()}
                                        checked={draft.categories.contains(&category.id)} disabled={busy} onchange={onchange} />
                                    {&category.label}
                                </label>
                            }
                        }).collect::<Html>()}
                    </fieldset>
                    <div class={INPUT_GROUP}>
                        <label class={TEXT_LABEL} for="photo">{"Photo"}</label>
                        <input id="photo" class={INPUT_BASE} type="file" accept={accept} onchange={onphoto} disabled={busy} />
                        <p class={TEXT_MUTED}>{"PNG, JPG or GIF, up to 5 MB."}</p>
                    </div>
                    <button type="submit" class={button_primary(true)} disabled={busy}>
                        {controller.submit_label()}
                    </button>
                </form>
            </div>
        }
    }
}
