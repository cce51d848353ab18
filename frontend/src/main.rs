use std::rc::Rc;

use components::{admin_panel::AdminPanel, landing::Landing, login_form::LoginForm};
use ip_logger_lib::{
    controller::Services,
    credentials::StaticCredentials,
    session::{Event, SessionState, View},
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{BrowserLookup, ServerStore};

mod api;
mod components;
mod console_log;

struct Model {
    state: SessionState,
    services: Rc<Services<BrowserLookup, ServerStore>>,
    verifier: StaticCredentials,
}

impl Component for Model {
    type Message = Event;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Event::Mounted);

        Self {
            state: SessionState::new(),
            services: Rc::new(Services::new(BrowserLookup, ServerStore, api::user_agent())),
            verifier: StaticCredentials::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, event: Self::Message) -> bool {
        let commands = self.state.apply(event, &self.verifier);

        if !commands.is_empty() {
            tracing::debug!("Running {:?}", commands);
            let services = self.services.clone();
            let link = ctx.link().clone();
            // One task per event, so the commands of a login submit keep their order
            spawn_local(async move {
                for command in commands {
                    if let Some(result) = services.run(command).await {
                        link.send_message(result);
                    }
                }
            });
        }

        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        match self.state.view {
            View::Landing => html! {
                <Landing on_sign_in={link.callback(|()| Event::SignInClicked)} />
            },
            View::Login => html! {
                <LoginForm
                    email={self.state.email.clone()}
                    password={self.state.password.clone()}
                    error={self.state.login_error.map(|err| AttrValue::from(err.to_string()))}
                    on_email={link.callback(Event::EmailChanged)}
                    on_password={link.callback(Event::PasswordChanged)}
                    on_submit={link.callback(|()| Event::LoginSubmitted)}
                />
            },
            View::AdminDashboard => html! {
                <AdminPanel
                    logs={self.state.logs.clone()}
                    on_sign_out={link.callback(|()| Event::SignOutClicked)}
                />
            },
        }
    }
}

fn main() {
    console_log::init();
    yew::Renderer::<Model>::new().render();
}
