use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct LoginProps {
    pub email: AttrValue,
    pub password: AttrValue,
    pub error: Option<AttrValue>,
    pub on_email: Callback<String>,
    pub on_password: Callback<String>,
    pub on_submit: Callback<()>,
}

#[function_component]
pub fn LoginForm(props: &LoginProps) -> Html {
    let on_email_input = {
        let on_email = props.on_email.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            on_email.emit(input.value());
        })
    };

    let on_password_input = {
        let on_password = props.on_password.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            on_password.emit(input.value());
        })
    };

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    html! {
        <div class="login">
            <div class="login-card">
                <h2>{ "Login / Sign Up" }</h2>
                <form {onsubmit}>
                    <label>{ "Email" }</label>
                    <input
                        type="text"
                        placeholder="Enter email"
                        value={props.email.clone()}
                        oninput={on_email_input}
                    />
                    <label>{ "Password" }</label>
                    <input
                        type="password"
                        placeholder="Enter password"
                        value={props.password.clone()}
                        oninput={on_password_input}
                    />
                    if let Some(error) = &props.error {
                        <p class="error">{ error.clone() }</p>
                    }
                    <button type="submit">{ "Sign In / Sign Up" }</button>
                </form>
            </div>
        </div>
    }
}
