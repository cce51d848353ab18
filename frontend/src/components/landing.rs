use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct LandingProps {
    pub on_sign_in: Callback<()>,
}

/// Shown whatever happened to the visit log.
#[function_component]
pub fn Landing(props: &LandingProps) -> Html {
    let on_sign_in = props.on_sign_in.clone();
    let onclick = Callback::from(move |_| on_sign_in.emit(()));

    html! {
        <div class="landing">
            <div class="top-right">
                <button class="sign-in-btn" {onclick}>{ "Sign In" }</button>
            </div>
            <div class="landing-message">
                <h1>{ "Congratulations!" }</h1>
                <p>{ "Your IP address has been successfully logged" }</p>
            </div>
        </div>
    }
}
