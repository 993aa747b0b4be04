use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::components::contact_form::ContactForm;
use crate::config;
use crate::lead::fields::ServiceSelection;

#[function_component(Booking)]
pub fn booking() -> Html {
    // `/book?service=ai-agents` arrives from the service pages.
    let service = use_search_param("service".to_string());
    let initial_service = service.as_deref().and_then(|s| s.parse::<ServiceSelection>().ok());

    html! {
        <div class="booking-page">
            <section class="booking-intro">
                <h1>{"Book your free strategy call"}</h1>
                <p>
                    {"Tell us a little about your business and the problems you want to solve. "}
                    {"Right after, you'll pick a time that suits you."}
                </p>
                <p class="booking-contact">
                    {"Prefer email? Reach us at "}
                    <a href={format!("mailto:{}", config::SUPPORT_EMAIL)}>{config::SUPPORT_EMAIL}</a>
                </p>
            </section>
            <ContactForm {initial_service} />
            <style>
                {r#"
                .booking-page {
                    min-height: 100vh;
                    background: #1a1a1a;
                    color: #fff;
                    padding: 8rem 2rem 4rem;
                }
                .booking-intro {
                    max-width: 640px;
                    margin: 0 auto 2rem;
                    text-align: center;
                }
                .booking-intro h1 {
                    font-size: 2.5rem;
                    background: linear-gradient(45deg, #fff, #7EB2FF);
                    -webkit-background-clip: text;
                    -webkit-text-fill-color: transparent;
                }
                .booking-contact a {
                    color: #7EB2FF;
                }
                "#}
            </style>
        </div>
    }
}
