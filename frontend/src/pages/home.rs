use yew::prelude::*;
use yew_router::prelude::*;

use crate::lead::fields::ServiceSelection;
use crate::pages::services::service_content;
use crate::Route;

#[function_component(Home)]
pub fn home() -> Html {
    let services = [
        ServiceSelection::WebsiteDesign,
        ServiceSelection::AiAgents,
        ServiceSelection::CrmIntegration,
    ];

    html! {
        <div class="landing">
            <section class="hero">
                <div class="hero__title">
                    <div class="stack stack--fade">
                        <span>{"Automate"}</span>
                        <span>{"The Busywork."}</span>
                        <span>{"Keep The Growth."}</span>
                    </div>
                </div>
                <div class="hero__content">
                    <p>
                        {"We design websites, build AI agents and wire up your CRM so leads get answered in minutes instead of days."}
                    </p>
                    <Link<Route> to={Route::Book} classes="cta-button">
                        <span>{"Book a free strategy call"}</span>
                        <i class="arrow">{"→"}</i>
                    </Link<Route>>
                </div>
            </section>

            <section class="services-overview">
                <h2>{"What we do"}</h2>
                <div class="services-grid">
                    { for services.iter().map(|service| {
                        let content = service_content(*service);
                        html! {
                            <div class="service-card">
                                <h3>{content.title}</h3>
                                <p>{content.tagline}</p>
                                <Link<Route> to={Route::Service { slug: service.slug().to_string() }} classes="service-link">
                                    {"Learn more →"}
                                </Link<Route>>
                            </div>
                        }
                    }) }
                </div>
            </section>

            <section class="process">
                <h2>{"How it works"}</h2>
                <ol>
                    <li>{"Tell us where your team loses time."}</li>
                    <li>{"Pick a slot for a 30 minute strategy call."}</li>
                    <li>{"Get a concrete automation plan, whether you work with us or not."}</li>
                </ol>
            </section>

            <style>
                {r#"
                .landing {
                    min-height: 100vh;
                    background: #1a1a1a;
                    color: #ffffff;
                    overflow-x: hidden;
                }
                .hero {
                    padding: 8rem 2rem 4rem;
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    text-align: center;
                }
                .stack {
                    display: flex;
                    flex-direction: column;
                    gap: 0.5rem;
                }
                .stack span {
                    font-size: 4rem;
                    font-weight: 700;
                    background: linear-gradient(45deg, #fff, #7EB2FF);
                    -webkit-background-clip: text;
                    -webkit-text-fill-color: transparent;
                    opacity: 0;
                    animation: fadeIn 0.5s forwards;
                }
                .stack span:nth-child(1) { animation-delay: 0.1s; }
                .stack span:nth-child(2) { animation-delay: 0.3s; }
                .stack span:nth-child(3) { animation-delay: 0.5s; }
                @keyframes fadeIn {
                    from { opacity: 0; transform: translateY(20px); }
                    to { opacity: 1; transform: translateY(0); }
                }
                .hero__content p {
                    max-width: 600px;
                    color: rgba(255, 255, 255, 0.8);
                    font-size: 1.2rem;
                    margin: 2rem auto;
                }
                .cta-button {
                    display: inline-flex;
                    gap: 0.5rem;
                    padding: 1rem 2rem;
                    border-radius: 8px;
                    background: linear-gradient(45deg, #1E90FF, #7EB2FF);
                    color: #fff;
                    text-decoration: none;
                }
                .services-overview, .process {
                    max-width: 1100px;
                    margin: 0 auto;
                    padding: 4rem 2rem;
                }
                .services-grid {
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
                    gap: 1.5rem;
                }
                .service-card {
                    background: rgba(30, 30, 30, 0.7);
                    border: 1px solid rgba(30, 144, 255, 0.1);
                    border-radius: 16px;
                    padding: 2rem;
                }
                .service-link {
                    color: #7EB2FF;
                    text-decoration: none;
                }
                @media (max-width: 768px) {
                    .stack span { font-size: 2.5rem; }
                }
                "#}
            </style>
        </div>
    }
}

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="landing">
            <section class="hero">
                <h1>{"Page not found"}</h1>
                <p>{"That page doesn't exist. Head back home or book a call instead."}</p>
            </section>
        </div>
    }
}
