use yew::prelude::*;
use yew_router::prelude::*;

use crate::lead::fields::ServiceSelection;
use crate::{BookQuery, Route};

pub struct ServiceContent {
    pub title: &'static str,
    pub tagline: &'static str,
    pub intro: &'static str,
    pub deliverables: &'static [&'static str],
}

pub fn service_content(service: ServiceSelection) -> ServiceContent {
    match service {
        ServiceSelection::WebsiteDesign => ServiceContent {
            title: "Website Design",
            tagline: "Fast, modern sites that turn visitors into booked calls.",
            intro: "We design and build conversion focused websites with lead capture and scheduling built in from day one.",
            deliverables: &[
                "Custom design and copy for every page",
                "Lead forms connected to your database",
                "Online booking wired into your calendar",
                "Analytics and monthly performance reports",
            ],
        },
        ServiceSelection::AiAgents => ServiceContent {
            title: "AI Agents",
            tagline: "Assistants that answer, qualify and follow up around the clock.",
            intro: "We build AI agents that handle inbound questions, qualify leads and hand the warm ones to your team.",
            deliverables: &[
                "Website and messaging chat agents",
                "Lead qualification and routing",
                "Automatic follow up sequences",
                "Human handoff when it matters",
            ],
        },
        ServiceSelection::CrmIntegration => ServiceContent {
            title: "CRM Integration",
            tagline: "Every lead, call and deal in one place, updated automatically.",
            intro: "We connect your forms, inbox, calendar and tools to your CRM so nothing is copied by hand again.",
            deliverables: &[
                "CRM setup or cleanup",
                "Form, calendar and inbox sync",
                "Pipeline automation and reminders",
                "Dashboards your team will actually read",
            ],
        },
        ServiceSelection::AllServices => ServiceContent {
            title: "All Services",
            tagline: "Website, AI agents and CRM, delivered as one system.",
            intro: "For teams that want the full stack: a site that captures leads, agents that qualify them and a CRM that tracks them.",
            deliverables: &[
                "Everything in Website Design",
                "Everything in AI Agents",
                "Everything in CRM Integration",
            ],
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct ServicePageProps {
    pub service: ServiceSelection,
}

#[function_component(ServicePage)]
pub fn service_page(props: &ServicePageProps) -> Html {
    let content = service_content(props.service);
    let navigator = use_navigator();

    let book = {
        let service = props.service;
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if let Some(navigator) = navigator.as_ref() {
                let query = BookQuery {
                    service: Some(service.slug().to_string()),
                };
                if let Err(e) = navigator.push_with_query(&Route::Book, &query) {
                    log::error!("Failed to navigate to booking page: {:?}", e);
                }
            }
        })
    };

    html! {
        <div class="service-page">
            <section class="service-hero">
                <h1>{content.title}</h1>
                <p class="service-tagline">{content.tagline}</p>
            </section>
            <section class="service-body">
                <p>{content.intro}</p>
                <h2>{"What you get"}</h2>
                <ul>
                    { for content.deliverables.iter().map(|item| html! { <li>{*item}</li> }) }
                </ul>
                <a href="/book" class="cta-button" onclick={book}>
                    {"Book a strategy call"}
                </a>
            </section>
            <style>
                {r#"
                .service-page {
                    min-height: 100vh;
                    background: #1a1a1a;
                    color: #fff;
                    padding: 8rem 2rem 4rem;
                }
                .service-hero, .service-body {
                    max-width: 800px;
                    margin: 0 auto;
                }
                .service-hero h1 {
                    font-size: 3rem;
                    background: linear-gradient(45deg, #fff, #7EB2FF);
                    -webkit-background-clip: text;
                    -webkit-text-fill-color: transparent;
                }
                .service-tagline {
                    color: rgba(255, 255, 255, 0.8);
                    font-size: 1.25rem;
                }
                .service-body li {
                    margin-bottom: 0.5rem;
                }
                "#}
            </style>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_service_has_content() {
        for service in ServiceSelection::ALL {
            let content = service_content(service);
            assert_eq!(content.title, service.label());
            assert!(!content.deliverables.is_empty());
        }
    }
}
