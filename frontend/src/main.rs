use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};
use serde::Serialize;
use web_sys::MouseEvent;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

mod config;
mod lead {
    pub mod fields;
    pub mod validation;
    pub mod record;
    pub mod store;
    pub mod widget;
    pub mod booking;
    pub mod submission;
    pub mod calendly;
}
mod components {
    pub mod contact_form;
}
mod pages {
    pub mod home;
    pub mod services;
    pub mod booking;
}

use lead::fields::ServiceSelection;
use pages::{
    home::{Home, NotFound},
    services::ServicePage,
    booking::Booking,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/services/:slug")]
    Service { slug: String },
    #[at("/book")]
    Book,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Query string of the booking page.
#[derive(Serialize)]
pub struct BookQuery {
    pub service: Option<String>,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::Service { slug } => {
            info!("Rendering Service page for {}", slug);
            // "all-services" is a form option, not a page.
            match slug.parse::<ServiceSelection>() {
                Ok(service) if service != ServiceSelection::AllServices => {
                    html! { <ServicePage {service} /> }
                }
                _ => html! { <NotFound /> },
            }
        },
        Route::Book => {
            info!("Rendering Booking page");
            html! { <Booking /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        },
    }
}

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);
    let is_scrolled = use_state(|| false);

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(move |_| {
            let window = web_sys::window();
            let listener = window.as_ref().map(|window| {
                let document = window.document();
                let scroll_callback = Closure::wrap(Box::new(move || {
                    let scroll_top = document
                        .as_ref()
                        .and_then(|d| d.document_element())
                        .map(|el| el.scroll_top())
                        .unwrap_or(0);
                    is_scrolled.set(scroll_top > 80);
                }) as Box<dyn FnMut()>);
                let _ = window.add_event_listener_with_callback(
                    "scroll",
                    scroll_callback.as_ref().unchecked_ref(),
                );
                scroll_callback
            });

            move || {
                if let (Some(window), Some(scroll_callback)) = (window, listener) {
                    let _ = window.remove_event_listener_with_callback(
                        "scroll",
                        scroll_callback.as_ref().unchecked_ref(),
                    );
                }
            }
        }, ());
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    let service_links = [
        ServiceSelection::WebsiteDesign,
        ServiceSelection::AiAgents,
        ServiceSelection::CrmIntegration,
    ];

    html! {
        <nav class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"autoflow"}
                </Link<Route>>

                <button class="burger-menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    { for service_links.iter().map(|service| html! {
                        <div onclick={close_menu.clone()}>
                            <Link<Route> to={Route::Service { slug: service.slug().to_string() }} classes="nav-link">
                                {service.label()}
                            </Link<Route>>
                        </div>
                    }) }
                    <div onclick={close_menu.clone()}>
                        <Link<Route> to={Route::Book} classes="nav-login-button">
                            {"Book a call"}
                        </Link<Route>>
                    </div>
                </div>
            </div>
        </nav>
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Nav />
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
