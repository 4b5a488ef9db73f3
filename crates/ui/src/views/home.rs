use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    let quiz_loop = ctx.quiz_loop();
    let best_resource = use_resource(move || {
        let quiz_loop = quiz_loop.clone();
        async move { quiz_loop.best_score().await }
    });
    let best = best_resource.value().read().as_ref().copied().flatten();
    let best_label = best.map_or_else(
        || "No best score yet. Play your first round!".to_string(),
        |best| format!("Best score: {best}"),
    );

    rsx! {
        div { class: "page home-page",
            h2 { class: "home-page__title", "JavaScript Quiz" }
            p { class: "home-page__tagline", "One question at a time, against the clock." }
            p { class: "home-page__best", "{best_label}" }
            button {
                class: "btn btn-primary",
                id: "home-start",
                r#type: "button",
                onclick: move |_| {
                    let _ = navigator.push(Route::Quiz {});
                },
                "Start Quiz"
            }
        }
    }
}
