use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use keyboard_types::Key;

use quiz_core::model::FeedbackTier;
use services::{FinishedQuiz, QuizLoopService, SessionPhase};

use crate::context::AppContext;
use crate::routes::Route;
use crate::ticker::Ticker;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{OptionMark, QuizIntent, QuizVm};

/// Advance past the active question from a spawned handler.
///
/// The vm is taken out of its signal across the await so no other handler can
/// observe a half-applied transition; a second advance finding the slot empty
/// is a benign no-op. Each trigger is only honored in its own phase: a
/// timeout advance is dropped when a manual answer got in first (the answer
/// wins the tie), and a doubled Next click is dropped once the first one has
/// moved the session on.
async fn advance_current(
    quiz_loop: Arc<QuizLoopService>,
    mut vm: Signal<Option<QuizVm>>,
    mut error: Signal<Option<ViewError>>,
    timeout: bool,
) {
    let taken = vm.write().take();
    let Some(mut vm_value) = taken else {
        return;
    };

    let expected = if timeout {
        SessionPhase::AwaitingAnswer
    } else {
        SessionPhase::AnswerRevealed
    };
    if vm_value.phase() != expected {
        *vm.write() = Some(vm_value);
        return;
    }

    let result = vm_value.advance(&quiz_loop).await;
    *vm.write() = Some(vm_value);

    match result {
        Ok(_) => error.set(None),
        Err(err) => error.set(Some(err)),
    }
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_loop = ctx.quiz_loop();

    let error = use_signal(|| None::<ViewError>);
    let vm = use_signal(|| None::<QuizVm>);
    let mut last_ticker_key = use_signal(|| None::<(usize, bool)>);
    let ticker = use_hook(|| Rc::new(RefCell::new(Ticker::new())));

    let quiz_loop_for_resource = quiz_loop.clone();
    let resource = use_resource(move || {
        let quiz_loop = quiz_loop_for_resource.clone();
        let mut vm = vm;
        async move {
            let started = quiz_loop.start_session().await;
            vm.set(Some(QuizVm::new(started)));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let dispatch_intent = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |intent: QuizIntent| {
            let quiz_loop = quiz_loop.clone();
            let mut error = error;
            let mut vm = vm;

            match intent {
                QuizIntent::SelectAnswer(index) => {
                    if let Some(vm) = vm.write().as_mut() {
                        vm.select_answer(&quiz_loop, index);
                    }
                }
                QuizIntent::Tick => {
                    let expired = vm.write().as_mut().is_some_and(QuizVm::tick);
                    if expired {
                        spawn(async move {
                            advance_current(quiz_loop, vm, error, true).await;
                        });
                    }
                }
                QuizIntent::Next => {
                    spawn(async move {
                        advance_current(quiz_loop, vm, error, false).await;
                    });
                }
                QuizIntent::Restart => {
                    spawn(async move {
                        let started = quiz_loop.restart_session().await;
                        vm.set(Some(QuizVm::new(started)));
                        error.set(None);
                    });
                }
            }
        })
    };

    let on_tick = use_callback(move |()| dispatch_intent.call(QuizIntent::Tick));

    // Bind the ticker to the active question: rebinding on a question change
    // restarts it, answering or finishing cancels it. The key guard keeps
    // per-second vm writes from resetting a running ticker.
    let ticker_for_effect = Rc::clone(&ticker);
    use_effect(move || {
        let key = {
            let guard = vm.read();
            guard
                .as_ref()
                .map(|vm| (vm.question_key(), vm.is_awaiting_answer()))
        };
        if *last_ticker_key.peek() == key {
            return;
        }
        last_ticker_key.set(key);

        let mut ticker = ticker_for_effect.borrow_mut();
        match key {
            Some((_, true)) => ticker.start(on_tick),
            _ => ticker.cancel(),
        }
    });

    let ticker_for_drop = Rc::clone(&ticker);
    use_drop(move || ticker_for_drop.borrow_mut().cancel());

    let retry_action = use_callback(move |()| {
        let mut resource = resource;
        resource.restart();
    });

    let on_key = use_callback(move |evt: KeyboardEvent| {
        if evt.data.key() == Key::Escape {
            evt.prevent_default();
            navigator.push(Route::Home {});
            return;
        }

        let (phase, is_finished) = {
            let guard = vm.read();
            (
                guard.as_ref().map(QuizVm::phase),
                guard.as_ref().is_some_and(|vm| vm.finished().is_some()),
            )
        };

        if evt.data.key() == Key::Enter {
            if is_finished {
                evt.prevent_default();
                dispatch_intent.call(QuizIntent::Restart);
            } else if phase == Some(SessionPhase::AnswerRevealed) {
                evt.prevent_default();
                dispatch_intent.call(QuizIntent::Next);
            }
            return;
        }

        if phase != Some(SessionPhase::AwaitingAnswer) {
            return;
        }

        if let Key::Character(value) = evt.data.key() {
            let selected = match value.as_str() {
                "1" => Some(0),
                "2" => Some(1),
                "3" => Some(2),
                "4" => Some(3),
                _ => None,
            };
            if let Some(index) = selected {
                evt.prevent_default();
                dispatch_intent.call(QuizIntent::SelectAnswer(index));
            }
        }
    });

    let vm_guard = vm.read();
    let phase = vm_guard.as_ref().map(QuizVm::phase);
    let question_text = vm_guard
        .as_ref()
        .and_then(|vm| vm.question_text().map(ToString::to_string));
    let options = vm_guard.as_ref().map(QuizVm::options_view).unwrap_or_default();
    let progress_label = vm_guard
        .as_ref()
        .map(QuizVm::progress_label)
        .unwrap_or_default();
    let progress_fill = vm_guard
        .as_ref()
        .map(QuizVm::progress_fill)
        .unwrap_or_default();
    let score = vm_guard.as_ref().map_or(0, QuizVm::score);
    let best_at_start = vm_guard.as_ref().and_then(QuizVm::best_at_start);
    let timer = vm_guard.as_ref().and_then(QuizVm::timer_view);
    let finished = vm_guard.as_ref().and_then(|vm| vm.finished().copied());
    let inert = phase != Some(SessionPhase::AwaitingAnswer);

    rsx! {
        div { class: "page quiz-page", id: "quiz-root", tabindex: "0", onkeydown: on_key,
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| retry_action.call(()),
                        "Retry"
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(err) = *error.read() {
                        p { class: "quiz-error", "{err.message()}" }
                    }
                    if let Some(finished) = finished {
                        ScorePanel { finished, on_intent: dispatch_intent }
                    } else if let Some(text) = question_text {
                        div { class: "quiz-card",
                            header { class: "quiz-card__meta",
                                span { class: "quiz-card__progress", "{progress_label}" }
                                span { class: "quiz-card__score", "Score: {score}" }
                                if let Some(best) = best_at_start {
                                    span { class: "quiz-card__best", "Best: {best}" }
                                }
                            }
                            div { class: "progress-track",
                                div { class: "progress-fill", style: "width: {progress_fill};" }
                            }
                            if let Some(timer) = timer {
                                div { class: "timer",
                                    span {
                                        class: "timer__text",
                                        style: "color: {timer.color};",
                                        "{timer.remaining_secs}"
                                    }
                                    div { class: "timer-track",
                                        div {
                                            class: "timer-fill",
                                            style: "width: {timer.fill}; background-color: {timer.color};",
                                        }
                                    }
                                }
                            }
                            h2 { class: "quiz-card__question", "{text}" }
                            div { class: "quiz-options",
                                for option in options {
                                    OptionButton {
                                        key: "{option.index}",
                                        index: option.index,
                                        label: option.label,
                                        mark: option.mark,
                                        inert,
                                        on_intent: dispatch_intent,
                                    }
                                }
                            }
                            if phase == Some(SessionPhase::AnswerRevealed) {
                                button {
                                    class: "btn btn-primary quiz-next",
                                    id: "quiz-next",
                                    r#type: "button",
                                    onclick: move |_| dispatch_intent.call(QuizIntent::Next),
                                    "Next"
                                }
                            }
                        }
                    } else {
                        p { "No questions available." }
                    }
                },
            }
        }
    }
}

#[component]
fn OptionButton(
    index: usize,
    label: String,
    mark: OptionMark,
    inert: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let class = match mark {
        OptionMark::Neutral => "quiz-option",
        OptionMark::Correct => "quiz-option quiz-option--correct",
        OptionMark::Incorrect => "quiz-option quiz-option--incorrect",
    };
    let key_label = index + 1;
    rsx! {
        button {
            class: "{class}",
            id: "quiz-option-{index}",
            r#type: "button",
            disabled: inert,
            onclick: move |_| on_intent.call(QuizIntent::SelectAnswer(index)),
            span { class: "quiz-option__key", "{key_label}" }
            span { class: "quiz-option__label", "{label}" }
        }
    }
}

#[component]
fn ScorePanel(finished: FinishedQuiz, on_intent: EventHandler<QuizIntent>) -> Element {
    let score = finished.result.score();
    let total = finished.result.total();
    let percentage = finished.result.percentage();
    let feedback = match finished.result.feedback_tier() {
        FeedbackTier::Outstanding => "Outstanding! You're a JavaScript wizard.",
        FeedbackTier::WellDone => "Well done! Keep practicing those concepts.",
        FeedbackTier::NeedsReview => {
            "Good start. Dive back into the lecture notes for a refresh."
        }
    };

    rsx! {
        div { class: "score-panel",
            h2 { class: "score-panel__title", "Quiz Complete" }
            div { class: "score-circle",
                span { class: "score-circle__value", "{score}" }
                span { class: "score-circle__total", "/ {total}" }
            }
            p { class: "score-panel__summary", "You scored {score} out of {total} ({percentage}%)." }
            p { class: "score-panel__feedback", "{feedback}" }
            if finished.new_best {
                p { class: "score-panel__best", "New best score: {finished.best_score}" }
            }
            button {
                class: "btn btn-primary",
                id: "quiz-restart",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::Restart),
                "Play Again"
            }
        }
    }
}
