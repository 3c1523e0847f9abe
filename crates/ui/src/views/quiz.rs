use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::{QuizIntent, QuizScreen, QuizVm};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Keys `1`..=`9` pick the matching answer.
fn choice_index_for_key(value: &str) -> Option<usize> {
    match value.parse::<usize>() {
        Ok(number @ 1..=9) => Some(number - 1),
        _ => None,
    }
}

/// Screen-level shortcut for `key`, if any.
///
/// `Enter` is only taken over while the primary button is shown; otherwise it
/// keeps its native meaning on whatever button has focus.
fn intent_for_key(key: &Key, has_primary: bool) -> Option<QuizIntent> {
    match key {
        Key::Enter if has_primary => Some(QuizIntent::Primary),
        Key::Character(value) => choice_index_for_key(value).map(QuizIntent::Choose),
        _ => None,
    }
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();
    let vm = use_signal(move || QuizVm::new(ctx.new_session()));

    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        let mut vm = vm;
        let ticket = vm.write().dispatch(intent);
        let Some(ticket) = ticket else {
            return;
        };

        let quiz_loop = quiz_loop.clone();
        spawn(async move {
            let completion = quiz_loop.fetch(ticket).await;
            vm.write().apply(&quiz_loop, completion);
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, vm);
            }
        }
    }

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let has_primary = vm.read().screen().primary_button.is_some();
        if let Some(intent) = intent_for_key(&evt.data.key(), has_primary) {
            evt.prevent_default();
            dispatch_intent.call(intent);
        }
    });

    let focus_on_mount = move |evt: MountedEvent| async move {
        let _ = evt.data().set_focus(true).await;
    };

    let QuizScreen {
        header: heading,
        category,
        difficulty,
        question,
        choices,
        primary_button,
    } = vm.read().screen().clone();

    rsx! {
        div {
            class: "quiz",
            tabindex: "0",
            onmounted: focus_on_mount,
            onkeydown: on_key,
            header { class: "quiz__header",
                h1 { id: "quiz-header", "{heading}" }
            }
            if !category.is_empty() {
                p { id: "quiz-category", class: "quiz__meta", "{category}" }
            }
            if !difficulty.is_empty() {
                p { id: "quiz-difficulty", class: "quiz__meta", "{difficulty}" }
            }
            p { id: "quiz-question", class: "quiz__question", "{question}" }
            if !choices.is_empty() {
                ul { id: "quiz-answers", class: "quiz__answers",
                    for (index, choice) in choices.iter().enumerate() {
                        li { key: "{index}",
                            button {
                                class: "quiz__answer",
                                r#type: "button",
                                onclick: move |_| dispatch_intent.call(QuizIntent::Choose(index)),
                                "{choice}"
                            }
                        }
                    }
                }
            }
            if let Some(label) = primary_button {
                button {
                    id: "quiz-primary",
                    class: "quiz__primary",
                    r#type: "button",
                    onclick: move |_| dispatch_intent.call(QuizIntent::Primary),
                    "{label}"
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<QuizVm>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<QuizVm>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<QuizVm> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
