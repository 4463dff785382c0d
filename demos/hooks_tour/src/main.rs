//! Every hook in one component: reducer-driven counting, a raw-setter
//! reducer, a memoized summary, a stable callback, a context-provided theme,
//! and both effect flavors with cleanup.

use std::cell::RefCell;
use std::rc::Rc;

use crochet_core::deps;
use crochet_core::prelude::*;

#[derive(Clone, Copy, Debug)]
enum CounterAction {
    Increment,
    Decrement,
    Reset,
}

fn counter_reducer(state: &i32, action: CounterAction) -> i32 {
    match action {
        CounterAction::Increment => state + 1,
        CounterAction::Decrement => state - 1,
        CounterAction::Reset => 0,
    }
}

fn tour(theme: &Context<String>) -> View {
    let (count, dispatch) = use_reducer(counter_reducer, || 0);
    let (note, set_note) = use_reducer_raw(|| "untouched".to_string());

    let theme_name = use_context(theme).unwrap_or_else(|| "default".to_string());
    let summary = use_memo(deps![count, theme_name.clone()], {
        let theme_name = theme_name.clone();
        move || format!("count {count} under the {theme_name} theme")
    });

    let shout = use_callback(deps![count], move || log::info!("count is {count}"));

    use_layout_effect(deps![count], move || {
        log::info!("before paint: count -> {count}");
    });
    use_effect(deps![theme_name.clone()], {
        let theme_name = theme_name.clone();
        move || {
            log::info!("theme effect: now {theme_name}");
            on_cleanup(move || log::info!("theme effect: leaving {theme_name}"))
        }
    });

    let inc = dispatch.clone();
    let dec = dispatch.clone();
    View::column(vec![
        View::text((*summary).clone()),
        View::text(format!("note: {note}")),
        View::button("+", move || inc.dispatch(CounterAction::Increment)),
        View::button("-", move || dec.dispatch(CounterAction::Decrement)),
        View::button("reset", move || dispatch.dispatch(CounterAction::Reset)),
        View::button("annotate", move || set_note.set("dispatched raw".to_string())),
        View::button("shout", move || (*shout)()),
    ])
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let theme: Context<String> = context();
    theme.set("dark".to_string());

    let scheduler = Rc::new(ManualScheduler::new());
    let runtime = Runtime::new(scheduler.clone());

    let frame = Rc::new(RefCell::new(None::<View>));
    let sink = {
        let frame = frame.clone();
        move |view: &View| {
            println!("--- commit ---");
            println!("{}", view.text_content());
            *frame.borrow_mut() = Some(view.clone());
        }
    };

    let app = {
        let theme = theme.clone();
        move || tour(&theme)
    };
    runtime.mount(app, sink);
    scheduler.run_until_idle();

    let press = |label: &str| {
        let click = frame.borrow().as_ref().and_then(|view| view.find_button(label));
        if let Some(click) = click {
            click();
        }
        scheduler.run_until_idle();
    };

    press("+");
    press("+");
    press("shout");
    press("annotate");
    press("-");

    // A context write is invisible until something re-renders.
    theme.set("light".to_string());
    press("reset");

    runtime.unmount();
    scheduler.run_until_idle();
    Ok(())
}
