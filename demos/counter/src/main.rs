//! The classic counter: two state slots, a memoized title, and an effect
//! keyed on the count. A manual host loop plays the part of the browser:
//! it "paints" by printing the committed view, delivers clicks by invoking
//! the callbacks embedded in it, and drains the scheduler between events.

use std::cell::RefCell;
use std::rc::Rc;

use crochet_core::deps;
use crochet_core::prelude::*;

fn app() -> View {
    let (num, set_num) = use_state(|| 0i32);
    let (name, set_name) = use_state(|| "Fang".to_string());

    let title = use_memo(deps![num], move || format!("number is {num}"));
    use_effect(deps![num], {
        let title = title.clone();
        move || log::info!("document title <- {title}")
    });

    View::column(vec![
        View::text(format!("number: {num}")),
        View::text(format!("name: {name}")),
        View::input(name.clone(), move |next| set_name.set(next)),
        View::button("+1", move || set_num.set(num + 1)),
    ])
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

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

    runtime.mount(app, sink);
    scheduler.run_until_idle();

    for _ in 0..3 {
        let click = frame.borrow().as_ref().and_then(|view| view.find_button("+1"));
        if let Some(click) = click {
            click();
        }
        scheduler.run_until_idle();
    }

    let edit = frame.borrow().as_ref().and_then(|view| view.find_input());
    if let Some(edit) = edit {
        edit("Mei".to_string());
    }
    scheduler.run_until_idle();

    runtime.unmount();
    Ok(())
}
