#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::deps;
    use crate::prelude::*;

    struct Harness {
        runtime: Runtime,
        scheduler: Rc<ManualScheduler>,
        frames: Rc<RefCell<Vec<String>>>,
        last: Rc<RefCell<Option<View>>>,
    }

    fn mount(app: impl FnMut() -> View + 'static) -> Harness {
        let scheduler = Rc::new(ManualScheduler::new());
        let runtime = Runtime::new(scheduler.clone());
        let frames = Rc::new(RefCell::new(Vec::new()));
        let last = Rc::new(RefCell::new(None));
        let sink = {
            let frames = frames.clone();
            let last = last.clone();
            move |view: &View| {
                frames.borrow_mut().push(view.text_content());
                *last.borrow_mut() = Some(view.clone());
            }
        };
        runtime.mount(app, sink);
        Harness {
            runtime,
            scheduler,
            frames,
            last,
        }
    }

    impl Harness {
        fn click(&self, label: &str) {
            let click = self
                .last
                .borrow()
                .as_ref()
                .and_then(|view| view.find_button(label));
            let click = click.expect("button not in committed view");
            click();
        }

        fn frame(&self, index: usize) -> String {
            self.frames.borrow()[index].clone()
        }

        fn frame_count(&self) -> usize {
            self.frames.borrow().len()
        }
    }

    #[test]
    fn state_persists_per_position() {
        let reads = Rc::new(RefCell::new(Vec::new()));
        let h = mount({
            let reads = reads.clone();
            move || {
                let (count, set_count) = use_state(|| 0);
                let (name, _set_name) = use_state(|| "fang".to_string());
                reads.borrow_mut().push((count, name.clone()));
                View::column(vec![
                    View::text(format!("count: {count}")),
                    View::text(name),
                    View::button("+", move || set_count.set(count + 1)),
                ])
            }
        });

        h.click("+");

        // Slot 0 advanced, slot 1 kept its value: positional identity held.
        assert_eq!(
            *reads.borrow(),
            vec![(0, "fang".to_string()), (1, "fang".to_string())]
        );
        // The re-render was synchronous with the click, no scheduler needed.
        assert_eq!(h.frame_count(), 2);
        assert!(h.frame(1).starts_with("count: 1"));
    }

    #[test]
    fn setter_with_equal_value_still_rerenders() {
        let h = mount(|| {
            let (count, set_count) = use_state(|| 3);
            View::column(vec![
                View::text(format!("{count}")),
                View::button("same", move || set_count.set(count)),
            ])
        });

        assert_eq!(h.frame_count(), 1);
        h.click("same");
        assert_eq!(h.frame_count(), 2);
    }

    #[derive(Clone, Copy)]
    enum CounterAction {
        Add(i32),
        Reset,
    }

    fn counter_reducer(state: &i32, action: CounterAction) -> i32 {
        match action {
            CounterAction::Add(n) => state + n,
            CounterAction::Reset => 0,
        }
    }

    #[test]
    fn reducer_feeds_actions_through() {
        let h = mount(|| {
            let (count, dispatch) = use_reducer(counter_reducer, || 0);
            let reset = dispatch.clone();
            View::column(vec![
                View::text(format!("{count}")),
                View::button("add", move || dispatch.dispatch(CounterAction::Add(2))),
                View::button("reset", move || reset.dispatch(CounterAction::Reset)),
            ])
        });

        h.click("add");
        h.click("add");
        assert!(h.frame(2).starts_with('4'));
        h.click("reset");
        assert!(h.frame(3).starts_with('0'));
    }

    #[test]
    fn reducer_without_reducer_is_a_raw_setter() {
        let h = mount(|| {
            let (value, dispatch) = use_reducer_raw(|| 0);
            View::column(vec![
                View::text(format!("{value}")),
                View::button("seven", move || dispatch.set(7)),
            ])
        });

        h.click("seven");
        assert!(h.frame(1).starts_with('7'));
    }

    #[test]
    fn effect_runs_once_per_distinct_deps() {
        let runs = Rc::new(Cell::new(0));
        let h = mount({
            let runs = runs.clone();
            move || {
                let (num, set_num) = use_state(|| 0);
                let (flag, set_flag) = use_state(|| false);
                use_effect(deps![num], {
                    let runs = runs.clone();
                    move || runs.set(runs.get() + 1)
                });
                View::column(vec![
                    View::button("bump", move || set_num.set(num + 1)),
                    View::button("flip", move || set_flag.set(!flag)),
                ])
            }
        });

        // Queued during the pass, not run: effects are deferred.
        assert_eq!(runs.get(), 0);
        assert_eq!(h.scheduler.pending(), 1);
        h.scheduler.run_until_idle();
        assert_eq!(runs.get(), 1);

        // Unrelated state change, identical deps: nothing queued.
        h.click("flip");
        h.scheduler.run_until_idle();
        assert_eq!(runs.get(), 1);

        h.click("bump");
        h.scheduler.run_until_idle();
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn effect_cleanup_runs_before_next_run_and_on_unmount() {
        let logbook = Rc::new(RefCell::new(Vec::<String>::new()));
        let h = mount({
            let logbook = logbook.clone();
            move || {
                let (n, set_n) = use_state(|| 0);
                use_effect(deps![n], {
                    let logbook = logbook.clone();
                    move || {
                        logbook.borrow_mut().push(format!("run {n}"));
                        let logbook = logbook.clone();
                        on_cleanup(move || logbook.borrow_mut().push(format!("cleanup {n}")))
                    }
                });
                View::column(vec![View::button("next", move || set_n.set(n + 1))])
            }
        });

        h.scheduler.run_until_idle();
        h.click("next");
        h.scheduler.run_until_idle();
        assert_eq!(logbook.borrow().join(","), "run 0,cleanup 0,run 1");

        h.runtime.unmount();
        assert_eq!(logbook.borrow().join(","), "run 0,cleanup 0,run 1,cleanup 1");
    }

    #[test]
    fn manual_scheduler_drains_layout_lane_first() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let h = mount({
            let order = order.clone();
            move || {
                use_effect(deps![], {
                    let order = order.clone();
                    move || order.borrow_mut().push("deferred")
                });
                use_layout_effect(deps![], {
                    let order = order.clone();
                    move || order.borrow_mut().push("layout")
                });
                View::text("ok")
            }
        });

        h.scheduler.run_until_idle();
        assert_eq!(*order.borrow(), vec!["layout", "deferred"]);
    }

    #[test]
    fn memo_is_referentially_stable_until_deps_change() {
        let factory_calls = Rc::new(Cell::new(0));
        let memos = Rc::new(RefCell::new(Vec::<Rc<String>>::new()));
        let h = mount({
            let factory_calls = factory_calls.clone();
            let memos = memos.clone();
            move || {
                let (n, set_n) = use_state(|| 0);
                let (flag, set_flag) = use_state(|| false);
                let label = use_memo(deps![n], {
                    let factory_calls = factory_calls.clone();
                    move || {
                        factory_calls.set(factory_calls.get() + 1);
                        format!("n={n}")
                    }
                });
                memos.borrow_mut().push(label);
                View::column(vec![
                    View::button("bump", move || set_n.set(n + 1)),
                    View::button("flip", move || set_flag.set(!flag)),
                ])
            }
        });

        h.click("flip");
        {
            let memos = memos.borrow();
            assert!(Rc::ptr_eq(&memos[0], &memos[1]));
        }
        assert_eq!(factory_calls.get(), 1);

        h.click("bump");
        {
            let memos = memos.borrow();
            assert!(!Rc::ptr_eq(&memos[1], &memos[2]));
            assert_eq!(*memos[2], "n=1");
        }
        assert_eq!(factory_calls.get(), 2);
    }

    #[test]
    fn callback_keeps_its_identity_until_deps_change() {
        let callbacks = Rc::new(RefCell::new(Vec::<Rc<dyn Fn()>>::new()));
        let h = mount({
            let callbacks = callbacks.clone();
            move || {
                let (n, set_n) = use_state(|| 0);
                let (flag, set_flag) = use_state(|| false);
                let on_press = use_callback(deps![n], move || {
                    let _ = n;
                });
                callbacks.borrow_mut().push(on_press as Rc<dyn Fn()>);
                View::column(vec![
                    View::button("bump", move || set_n.set(n + 1)),
                    View::button("flip", move || set_flag.set(!flag)),
                ])
            }
        });

        h.click("flip");
        h.click("bump");
        let callbacks = callbacks.borrow();
        assert!(Rc::ptr_eq(&callbacks[0], &callbacks[1]));
        assert!(!Rc::ptr_eq(&callbacks[1], &callbacks[2]));
    }

    #[test]
    fn context_reads_the_latest_write() {
        let theme: Context<String> = context();
        theme.set("dark".to_string());

        let h = mount({
            let theme = theme.clone();
            move || {
                let (tick, set_tick) = use_state(|| 0);
                let seen = use_context(&theme).unwrap_or_default();
                View::column(vec![
                    View::text(seen),
                    View::button("tick", move || set_tick.set(tick + 1)),
                ])
            }
        });

        assert!(h.frame(0).starts_with("dark"));

        // A context write alone triggers nothing...
        theme.set("light".to_string());
        assert_eq!(h.frame_count(), 1);

        // ...but the next pass, however caused, observes it.
        h.click("tick");
        assert!(h.frame(1).starts_with("light"));
    }

    #[test]
    fn provide_restores_the_previous_value() {
        let theme: Context<&'static str> = context();
        theme.set("dark");

        let inner = theme.provide("light", || theme.get());
        assert_eq!(inner, Some("light"));
        assert_eq!(theme.get(), Some("dark"));
    }

    #[test]
    fn counter_end_to_end() {
        let h = mount(|| {
            let (num, set_num) = use_state(|| 0);
            use_effect(deps![num], move || {
                log::info!("title <- number is {num}");
            });
            View::column(vec![
                View::text(format!("number: {num}")),
                View::button("+", move || set_num.set(num + 1)),
            ])
        });

        assert!(h.frame(0).starts_with("number: 0"));
        assert_eq!(h.scheduler.pending(), 1);

        h.click("+");
        assert!(h.frame(1).starts_with("number: 1"));
        // deps went 0 -> 1, so the effect was scheduled a second time.
        assert_eq!(h.scheduler.pending(), 2);
        h.scheduler.run_until_idle();
        assert_eq!(h.scheduler.pending(), 0);
    }

    #[test]
    fn runtimes_do_not_share_slots() {
        fn counter() -> View {
            let (count, set_count) = use_state(|| 0);
            View::column(vec![
                View::text(format!("{count}")),
                View::button("+", move || set_count.set(count + 1)),
            ])
        }

        let a = mount(counter);
        let b = mount(counter);

        a.click("+");
        a.click("+");
        assert!(a.frame(2).starts_with('2'));
        assert_eq!(b.frame_count(), 1);
        assert!(b.frame(0).starts_with('0'));

        b.click("+");
        assert!(b.frame(1).starts_with('1'));
        assert_eq!(a.frame_count(), 3);
    }

    #[test]
    fn setter_outlives_unmount_without_effect() {
        let grabbed: Rc<RefCell<Option<Setter<i32>>>> = Rc::new(RefCell::new(None));
        let h = mount({
            let grabbed = grabbed.clone();
            move || {
                let (count, set_count) = use_state(|| 0);
                *grabbed.borrow_mut() = Some(set_count.clone());
                View::column(vec![
                    View::text(format!("{count}")),
                    View::button("+", move || set_count.set(count + 1)),
                ])
            }
        });

        h.runtime.unmount();
        let setter = grabbed.borrow().clone().expect("setter captured");
        setter.set(5);
        assert_eq!(h.frame_count(), 1);
    }

    #[test]
    #[should_panic(expected = "outside of a render pass")]
    fn hooks_outside_a_render_pass_panic() {
        let _ = use_state(|| 0);
    }

    #[test]
    #[should_panic(expected = "claimed it now")]
    fn conditional_hooks_fail_fast() {
        let swap = Rc::new(Cell::new(false));
        let h = mount({
            let swap = swap.clone();
            move || {
                let (count, set_count) = use_state(|| 0);
                if swap.get() {
                    let _ = use_memo(deps![], || 1);
                } else {
                    use_effect(deps![], || {});
                }
                View::column(vec![View::button("go", move || set_count.set(count + 1))])
            }
        });

        swap.set(true);
        h.click("go");
    }

    #[test]
    #[should_panic(expected = "hook slots")]
    fn dropping_a_hook_fails_fast() {
        let skip = Rc::new(Cell::new(false));
        let h = mount({
            let skip = skip.clone();
            move || {
                let (count, set_count) = use_state(|| 0);
                if !skip.get() {
                    let (_name, _set_name) = use_state(|| "x".to_string());
                }
                View::column(vec![View::button("go", move || set_count.set(count + 1))])
            }
        });

        skip.set(true);
        h.click("go");
    }

    #[test]
    #[should_panic(expected = "dependency list length changed")]
    fn deps_length_change_fails_fast() {
        let grow = Rc::new(Cell::new(false));
        let h = mount({
            let grow = grow.clone();
            move || {
                let (count, set_count) = use_state(|| 0);
                let deps = if grow.get() { deps![0, 1] } else { deps![0] };
                use_effect(deps, || {});
                View::column(vec![View::button("go", move || set_count.set(count + 1))])
            }
        });

        grow.set(true);
        h.click("go");
    }
}
