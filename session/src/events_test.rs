use super::*;

fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl Fn(&u32) + 'static) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (seen, move |v: &u32| sink.borrow_mut().push(*v))
}

#[test]
fn emit_reaches_every_listener() {
    let bus = EventBus::<u32>::new();
    let (a, fa) = recorder();
    let (b, fb) = recorder();
    let _sa = bus.subscribe(fa);
    let _sb = bus.subscribe(fb);

    bus.emit(&7);

    assert_eq!(*a.borrow(), vec![7]);
    assert_eq!(*b.borrow(), vec![7]);
}

#[test]
fn dropping_subscription_detaches_listener() {
    let bus = EventBus::<u32>::new();
    let (seen, f) = recorder();
    let sub = bus.subscribe(f);
    bus.emit(&1);
    drop(sub);
    bus.emit(&2);

    assert_eq!(*seen.borrow(), vec![1]);
    assert_eq!(bus.listener_count(), 0);
}

#[test]
fn cancel_detaches_only_its_own_listener() {
    let bus = EventBus::<u32>::new();
    let (a, fa) = recorder();
    let (b, fb) = recorder();
    let sa = bus.subscribe(fa);
    let _sb = bus.subscribe(fb);

    sa.cancel();
    bus.emit(&3);

    assert!(a.borrow().is_empty());
    assert_eq!(*b.borrow(), vec![3]);
}

#[test]
fn subscription_outliving_bus_drops_cleanly() {
    let bus = EventBus::<u32>::new();
    let sub = bus.subscribe(|_| {});
    drop(bus);
    drop(sub);
}

#[test]
fn listener_may_subscribe_during_emit() {
    let bus = Rc::new(EventBus::<u32>::new());
    let late = Rc::new(RefCell::new(Vec::new()));
    let held = Rc::new(RefCell::new(Vec::<Subscription>::new()));

    let bus_inner = Rc::clone(&bus);
    let late_inner = Rc::clone(&late);
    let held_inner = Rc::clone(&held);
    let _first = bus.subscribe(move |_| {
        let sink = Rc::clone(&late_inner);
        let sub = bus_inner.subscribe(move |v: &u32| sink.borrow_mut().push(*v));
        held_inner.borrow_mut().push(sub);
    });

    bus.emit(&1);
    assert!(late.borrow().is_empty());
    bus.emit(&2);
    assert_eq!(*late.borrow(), vec![2]);
}
