use std::cell::RefCell;
use std::rc::Rc;

use engine::bus::{FrameMessage, FramePort, SelectionBus};

type Log = Rc<RefCell<Vec<(&'static str, Option<usize>)>>>;

fn recorder(log: &Log, name: &'static str) -> Box<dyn FnMut(Option<usize>)> {
    let log = Rc::clone(log);
    Box::new(move |sel| log.borrow_mut().push((name, sel)))
}

#[test]
fn notifies_in_registration_order_exactly_once() {
    let bus = SelectionBus::new();
    let log: Log = Rc::default();
    bus.subscribe(recorder(&log, "slider"));
    bus.subscribe(recorder(&log, "frame"));
    bus.subscribe(recorder(&log, "scene"));

    bus.set_selection(Some(3));
    assert_eq!(
        *log.borrow(),
        vec![("slider", Some(3)), ("frame", Some(3)), ("scene", Some(3))]
    );
}

#[test]
fn same_value_is_a_no_op() {
    let bus = SelectionBus::new();
    let log: Log = Rc::default();
    bus.subscribe(recorder(&log, "w"));
    bus.set_selection(Some(1));
    bus.set_selection(Some(1));
    assert_eq!(log.borrow().len(), 1);
    // Clearing still notifies
    bus.set_selection(None);
    assert_eq!(*log.borrow(), vec![("w", Some(1)), ("w", None)]);
}

#[test]
fn unsubscribe_stops_notifications() {
    let bus = SelectionBus::new();
    let log: Log = Rc::default();
    let id = bus.subscribe(recorder(&log, "a"));
    bus.subscribe(recorder(&log, "b"));
    bus.unsubscribe(id);
    bus.set_selection(Some(0));
    assert_eq!(*log.borrow(), vec![("b", Some(0))]);
    assert_eq!(bus.subscriber_count(), 1);
}

#[test]
fn reentrant_set_with_different_value_is_rejected() {
    let bus = Rc::new(SelectionBus::new());
    let inner = Rc::clone(&bus);
    bus.subscribe(Box::new(move |_| {
        // Must be ignored: changing the selection mid-notification would
        // make the notification order ambiguous.
        inner.set_selection(Some(9));
    }));
    let log: Log = Rc::default();
    bus.subscribe(recorder(&log, "w"));

    bus.set_selection(Some(1));
    assert_eq!(bus.selection(), Some(1));
    assert_eq!(*log.borrow(), vec![("w", Some(1))]);
}

#[test]
fn subscribe_during_notification_joins_next_cycle() {
    let bus = Rc::new(SelectionBus::new());
    let log: Log = Rc::default();
    let inner_bus = Rc::clone(&bus);
    let inner_log = Rc::clone(&log);
    bus.subscribe(Box::new(move |_| {
        let late = recorder(&inner_log, "late");
        inner_bus.subscribe(late);
    }));
    bus.set_selection(Some(0));
    // The late subscriber saw nothing this cycle
    assert!(log.borrow().is_empty());
    bus.set_selection(Some(1));
    assert_eq!(log.borrow().last(), Some(&("late", Some(1))));
}

#[test]
fn inbound_frame_message_translates_to_zero_based() {
    let bus = Rc::new(SelectionBus::new());
    let port = FramePort::attach(&bus);
    let log: Log = Rc::default();
    bus.subscribe(recorder(&log, "widget"));

    port.handle_inbound_json(&bus, r#"{"type":"diveSelected","diveNumber":7}"#)
        .expect("well-formed message");
    assert_eq!(bus.selection(), Some(6));
    // Same widget notification as any local selection of index 6
    assert_eq!(*log.borrow(), vec![("widget", Some(6))]);
}

#[test]
fn local_selection_emits_one_based_outbound() {
    let bus = Rc::new(SelectionBus::new());
    let port = FramePort::attach(&bus);

    bus.set_selection(Some(2));
    let out = port.drain_outbound();
    assert_eq!(out, vec![FrameMessage::DiveSelected { dive_number: 3 }]);
    let json = serde_json::to_string(&out[0]).expect("serialize");
    assert_eq!(json, r#"{"type":"diveSelected","diveNumber":3}"#);

    // Clearing the selection crosses no boundary
    bus.set_selection(None);
    assert!(port.drain_outbound().is_empty());
}

#[test]
fn malformed_inbound_json_is_an_error_not_a_panic() {
    let bus = Rc::new(SelectionBus::new());
    let port = FramePort::attach(&bus);
    assert!(port.handle_inbound_json(&bus, r#"{"type":"unknown"}"#).is_err());
    assert!(port.handle_inbound_json(&bus, "not json").is_err());
    assert_eq!(bus.selection(), None);
}

#[test]
fn inbound_dive_number_zero_is_ignored() {
    let bus = Rc::new(SelectionBus::new());
    let port = FramePort::attach(&bus);
    port.handle_inbound(&bus, FrameMessage::DiveSelected { dive_number: 0 });
    assert_eq!(bus.selection(), None);
}
