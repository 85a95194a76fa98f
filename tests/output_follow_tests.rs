//! Frame batching and viewport follow behaviour of the output pipeline.

mod common;

use common::{Harness, ms};
use cosmos_term::traits::{Geometry, RendererEvent};

fn line(len: usize) -> Vec<u8> {
    let mut data = vec![b'x'; len - 1];
    data.push(b'\n');
    data
}

#[test]
fn test_following_pane_stays_pinned_to_bottom() {
    let mut h = Harness::new();
    let (_, pane, handle) = h.bound_session("main");
    let renderer = h.renderer(pane);

    for _ in 0..100 {
        h.output(handle, &line(50));
        h.frame();
    }

    let state = renderer.borrow();
    assert_eq!(state.writes.len(), 100);
    assert_eq!(state.viewport_y, state.base_y);
    assert!(h.controller.pane(pane).unwrap().follow_output());
}

#[test]
fn test_user_scroll_up_stops_following_until_scroll_to_bottom() {
    let mut h = Harness::new();
    let (_, pane, handle) = h.bound_session("main");
    let renderer = h.renderer(pane);

    for frame in 0..100 {
        if frame == 10 {
            h.user_scroll(pane, 5);
            assert!(!h.controller.pane(pane).unwrap().follow_output());
        }
        h.output(handle, &line(50));
        h.frame();
        if frame >= 10 {
            let state = renderer.borrow();
            assert!(state.viewport_y < state.base_y, "frame {frame} moved the viewport");
        }
    }
    assert!(!h.controller.pane(pane).unwrap().follow_output());

    h.controller.scroll_to_bottom(pane);
    assert!(renderer.borrow().at_bottom());
    assert!(h.controller.pane(pane).unwrap().follow_output());

    h.output(handle, &line(50));
    h.frame();
    assert!(renderer.borrow().at_bottom());
}

#[test]
fn test_chunks_coalesce_into_one_write_per_frame() {
    let mut h = Harness::new();
    let (_, pane, handle) = h.bound_session("main");
    h.output(handle, b"one ");
    h.output(handle, b"two ");
    h.output(handle, b"three");
    assert!(h.controller.pane(pane).unwrap().has_pending_output());

    h.frame();
    let renderer = h.renderer(pane);
    assert_eq!(renderer.borrow().writes, vec![b"one two three".to_vec()]);
    assert!(!h.controller.pane(pane).unwrap().has_pending_output());

    // A frame with nothing queued writes nothing.
    h.frame();
    assert_eq!(renderer.borrow().writes.len(), 1);
}

#[test]
fn test_panes_flush_independently() {
    let mut h = Harness::new();
    let (_, a, ha) = h.bound_session("a");
    let (_, b, hb) = h.bound_session("b");
    h.output(hb, b"to b");
    h.output(ha, b"to a");
    h.frame();
    assert_eq!(h.renderer(a).borrow().written(), b"to a");
    assert_eq!(h.renderer(b).borrow().written(), b"to b");
}

#[test]
fn test_resize_reflow_is_not_mistaken_for_user_scroll() {
    let mut h = Harness::new();
    let (_, pane, handle) = h.bound_session("main");
    let renderer = h.renderer(pane);
    for _ in 0..10 {
        h.output(handle, &line(20));
        h.frame();
    }

    // The mock jumps the viewport to the top while resizing.
    renderer.borrow_mut().proposed = Some(Geometry::new(40, 100));
    let now = h.advance(ms(200));
    h.controller
        .handle_renderer_event(pane, RendererEvent::Resized, now);

    assert!(renderer.borrow().at_bottom());
    assert!(h.controller.pane(pane).unwrap().follow_output());
}

#[test]
fn test_fit_restoring_bottom_resumes_following() {
    let mut h = Harness::new();
    let (_, pane, handle) = h.bound_session("main");
    let renderer = h.renderer(pane);
    for _ in 0..5 {
        h.output(handle, &line(20));
        h.frame();
    }
    h.user_scroll(pane, 2);
    assert!(!h.controller.pane(pane).unwrap().follow_output());

    // Not following: the reflow leaves the viewport where the widget put it.
    renderer.borrow_mut().proposed = Some(Geometry::new(30, 90));
    let now = h.advance(ms(200));
    h.controller
        .handle_renderer_event(pane, RendererEvent::Resized, now);
    assert!(!h.controller.pane(pane).unwrap().follow_output());

    // A fit that lands on the bottom (nothing to scroll back through).
    {
        let mut s = renderer.borrow_mut();
        s.base_y = 0;
        s.proposed = Some(Geometry::new(31, 90));
    }
    let now = h.advance(ms(200));
    h.controller
        .handle_renderer_event(pane, RendererEvent::Resized, now);
    assert!(h.controller.pane(pane).unwrap().follow_output());
}

#[test]
fn test_interceptors_run_before_the_renderer_sees_output() {
    let mut h = Harness::new();
    let (_, pane, handle) = h.bound_session("main");
    h.output(
        handle,
        b"\x1b]133;A\x07$ \x1b]9;4;1;30\x07make\x1b[>1u\r\n",
    );
    h.frame();
    // OSC 133 stays for the renderer; progress and Kitty sequences do not.
    assert_eq!(
        h.renderer(pane).borrow().written(),
        b"\x1b]133;A\x07$ make\r\n"
    );
}
