use super::Scroll;

#[test]
fn it_stays_at_top_when_everything_fits() {
    let mut scroll = Scroll::default();
    scroll.set_state(10, 20);
    scroll.down();
    scroll.last();

    assert_eq!(scroll.position, 0);
    assert!(scroll.is_at_bottom());
}

#[test]
fn it_clamps_scrolling_down() {
    let mut scroll = Scroll::default();
    scroll.set_state(30, 20);
    scroll.down_page();

    assert_eq!(scroll.position, 10);
    assert!(scroll.is_at_bottom());
}

#[test]
fn it_scrolls_up_from_the_bottom() {
    let mut scroll = Scroll::default();
    scroll.set_state(50, 20);
    scroll.last();
    assert_eq!(scroll.position, 30);

    scroll.up();
    assert_eq!(scroll.position, 29);
    assert!(!scroll.is_at_bottom());

    scroll.up_page();
    assert_eq!(scroll.position, 19);
}

#[test]
fn it_clamps_when_the_list_shrinks() {
    let mut scroll = Scroll::default();
    scroll.set_state(50, 20);
    scroll.last();
    scroll.set_state(50, 45);

    assert_eq!(scroll.position, 5);
}
