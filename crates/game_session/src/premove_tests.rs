use super::*;
use crate::types::coord_to_sq;

#[test]
fn set_overwrites_previous_queued_move() {
    let mut slot = PremoveSlot::new();
    slot.set(coord_to_sq("d7").unwrap(), coord_to_sq("d5").unwrap());
    slot.set(coord_to_sq("g8").unwrap(), coord_to_sq("f6").unwrap());
    assert_eq!(
        slot.get(),
        Some((coord_to_sq("g8").unwrap(), coord_to_sq("f6").unwrap()))
    );
}

#[test]
fn cancel_clears_unconditionally() {
    let mut slot = PremoveSlot::new();
    slot.cancel();
    assert!(!slot.is_set());
    slot.set(0, 8);
    slot.cancel();
    assert!(!slot.is_set());
}

#[test]
fn take_empties_the_slot() {
    let mut slot = PremoveSlot::new();
    slot.set(0, 8);
    assert_eq!(slot.take(), Some((0, 8)));
    assert_eq!(slot.take(), None);
}

#[test]
fn endpoint_matching() {
    let mut slot = PremoveSlot::new();
    assert!(!slot.is_endpoint(0));
    slot.set(0, 8);
    assert!(slot.is_endpoint(0));
    assert!(slot.is_endpoint(8));
    assert!(!slot.is_endpoint(16));
}
